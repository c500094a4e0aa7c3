//! Wire codec: Base64-canonical string encoding for group elements and
//! scalars, plus the JSON envelope types exchanged between services.
//!
//! Per the specification's external-interfaces section, every group
//! element or scalar crossing an HTTP boundary is encoded as a standard
//! Base64 string over the canonical (compressed) serialization from
//! [`crate::group`]. This module is the only place that touches
//! `base64`; everything else works with typed [`crate::group`] values.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;
use crate::group::{CanonicalBytes, G1, G2, Zr};
use crate::issuer::{AttributeSlot, Credential, NizkProof, PublicParams};

/// Encodes a group or scalar element as a Base64 string over its
/// canonical byte encoding.
pub fn encode<T: CanonicalBytes>(value: &T) -> String {
    B64.encode(value.to_canonical_bytes())
}

/// Decodes a Base64 string produced by [`encode`] back into a group or
/// scalar element.
pub fn decode<T: CanonicalBytes>(s: &str) -> Result<T, ProtocolError> {
    let bytes = B64
        .decode(s)
        .map_err(|_| ProtocolError::DeserializationFailed(format!("invalid base64: {s}")))?;
    T::from_canonical_bytes(&bytes).map_err(ProtocolError::from)
}

/// Wire form of [`crate::issuer::PublicParams`].
///
/// `h` holds `h0..hn` in index order (`h[0]` is the blinding base).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicParamsWire {
    pub n: usize,
    pub g1: String,
    pub g2: String,
    pub pk: String,
    pub hp: String,
    pub h: Vec<String>,
}

/// Wire form of a blind-attribute Schnorr NIZK, `pi_i = (R, z)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NizkProofWire {
    #[serde(rename = "R")]
    pub r: String,
    pub z: String,
}

/// Wire form of one attribute slot in an `/issue` request: either a
/// cleartext value or a blind commitment with its NIZK.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeSlotWire {
    Value { value: String },
    Blind { commitment: String, proof: NizkProofWire },
}

/// Wire form of an `/issue` request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueRequest {
    pub attributes: std::collections::BTreeMap<String, AttributeSlotWire>,
}

/// Wire form of an issued [`crate::issuer::Credential`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialWire {
    #[serde(rename = "A")]
    pub a: String,
    pub x: String,
    pub s: String,
}

/// Wire form of the selective-disclosure proof envelope from §4.5.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProofEnvelope {
    pub disclosed_attrs: std::collections::BTreeMap<String, String>,
    pub did_u: String,
    pub did_v: String,
    #[serde(rename = "A_prime")]
    pub a_prime: String,
    #[serde(rename = "A_bar")]
    pub a_bar: String,
    pub c: String,
    pub z_x: String,
    pub z_r1: String,
    pub z_s_prime: String,
    pub z_s: String,
    #[serde(rename = "R3")]
    pub r3: String,
    pub z_hidden: std::collections::BTreeMap<String, String>,
}

impl PublicParamsWire {
    pub fn from_domain(pp: &PublicParams) -> Self {
        PublicParamsWire {
            n: pp.n,
            g1: encode_g1(&pp.g1),
            g2: encode_g2(&pp.g2),
            pk: encode_g2(&pp.pk),
            hp: encode_g1(&pp.hp),
            h: pp.h.iter().map(encode_g1).collect(),
        }
    }

    pub fn into_domain(self) -> Result<PublicParams, ProtocolError> {
        Ok(PublicParams {
            n: self.n,
            g1: decode_g1(&self.g1)?,
            g2: decode_g2(&self.g2)?,
            pk: decode_g2(&self.pk)?,
            hp: decode_g1(&self.hp)?,
            h: self.h.iter().map(|s| decode_g1(s)).collect::<Result<Vec<_>, _>>()?,
        })
    }
}

impl NizkProofWire {
    pub fn from_domain(proof: &NizkProof) -> Self {
        NizkProofWire {
            r: encode_g1(&proof.r),
            z: encode_zr(&proof.z),
        }
    }

    pub fn into_domain(&self) -> Result<NizkProof, ProtocolError> {
        Ok(NizkProof {
            r: decode_g1(&self.r)?,
            z: decode_zr(&self.z)?,
        })
    }
}

impl AttributeSlotWire {
    pub fn into_domain(&self) -> Result<AttributeSlot, ProtocolError> {
        match self {
            AttributeSlotWire::Value { value } => Ok(AttributeSlot::Value(value.clone())),
            AttributeSlotWire::Blind { commitment, proof } => Ok(AttributeSlot::Blind {
                commitment: decode_g1(commitment)?,
                proof: proof.into_domain()?,
            }),
        }
    }
}

impl IssueRequest {
    pub fn into_domain(&self) -> Result<std::collections::BTreeMap<String, AttributeSlot>, ProtocolError> {
        self.attributes
            .iter()
            .map(|(k, v)| Ok((k.clone(), v.into_domain()?)))
            .collect()
    }
}

impl CredentialWire {
    pub fn from_domain(cred: &Credential) -> Self {
        CredentialWire {
            a: encode_g1(&cred.a),
            x: encode_zr(&cred.x),
            s: encode_zr(&cred.s),
        }
    }
}

pub fn encode_g1(v: &G1) -> String {
    encode(v)
}
pub fn encode_g2(v: &G2) -> String {
    encode(v)
}
pub fn encode_zr(v: &Zr) -> String {
    encode(v)
}
pub fn decode_g1(s: &str) -> Result<G1, ProtocolError> {
    decode(s)
}
pub fn decode_g2(s: &str) -> Result<G2, ProtocolError> {
    decode(s)
}
pub fn decode_zr(s: &str) -> Result<Zr, ProtocolError> {
    decode(s)
}
