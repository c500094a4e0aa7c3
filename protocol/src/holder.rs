//! The Holder: DID generation, credential handling, and construction of
//! the selective-disclosure + DID-binding proof.
//!
//! Grounded on `spec.md` §4.5 and `original_source/src/user.py`'s
//! `User.authenticate` / `build_identity_proof`; witness and challenge
//! derivation follow that file's algebra exactly, including the
//! holder-internal/verifier-exposed DID role swap called out in §9 as a
//! core protocol invariant.

use std::collections::{BTreeMap, BTreeSet};

use crate::codec::{self, ProofEnvelope};
use crate::group::{self, CanonicalBytes, G1, Zr};
use crate::issuer::{Credential, NizkProof, PublicParams};

/// A holder's DID key pair, in the *internal* convention: `u = v^s` for
/// the credential's blinding scalar `s`.
///
/// Registered on the ledger as `(u, v)` in this same internal order; the
/// role swap described in `spec.md` §9 only happens at proof-construction
/// time, when the pair is exposed to a verifier.
#[derive(Debug, Clone, Copy)]
pub struct Did {
    pub u: G1,
    pub v: G1,
}

/// Samples a fresh DID bound to a credential's blinding scalar `s`.
pub fn generate_did(s: Zr) -> Did {
    let v = group::random_g1();
    let u = v * s;
    Did { u, v }
}

/// Produces a Schnorr NIZK of knowledge of `m_i` for a blind attribute
/// commitment `C_i = h_i^{m_i}`, verifiable by [`crate::issuer::Issuer::verify_nizk`].
pub fn prove_attribute_knowledge(h_i: G1, m_i: Zr) -> (G1, NizkProof) {
    let commitment = h_i * m_i;
    let r = group::random_scalar();
    let r_point = h_i * r;

    let mut transcript = Vec::new();
    transcript.extend(h_i.to_canonical_bytes());
    transcript.extend(commitment.to_canonical_bytes());
    transcript.extend(r_point.to_canonical_bytes());
    let c = group::hash_to_scalar(&transcript);
    let z = r + c * m_i;

    (commitment, NizkProof { r: r_point, z })
}

/// A fully-built selective-disclosure proof, before wire encoding.
#[derive(Debug, Clone)]
pub struct DisclosureProof {
    pub disclosed_attrs: BTreeMap<usize, String>,
    /// Exposed `did_u := v_int` (role swap per §9).
    pub did_u: G1,
    /// Exposed `did_v := u_int` (role swap per §9).
    pub did_v: G1,
    pub a_prime: G1,
    pub a_bar: G1,
    pub c: Zr,
    pub z_x: Zr,
    pub z_r1: Zr,
    pub z_s_prime: Zr,
    pub z_s: Zr,
    pub r3: G1,
    pub z_hidden: BTreeMap<usize, Zr>,
}

impl DisclosureProof {
    /// Encodes this proof as the wire envelope exchanged with a verifier.
    pub fn to_wire(&self) -> ProofEnvelope {
        ProofEnvelope {
            disclosed_attrs: self
                .disclosed_attrs
                .iter()
                .map(|(i, v)| (format!("m{i}"), v.clone()))
                .collect(),
            did_u: codec::encode_g1(&self.did_u),
            did_v: codec::encode_g1(&self.did_v),
            a_prime: codec::encode_g1(&self.a_prime),
            a_bar: codec::encode_g1(&self.a_bar),
            c: codec::encode_zr(&self.c),
            z_x: codec::encode_zr(&self.z_x),
            z_r1: codec::encode_zr(&self.z_r1),
            z_s_prime: codec::encode_zr(&self.z_s_prime),
            z_s: codec::encode_zr(&self.z_s),
            r3: codec::encode_g1(&self.r3),
            z_hidden: self
                .z_hidden
                .iter()
                .map(|(i, z)| (format!("m{i}"), codec::encode_zr(z)))
                .collect(),
        }
    }
}

/// Builds the selective-disclosure + DID-binding proof of possession of
/// `cred` over `attribute_values` (`1..=n`, keyed by slot index), revealing
/// only the slots in `disclosed`.
///
/// `did` must satisfy `did.u == did.v * cred.s` (the internal convention
/// established by [`generate_did`]); this is the holder's own witness, not
/// re-checked here — an inconsistent DID simply produces a proof the
/// verifier will reject at the DID-binding step.
pub fn build_disclosure_proof(
    pp: &PublicParams,
    cred: &Credential,
    attribute_values: &BTreeMap<usize, String>,
    disclosed: &BTreeSet<usize>,
    did: Did,
) -> DisclosureProof {
    let hidden: BTreeSet<usize> = (1..=pp.n).filter(|i| !disclosed.contains(i)).collect();

    let m: BTreeMap<usize, Zr> = attribute_values
        .iter()
        .map(|(i, v)| (*i, group::hash_to_scalar(v.as_bytes())))
        .collect();

    let r1 = group::random_scalar();
    let a_prime = cred.a * r1;

    let mut b = pp.g1 + pp.h(0) * cred.s;
    for (i, m_i) in &m {
        b += pp.h(*i) * *m_i;
    }
    let a_bar = a_prime * (-cred.x) + b * r1;

    let s_prime = cred.s * r1;
    let m_prime: BTreeMap<usize, Zr> = hidden.iter().map(|i| (*i, m[i] * r1)).collect();

    let k_x = group::random_scalar();
    let k_r1 = group::random_scalar();
    let k_s_prime = group::random_scalar();
    let k_s = group::random_scalar();
    let k_hidden: BTreeMap<usize, Zr> = hidden.iter().map(|i| (*i, group::random_scalar())).collect();

    let mut b_d = pp.g1;
    for i in disclosed {
        b_d += pp.h(*i) * m[i];
    }

    let mut t = a_prime * (-k_x) + b_d * k_r1 + pp.h(0) * k_s_prime;
    for i in &hidden {
        t += pp.h(*i) * k_hidden[i];
    }

    // Role swap (§9): the witness DID is (u_int, v_int) with
    // u_int = v_int^s; the verifier-facing pair is exposed swapped.
    let did_u = did.v;
    let did_v = did.u;
    let r3 = did_u * k_s;

    let mut transcript = Vec::new();
    transcript.extend(a_prime.to_canonical_bytes());
    transcript.extend(a_bar.to_canonical_bytes());
    transcript.extend(t.to_canonical_bytes());
    transcript.extend(r3.to_canonical_bytes());
    let c = group::hash_to_scalar(&transcript);

    let z_x = k_x + c * cred.x;
    let z_r1 = k_r1 + c * r1;
    let z_s_prime = k_s_prime + c * s_prime;
    let z_s = k_s + c * cred.s;
    let z_hidden: BTreeMap<usize, Zr> = hidden
        .iter()
        .map(|i| (*i, k_hidden[i] + c * m_prime[i]))
        .collect();

    DisclosureProof {
        disclosed_attrs: disclosed
            .iter()
            .map(|i| (*i, attribute_values[i].clone()))
            .collect(),
        did_u,
        did_v,
        a_prime,
        a_bar,
        c,
        z_x,
        z_r1,
        z_s_prime,
        z_s,
        r3,
        z_hidden,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issuer::{AttributeSlot, Issuer};

    fn issue_cleartext(issuer: &Issuer, values: &[&str]) -> (Credential, BTreeMap<usize, String>) {
        let attrs: BTreeMap<String, AttributeSlot> = values
            .iter()
            .enumerate()
            .map(|(idx, v)| (format!("m{}", idx + 1), AttributeSlot::Value(v.to_string())))
            .collect();
        let cred = issuer.issue(&attrs).expect("issuance should succeed");
        let values_map = values
            .iter()
            .enumerate()
            .map(|(idx, v)| (idx + 1, v.to_string()))
            .collect();
        (cred, values_map)
    }

    #[test]
    fn generated_did_satisfies_internal_binding_equation() {
        let s = group::random_scalar();
        let did = generate_did(s);
        assert_eq!(did.u, did.v * s);
    }

    #[test]
    fn attribute_knowledge_proof_is_accepted_by_issuer_verification() {
        let issuer = Issuer::setup(1);
        let pp = issuer.public_params();
        let m = group::hash_to_scalar(b"alice");
        let (commitment, proof) = prove_attribute_knowledge(pp.h(1), m);
        assert!(Issuer::verify_nizk(pp.h(1), commitment, &proof));
    }

    #[test]
    fn disclosure_proof_is_internally_consistent() {
        let issuer = Issuer::setup(3);
        let pp = issuer.public_params().clone();
        let (cred, values) = issue_cleartext(&issuer, &["alice", "25", "student"]);
        let did = generate_did(cred.s);

        let disclosed: BTreeSet<usize> = [1usize, 3].into_iter().collect();
        let proof = build_disclosure_proof(&pp, &cred, &values, &disclosed, did);

        assert_eq!(proof.disclosed_attrs.len(), 2);
        assert_eq!(proof.disclosed_attrs[&1], "alice");
        assert_eq!(proof.disclosed_attrs[&3], "student");
        assert_eq!(proof.z_hidden.len(), 1);
        assert!(proof.z_hidden.contains_key(&2));

        // Pairing relation the proof claims: Abar = A'^sk, so
        // pair(Abar, g2) == pair(A', pk).
        assert_eq!(group::pair(proof.a_bar, pp.g2), group::pair(proof.a_prime, pp.pk));

        // DID-binding relation: did_u = did_v^s (post-swap).
        assert_eq!(proof.did_u, proof.did_v * cred.s);
    }

    #[test]
    fn wire_envelope_round_trips_field_names() {
        let issuer = Issuer::setup(2);
        let pp = issuer.public_params().clone();
        let (cred, values) = issue_cleartext(&issuer, &["alice", "25"]);
        let did = generate_did(cred.s);
        let disclosed: BTreeSet<usize> = [1usize].into_iter().collect();
        let proof = build_disclosure_proof(&pp, &cred, &values, &disclosed, did);

        let wire = proof.to_wire();
        assert_eq!(wire.disclosed_attrs.get("m1").unwrap(), "alice");
        assert_eq!(wire.z_hidden.len(), 1);
        assert!(wire.z_hidden.contains_key("m2"));
    }
}
