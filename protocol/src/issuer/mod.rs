//! The Issuer: BBS+ parameter generation, blind-attribute NIZK
//! verification, and credential issuance.
//!
//! Grounded on `spec.md` §4.4 and `original_source/src/issuer.py` /
//! `test_issuer.py` (the reference's exact NIZK verification equation and
//! the `A := g1 * h0^s`, then per-slot accumulation, then
//! `A := A^{1/(sk+x)}` issuance order).

use crate::error::ProtocolError;
use crate::group::{self, CanonicalBytes, G1, G2, Zr};

/// Public parameters, fixed after [`Issuer::setup`] and shared by value
/// with the Holder and Verifier.
#[derive(Debug, Clone)]
pub struct PublicParams {
    pub n: usize,
    pub g1: G1,
    pub g2: G2,
    pub pk: G2,
    /// Auxiliary base, generated and serialized for wire compatibility but
    /// unused by the current verifier (see DESIGN.md).
    pub hp: G1,
    /// Attribute bases `h[0]..h[n]`; `h[0]` is the blinding-factor base,
    /// `h[i]` (i>=1) is the i-th attribute base.
    pub h: Vec<G1>,
}

impl PublicParams {
    /// Returns the i-th attribute base (`h[0]` is the blinding base).
    pub fn h(&self, i: usize) -> G1 {
        self.h[i]
    }
}

/// A BBS+ credential `(A, x, s)` over the issuer's attribute bases.
#[derive(Debug, Clone, Copy)]
pub struct Credential {
    pub a: G1,
    pub x: Zr,
    pub s: Zr,
}

/// A Schnorr NIZK of knowledge of the discrete log of a blind-attribute
/// commitment, `pi_i = (R, z)`.
#[derive(Debug, Clone, Copy)]
pub struct NizkProof {
    pub r: G1,
    pub z: Zr,
}

/// One attribute slot in an issuance request: either a cleartext value or
/// a blind commitment with its NIZK.
#[derive(Debug, Clone)]
pub enum AttributeSlot {
    Value(String),
    Blind { commitment: G1, proof: NizkProof },
}

/// The Issuer. Holds `sk` in process memory only; there is no
/// persistence layer (by design — see `spec.md` Non-goals).
pub struct Issuer {
    pp: PublicParams,
    sk: Zr,
}

impl Issuer {
    /// Samples fresh public parameters and a secret key for an `n`-slot
    /// credential scheme.
    pub fn setup(n: usize) -> Self {
        let sk = group::random_scalar();
        let g1 = group::random_g1();
        let g2 = group::random_g2();
        let pk = g2 * sk;
        let hp = group::random_g1();
        let h: Vec<G1> = (0..=n).map(|_| group::random_g1()).collect();

        Issuer {
            pp: PublicParams {
                n,
                g1,
                g2,
                pk,
                hp,
                h,
            },
            sk,
        }
    }

    /// The issuer's public parameters, shareable with Holder/Verifier.
    pub fn public_params(&self) -> &PublicParams {
        &self.pp
    }

    /// Verifies a blind-attribute Schnorr NIZK: given `h_i`, commitment
    /// `C_i = h_i^{m_i}`, and `pi_i = (R, z)`, accepts iff
    /// `h_i^z == C_i^c * R` where `c = hash_to_scalar(ser(h_i) || ser(C_i) || ser(R))`.
    pub fn verify_nizk(h_i: G1, commitment: G1, proof: &NizkProof) -> bool {
        let mut transcript = Vec::new();
        transcript.extend(h_i.to_canonical_bytes());
        transcript.extend(commitment.to_canonical_bytes());
        transcript.extend(proof.r.to_canonical_bytes());
        let c = group::hash_to_scalar(&transcript);

        h_i * proof.z == commitment * c + proof.r
    }

    /// Issues a BBS+ credential over `attrs`, a map from `"m1".."mn"` to
    /// attribute slots.
    ///
    /// Requires exactly `n` slots. Blind slots are NIZK-verified before
    /// any accumulation takes place; a single rejected NIZK aborts the
    /// whole request (`NizkRejected`), not just that slot.
    pub fn issue(
        &self,
        attrs: &std::collections::BTreeMap<String, AttributeSlot>,
    ) -> Result<Credential, ProtocolError> {
        if attrs.len() != self.pp.n {
            return Err(ProtocolError::AttributeMismatch(format!(
                "expected {} attribute slots, got {}",
                self.pp.n,
                attrs.len()
            )));
        }

        let x = group::random_scalar();
        let s = group::random_scalar();
        let mut a = self.pp.g1 + self.pp.h(0) * s;

        for i in 1..=self.pp.n {
            let key = format!("m{i}");
            let slot = attrs.get(&key).ok_or_else(|| {
                ProtocolError::AttributeMismatch(format!("missing attribute slot {key}"))
            })?;

            match slot {
                AttributeSlot::Value(value) => {
                    let m_i = group::hash_to_scalar(value.as_bytes());
                    a += self.pp.h(i) * m_i;
                }
                AttributeSlot::Blind { commitment, proof } => {
                    if !Self::verify_nizk(self.pp.h(i), *commitment, proof) {
                        return Err(ProtocolError::NizkRejected(format!(
                            "NIZK for slot {key} failed verification"
                        )));
                    }
                    a += *commitment;
                }
            }
        }

        let denom = self.sk + x;
        let inv = group::invert(denom).ok_or_else(|| {
            ProtocolError::InputMalformed("sk + x collided to zero; resubmit".to_string())
        })?;
        a *= inv;

        Ok(Credential { a, x, s })
    }
}
