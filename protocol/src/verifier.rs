//! The Verifier: policy enforcement, pairing check, Schnorr
//! re-derivation, and DID-binding check.
//!
//! Grounded on `spec.md` §4.6 and `original_source/src/verifier.py`'s
//! `Verifier.verify`; the four-step short-circuit order is load-bearing
//! and preserved exactly.

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::codec::ProofEnvelope;
use crate::error::ProtocolError;
use crate::group::{self, CanonicalBytes};
use crate::issuer::PublicParams;

/// A disclosure policy: required value per attribute slot key (`"m1"`,
/// `"m2"`, ...). Slots absent from the policy are unconstrained.
pub type Policy = BTreeMap<String, String>;

struct VerifierState {
    pp: Option<PublicParams>,
    policy: Policy,
}

/// The Verifier. Internally synchronized with a single `RwLock`, matching
/// the Ledger's single-lock-over-mutable-state shape so it can be shared
/// behind an `Arc` without an additional outer mutex.
pub struct Verifier {
    state: RwLock<VerifierState>,
}

impl Default for Verifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Verifier {
    /// Creates a verifier with no public parameters or policy configured.
    pub fn new() -> Self {
        Verifier {
            state: RwLock::new(VerifierState {
                pp: None,
                policy: Policy::new(),
            }),
        }
    }

    /// Configures (or replaces) the public parameters this verifier
    /// checks proofs against.
    pub fn setup(&self, pp: PublicParams) {
        let mut state = self.state.write().expect("verifier lock poisoned");
        state.pp = Some(pp);
    }

    /// Replaces the disclosure policy.
    pub fn set_policy(&self, policy: Policy) {
        let mut state = self.state.write().expect("verifier lock poisoned");
        state.policy = policy;
    }

    /// Returns a copy of the current policy.
    pub fn policy(&self) -> Policy {
        let state = self.state.read().expect("verifier lock poisoned");
        state.policy.clone()
    }

    /// Runs the four verification checks against `proof`, short-circuiting
    /// on the first failure.
    pub fn verify(&self, proof: &ProofEnvelope) -> Result<(), ProtocolError> {
        let state = self.state.read().expect("verifier lock poisoned");
        let pp = state
            .pp
            .as_ref()
            .ok_or_else(|| ProtocolError::NotInitialized("verifier has no public parameters; call setup first".to_string()))?;

        // 1. Policy.
        for (key, required) in &state.policy {
            let disclosed = proof.disclosed_attrs.get(key).ok_or_else(|| {
                ProtocolError::PolicyViolation(format!("required attribute {key} was not disclosed"))
            })?;
            if disclosed != required {
                return Err(ProtocolError::PolicyViolation(format!(
                    "attribute {key} did not match policy"
                )));
            }
        }

        let a_prime = crate::codec::decode_g1(&proof.a_prime)?;
        let a_bar = crate::codec::decode_g1(&proof.a_bar)?;
        let c = crate::codec::decode_zr(&proof.c)?;
        let z_x = crate::codec::decode_zr(&proof.z_x)?;
        let z_r1 = crate::codec::decode_zr(&proof.z_r1)?;
        let z_s_prime = crate::codec::decode_zr(&proof.z_s_prime)?;
        let z_s = crate::codec::decode_zr(&proof.z_s)?;
        let r3 = crate::codec::decode_g1(&proof.r3)?;
        let did_u = crate::codec::decode_g1(&proof.did_u)?;
        let did_v = crate::codec::decode_g1(&proof.did_v)?;

        // 2. Pairing: Abar = A'^sk, checked without ever knowing sk.
        if group::pair(a_bar, pp.g2) != group::pair(a_prime, pp.pk) {
            return Err(ProtocolError::PairingCheckFailed);
        }

        // 3. Schnorr re-derivation.
        let disclosed_indices = indices(&proof.disclosed_attrs)?;
        let hidden_indices = indices(&proof.z_hidden)?;

        let mut b_d = pp.g1;
        for (key, i) in &disclosed_indices {
            let value = &proof.disclosed_attrs[key];
            b_d += pp.h(*i) * group::hash_to_scalar(value.as_bytes());
        }

        let mut t_prime = a_prime * (-z_x) + b_d * z_r1 + pp.h(0) * z_s_prime;
        for (key, i) in &hidden_indices {
            let z_m_i = crate::codec::decode_zr(&proof.z_hidden[key])?;
            t_prime += pp.h(*i) * z_m_i;
        }
        t_prime += a_bar * (-c);

        let mut transcript = Vec::new();
        transcript.extend(a_prime.to_canonical_bytes());
        transcript.extend(a_bar.to_canonical_bytes());
        transcript.extend(t_prime.to_canonical_bytes());
        transcript.extend(r3.to_canonical_bytes());
        let c_prime = group::hash_to_scalar(&transcript);

        if c != c_prime {
            return Err(ProtocolError::SchnorrCheckFailed);
        }

        // 4. DID binding.
        if did_u * z_s != r3 + did_v * c {
            return Err(ProtocolError::DidCheckFailed);
        }

        Ok(())
    }
}

/// Parses `"m{i}"` keys into `(key, i)` pairs, sorted by key for
/// deterministic iteration.
fn indices(map: &BTreeMap<String, String>) -> Result<BTreeMap<String, usize>, ProtocolError> {
    map.keys()
        .map(|key| {
            let i: usize = key
                .strip_prefix('m')
                .and_then(|n| n.parse().ok())
                .ok_or_else(|| ProtocolError::InputMalformed(format!("malformed attribute key {key}")))?;
            Ok((key.clone(), i))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::holder::{self, Did};
    use crate::issuer::{AttributeSlot, Issuer};
    use std::collections::BTreeSet;

    fn full_setup(n: usize, values: &[&str]) -> (Issuer, BTreeMap<usize, String>, crate::issuer::Credential, Did) {
        let issuer = Issuer::setup(n);
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
        let did = holder::generate_did(cred.s);
        (issuer, values_map, cred, did)
    }

    #[test]
    fn scenario_1_valid_proof_satisfying_policy_verifies() {
        let (issuer, values, cred, did) = full_setup(3, &["alice", "25", "student"]);
        let disclosed: BTreeSet<usize> = [1usize, 3].into_iter().collect();
        let proof = holder::build_disclosure_proof(issuer.public_params(), &cred, &values, &disclosed, did).to_wire();

        let verifier = Verifier::new();
        verifier.setup(issuer.public_params().clone());
        verifier.set_policy(Policy::from([
            ("m1".to_string(), "alice".to_string()),
            ("m3".to_string(), "student".to_string()),
        ]));

        assert!(verifier.verify(&proof).is_ok());
    }

    #[test]
    fn scenario_2_policy_violation_is_rejected() {
        let (issuer, values, cred, did) = full_setup(3, &["alice", "25", "student"]);
        let disclosed: BTreeSet<usize> = [1usize, 3].into_iter().collect();
        let proof = holder::build_disclosure_proof(issuer.public_params(), &cred, &values, &disclosed, did).to_wire();

        let verifier = Verifier::new();
        verifier.setup(issuer.public_params().clone());
        verifier.set_policy(Policy::from([("m1".to_string(), "bob".to_string())]));

        let err = verifier.verify(&proof).unwrap_err();
        assert_eq!(err.kind(), "POLICY_VIOLATION");
    }

    #[test]
    fn scenario_3_disclosed_keys_are_exactly_the_requested_set() {
        let (issuer, values, cred, did) = full_setup(4, &["100", "secret_age", "105", "secret_id"]);
        let disclosed: BTreeSet<usize> = [1usize, 3].into_iter().collect();
        let proof = holder::build_disclosure_proof(issuer.public_params(), &cred, &values, &disclosed, did);

        let mut keys: Vec<&usize> = proof.disclosed_attrs.keys().collect();
        keys.sort();
        assert_eq!(keys, vec![&1, &3]);

        let wire = proof.to_wire();
        let verifier = Verifier::new();
        verifier.setup(issuer.public_params().clone());
        verifier.set_policy(Policy::from([
            ("m1".to_string(), "100".to_string()),
            ("m3".to_string(), "105".to_string()),
        ]));
        assert!(verifier.verify(&wire).is_ok());
    }

    #[test]
    fn tampered_credential_fails_pairing_check() {
        let (issuer, values, cred, did) = full_setup(2, &["alice", "25"]);
        let disclosed: BTreeSet<usize> = [1usize].into_iter().collect();
        let mut proof = holder::build_disclosure_proof(issuer.public_params(), &cred, &values, &disclosed, did).to_wire();
        proof.a_bar = crate::codec::encode_g1(&group::random_g1());

        let verifier = Verifier::new();
        verifier.setup(issuer.public_params().clone());
        let err = verifier.verify(&proof).unwrap_err();
        assert_eq!(err.kind(), "PAIRING_CHECK_FAILED");
    }

    #[test]
    fn tampered_response_scalar_fails_schnorr_check() {
        let (issuer, values, cred, did) = full_setup(2, &["alice", "25"]);
        let disclosed: BTreeSet<usize> = [1usize].into_iter().collect();
        let mut proof = holder::build_disclosure_proof(issuer.public_params(), &cred, &values, &disclosed, did).to_wire();
        proof.z_x = crate::codec::encode_zr(&group::random_scalar());

        let verifier = Verifier::new();
        verifier.setup(issuer.public_params().clone());
        let err = verifier.verify(&proof).unwrap_err();
        assert_eq!(err.kind(), "SCHNORR_CHECK_FAILED");
    }

    #[test]
    fn mismatched_did_fails_binding_check() {
        let (issuer, values, cred, _did) = full_setup(2, &["alice", "25"]);
        let wrong_did = Did {
            u: group::random_g1(),
            v: group::random_g1(),
        };
        let disclosed: BTreeSet<usize> = [1usize].into_iter().collect();
        let proof =
            holder::build_disclosure_proof(issuer.public_params(), &cred, &values, &disclosed, wrong_did).to_wire();

        let verifier = Verifier::new();
        verifier.setup(issuer.public_params().clone());
        let err = verifier.verify(&proof).unwrap_err();
        assert_eq!(err.kind(), "DID_CHECK_FAILED");
    }

    #[test]
    fn tampered_r3_fails_schnorr_check() {
        let (issuer, values, cred, did) = full_setup(2, &["alice", "25"]);
        let disclosed: BTreeSet<usize> = [1usize].into_iter().collect();
        let mut proof = holder::build_disclosure_proof(issuer.public_params(), &cred, &values, &disclosed, did).to_wire();
        proof.r3 = crate::codec::encode_g1(&group::random_g1());

        let verifier = Verifier::new();
        verifier.setup(issuer.public_params().clone());
        let err = verifier.verify(&proof).unwrap_err();
        assert_eq!(err.kind(), "SCHNORR_CHECK_FAILED");
    }

    #[test]
    fn verify_before_setup_is_not_initialized() {
        let (issuer, values, cred, did) = full_setup(1, &["alice"]);
        let disclosed: BTreeSet<usize> = [1usize].into_iter().collect();
        let proof = holder::build_disclosure_proof(issuer.public_params(), &cred, &values, &disclosed, did).to_wire();

        let verifier = Verifier::new();
        let err = verifier.verify(&proof).unwrap_err();
        assert_eq!(err.kind(), "NOT_INITIALIZED");
    }
}
