//! Core cryptographic protocol for the DID/BBS+ anonymous-credential
//! system: pairing-group abstraction, wire codec, Merkle/SPV ledger, and
//! the Issuer/Holder/Verifier triad.
//!
//! HTTP transport, CLI parsing, and process bootstrap live in the
//! `issuer-gateway`, `verifier-gateway`, `ledger-gateway`, and
//! `holder-cli` binaries; this crate is transport-agnostic.

pub mod codec;
pub mod error;
pub mod group;
pub mod holder;
pub mod issuer;
pub mod ledger;
pub mod merkle;
pub mod verifier;

pub use error::{CryptoError, ProtocolError};

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};

    use crate::group;
    use crate::holder;
    use crate::issuer::{AttributeSlot, Issuer};
    use crate::ledger::Ledger;
    use crate::verifier::{Policy, Verifier};

    fn cleartext(values: &[&str]) -> BTreeMap<String, AttributeSlot> {
        values
            .iter()
            .enumerate()
            .map(|(idx, v)| (format!("m{}", idx + 1), AttributeSlot::Value(v.to_string())))
            .collect()
    }

    fn values_map(values: &[&str]) -> BTreeMap<usize, String> {
        values
            .iter()
            .enumerate()
            .map(|(idx, v)| (idx + 1, v.to_string()))
            .collect()
    }

    /// Scenario 1: disclose {m1, m3}, policy satisfied, expect valid=true.
    #[test]
    fn scenario_1_full_flow_with_satisfied_policy() {
        let issuer = Issuer::setup(3);
        let pp = issuer.public_params().clone();
        let cred = issuer.issue(&cleartext(&["alice", "25", "student"])).unwrap();
        let values = values_map(&["alice", "25", "student"]);
        let did = holder::generate_did(cred.s);

        let disclosed: BTreeSet<usize> = [1, 3].into_iter().collect();
        let proof = holder::build_disclosure_proof(&pp, &cred, &values, &disclosed, did).to_wire();

        let verifier = Verifier::new();
        verifier.setup(pp);
        verifier.set_policy(Policy::from([
            ("m1".to_string(), "alice".to_string()),
            ("m3".to_string(), "student".to_string()),
        ]));

        assert!(verifier.verify(&proof).is_ok());
    }

    /// Scenario 2: same setup, policy requires m1="bob" -> POLICY_VIOLATION.
    #[test]
    fn scenario_2_policy_mismatch_is_rejected() {
        let issuer = Issuer::setup(3);
        let pp = issuer.public_params().clone();
        let cred = issuer.issue(&cleartext(&["alice", "25", "student"])).unwrap();
        let values = values_map(&["alice", "25", "student"]);
        let did = holder::generate_did(cred.s);

        let disclosed: BTreeSet<usize> = [1, 3].into_iter().collect();
        let proof = holder::build_disclosure_proof(&pp, &cred, &values, &disclosed, did).to_wire();

        let verifier = Verifier::new();
        verifier.setup(pp);
        verifier.set_policy(Policy::from([("m1".to_string(), "bob".to_string())]));

        let err = verifier.verify(&proof).unwrap_err();
        assert_eq!(err.kind(), "POLICY_VIOLATION");
    }

    /// Scenario 3: n=4, disclose {m1,m3}, expect disclosed keys exactly {m1,m3}.
    #[test]
    fn scenario_3_disclosed_key_set_is_exact() {
        let issuer = Issuer::setup(4);
        let pp = issuer.public_params().clone();
        let cred = issuer
            .issue(&cleartext(&["100", "secret_age", "105", "secret_id"]))
            .unwrap();
        let values = values_map(&["100", "secret_age", "105", "secret_id"]);
        let did = holder::generate_did(cred.s);

        let disclosed: BTreeSet<usize> = [1, 3].into_iter().collect();
        let proof = holder::build_disclosure_proof(&pp, &cred, &values, &disclosed, did);
        let wire = proof.to_wire();

        assert_eq!(wire.disclosed_attrs.keys().cloned().collect::<BTreeSet<_>>(), BTreeSet::from(["m1".to_string(), "m3".to_string()]));

        let verifier = Verifier::new();
        verifier.setup(pp);
        verifier.set_policy(Policy::from([
            ("m1".to_string(), "100".to_string()),
            ("m3".to_string(), "105".to_string()),
        ]));
        assert!(verifier.verify(&wire).is_ok());
    }

    /// Scenario 4: all three slots blinded with correct NIZKs, issuance
    /// succeeds and the credential satisfies the BBS+ pairing equation.
    #[test]
    fn scenario_4_fully_blind_issuance_satisfies_bbs_equation() {
        let issuer = Issuer::setup(3);
        let pp = issuer.public_params().clone();

        let values = ["alice", "25", "student"];
        let mut attrs = BTreeMap::new();
        for (idx, v) in values.iter().enumerate() {
            let i = idx + 1;
            let m_i = group::hash_to_scalar(v.as_bytes());
            let (commitment, proof) = holder::prove_attribute_knowledge(pp.h(i), m_i);
            attrs.insert(format!("m{i}"), AttributeSlot::Blind { commitment, proof });
        }

        let cred = issuer.issue(&attrs).expect("blind issuance should succeed");

        let lhs = group::pair(cred.a, pp.g2 * cred.x + pp.pk);
        let mut rhs_base = pp.g1 + pp.h(0) * cred.s;
        for (idx, v) in values.iter().enumerate() {
            rhs_base += pp.h(idx + 1) * group::hash_to_scalar(v.as_bytes());
        }
        let rhs = group::pair(rhs_base, pp.g2);
        assert_eq!(lhs, rhs);
    }

    /// Scenario 5: blind commitment over "bob" but NIZK response computed
    /// with "alice"'s scalar -> NIZK_REJECTED.
    #[test]
    fn scenario_5_malicious_blind_issuance_is_rejected() {
        let issuer = Issuer::setup(1);
        let pp = issuer.public_params().clone();

        let m_alice = group::hash_to_scalar(b"alice");
        let m_bob = group::hash_to_scalar(b"bob");
        let commitment = pp.h(1) * m_bob;
        let (_, honest_proof) = holder::prove_attribute_knowledge(pp.h(1), m_alice);

        let mut attrs = BTreeMap::new();
        attrs.insert(
            "m1".to_string(),
            AttributeSlot::Blind {
                commitment,
                proof: honest_proof,
            },
        );

        let err = issuer.issue(&attrs).unwrap_err();
        assert_eq!(err.kind(), "NIZK_REJECTED");
    }

    /// Scenario 6: submit four transactions, mine, SPV on (Bob,Charlie) at
    /// height 1 verifies against the block's merkle_root.
    #[test]
    fn scenario_6_spv_proof_verifies_against_block_root() {
        let ledger = Ledger::new();
        ledger.submit("Alice".into(), "Bob".into());
        ledger.submit("Bob".into(), "Charlie".into());
        ledger.submit("Charlie".into(), "David".into());
        ledger.submit("David".into(), "Eve".into());
        ledger.mine().expect("should mine");

        let spv = ledger.spv(1, "Bob", "Charlie").expect("transaction should exist");
        assert!(crate::merkle::verify(&spv.transaction, &spv.merkle_root, &spv.proof));
    }

    /// Scenario 7: genesis block shape.
    #[test]
    fn scenario_7_genesis_block_shape() {
        let ledger = Ledger::new();
        let snapshot = ledger.chain();
        let genesis = &snapshot.chain[0];
        assert_eq!(genesis.header.height, 0);
        assert_eq!(genesis.header.prev_hash, "0".repeat(64));
        assert_eq!(genesis.transactions.len(), 1);
        assert_eq!(genesis.transactions[0].u, "genesis");
        assert_eq!(genesis.transactions[0].v, "genesis");
    }

    /// Scenario 8: mine on an empty fresh chain is a no-op, chain length
    /// stays 1.
    #[test]
    fn scenario_8_mine_on_empty_buffer_is_a_no_op() {
        let ledger = Ledger::new();
        assert!(ledger.mine().is_err());
        assert_eq!(ledger.chain().chain.len(), 1);
    }

    /// Supplemental: mixed cleartext + blind attribute issuance in one
    /// request (`test_issuer.py::test_mixed`).
    #[test]
    fn supplemental_mixed_cleartext_and_blind_issuance() {
        let issuer = Issuer::setup(2);
        let pp = issuer.public_params().clone();

        let m2 = group::hash_to_scalar(b"25");
        let (commitment, proof) = holder::prove_attribute_knowledge(pp.h(2), m2);

        let mut attrs = BTreeMap::new();
        attrs.insert("m1".to_string(), AttributeSlot::Value("alice".to_string()));
        attrs.insert("m2".to_string(), AttributeSlot::Blind { commitment, proof });

        assert!(issuer.issue(&attrs).is_ok());
    }

    /// Supplemental: multi-block SPV queries across non-adjacent heights,
    /// including a cross-block negative lookup
    /// (`test_blockchain.py::test_multiple_blocks`).
    #[test]
    fn supplemental_spv_across_non_adjacent_heights() {
        let ledger = Ledger::new();
        ledger.submit("A".into(), "B".into());
        ledger.mine().unwrap();
        ledger.submit("C".into(), "D".into());
        ledger.mine().unwrap();
        ledger.submit("E".into(), "F".into());
        ledger.mine().unwrap();

        assert!(ledger.spv(1, "A", "B").is_some());
        assert!(ledger.spv(3, "E", "F").is_some());
        assert!(ledger.spv(1, "C", "D").is_none());
        assert!(ledger.spv(3, "A", "B").is_none());
    }
}
