//! Pairing group abstraction (`GroupCtx`).
//!
//! This module is the single place in the crate that knows which concrete
//! pairing-friendly curve is in use. Everything above it (Issuer, Holder,
//! Verifier, the wire codec) only ever talks in terms of the type aliases
//! and free functions exported here, so swapping the curve later is a
//! one-module change.
//!
//! The curve is BLS12-381, a Type-III pairing (`G1` and `G2` are distinct
//! with no efficient homomorphism between them), instantiated through the
//! `arkworks` crate family. All hashing for Fiat-Shamir transcripts and
//! Merkle leaves goes over the canonical (compressed) byte encodings
//! produced by [`CanonicalSerialize`]; implementations on both sides of a
//! wire boundary must agree on this byte-for-byte, since it is what the
//! challenge hashes are taken over.

use ark_bls12_381::{Bls12_381, Fr, G1Projective, G2Projective};
use ark_ec::pairing::{Pairing, PairingOutput};
use ark_ec::{CurveGroup, Group};
use ark_ff::{Field, PrimeField, UniformRand};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use sha2::{Digest, Sha256};

use crate::error::CryptoError;

/// Additive group G1 of the pairing.
pub type G1 = G1Projective;
/// Additive group G2 of the pairing.
pub type G2 = G2Projective;
/// Multiplicative target group GT, returned by [`pair`].
pub type GT = PairingOutput<Bls12_381>;
/// Scalar field of order `q` shared by G1, G2, and GT.
pub type Zr = Fr;

/// Evaluates the bilinear map `e : G1 x G2 -> GT`.
///
/// Non-degenerate: `pair(g1, g2) != 1` for generators `g1`, `g2`.
pub fn pair(a: G1, b: G2) -> GT {
    Bls12_381::pairing(a, b)
}

/// Samples a uniformly random scalar in `Zr`.
pub fn random_scalar() -> Zr {
    Zr::rand(&mut ark_std::rand::thread_rng())
}

/// Samples a uniformly random element of G1.
pub fn random_g1() -> G1 {
    G1::rand(&mut ark_std::rand::thread_rng())
}

/// Samples a uniformly random element of G2.
pub fn random_g2() -> G2 {
    G2::rand(&mut ark_std::rand::thread_rng())
}

/// Returns the standard generator of G1.
pub fn generator_g1() -> G1 {
    G1::generator()
}

/// Returns the standard generator of G2.
pub fn generator_g2() -> G2 {
    G2::generator()
}

/// Derives a scalar deterministically from an arbitrary byte string.
///
/// This is the `hash_to_scalar` primitive used throughout the protocol for
/// attribute encoding (`m_i = hash_to_scalar(value)`) and Fiat-Shamir
/// challenge derivation. It hashes with SHA-256 and reduces the digest
/// modulo the scalar field order, taking the digest as a little-endian
/// integer (the same `from_le_bytes_mod_order` idiom used by arkworks-based
/// Schnorr implementations).
pub fn hash_to_scalar(bytes: &[u8]) -> Zr {
    let digest = Sha256::digest(bytes);
    Zr::from_le_bytes_mod_order(&digest)
}

/// Derives a point in G1 deterministically from an arbitrary byte string.
///
/// This is a simplified (non-indifferentiable) hash-to-curve: the input is
/// hashed to a scalar and that scalar multiplies the G1 generator. It is
/// deterministic and collision-resistant up to the hash function, which is
/// sufficient for this protocol's use of `hash_to_g1` (deriving the
/// auxiliary base `hp`); it is not a general-purpose hash-to-curve suitable
/// for encoding attacker-chosen points into the group without a known
/// discrete log to the generator.
pub fn hash_to_g1(bytes: &[u8]) -> G1 {
    generator_g1() * hash_to_scalar(bytes)
}

/// Canonical, fixed-length byte encoding shared by all group/scalar types.
///
/// All Fiat-Shamir transcripts and wire payloads are built from these
/// bytes. Implementations must not substitute an uncompressed or
/// otherwise differently-shaped encoding, since the hash inputs (and
/// therefore all derived challenges) would silently diverge.
pub trait CanonicalBytes: Sized {
    fn to_canonical_bytes(&self) -> Vec<u8>;
    fn from_canonical_bytes(bytes: &[u8]) -> Result<Self, CryptoError>;
}

impl CanonicalBytes for G1 {
    fn to_canonical_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.into_affine()
            .serialize_compressed(&mut buf)
            .expect("G1 serialization to a Vec<u8> cannot fail");
        buf
    }

    fn from_canonical_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        ark_bls12_381::G1Affine::deserialize_compressed(bytes)
            .map(Into::into)
            .map_err(|_| CryptoError::DeserializationFailed("G1"))
    }
}

impl CanonicalBytes for G2 {
    fn to_canonical_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.into_affine()
            .serialize_compressed(&mut buf)
            .expect("G2 serialization to a Vec<u8> cannot fail");
        buf
    }

    fn from_canonical_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        ark_bls12_381::G2Affine::deserialize_compressed(bytes)
            .map(Into::into)
            .map_err(|_| CryptoError::DeserializationFailed("G2"))
    }
}

impl CanonicalBytes for Zr {
    fn to_canonical_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.serialize_compressed(&mut buf)
            .expect("Zr serialization to a Vec<u8> cannot fail");
        buf
    }

    fn from_canonical_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        Zr::deserialize_compressed(bytes).map_err(|_| CryptoError::DeserializationFailed("Zr"))
    }
}

/// Returns the multiplicative inverse of `x` in `Zr`, or `None` if `x` is
/// zero (the negligible-probability event the Issuer must reject on).
pub fn invert(x: Zr) -> Option<Zr> {
    x.inverse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_to_scalar_is_deterministic() {
        let a = hash_to_scalar(b"alice");
        let b = hash_to_scalar(b"alice");
        let c = hash_to_scalar(b"bob");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn canonical_bytes_roundtrip_g1() {
        let p = random_g1();
        let bytes = p.to_canonical_bytes();
        let q = G1::from_canonical_bytes(&bytes).expect("roundtrip decode");
        assert_eq!(p, q);
    }

    #[test]
    fn canonical_bytes_roundtrip_g2() {
        let p = random_g2();
        let bytes = p.to_canonical_bytes();
        let q = G2::from_canonical_bytes(&bytes).expect("roundtrip decode");
        assert_eq!(p, q);
    }

    #[test]
    fn canonical_bytes_roundtrip_scalar() {
        let s = random_scalar();
        let bytes = s.to_canonical_bytes();
        let t = Zr::from_canonical_bytes(&bytes).expect("roundtrip decode");
        assert_eq!(s, t);
    }

    #[test]
    fn pairing_is_non_degenerate() {
        use ark_ff::Zero;

        let g1 = generator_g1();
        let g2 = generator_g2();
        let identity = pair(G1::zero(), g2);
        assert_ne!(pair(g1, g2), identity);
    }

    #[test]
    fn invert_rejects_zero() {
        assert!(invert(Zr::from(0u64)).is_none());
        assert!(invert(Zr::from(5u64)).is_some());
    }
}
