//! C1: OracleAttestation.
//!
//! Verifies an ECDSA signature (secp256k1, via `k256`) binding a trusted
//! public key to a coordinate, and emits the public-key and coordinate
//! commitments. This crate's verification runs outside any constraint
//! system; it documents the exact seam where an in-circuit ECDSA gadget
//! would be substituted.

use ark_serialize::CanonicalSerialize;
use k256::ecdsa::signature::Verifier;
use k256::ecdsa::{Signature, VerifyingKey};

use crate::backend::CircuitProof;
use crate::commitment;
use crate::coordinate::NoncedCoordinate;
use crate::error::Error;
use crate::F;

/// Public output of oracle attestation: commitments to the attesting public
/// key and the attested coordinate.
#[derive(Debug, Clone, CanonicalSerialize)]
pub struct OracleAttestationOutput {
    /// `H(pk)`.
    pub public_key_commitment: F,
    /// `H(H(coord) ‖ nonce)`.
    pub coordinate_commitment: F,
}

/// Canonical coordinate encoding signed by the oracle: latitude, then
/// longitude, then factor, each in a fixed field order.
fn canonical_encoding(coord: &NoncedCoordinate) -> Vec<u8> {
    let mut buf = Vec::with_capacity(17);
    buf.extend_from_slice(&coord.coord.latitude.raw().to_be_bytes());
    buf.extend_from_slice(&coord.coord.longitude.raw().to_be_bytes());
    buf.push(coord.coord.factor());
    buf
}

/// Verifies `signature` over the canonical encoding of `coord` against
/// `public_key_sec1`, and emits an attestation proof.
pub fn attest(
    public_key_sec1: &[u8],
    signature_bytes: &[u8],
    coord: &NoncedCoordinate,
) -> Result<CircuitProof<OracleAttestationOutput>, Error> {
    let verifying_key = VerifyingKey::from_sec1_bytes(public_key_sec1)
        .map_err(|_| Error::SignatureInvalid)?;
    let signature = Signature::from_slice(signature_bytes).map_err(|_| Error::SignatureInvalid)?;

    let message = canonical_encoding(coord);
    verifying_key
        .verify(&message, &signature)
        .map_err(|_| Error::SignatureInvalid)?;

    tracing::debug!("oracle signature verified");

    let inner = commitment::hash_coordinate_fields(
        &crate::fixed_point::i64_to_field(coord.coord.latitude.raw()),
        &crate::fixed_point::i64_to_field(coord.coord.longitude.raw()),
        coord.coord.factor(),
    );
    let coordinate_commitment = commitment::coordinate_commitment(&inner, &coord.nonce);
    let public_key_commitment = commitment::public_key_commitment(public_key_sec1);

    CircuitProof::prove(OracleAttestationOutput {
        public_key_commitment,
        coordinate_commitment,
    })
}
