//! C5: ExactGeoPoint + Metadata.
//!
//! Reveals a coordinate (conditional on upstream authentication), or binds
//! a metadata digest to the authenticated coordinate commitment.

use ark_serialize::CanonicalSerialize;
use sha3::{Digest, Sha3_512};

use crate::backend::CircuitProof;
use crate::commitment;
use crate::error::Error;
use crate::F;

use super::provider::CoordinateProviderOutput;

/// Public output of an exact-reveal proof: the coordinate in full, and the
/// commitment tying it to its authenticated origin.
#[derive(Debug, Clone, CanonicalSerialize)]
pub struct ExactGeoPointOutput {
    /// Commitment carried from the provider proof that authenticated this reveal.
    pub coordinate_commitment: F,
    /// Revealed latitude, field-encoded.
    pub lat_field: F,
    /// Revealed longitude, field-encoded.
    pub lon_field: F,
    /// Shared decimal factor.
    pub factor: u8,
}

/// Public output of a metadata-binding proof: the coordinate commitment and
/// a commitment to arbitrary caller-supplied metadata.
#[derive(Debug, Clone, CanonicalSerialize)]
pub struct MetadataBoundOutput {
    /// Commitment carried from the provider proof.
    pub coordinate_commitment: F,
    /// `Poseidon(field(sha3_hi), field(sha3_lo))`.
    pub metadata_commitment: F,
}

/// Reveals the coordinate authenticated by `provider`. The recursive
/// verification chain (`provider.verify()`) guarantees the revealed
/// coordinate is the one that was originally attested.
pub fn exact_reveal(
    provider: &CircuitProof<CoordinateProviderOutput>,
) -> Result<CircuitProof<ExactGeoPointOutput>, Error> {
    provider.verify()?;
    let output = provider.public_output();
    CircuitProof::prove(ExactGeoPointOutput {
        coordinate_commitment: output.coordinate_commitment,
        lat_field: output.lat_field,
        lon_field: output.lon_field,
        factor: output.factor,
    })
}

/// Hashes `metadata` with SHA3-512 outside the circuit, then binds the
/// resulting digest (as a Poseidon commitment) to the authenticated
/// coordinate. The SHA3 hash itself is non-verifiable; only the commitment
/// to its digest is.
pub fn attach_metadata(
    provider: &CircuitProof<CoordinateProviderOutput>,
    metadata: &[u8],
) -> Result<CircuitProof<MetadataBoundOutput>, Error> {
    provider.verify()?;

    let mut hasher = Sha3_512::new();
    hasher.update(metadata);
    let digest: [u8; 64] = hasher.finalize().into();
    let metadata_commitment = commitment::metadata_commitment(&digest);

    CircuitProof::prove(MetadataBoundOutput {
        coordinate_commitment: provider.public_output().coordinate_commitment,
        metadata_commitment,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuits::{oracle, provider};
    use crate::coordinate::{Coordinate, NoncedCoordinate};
    use crate::fixed_point::FixedPointInt;
    use k256::ecdsa::{signature::Signer, Signature, SigningKey, VerifyingKey};
    use rand_core::OsRng;

    fn authenticated_point() -> CircuitProof<CoordinateProviderOutput> {
        let signing_key = SigningKey::random(&mut OsRng);
        let verifying_key = VerifyingKey::from(&signing_key);
        let coord = Coordinate::new(
            FixedPointInt::new(10_000_000, 7).unwrap(),
            FixedPointInt::new(20_000_000, 7).unwrap(),
        )
        .unwrap();
        let nonced = NoncedCoordinate::new(coord, F::from(3u64));

        let mut message = Vec::new();
        message.extend_from_slice(&nonced.coord.latitude.raw().to_be_bytes());
        message.extend_from_slice(&nonced.coord.longitude.raw().to_be_bytes());
        message.push(nonced.coord.factor());
        let signature: Signature = signing_key.sign(&message);

        let oracle_proof = oracle::attest(
            verifying_key.to_encoded_point(true).as_bytes(),
            &signature.to_bytes(),
            &nonced,
        )
        .unwrap();
        provider::from_oracle(&oracle_proof, &nonced).unwrap()
    }

    #[test]
    fn exact_reveal_carries_the_authenticated_coordinate() {
        let provider_proof = authenticated_point();
        let revealed = exact_reveal(&provider_proof).unwrap();
        assert_eq!(
            revealed.public_output().coordinate_commitment,
            provider_proof.public_output().coordinate_commitment
        );
        assert_eq!(revealed.public_output().lat_field, provider_proof.public_output().lat_field);
    }

    #[test]
    fn metadata_binding_matches_scenario_vector() {
        let provider_proof = authenticated_point();
        let proof = attach_metadata(&provider_proof, b"hello").unwrap();

        let mut hasher = Sha3_512::new();
        hasher.update(b"hello");
        let digest: [u8; 64] = hasher.finalize().into();
        let expected = commitment::metadata_commitment(&digest);

        assert_eq!(proof.public_output().metadata_commitment, expected);
    }
}
