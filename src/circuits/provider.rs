//! C2: CoordinateProvider.
//!
//! Normalizes a coordinate from one of several source proofs into the
//! canonical provider proof all downstream circuits accept. Only the oracle
//! source exists today; `source_tag` leaves room for future sources without
//! changing the shape downstream circuits consume.


use ark_serialize::CanonicalSerialize;

use crate::backend::CircuitProof;
use crate::coordinate::NoncedCoordinate;
use crate::error::Error;
use crate::F;

use super::oracle::OracleAttestationOutput;

/// Tag identifying which authentication source produced a provider proof.
/// Currently only [`SOURCE_ORACLE`] exists.
pub const SOURCE_ORACLE: u8 = 0;

/// Public output of the coordinate provider: the coordinate commitment, the
/// coordinate itself in exact field-encoded form (acceptable since provider
/// proofs are only composed inside other circuits, never published alone),
/// and the source tag.
#[derive(Debug, Clone, CanonicalSerialize)]
pub struct CoordinateProviderOutput {
    /// `H(H(coord) ‖ nonce)`, carried through unchanged from the source proof.
    pub coordinate_commitment: F,
    /// Latitude, reduced into the scalar field.
    pub lat_field: F,
    /// Longitude, reduced into the scalar field.
    pub lon_field: F,
    /// Shared decimal factor of latitude and longitude.
    pub factor: u8,
    /// Which authentication source produced this proof (see [`SOURCE_ORACLE`]).
    pub source_tag: u8,
}

/// Wraps an oracle attestation proof into the canonical provider proof.
pub fn from_oracle(
    oracle_proof: &CircuitProof<OracleAttestationOutput>,
    coord: &NoncedCoordinate,
) -> Result<CircuitProof<CoordinateProviderOutput>, Error> {
    oracle_proof.verify()?;

    if oracle_proof.public_output().coordinate_commitment
        != crate::commitment::coordinate_commitment(
            &crate::commitment::hash_coordinate_fields(
                &crate::fixed_point::i64_to_field(coord.coord.latitude.raw()),
                &crate::fixed_point::i64_to_field(coord.coord.longitude.raw()),
                coord.coord.factor(),
            ),
            &coord.nonce,
        )
    {
        return Err(Error::CoordinateMismatch);
    }

    CircuitProof::prove(CoordinateProviderOutput {
        coordinate_commitment: oracle_proof.public_output().coordinate_commitment,
        lat_field: crate::fixed_point::i64_to_field(coord.coord.latitude.raw()),
        lon_field: crate::fixed_point::i64_to_field(coord.coord.longitude.raw()),
        factor: coord.coord.factor(),
        source_tag: SOURCE_ORACLE,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuits::oracle;
    use crate::coordinate::Coordinate;
    use crate::fixed_point::FixedPointInt;
    use k256::ecdsa::{signature::Signer, Signature, SigningKey, VerifyingKey};
    use rand_core::OsRng;

    #[test]
    fn wraps_valid_oracle_proof() {
        let signing_key = SigningKey::random(&mut OsRng);
        let verifying_key = VerifyingKey::from(&signing_key);

        let coord = Coordinate::new(
            FixedPointInt::new(10_000_000, 7).unwrap(),
            FixedPointInt::new(20_000_000, 7).unwrap(),
        )
        .unwrap();
        let nonced = NoncedCoordinate::new(coord, F::from(7u64));

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

        let provider_proof = from_oracle(&oracle_proof, &nonced).unwrap();
        assert!(provider_proof.verify().is_ok());
        assert_eq!(provider_proof.public_output().source_tag, SOURCE_ORACLE);
    }
}
