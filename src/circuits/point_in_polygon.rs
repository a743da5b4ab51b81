//! C3: PointInPolygon, the core predicate, plus its recursive AND/OR
//! combinators over proofs sharing a coordinate commitment.


use ark_serialize::CanonicalSerialize;

use crate::backend::CircuitProof;
use crate::commitment;
use crate::coordinate::{NoncedCoordinate, Triangle};
use crate::error::Error;
use crate::geometry;
use crate::F;

use super::provider::CoordinateProviderOutput;

/// Public output of a point-in-polygon proof: the polygon and coordinate
/// commitments and the inside/outside bit.
#[derive(Debug, Clone, CanonicalSerialize)]
pub struct PointInPolygonOutput {
    /// `H(H(v1), H(v2), H(v3))`.
    pub polygon_commitment: F,
    /// `H(H(coord) ‖ nonce)`, carried from the provider proof.
    pub coordinate_commitment: F,
    /// Whether the coordinate classifies as inside (or on the boundary of) the triangle.
    pub is_inside: bool,
}

fn vertex_hash(coord: &crate::coordinate::Coordinate) -> F {
    commitment::hash_vertex(
        &crate::fixed_point::i64_to_field(coord.latitude.raw()),
        &crate::fixed_point::i64_to_field(coord.longitude.raw()),
        coord.factor(),
    )
}

fn triangle_commitment(triangle: &Triangle) -> F {
    commitment::polygon_commitment(
        &vertex_hash(&triangle.v1),
        &vertex_hash(&triangle.v2),
        &vertex_hash(&triangle.v3),
    )
}

/// Proves that `nonced` lies inside (or on the boundary of) `triangle`,
/// given a provider proof attesting `nonced`'s authenticity.
pub fn prove(
    provider: &CircuitProof<CoordinateProviderOutput>,
    nonced: &NoncedCoordinate,
    triangle: &Triangle,
) -> Result<CircuitProof<PointInPolygonOutput>, Error> {
    provider.verify()?;

    let expected_commitment = commitment::coordinate_commitment(
        &commitment::hash_coordinate_fields(
            &crate::fixed_point::i64_to_field(nonced.coord.latitude.raw()),
            &crate::fixed_point::i64_to_field(nonced.coord.longitude.raw()),
            nonced.coord.factor(),
        ),
        &nonced.nonce,
    );
    if expected_commitment != provider.public_output().coordinate_commitment {
        return Err(Error::CoordinateMismatch);
    }

    triangle.check_factor_matches(nonced.coord.factor())?;

    let is_inside = geometry::point_in_triangle(&nonced.coord, triangle);
    let polygon_commitment = triangle_commitment(triangle);

    tracing::debug!(is_inside, "point-in-polygon classified");

    CircuitProof::prove(PointInPolygonOutput {
        polygon_commitment,
        coordinate_commitment: expected_commitment,
        is_inside,
    })
}

fn check_combinable(
    p1: &CircuitProof<PointInPolygonOutput>,
    p2: &CircuitProof<PointInPolygonOutput>,
) -> Result<(), Error> {
    p1.verify()?;
    p2.verify()?;
    if p1.public_output().coordinate_commitment != p2.public_output().coordinate_commitment {
        return Err(Error::CoordinateMismatch);
    }
    if p1.public_output().polygon_commitment == p2.public_output().polygon_commitment {
        return Err(Error::DuplicatePolygon);
    }
    Ok(())
}

/// Recursive AND: requires both proofs to agree on `is_inside`, and folds
/// their polygon commitments. Rejects proofs over the same polygon or
/// different coordinates.
pub fn and(
    p1: &CircuitProof<PointInPolygonOutput>,
    p2: &CircuitProof<PointInPolygonOutput>,
) -> Result<CircuitProof<PointInPolygonOutput>, Error> {
    check_combinable(p1, p2)?;
    let (o1, o2) = (p1.public_output(), p2.public_output());
    if o1.is_inside != o2.is_inside {
        return Err(Error::PolarityMismatch);
    }
    let polygon_commitment = commitment::fold(&o1.polygon_commitment, &o2.polygon_commitment);
    CircuitProof::prove(PointInPolygonOutput {
        polygon_commitment,
        coordinate_commitment: o1.coordinate_commitment,
        is_inside: o1.is_inside,
    })
}

/// Recursive OR: folds polygon commitments, outputs the logical OR of the
/// two `is_inside` bits.
pub fn or(
    p1: &CircuitProof<PointInPolygonOutput>,
    p2: &CircuitProof<PointInPolygonOutput>,
) -> Result<CircuitProof<PointInPolygonOutput>, Error> {
    check_combinable(p1, p2)?;
    let (o1, o2) = (p1.public_output(), p2.public_output());
    let polygon_commitment = commitment::fold(&o1.polygon_commitment, &o2.polygon_commitment);
    CircuitProof::prove(PointInPolygonOutput {
        polygon_commitment,
        coordinate_commitment: o1.coordinate_commitment,
        is_inside: o1.is_inside || o2.is_inside,
    })
}

/// Folds at least two proofs with [`and`], left-to-right over `proofs`'
/// order. The driver uses this for the rollup combiner's per-side fold.
pub fn fold_and(
    proofs: &[CircuitProof<PointInPolygonOutput>],
) -> Result<CircuitProof<PointInPolygonOutput>, Error> {
    let mut iter = proofs.iter();
    let first = iter
        .next()
        .ok_or(Error::InsufficientProofs(proofs.len()))?;
    if proofs.len() < 2 {
        return Err(Error::InsufficientProofs(proofs.len()));
    }
    let mut acc = first.clone_for_fold();
    for next in iter {
        acc = and(&acc, next)?;
    }
    Ok(acc)
}

impl CircuitProof<PointInPolygonOutput> {
    fn clone_for_fold(&self) -> Self {
        CircuitProof::prove(self.public_output().clone())
            .expect("re-proving an already-valid output cannot fail")
    }
}
