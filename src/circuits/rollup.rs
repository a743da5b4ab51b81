//! C4: InOrOutRollup.
//!
//! Lifts a point-in-polygon proof into a two-sided accumulator and combines
//! accumulators while preserving the invariant that a given polygon
//! contributes to exactly one side.


use ark_serialize::CanonicalSerialize;

use crate::backend::CircuitProof;
use crate::commitment;
use crate::error::Error;
use crate::F;

use super::point_in_polygon::PointInPolygonOutput;

/// Public output of a rollup proof: the inside-side and outside-side folded
/// polygon commitments (zero when that side is empty), plus the shared
/// coordinate commitment.
#[derive(Debug, Clone, CanonicalSerialize)]
pub struct InOrOutAccumulator {
    /// Folded commitment over polygons the coordinate is inside, or zero.
    pub inside_polygon_commitment: F,
    /// Folded commitment over polygons the coordinate is outside, or zero.
    pub outside_polygon_commitment: F,
    /// Shared coordinate commitment across every folded proof.
    pub coordinate_commitment: F,
}

fn zero() -> F {
    F::from(0u64)
}

/// Lifts a single point-in-polygon proof into a one-sided accumulator.
pub fn lift(proof: &CircuitProof<PointInPolygonOutput>) -> Result<CircuitProof<InOrOutAccumulator>, Error> {
    proof.verify()?;
    let output = proof.public_output();
    let (inside_polygon_commitment, outside_polygon_commitment) = if output.is_inside {
        (output.polygon_commitment, zero())
    } else {
        (zero(), output.polygon_commitment)
    };
    CircuitProof::prove(InOrOutAccumulator {
        inside_polygon_commitment,
        outside_polygon_commitment,
        coordinate_commitment: output.coordinate_commitment,
    })
}

/// Folds a single side's two commitments per the rollup rule: zero if both
/// are zero, the nonzero one if exactly one is zero, and a Poseidon fold if
/// both sides are populated.
fn combine_side(a: &F, b: &F) -> F {
    let a_is_zero = *a == zero();
    let b_is_zero = *b == zero();
    if a_is_zero && b_is_zero {
        zero()
    } else if a_is_zero {
        *b
    } else if b_is_zero {
        *a
    } else {
        commitment::fold(a, b)
    }
}

/// Combines two accumulators over the same coordinate. Rejects a no-op
/// combination where both sides are already identical.
pub fn combine(
    a1: &CircuitProof<InOrOutAccumulator>,
    a2: &CircuitProof<InOrOutAccumulator>,
) -> Result<CircuitProof<InOrOutAccumulator>, Error> {
    a1.verify()?;
    a2.verify()?;
    let (o1, o2) = (a1.public_output(), a2.public_output());
    if o1.coordinate_commitment != o2.coordinate_commitment {
        return Err(Error::CoordinateMismatch);
    }
    if o1.inside_polygon_commitment == o2.inside_polygon_commitment
        && o1.outside_polygon_commitment == o2.outside_polygon_commitment
    {
        return Err(Error::DuplicatePolygon);
    }

    let inside_polygon_commitment = combine_side(&o1.inside_polygon_commitment, &o2.inside_polygon_commitment);
    let outside_polygon_commitment = combine_side(&o1.outside_polygon_commitment, &o2.outside_polygon_commitment);

    tracing::debug!("rollup accumulators combined");

    CircuitProof::prove(InOrOutAccumulator {
        inside_polygon_commitment,
        outside_polygon_commitment,
        coordinate_commitment: o1.coordinate_commitment,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accumulator(inside: F, outside: F, coord: F) -> CircuitProof<InOrOutAccumulator> {
        CircuitProof::prove(InOrOutAccumulator {
            inside_polygon_commitment: inside,
            outside_polygon_commitment: outside,
            coordinate_commitment: coord,
        })
        .unwrap()
    }

    #[test]
    fn combining_two_nonzero_inside_sides_folds_them() {
        let coord = F::from(1u64);
        let a = accumulator(F::from(10u64), zero(), coord);
        let b = accumulator(F::from(20u64), zero(), coord);
        let combined = combine(&a, &b).unwrap();
        assert_eq!(
            combined.public_output().inside_polygon_commitment,
            commitment::fold(&F::from(10u64), &F::from(20u64))
        );
        assert_eq!(combined.public_output().outside_polygon_commitment, zero());
    }

    #[test]
    fn combining_inside_with_empty_outside_keeps_the_nonzero_side() {
        let coord = F::from(1u64);
        let a = accumulator(F::from(10u64), zero(), coord);
        let b = accumulator(zero(), F::from(30u64), coord);
        let combined = combine(&a, &b).unwrap();
        assert_eq!(combined.public_output().inside_polygon_commitment, F::from(10u64));
        assert_eq!(combined.public_output().outside_polygon_commitment, F::from(30u64));
    }

    #[test]
    fn rejects_combining_different_coordinates() {
        let a = accumulator(F::from(1u64), zero(), F::from(1u64));
        let b = accumulator(F::from(2u64), zero(), F::from(2u64));
        assert!(matches!(combine(&a, &b), Err(Error::CoordinateMismatch)));
    }

    #[test]
    fn rejects_no_op_combination() {
        let a = accumulator(F::from(1u64), zero(), F::from(1u64));
        let b = accumulator(F::from(1u64), zero(), F::from(1u64));
        assert!(matches!(combine(&a, &b), Err(Error::DuplicatePolygon)));
    }
}
