//! Coordinate, nonced-coordinate, and triangle types, plus the preflight
//! domain validation the argument-validation circuit gates on.

use ark_ff::UniformRand;

use crate::error::Error;
use crate::fixed_point::FixedPointInt;
use crate::F;

/// Draws a fresh random field element suitable as a [`NoncedCoordinate`]
/// nonce, preventing commitment grinding across repeated calls.
pub fn random_nonce() -> F {
    F::rand(&mut rand::thread_rng())
}

/// Maximum absolute latitude magnitude, in degrees.
const MAX_LAT_DEGREES: i64 = 90;
/// Maximum absolute longitude magnitude, in degrees.
const MAX_LON_DEGREES: i64 = 180;

/// A planar coordinate: latitude and longitude sharing one decimal factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coordinate {
    /// Latitude, `|lat|/10^factor ≤ 90`.
    pub latitude: FixedPointInt,
    /// Longitude, `|lon|/10^factor ≤ 180`.
    pub longitude: FixedPointInt,
}

impl Coordinate {
    /// Builds a coordinate, checking the latitude/longitude range invariants
    /// and that both fields share a factor.
    pub fn new(latitude: FixedPointInt, longitude: FixedPointInt) -> Result<Self, Error> {
        if latitude.factor() != longitude.factor() {
            return Err(Error::FactorMismatch {
                point_factor: latitude.factor(),
                vertex_factor: longitude.factor(),
            });
        }
        let coord = Self { latitude, longitude };
        coord.validate()?;
        Ok(coord)
    }

    /// The shared decimal factor of latitude and longitude.
    pub fn factor(&self) -> u8 {
        self.latitude.factor()
    }

    /// Checks `|lat|/10^f ≤ 90` and `|lon|/10^f ≤ 180`.
    pub fn validate(&self) -> Result<(), Error> {
        let scale = 10i64.pow(self.factor() as u32);
        let lat_limit = MAX_LAT_DEGREES
            .checked_mul(scale)
            .ok_or_else(|| Error::InvalidCoordinateDomain("latitude bound overflow".into()))?;
        let lon_limit = MAX_LON_DEGREES
            .checked_mul(scale)
            .ok_or_else(|| Error::InvalidCoordinateDomain("longitude bound overflow".into()))?;

        if self.latitude.raw().abs() > lat_limit {
            return Err(Error::InvalidCoordinateDomain(format!(
                "latitude {} exceeds +-90 degrees at factor {}",
                self.latitude.raw(),
                self.factor()
            )));
        }
        if self.longitude.raw().abs() > lon_limit {
            return Err(Error::InvalidCoordinateDomain(format!(
                "longitude {} exceeds +-180 degrees at factor {}",
                self.longitude.raw(),
                self.factor()
            )));
        }
        tracing::debug!(factor = self.factor(), "coordinate domain validated");
        Ok(())
    }
}

/// A coordinate bound with a single-use nonce, preventing commitment
/// grinding. The coordinate commitment is `H(H(coord) ‖ nonce)`.
#[derive(Debug, Clone, Copy)]
pub struct NoncedCoordinate {
    /// The underlying coordinate.
    pub coord: Coordinate,
    /// A single-use field element mixed into the coordinate commitment.
    pub nonce: F,
}

impl NoncedCoordinate {
    /// Pairs a coordinate with an explicit nonce.
    pub fn new(coord: Coordinate, nonce: F) -> Self {
        Self { coord, nonce }
    }
}

/// A triangle of three coordinates, the unit polygon this crate's predicate
/// tests points against.
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    /// First vertex.
    pub v1: Coordinate,
    /// Second vertex.
    pub v2: Coordinate,
    /// Third vertex.
    pub v3: Coordinate,
}

impl Triangle {
    /// Builds a triangle, validating every vertex, that all three share a
    /// factor, and that the vertices are not collinear.
    pub fn new(v1: Coordinate, v2: Coordinate, v3: Coordinate) -> Result<Self, Error> {
        for v in [&v1, &v2, &v3] {
            v.validate()?;
        }
        let factor = v1.factor();
        for v in [&v2, &v3] {
            if v.factor() != factor {
                return Err(Error::FactorMismatch {
                    point_factor: factor,
                    vertex_factor: v.factor(),
                });
            }
        }
        let triangle = Self { v1, v2, v3 };
        triangle.validate_nondegenerate()?;
        Ok(triangle)
    }

    /// The shared decimal factor of the triangle's vertices.
    pub fn factor(&self) -> u8 {
        self.v1.factor()
    }

    /// Checks that the query point's factor matches this triangle's factor.
    pub fn check_factor_matches(&self, point_factor: u8) -> Result<(), Error> {
        if point_factor != self.factor() {
            return Err(Error::FactorMismatch {
                point_factor,
                vertex_factor: self.factor(),
            });
        }
        Ok(())
    }

    /// Twice the signed area of the triangle, as an exact `i64`: `(v2-v1) x (v3-v1)`.
    fn twice_signed_area(&self) -> i64 {
        let (x1, y1) = (self.v1.longitude.raw(), self.v1.latitude.raw());
        let (x2, y2) = (self.v2.longitude.raw(), self.v2.latitude.raw());
        let (x3, y3) = (self.v3.longitude.raw(), self.v3.latitude.raw());
        (x2 - x1) * (y3 - y1) - (x3 - x1) * (y2 - y1)
    }

    /// Rejects collinear vertices (zero signed area). See the REDESIGN FLAGS
    /// decision to reject rather than silently misclassify.
    fn validate_nondegenerate(&self) -> Result<(), Error> {
        if self.twice_signed_area() == 0 {
            tracing::warn!("rejecting degenerate triangle: zero signed area");
            return Err(Error::DegenerateTriangle);
        }
        Ok(())
    }
}
