//! Crate-wide error surface.
//!
//! Every precondition violation named in the design (invalid coordinate
//! domains, missing authentication, malformed combine requests, ...) maps to
//! one named variant here. Nothing in this crate panics on a malformed but
//! well-typed input; a `panic!`/`unwrap()` in non-test code indicates a bug,
//! not an expected failure mode.
//!
//! This mirrors the teacher crate's practice of centralizing a shared error
//! enum at the crate root (`myzkp::StreamError`) while individual modules may
//! still define narrower `thiserror` enums for internal plumbing and
//! `#[from]`-convert into this one at the module boundary.

use thiserror::Error;

/// Result alias used throughout the crate's public API.
pub type Result<T> = std::result::Result<T, Error>;

/// Named, recoverable error kinds surfaced by circuits and the proof-session
/// driver.
#[derive(Debug, Error)]
pub enum Error {
    /// Latitude, longitude, or factor out of the domain `Coordinate` requires.
    #[error("invalid coordinate domain: {0}")]
    InvalidCoordinateDomain(String),

    /// The query point and a polygon's vertices disagree on fixed-point factor.
    #[error("factor mismatch: point uses 10^-{point_factor}, polygon vertex uses 10^-{vertex_factor}")]
    FactorMismatch {
        /// Factor carried by the query coordinate.
        point_factor: u8,
        /// Factor carried by the offending polygon vertex.
        vertex_factor: u8,
    },

    /// A triangle's three vertices are collinear (zero signed area).
    #[error("degenerate triangle: vertices are collinear")]
    DegenerateTriangle,

    /// An operation that requires a prior oracle attestation was called
    /// without one.
    #[error("operation requires prior oracle authentication")]
    Unauthenticated,

    /// A rollup was requested with an empty inside or outside proof list.
    #[error("rollup requires at least one proof on each of the inside/outside sides (inside={inside_len}, outside={outside_len})")]
    MissingProofSet {
        /// Number of recorded inside proofs.
        inside_len: usize,
        /// Number of recorded outside proofs.
        outside_len: usize,
    },

    /// A fold/combine was requested with fewer than two proofs.
    #[error("combine requires at least two proofs, got {0}")]
    InsufficientProofs(usize),

    /// Two proofs presented to a combiner share a polygon commitment.
    #[error("duplicate polygon: both proofs bind the same polygon commitment")]
    DuplicatePolygon,

    /// `AND` was given two proofs whose `isInside` bits differ.
    #[error("polarity mismatch: AND requires both proofs to agree on isInside")]
    PolarityMismatch,

    /// A combiner was given proofs over different coordinate commitments.
    #[error("coordinate mismatch: combiners require identical coordinateCommitment")]
    CoordinateMismatch,

    /// Oracle signature failed to verify against the claimed public key.
    #[error("oracle signature invalid")]
    SignatureInvalid,

    /// The backend (real or placeholder) refused to produce or accept a proof.
    #[error("prover failed: {0}")]
    ProverFailure(String),
}
