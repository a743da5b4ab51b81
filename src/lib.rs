//! Crate root: public surface, core aliases, and system-wide invariants.
//!
//! This module is the single canonical entry-point for downstream users of
//! the library. It centralizes the scalar field alias, shared error type,
//! and re-exports the main submodules that implement the proof-composition
//! engine.
//!
//! ## Invariants
//!
//! - **Field.** Unless explicitly configured otherwise, the scalar field is
//!   `ark_bn254::Fr` (`F` in this crate). This crate does not implement field
//!   arithmetic of its own; it reuses Arkworks' implementation as-is. We
//!   **forbid unsafe** throughout the crate.
//!
//! - **Fixed-point coordinates.** Latitude/longitude are carried as signed
//!   64-bit integers with an explicit decimal factor (see [`fixed_point`]),
//!   never as floating point, so that the in-circuit predicate in
//!   [`geometry`] is exact integer arithmetic.
//!
//! - **Commitment seam.** Poseidon, the in-circuit hash this system is
//!   specified against, is an external SNARK-backend primitive. [`commitment`]
//!   implements the CPU-side placeholder seam documented in [`backend`];
//!   nothing in this crate claims to implement the real algebraic
//!   permutation.
//!
//! - **Proof immutability.** Proofs produced by circuits ([`circuits`]) are
//!   never mutated in place; combinators consume proofs by shared reference
//!   and return freshly allocated proofs.
//!
//! If any invariant is violated at runtime, the failure mode is a named
//! [`error::Error`] variant, never a panic.

#![forbid(unsafe_code)]
#![deny(missing_docs, rust_2018_idioms)]

/// Crate-wide error type and result alias.
pub mod error;
/// Fixed-point decimal integers used for all coordinate arithmetic.
pub mod fixed_point;
/// Coordinate, nonced-coordinate, and triangle types with domain validation.
pub mod coordinate;
/// CPU-side Poseidon placeholder and the coordinate/polygon/metadata commitments built on it.
pub mod commitment;
/// Exact integer point-in-polygon predicate (edge-membership + ray casting).
pub mod geometry;
/// Backend seam: circuit compilation parameters and the opaque proof wrapper.
pub mod backend;
/// The five composable circuits (C1-C5).
pub mod circuits;
/// Non-circuit proof-session driver that orchestrates the circuits above.
pub mod session;

/// Scalar field used across the crate (BN254, matching the external SNARK
/// backend this crate is specified against).
pub type F = ark_bn254::Fr;

pub use error::{Error, Result};
pub use session::ProofSession;
