//! The five circuits (C1-C5) that compose, leaves first, into the
//! proof-composition DAG: oracle attestation, coordinate provisioning, the
//! point-in-polygon predicate and its AND/OR combinators, inside/outside
//! rollup, and exact reveal / metadata binding.

/// C1: oracle attestation — ECDSA verification binding a trusted public key
/// to a coordinate.
pub mod oracle;
/// C2: coordinate provider — normalizes authentication-source proofs into
/// the canonical form downstream circuits consume.
pub mod provider;
/// C3: point-in-polygon predicate and its recursive AND/OR combinators.
pub mod point_in_polygon;
/// C4: inside/outside rollup accumulator.
pub mod rollup;
/// C5: exact coordinate reveal and metadata binding.
pub mod reveal;

pub use oracle::OracleAttestationOutput;
pub use point_in_polygon::PointInPolygonOutput;
pub use provider::CoordinateProviderOutput;
pub use reveal::{ExactGeoPointOutput, MetadataBoundOutput};
pub use rollup::InOrOutAccumulator;
