//! CPU-side Poseidon placeholder and the commitments built on it.
//!
//! Poseidon is a SNARK-friendly permutation that belongs to the external
//! circuit backend (see [`crate::backend`]); this crate cannot implement the
//! real algebraic permutation without also implementing the constraint
//! system it is meant to run inside. Instead this module provides a
//! domain-separated BLAKE3 hash-to-field function standing in for it,
//! following the same technique the field-hash challenge derivation in a
//! Fiat-Shamir transcript uses (absorb labeled, length-delimited inputs into
//! an XOF, then reduce the digest into the scalar field) and the same
//! explicit-placeholder convention real-world Poseidon gadgets under
//! construction use while their circuit form is pending:
//! `// TODO: replace with an in-circuit Poseidon gadget`.
//!
//! Every function here is committed to producing the *same* output for the
//! same input today and the same input in a future real-backend swap-in is
//! *not* guaranteed to agree bit-for-bit; only the field element's role as a
//! collision-resistant commitment is guaranteed.

use ark_ff::PrimeField;

use crate::F;

/// Domain-separation labels, one per distinct commitment role. Mirrors the
/// transcript label discipline: every absorb site gets its own tag so no two
/// semantically different hashes can collide by sharing an encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Label {
    CoordinateInner,
    CoordinateOuter,
    PolygonVertex,
    PolygonRoot,
    Fold,
    PublicKey,
    MetadataRoot,
}

impl Label {
    fn tag(self) -> &'static [u8] {
        match self {
            Label::CoordinateInner => b"zklocus/coord/inner",
            Label::CoordinateOuter => b"zklocus/coord/outer",
            Label::PolygonVertex => b"zklocus/polygon/vertex",
            Label::PolygonRoot => b"zklocus/polygon/root",
            Label::Fold => b"zklocus/fold",
            Label::PublicKey => b"zklocus/pubkey",
            Label::MetadataRoot => b"zklocus/metadata/root",
        }
    }
}

/// Reduces a BLAKE3 digest over a labeled, length-delimited absorb sequence
/// into a scalar field element. Each item in `parts` is absorbed as
/// `len(item) as u64 little-endian || item`, then the label tag is absorbed
/// last so every call site's hash is bound to exactly one role.
fn hash_to_field(label: Label, parts: &[&[u8]]) -> F {
    let mut hasher = blake3::Hasher::new();
    for part in parts {
        hasher.update(&(part.len() as u64).to_le_bytes());
        hasher.update(part);
    }
    hasher.update(label.tag());

    let mut xof = hasher.finalize_xof();
    let mut wide = [0u8; 64];
    xof.fill(&mut wide);
    F::from_le_bytes_mod_order(&wide)
}

fn field_to_bytes(f: &F) -> Vec<u8> {
    use ark_serialize::CanonicalSerialize;
    let mut buf = Vec::new();
    f.serialize_compressed(&mut buf).expect("field serialization is infallible");
    buf
}

/// `Poseidon(lat, lon, factor)`: the inner coordinate hash, before nonce
/// binding.
pub fn hash_coordinate_fields(lat: &F, lon: &F, factor: u8) -> F {
    hash_to_field(
        Label::CoordinateInner,
        &[&field_to_bytes(lat), &field_to_bytes(lon), &[factor]],
    )
}

/// `H(H(coord) ‖ nonce)`: the full coordinate commitment.
pub fn coordinate_commitment(inner: &F, nonce: &F) -> F {
    hash_to_field(Label::CoordinateOuter, &[&field_to_bytes(inner), &field_to_bytes(nonce)])
}

/// `Poseidon(v1)` / `Poseidon(v2)` / `Poseidon(v3)` style per-vertex hash,
/// reusing the same inner coordinate hash (a vertex is just a coordinate).
pub fn hash_vertex(lat: &F, lon: &F, factor: u8) -> F {
    hash_to_field(
        Label::PolygonVertex,
        &[&field_to_bytes(lat), &field_to_bytes(lon), &[factor]],
    )
}

/// `Poseidon(h1, h2, h3)`: the polygon (triangle) commitment from its three
/// per-vertex hashes.
pub fn polygon_commitment(h1: &F, h2: &F, h3: &F) -> F {
    hash_to_field(
        Label::PolygonRoot,
        &[&field_to_bytes(h1), &field_to_bytes(h2), &field_to_bytes(h3)],
    )
}

/// `Poseidon(a, b)`: the generic two-to-one fold used by polygon-commitment
/// combination (C3 AND/OR) and the side-commitment folds (C4 rollup).
///
/// Not commutative: `fold(a, b) != fold(b, a)` in general, matching the
/// non-commutative nature of the real Poseidon permutation this stands in
/// for. Callers that need a canonical order must fix one themselves (the
/// proof-session driver folds left-to-right over insertion order).
pub fn fold(a: &F, b: &F) -> F {
    hash_to_field(Label::Fold, &[&field_to_bytes(a), &field_to_bytes(b)])
}

/// `H(pk)`: the public-key commitment emitted by oracle attestation.
pub fn public_key_commitment(pk_bytes: &[u8]) -> F {
    hash_to_field(Label::PublicKey, &[pk_bytes])
}

/// Splits a 64-byte SHA3-512 digest into two 32-byte halves and reduces each
/// into a field element, then folds them via Poseidon into a single metadata
/// commitment: `Poseidon(field(digest[0..32]), field(digest[32..64]))`.
pub fn metadata_commitment(sha3_digest: &[u8; 64]) -> F {
    let hi = F::from_be_bytes_mod_order(&sha3_digest[0..32]);
    let lo = F::from_be_bytes_mod_order(&sha3_digest[32..64]);
    hash_to_field(Label::MetadataRoot, &[&field_to_bytes(&hi), &field_to_bytes(&lo)])
}
