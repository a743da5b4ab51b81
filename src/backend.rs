//! Backend seam: the boundary where a real constraint-system prover and
//! verifier would be substituted for this crate's CPU-side placeholders.
//!
//! This crate implements the predicate logic and the recursive proof
//! algebra, not the underlying SNARK proof system. [`CircuitParams`] stands
//! in for compiled proving/verification keys, exactly the way the external
//! circuit backend's proving key would be a process-wide immutable
//! singleton. [`CircuitProof`] pairs a typed public output with an opaque
//! proof blob and exposes `prove`/`verify` so every circuit in this crate
//! has a concrete prove/verify pair to call, without this crate
//! reimplementing a SNARK.

use std::sync::OnceLock;

use ark_serialize::CanonicalSerialize;

use crate::error::Error;

/// The one runtime knob this system's circuits need: the fixed-point
/// decimal factor ceiling and a domain-separation label mixed into every
/// placeholder proof, analogous to how a real proving key is parameterized
/// by circuit shape.
#[derive(Debug, Clone)]
pub struct CircuitParams {
    /// Maximum accepted fixed-point decimal factor.
    pub max_factor: u8,
    /// Domain-separation label folded into every placeholder proof, so
    /// proofs produced under distinct deployments (e.g. testnet vs mainnet
    /// parameter sets) are never cross-acceptable.
    pub domain_label: &'static str,
}

impl Default for CircuitParams {
    fn default() -> Self {
        Self {
            max_factor: crate::fixed_point::MAX_FACTOR,
            domain_label: "zklocus/v1",
        }
    }
}

static CIRCUIT_PARAMS: OnceLock<CircuitParams> = OnceLock::new();

/// Returns the process-wide circuit parameters, initializing them to
/// [`CircuitParams::default`] on first access. Mirrors the teacher's
/// once-initialized SRS accessor.
pub fn circuit_params() -> &'static CircuitParams {
    CIRCUIT_PARAMS.get_or_init(CircuitParams::default)
}

/// Initializes the process-wide circuit parameters explicitly. Returns an
/// error if parameters were already initialized; the parameter material
/// must not change after first use.
pub fn init_circuit_params(params: CircuitParams) -> Result<(), Error> {
    CIRCUIT_PARAMS
        .set(params)
        .map_err(|_| Error::ProverFailure("circuit parameters already initialized".into()))
}

/// A proof over a typed public output `T`: the value every verifier checks
/// the proof against, plus an opaque proof blob.
///
/// `prove`/`verify` run a CPU-side placeholder: a BLAKE3 domain-separated
/// commitment over the serialized public output, playing the role the real
/// recursive verifier's accept/reject decision would play. This gives every
/// circuit a concrete, testable prove/verify pair without this crate
/// reimplementing a SNARK.
#[derive(Debug, Clone)]
pub struct CircuitProof<T> {
    output: T,
    proof_bytes: Vec<u8>,
}

impl<T: CanonicalSerialize + Clone> CircuitProof<T> {
    /// Produces a placeholder proof over `output`.
    pub fn prove(output: T) -> Result<Self, Error> {
        let proof_bytes = placeholder_proof_bytes(&output)?;
        Ok(Self { output, proof_bytes })
    }

    /// Re-derives the placeholder proof from `output` and checks it matches
    /// the stored blob.
    pub fn verify(&self) -> Result<(), Error> {
        let expected = placeholder_proof_bytes(&self.output)?;
        if expected != self.proof_bytes {
            return Err(Error::ProverFailure("placeholder proof did not verify".into()));
        }
        Ok(())
    }

    /// The proof's public output.
    pub fn public_output(&self) -> &T {
        &self.output
    }

    /// The opaque proof bytes. This crate defines no wire format for
    /// transmitting these between processes.
    pub fn proof_bytes(&self) -> &[u8] {
        &self.proof_bytes
    }

    /// Hex-encoded proof bytes, for logging and debug display only.
    pub fn proof_bytes_hex(&self) -> String {
        hex::encode(&self.proof_bytes)
    }
}

fn placeholder_proof_bytes<T: CanonicalSerialize>(output: &T) -> Result<Vec<u8>, Error> {
    let mut serialized = Vec::new();
    output
        .serialize_compressed(&mut serialized)
        .map_err(|e| Error::ProverFailure(format!("failed to serialize public output: {e}")))?;

    let mut hasher = blake3::Hasher::new();
    hasher.update(circuit_params().domain_label.as_bytes());
    hasher.update(&serialized);
    Ok(hasher.finalize().as_bytes().to_vec())
}
