//! Non-circuit proof-session driver.
//!
//! Tracks per-coordinate authentication and point-in-polygon proof lists,
//! and orchestrates rollup assembly. Each proof-producing method is a
//! coarse-grained long-running task with one suspension point at "await
//! SNARK prover" — modeled as [`tokio::task::spawn_blocking`] around the
//! CPU-bound placeholder prove call, keeping the blocking computation off
//! the async executor's worker threads. A dropped future never leaves a
//! half-recorded proof: driver state is only mutated after the
//! `spawn_blocking` future resolves successfully.
//!
//! A `ProofSession` is owned by a single logical caller; it is not
//! internally synchronized. Share one across tasks only behind an external
//! mutex, e.g. `tokio::sync::Mutex<ProofSession>`.

use anyhow::Context;

use crate::backend::CircuitProof;
use crate::circuits::point_in_polygon::PointInPolygonOutput;
use crate::circuits::provider::CoordinateProviderOutput;
use crate::circuits::{oracle, point_in_polygon, provider, reveal, rollup};
use crate::coordinate::{NoncedCoordinate, Triangle};
use crate::error::Error;

/// Runs a CPU-bound closure on the blocking thread pool, converting a join
/// failure into [`Error::ProverFailure`].
async fn run_blocking<F, T>(f: F) -> Result<T, Error>
where
    F: FnOnce() -> Result<T, Error> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .context("prover task panicked or was cancelled")
        .map_err(|e| Error::ProverFailure(e.to_string()))?
}

/// Builder/driver that accumulates point-in-polygon proofs for a single
/// authenticated coordinate and assembles rollups and reveals from them.
#[derive(Default)]
pub struct ProofSession {
    provider: Option<CircuitProof<CoordinateProviderOutput>>,
    authenticated_coord: Option<NoncedCoordinate>,
    inside_proofs: Vec<CircuitProof<PointInPolygonOutput>>,
    outside_proofs: Vec<CircuitProof<PointInPolygonOutput>>,
}

impl ProofSession {
    /// Creates an empty, unauthenticated session.
    pub fn new() -> Self {
        Self::default()
    }

    fn require_authenticated(&self) -> Result<(&CircuitProof<CoordinateProviderOutput>, &NoncedCoordinate), Error> {
        match (&self.provider, &self.authenticated_coord) {
            (Some(p), Some(c)) => Ok((p, c)),
            _ => Err(Error::Unauthenticated),
        }
    }

    /// Verifies an oracle signature over `coord` and records the resulting
    /// provider proof as this session's authentication state.
    pub async fn authenticate_from_oracle(
        &mut self,
        public_key_sec1: Vec<u8>,
        signature_bytes: Vec<u8>,
        coord: NoncedCoordinate,
    ) -> Result<(), Error> {
        let coord_for_task = coord;
        let provider_proof = run_blocking(move || {
            let oracle_proof = oracle::attest(&public_key_sec1, &signature_bytes, &coord_for_task)?;
            provider::from_oracle(&oracle_proof, &coord_for_task)
        })
        .await?;

        self.provider = Some(provider_proof);
        self.authenticated_coord = Some(coord);
        Ok(())
    }

    /// Produces and records a point-in-polygon proof for `triangle` against
    /// the authenticated coordinate. Requires [`Self::authenticate_from_oracle`]
    /// to have succeeded first.
    pub async fn in_polygon(&mut self, triangle: Triangle) -> Result<CircuitProof<PointInPolygonOutput>, Error> {
        let (provider_proof, coord) = self.require_authenticated()?;
        let provider_proof = provider_proof.clone();
        let coord = *coord;

        let proof = run_blocking(move || point_in_polygon::prove(&provider_proof, &coord, &triangle)).await?;

        if proof.public_output().is_inside {
            self.inside_proofs.push(proof.clone());
        } else {
            self.outside_proofs.push(proof.clone());
        }
        Ok(proof)
    }

    /// Runs [`Self::in_polygon`] over each triangle in order.
    pub async fn in_polygons(
        &mut self,
        triangles: Vec<Triangle>,
    ) -> Result<Vec<CircuitProof<PointInPolygonOutput>>, Error> {
        let mut results = Vec::with_capacity(triangles.len());
        for triangle in triangles {
            results.push(self.in_polygon(triangle).await?);
        }
        Ok(results)
    }

    /// Folds `proofs` left-to-right with C3's AND combinator. Requires at
    /// least two proofs.
    pub async fn combine_proofs(
        &self,
        proofs: Vec<CircuitProof<PointInPolygonOutput>>,
    ) -> Result<CircuitProof<PointInPolygonOutput>, Error> {
        if proofs.len() < 2 {
            return Err(Error::InsufficientProofs(proofs.len()));
        }
        run_blocking(move || point_in_polygon::fold_and(&proofs)).await
    }

    /// Emits a C5 exact-reveal proof for the authenticated coordinate.
    pub async fn exact_geo_point(&self) -> Result<CircuitProof<reveal::ExactGeoPointOutput>, Error> {
        let (provider_proof, _) = self.require_authenticated()?;
        let provider_proof = provider_proof.clone();
        run_blocking(move || reveal::exact_reveal(&provider_proof)).await
    }

    /// Emits a C5 metadata-binding proof over `metadata` for the
    /// authenticated coordinate.
    pub async fn attach_metadata(&self, metadata: Vec<u8>) -> Result<CircuitProof<reveal::MetadataBoundOutput>, Error> {
        let (provider_proof, _) = self.require_authenticated()?;
        let provider_proof = provider_proof.clone();
        run_blocking(move || reveal::attach_metadata(&provider_proof, &metadata)).await
    }

    /// Folds this session's recorded inside proofs and outside proofs each
    /// via C3 AND (left-to-right, insertion order), then combines the two
    /// rolled accumulators into a single C4 rollup proof. Requires at least
    /// one proof on each side.
    pub async fn combine_point_in_polygon_proofs(
        &self,
    ) -> Result<CircuitProof<rollup::InOrOutAccumulator>, Error> {
        if self.inside_proofs.is_empty() || self.outside_proofs.is_empty() {
            return Err(Error::MissingProofSet {
                inside_len: self.inside_proofs.len(),
                outside_len: self.outside_proofs.len(),
            });
        }

        let inside = self.inside_proofs.clone();
        let outside = self.outside_proofs.clone();

        run_blocking(move || {
            let rolled_inside = fold_single_sided(&inside)?;
            let rolled_outside = fold_single_sided(&outside)?;
            rollup::combine(&rolled_inside, &rolled_outside)
        })
        .await
    }

    /// Recorded inside-side proofs, in insertion order.
    pub fn inside_proofs(&self) -> &[CircuitProof<PointInPolygonOutput>] {
        &self.inside_proofs
    }

    /// Recorded outside-side proofs, in insertion order.
    pub fn outside_proofs(&self) -> &[CircuitProof<PointInPolygonOutput>] {
        &self.outside_proofs
    }
}

/// Lifts a list of same-polarity point-in-polygon proofs into a single
/// rolled accumulator: fold with AND if there is more than one, otherwise
/// lift the sole proof directly.
fn fold_single_sided(
    proofs: &[CircuitProof<PointInPolygonOutput>],
) -> Result<CircuitProof<rollup::InOrOutAccumulator>, Error> {
    if proofs.len() == 1 {
        return rollup::lift(&proofs[0]);
    }
    let folded = point_in_polygon::fold_and(proofs)?;
    rollup::lift(&folded)
}
