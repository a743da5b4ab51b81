//! End-to-end scenarios over literal coordinates, factor = 7 throughout,
//! coordinates stored as `lat·10⁷, lon·10⁷`.

use k256::ecdsa::{signature::Signer, Signature, SigningKey, VerifyingKey};
use rand_core::OsRng;
use sha3::{Digest, Sha3_512};

use zklocus::circuits::point_in_polygon;
use zklocus::circuits::{oracle, provider, reveal};
use zklocus::commitment;
use zklocus::coordinate::{Coordinate, NoncedCoordinate, Triangle};
use zklocus::fixed_point::FixedPointInt;
use zklocus::session::ProofSession;
use zklocus::F;

const FACTOR: u8 = 7;
const UNIT: i64 = 10_000_000; // 10^7

fn coord(lat_units: i64, lon_units: i64) -> Coordinate {
    Coordinate::new(
        FixedPointInt::new(lat_units, FACTOR).unwrap(),
        FixedPointInt::new(lon_units, FACTOR).unwrap(),
    )
    .unwrap()
}

fn scenario_triangle() -> Triangle {
    Triangle::new(coord(0, 0), coord(0, 10 * UNIT), coord(10 * UNIT, 0)).unwrap()
}

fn nonced(coord: Coordinate, nonce: u64) -> NoncedCoordinate {
    NoncedCoordinate::new(coord, F::from(nonce))
}

fn authenticate(nonced: &NoncedCoordinate) -> zklocus::backend::CircuitProof<zklocus::circuits::CoordinateProviderOutput> {
    let signing_key = SigningKey::random(&mut OsRng);
    let verifying_key = VerifyingKey::from(&signing_key);

    let mut message = Vec::new();
    message.extend_from_slice(&nonced.coord.latitude.raw().to_be_bytes());
    message.extend_from_slice(&nonced.coord.longitude.raw().to_be_bytes());
    message.push(nonced.coord.factor());
    let signature: Signature = signing_key.sign(&message);

    let oracle_proof = oracle::attest(
        verifying_key.to_encoded_point(true).as_bytes(),
        &signature.to_bytes(),
        nonced,
    )
    .unwrap();
    provider::from_oracle(&oracle_proof, nonced).unwrap()
}

#[test]
fn scenario_1_point_inside_triangle() {
    let triangle = scenario_triangle();
    let p = nonced(coord(UNIT, UNIT), 1);
    let provider_proof = authenticate(&p);

    let proof = point_in_polygon::prove(&provider_proof, &p, &triangle).unwrap();
    assert!(proof.public_output().is_inside);
}

#[test]
fn scenario_2_point_outside_triangle() {
    let triangle = scenario_triangle();
    let p = nonced(coord(10 * UNIT, 10 * UNIT), 2);
    let provider_proof = authenticate(&p);

    let proof = point_in_polygon::prove(&provider_proof, &p, &triangle).unwrap();
    assert!(!proof.public_output().is_inside);
}

#[test]
fn scenario_3_point_on_edge_is_inside() {
    let triangle = scenario_triangle();
    let p = nonced(coord(0, 5 * UNIT), 3);
    let provider_proof = authenticate(&p);

    let proof = point_in_polygon::prove(&provider_proof, &p, &triangle).unwrap();
    assert!(proof.public_output().is_inside);
}

#[test]
fn scenario_4_and_of_two_inside_proofs_folds_commitments() {
    let t1 = scenario_triangle();
    let t2 = Triangle::new(coord(-UNIT, -UNIT), coord(-UNIT, 2 * UNIT), coord(2 * UNIT, -UNIT)).unwrap();

    let p = nonced(coord(UNIT, UNIT), 4);
    let provider_proof = authenticate(&p);

    let proof1 = point_in_polygon::prove(&provider_proof, &p, &t1).unwrap();
    let proof2 = point_in_polygon::prove(&provider_proof, &p, &t2).unwrap();
    assert!(proof1.public_output().is_inside);
    assert!(proof2.public_output().is_inside);

    let combined = point_in_polygon::and(&proof1, &proof2).unwrap();
    assert!(combined.public_output().is_inside);
    assert_eq!(
        combined.public_output().polygon_commitment,
        commitment::fold(
            &proof1.public_output().polygon_commitment,
            &proof2.public_output().polygon_commitment,
        )
    );
}

#[test]
fn scenario_5_oracle_attestation_then_in_polygon() {
    let triangle = scenario_triangle();
    let p = nonced(coord(UNIT, UNIT), 5);
    let provider_proof = authenticate(&p);
    assert!(provider_proof.verify().is_ok());

    let proof = point_in_polygon::prove(&provider_proof, &p, &triangle).unwrap();
    assert!(proof.public_output().is_inside);
}

#[test]
fn scenario_6_metadata_binding_matches_expected_digest() {
    let p = nonced(coord(UNIT, UNIT), 6);
    let provider_proof = authenticate(&p);

    let proof = reveal::attach_metadata(&provider_proof, b"hello").unwrap();

    let mut hasher = Sha3_512::new();
    hasher.update(b"hello");
    let digest: [u8; 64] = hasher.finalize().into();
    let expected = commitment::metadata_commitment(&digest);

    assert_eq!(proof.public_output().metadata_commitment, expected);
}

#[tokio::test]
async fn session_driver_end_to_end() {
    let mut session = ProofSession::new();

    let signing_key = SigningKey::random(&mut OsRng);
    let verifying_key = VerifyingKey::from(&signing_key);
    let p = nonced(coord(UNIT, UNIT), 42);

    let mut message = Vec::new();
    message.extend_from_slice(&p.coord.latitude.raw().to_be_bytes());
    message.extend_from_slice(&p.coord.longitude.raw().to_be_bytes());
    message.push(p.coord.factor());
    let signature: Signature = signing_key.sign(&message);

    session
        .authenticate_from_oracle(
            verifying_key.to_encoded_point(true).as_bytes().to_vec(),
            signature.to_bytes().to_vec(),
            p,
        )
        .await
        .unwrap();

    let inside = scenario_triangle();
    let outside = Triangle::new(
        coord(50 * UNIT / 10, 50 * UNIT / 10),
        coord(50 * UNIT / 10, 60 * UNIT / 10),
        coord(60 * UNIT / 10, 50 * UNIT / 10),
    )
    .unwrap();

    session.in_polygon(inside).await.unwrap();
    session.in_polygon(outside).await.unwrap();

    let rollup = session.combine_point_in_polygon_proofs().await.unwrap();
    assert_ne!(rollup.public_output().inside_polygon_commitment, F::from(0u64));
    assert_ne!(rollup.public_output().outside_polygon_commitment, F::from(0u64));

    let revealed = session.exact_geo_point().await.unwrap();
    assert_eq!(
        revealed.public_output().coordinate_commitment,
        rollup.public_output().coordinate_commitment
    );
}
