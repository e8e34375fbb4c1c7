//! Integration tests for mesh volume extraction
//!
//! Covers the signed tetrahedron volume on indexed and non-indexed meshes:
//! - Known volumes of boxes
//! - Independence from where the origin lies
//! - Winding reversal and empty meshes
//! - Malformed buffers

mod common;

use common::{cube_10mm, indexed_box, non_indexed_box, relative_error};
use nalgebra::Vector3;
use printquote::{Error, EstimationParams, TriangleMesh, mesh_ops};

#[test]
fn test_cube_volume() {
    let volume = mesh_ops::compute_mesh_volume(&cube_10mm()).unwrap();
    assert!(
        relative_error(volume, 1000.0) < 1e-6,
        "Volume should be 1000 mm³, got {}",
        volume
    );
}

#[test]
fn test_box_volume_indexed_and_non_indexed() {
    let size = (10.0, 20.0, 30.0);
    let indexed = indexed_box((0.0, 0.0, 0.0), size);
    let flat = non_indexed_box((0.0, 0.0, 0.0), size);

    assert!(indexed.is_indexed());
    assert!(!flat.is_indexed());
    assert_eq!(flat.vertex_count(), 36);

    let signed = mesh_ops::compute_mesh_signed_volume(&indexed).unwrap();
    assert!(
        signed > 0.0,
        "Correctly oriented mesh should have positive signed volume"
    );
    assert!((signed - 6000.0).abs() < 1e-9, "Got {}", signed);

    let flat_volume = mesh_ops::compute_mesh_volume(&flat).unwrap();
    assert!((flat_volume - 6000.0).abs() < 1e-9, "Got {}", flat_volume);
}

#[test]
fn test_translated_cube_keeps_volume() {
    let offsets = [
        Vector3::new(5.0, 5.0, 5.0),
        Vector3::new(-100.0, 250.0, -3.5),
        Vector3::new(1e4, -1e4, 1e4),
    ];
    for offset in offsets {
        let mesh = cube_10mm().translated(offset);
        let volume = mesh_ops::compute_mesh_volume(&mesh).unwrap();
        assert!(
            relative_error(volume, 1000.0) < 1e-6,
            "Offset {:?} changed the volume to {}",
            offset,
            volume
        );
    }
}

#[test]
fn test_reversed_winding_keeps_magnitude() {
    let mesh = cube_10mm().reversed();

    let signed = mesh_ops::compute_mesh_signed_volume(&mesh).unwrap();
    assert!(signed < 0.0, "Inverted mesh should be negative, got {}", signed);

    let volume = mesh_ops::compute_mesh_volume(&mesh).unwrap();
    assert!(relative_error(volume, 1000.0) < 1e-6);
}

#[test]
fn test_non_convex_mesh() {
    // Two boxes sharing no faces, 1000 + 6000 mm³
    let a = indexed_box((0.0, 0.0, 0.0), (10.0, 10.0, 10.0))
        .to_non_indexed()
        .unwrap();
    let b = non_indexed_box((20.0, 0.0, 0.0), (10.0, 20.0, 30.0));

    let mut positions = a.positions.clone();
    positions.extend_from_slice(&b.positions);
    let combined = TriangleMesh::non_indexed(positions);

    let volume = mesh_ops::compute_mesh_volume(&combined).unwrap();
    assert!((volume - 7000.0).abs() < 1e-9, "Got {}", volume);
}

#[test]
fn test_empty_mesh_has_zero_volume() {
    assert_eq!(mesh_ops::compute_mesh_volume(&TriangleMesh::new()).unwrap(), 0.0);

    let indexed_empty = TriangleMesh::indexed(vec![1.0, 2.0, 3.0], Vec::new());
    assert_eq!(mesh_ops::compute_mesh_volume(&indexed_empty).unwrap(), 0.0);
}

#[test]
fn test_malformed_meshes_are_rejected() {
    let bad_positions = TriangleMesh::non_indexed(vec![0.0; 8]);
    assert!(matches!(
        mesh_ops::compute_mesh_volume(&bad_positions),
        Err(Error::MalformedMesh(_))
    ));

    let bad_indices = TriangleMesh::indexed(vec![0.0; 9], vec![0, 1]);
    assert!(matches!(
        mesh_ops::compute_mesh_volume(&bad_indices),
        Err(Error::MalformedMesh(_))
    ));

    let dangling = TriangleMesh::indexed(vec![0.0; 9], vec![0, 1, 3]);
    let err = mesh_ops::compute_mesh_volume(&dangling).unwrap_err();
    assert!(err.to_string().contains("[E1002]"));
}

#[test]
fn test_non_finite_coordinates_are_rejected() {
    for bad in [f64::NAN, f64::INFINITY] {
        let flat = TriangleMesh::non_indexed(vec![bad, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
        assert!(matches!(
            mesh_ops::compute_mesh_volume(&flat),
            Err(Error::MalformedMesh(_))
        ));

        let mut positions = cube_10mm().positions;
        positions[4] = bad;
        let indexed = TriangleMesh {
            positions,
            indices: cube_10mm().indices,
        };
        let err = printquote::estimate_mesh(&indexed, &EstimationParams::storefront()).unwrap_err();
        assert!(err.to_string().contains("[E1001]"));
    }
}

#[test]
fn test_bounding_box_and_dimensions() {
    let mesh = indexed_box((-5.0, -10.0, 0.0), (20.0, 35.0, 20.0));

    let (min, max) = mesh_ops::compute_mesh_aabb(&mesh).unwrap();
    assert_eq!(min, (-5.0, -10.0, 0.0));
    assert_eq!(max, (15.0, 25.0, 20.0));

    let dims = mesh_ops::compute_mesh_dimensions(&mesh).unwrap();
    assert_eq!(dims, (20.0, 35.0, 20.0));
}

#[test]
fn test_analyze_mesh() {
    let stats = mesh_ops::analyze_mesh(&non_indexed_box((0.0, 0.0, 0.0), (2.0, 3.0, 4.0)))
        .unwrap();
    assert_eq!(stats.triangle_count, 12);
    assert_eq!(stats.vertex_count, 36);
    assert!(!stats.is_inverted());
    assert!((stats.volume - 24.0).abs() < 1e-12);
    assert_eq!(stats.dimensions(), Some((2.0, 3.0, 4.0)));
}
