//! Triangle mesh operations
//!
//! This module provides geometric operations on triangle meshes including:
//! - Volume computation (signed tetrahedron / divergence theorem)
//! - Bounding box and dimension calculation
//! - A combined summary of both for quote display
//!
//! The volume is exact for any closed, consistently wound triangulated
//! polyhedron up to floating-point error, including non-convex and
//! multi-shell meshes. Open or inconsistently wound meshes still produce a
//! number, but it is not a physical volume.

use crate::error::{Error, Result};
use crate::mesh::TriangleMesh;
use nalgebra::Point3;
use tracing::debug;

/// A 3D point represented as (x, y, z)
pub type Point3d = (f64, f64, f64);

/// A 3D vector represented as (x, y, z)
pub type Vector3d = (f64, f64, f64);

/// An axis-aligned bounding box represented as (min_point, max_point)
pub type BoundingBox = (Point3d, Point3d);

/// Six times the signed volume of the tetrahedron (origin, a, b, c)
///
/// Equals `a · (b × c)`. Positive when `a, b, c` wind counter-clockwise seen
/// from outside the origin's side.
#[inline]
fn scaled_signed_volume(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> f64 {
    a.coords.dot(&b.coords.cross(&c.coords))
}

/// Signed volume of the tetrahedron formed by a triangle and the origin
///
/// # Example
/// ```
/// use nalgebra::Point3;
/// use printquote::mesh_ops::signed_tetrahedron_volume;
///
/// let v = signed_tetrahedron_volume(
///     &Point3::new(1.0, 0.0, 0.0),
///     &Point3::new(0.0, 1.0, 0.0),
///     &Point3::new(0.0, 0.0, 1.0),
/// );
/// assert!((v - 1.0 / 6.0).abs() < 1e-12);
/// ```
pub fn signed_tetrahedron_volume(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> f64 {
    scaled_signed_volume(a, b, c) / 6.0
}

/// Compute the signed volume of a mesh using the divergence theorem
///
/// Returns the signed volume in cubic mesh units (mm³ for millimetre meshes).
/// For a closed mesh with outward-facing winding the volume is positive;
/// a negative volume indicates globally inverted triangles.
///
/// All contributions are accumulated in a single `f64` and divided by 6 once,
/// so large meshes do not pick up per-triangle rounding.
///
/// # Arguments
/// * `mesh` - The mesh to compute volume for
///
/// # Returns
/// The signed volume, `0.0` for a mesh without triangles, or an error if the
/// mesh buffers are malformed or the coordinates are too large for the sum to
/// stay finite
pub fn compute_mesh_signed_volume(mesh: &TriangleMesh) -> Result<f64> {
    let mut volume = 0.0_f64;
    for [a, b, c] in mesh.triangles()? {
        volume += scaled_signed_volume(&a, &b, &c);
    }
    volume /= 6.0;

    if !volume.is_finite() {
        return Err(Error::MalformedMesh(format!(
            "volume of {} triangles overflows f64",
            mesh.triangle_count()
        )));
    }

    debug!(
        "Signed volume of {} triangles ({}): {}",
        mesh.triangle_count(),
        if mesh.is_indexed() { "indexed" } else { "non-indexed" },
        volume
    );

    Ok(volume)
}

/// Compute the unsigned volume of a mesh
///
/// Returns the magnitude of [`compute_mesh_signed_volume`], so a mesh whose
/// winding is globally reversed reports the same volume.
///
/// # Example
/// ```
/// use printquote::{TriangleMesh, mesh_ops::compute_mesh_volume};
///
/// let empty = TriangleMesh::new();
/// assert_eq!(compute_mesh_volume(&empty).unwrap(), 0.0);
/// ```
pub fn compute_mesh_volume(mesh: &TriangleMesh) -> Result<f64> {
    Ok(compute_mesh_signed_volume(mesh)?.abs())
}

/// Compute the axis-aligned bounding box (AABB) of a mesh
///
/// Only vertices referenced by a triangle are considered.
///
/// # Returns
/// A tuple of (min_point, max_point) where each point is (x, y, z), or
/// [`Error::EmptyMesh`] if the mesh has no triangles
pub fn compute_mesh_aabb(mesh: &TriangleMesh) -> Result<BoundingBox> {
    let mut bounds: Option<BoundingBox> = None;

    for p in mesh.triangles()?.flatten() {
        let (min, max) = bounds.get_or_insert(((p.x, p.y, p.z), (p.x, p.y, p.z)));
        min.0 = min.0.min(p.x);
        min.1 = min.1.min(p.y);
        min.2 = min.2.min(p.z);
        max.0 = max.0.max(p.x);
        max.1 = max.1.max(p.y);
        max.2 = max.2.max(p.z);
    }

    bounds.ok_or_else(|| {
        Error::EmptyMesh("Cannot compute bounding box of mesh with no triangles".to_string())
    })
}

/// Compute the extent of a mesh along each axis
///
/// # Returns
/// The (width, depth, height) of the bounding box
pub fn compute_mesh_dimensions(mesh: &TriangleMesh) -> Result<Vector3d> {
    let (min, max) = compute_mesh_aabb(mesh)?;
    Ok((max.0 - min.0, max.1 - min.1, max.2 - min.2))
}

/// Geometry summary of a mesh
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeshStats {
    /// Number of vertices in the position buffer
    pub vertex_count: usize,
    /// Number of triangles
    pub triangle_count: usize,
    /// Signed volume; negative means inverted winding
    pub signed_volume: f64,
    /// Enclosed volume
    pub volume: f64,
    /// Bounding box, absent for a mesh without triangles
    pub bounds: Option<BoundingBox>,
}

impl MeshStats {
    /// Whether the winding appears globally inverted
    pub fn is_inverted(&self) -> bool {
        self.signed_volume < 0.0
    }

    /// Extent along each axis, if the mesh has triangles
    pub fn dimensions(&self) -> Option<Vector3d> {
        self.bounds
            .map(|(min, max)| (max.0 - min.0, max.1 - min.1, max.2 - min.2))
    }
}

/// Compute volume and bounds of a mesh in one call
///
/// # Example
/// ```
/// use printquote::{TriangleMesh, mesh_ops::analyze_mesh};
///
/// let stats = analyze_mesh(&TriangleMesh::new()).unwrap();
/// assert_eq!(stats.volume, 0.0);
/// assert!(stats.bounds.is_none());
/// ```
pub fn analyze_mesh(mesh: &TriangleMesh) -> Result<MeshStats> {
    let signed_volume = compute_mesh_signed_volume(mesh)?;
    let bounds = if mesh.is_empty() {
        None
    } else {
        Some(compute_mesh_aabb(mesh)?)
    };

    Ok(MeshStats {
        vertex_count: mesh.vertex_count(),
        triangle_count: mesh.triangle_count(),
        signed_volume,
        volume: signed_volume.abs(),
        bounds,
    })
}
