//! Triangle mesh representation
//!
//! A [`TriangleMesh`] mirrors the buffers a mesh loader hands over: a flat
//! position buffer (`x0, y0, z0, x1, y1, z1, ...`) and an optional index buffer.
//! Without indices every three consecutive vertices form one triangle; with
//! indices every three consecutive indices do.

use crate::error::{Error, Result};
use nalgebra::{Point3, Vector3};

/// A vertex in 3D space
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vertex {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Z coordinate
    pub z: f64,
}

impl Vertex {
    /// Create a new vertex
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Convert to an nalgebra point
    pub fn to_point(self) -> Point3<f64> {
        Point3::new(self.x, self.y, self.z)
    }
}

impl From<Point3<f64>> for Vertex {
    fn from(p: Point3<f64>) -> Self {
        Self::new(p.x, p.y, p.z)
    }
}

/// A triangle defined by three vertex indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Triangle {
    /// Index of first vertex
    pub v1: usize,
    /// Index of second vertex
    pub v2: usize,
    /// Index of third vertex
    pub v3: usize,
}

impl Triangle {
    /// Create a new triangle
    pub fn new(v1: usize, v2: usize, v3: usize) -> Self {
        Self { v1, v2, v3 }
    }
}

/// Triangle mesh as decoded by an external loader
///
/// The mesh is expected to be closed and consistently wound for its volume to
/// be meaningful. That is assumed, not checked.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TriangleMesh {
    /// Flat vertex coordinates, three scalars per vertex
    pub positions: Vec<f64>,
    /// Optional triangle-list index buffer
    pub indices: Option<Vec<u32>>,
}

impl TriangleMesh {
    /// Create a new empty, non-indexed mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a non-indexed mesh from a flat position buffer
    pub fn non_indexed(positions: Vec<f64>) -> Self {
        Self {
            positions,
            indices: None,
        }
    }

    /// Create an indexed mesh from a flat position buffer and a triangle-list index buffer
    pub fn indexed(positions: Vec<f64>, indices: Vec<u32>) -> Self {
        Self {
            positions,
            indices: Some(indices),
        }
    }

    /// Build an indexed mesh from structured vertices and triangles
    ///
    /// Fails with [`Error::MalformedMesh`] if a triangle index does not fit the
    /// 32-bit index buffer.
    ///
    /// # Example
    /// ```
    /// use printquote::{Triangle, TriangleMesh, Vertex};
    ///
    /// let vertices = [
    ///     Vertex::new(0.0, 0.0, 0.0),
    ///     Vertex::new(1.0, 0.0, 0.0),
    ///     Vertex::new(0.0, 1.0, 0.0),
    /// ];
    /// let mesh = TriangleMesh::from_parts(&vertices, &[Triangle::new(0, 1, 2)]).unwrap();
    /// assert_eq!(mesh.triangle_count(), 1);
    /// ```
    pub fn from_parts(vertices: &[Vertex], triangles: &[Triangle]) -> Result<Self> {
        let positions = vertices.iter().flat_map(|v| [v.x, v.y, v.z]).collect();

        let mut indices = Vec::with_capacity(triangles.len() * 3);
        for t in triangles {
            for index in [t.v1, t.v2, t.v3] {
                indices.push(to_index(index)?);
            }
        }

        Ok(Self::indexed(positions, indices))
    }

    /// Append a triangle given by its three corners
    ///
    /// On an indexed mesh the corners are appended as new vertices and
    /// referenced by three new indices. Fails with [`Error::MalformedMesh`],
    /// leaving the mesh untouched, if those indices do not fit the 32-bit
    /// index buffer.
    pub fn push_triangle(&mut self, a: Vertex, b: Vertex, c: Vertex) -> Result<()> {
        let first = self.vertex_count();
        if let Some(indices) = self.indices.as_mut() {
            let last = to_index(first.saturating_add(2))?;
            indices.extend_from_slice(&[last - 2, last - 1, last]);
        }
        for v in [a, b, c] {
            self.positions.extend_from_slice(&[v.x, v.y, v.z]);
        }
        Ok(())
    }

    /// Whether the mesh carries an index buffer
    pub fn is_indexed(&self) -> bool {
        self.indices.is_some()
    }

    /// Number of complete vertices in the position buffer
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of complete triangles
    pub fn triangle_count(&self) -> usize {
        match &self.indices {
            Some(indices) => indices.len() / 3,
            None => self.vertex_count() / 3,
        }
    }

    /// Check whether the mesh has no triangles
    pub fn is_empty(&self) -> bool {
        self.triangle_count() == 0
    }

    /// Get vertex `index` as a point, if present
    pub fn vertex(&self, index: usize) -> Option<Point3<f64>> {
        let base = index.checked_mul(3)?;
        let xyz = self.positions.get(base..base.checked_add(3)?)?;
        Some(Point3::new(xyz[0], xyz[1], xyz[2]))
    }

    /// Check buffer lengths and index bounds
    ///
    /// # Errors
    /// - [`Error::MalformedMesh`] if the position buffer, the non-indexed vertex
    ///   count or the index buffer is not a multiple of 3
    /// - [`Error::IndexOutOfRange`] if an index references a missing vertex
    pub fn validate(&self) -> Result<()> {
        if self.positions.len() % 3 != 0 {
            return Err(Error::not_multiple_of_three(
                "position buffer",
                self.positions.len(),
            ));
        }

        if let Some((position, value)) = self
            .positions
            .iter()
            .enumerate()
            .find(|(_, value)| !value.is_finite())
        {
            return Err(Error::MalformedMesh(format!(
                "vertex {} has non-finite coordinate {}",
                position / 3,
                value
            )));
        }

        let vertex_count = self.vertex_count();
        match &self.indices {
            None => {
                if vertex_count % 3 != 0 {
                    return Err(Error::MalformedMesh(format!(
                        "non-indexed vertex count {} is not a multiple of 3",
                        vertex_count
                    )));
                }
            }
            Some(indices) => {
                if indices.len() % 3 != 0 {
                    return Err(Error::not_multiple_of_three("index buffer", indices.len()));
                }
                if let Some((position, &index)) = indices
                    .iter()
                    .enumerate()
                    .find(|&(_, &index)| index as usize >= vertex_count)
                {
                    return Err(Error::IndexOutOfRange {
                        triangle: position / 3,
                        index: index as usize,
                        vertex_count,
                    });
                }
            }
        }

        Ok(())
    }

    /// Iterate over the triangles in winding order
    ///
    /// Validates the mesh first, so the iterator itself cannot fail.
    pub fn triangles(&self) -> Result<Triangles<'_>> {
        self.validate()?;
        Ok(Triangles {
            mesh: self,
            next: 0,
            count: self.triangle_count(),
        })
    }

    /// Return a non-indexed copy in which every triangle owns its three vertices
    pub fn to_non_indexed(&self) -> Result<Self> {
        let mut positions = Vec::with_capacity(self.triangle_count() * 9);
        for [a, b, c] in self.triangles()? {
            for p in [a, b, c] {
                positions.extend_from_slice(&[p.x, p.y, p.z]);
            }
        }
        Ok(Self::non_indexed(positions))
    }

    /// Return a copy with every vertex moved by `offset`
    pub fn translated(&self, offset: Vector3<f64>) -> Self {
        let mut positions = self.positions.clone();
        for xyz in positions.chunks_exact_mut(3) {
            xyz[0] += offset.x;
            xyz[1] += offset.y;
            xyz[2] += offset.z;
        }
        Self {
            positions,
            indices: self.indices.clone(),
        }
    }

    /// Return a copy with the winding of every triangle reversed
    pub fn reversed(&self) -> Self {
        match &self.indices {
            Some(indices) => {
                let mut indices = indices.clone();
                for tri in indices.chunks_exact_mut(3) {
                    tri.swap(1, 2);
                }
                Self::indexed(self.positions.clone(), indices)
            }
            None => {
                let mut positions = self.positions.clone();
                for tri in positions.chunks_exact_mut(9) {
                    // Swap the second and third vertex of each triangle
                    for axis in 0..3 {
                        tri.swap(3 + axis, 6 + axis);
                    }
                }
                Self::non_indexed(positions)
            }
        }
    }
}

/// Convert a vertex position into a 32-bit index
fn to_index(vertex: usize) -> Result<u32> {
    u32::try_from(vertex)
        .map_err(|_| Error::MalformedMesh(format!("vertex index {} exceeds u32 range", vertex)))
}

/// Iterator over the triangles of a validated [`TriangleMesh`]
#[derive(Debug, Clone)]
pub struct Triangles<'a> {
    mesh: &'a TriangleMesh,
    next: usize,
    count: usize,
}

impl Triangles<'_> {
    fn corner(&self, triangle: usize, corner: usize) -> usize {
        match &self.mesh.indices {
            Some(indices) => indices[triangle * 3 + corner] as usize,
            None => triangle * 3 + corner,
        }
    }

    fn point(&self, vertex: usize) -> Point3<f64> {
        let p = &self.mesh.positions[vertex * 3..vertex * 3 + 3];
        Point3::new(p[0], p[1], p[2])
    }
}

impl Iterator for Triangles<'_> {
    type Item = [Point3<f64>; 3];

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.count {
            return None;
        }
        let t = self.next;
        self.next += 1;
        Some([
            self.point(self.corner(t, 0)),
            self.point(self.corner(t, 1)),
            self.point(self.corner(t, 2)),
        ])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Triangles<'_> {}
