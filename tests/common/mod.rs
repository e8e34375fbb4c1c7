//! Shared mesh builders for integration tests

#![allow(dead_code)]

use printquote::{Triangle, TriangleMesh, Vertex};

/// Triangles of an axis-aligned box with outward (counter-clockwise) winding,
/// indexing the corner order used by [`box_vertices`]
pub const BOX_TRIANGLES: [(usize, usize, usize); 12] = [
    // Bottom face (z=0)
    (0, 2, 1),
    (0, 3, 2),
    // Top face (z=max)
    (4, 5, 6),
    (4, 6, 7),
    // Front face (y=0)
    (0, 1, 5),
    (0, 5, 4),
    // Back face (y=max)
    (3, 7, 6),
    (3, 6, 2),
    // Left face (x=0)
    (0, 4, 7),
    (0, 7, 3),
    // Right face (x=max)
    (1, 2, 6),
    (1, 6, 5),
];

/// Corners of a box spanning `min` to `min + size`
pub fn box_vertices(min: (f64, f64, f64), size: (f64, f64, f64)) -> [Vertex; 8] {
    let (x0, y0, z0) = min;
    let (x1, y1, z1) = (x0 + size.0, y0 + size.1, z0 + size.2);
    [
        Vertex::new(x0, y0, z0), // 0
        Vertex::new(x1, y0, z0), // 1
        Vertex::new(x1, y1, z0), // 2
        Vertex::new(x0, y1, z0), // 3
        Vertex::new(x0, y0, z1), // 4
        Vertex::new(x1, y0, z1), // 5
        Vertex::new(x1, y1, z1), // 6
        Vertex::new(x0, y1, z1), // 7
    ]
}

/// Indexed box mesh
pub fn indexed_box(min: (f64, f64, f64), size: (f64, f64, f64)) -> TriangleMesh {
    let triangles: Vec<Triangle> = BOX_TRIANGLES
        .iter()
        .map(|&(a, b, c)| Triangle::new(a, b, c))
        .collect();
    TriangleMesh::from_parts(&box_vertices(min, size), &triangles).unwrap()
}

/// Non-indexed box mesh, every triangle owning its three vertices
pub fn non_indexed_box(min: (f64, f64, f64), size: (f64, f64, f64)) -> TriangleMesh {
    let vertices = box_vertices(min, size);
    let mut mesh = TriangleMesh::new();
    for &(a, b, c) in &BOX_TRIANGLES {
        mesh.push_triangle(vertices[a], vertices[b], vertices[c])
            .unwrap();
    }
    mesh
}

/// Cube with side length 10 mm at the origin (1000 mm³)
pub fn cube_10mm() -> TriangleMesh {
    indexed_box((0.0, 0.0, 0.0), (10.0, 10.0, 10.0))
}

/// Relative difference between two values
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    ((actual - expected) / expected).abs()
}
