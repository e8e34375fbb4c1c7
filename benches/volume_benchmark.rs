use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use printquote::{EstimationParams, TriangleMesh, Vertex, compute_mesh_volume, estimate};
use std::hint::black_box;

/// Triangles of a unit box, outward winding, indexing the corner order below
const BOX_TRIANGLES: [[usize; 3]; 12] = [
    [0, 2, 1],
    [0, 3, 2],
    [4, 5, 6],
    [4, 6, 7],
    [0, 1, 5],
    [0, 5, 4],
    [3, 7, 6],
    [3, 6, 2],
    [0, 4, 7],
    [0, 7, 3],
    [1, 2, 6],
    [1, 6, 5],
];

/// Generate a mesh of `cubes` disjoint 1 mm cubes laid out on a grid
fn generate_cubes(cubes: usize, indexed: bool) -> TriangleMesh {
    let mut mesh = if indexed {
        TriangleMesh::indexed(Vec::new(), Vec::new())
    } else {
        TriangleMesh::new()
    };

    for i in 0..cubes {
        let x = (i % 100) as f64 * 2.0;
        let y = ((i / 100) % 100) as f64 * 2.0;
        let z = (i / 10_000) as f64 * 2.0;
        let corners = [
            Vertex::new(x, y, z),
            Vertex::new(x + 1.0, y, z),
            Vertex::new(x + 1.0, y + 1.0, z),
            Vertex::new(x, y + 1.0, z),
            Vertex::new(x, y, z + 1.0),
            Vertex::new(x + 1.0, y, z + 1.0),
            Vertex::new(x + 1.0, y + 1.0, z + 1.0),
            Vertex::new(x, y + 1.0, z + 1.0),
        ];

        match mesh.indices.as_mut() {
            Some(indices) => {
                let first = (mesh.positions.len() / 3) as u32;
                for c in &corners {
                    mesh.positions.extend_from_slice(&[c.x, c.y, c.z]);
                }
                for [a, b, c] in BOX_TRIANGLES {
                    indices.extend_from_slice(&[
                        first + a as u32,
                        first + b as u32,
                        first + c as u32,
                    ]);
                }
            }
            None => {
                for [a, b, c] in BOX_TRIANGLES {
                    mesh.push_triangle(corners[a], corners[b], corners[c])
                            .unwrap();
                }
            }
        }
    }

    mesh
}

fn bench_volume(c: &mut Criterion) {
    let mut group = c.benchmark_group("volume");

    for &cubes in &[100, 1_000, 10_000] {
        for indexed in [false, true] {
            let mesh = generate_cubes(cubes, indexed);
            let label = if indexed { "indexed" } else { "non_indexed" };

            group.bench_with_input(
                BenchmarkId::new(label, format!("{}t", cubes * 12)),
                &mesh,
                |b, mesh| {
                    b.iter(|| black_box(compute_mesh_volume(mesh).unwrap()));
                },
            );
        }
    }

    group.finish();
}

fn bench_estimate(c: &mut Criterion) {
    let params = EstimationParams::planner(3);
    c.bench_function("estimate", |b| {
        b.iter(|| black_box(estimate(black_box(125_000.0), &params)));
    });
}

criterion_group!(benches, bench_volume, bench_estimate);
criterion_main!(benches);
