//! Example quoting a cube with each of the three page presets
//!
//! Builds a 20 mm cube, extracts its volume and prints the estimate produced
//! by the storefront, workshop and planner configurations.

use printquote::mesh_ops::analyze_mesh;
use printquote::{
    EstimationParams, MaterialRate, TimeMode, Triangle, TriangleMesh, Vertex, estimate,
};

fn cube(side: f64) -> TriangleMesh {
    let vertices = [
        Vertex::new(0.0, 0.0, 0.0),
        Vertex::new(side, 0.0, 0.0),
        Vertex::new(side, side, 0.0),
        Vertex::new(0.0, side, 0.0),
        Vertex::new(0.0, 0.0, side),
        Vertex::new(side, 0.0, side),
        Vertex::new(side, side, side),
        Vertex::new(0.0, side, side),
    ];
    let triangles = [
        Triangle::new(0, 2, 1),
        Triangle::new(0, 3, 2),
        Triangle::new(4, 5, 6),
        Triangle::new(4, 6, 7),
        Triangle::new(0, 1, 5),
        Triangle::new(0, 5, 4),
        Triangle::new(3, 7, 6),
        Triangle::new(3, 6, 2),
        Triangle::new(0, 4, 7),
        Triangle::new(0, 7, 3),
        Triangle::new(1, 2, 6),
        Triangle::new(1, 6, 5),
    ];
    TriangleMesh::from_parts(&vertices, &triangles).expect("cube indices fit in u32")
}

fn main() {
    println!("=== Cube Quote Example ===\n");

    let mesh = cube(20.0);
    let stats = match analyze_mesh(&mesh) {
        Ok(stats) => stats,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    println!("Mesh: {} triangles, {} vertices", stats.triangle_count, stats.vertex_count);
    println!("Volume: {:.2} mm³", stats.volume);
    if let Some((w, d, h)) = stats.dimensions() {
        println!("Dimensions: {:.1} x {:.1} x {:.1} mm", w, d, h);
    }
    println!();

    let presets = [
        (
            "Storefront",
            EstimationParams::storefront()
                .with_material_rate(MaterialRate::PerKilogram(20.0))
                .with_time(TimeMode::Explicit {
                    hours: 1.5,
                    hourly_rate: 2.0,
                }),
        ),
        ("Workshop", EstimationParams::workshop()),
        ("Planner", EstimationParams::planner(3)),
    ];

    for (name, params) in presets {
        let quote = estimate(stats.volume, &params);
        println!("{}:", name);
        println!("  Effective volume: {:.2} cm³", quote.effective_volume_cm3);
        println!("  Weight:           {:.2} g", quote.weight_grams);
        println!("  Material cost:    {:.4}", quote.material_cost);
        if let Some(duration) = quote.print_duration() {
            println!("  Print time:       {}", duration);
        }
        println!("  Time cost:        {:.4}", quote.time_cost);
        println!("  Total:            {:.4}", quote.total_cost);
        println!();
    }
}
