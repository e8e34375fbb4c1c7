//! # printquote
//!
//! Volume extraction and price estimation for 3D-printing quotes.
//!
//! A mesh loader hands over a triangle mesh; this crate computes its enclosed
//! volume with the signed tetrahedron method and turns that volume into an
//! estimated filament weight, material cost, machine time cost and total price.
//! It does not parse files, render, persist inventory or format messages.
//!
//! ## Features
//!
//! - Pure Rust implementation with no unsafe code
//! - Indexed and non-indexed triangle meshes, validated before use
//! - Configurable cost model: per-gram or per-kilogram pricing, explicit or
//!   geometry-derived print time, service fee and/or margin
//! - Parameters are clamped to valid ranges, never rejected
//! - Proportional cost split across a multi-color plan
//! - Optional `serde` support for parameters and results
//!
//! ## Example
//!
//! ```
//! use printquote::{estimate_mesh, EstimationParams, MaterialRate, TriangleMesh};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Right-angled tetrahedron with legs of 30 mm: 4500 mm³
//! let positions = vec![
//!     0.0, 0.0, 0.0, 30.0, 0.0, 0.0, 0.0, 30.0, 0.0, 0.0, 0.0, 30.0,
//! ];
//! let indices = vec![0, 2, 1, 0, 1, 3, 0, 3, 2, 1, 2, 3];
//! let mesh = TriangleMesh::indexed(positions, indices);
//!
//! let params = EstimationParams::storefront()
//!     .with_material_rate(MaterialRate::PerKilogram(20.0));
//! let quote = estimate_mesh(&mesh, &params)?;
//!
//! assert!((quote.raw_volume_mm3 - 4500.0).abs() < 1e-9);
//! println!("{:.1} g, total {:.2}", quote.weight_grams, quote.total_cost);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod color_split;
pub mod error;
pub mod estimate;
pub mod mesh;
pub mod mesh_ops;
pub mod params;

pub use color_split::{
    ColorSegment, ColorShare, ColorSplit, Filament, FilamentInventory, FilamentPricing,
    PercentStatus, split_by_color,
};
pub use error::{Error, Result};
pub use estimate::{Estimation, EstimationInput, PrintDuration, estimate, estimate_mesh};
pub use mesh::{Triangle, TriangleMesh, Vertex};
pub use mesh_ops::{MeshStats, analyze_mesh, compute_mesh_signed_volume, compute_mesh_volume};
pub use params::{
    EstimationParams, Infill, Markup, Material, MaterialRate, ResolvedParams, ResolvedTime,
    ShellFactor, TimeMode,
};
