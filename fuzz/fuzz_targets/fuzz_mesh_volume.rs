#![no_main]

use libfuzzer_sys::arbitrary::{Arbitrary, Result, Unstructured};
use libfuzzer_sys::fuzz_target;
use printquote::{EstimationParams, TriangleMesh};

#[derive(Debug)]
struct FuzzMesh {
    positions: Vec<f64>,
    indices: Option<Vec<u32>>,
}

impl<'a> Arbitrary<'a> for FuzzMesh {
    fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
        // Buffer lengths are unconstrained so malformed meshes get exercised too
        let position_count = u.int_in_range(0..=300)?;
        let mut positions = Vec::with_capacity(position_count);
        for _ in 0..position_count {
            positions.push(u.arbitrary()?);
        }

        let indices = if u.arbitrary()? {
            let index_count = u.int_in_range(0..=150)?;
            let upper = (position_count / 3 + 2) as u32;
            let mut indices = Vec::with_capacity(index_count);
            for _ in 0..index_count {
                indices.push(u.int_in_range(0..=upper)?);
            }
            Some(indices)
        } else {
            None
        };

        Ok(FuzzMesh { positions, indices })
    }
}

fuzz_target!(|data: FuzzMesh| {
    let mesh = match data.indices {
        Some(indices) => TriangleMesh::indexed(data.positions, indices),
        None => TriangleMesh::non_indexed(data.positions),
    };

    // Malformed buffers and overflowing sums must come back as errors, never panics
    let valid = mesh.validate().is_ok();
    let result = printquote::compute_mesh_volume(&mesh);
    if !valid {
        assert!(result.is_err());
    }
    if let Ok(volume) = result {
        assert!(volume.is_finite() && volume >= 0.0);
        let _ = printquote::analyze_mesh(&mesh);
        let _ = printquote::estimate_mesh(&mesh, &EstimationParams::planner(3));
    }
});
