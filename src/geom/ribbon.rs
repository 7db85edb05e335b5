//! Ribbon strip meshing over rail point pairs.
//!
//! A ribbon is defined by two parallel rails: same-length ordered point
//! sequences forming the left and right boundary of a strip (for example a
//! curve sampled after offsetting to both sides). [`build_ribbon`] fills
//! the strip with `cross_resolution` quad columns per rail step and
//! triangulates it with an explicit grid-index formula
//! (`index(y, x) = y * (cross_resolution + 1) + x`) so the stride
//! relationship stays auditable.
//!
//! The builder computes no normals or UVs; renderer-facing adapters derive
//! those from the returned buffers (see [`super::mesh::compute_smooth_normals`]).

use super::core::Point3;
use super::mesh::GeomMesh;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RibbonError {
    #[error("cross resolution must be at least 1")]
    InvalidSegmentCount,
    #[error("rails must be two equal-length runs of at least 2 points, got {left} and {right}")]
    InvalidRibbonInput { left: usize, right: usize },
    #[error("rail points must be finite")]
    NonFiniteInput,
}

/// Size summary for one ribbon build, returned alongside the mesh.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RibbonDiagnostics {
    /// Points per rail (longitudinal step count + 1).
    pub rail_point_count: usize,
    pub vertex_count: usize,
    pub triangle_count: usize,
}

/// Triangulates a rail-pair grid of `rows` longitudinal steps and
/// `cross_resolution` quad columns into index triples.
///
/// Vertices are assumed row-major with stride `cross_resolution + 1`
/// (`index(y, x) = y * stride + x`). Each quad cell emits two triangles
/// `[vi, vi + stride, vi + 1]` and `[vi + 1, vi + stride, vi + stride + 1]`,
/// winding all cells the same way. Inputs are clamped to the smallest
/// meaningful grid (2 rows, 1 column).
#[must_use]
pub fn triangulate_rail_grid(rows: usize, cross_resolution: usize) -> Vec<u32> {
    let rows = rows.max(2);
    let cross_resolution = cross_resolution.max(1);

    let stride = cross_resolution + 1;
    let quad_count = (rows - 1) * cross_resolution;
    let mut indices = Vec::with_capacity(quad_count * 6);

    for y in 0..rows - 1 {
        for x in 0..cross_resolution {
            let vi = (y * stride + x) as u32;
            let below = vi + stride as u32;
            indices.extend_from_slice(&[vi, below, vi + 1]);
            indices.extend_from_slice(&[vi + 1, below, below + 1]);
        }
    }

    indices
}

/// Builds a triangulated strip mesh between two rails.
///
/// For each longitudinal index `y` the builder lays down
/// `cross_resolution + 1` vertices interpolated from `left[y]` to
/// `right[y]`, then triangulates the resulting grid with
/// [`triangulate_rail_grid`]. The output buffers are freshly allocated and
/// owned by the caller; nothing is retained between calls.
///
/// # Errors
/// - [`RibbonError::InvalidSegmentCount`] when `cross_resolution == 0`.
/// - [`RibbonError::InvalidRibbonInput`] when the rails differ in length or
///   either holds fewer than 2 points.
/// - [`RibbonError::NonFiniteInput`] when any rail coordinate is NaN/Inf.
///
/// All validation happens before any buffer is allocated; no partial
/// output is ever returned.
pub fn build_ribbon(
    left: &[Point3],
    right: &[Point3],
    cross_resolution: usize,
) -> Result<(GeomMesh, RibbonDiagnostics), RibbonError> {
    if cross_resolution == 0 {
        return Err(RibbonError::InvalidSegmentCount);
    }
    if left.len() != right.len() || left.len() < 2 {
        return Err(RibbonError::InvalidRibbonInput {
            left: left.len(),
            right: right.len(),
        });
    }
    if left.iter().chain(right.iter()).any(|p| !p.is_finite()) {
        return Err(RibbonError::NonFiniteInput);
    }

    let rows = left.len();
    let stride = cross_resolution + 1;
    let mut positions = Vec::with_capacity(rows * stride);
    for y in 0..rows {
        for x in 0..stride {
            let t = x as f64 / cross_resolution as f64;
            positions.push(left[y].lerp(right[y], t).to_array());
        }
    }

    let indices = triangulate_rail_grid(rows, cross_resolution);
    let mesh = GeomMesh::new(positions, indices);
    debug_assert!(mesh.has_valid_indices());

    let diagnostics = RibbonDiagnostics {
        rail_point_count: rows,
        vertex_count: mesh.vertex_count(),
        triangle_count: mesh.triangle_count(),
    };
    log::debug!(
        "ribbon mesh: {} rail points -> {} vertices, {} triangles",
        diagnostics.rail_point_count,
        diagnostics.vertex_count,
        diagnostics.triangle_count
    );

    Ok((mesh, diagnostics))
}

/// Builds one ribbon per rail pair, sharing a single cross resolution.
///
/// Every pair is meshed independently (the builder holds no cross-call
/// state), so with the `parallel` feature the batch fans out over rayon.
/// The first invalid pair fails the whole batch.
pub fn build_ribbons(
    rails: &[(Vec<Point3>, Vec<Point3>)],
    cross_resolution: usize,
) -> Result<Vec<(GeomMesh, RibbonDiagnostics)>, RibbonError> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        rails
            .par_iter()
            .map(|(left, right)| build_ribbon(left, right, cross_resolution))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        rails
            .iter()
            .map(|(left, right)| build_ribbon(left, right, cross_resolution))
            .collect()
    }
}
