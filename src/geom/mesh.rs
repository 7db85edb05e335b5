use super::core::Vec3;

/// Indexed triangle mesh buffers, the hand-off format between the meshing
/// core and a renderer-facing host.
///
/// `positions` is the vertex buffer (index = position); `indices` holds
/// consecutive triples, each referencing three valid vertices of one
/// consistently wound triangle. `normals` is optional: builders in this
/// crate leave it `None` and a host adapter fills it (for example via
/// [`compute_smooth_normals`]).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeomMesh {
    pub positions: Vec<[f64; 3]>,
    pub indices: Vec<u32>,
    pub normals: Option<Vec<[f64; 3]>>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MeshError {
    #[error("mesh indices are not a triangle list (len % 3 != 0)")]
    NotATriangleList,
    #[error("mesh has invalid vertex coordinates (NaN/Inf)")]
    InvalidVertices,
    #[error("mesh has out-of-bounds vertex indices")]
    IndexOutOfBounds,
    #[error("mesh normal buffer does not match vertex count")]
    AttributeLengthMismatch,
}

impl GeomMesh {
    /// Create a new mesh with positions and indices only.
    #[must_use]
    pub fn new(positions: Vec<[f64; 3]>, indices: Vec<u32>) -> Self {
        Self {
            positions,
            indices,
            normals: None,
        }
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if any vertex position contains NaN or Inf values.
    #[must_use]
    pub fn has_invalid_vertices(&self) -> bool {
        self.positions
            .iter()
            .any(|p| !p[0].is_finite() || !p[1].is_finite() || !p[2].is_finite())
    }

    /// Returns true if all vertex indices are within bounds.
    #[must_use]
    pub fn has_valid_indices(&self) -> bool {
        let n = self.positions.len() as u32;
        self.indices.iter().all(|&i| i < n)
    }

    /// Returns true if indices represent a triangle list.
    #[must_use]
    pub fn has_triangle_indices(&self) -> bool {
        self.indices.len() % 3 == 0
    }

    pub fn validate(&self) -> Result<(), MeshError> {
        if !self.has_triangle_indices() {
            return Err(MeshError::NotATriangleList);
        }
        if self.has_invalid_vertices() {
            return Err(MeshError::InvalidVertices);
        }
        if !self.has_valid_indices() {
            return Err(MeshError::IndexOutOfBounds);
        }
        if self
            .normals
            .as_ref()
            .is_some_and(|normals| normals.len() != self.positions.len())
        {
            return Err(MeshError::AttributeLengthMismatch);
        }
        Ok(())
    }

    /// Returns the position buffer as a flat slice: `[x0, y0, z0, x1, y1, z1, ...]`.
    ///
    /// This is a zero-copy view over `positions`, useful for host adapters
    /// that expect packed numeric buffers.
    #[must_use]
    pub fn positions_flat(&self) -> &[f64] {
        flatten_f64_array_slice(&self.positions)
    }

    /// Returns the normal buffer as a flat slice when present.
    #[must_use]
    pub fn normals_flat(&self) -> Option<&[f64]> {
        self.normals.as_deref().map(flatten_f64_array_slice)
    }
}

fn flatten_f64_array_slice(data: &[[f64; 3]]) -> &[f64] {
    let count = data.len().checked_mul(3).unwrap_or(0);
    let ptr = data.as_ptr().cast::<f64>();
    // SAFETY: `[[f64; 3]]` is stored contiguously, and the element count is `len * 3`.
    unsafe { std::slice::from_raw_parts(ptr, count) }
}

/// Computes area-weighted smooth vertex normals for a mesh.
///
/// Face normals (unnormalized cross products, so larger triangles weigh
/// more) are accumulated onto each referenced vertex and normalized at the
/// end. Vertices referenced by no triangle, or whose accumulated normal
/// degenerates, fall back to +Z.
#[must_use]
pub fn compute_smooth_normals(mesh: &GeomMesh) -> Vec<[f64; 3]> {
    let mut normals = vec![Vec3::ZERO; mesh.positions.len()];

    for tri in mesh.indices.chunks_exact(3) {
        let i0 = tri[0] as usize;
        let i1 = tri[1] as usize;
        let i2 = tri[2] as usize;

        let (Some(&a), Some(&b), Some(&c)) = (
            mesh.positions.get(i0),
            mesh.positions.get(i1),
            mesh.positions.get(i2),
        ) else {
            continue;
        };

        let a = Vec3::from_array(a);
        let ab = Vec3::from_array(b).sub(a);
        let ac = Vec3::from_array(c).sub(a);
        let face = ab.cross(ac);

        normals[i0] = normals[i0].add(face);
        normals[i1] = normals[i1].add(face);
        normals[i2] = normals[i2].add(face);
    }

    normals
        .into_iter()
        .map(|n| n.normalized().unwrap_or(Vec3::Z).to_array())
        .collect()
}
