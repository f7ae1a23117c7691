//! Boat mesh decoding from glTF bytes (`.glb` or `.gltf` with embedded
//! buffers). Only geometry is taken from the asset; the material is replaced
//! by the scene's own shiny white shading.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("glTF decode failed: {0}")]
    Decode(#[from] gltf::Error),
    #[error("document contains no usable mesh geometry")]
    NoGeometry,
}

#[derive(Clone, Debug, Default)]
pub struct BoatMesh {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl BoatMesh {
    /// Decode every primitive of every mesh into one vertex/index soup.
    pub fn from_gltf_bytes(bytes: &[u8]) -> Result<Self, ModelError> {
        let (document, buffers, _images) = gltf::import_slice(bytes)?;

        let mut mesh = BoatMesh::default();
        for gltf_mesh in document.meshes() {
            for primitive in gltf_mesh.primitives() {
                let reader =
                    primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| &*data.0));
                let Some(position_iter) = reader.read_positions() else {
                    continue;
                };
                let base = mesh.positions.len() as u32;
                mesh.positions.extend(position_iter);
                let added = mesh.positions.len() as u32 - base;

                if let Some(normal_iter) = reader.read_normals() {
                    mesh.normals.extend(normal_iter);
                } else {
                    mesh.normals
                        .extend(std::iter::repeat([0.0; 3]).take(added as usize));
                }

                match reader.read_indices() {
                    Some(index_iter) => {
                        mesh.indices.extend(index_iter.into_u32().map(|i| base + i))
                    }
                    None => mesh.indices.extend(base..base + added),
                }
            }
        }

        if mesh.positions.is_empty() || mesh.indices.is_empty() {
            return Err(ModelError::NoGeometry);
        }
        if mesh.normals.iter().any(|n| *n == [0.0; 3]) {
            mesh.compute_missing_normals();
        }
        log::info!(
            "boat mesh decoded: {} vertices, {} triangles",
            mesh.positions.len(),
            mesh.indices.len() / 3
        );
        Ok(mesh)
    }

    /// Area-weighted face normals for vertices the asset left unspecified.
    fn compute_missing_normals(&mut self) {
        use glam::Vec3;
        let mut accum = vec![Vec3::ZERO; self.positions.len()];
        for tri in self.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let pa = Vec3::from(self.positions[a]);
            let pb = Vec3::from(self.positions[b]);
            let pc = Vec3::from(self.positions[c]);
            let face = (pb - pa).cross(pc - pa);
            accum[a] += face;
            accum[b] += face;
            accum[c] += face;
        }
        for (normal, sum) in self.normals.iter_mut().zip(accum) {
            if *normal == [0.0; 3] {
                *normal = sum.normalize_or_zero().to_array();
            }
        }
    }
}
