use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::core::vertex::Vertex;
use crate::error::AssemblyError;

static NEXT_MESH_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique handle the scene uses to track a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshId(u64);

impl MeshId {
    fn next() -> Self {
        MeshId(NEXT_MESH_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MeshId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PrimitiveTopology {
    /// Every three consecutive indices form one triangle.
    #[default]
    TriangleList,
}

/// Raw buffers of a height-grid mesh before validation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MeshBuffers {
    pub rows: u32,
    pub cols: u32,
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

/// A validated, immutable terrain surface.
#[derive(Debug)]
pub struct TerrainMesh {
    id: MeshId,
    seed: i32,
    buffers: MeshBuffers,
    primitive: PrimitiveTopology,
}

impl TerrainMesh {
    pub fn id(&self) -> MeshId {
        self.id
    }

    pub fn seed(&self) -> i32 {
        self.seed
    }

    pub fn rows(&self) -> u32 {
        self.buffers.rows
    }

    pub fn cols(&self) -> u32 {
        self.buffers.cols
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.buffers.positions
    }

    pub fn normals(&self) -> &[[f32; 3]] {
        &self.buffers.normals
    }

    pub fn indices(&self) -> &[u32] {
        &self.buffers.indices
    }

    pub fn buffers(&self) -> &MeshBuffers {
        &self.buffers
    }

    pub fn primitive(&self) -> PrimitiveTopology {
        self.primitive
    }

    pub fn vertex_count(&self) -> usize {
        self.buffers.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.buffers.indices.len() / 3
    }

    /// Interleaves positions and normals for a vertex buffer upload.
    pub fn to_vertices(&self) -> Vec<Vertex> {
        self.buffers
            .positions
            .iter()
            .zip(&self.buffers.normals)
            .map(|(&position, &normal)| Vertex { position, normal })
            .collect()
    }

    /// Lowest and highest Y of the surface, `None` for an empty mesh.
    pub fn height_range(&self) -> Option<(f32, f32)> {
        self.buffers.positions.iter().map(|p| p[1]).fold(None, |acc, y| match acc {
            None => Some((y, y)),
            Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
        })
    }
}

pub struct MeshAssembler;

impl MeshAssembler {
    /// Checks buffer consistency and freezes the buffers into a mesh.
    pub fn assemble(seed: i32, buffers: MeshBuffers) -> Result<TerrainMesh, AssemblyError> {
        let vertices = buffers.positions.len();
        let expected = buffers.rows as usize * buffers.cols as usize;

        if vertices != expected {
            return Err(AssemblyError::VertexCountMismatch {
                rows: buffers.rows,
                cols: buffers.cols,
                expected,
                actual: vertices,
            });
        }
        if buffers.normals.len() != vertices {
            return Err(AssemblyError::NormalCountMismatch {
                vertices,
                normals: buffers.normals.len(),
            });
        }
        if buffers.indices.len() % 3 != 0 {
            return Err(AssemblyError::IncompleteTriangle(buffers.indices.len()));
        }
        if let Some((position, &index)) = buffers
            .indices
            .iter()
            .enumerate()
            .find(|&(_, &index)| index as usize >= vertices)
        {
            return Err(AssemblyError::IndexOutOfRange {
                position,
                index,
                vertices,
            });
        }

        Ok(TerrainMesh {
            id: MeshId::next(),
            seed,
            buffers,
            primitive: PrimitiveTopology::TriangleList,
        })
    }
}
