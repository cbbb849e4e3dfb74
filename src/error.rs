use thiserror::Error;

use crate::render::mesh::MeshId;

/// Top-level error for terrain generation and everything around it.
#[derive(Error, Debug)]
pub enum TerrainError {
    #[error("Invalid generation parameters: {0}")]
    InvalidParams(String),

    #[error("Mesh assembly failed: {0}")]
    Assembly(#[from] AssemblyError),

    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Invalid mesh file: {0}")]
    Format(String),

    #[error("Generation worker error: {0}")]
    Worker(String),
}

/// Buffer inconsistencies found while packing a mesh.
///
/// These only occur when the lattice or normal builder is broken, never
/// because of user input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssemblyError {
    #[error("{rows}x{cols} grid needs {expected} vertices, got {actual}")]
    VertexCountMismatch {
        rows: u32,
        cols: u32,
        expected: usize,
        actual: usize,
    },

    #[error("normal count {normals} does not match vertex count {vertices}")]
    NormalCountMismatch { vertices: usize, normals: usize },

    #[error("index count {0} is not a multiple of 3")]
    IncompleteTriangle(usize),

    #[error("index {index} at position {position} is out of range for {vertices} vertices")]
    IndexOutOfRange {
        position: usize,
        index: u32,
        vertices: usize,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    #[error("mesh {0} is already attached")]
    AlreadyAttached(MeshId),

    #[error("mesh {0} is not attached")]
    NotAttached(MeshId),
}

pub type Result<T> = std::result::Result<T, TerrainError>;
