//! Rendering-related modules
//! Contains mesh assembly and debug geometry.

pub mod debug;
pub mod mesh;

// Re-export commonly used types
pub use debug::{DebugDrawMode, LineVertex, build_axis_gizmo};
pub use mesh::{MeshAssembler, MeshBuffers, MeshId, PrimitiveTopology, TerrainMesh};
