//! Core data structures for terrain generation
//! Contains generation parameters, noise configuration and the vertex layout.

pub mod params;
pub mod vertex;

// Re-export commonly used types
pub use params::{GenerationParams, HeightMapping, LatticeOrigin, NoiseConfig, NormalStrategy};
pub use vertex::Vertex;
