//! Terrain generation modules
//! Contains the noise field, lattice topology, normal estimation and the regeneration controller.

pub mod generator;
pub mod grid;
pub mod loader;
pub mod noise;
pub mod normals;

// Re-export commonly used types
pub use generator::{
    BuiltTerrain, GenerationResult, GeneratorState, SeedSource, TerrainGenerator, build_mesh,
};
pub use grid::{GridTopology, Lattice};
pub use loader::{TerrainLoader, TerrainRequest};
pub use noise::{FlatNoise, HeightSampler, NoiseField};
pub use normals::NormalEstimator;
