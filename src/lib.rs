// Core module with parameters and vertex layout
pub mod core;

// Player module with camera rig and input actions
pub mod player;

// Render module with mesh assembly and debug geometry
pub mod render;

// World module with noise, lattice and regeneration
pub mod world;

// HUD text
pub mod ui;

// Other modules
pub mod constants;
pub mod error;
pub mod save;
pub mod scene;
pub mod utils;

// Re-exports
pub use constants::*;
pub use core::{GenerationParams, HeightMapping, LatticeOrigin, NoiseConfig, NormalStrategy, Vertex};
pub use error::{AssemblyError, Result, SceneError, TerrainError};
pub use player::{CameraRig, InputAction, InputState};
pub use render::{
    DebugDrawMode, MeshAssembler, MeshBuffers, MeshId, PrimitiveTopology, TerrainMesh,
    build_axis_gizmo,
};
pub use save::{DEFAULT_MESH_FILE, SavedMesh, load_mesh, save_mesh};
pub use scene::{GenerationTelemetry, Scene, SceneGraph, Telemetry};
pub use utils::TerrainSettings;
pub use world::{
    GenerationResult, GeneratorState, GridTopology, HeightSampler, NoiseField, NormalEstimator,
    SeedSource, TerrainGenerator, TerrainLoader, build_mesh,
};
