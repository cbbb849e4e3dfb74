use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{Result, TerrainError};

/// How a noise sample in [-1, 1] is mapped onto world height.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum HeightMapping {
    /// Heights span -max_height / 2 ..= max_height / 2.
    #[default]
    Centered,
    /// Heights span 0 ..= max_height.
    Positive,
}

impl HeightMapping {
    pub fn apply(self, sample: f32, max_height: f32) -> f32 {
        let half = max_height / 2.0;
        match self {
            HeightMapping::Centered => sample * half,
            HeightMapping::Positive => sample * half + half,
        }
    }
}

/// Where the lattice sits relative to the world origin.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum LatticeOrigin {
    /// Lattice points sit on cell midpoints, so the grid is symmetric around 0.
    #[default]
    CellCenter,
    /// Lattice starts at -(n * quad_size) / 2 and ends half a cell short of the mirror.
    CellCorner,
}

impl LatticeOrigin {
    /// Offset added to `index * quad_size` along one axis with `count` points.
    pub fn offset(self, count: u32, quad_size: f32) -> f32 {
        let corner = -(count as f32 * quad_size) / 2.0;
        match self {
            LatticeOrigin::CellCenter => corner + quad_size / 2.0,
            LatticeOrigin::CellCorner => corner,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum NormalStrategy {
    /// One row neighbour and one column neighbour per vertex.
    #[default]
    NeighborEdges,
    /// Sum of the face normals of every triangle touching the vertex.
    FaceAverage,
}

/// Lattice shape and world scale of one generated terrain.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GenerationParams {
    pub rows: u32,
    pub cols: u32,
    pub quad_size: f32,
    pub max_height: f32,
    pub height_mapping: HeightMapping,
    pub origin: LatticeOrigin,
    pub normals: NormalStrategy,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            rows: ROW_COUNT,
            cols: COL_COUNT,
            quad_size: QUAD_DIMENSION,
            max_height: MAX_HEIGHT,
            height_mapping: HeightMapping::default(),
            origin: LatticeOrigin::default(),
            normals: NormalStrategy::default(),
        }
    }
}

impl GenerationParams {
    pub fn new(rows: u32, cols: u32, quad_size: f32, max_height: f32) -> Self {
        Self {
            rows,
            cols,
            quad_size,
            max_height,
            ..Self::default()
        }
    }

    /// Rejects parameters that would produce a malformed lattice.
    pub fn validate(&self) -> Result<()> {
        if self.rows < 1 || self.cols < 1 {
            return Err(TerrainError::InvalidParams(format!(
                "grid must be at least 1x1, got {}x{}",
                self.rows, self.cols
            )));
        }
        if !self.quad_size.is_finite() || self.quad_size <= 0.0 {
            return Err(TerrainError::InvalidParams(format!(
                "quad size must be positive, got {}",
                self.quad_size
            )));
        }
        if !self.max_height.is_finite() {
            return Err(TerrainError::InvalidParams(format!(
                "max height must be finite, got {}",
                self.max_height
            )));
        }
        let vertices = self.rows as u64 * self.cols as u64;
        if vertices > u32::MAX as u64 {
            return Err(TerrainError::InvalidParams(format!(
                "{} vertices do not fit a 32-bit index buffer",
                vertices
            )));
        }
        Ok(())
    }

    pub fn vertex_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    pub fn triangle_count(&self) -> usize {
        2 * self.rows.saturating_sub(1) as usize * self.cols.saturating_sub(1) as usize
    }
}

/// Everything that determines the noise function besides the coordinates.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct NoiseConfig {
    /// Fixed seed for every generation; `None` draws a new one each time.
    pub seed: Option<i32>,
    pub octaves: i32,
    pub period: f32,
    pub persistence: f32,
    pub lacunarity: f32,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            seed: None,
            octaves: NOISE_OCTAVES,
            period: NOISE_PERIOD,
            persistence: NOISE_PERSISTENCE,
            lacunarity: NOISE_LACUNARITY,
        }
    }
}

impl NoiseConfig {
    pub fn with_seed(seed: i32) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.octaves < 1 {
            return Err(TerrainError::InvalidParams(format!(
                "octaves must be at least 1, got {}",
                self.octaves
            )));
        }
        if !self.period.is_finite() || self.period <= 0.0 {
            return Err(TerrainError::InvalidParams(format!(
                "noise period must be positive, got {}",
                self.period
            )));
        }
        Ok(())
    }
}
