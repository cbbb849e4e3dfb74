//! Terrain regeneration: seeding, mesh building, timing and the mesh swap
//!
//! `build_mesh` is the pure pipeline (lattice -> indices -> normals -> assembly)
//! and can run on any thread. `TerrainGenerator` owns the noise field, the seed
//! RNG and the injected scene/telemetry collaborators, and is the only thing that
//! ever replaces the live mesh.

use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::core::params::{GenerationParams, NoiseConfig};
use crate::error::{Result, TerrainError};
use crate::render::mesh::{MeshAssembler, MeshBuffers, TerrainMesh};
use crate::scene::{Scene, Telemetry};
use crate::world::grid::GridTopology;
use crate::world::noise::{HeightSampler, NoiseField};
use crate::world::normals::NormalEstimator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorState {
    Idle,
    Generating,
    Ready,
}

/// Where the noise seed of a generation comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedSource {
    /// Draw a fresh seed from the generator's RNG.
    #[default]
    Random,
    Fixed(i32),
}

impl From<Option<i32>> for SeedSource {
    fn from(seed: Option<i32>) -> Self {
        seed.map(SeedSource::Fixed).unwrap_or_default()
    }
}

/// Output of one finished generation.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub mesh: Arc<TerrainMesh>,
    pub elapsed: Duration,
}

impl GenerationResult {
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed.as_millis() as u64
    }
}

/// A mesh built off the controller, waiting to be swapped in.
#[derive(Debug)]
pub struct BuiltTerrain {
    pub mesh: TerrainMesh,
    pub params: GenerationParams,
    pub elapsed: Duration,
}

/// Builds a complete terrain mesh from any height sampler.
pub fn build_mesh<S: HeightSampler + ?Sized>(
    sampler: &S,
    seed: i32,
    params: &GenerationParams,
) -> Result<TerrainMesh> {
    params.validate()?;

    let lattice = GridTopology::build_lattice(params, sampler);
    let indices = GridTopology::build_indices(params.rows, params.cols);
    let normals = NormalEstimator::estimate(params.normals, &lattice, &indices);

    let buffers = MeshBuffers {
        rows: lattice.rows,
        cols: lattice.cols,
        positions: lattice.positions.iter().map(|p| p.to_array()).collect(),
        normals: normals.iter().map(|n| n.to_array()).collect(),
        indices,
    };

    MeshAssembler::assemble(seed, buffers).map_err(|e| {
        tracing::error!("Terrain mesh failed validation: {}", e);
        TerrainError::from(e)
    })
}

pub struct TerrainGenerator<S: Scene, T: Telemetry> {
    noise: NoiseField,
    rng: StdRng,
    scene: S,
    telemetry: T,
    defaults: GenerationParams,
    seed_source: SeedSource,
    active_mesh: Option<Arc<TerrainMesh>>,
    state: GeneratorState,
    elapsed: Option<Duration>,
}

impl<S: Scene, T: Telemetry> TerrainGenerator<S, T> {
    /// Create a generator whose seed RNG is seeded from the OS
    pub fn new(scene: S, telemetry: T, noise: NoiseConfig) -> Result<Self> {
        Self::with_rng(scene, telemetry, noise, StdRng::from_os_rng())
    }

    /// Create a generator with a reproducible sequence of random seeds
    pub fn with_rng_seed(
        scene: S,
        telemetry: T,
        noise: NoiseConfig,
        rng_seed: u64,
    ) -> Result<Self> {
        Self::with_rng(scene, telemetry, noise, StdRng::seed_from_u64(rng_seed))
    }

    fn with_rng(scene: S, telemetry: T, noise: NoiseConfig, rng: StdRng) -> Result<Self> {
        noise.validate()?;
        Ok(TerrainGenerator {
            noise: NoiseField::new(noise),
            rng,
            scene,
            telemetry,
            defaults: GenerationParams::default(),
            seed_source: SeedSource::Random,
            active_mesh: None,
            state: GeneratorState::Idle,
            elapsed: None,
        })
    }

    /// Parameters used by `regenerate`
    pub fn with_defaults(mut self, defaults: GenerationParams) -> Self {
        self.defaults = defaults;
        self
    }

    /// Seed source used by `regenerate` (random unless configured)
    pub fn with_seed_source(mut self, seed_source: SeedSource) -> Self {
        self.seed_source = seed_source;
        self
    }

    /// Regenerate with the default parameters and seed source.
    pub fn regenerate(&mut self) -> Result<GenerationResult> {
        let params = self.defaults.clone();
        self.generate(&params, self.seed_source)
    }

    /// Builds a new mesh and swaps it in place of the current one.
    ///
    /// Invalid parameters are rejected before any state changes. On any later
    /// failure the generator returns to its previous state and the error is
    /// propagated.
    pub fn generate(
        &mut self,
        params: &GenerationParams,
        seed: SeedSource,
    ) -> Result<GenerationResult> {
        params.validate()?;

        let previous = (self.state, self.elapsed);
        self.begin();
        let start = Instant::now();

        let seed = self.next_seed(seed);
        self.noise.reseed(seed);
        tracing::debug!(
            "Generating {}x{} terrain (quad {}, height {}) with seed {}",
            params.rows,
            params.cols,
            params.quad_size,
            params.max_height,
            seed
        );

        let result = build_mesh(&self.noise, seed, params)
            .and_then(|mesh| self.swap_in(Arc::new(mesh)));

        match result {
            Ok(mesh) => Ok(self.finish(mesh, start.elapsed())),
            Err(e) => {
                self.abort(previous);
                Err(e)
            }
        }
    }

    /// Swaps in a mesh built elsewhere (see `TerrainLoader`).
    pub fn install(&mut self, built: BuiltTerrain) -> Result<GenerationResult> {
        let previous = (self.state, self.elapsed);
        self.begin();
        let start = Instant::now();

        let seed = built.mesh.seed();
        match self.swap_in(Arc::new(built.mesh)) {
            Ok(mesh) => {
                self.noise.reseed(seed);
                Ok(self.finish(mesh, built.elapsed + start.elapsed()))
            }
            Err(e) => {
                self.abort(previous);
                Err(e)
            }
        }
    }

    /// Resolves a seed source, drawing from the owned RNG when needed.
    pub fn next_seed(&mut self, source: SeedSource) -> i32 {
        match source {
            SeedSource::Random => self.rng.next_u32() as i32,
            SeedSource::Fixed(seed) => seed,
        }
    }

    fn begin(&mut self) {
        self.state = GeneratorState::Generating;
        self.elapsed = None;
        self.telemetry.generation_started();
    }

    fn finish(&mut self, mesh: Arc<TerrainMesh>, elapsed: Duration) -> GenerationResult {
        self.elapsed = Some(elapsed);
        self.state = GeneratorState::Ready;
        self.telemetry.generation_finished(elapsed);

        tracing::info!(
            "Terrain {} generated in {} ms ({} vertices, {} triangles)",
            mesh.id(),
            elapsed.as_millis(),
            mesh.vertex_count(),
            mesh.triangle_count()
        );

        GenerationResult { mesh, elapsed }
    }

    /// Puts the state from before a failed run back. Without a live mesh the
    /// generator has nothing to show, so it falls back to `Idle`.
    fn abort(&mut self, previous: (GeneratorState, Option<Duration>)) {
        (self.state, self.elapsed) = match self.active_mesh {
            Some(_) => previous,
            None => (GeneratorState::Idle, None),
        };
        self.telemetry.generation_aborted(self.elapsed);
    }

    /// Old mesh leaves the scene before the new one enters it. If the new mesh
    /// is refused, the old one goes back in.
    fn swap_in(&mut self, mesh: Arc<TerrainMesh>) -> Result<Arc<TerrainMesh>> {
        let old = self.active_mesh.take();
        if let Some(old) = &old {
            if let Err(e) = self.scene.detach(old.id()) {
                self.active_mesh = Some(old.clone());
                return Err(e.into());
            }
        }

        if let Err(e) = self.scene.attach(mesh.clone()) {
            if let Some(old) = old {
                match self.scene.attach(old.clone()) {
                    Ok(()) => self.active_mesh = Some(old),
                    Err(reattach) => {
                        tracing::error!(
                            "Terrain {} could not be re-attached: {}",
                            old.id(),
                            reattach
                        );
                    }
                }
            }
            return Err(e.into());
        }

        self.active_mesh = Some(mesh.clone());
        Ok(mesh)
    }

    pub fn state(&self) -> GeneratorState {
        self.state
    }

    /// Duration of the last completed generation, `None` while generating or before the first one.
    pub fn elapsed(&self) -> Option<Duration> {
        self.elapsed
    }

    pub fn elapsed_ms(&self) -> Option<u64> {
        self.elapsed.map(|d| d.as_millis() as u64)
    }

    pub fn active_mesh(&self) -> Option<&Arc<TerrainMesh>> {
        self.active_mesh.as_ref()
    }

    pub fn defaults(&self) -> &GenerationParams {
        &self.defaults
    }

    pub fn seed_source(&self) -> SeedSource {
        self.seed_source
    }

    pub fn noise(&self) -> &NoiseField {
        &self.noise
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn telemetry(&self) -> &T {
        &self.telemetry
    }
}
