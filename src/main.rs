//! Headless terrain mesh generator
//!
//! Builds a terrain mesh, reports timings and optionally exports the result.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;

use meshgen::utils::settings::{default_settings_path, load_or_default};
use meshgen::ui::{FpsCounter, status_text};
use meshgen::{
    DEFAULT_MESH_FILE, GenerationResult, GenerationTelemetry, HeightMapping, InputState,
    LatticeOrigin, NormalStrategy, SavedMesh, SceneGraph, TerrainGenerator, TerrainLoader,
    TerrainSettings, build_axis_gizmo, save_mesh,
};

/// Procedural terrain mesh generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Settings file (defaults to the platform config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Lattice rows
    #[arg(long)]
    rows: Option<u32>,

    /// Lattice columns
    #[arg(long)]
    cols: Option<u32>,

    /// Spacing between lattice points
    #[arg(long)]
    quad_size: Option<f32>,

    /// Vertical scale of the terrain
    #[arg(long)]
    max_height: Option<f32>,

    /// Fixed noise seed (settings file seed, else random, when omitted)
    #[arg(long, allow_hyphen_values = true)]
    seed: Option<i32>,

    #[arg(long)]
    octaves: Option<i32>,

    #[arg(long)]
    period: Option<f32>,

    #[arg(long)]
    persistence: Option<f32>,

    #[arg(long, value_enum)]
    height_mapping: Option<HeightMapping>,

    #[arg(long, value_enum)]
    origin: Option<LatticeOrigin>,

    #[arg(long, value_enum)]
    normals: Option<NormalStrategy>,

    /// Number of generations to run
    #[arg(long, default_value_t = 1)]
    regenerate: u32,

    /// Build meshes on the background worker
    #[arg(long, default_value_t = false)]
    background: bool,

    /// Write the last mesh to this file
    #[arg(long, num_args = 0..=1, default_missing_value = DEFAULT_MESH_FILE)]
    export: Option<PathBuf>,
}

impl Args {
    fn apply(&self, settings: &mut TerrainSettings) {
        let generation = &mut settings.generation;
        if let Some(rows) = self.rows {
            generation.rows = rows;
        }
        if let Some(cols) = self.cols {
            generation.cols = cols;
        }
        if let Some(quad_size) = self.quad_size {
            generation.quad_size = quad_size;
        }
        if let Some(max_height) = self.max_height {
            generation.max_height = max_height;
        }
        if let Some(height_mapping) = self.height_mapping {
            generation.height_mapping = height_mapping;
        }
        if let Some(origin) = self.origin {
            generation.origin = origin;
        }
        if let Some(normals) = self.normals {
            generation.normals = normals;
        }

        let noise = &mut settings.noise;
        if let Some(seed) = self.seed {
            noise.seed = Some(seed);
        }
        if let Some(octaves) = self.octaves {
            noise.octaves = octaves;
        }
        if let Some(period) = self.period {
            noise.period = period;
        }
        if let Some(persistence) = self.persistence {
            noise.persistence = persistence;
        }
    }
}

fn run(args: Args) -> meshgen::Result<()> {
    let config_path = args.config.clone().or_else(default_settings_path);
    let mut settings = match &config_path {
        Some(path) => load_or_default(path)?,
        None => TerrainSettings::default(),
    };
    args.apply(&mut settings);
    let params = settings.generation.clone();

    let telemetry = GenerationTelemetry::new();
    let mut generator =
        TerrainGenerator::new(SceneGraph::new(), telemetry.clone(), settings.noise.clone())?
            .with_defaults(params.clone())
            .with_seed_source(settings.noise.seed.into());
    let mut loader = if args.background {
        Some(TerrainLoader::new(settings.noise.clone())?)
    } else {
        None
    };

    let mut input = InputState::from_settings(&settings.debug);
    let mut fps = FpsCounter::default();
    let mut last_frame = Instant::now();

    let mut last: Option<GenerationResult> = None;
    for _ in 0..args.regenerate.max(1) {
        let result = match loader.as_mut() {
            Some(loader) => {
                let seed = generator.next_seed(generator.seed_source());
                loader.request(params.clone(), seed)?;
                let built = loader.wait(Duration::from_secs(600)).ok_or_else(|| {
                    meshgen::TerrainError::Worker("timed out waiting for terrain".to_string())
                })??;
                generator.install(built)?
            }
            None => generator.regenerate()?,
        };

        let mesh = &result.mesh;
        let (low, high) = mesh.height_range().unwrap_or((0.0, 0.0));
        println!(
            "seed {:>11}  {} vertices  {} triangles  height {:.2}..{:.2}  {} ms",
            mesh.seed(),
            mesh.vertex_count(),
            mesh.triangle_count(),
            low,
            high,
            result.elapsed_ms()
        );
        last = Some(result);

        let now = Instant::now();
        input.camera.update(now.duration_since(last_frame).as_secs_f32());
        last_frame = now;
        fps.tick(now);
    }

    if settings.debug.show_axes {
        let (vertices, indices) = build_axis_gizmo();
        tracing::debug!(
            "Axis gizmo: {} vertices, {} line segments",
            vertices.len(),
            indices.len() / 2
        );
    }

    if settings.debug.show_status {
        let rate = fps.rate(Instant::now());
        println!("{}", status_text(telemetry.elapsed_ms(), input.debug_mode, rate));
        let eye = input.camera.eye_position();
        println!("Camera eye: ({:.1}, {:.1}, {:.1})", eye.x, eye.y, eye.z);
    }

    if let (Some(path), Some(result)) = (&args.export, &last) {
        save_mesh(path, &SavedMesh::from_mesh(&result.mesh, &params))?;
        tracing::info!("Exported terrain mesh to {}", path.display());
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    tracing::info!("Starting terrain generator...");

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
