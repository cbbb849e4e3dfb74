//! Background terrain generation
//!
//! Runs the mesh pipeline on a worker thread so the render/main thread stays
//! responsive. Finished meshes come back over a channel and are swapped in by
//! `TerrainGenerator::install`, which keeps the main thread the only writer of
//! the live mesh. Uses crossbeam channels like the rest of the async plumbing.

use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{
    Receiver, RecvTimeoutError, Sender, TryRecvError, TrySendError, bounded,
};

use crate::constants::LOADER_QUEUE_SIZE;
use crate::core::params::{GenerationParams, NoiseConfig};
use crate::error::{Result, TerrainError};
use crate::world::generator::{BuiltTerrain, build_mesh};
use crate::world::noise::NoiseField;

/// Request for one terrain build
#[derive(Debug, Clone)]
pub struct TerrainRequest {
    pub params: GenerationParams,
    pub seed: i32,
}

/// Manages a background worker that builds terrain meshes
pub struct TerrainLoader {
    request_tx: Sender<TerrainRequest>,
    result_rx: Receiver<Result<BuiltTerrain>>,
    pending: usize,
}

impl TerrainLoader {
    /// Spawn the worker with its own noise field
    pub fn new(noise: NoiseConfig) -> Result<Self> {
        noise.validate()?;

        // Bounded channels prevent unbounded memory growth
        let (request_tx, request_rx) = bounded::<TerrainRequest>(LOADER_QUEUE_SIZE);
        let (result_tx, result_rx) = bounded::<Result<BuiltTerrain>>(LOADER_QUEUE_SIZE);

        // The worker exits once the loader (and with it both channel ends) is dropped
        thread::Builder::new()
            .name("terrain-gen".to_string())
            .spawn(move || {
                let mut field = NoiseField::new(noise);
                while let Ok(req) = request_rx.recv() {
                    let start = Instant::now();
                    field.reseed(req.seed);
                    let result = build_mesh(&field, req.seed, &req.params).map(|mesh| BuiltTerrain {
                        mesh,
                        params: req.params,
                        elapsed: start.elapsed(),
                    });

                    if result_tx.send(result).is_err() {
                        // Loader dropped, exit
                        break;
                    }
                }
                tracing::debug!("Terrain worker shutting down");
            })?;

        Ok(TerrainLoader {
            request_tx,
            result_rx,
            pending: 0,
        })
    }

    /// Queue a build. Fails fast on invalid parameters or a full queue.
    pub fn request(&mut self, params: GenerationParams, seed: i32) -> Result<()> {
        params.validate()?;
        match self.request_tx.try_send(TerrainRequest { params, seed }) {
            Ok(()) => {
                self.pending += 1;
                Ok(())
            }
            Err(TrySendError::Full(_)) => {
                Err(TerrainError::Worker("generation queue is full".to_string()))
            }
            Err(TrySendError::Disconnected(_)) => {
                Err(TerrainError::Worker("generation worker has stopped".to_string()))
            }
        }
    }

    /// Poll for a finished build (non-blocking)
    pub fn poll(&mut self) -> Option<Result<BuiltTerrain>> {
        match self.result_rx.try_recv() {
            Ok(result) => {
                self.pending = self.pending.saturating_sub(1);
                Some(result)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                if self.pending > 0 {
                    self.pending = 0;
                    Some(Err(TerrainError::Worker(
                        "generation worker has stopped".to_string(),
                    )))
                } else {
                    None
                }
            }
        }
    }

    /// Block until the next build finishes or the timeout passes
    pub fn wait(&mut self, timeout: Duration) -> Option<Result<BuiltTerrain>> {
        if self.pending == 0 {
            return None;
        }
        match self.result_rx.recv_timeout(timeout) {
            Ok(result) => {
                self.pending -= 1;
                Some(result)
            }
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                self.pending = 0;
                Some(Err(TerrainError::Worker(
                    "generation worker has stopped".to_string(),
                )))
            }
        }
    }

    /// Get the number of requested builds not yet collected
    pub fn pending_count(&self) -> usize {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{GenerationTelemetry, SceneGraph};
    use crate::world::generator::{SeedSource, TerrainGenerator};

    const TIMEOUT: Duration = Duration::from_secs(30);

    #[test]
    fn test_background_build_matches_synchronous() {
        let params = GenerationParams::new(24, 16, 0.5, 30.0);
        let mut loader = TerrainLoader::new(NoiseConfig::default()).unwrap();
        loader.request(params.clone(), 4242).unwrap();
        assert_eq!(loader.pending_count(), 1);

        let built = loader.wait(TIMEOUT).unwrap().unwrap();
        assert_eq!(loader.pending_count(), 0);

        let mut generator = TerrainGenerator::with_rng_seed(
            SceneGraph::new(),
            GenerationTelemetry::new(),
            NoiseConfig::default(),
            0,
        )
        .unwrap();
        let sync = generator.generate(&params, SeedSource::Fixed(4242)).unwrap();

        assert_eq!(built.mesh.positions(), sync.mesh.positions());
        assert_eq!(built.mesh.indices(), sync.mesh.indices());
        assert_eq!(built.params, params);
    }

    #[test]
    fn test_install_swaps_background_mesh() {
        let mut generator = TerrainGenerator::with_rng_seed(
            SceneGraph::new(),
            GenerationTelemetry::new(),
            NoiseConfig::default(),
            9,
        )
        .unwrap()
        .with_defaults(GenerationParams::new(4, 4, 1.0, 10.0));
        let first = generator.regenerate().unwrap().mesh;

        let mut loader = TerrainLoader::new(NoiseConfig::default()).unwrap();
        let seed = generator.next_seed(SeedSource::Random);
        loader.request(generator.defaults().clone(), seed).unwrap();
        let built = loader.wait(TIMEOUT).unwrap().unwrap();

        let installed = generator.install(built).unwrap();
        assert_eq!(installed.mesh.seed(), seed);
        assert_eq!(generator.noise().seed(), seed);
        assert_eq!(generator.active_mesh().map(|m| m.id()), Some(installed.mesh.id()));
        assert!(!generator.scene().is_attached(first.id()));
        assert_eq!(generator.scene().attached().len(), 1);
    }

    #[test]
    fn test_dead_worker_is_reported() {
        let (request_tx, _request_rx) = bounded(1);
        let (_, result_rx) = bounded(1);
        let mut loader = TerrainLoader {
            request_tx,
            result_rx,
            pending: 1,
        };

        let result = loader.wait(TIMEOUT);
        assert!(matches!(result, Some(Err(TerrainError::Worker(_)))));
        assert_eq!(loader.pending_count(), 0);
    }

    #[test]
    fn test_invalid_request_is_rejected_up_front() {
        let mut loader = TerrainLoader::new(NoiseConfig::default()).unwrap();
        let err = loader
            .request(GenerationParams::new(3, 3, 0.0, 1.0), 1)
            .unwrap_err();
        assert!(matches!(err, TerrainError::InvalidParams(_)));
        assert_eq!(loader.pending_count(), 0);
        assert!(loader.poll().is_none());
    }
}
