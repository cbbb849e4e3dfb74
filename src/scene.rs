//! Collaborators the terrain generator is wired to at construction:
//! the scene that displays meshes and the telemetry sink for timings.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;

use crate::error::SceneError;
use crate::render::mesh::{MeshId, TerrainMesh};

/// Host render tree the generator hands meshes to.
pub trait Scene {
    fn attach(&mut self, mesh: Arc<TerrainMesh>) -> Result<(), SceneError>;
    fn detach(&mut self, id: MeshId) -> Result<(), SceneError>;
}

/// Receives generation timings for display.
pub trait Telemetry {
    fn generation_started(&mut self);
    fn generation_finished(&mut self, elapsed: Duration);
    /// A run failed; `last` is the timing the generator reports again.
    fn generation_aborted(&mut self, last: Option<Duration>);
}

/// Headless scene that keeps attached meshes in a list.
#[derive(Default)]
pub struct SceneGraph {
    attached: Vec<Arc<TerrainMesh>>,
    attach_count: usize,
    detach_count: usize,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attached(&self) -> &[Arc<TerrainMesh>] {
        &self.attached
    }

    pub fn is_attached(&self, id: MeshId) -> bool {
        self.attached.iter().any(|mesh| mesh.id() == id)
    }

    pub fn attach_count(&self) -> usize {
        self.attach_count
    }

    pub fn detach_count(&self) -> usize {
        self.detach_count
    }
}

impl Scene for SceneGraph {
    fn attach(&mut self, mesh: Arc<TerrainMesh>) -> Result<(), SceneError> {
        if self.is_attached(mesh.id()) {
            return Err(SceneError::AlreadyAttached(mesh.id()));
        }
        tracing::debug!("Attaching terrain mesh {}", mesh.id());
        self.attached.push(mesh);
        self.attach_count += 1;
        Ok(())
    }

    fn detach(&mut self, id: MeshId) -> Result<(), SceneError> {
        let position = self
            .attached
            .iter()
            .position(|mesh| mesh.id() == id)
            .ok_or(SceneError::NotAttached(id))?;
        tracing::debug!("Detaching terrain mesh {}", id);
        self.attached.remove(position);
        self.detach_count += 1;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TelemetryState {
    pub elapsed: Option<Duration>,
    pub generations: u64,
}

/// Telemetry sink whose state can be read from another thread (e.g. a HUD).
#[derive(Clone, Default)]
pub struct GenerationTelemetry {
    state: Arc<RwLock<TelemetryState>>,
}

impl GenerationTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> TelemetryState {
        *self.state.read()
    }

    pub fn elapsed_ms(&self) -> Option<u64> {
        self.state.read().elapsed.map(|d| d.as_millis() as u64)
    }
}

impl Telemetry for GenerationTelemetry {
    fn generation_started(&mut self) {
        self.state.write().elapsed = None;
    }

    fn generation_finished(&mut self, elapsed: Duration) {
        let mut state = self.state.write();
        state.elapsed = Some(elapsed);
        state.generations += 1;
    }

    fn generation_aborted(&mut self, last: Option<Duration>) {
        self.state.write().elapsed = last;
    }
}

impl<S: Scene + ?Sized> Scene for Box<S> {
    fn attach(&mut self, mesh: Arc<TerrainMesh>) -> Result<(), SceneError> {
        (**self).attach(mesh)
    }

    fn detach(&mut self, id: MeshId) -> Result<(), SceneError> {
        (**self).detach(id)
    }
}

impl<T: Telemetry + ?Sized> Telemetry for Box<T> {
    fn generation_started(&mut self) {
        (**self).generation_started()
    }

    fn generation_finished(&mut self, elapsed: Duration) {
        (**self).generation_finished(elapsed)
    }

    fn generation_aborted(&mut self, last: Option<Duration>) {
        (**self).generation_aborted(last)
    }
}
