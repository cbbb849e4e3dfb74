//! On-screen status text: generation time, debug draw mode and frame rate.

use std::time::{Duration, Instant};

use crate::render::debug::DebugDrawMode;

/// Frame counter averaged over one-second windows.
pub struct FpsCounter {
    frame_count: u32,
    last_fps_update: Instant,
    current_fps: f32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new(Instant::now())
    }
}

impl FpsCounter {
    pub fn new(now: Instant) -> Self {
        FpsCounter {
            frame_count: 0,
            last_fps_update: now,
            current_fps: 0.0,
        }
    }

    /// Count a frame presented at `now`.
    pub fn tick(&mut self, now: Instant) -> f32 {
        self.frame_count += 1;
        let window = now.saturating_duration_since(self.last_fps_update);
        if window >= Duration::from_secs(1) {
            self.current_fps = self.frame_count as f32 / window.as_secs_f32();
            self.frame_count = 0;
            self.last_fps_update = now;
        }
        self.current_fps
    }

    pub fn fps(&self) -> f32 {
        self.current_fps
    }

    /// Rate over the window still in progress, or the last full window if
    /// no frame has landed in it yet.
    pub fn rate(&self, now: Instant) -> f32 {
        let window = now.saturating_duration_since(self.last_fps_update);
        if self.frame_count == 0 || window.is_zero() {
            return self.current_fps;
        }
        self.frame_count as f32 / window.as_secs_f32()
    }
}

pub fn status_text(elapsed_ms: Option<u64>, debug_mode: DebugDrawMode, fps: f32) -> String {
    let generation = match elapsed_ms {
        Some(ms) => format!("Generated in {}", ms),
        None => "Generating terrain...".to_string(),
    };
    format!(
        "{}\nDebug render mode: {}\nFPS: {:.0}",
        generation, debug_mode, fps
    )
}
