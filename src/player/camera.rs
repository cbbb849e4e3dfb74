use glam::{Mat4, Vec3};

use crate::constants::CAMERA_ROTATION_SPEED;

/// Orbit camera circling the terrain origin.
pub struct CameraRig {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub enable_rotation: bool,
}

impl Default for CameraRig {
    fn default() -> Self {
        CameraRig {
            yaw: 0.0,
            pitch: -0.6,
            distance: 120.0,
            enable_rotation: true,
        }
    }
}

impl CameraRig {
    pub fn toggle_rotation(&mut self) -> bool {
        self.enable_rotation = !self.enable_rotation;
        self.enable_rotation
    }

    /// Advance the auto-rotation by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        if self.enable_rotation {
            self.yaw = (self.yaw + CAMERA_ROTATION_SPEED * dt) % std::f32::consts::TAU;
        }
    }

    pub fn eye_position(&self) -> Vec3 {
        let horizontal = self.distance * self.pitch.cos();
        Vec3::new(
            horizontal * self.yaw.sin(),
            -self.distance * self.pitch.sin(),
            horizontal * self.yaw.cos(),
        )
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye_position(), Vec3::ZERO, Vec3::Y)
    }
}
