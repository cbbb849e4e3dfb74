use std::str::FromStr;

use crate::constants::*;
use crate::error::{Result, TerrainError};
use crate::player::camera::CameraRig;
use crate::render::debug::DebugDrawMode;
use crate::scene::{Scene, Telemetry};
use crate::utils::settings::DebugSettings;
use crate::world::generator::{GenerationResult, TerrainGenerator};

/// Named actions the viewer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Regenerate,
    ToggleDebugDraw,
    ToggleCameraRotation,
}

impl InputAction {
    pub fn name(self) -> &'static str {
        match self {
            InputAction::Regenerate => ACTION_TERRAIN_GENERATE,
            InputAction::ToggleDebugDraw => ACTION_DEBUG_TOGGLE,
            InputAction::ToggleCameraRotation => ACTION_CAMERA_ROTATE_TOGGLE,
        }
    }
}

impl FromStr for InputAction {
    type Err = TerrainError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            ACTION_TERRAIN_GENERATE => Ok(InputAction::Regenerate),
            ACTION_DEBUG_TOGGLE => Ok(InputAction::ToggleDebugDraw),
            ACTION_CAMERA_ROTATE_TOGGLE => Ok(InputAction::ToggleCameraRotation),
            other => Err(TerrainError::Settings(format!("unknown input action '{}'", other))),
        }
    }
}

/// View state owned by the input side, handed to the dispatcher explicitly.
#[derive(Default)]
pub struct InputState {
    pub debug_mode: DebugDrawMode,
    pub camera: CameraRig,
}

impl InputState {
    /// Initial view state from the debug section of the settings file.
    pub fn from_settings(settings: &DebugSettings) -> Self {
        let mut state = InputState {
            debug_mode: settings.draw_mode,
            ..Default::default()
        };
        state.camera.enable_rotation = settings.camera_rotation;
        state
    }

    /// Route one action. Only `Regenerate` produces a generation result.
    pub fn dispatch<S: Scene, T: Telemetry>(
        &mut self,
        action: InputAction,
        generator: &mut TerrainGenerator<S, T>,
    ) -> Result<Option<GenerationResult>> {
        match action {
            InputAction::Regenerate => generator.regenerate().map(Some),
            InputAction::ToggleDebugDraw => {
                let mode = self.debug_mode.toggle();
                tracing::debug!("Debug draw mode: {}", mode);
                Ok(None)
            }
            InputAction::ToggleCameraRotation => {
                let enabled = self.camera.toggle_rotation();
                tracing::debug!("Camera rotation enabled: {}", enabled);
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::params::{GenerationParams, NoiseConfig};
    use crate::scene::{GenerationTelemetry, SceneGraph};

    #[test]
    fn test_parse_action_names() {
        for action in [
            InputAction::Regenerate,
            InputAction::ToggleDebugDraw,
            InputAction::ToggleCameraRotation,
        ] {
            assert_eq!(action.name().parse::<InputAction>().unwrap(), action);
        }
        assert!("jump".parse::<InputAction>().is_err());
    }

    #[test]
    fn test_state_from_settings() {
        let settings = DebugSettings {
            draw_mode: DebugDrawMode::Unshaded,
            camera_rotation: false,
            ..DebugSettings::default()
        };
        let mut input = InputState::from_settings(&settings);
        assert_eq!(input.debug_mode, DebugDrawMode::Unshaded);
        assert!(!input.camera.enable_rotation);

        input.camera.update(4.0);
        assert_eq!(input.camera.yaw, 0.0);
    }

    #[test]
    fn test_dispatch() {
        let mut generator = TerrainGenerator::with_rng_seed(
            SceneGraph::new(),
            GenerationTelemetry::new(),
            NoiseConfig::default(),
            5,
        )
        .unwrap()
        .with_defaults(GenerationParams::new(4, 4, 1.0, 4.0));
        let mut input = InputState::default();

        let result = input
            .dispatch(InputAction::Regenerate, &mut generator)
            .unwrap();
        assert!(result.is_some());
        assert_eq!(generator.scene().attached().len(), 1);

        input
            .dispatch(InputAction::ToggleDebugDraw, &mut generator)
            .unwrap();
        assert_eq!(input.debug_mode, DebugDrawMode::Wireframe);

        input
            .dispatch(InputAction::ToggleCameraRotation, &mut generator)
            .unwrap();
        assert!(!input.camera.enable_rotation);
    }
}
