use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::params::{GenerationParams, NoiseConfig};
use crate::error::{Result, TerrainError};
use crate::render::debug::DebugDrawMode;

pub const SETTINGS_FILE: &str = "settings.toml";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct TerrainSettings {
    #[serde(default)]
    pub generation: GenerationParams,
    #[serde(default)]
    pub noise: NoiseConfig,
    #[serde(default)]
    pub debug: DebugSettings,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DebugSettings {
    pub show_status: bool,
    pub show_axes: bool,
    pub draw_mode: DebugDrawMode,
    pub camera_rotation: bool,
}

impl Default for DebugSettings {
    fn default() -> Self {
        Self {
            show_status: true,
            show_axes: true,
            draw_mode: DebugDrawMode::Disabled,
            camera_rotation: true,
        }
    }
}

/// `<config dir>/meshgen/settings.toml`, if the platform has a config dir.
pub fn default_settings_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "meshgen")
        .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
}

pub fn save_settings(path: &Path, settings: &TerrainSettings) -> Result<()> {
    let encoded = toml::to_string_pretty(settings)
        .map_err(|e| TerrainError::Settings(format!("cannot encode settings: {}", e)))?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, encoded)?;
    Ok(())
}

pub fn load_settings(path: &Path) -> Result<TerrainSettings> {
    let text = fs::read_to_string(path)?;
    toml::from_str(&text)
        .map_err(|e| TerrainError::Settings(format!("{}: {}", path.display(), e)))
}

/// Missing file means defaults; a file that exists but does not parse is an error.
pub fn load_or_default(path: &Path) -> Result<TerrainSettings> {
    if !path.exists() {
        tracing::debug!("No settings at {}, using defaults", path.display());
        return Ok(TerrainSettings::default());
    }
    load_settings(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::params::HeightMapping;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("meshgen-settings-{}-{}.toml", name, std::process::id()))
    }

    #[test]
    fn test_round_trip() {
        let mut settings = TerrainSettings::default();
        settings.generation.rows = 64;
        settings.generation.height_mapping = HeightMapping::Positive;
        settings.noise.seed = Some(-17);
        settings.debug.draw_mode = DebugDrawMode::Wireframe;

        let path = temp_path("roundtrip");
        save_settings(&path, &settings).unwrap();
        let loaded = load_settings(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings: TerrainSettings = toml::from_str(
            r#"
            [generation]
            rows = 32
            max_height = 12.5
            "#,
        )
        .unwrap();

        assert_eq!(settings.generation.rows, 32);
        assert_eq!(settings.generation.cols, 256);
        assert_eq!(settings.generation.max_height, 12.5);
        assert_eq!(settings.noise, NoiseConfig::default());
        assert!(settings.debug.camera_rotation);
    }

    #[test]
    fn test_missing_file_is_default() {
        let loaded = load_or_default(&temp_path("missing")).unwrap();
        assert_eq!(loaded, TerrainSettings::default());
    }

    #[test]
    fn test_bad_file_is_an_error() {
        let path = temp_path("bad");
        fs::write(&path, "[generation]\nrows = \"many\"\n").unwrap();
        let result = load_or_default(&path);
        fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(TerrainError::Settings(_))));
    }
}
