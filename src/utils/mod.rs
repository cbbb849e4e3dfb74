pub mod settings;

pub use settings::{DebugSettings, TerrainSettings, load_or_default, load_settings, save_settings};
