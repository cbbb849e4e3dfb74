//! HUD text for the terrain viewer.

pub mod status;

pub use status::{FpsCounter, status_text};
