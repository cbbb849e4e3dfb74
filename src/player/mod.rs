//! Viewer-side modules
//! Contains the orbit camera and input action dispatch.

pub mod camera;
pub mod input;

// Re-export commonly used types
pub use camera::CameraRig;
pub use input::{InputAction, InputState};
