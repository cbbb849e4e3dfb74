//! Debug rendering helpers: draw-mode cycling and the world axis gizmo.

use std::fmt;

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::constants::AXIS_LENGTH;

/// Viewport debug draw mode, cycled by an input action.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum DebugDrawMode {
    #[default]
    Disabled,
    Wireframe,
    Unshaded,
    Overdraw,
}

impl DebugDrawMode {
    pub fn next(self) -> Self {
        match self {
            DebugDrawMode::Disabled => DebugDrawMode::Wireframe,
            DebugDrawMode::Wireframe => DebugDrawMode::Unshaded,
            DebugDrawMode::Unshaded => DebugDrawMode::Overdraw,
            DebugDrawMode::Overdraw => DebugDrawMode::Disabled,
        }
    }

    pub fn toggle(&mut self) -> Self {
        *self = self.next();
        *self
    }
}

impl fmt::Display for DebugDrawMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DebugDrawMode::Disabled => write!(f, "Disabled"),
            DebugDrawMode::Wireframe => write!(f, "Wireframe"),
            DebugDrawMode::Unshaded => write!(f, "Unshaded"),
            DebugDrawMode::Overdraw => write!(f, "Overdraw"),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// Line-list geometry for the X (red), Y (green) and Z (blue) axes.
pub fn build_axis_gizmo() -> (Vec<LineVertex>, Vec<u32>) {
    let axes = [
        ([AXIS_LENGTH, 0.0, 0.0], [1.0, 0.0, 0.0]),
        ([0.0, AXIS_LENGTH, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, AXIS_LENGTH], [0.0, 0.0, 1.0]),
    ];

    let mut vertices = Vec::with_capacity(6);
    let mut indices = Vec::with_capacity(6);

    for (end, color) in axes {
        let base_idx = vertices.len() as u32;
        vertices.push(LineVertex {
            position: end,
            color,
        });
        vertices.push(LineVertex {
            position: [-end[0], -end[1], -end[2]],
            color,
        });
        indices.extend_from_slice(&[base_idx, base_idx + 1]);
    }

    (vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_mode_cycles() {
        let mut mode = DebugDrawMode::default();
        assert_eq!(mode.toggle(), DebugDrawMode::Wireframe);
        assert_eq!(mode.toggle(), DebugDrawMode::Unshaded);
        assert_eq!(mode.toggle(), DebugDrawMode::Overdraw);
        assert_eq!(mode.toggle(), DebugDrawMode::Disabled);
        assert_eq!(mode.to_string(), "Disabled");
    }

    #[test]
    fn test_axis_gizmo() {
        let (vertices, indices) = build_axis_gizmo();
        assert_eq!(vertices.len(), 6);
        assert_eq!(indices, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(vertices[2].position, [0.0, 50.0, 0.0]);
        assert_eq!(vertices[3].position, [0.0, -50.0, 0.0]);
        assert_eq!(vertices[5].color, [0.0, 0.0, 1.0]);
    }
}
