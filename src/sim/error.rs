//! Scene validation errors

use glam::Vec2;

/// Reasons a scene object cannot become a component
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SceneError {
    #[error("wall {id} starting at {point} has no usable direction (too short for a unit normal)")]
    DegenerateWall { id: u32, point: Vec2 },

    #[error("wall {id} has a non-finite endpoint")]
    NonFiniteWall { id: u32 },

    #[error("ball radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    #[error("ball has a non-finite position or velocity")]
    NonFiniteBall,
}
