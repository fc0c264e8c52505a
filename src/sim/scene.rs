//! Scene descriptions turned into entities by [`World::initialize`]
//!
//! [`World::initialize`]: super::World::initialize

use glam::Vec2;

use crate::consts::*;

/// One object to spawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneObject {
    Wall { id: u32, start: Vec2, end: Vec2 },
    Ball { pos: Vec2, vel: Vec2, radius: f32 },
}

/// An ordered list of objects to spawn
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub objects: Vec<SceneObject>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_wall(mut self, id: u32, start: Vec2, end: Vec2) -> Self {
        self.objects.push(SceneObject::Wall { id, start, end });
        self
    }

    pub fn with_ball(mut self, pos: Vec2, vel: Vec2, radius: f32) -> Self {
        self.objects.push(SceneObject::Ball { pos, vel, radius });
        self
    }

    /// Four walls forming a square with its top-left corner at the origin
    ///
    /// Walls are numbered 1..=4 clockwise starting from the top edge.
    pub fn square_walls(size: f32) -> Self {
        let top_left = Vec2::ZERO;
        let top_right = Vec2::new(size, 0.0);
        let bottom_right = Vec2::new(size, -size);
        let bottom_left = Vec2::new(0.0, -size);
        Self::new()
            .with_wall(1, top_left, top_right)
            .with_wall(2, top_right, bottom_right)
            .with_wall(3, bottom_right, bottom_left)
            .with_wall(4, bottom_left, top_left)
    }

    /// The fixed startup scene: a 10x10 enclosure and one ball
    pub fn enclosure() -> Self {
        Self::square_walls(ENCLOSURE_SIZE).with_ball(BALL_START_POS, BALL_START_VEL, BALL_RADIUS)
    }

    pub fn wall_count(&self) -> usize {
        self.objects
            .iter()
            .filter(|o| matches!(o, SceneObject::Wall { .. }))
            .count()
    }

    pub fn ball_count(&self) -> usize {
        self.objects.len() - self.wall_count()
    }
}
