//! Component payloads and simulation events
//!
//! Walls are validated on construction and immutable afterwards; balls keep
//! their radius fixed while position and velocity change every tick.

use std::fmt;

use glam::Vec2;
use serde::Serialize;

use super::error::SceneError;
use super::store::EntityId;
use crate::perpendicular;

/// A directed wall segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Wall {
    id: u32,
    start: Vec2,
    end: Vec2,
    #[serde(skip)]
    normal: Vec2,
}

impl Wall {
    /// Build a wall, rejecting non-finite segments and any segment whose
    /// normal cannot be computed (zero length, or so short it underflows)
    pub fn new(id: u32, start: Vec2, end: Vec2) -> Result<Self, SceneError> {
        if !start.is_finite() || !end.is_finite() {
            return Err(SceneError::NonFiniteWall { id });
        }
        let normal = perpendicular(end - start)
            .try_normalize()
            .ok_or(SceneError::DegenerateWall { id, point: start })?;
        Ok(Self {
            id,
            start,
            end,
            normal,
        })
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[inline]
    pub fn start(&self) -> Vec2 {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Vec2 {
        self.end
    }

    /// Direction vector `end - start`
    #[inline]
    pub fn direction(&self) -> Vec2 {
        self.end - self.start
    }

    /// Unit normal: the direction rotated 90° counter-clockwise
    #[inline]
    pub fn normal(&self) -> Vec2 {
        self.normal
    }
}

/// A ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    radius: f32,
}

impl Ball {
    /// Build a ball, rejecting non-positive radii and non-finite vectors
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Result<Self, SceneError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(SceneError::InvalidRadius(radius));
        }
        if !pos.is_finite() || !vel.is_finite() {
            return Err(SceneError::NonFiniteBall);
        }
        Ok(Self { pos, vel, radius })
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }
}

/// Observable things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SimEvent {
    /// A ball advanced to a new position
    Moved { tick: u64, entity: EntityId, pos: Vec2 },
    /// A ball touched a wall and had its velocity reflected
    Bounced {
        tick: u64,
        entity: EntityId,
        wall_id: u32,
        vel_before: Vec2,
        vel_after: Vec2,
    },
}

impl SimEvent {
    /// Tick the event was produced in
    pub fn tick(&self) -> u64 {
        match self {
            SimEvent::Moved { tick, .. } | SimEvent::Bounced { tick, .. } => *tick,
        }
    }
}

impl fmt::Display for SimEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimEvent::Moved { tick, entity, pos } => {
                write!(f, "tick {tick}: ball {entity} moved to ({:.3}, {:.3})", pos.x, pos.y)
            }
            SimEvent::Bounced {
                tick,
                entity,
                wall_id,
                vel_after,
                ..
            } => write!(
                f,
                "tick {tick}: ball {entity} bounced off wall {wall_id}, velocity now ({:.3}, {:.3})",
                vel_after.x, vel_after.y
            ),
        }
    }
}
