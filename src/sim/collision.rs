//! Collision detection and response for wall segments
//!
//! A ball touches a wall when the closest point on the finite segment lies
//! within its radius (tangency counts). Response is a pure velocity
//! reflection about the wall normal; positions are never corrected.

use glam::Vec2;

use super::state::{SimEvent, Wall};
use super::store::EntityStore;
use super::world::TickContext;
use crate::closest_point_on_segment;

/// Result of a collision check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Closest point on the wall to the ball center
    pub point: Vec2,
    /// Unit wall normal (zero on a miss)
    pub normal: Vec2,
    /// Distance from the ball center to `point`
    pub distance: f32,
}

impl CollisionResult {
    pub fn miss(point: Vec2, distance: f32) -> Self {
        Self {
            hit: false,
            point,
            normal: Vec2::ZERO,
            distance,
        }
    }
}

/// Check a ball against a single wall segment
pub fn ball_wall_collision(ball_pos: Vec2, ball_radius: f32, wall: &Wall) -> CollisionResult {
    let point = closest_point_on_segment(ball_pos, wall.start(), wall.end());
    let distance = point.distance(ball_pos);

    if distance <= ball_radius {
        CollisionResult {
            hit: true,
            point,
            normal: wall.normal(),
            distance,
        }
    } else {
        CollisionResult::miss(point, distance)
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Test every (ball, wall) pair and reflect on contact
///
/// Contacts with several walls in one tick reflect in sequence, in wall
/// entity order.
pub fn collision_system(store: &mut EntityStore, ctx: &mut TickContext) {
    let (walls, balls) = store.walls_and_balls_mut();
    if walls.is_empty() {
        return;
    }

    for (entity, ball) in balls.iter_mut() {
        for (_, wall) in walls.iter() {
            let result = ball_wall_collision(ball.pos, ball.radius(), wall);
            if !result.hit {
                continue;
            }

            let vel_before = ball.vel;
            ball.vel = reflect_velocity(ball.vel, result.normal);
            log::info!(
                "ball {} bounced off wall {} at ({}, {})",
                entity,
                wall.id(),
                result.point.x,
                result.point.y
            );
            ctx.events.push(SimEvent::Bounced {
                tick: ctx.tick,
                entity,
                wall_id: wall.id(),
                vel_before,
                vel_after: ball.vel,
            });
        }
    }
}
