//! Explicit Euler integration, one unit of time per tick

use super::state::{Ball, SimEvent};
use super::store::EntityStore;
use super::world::TickContext;

/// Advance every ball by its velocity
pub fn movement_system(store: &mut EntityStore, ctx: &mut TickContext) {
    for (entity, ball) in store.query::<Ball>() {
        ball.pos += ball.vel;
        log::debug!("ball {} moved to ({}, {})", entity, ball.pos.x, ball.pos.y);
        ctx.events.push(SimEvent::Moved {
            tick: ctx.tick,
            entity,
            pos: ball.pos,
        });
    }
}
