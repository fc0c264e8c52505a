//! Deterministic simulation module
//!
//! Everything that affects simulation results lives here:
//! - One unit of simulated time per tick, no delta time
//! - Stable iteration order (by entity ID)
//! - No pacing, output or platform dependencies

pub mod collision;
pub mod error;
pub mod movement;
pub mod scene;
pub mod state;
pub mod store;
pub mod world;

pub use collision::{CollisionResult, ball_wall_collision, collision_system, reflect_velocity};
pub use error::SceneError;
pub use movement::movement_system;
pub use scene::{Scene, SceneObject};
pub use state::{Ball, SimEvent, Wall};
pub use store::{Component, ComponentTable, EntityId, EntityStore};
pub use world::{System, TickContext, World, WorldSnapshot};
