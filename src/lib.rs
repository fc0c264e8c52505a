//! Wall Bounce - a ball bouncing inside a walled enclosure
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entity store, systems, world)
//! - `driver`: Real-time pacing loop and event sinks
//! - `settings`: Runtime preferences

pub mod driver;
pub mod settings;
pub mod sim;

pub use driver::{Driver, EventSink, LogSink, NullSink, WriterSink};
pub use settings::{OutputFormat, Settings, SettingsError};

use glam::Vec2;

/// Simulation configuration constants
pub mod consts {
    use glam::Vec2;

    /// Real-time delay between ticks (pacing only, not simulated time)
    pub const TICK_INTERVAL_MS: u64 = 100;

    /// Side length of the square enclosure
    pub const ENCLOSURE_SIZE: f32 = 10.0;

    /// Ball defaults
    pub const BALL_START_POS: Vec2 = Vec2::new(-5.0, 2.0);
    pub const BALL_START_VEL: Vec2 = Vec2::new(0.6, 0.0);
    pub const BALL_RADIUS: f32 = 1.0;
}

/// Left-hand perpendicular: `d` rotated 90° counter-clockwise
#[inline]
pub fn perpendicular(d: Vec2) -> Vec2 {
    Vec2::new(-d.y, d.x)
}

/// Projection of `p` onto the segment `start..end`, clamped to [0, 1]
///
/// A zero-length segment yields 0, i.e. the segment collapses to `start`.
#[inline]
pub fn projection_param(p: Vec2, start: Vec2, end: Vec2) -> f32 {
    let d = end - start;
    let len_sq = d.dot(d);
    if len_sq == 0.0 {
        return 0.0;
    }
    ((p - start).dot(d) / len_sq).clamp(0.0, 1.0)
}

/// Closest point to `p` on the finite segment `start..end`
#[inline]
pub fn closest_point_on_segment(p: Vec2, start: Vec2, end: Vec2) -> Vec2 {
    start + (end - start) * projection_param(p, start, end)
}
