//! World manager: scene setup and the fixed per-tick system pipeline

use serde::Serialize;

use super::collision::collision_system;
use super::error::SceneError;
use super::movement::movement_system;
use super::scene::{Scene, SceneObject};
use super::state::{Ball, SimEvent, Wall};
use super::store::{EntityId, EntityStore};

/// Per-tick state handed to every system
#[derive(Debug, Default)]
pub struct TickContext {
    /// Current tick number (1-based once the first tick has started)
    pub tick: u64,
    /// Events produced by the current (or most recent) tick
    pub events: Vec<SimEvent>,
}

impl TickContext {
    pub fn new() -> Self {
        Self::default()
    }
}

/// A system runs once per tick against the store
pub type System = fn(&mut EntityStore, &mut TickContext);

/// Systems in execution order. Collision must see post-move positions.
const PIPELINE: [(&str, System); 2] = [
    ("movement", movement_system as System),
    ("collision", collision_system as System),
];

/// Serializable copy of the world at a point in time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub walls: Vec<Wall>,
    pub balls: Vec<(EntityId, Ball)>,
}

/// Owns the entity store and drives the systems
#[derive(Debug)]
pub struct World {
    store: EntityStore,
    ctx: TickContext,
}

impl World {
    /// Spawn one entity per scene object and run the systems setup hook
    pub fn initialize(scene: &Scene) -> Result<Self, SceneError> {
        let mut store = EntityStore::new();

        for object in &scene.objects {
            let entity = store.create_entity();
            match *object {
                SceneObject::Wall { id, start, end } => {
                    store.attach(entity, Wall::new(id, start, end)?);
                }
                SceneObject::Ball { pos, vel, radius } => {
                    store.attach(entity, Ball::new(pos, vel, radius)?);
                }
            }
        }

        let mut world = Self {
            store,
            ctx: TickContext::new(),
        };
        world.init_systems();
        Ok(world)
    }

    /// One-time hook before the first tick; systems are currently stateless
    fn init_systems(&mut self) {
        log::info!(
            "World ready: {} walls, {} balls, systems: {}",
            self.store.count::<Wall>(),
            self.store.count::<Ball>(),
            PIPELINE.map(|(name, _)| name).join(" -> ")
        );
    }

    /// Run every system once, in pipeline order
    ///
    /// Events left over from the previous tick are discarded first.
    pub fn tick(&mut self) {
        self.ctx.tick += 1;
        self.ctx.events.clear();
        for (name, system) in PIPELINE {
            log::trace!("tick {}: running {} system", self.ctx.tick, name);
            system(&mut self.store, &mut self.ctx);
        }
    }

    /// Number of ticks run so far
    pub fn tick_count(&self) -> u64 {
        self.ctx.tick
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn walls(&self) -> impl Iterator<Item = (EntityId, &Wall)> {
        self.store.iter::<Wall>()
    }

    pub fn balls(&self) -> impl Iterator<Item = (EntityId, &Ball)> {
        self.store.iter::<Ball>()
    }

    /// Events produced by the most recent tick
    pub fn events(&self) -> &[SimEvent] {
        &self.ctx.events
    }

    /// Take the pending events
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, SimEvent> {
        self.ctx.events.drain(..)
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            tick: self.ctx.tick,
            walls: self.walls().map(|(_, wall)| *wall).collect(),
            balls: self.balls().map(|(id, ball)| (id, *ball)).collect(),
        }
    }

    /// Release the store and system state
    pub fn shutdown(self) {
        log::info!(
            "World shut down after {} ticks ({} entities released)",
            self.ctx.tick,
            self.store.entity_count()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;

    fn boxed_ball(pos: Vec2, vel: Vec2) -> Scene {
        Scene::square_walls(10.0).with_ball(pos, vel, 1.0)
    }

    fn bounces(events: &[SimEvent]) -> Vec<(u64, u32, Vec2, Vec2)> {
        events
            .iter()
            .filter_map(|e| match *e {
                SimEvent::Bounced {
                    tick,
                    wall_id,
                    vel_before,
                    vel_after,
                    ..
                } => Some((tick, wall_id, vel_before, vel_after)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_initialize_creates_entities() {
        let world = World::initialize(&Scene::enclosure()).unwrap();
        assert_eq!(world.store().entity_count(), 5);
        assert_eq!(world.walls().count(), 4);
        assert_eq!(world.balls().count(), 1);
        assert_eq!(world.tick_count(), 0);

        let ids: Vec<u32> = world.walls().map(|(_, w)| w.id()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_initialize_rejects_zero_length_wall() {
        let p = Vec2::new(1.0, 1.0);
        let scene = Scene::square_walls(10.0).with_wall(5, p, p);
        let err = World::initialize(&scene).unwrap_err();
        assert_eq!(err, SceneError::DegenerateWall { id: 5, point: p });
    }

    #[test]
    fn test_initialize_rejects_bad_radius() {
        let scene = Scene::new().with_ball(Vec2::ZERO, Vec2::ZERO, 0.0);
        assert_eq!(
            World::initialize(&scene).unwrap_err(),
            SceneError::InvalidRadius(0.0)
        );
    }

    #[test]
    fn test_tick_moves_then_collides() {
        // One move lands the ball in contact; the bounce must see the new position
        let scene = boxed_ball(Vec2::new(5.0, -5.0), Vec2::new(4.5, 0.0));
        let mut world = World::initialize(&scene).unwrap();
        world.tick();

        let events = world.events();
        assert!(matches!(events[0], SimEvent::Moved { tick: 1, .. }));
        assert!(matches!(events[1], SimEvent::Bounced { tick: 1, wall_id: 2, .. }));

        let (_, ball) = world.balls().next().unwrap();
        assert_eq!(ball.pos, Vec2::new(9.5, -5.0));
        assert_eq!(ball.vel, Vec2::new(-4.5, 0.0));
    }

    #[test]
    fn test_bounce_off_right_wall() {
        let scene = boxed_ball(Vec2::new(5.0, -5.0), Vec2::new(0.6, 0.0));
        let mut world = World::initialize(&scene).unwrap();

        let mut events = Vec::new();
        for _ in 0..10 {
            world.tick();
            events.extend(world.drain_events());
        }

        let hits = bounces(&events);
        assert_eq!(hits.len(), 1);
        let (tick, wall_id, before, after) = hits[0];
        assert_eq!(tick, 7);
        assert_eq!(wall_id, 2);
        assert!(before.x > 0.0);
        assert!(after.x < 0.0);
        assert!((after.x + before.x).abs() < 1e-6);
        assert_eq!(after.y, 0.0);
    }

    #[test]
    fn test_ball_stays_inside_enclosure() {
        let scene = boxed_ball(Vec2::new(3.3, -4.1), Vec2::new(0.6, 0.4));
        let mut world = World::initialize(&scene).unwrap();

        for _ in 0..500 {
            world.tick();
            world.drain_events();
            let (_, ball) = world.balls().next().unwrap();
            assert!(ball.pos.x > 0.0 && ball.pos.x < 10.0, "x escaped: {}", ball.pos.x);
            assert!(ball.pos.y < 0.0 && ball.pos.y > -10.0, "y escaped: {}", ball.pos.y);
        }
    }

    #[test]
    fn test_literal_enclosure_ball_passes_above() {
        let mut world = World::initialize(&Scene::enclosure()).unwrap();
        let mut events = Vec::new();
        for _ in 0..100 {
            world.tick();
            events.extend(world.drain_events());
        }
        assert!(bounces(&events).is_empty());

        let (_, ball) = world.balls().next().unwrap();
        assert!((ball.pos.x - 55.0).abs() < 1e-3);
        assert_eq!(ball.pos.y, 2.0);
    }

    #[test]
    fn test_zero_velocity_never_moves() {
        let start = Vec2::new(4.0, -6.0);
        let mut world = World::initialize(&boxed_ball(start, Vec2::ZERO)).unwrap();
        for _ in 0..50 {
            world.tick();
        }
        let (_, ball) = world.balls().next().unwrap();
        assert_eq!(ball.pos, start);
        assert_eq!(ball.vel, Vec2::ZERO);
    }

    #[test]
    fn test_undrained_events_do_not_accumulate() {
        let mut world = World::initialize(&Scene::enclosure()).unwrap();
        for _ in 0..10_000 {
            world.tick();
        }
        assert_eq!(world.events().len(), 1);
        assert!(matches!(world.events()[0], SimEvent::Moved { tick: 10_000, .. }));
    }

    #[test]
    fn test_sliver_wall_rejected_before_it_can_bounce() {
        let scene = Scene::new()
            .with_wall(9, Vec2::ZERO, Vec2::new(1e-30, 0.0))
            .with_ball(Vec2::new(0.0, 0.5), Vec2::new(0.6, 0.0), 1.0);
        assert_eq!(
            World::initialize(&scene).unwrap_err(),
            SceneError::DegenerateWall {
                id: 9,
                point: Vec2::ZERO
            }
        );
    }

    #[test]
    fn test_drain_empties_events() {
        let mut world = World::initialize(&Scene::enclosure()).unwrap();
        world.tick();
        assert_eq!(world.drain_events().count(), 1);
        assert!(world.events().is_empty());
    }

    #[test]
    fn test_snapshot_serializes() {
        let world = World::initialize(&Scene::enclosure()).unwrap();
        let json = serde_json::to_value(world.snapshot()).unwrap();
        assert_eq!(json["tick"], 0);
        assert_eq!(json["walls"].as_array().unwrap().len(), 4);
        assert_eq!(json["balls"][0][0], 5);
        world.shutdown();
    }

    proptest! {
        #[test]
        fn prop_walls_never_mutate(
            x in 1.5f32..8.5, y in -8.5f32..-1.5,
            vx in -0.9f32..0.9, vy in -0.9f32..0.9,
            ticks in 1usize..300
        ) {
            let mut world = World::initialize(&boxed_ball(Vec2::new(x, y), Vec2::new(vx, vy))).unwrap();
            let before = world.snapshot().walls;
            for _ in 0..ticks {
                world.tick();
                world.drain_events();
            }
            prop_assert_eq!(world.snapshot().walls, before);
        }

        #[test]
        fn prop_zero_velocity_is_fixed_point(
            x in -20.0f32..20.0, y in -20.0f32..20.0,
            ticks in 1usize..100
        ) {
            let start = Vec2::new(x, y);
            let mut world = World::initialize(&boxed_ball(start, Vec2::ZERO)).unwrap();
            for _ in 0..ticks {
                world.tick();
                world.drain_events();
            }
            let (_, ball) = world.balls().next().unwrap();
            prop_assert_eq!(ball.pos, start);
        }
    }
}
