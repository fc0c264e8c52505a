//! Entity store with typed component tables
//!
//! Entities are plain ids. Each component type has its own table, kept sorted
//! by entity id so iteration order is stable from tick to tick.

use std::fmt;

use serde::Serialize;

use super::state::{Ball, Wall};

/// Opaque entity handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct EntityId(u32);

impl EntityId {
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Rows of one component type, sorted by entity id
#[derive(Debug, Clone)]
pub struct ComponentTable<T> {
    rows: Vec<(EntityId, T)>,
}

impl<T> Default for ComponentTable<T> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<T> ComponentTable<T> {
    /// Set the component for `entity`, returning the one it replaced
    pub fn insert(&mut self, entity: EntityId, value: T) -> Option<T> {
        match self.rows.binary_search_by_key(&entity, |(id, _)| *id) {
            Ok(i) => Some(std::mem::replace(&mut self.rows[i].1, value)),
            Err(i) => {
                self.rows.insert(i, (entity, value));
                None
            }
        }
    }

    pub fn get(&self, entity: EntityId) -> Option<&T> {
        self.rows
            .binary_search_by_key(&entity, |(id, _)| *id)
            .ok()
            .map(|i| &self.rows[i].1)
    }

    pub fn get_mut(&mut self, entity: EntityId) -> Option<&mut T> {
        self.rows
            .binary_search_by_key(&entity, |(id, _)| *id)
            .ok()
            .map(|i| &mut self.rows[i].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.rows.iter().map(|(id, value)| (*id, value))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut T)> {
        self.rows.iter_mut().map(|(id, value)| (*id, value))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A payload type that has a table in [`EntityStore`]
///
/// The set of components is closed: each one maps to a concrete field of the
/// store, so lookups never go through runtime type checks.
pub trait Component: Sized + 'static {
    fn table(store: &EntityStore) -> &ComponentTable<Self>;
    fn table_mut(store: &mut EntityStore) -> &mut ComponentTable<Self>;
}

impl Component for Wall {
    fn table(store: &EntityStore) -> &ComponentTable<Self> {
        &store.walls
    }

    fn table_mut(store: &mut EntityStore) -> &mut ComponentTable<Self> {
        &mut store.walls
    }
}

impl Component for Ball {
    fn table(store: &EntityStore) -> &ComponentTable<Self> {
        &store.balls
    }

    fn table_mut(store: &mut EntityStore) -> &mut ComponentTable<Self> {
        &mut store.balls
    }
}

/// Owns every entity and component in the world
#[derive(Debug, Clone)]
pub struct EntityStore {
    next_id: u32,
    entity_count: usize,
    walls: ComponentTable<Wall>,
    balls: ComponentTable<Ball>,
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityStore {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            entity_count: 0,
            walls: ComponentTable::default(),
            balls: ComponentTable::default(),
        }
    }

    /// Allocate a fresh entity with no components
    pub fn create_entity(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.entity_count += 1;
        id
    }

    /// Whether `entity` was issued by this store
    pub fn contains(&self, entity: EntityId) -> bool {
        entity.0 >= 1 && entity.0 < self.next_id
    }

    pub fn entity_count(&self) -> usize {
        self.entity_count
    }

    /// Attach `component`, replacing any existing component of the same type
    pub fn attach<T: Component>(&mut self, entity: EntityId, component: T) -> Option<T> {
        debug_assert!(self.contains(entity), "entity {entity} not issued by this store");
        T::table_mut(self).insert(entity, component)
    }

    pub fn get<T: Component>(&self, entity: EntityId) -> Option<&T> {
        T::table(self).get(entity)
    }

    pub fn get_mut<T: Component>(&mut self, entity: EntityId) -> Option<&mut T> {
        T::table_mut(self).get_mut(entity)
    }

    /// Shared iteration over every entity holding a `T`
    pub fn iter<T: Component>(&self) -> impl Iterator<Item = (EntityId, &T)> {
        T::table(self).iter()
    }

    /// Mutable iteration over every entity holding a `T`
    pub fn query<T: Component>(&mut self) -> impl Iterator<Item = (EntityId, &mut T)> {
        T::table_mut(self).iter_mut()
    }

    pub fn count<T: Component>(&self) -> usize {
        T::table(self).len()
    }

    /// Walls for reading and balls for writing, borrowed together
    pub fn walls_and_balls_mut(&mut self) -> (&ComponentTable<Wall>, &mut ComponentTable<Ball>) {
        (&self.walls, &mut self.balls)
    }
}
