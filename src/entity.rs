//! Living entities and the shared list that holds them.
//!
//! The update pass mutates entities under the write lock; drawing takes a
//! snapshot under the read lock and sorts it by Y on its own copy.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use glam::Vec2;
use rand::Rng;

use crate::level::Level;
use crate::tile::TileRegistry;
use crate::tile_effects::{self, TileTrigger};

/// Where new entities appear, in world pixels.
pub const SPAWN_POSITION: Vec2 = Vec2::new(40.0, 200.0);
/// Sprite pixel that sits on the entity's world position.
pub const SPRITE_ANCHOR: Vec2 = Vec2::new(7.0, 15.0);
pub const MAX_HEALTH: f32 = 100.0;
/// Health is kept on a grid of this many steps per point.
pub const HEALTH_STEPS: f32 = 10.0;
/// Game ticks between a wanderer's walk/stop decisions.
pub const WANDER_PERIOD: u64 = 64;
/// Game ticks a spell stays attached to its caster.
pub const SPELL_LIFETIME: u64 = 256;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LookDirection {
    Right,
    Left,
    Up,
    Down,
}

impl LookDirection {
    pub const ALL: [LookDirection; 4] =
        [LookDirection::Right, LookDirection::Left, LookDirection::Up, LookDirection::Down];

    pub fn unit(self) -> Vec2 {
        match self {
            LookDirection::Right => Vec2::X,
            LookDirection::Left => Vec2::NEG_X,
            LookDirection::Up => Vec2::NEG_Y,
            LookDirection::Down => Vec2::Y,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NpcKind {
    Michael,
    Morgen,
    Flan,
    Monobear,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Player,
    Wanderer(NpcKind),
}

impl EntityKind {
    /// Localization key of the entity's class name.
    pub fn class_key(self) -> &'static str {
        match self {
            EntityKind::Player => "entity_player",
            EntityKind::Wanderer(NpcKind::Michael) => "entity_michael",
            EntityKind::Wanderer(NpcKind::Morgen) => "entity_morgen",
            EntityKind::Wanderer(NpcKind::Flan) => "entity_flan",
            EntityKind::Wanderer(NpcKind::Monobear) => "entity_monobear",
        }
    }

    pub fn class_fallback(self) -> &'static str {
        match self {
            EntityKind::Player => "Player",
            EntityKind::Wanderer(NpcKind::Michael) => "Michael",
            EntityKind::Wanderer(NpcKind::Morgen) => "Morgen",
            EntityKind::Wanderer(NpcKind::Flan) => "Flan",
            EntityKind::Wanderer(NpcKind::Monobear) => "Monobear",
        }
    }

    /// Asset path of the entity's sprite, relative to the asset root.
    pub fn sprite_path(self) -> &'static str {
        match self {
            EntityKind::Player => "assets/char2.png",
            EntityKind::Wanderer(NpcKind::Michael) => "assets/michael.png",
            EntityKind::Wanderer(NpcKind::Morgen) => "assets/morgen.png",
            EntityKind::Wanderer(NpcKind::Flan) => "assets/flan.png",
            EntityKind::Wanderer(NpcKind::Monobear) => "assets/monobear.png",
        }
    }

    fn base_speed_modifier(self) -> f32 {
        match self {
            EntityKind::Wanderer(NpcKind::Morgen | NpcKind::Monobear) => 0.75,
            _ => 1.0,
        }
    }
}

// ── Spells ───────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SpellKind {
    MonobearExplosion,
}

/// Transient effect attached to its caster.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Spell {
    pub kind: SpellKind,
    pub created_at: u64,
}

impl Spell {
    pub fn is_expired(&self, tick: u64) -> bool {
        tick.saturating_sub(self.created_at) >= SPELL_LIFETIME
    }

    pub fn label(&self) -> &'static str {
        match self.kind {
            SpellKind::MonobearExplosion => "Monobear Explosion",
        }
    }
}

// ── Entity ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub position: Vec2,
    pub look: LookDirection,
    pub walking: bool,
    pub base_speed: f32,
    /// Modifier the entity returns to whenever no tile overrides it.
    pub base_speed_modifier: f32,
    pub speed_modifier: f32,
    pub health: f32,
    pub spells: Vec<Spell>,
    /// Cell occupied at the end of the previous update, for leave detection.
    pub prev_cell: Option<usize>,
    wander_walking: bool,
}

impl Entity {
    pub fn new(id: EntityId, kind: EntityKind) -> Self {
        let modifier = kind.base_speed_modifier();
        Self {
            id,
            kind,
            position: SPAWN_POSITION,
            look: LookDirection::Down,
            walking: false,
            base_speed: 1.0,
            base_speed_modifier: modifier,
            speed_modifier: modifier,
            health: MAX_HEALTH,
            spells: Vec::new(),
            prev_cell: None,
            wander_walking: false,
        }
    }

    pub fn is_player(&self) -> bool {
        self.kind == EntityKind::Player
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Subtract `amount`, snapping the result to the health grid.
    pub fn damage(&mut self, amount: f32) {
        self.health = ((self.health - amount) * HEALTH_STEPS).round() / HEALTH_STEPS;
    }

    pub fn start_walk(&mut self, look: LookDirection) {
        self.walking = true;
        self.look = look;
    }

    pub fn end_walk(&mut self) {
        self.walking = false;
    }

    /// Pixels moved per tick while walking.
    pub fn speed(&self) -> f32 {
        self.base_speed * self.speed_modifier
    }

    /// Step once in the look direction unless the destination is solid.
    pub fn walk(&mut self, level: &Level, tiles: &TileRegistry) {
        if !self.walking {
            return;
        }
        let next = self.position + self.look.unit() * self.speed();
        if !level.is_solid_at(next, tiles) {
            self.position = next;
        }
    }

    pub fn cast(&mut self, kind: SpellKind, tick: u64) {
        self.spells.push(Spell { kind, created_at: tick });
    }

    /// One simulation step: spells, wandering, walking, then tile effects.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        level: &mut Level,
        tiles: &TileRegistry,
        tick: u64,
        rng: &mut R,
    ) -> Option<TileTrigger> {
        self.spells.retain(|s| !s.is_expired(tick));

        if matches!(self.kind, EntityKind::Wanderer(_)) && tick % WANDER_PERIOD == 0 {
            if self.wander_walking {
                self.end_walk();
            } else {
                let dir = LookDirection::ALL[rng.gen_range(0..LookDirection::ALL.len())];
                self.start_walk(dir);
            }
            self.wander_walking = !self.wander_walking;
        }

        self.walk(level, tiles);
        tile_effects::process_entity(self, level)
    }
}

// ── World ────────────────────────────────────────────────────────────────────

/// The live entity list.
#[derive(Debug, Default)]
pub struct World {
    entities: RwLock<Vec<Entity>>,
    next_id: AtomicU32,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Vec<Entity>> {
        self.entities.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, Vec<Entity>> {
        self.entities.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a new entity at the spawn point and return its id.
    pub fn spawn(&self, kind: EntityKind) -> EntityId {
        let id = EntityId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.write().push(Entity::new(id, kind));
        id
    }

    /// Copy of the list taken under the read lock.
    pub fn snapshot(&self) -> Vec<Entity> {
        self.read().clone()
    }

    pub fn get(&self, id: EntityId) -> Option<Entity> {
        self.read().iter().find(|e| e.id == id).cloned()
    }

    pub fn position_of(&self, id: EntityId) -> Option<Vec2> {
        self.read().iter().find(|e| e.id == id).map(|e| e.position)
    }

    pub fn ids(&self) -> Vec<EntityId> {
        self.read().iter().map(|e| e.id).collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Mutate one entity under the write lock.
    pub fn with_entity<T>(&self, id: EntityId, f: impl FnOnce(&mut Entity) -> T) -> Option<T> {
        self.write().iter_mut().find(|e| e.id == id).map(f)
    }

    /// Drop every entity with health at or below zero, keeping the order of
    /// the survivors. Returns the removed ids.
    pub fn remove_dead(&self) -> Vec<EntityId> {
        let mut list = self.write();
        let dead: Vec<EntityId> = list.iter().filter(|e| e.is_dead()).map(|e| e.id).collect();
        if !dead.is_empty() {
            list.retain(|e| !e.is_dead());
        }
        dead
    }

    pub fn clear(&self) {
        self.write().clear();
    }
}
