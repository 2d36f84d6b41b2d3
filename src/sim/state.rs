//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in `GameState`. No globals.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::events::GameEvent;
use super::timers::{Scheduler, TimerId, TimerKind};
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Core alive, enemies spawning
    Playing,
    /// Core destroyed; terminal
    GameOver,
}

/// Enemy variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Slow wanderer, heading jittered every half second
    Doubt,
    /// Fast, straight line toward where the core was at spawn
    Fear,
}

/// A specter closing in on the core
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Speed the velocity is renormalized to after jitter
    pub speed: f32,
}

/// Power-up variants (only one exists)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerupKind {
    /// Clears every enemy on pickup
    Catharsis,
}

/// A drifting power-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Powerup {
    pub id: u32,
    pub kind: PowerupKind,
    pub pos: Vec2,
    pub vel: Vec2,
}

/// The core the player defends, and the weapon orbiting it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Fixed position (immovable)
    pub pos: Vec2,
    /// Weapon orientation (radians)
    pub weapon_angle: f32,
}

/// Melee attack window
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttackState {
    pub is_attacking: bool,
    /// Weapon angle captured when the attack was triggered
    pub angle: f32,
    pub radius: f32,
    /// Full arc width (radians)
    pub arc: f32,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Simulation clock
    pub time_ms: u64,
    pub width: f32,
    pub height: f32,
    pub player: Player,
    pub attack: AttackState,
    pub core_health: i32,
    pub score: u64,
    pub level: u32,
    pub kills_to_next_level: i32,
    pub spawn_delay_ms: u32,
    /// Level text emphasized after a level-up
    pub level_flash: bool,
    /// Live enemies (sorted by id for determinism)
    pub enemies: Vec<Enemy>,
    /// Live power-ups (sorted by id for determinism)
    pub powerups: Vec<Powerup>,
    pub timers: Scheduler,
    /// Spawn timer handle; `None` once the game is over
    pub spawn_timer: Option<TimerId>,
    /// Intents produced since the last drain (not persisted)
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed and tuning
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        let width = tuning.playfield_width;
        let height = tuning.playfield_height;

        let mut timers = Scheduler::new();
        let spawn_timer = timers.repeating(TimerKind::Spawn, tuning.base_spawn_delay_ms);

        Self {
            seed,
            phase: GamePhase::Playing,
            time_ms: 0,
            width,
            height,
            player: Player {
                pos: Vec2::new(width / 2.0, height / 2.0),
                weapon_angle: 0.0,
            },
            attack: AttackState::default(),
            core_health: tuning.core_max_health,
            score: 0,
            level: 1,
            kills_to_next_level: tuning.initial_kills_to_next_level.max(1),
            spawn_delay_ms: tuning.base_spawn_delay_ms,
            level_flash: false,
            enemies: Vec::new(),
            powerups: Vec::new(),
            timers,
            spawn_timer: Some(spawn_timer),
            events: Vec::new(),
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID (never reused)
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn enemy(&self, id: u32) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn enemy_mut(&mut self, id: u32) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|e| e.id == id)
    }

    /// Remove an enemy from the registry, returning it if it was live
    pub fn remove_enemy(&mut self, id: u32) -> Option<Enemy> {
        let idx = self.enemies.iter().position(|e| e.id == id)?;
        Some(self.enemies.remove(idx))
    }

    /// Remove a power-up from the registry, returning it if it was live
    pub fn remove_powerup(&mut self, id: u32) -> Option<Powerup> {
        let idx = self.powerups.iter().position(|p| p.id == id)?;
        Some(self.powerups.remove(idx))
    }

    /// Insert an enemy directly (hosts and tests placing entities by hand)
    pub fn insert_enemy(&mut self, kind: EnemyKind, pos: Vec2, vel: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.enemies.push(Enemy {
            id,
            kind,
            pos,
            vel,
            speed: vel.length(),
        });
        id
    }

    /// Insert a Catharsis power-up directly
    pub fn insert_powerup(&mut self, pos: Vec2, vel: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.powerups.push(Powerup {
            id,
            kind: PowerupKind::Catharsis,
            pos,
            vel,
        });
        id
    }

    /// Resize the playfield. The core stays where it is; only spawn edges move.
    pub fn set_playfield(&mut self, width: f32, height: f32) {
        self.width = width.max(1.0);
        self.height = height.max(1.0);
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending intents
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Ensure registries are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.enemies.sort_by_key(|e| e.id);
        self.powerups.sort_by_key(|p| p.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(7, Tuning::default());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.core_health, 100);
        assert_eq!(state.level, 1);
        assert_eq!(state.kills_to_next_level, 10);
        assert_eq!(state.spawn_delay_ms, 2000);
        assert_eq!(state.player.pos, Vec2::new(400.0, 300.0));
        assert!(state.spawn_timer.is_some_and(|id| state.timers.contains(id)));
    }

    #[test]
    fn test_ids_never_reused() {
        let mut state = GameState::new(7, Tuning::default());
        let a = state.insert_enemy(EnemyKind::Doubt, Vec2::ZERO, Vec2::X);
        assert!(state.remove_enemy(a).is_some());
        assert!(state.remove_enemy(a).is_none());
        let b = state.insert_enemy(EnemyKind::Fear, Vec2::ZERO, Vec2::X);
        assert_ne!(a, b);
    }

    #[test]
    fn test_set_playfield_keeps_core() {
        let mut state = GameState::new(7, Tuning::default());
        state.set_playfield(1024.0, 768.0);
        assert_eq!(state.width, 1024.0);
        assert_eq!(state.player.pos, Vec2::new(400.0, 300.0));
    }
}
