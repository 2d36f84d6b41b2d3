//! Simulation intents and cosmetic effect hooks
//!
//! Sim functions push `GameEvent`s instead of drawing anything. A presentation
//! layer drains them each frame, or implements `EffectHooks` and lets
//! `GameEvent::dispatch` route them. Hooks never feed back into the simulation.

use glam::Vec2;

use super::state::EnemyKind;

/// Why an enemy died
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KillCause {
    /// Caught inside the melee arc
    Melee,
    /// Swept away by a Catharsis pickup
    Catharsis,
}

/// Something that happened during a tick or call
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    EnemySpawned { id: u32, kind: EnemyKind, pos: Vec2 },
    EnemyKilled { id: u32, kind: EnemyKind, pos: Vec2, cause: KillCause },
    PowerupDropped { id: u32, pos: Vec2 },
    PowerupCollected { id: u32, pos: Vec2, enemies_cleared: u32 },
    /// An enemy reached the core; `health` is what remains
    CoreHit { enemy_id: u32, pos: Vec2, health: i32 },
    LevelUp { level: u32, spawn_delay_ms: u32 },
    AttackStarted { angle: f32 },
    AttackEnded,
    GameOver { score: u64, level: u32 },
}

/// Cosmetic feedback callbacks (flashes, shakes, tints)
///
/// Every method defaults to a no-op so hosts implement only what they draw.
pub trait EffectHooks {
    fn on_enemy_killed(&mut self, _pos: Vec2) {}
    fn on_core_hit(&mut self) {}
    fn on_level_up(&mut self, _level: u32) {}
    fn on_game_over(&mut self) {}
    fn on_powerup_collected(&mut self, _pos: Vec2) {}
}

impl GameEvent {
    /// Route this event to the matching hook (events without a hook are skipped)
    pub fn dispatch<H: EffectHooks + ?Sized>(&self, hooks: &mut H) {
        match *self {
            GameEvent::EnemyKilled { pos, .. } => hooks.on_enemy_killed(pos),
            GameEvent::CoreHit { .. } => hooks.on_core_hit(),
            GameEvent::LevelUp { level, .. } => hooks.on_level_up(level),
            GameEvent::GameOver { .. } => hooks.on_game_over(),
            GameEvent::PowerupCollected { pos, .. } => hooks.on_powerup_collected(pos),
            GameEvent::EnemySpawned { .. }
            | GameEvent::PowerupDropped { .. }
            | GameEvent::AttackStarted { .. }
            | GameEvent::AttackEnded => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        kills: Vec<Vec2>,
        core_hits: u32,
        levels: Vec<u32>,
        game_overs: u32,
    }

    impl EffectHooks for Recorder {
        fn on_enemy_killed(&mut self, pos: Vec2) {
            self.kills.push(pos);
        }
        fn on_core_hit(&mut self) {
            self.core_hits += 1;
        }
        fn on_level_up(&mut self, level: u32) {
            self.levels.push(level);
        }
        fn on_game_over(&mut self) {
            self.game_overs += 1;
        }
    }

    #[test]
    fn test_dispatch_routes_to_hooks() {
        let events = [
            GameEvent::EnemyKilled {
                id: 1,
                kind: EnemyKind::Doubt,
                pos: Vec2::new(3.0, 4.0),
                cause: KillCause::Melee,
            },
            GameEvent::CoreHit { enemy_id: 2, pos: Vec2::ZERO, health: 90 },
            GameEvent::LevelUp { level: 2, spawn_delay_ms: 1800 },
            GameEvent::AttackEnded,
            GameEvent::GameOver { score: 10, level: 2 },
            // No override: default no-op
            GameEvent::PowerupCollected { id: 3, pos: Vec2::ZERO, enemies_cleared: 0 },
        ];

        let mut recorder = Recorder::default();
        for event in &events {
            event.dispatch(&mut recorder);
        }

        assert_eq!(recorder.kills, vec![Vec2::new(3.0, 4.0)]);
        assert_eq!(recorder.core_hits, 1);
        assert_eq!(recorder.levels, vec![2]);
        assert_eq!(recorder.game_overs, 1);
    }
}
