//! Core integrity and the terminal game-over transition

use rand::Rng;

use super::combat::drop_powerup;
use super::events::GameEvent;
use super::state::{GamePhase, GameState};

/// An enemy touched the core.
///
/// Ignored after game over or if the enemy is already gone. Returns whether
/// the hit counted.
pub fn enemy_hit_core<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R, enemy_id: u32) -> bool {
    if state.is_game_over() {
        return false;
    }
    let Some(enemy) = state.remove_enemy(enemy_id) else {
        log::debug!("Core contact with unknown enemy #{} ignored", enemy_id);
        return false;
    };

    drop_powerup(state, rng, enemy.pos);
    let damage = state.tuning.core_hit_damage.max(0);
    state.core_health = (state.core_health - damage).clamp(0, state.tuning.core_max_health);
    log::debug!("Core hit by {:?} #{}: health {}", enemy.kind, enemy.id, state.core_health);
    state.push_event(GameEvent::CoreHit {
        enemy_id: enemy.id,
        pos: enemy.pos,
        health: state.core_health,
    });

    if state.core_health <= 0 {
        game_over(state);
    }
    true
}

/// Enter the terminal state: spawning stops for good
pub fn game_over(state: &mut GameState) {
    if state.is_game_over() {
        return;
    }
    state.phase = GamePhase::GameOver;
    if let Some(id) = state.spawn_timer.take() {
        state.timers.cancel(id);
    }
    log::info!("Game over: score {}, level {}", state.score, state.level);
    state.push_event(GameEvent::GameOver {
        score: state.score,
        level: state.level,
    });
}
