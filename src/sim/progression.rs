//! Score, leveling and the difficulty ramp
//!
//! Every kill feeds `award_score`; crossing the kill threshold levels up, which
//! shortens the spawn timer and patches up the core.

use super::events::GameEvent;
use super::state::GameState;
use super::timers::TimerKind;
use crate::tuning::Tuning;

/// Spawn delay for a level: base minus a fixed step per level, floored
pub fn spawn_delay_for_level(tuning: &Tuning, level: u32) -> u32 {
    let reduction = tuning.spawn_delay_step_ms.saturating_mul(level);
    tuning
        .base_spawn_delay_ms
        .saturating_sub(reduction)
        .max(tuning.min_spawn_delay_ms)
}

/// Credit one kill worth `points`
pub fn award_score(state: &mut GameState, points: u64) {
    state.score += points;
    state.kills_to_next_level -= 1;
    if state.kills_to_next_level <= 0 {
        level_up(state);
    }
}

/// Advance one level and re-tune difficulty
pub fn level_up(state: &mut GameState) {
    state.level += 1;
    state.kills_to_next_level = state.tuning.kills_for_level(state.level);

    state.spawn_delay_ms = spawn_delay_for_level(&state.tuning, state.level);
    if let Some(id) = state.spawn_timer {
        state.timers.set_delay(id, state.spawn_delay_ms);
    }

    let heal = state.tuning.level_up_heal.max(0);
    state.core_health = (state.core_health + heal).clamp(0, state.tuning.core_max_health);

    state.level_flash = true;
    state.timers.once(TimerKind::LevelFlashExpiry, state.tuning.level_flash_ms);

    log::info!(
        "Level {} reached (spawn delay {} ms, core health {})",
        state.level,
        state.spawn_delay_ms,
        state.core_health
    );
    state.push_event(GameEvent::LevelUp {
        level: state.level,
        spawn_delay_ms: state.spawn_delay_ms,
    });
}

/// Level-up emphasis timer expired
pub fn end_level_flash(state: &mut GameState) {
    state.level_flash = false;
}
