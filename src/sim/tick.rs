//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use glam::Vec2;
use rand::Rng;

use super::combat::{end_attack, trigger_attack};
use super::health::enemy_hit_core;
use super::progression::end_level_flash;
use super::spawn::{jitter_enemy, spawn_enemy};
use super::state::GameState;
use super::timers::{FiredTimer, TimerKind};
use crate::{angle_between, distance_between};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer position in playfield coordinates (weapon aims here)
    pub pointer: Option<Vec2>,
    /// Swing the weapon (pointer down)
    pub attack: bool,
    /// Enemies the host's collision system saw touching the core
    pub core_contacts: Vec<u32>,
    /// Idle/demo mode - AI plays the game
    pub idle_mode: bool,
}

/// Advance the game state by one fixed step of `dt_ms`
pub fn tick<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R, input: &TickInput, dt_ms: u32) {
    state.time_ms += dt_ms as u64;

    // Frozen: only the attack window and level text emphasis still run out
    if state.is_game_over() {
        let fired = state
            .timers
            .advance_filtered(dt_ms, TimerKind::runs_after_game_over);
        run_timers(state, rng, fired);
        return;
    }

    let fired = state.timers.advance(dt_ms);
    run_timers(state, rng, fired);

    // Integrate motion
    let dt = dt_ms as f32 / 1000.0;
    for enemy in &mut state.enemies {
        enemy.pos += enemy.vel * dt;
    }
    for powerup in &mut state.powerups {
        powerup.pos += powerup.vel * dt;
    }

    // Core contacts: host-reported first, then our own overlap check
    for &enemy_id in &input.core_contacts {
        enemy_hit_core(state, rng, enemy_id);
    }
    if state.tuning.detect_core_contacts {
        let reach = state.tuning.core_radius + state.tuning.enemy_radius;
        let core = state.player.pos;
        let touching: Vec<u32> = state
            .enemies
            .iter()
            .filter(|e| distance_between(core, e.pos) <= reach)
            .map(|e| e.id)
            .collect();
        for enemy_id in touching {
            enemy_hit_core(state, rng, enemy_id);
        }
    }
    if state.is_game_over() {
        state.normalize_order();
        return;
    }

    let mut input = input.clone();
    if input.idle_mode {
        autopilot(state, &mut input);
    }

    // Weapon follows the pointer except mid-swing
    if !state.attack.is_attacking {
        if let Some(target) = input.pointer {
            state.player.weapon_angle = angle_between(state.player.pos, target);
        }
    }

    if input.attack {
        trigger_attack(state, rng);
    }

    // Ensure deterministic ordering
    state.normalize_order();
}

/// Dispatch fired timers to their handlers
fn run_timers<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R, fired: Vec<FiredTimer>) {
    for timer in fired {
        match timer.kind {
            TimerKind::Spawn => {
                // A callback earlier in this step may have ended the game
                if !state.is_game_over() {
                    spawn_enemy(state, rng);
                }
            }
            TimerKind::Jitter { enemy_id } => {
                if !state.is_game_over() {
                    jitter_enemy(state, rng, timer.id, enemy_id);
                }
            }
            TimerKind::AttackExpiry => end_attack(state),
            TimerKind::LevelFlashExpiry => end_level_flash(state),
        }
    }
}

/// Demo AI: grab power-ups in reach, otherwise face the nearest enemy and
/// swing once it is inside the attack radius.
fn autopilot(state: &GameState, input: &mut TickInput) {
    let core = state.player.pos;
    let reach = state.tuning.attack_radius;

    let nearest_powerup = state
        .powerups
        .iter()
        .map(|p| (p.pos, distance_between(core, p.pos)))
        .filter(|&(_, d)| d < reach)
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    let nearest_enemy = state
        .enemies
        .iter()
        .map(|e| (e.pos, distance_between(core, e.pos)))
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    if let Some((pos, _)) = nearest_powerup {
        input.pointer = Some(pos);
        input.attack = true;
    } else if let Some((pos, dist)) = nearest_enemy {
        input.pointer = Some(pos);
        // Leave a little margin so the enemy is still inside once the swing lands
        if dist < reach * 0.9 {
            input.attack = true;
        }
    }
}
