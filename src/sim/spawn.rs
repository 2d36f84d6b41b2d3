//! Enemy spawning and Doubt specter wandering
//!
//! Randomness is rolled into a `SpawnPlan` first, then applied. Tests build
//! plans by hand to place enemies exactly.

use glam::Vec2;
use rand::Rng;

use super::events::GameEvent;
use super::state::{Enemy, EnemyKind, GameState};
use super::timers::{TimerId, TimerKind};
use crate::tuning::Tuning;

/// Playfield edge an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];
}

/// Rolled spawn parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPlan {
    pub edge: Edge,
    /// Position along the edge, 0.0 ..= 1.0
    pub along: f32,
    pub kind: EnemyKind,
}

/// Roll edge, position and variant for the next spawn
pub fn roll_spawn<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning, level: u32) -> SpawnPlan {
    let edge = Edge::ALL[rng.random_range(0..Edge::ALL.len())];
    let along = rng.random_range(0.0..=1.0);
    let kind = if level >= tuning.fear_min_level && rng.random_bool(tuning.fear_chance) {
        EnemyKind::Fear
    } else {
        EnemyKind::Doubt
    };
    SpawnPlan { edge, along, kind }
}

/// Spawn point just outside the given edge
pub fn edge_position(edge: Edge, along: f32, width: f32, height: f32, offset: f32) -> Vec2 {
    match edge {
        Edge::Top => Vec2::new(along * width, -offset),
        Edge::Right => Vec2::new(width + offset, along * height),
        Edge::Bottom => Vec2::new(along * width, height + offset),
        Edge::Left => Vec2::new(-offset, along * height),
    }
}

/// Speed for a variant at a level
pub fn enemy_speed(tuning: &Tuning, kind: EnemyKind, level: u32) -> f32 {
    match kind {
        EnemyKind::Fear => tuning.fear_base_speed + level as f32 * tuning.fear_speed_per_level,
        EnemyKind::Doubt => tuning.doubt_base_speed + level as f32 * tuning.doubt_speed_per_level,
    }
}

/// Spawn timer fired: roll and create one enemy
pub fn spawn_enemy<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) -> u32 {
    let plan = roll_spawn(rng, &state.tuning, state.level);
    spawn_planned(state, plan)
}

/// Create an enemy from an explicit plan, aimed at the core
pub fn spawn_planned(state: &mut GameState, plan: SpawnPlan) -> u32 {
    let pos = edge_position(
        plan.edge,
        plan.along.clamp(0.0, 1.0),
        state.width,
        state.height,
        state.tuning.spawn_edge_offset,
    );
    let speed = enemy_speed(&state.tuning, plan.kind, state.level);
    let vel = (state.player.pos - pos).normalize_or_zero() * speed;

    let id = state.next_entity_id();
    state.enemies.push(Enemy {
        id,
        kind: plan.kind,
        pos,
        vel,
        speed,
    });

    if plan.kind == EnemyKind::Doubt {
        state
            .timers
            .repeating(TimerKind::Jitter { enemy_id: id }, state.tuning.jitter_interval_ms);
    }

    log::debug!("Spawned {:?} #{} at ({:.0}, {:.0}) speed {}", plan.kind, id, pos.x, pos.y, speed);
    state.push_event(GameEvent::EnemySpawned {
        id,
        kind: plan.kind,
        pos,
    });
    id
}

/// Jitter timer fired for `enemy_id`.
///
/// A destroyed enemy is a lookup miss: the timer is retired and nothing else
/// happens. Returns whether the enemy was still live.
pub fn jitter_enemy<R: Rng + ?Sized>(
    state: &mut GameState,
    rng: &mut R,
    timer: TimerId,
    enemy_id: u32,
) -> bool {
    let amplitude = state.tuning.jitter_amplitude;
    let Some(enemy) = state.enemy_mut(enemy_id) else {
        state.timers.cancel(timer);
        return false;
    };

    let kick = Vec2::new(
        (rng.random::<f32>() - 0.5) * amplitude,
        (rng.random::<f32>() - 0.5) * amplitude,
    );
    enemy.vel = (enemy.vel + kick).normalize_or_zero() * enemy.speed;
    log::trace!("Jitter #{} -> ({:.1}, {:.1})", enemy_id, enemy.vel.x, enemy.vel.y);
    true
}
