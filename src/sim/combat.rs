//! Melee attack resolution and Catharsis power-ups
//!
//! An attack sweeps a quarter-circle wedge around the core. Enemies need to be
//! inside the wedge; power-ups only need to be within reach.

use glam::Vec2;
use rand::Rng;

use super::events::{GameEvent, KillCause};
use super::progression::award_score;
use super::state::{GameState, PowerupKind};
use super::timers::TimerKind;
use crate::{angle_between, distance_between, wrap_angle};

/// Is `target` inside the attack wedge centered on `origin`?
pub fn in_attack_arc(
    origin: Vec2,
    target: Vec2,
    attack_angle: f32,
    radius: f32,
    half_arc: f32,
) -> bool {
    let distance = distance_between(origin, target);
    let offset = wrap_angle(angle_between(origin, target) - attack_angle);
    distance < radius && offset.abs() < half_arc
}

/// Pointer-down: swing the weapon.
///
/// Rejected while a swing is in flight or after game over. Returns whether
/// the attack happened.
pub fn trigger_attack<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) -> bool {
    if state.attack.is_attacking || state.is_game_over() {
        log::debug!(
            "Attack ignored (attacking: {}, phase: {:?})",
            state.attack.is_attacking,
            state.phase
        );
        return false;
    }

    let origin = state.player.pos;
    let angle = state.player.weapon_angle;
    let radius = state.tuning.attack_radius;
    let half_arc = state.tuning.attack_half_arc();

    state.attack.is_attacking = true;
    state.attack.angle = angle;
    state.attack.radius = radius;
    state.attack.arc = state.tuning.attack_arc;
    state.timers.once(TimerKind::AttackExpiry, state.tuning.attack_duration_ms);
    state.push_event(GameEvent::AttackStarted { angle });

    // Melee pass. Positions don't move during resolution, so pick victims first.
    let victims: Vec<u32> = state
        .enemies
        .iter()
        .filter(|e| in_attack_arc(origin, e.pos, angle, radius, half_arc))
        .map(|e| e.id)
        .collect();

    let points = state.tuning.kill_score;
    for id in &victims {
        let Some(enemy) = state.remove_enemy(*id) else {
            continue;
        };
        drop_powerup(state, rng, enemy.pos);
        state.push_event(GameEvent::EnemyKilled {
            id: enemy.id,
            kind: enemy.kind,
            pos: enemy.pos,
            cause: KillCause::Melee,
        });
        award_score(state, points);
    }

    // Pickup pass, including anything the melee pass just dropped
    let pickups: Vec<u32> = state
        .powerups
        .iter()
        .filter(|p| distance_between(origin, p.pos) < radius)
        .map(|p| p.id)
        .collect();

    for id in pickups {
        collect_powerup(state, id);
    }

    log::debug!("Attack at {:.2} rad: {} melee kills", angle, victims.len());
    true
}

/// Attack window expired: the weapon may swing again
pub fn end_attack(state: &mut GameState) {
    if state.attack.is_attacking {
        state.attack.is_attacking = false;
        state.push_event(GameEvent::AttackEnded);
    }
}

/// Roll for a Catharsis drop at `pos`. Returns the new power-up's id.
pub fn drop_powerup<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R, pos: Vec2) -> Option<u32> {
    if !rng.random_bool(state.tuning.powerup_drop_chance) {
        return None;
    }
    let drift = state.tuning.powerup_drift;
    let vel = Vec2::new(
        (rng.random::<f32>() - 0.5) * drift,
        (rng.random::<f32>() - 0.5) * drift,
    );
    let id = state.insert_powerup(pos, vel);
    state.push_event(GameEvent::PowerupDropped { id, pos });
    Some(id)
}

/// Pick up a power-up and apply its effect. Returns enemies cleared, or
/// `None` if the power-up was already gone.
pub fn collect_powerup(state: &mut GameState, powerup_id: u32) -> Option<u32> {
    let powerup = state.remove_powerup(powerup_id)?;

    let cleared = match powerup.kind {
        PowerupKind::Catharsis => {
            let points = state.tuning.kill_score;
            let enemies = std::mem::take(&mut state.enemies);
            let count = enemies.len() as u32;
            for enemy in enemies {
                state.push_event(GameEvent::EnemyKilled {
                    id: enemy.id,
                    kind: enemy.kind,
                    pos: enemy.pos,
                    cause: KillCause::Catharsis,
                });
                award_score(state, points);
            }
            count
        }
    };

    log::debug!("Catharsis #{} cleared {} enemies", powerup.id, cleared);
    state.push_event(GameEvent::PowerupCollected {
        id: powerup.id,
        pos: powerup.pos,
        enemies_cleared: cleared,
    });
    Some(cleared)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polar_to_cartesian;
    use crate::tuning::Tuning;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::f32::consts::{FRAC_PI_2, PI};

    use crate::sim::state::EnemyKind;

    /// Fresh state with drops disabled so outcomes don't depend on the roll
    fn no_drops() -> GameState {
        let tuning = Tuning {
            powerup_drop_chance: 0.0,
            ..Tuning::default()
        };
        GameState::new(5, tuning)
    }

    fn place(state: &mut GameState, distance: f32, angle: f32) -> u32 {
        let pos = state.player.pos + polar_to_cartesian(distance, angle);
        state.insert_enemy(EnemyKind::Doubt, pos, Vec2::ZERO)
    }

    #[test]
    fn test_arc_hit_and_miss() {
        let origin = Vec2::new(400.0, 300.0);
        let quarter = PI / 4.0;
        let at = |r: f32, theta: f32| origin + polar_to_cartesian(r, theta);
        assert!(in_attack_arc(origin, at(50.0, 0.0), 0.0, 90.0, quarter));
        assert!(!in_attack_arc(origin, at(50.0, FRAC_PI_2), 0.0, 90.0, quarter));
        assert!(!in_attack_arc(origin, at(95.0, 0.0), 0.0, 90.0, quarter));
        // Wedge straddling ±π
        assert!(in_attack_arc(origin, at(40.0, -PI + 0.2), PI - 0.2, 90.0, quarter));
    }

    #[test]
    fn test_melee_kills_only_inside_wedge() {
        let mut state = no_drops();
        let mut rng = Pcg32::seed_from_u64(1);
        let front = place(&mut state, 50.0, 0.0);
        let side = place(&mut state, 50.0, FRAC_PI_2);
        let far = place(&mut state, 120.0, 0.0);

        assert!(trigger_attack(&mut state, &mut rng));
        assert!(state.enemy(front).is_none());
        assert!(state.enemy(side).is_some());
        assert!(state.enemy(far).is_some());
        assert_eq!(state.score, 10);
        assert_eq!(state.kills_to_next_level, 9);
    }

    #[test]
    fn test_attack_follows_weapon_angle() {
        let mut state = no_drops();
        let mut rng = Pcg32::seed_from_u64(2);
        let below = place(&mut state, 60.0, FRAC_PI_2);
        state.player.weapon_angle = FRAC_PI_2;

        assert!(trigger_attack(&mut state, &mut rng));
        assert!(state.enemy(below).is_none());
        assert_eq!(state.attack.angle, FRAC_PI_2);
    }

    #[test]
    fn test_second_attack_in_window_is_noop() {
        let mut state = no_drops();
        let mut rng = Pcg32::seed_from_u64(3);
        assert!(trigger_attack(&mut state, &mut rng));

        let late = place(&mut state, 30.0, 0.0);
        assert!(!trigger_attack(&mut state, &mut rng));
        assert!(state.enemy(late).is_some());
        assert_eq!(state.score, 0);
        assert_eq!(state.timers.count_kind(TimerKind::AttackExpiry), 1);

        end_attack(&mut state);
        assert!(trigger_attack(&mut state, &mut rng));
        assert!(state.enemy(late).is_none());
    }

    #[test]
    fn test_attack_rejected_after_game_over() {
        let mut state = no_drops();
        let mut rng = Pcg32::seed_from_u64(4);
        let id = place(&mut state, 30.0, 0.0);
        state.phase = crate::sim::state::GamePhase::GameOver;

        assert!(!trigger_attack(&mut state, &mut rng));
        assert!(!state.attack.is_attacking);
        assert!(state.enemy(id).is_some());
    }

    #[test]
    fn test_catharsis_clears_all_enemies() {
        let mut state = no_drops();
        for i in 0..3 {
            place(&mut state, 300.0, i as f32);
        }
        let powerup = state.insert_powerup(state.player.pos, Vec2::ZERO);

        assert_eq!(collect_powerup(&mut state, powerup), Some(3));
        assert!(state.enemies.is_empty());
        assert!(state.powerups.is_empty());
        assert_eq!(state.score, 30);
        assert_eq!(collect_powerup(&mut state, powerup), None);
    }

    #[test]
    fn test_powerup_needs_reach_not_facing() {
        let mut state = no_drops();
        let mut rng = Pcg32::seed_from_u64(5);
        // Behind the weapon but in reach
        let behind = state.player.pos + polar_to_cartesian(60.0, PI);
        let powerup = state.insert_powerup(behind, Vec2::ZERO);
        let far = state.player.pos + Vec2::new(0.0, 200.0);
        let out_of_reach = state.insert_powerup(far, Vec2::ZERO);
        place(&mut state, 250.0, 1.0);
        place(&mut state, 250.0, 2.0);

        assert!(trigger_attack(&mut state, &mut rng));
        assert!(state.powerups.iter().all(|p| p.id != powerup));
        assert!(state.powerups.iter().any(|p| p.id == out_of_reach));
        assert!(state.enemies.is_empty());
        assert_eq!(state.score, 20);
    }

    #[test]
    fn test_melee_victims_not_double_counted_by_catharsis() {
        let mut state = no_drops();
        let mut rng = Pcg32::seed_from_u64(6);
        place(&mut state, 40.0, 0.0); // melee victim
        place(&mut state, 300.0, 2.0); // only Catharsis reaches this one
        state.insert_powerup(state.player.pos + Vec2::new(0.0, 30.0), Vec2::ZERO);

        assert!(trigger_attack(&mut state, &mut rng));
        assert!(state.enemies.is_empty());
        assert_eq!(state.score, 20);

        let kills: Vec<KillCause> = state
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                GameEvent::EnemyKilled { cause, .. } => Some(cause),
                _ => None,
            })
            .collect();
        assert_eq!(kills, vec![KillCause::Melee, KillCause::Catharsis]);
    }

    #[test]
    fn test_guaranteed_drop_is_collected_in_same_swing() {
        let tuning = Tuning {
            powerup_drop_chance: 1.0,
            ..Tuning::default()
        };
        let mut state = GameState::new(8, tuning);
        let mut rng = Pcg32::seed_from_u64(7);
        place(&mut state, 40.0, 0.0);
        let survivor = place(&mut state, 300.0, 2.0);

        assert!(trigger_attack(&mut state, &mut rng));
        // The drop lands inside reach, is picked up at once and clears the rest
        assert!(state.enemy(survivor).is_none());
        assert!(state.powerups.is_empty());
        assert_eq!(state.score, 20);
    }

    #[test]
    fn test_drop_chance_zero_and_one() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut state = no_drops();
        for _ in 0..50 {
            assert!(drop_powerup(&mut state, &mut rng, Vec2::ZERO).is_none());
        }

        state.tuning.powerup_drop_chance = 1.0;
        let id = drop_powerup(&mut state, &mut rng, Vec2::new(5.0, 5.0)).expect("always drops");
        let powerup = state.powerups.iter().find(|p| p.id == id).expect("registered");
        assert!(powerup.vel.x.abs() <= 10.0 && powerup.vel.y.abs() <= 10.0);
    }

    #[test]
    fn test_kill_crossing_threshold_levels_up() {
        let mut state = no_drops();
        let mut rng = Pcg32::seed_from_u64(10);
        state.kills_to_next_level = 2;
        place(&mut state, 30.0, 0.1);
        place(&mut state, 60.0, -0.1);
        place(&mut state, 70.0, 0.2);

        assert!(trigger_attack(&mut state, &mut rng));
        assert_eq!(state.level, 2);
        assert_eq!(state.kills_to_next_level, 13);
        assert_eq!(state.score, 30);
    }
}
