//! Catharsis - A core-defense arcade survival game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, combat, progression, core health)
//! - `tuning`: Data-driven game balance

pub mod sim;
pub mod tuning;

pub use sim::{GameSession, GameState, TickInput};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants (defaults for `Tuning`)
pub mod consts {
    /// Fixed simulation timestep in milliseconds (100 Hz)
    pub const SIM_DT_MS: u32 = 10;

    /// Default playfield size (the core sits at its center)
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Core (player) hit volume and enemy body radius
    pub const CORE_RADIUS: f32 = 16.0;
    pub const ENEMY_RADIUS: f32 = 8.0;

    /// Core health
    pub const CORE_MAX_HEALTH: i32 = 100;
    pub const CORE_HIT_DAMAGE: i32 = 10;
    pub const LEVEL_UP_HEAL: i32 = 20;

    /// Spawning
    pub const BASE_SPAWN_DELAY_MS: u32 = 2000;
    pub const MIN_SPAWN_DELAY_MS: u32 = 500;
    pub const SPAWN_DELAY_STEP_MS: u32 = 100;
    /// Enemies appear this far outside the playfield edge
    pub const SPAWN_EDGE_OFFSET: f32 = 20.0;

    /// Fear specters: fast, straight-line, only from this level on
    pub const FEAR_MIN_LEVEL: u32 = 2;
    pub const FEAR_CHANCE: f64 = 0.3;
    pub const FEAR_BASE_SPEED: f32 = 150.0;
    pub const FEAR_SPEED_PER_LEVEL: f32 = 8.0;

    /// Doubt specters: slower, wander with periodic jitter
    pub const DOUBT_BASE_SPEED: f32 = 100.0;
    pub const DOUBT_SPEED_PER_LEVEL: f32 = 5.0;
    pub const JITTER_INTERVAL_MS: u32 = 500;
    /// Full width of the per-axis jitter kick (kick is in ±amplitude/2)
    pub const JITTER_AMPLITUDE: f32 = 100.0;

    /// Melee attack
    pub const ATTACK_RADIUS: f32 = 90.0;
    pub const ATTACK_ARC: f32 = std::f32::consts::FRAC_PI_2;
    pub const ATTACK_DURATION_MS: u32 = 150;

    /// Score and leveling
    pub const KILL_SCORE: u64 = 10;
    pub const INITIAL_KILLS_TO_NEXT_LEVEL: i32 = 10;
    pub const KILLS_PER_LEVEL_BASE: i32 = 10;
    pub const KILLS_PER_LEVEL_STEP: i32 = 2;
    /// Level text stays emphasized for this long after a level-up
    pub const LEVEL_FLASH_MS: u32 = 300;

    /// Catharsis power-up drops
    pub const POWERUP_DROP_CHANCE: f64 = 0.1;
    /// Full width of the per-axis drift velocity (drift is in ±amplitude/2)
    pub const POWERUP_DRIFT: f32 = 20.0;
}

/// Wrap an angle to (-π, π]
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else if wrapped > PI {
        wrapped - TAU
    } else {
        wrapped
    }
}

/// Angle (radians) of the ray from `from` toward `to`
#[inline]
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Euclidean distance between two points
#[inline]
pub fn distance_between(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_wrap_angle_past_pi() {
        let wrapped = wrap_angle(PI + 0.1);
        assert!((wrapped - (-PI + 0.1)).abs() < 1e-4, "got {wrapped}");
    }

    #[test]
    fn test_wrap_angle_boundaries() {
        assert!((wrap_angle(PI) - PI).abs() < 1e-5);
        assert!((wrap_angle(-PI) - PI).abs() < 1e-5);
        assert_eq!(wrap_angle(0.0), 0.0);
        assert!((wrap_angle(5.0 * FRAC_PI_2) - FRAC_PI_2).abs() < 1e-4);
    }

    #[test]
    fn test_angle_and_distance() {
        let origin = Vec2::new(400.0, 300.0);
        assert!((angle_between(origin, Vec2::new(400.0, 400.0)) - FRAC_PI_2).abs() < 1e-6);
        assert!((angle_between(origin, Vec2::new(300.0, 300.0)) - PI).abs() < 1e-6);
        assert!((distance_between(origin, Vec2::new(430.0, 340.0)) - 50.0).abs() < 1e-4);
    }

    proptest! {
        #[test]
        fn prop_wrap_angle_in_range(angle in -1000.0f32..1000.0) {
            let wrapped = wrap_angle(angle);
            prop_assert!(wrapped > -PI && wrapped <= PI);
        }

        #[test]
        fn prop_wrap_angle_preserves_direction(angle in -100.0f32..100.0) {
            let wrapped = wrap_angle(angle);
            prop_assert!((wrapped.cos() - angle.cos()).abs() < 1e-3);
            prop_assert!((wrapped.sin() - angle.sin()).abs() < 1e-3);
        }

        #[test]
        fn prop_distance_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0
        ) {
            let a = Vec2::new(ax, ay);
            let b = Vec2::new(bx, by);
            prop_assert!((distance_between(a, b) - distance_between(b, a)).abs() < 1e-3);
            prop_assert!(distance_between(a, b) >= 0.0);
        }
    }
}
