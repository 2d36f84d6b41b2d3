//! Data-driven game balance
//!
//! Every gameplay constant lives here so a run can be re-balanced from a JSON
//! file without recompiling. Missing fields fall back to `consts`.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Simulation ===
    /// Fixed step in milliseconds
    pub sim_dt_ms: u32,

    // === Playfield ===
    pub playfield_width: f32,
    pub playfield_height: f32,
    pub core_radius: f32,
    pub enemy_radius: f32,
    /// Resolve enemy/core overlaps inside the sim (hosts can still report their own)
    pub detect_core_contacts: bool,

    // === Core health ===
    pub core_max_health: i32,
    pub core_hit_damage: i32,
    pub level_up_heal: i32,

    // === Spawning ===
    pub base_spawn_delay_ms: u32,
    pub min_spawn_delay_ms: u32,
    pub spawn_delay_step_ms: u32,
    pub spawn_edge_offset: f32,
    pub fear_min_level: u32,
    pub fear_chance: f64,
    pub fear_base_speed: f32,
    pub fear_speed_per_level: f32,
    pub doubt_base_speed: f32,
    pub doubt_speed_per_level: f32,
    pub jitter_interval_ms: u32,
    pub jitter_amplitude: f32,

    // === Attack ===
    pub attack_radius: f32,
    pub attack_arc: f32,
    pub attack_duration_ms: u32,

    // === Progression ===
    pub kill_score: u64,
    pub initial_kills_to_next_level: i32,
    pub kills_per_level_base: i32,
    pub kills_per_level_step: i32,
    pub level_flash_ms: u32,

    // === Power-ups ===
    pub powerup_drop_chance: f64,
    pub powerup_drift: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            sim_dt_ms: SIM_DT_MS,

            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,
            core_radius: CORE_RADIUS,
            enemy_radius: ENEMY_RADIUS,
            detect_core_contacts: true,

            core_max_health: CORE_MAX_HEALTH,
            core_hit_damage: CORE_HIT_DAMAGE,
            level_up_heal: LEVEL_UP_HEAL,

            base_spawn_delay_ms: BASE_SPAWN_DELAY_MS,
            min_spawn_delay_ms: MIN_SPAWN_DELAY_MS,
            spawn_delay_step_ms: SPAWN_DELAY_STEP_MS,
            spawn_edge_offset: SPAWN_EDGE_OFFSET,
            fear_min_level: FEAR_MIN_LEVEL,
            fear_chance: FEAR_CHANCE,
            fear_base_speed: FEAR_BASE_SPEED,
            fear_speed_per_level: FEAR_SPEED_PER_LEVEL,
            doubt_base_speed: DOUBT_BASE_SPEED,
            doubt_speed_per_level: DOUBT_SPEED_PER_LEVEL,
            jitter_interval_ms: JITTER_INTERVAL_MS,
            jitter_amplitude: JITTER_AMPLITUDE,

            attack_radius: ATTACK_RADIUS,
            attack_arc: ATTACK_ARC,
            attack_duration_ms: ATTACK_DURATION_MS,

            kill_score: KILL_SCORE,
            initial_kills_to_next_level: INITIAL_KILLS_TO_NEXT_LEVEL,
            kills_per_level_base: KILLS_PER_LEVEL_BASE,
            kills_per_level_step: KILLS_PER_LEVEL_STEP,
            level_flash_ms: LEVEL_FLASH_MS,

            powerup_drop_chance: POWERUP_DROP_CHANCE,
            powerup_drift: POWERUP_DRIFT,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON (missing fields take their defaults)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load tuning from a JSON file, falling back to defaults on any failure
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Invalid tuning file {}: {}; using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read tuning file {}: {}; using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Clamp values that would stall timers, panic RNG sampling or push
    /// core health out of `0..=core_max_health`
    pub fn sanitized(mut self) -> Self {
        self.sim_dt_ms = self.sim_dt_ms.max(1);
        self.base_spawn_delay_ms = self.base_spawn_delay_ms.max(1);
        self.min_spawn_delay_ms = self.min_spawn_delay_ms.max(1);
        self.jitter_interval_ms = self.jitter_interval_ms.max(1);
        self.attack_duration_ms = self.attack_duration_ms.max(1);
        self.level_flash_ms = self.level_flash_ms.max(1);
        self.core_max_health = self.core_max_health.max(1);
        self.core_hit_damage = self.core_hit_damage.max(0);
        self.level_up_heal = self.level_up_heal.max(0);
        self.initial_kills_to_next_level = self.initial_kills_to_next_level.max(1);
        self.kills_per_level_base = self.kills_per_level_base.max(1);
        self.kills_per_level_step = self.kills_per_level_step.max(0);
        self.fear_chance = clamp_probability(self.fear_chance);
        self.powerup_drop_chance = clamp_probability(self.powerup_drop_chance);
        self.playfield_width = self.playfield_width.max(1.0);
        self.playfield_height = self.playfield_height.max(1.0);
        self
    }

    /// Half of the melee arc width
    #[inline]
    pub fn attack_half_arc(&self) -> f32 {
        self.attack_arc / 2.0
    }

    /// Kill requirement for the level just reached (never below one)
    #[inline]
    pub fn kills_for_level(&self, level: u32) -> i32 {
        let level = i32::try_from(level).unwrap_or(i32::MAX);
        self.kills_per_level_base
            .saturating_add(level.saturating_mul(self.kills_per_level_step))
            .max(1)
    }
}

fn clamp_probability(p: f64) -> f64 {
    if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
}
