//! Read-only view of the simulation for renderers and HUDs

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{EnemyKind, GamePhase, GameState, PowerupKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerupView {
    pub id: u32,
    pub kind: PowerupKind,
    pub pos: Vec2,
}

/// Everything a frame needs to draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub time_ms: u64,
    pub phase: GamePhase,
    pub core_health: i32,
    pub score: u64,
    pub level: u32,
    pub kills_to_next_level: i32,
    pub spawn_delay_ms: u32,
    pub is_attacking: bool,
    pub weapon_angle: f32,
    pub level_flash: bool,
    pub player: Vec2,
    pub enemies: Vec<EnemyView>,
    pub powerups: Vec<PowerupView>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            time_ms: state.time_ms,
            phase: state.phase,
            core_health: state.core_health,
            score: state.score,
            level: state.level,
            kills_to_next_level: state.kills_to_next_level,
            spawn_delay_ms: state.spawn_delay_ms,
            is_attacking: state.attack.is_attacking,
            weapon_angle: state.player.weapon_angle,
            level_flash: state.level_flash,
            player: state.player.pos,
            enemies: state
                .enemies
                .iter()
                .map(|e| EnemyView {
                    id: e.id,
                    kind: e.kind,
                    pos: e.pos,
                })
                .collect(),
            powerups: state
                .powerups
                .iter()
                .map(|p| PowerupView {
                    id: p.id,
                    kind: p.kind,
                    pos: p.pos,
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_capture_mirrors_state() {
        let mut state = GameState::new(1, Tuning::default());
        let enemy = state.insert_enemy(EnemyKind::Fear, Vec2::new(1.0, 2.0), Vec2::ZERO);
        state.insert_powerup(Vec2::new(3.0, 4.0), Vec2::ZERO);
        state.score = 40;

        let snap = Snapshot::capture(&state);
        assert_eq!(snap.score, 40);
        assert_eq!(snap.core_health, 100);
        let expected = EnemyView {
            id: enemy,
            kind: EnemyKind::Fear,
            pos: Vec2::new(1.0, 2.0),
        };
        assert_eq!(snap.enemies, vec![expected]);
        assert_eq!(snap.powerups.len(), 1);
        assert_eq!(snap.phase, GamePhase::Playing);
    }

    #[test]
    fn test_json_has_hud_fields() {
        let state = GameState::new(1, Tuning::default());
        let json = Snapshot::capture(&state).to_json().expect("serializable");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["core_health"], 100);
        assert_eq!(value["level"], 1);
        assert_eq!(value["phase"], "Playing");
        assert_eq!(value["is_attacking"], false);
    }
}
