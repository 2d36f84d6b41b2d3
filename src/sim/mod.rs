//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Injected, seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies; effects are emitted as `GameEvent`s

pub mod combat;
pub mod events;
pub mod health;
pub mod progression;
pub mod session;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod timers;

pub use combat::{collect_powerup, drop_powerup, end_attack, in_attack_arc, trigger_attack};
pub use events::{EffectHooks, GameEvent, KillCause};
pub use health::{enemy_hit_core, game_over};
pub use progression::{award_score, level_up, spawn_delay_for_level};
pub use session::GameSession;
pub use snapshot::{EnemyView, PowerupView, Snapshot};
pub use spawn::{Edge, SpawnPlan, roll_spawn, spawn_enemy, spawn_planned};
pub use state::{AttackState, Enemy, EnemyKind, GamePhase, GameState, Player, Powerup, PowerupKind};
pub use tick::{TickInput, tick};
pub use timers::{Scheduler, TimerId, TimerKind};
