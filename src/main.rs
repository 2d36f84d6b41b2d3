//! Catharsis headless runner
//!
//! Plays the game in attract mode at the fixed timestep and reports what
//! happened. Useful for balancing: pair it with `--tuning balance.json`.
//!
//! ```text
//! catharsis [--seed N] [--seconds N] [--tuning PATH] [--json]
//! ```

use std::path::PathBuf;

use catharsis::Tuning;
use catharsis::sim::{EffectHooks, GameEvent, GameSession, TickInput};
use clap::Parser;
use glam::Vec2;

#[derive(Parser, Debug)]
#[command(author, version, about = "Run Catharsis headless in attract mode", long_about = None)]
struct Options {
    /// RNG seed for the session
    #[arg(long, default_value_t = 0xC0FFEE)]
    seed: u64,
    /// Simulated seconds to run (stops early on game over)
    #[arg(long, default_value_t = 120)]
    seconds: u64,
    /// JSON file overriding gameplay tuning
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Print the final snapshot as JSON
    #[arg(long)]
    json: bool,
}

/// Tallies cosmetic feedback the way a renderer would trigger it
#[derive(Default)]
struct FeedbackLog {
    kills: u32,
    core_hits: u32,
    pickups: u32,
}

impl EffectHooks for FeedbackLog {
    fn on_enemy_killed(&mut self, _pos: Vec2) {
        self.kills += 1;
    }

    fn on_core_hit(&mut self) {
        self.core_hits += 1;
        log::debug!("*shake*");
    }

    fn on_level_up(&mut self, level: u32) {
        log::info!("Level up -> {}", level);
    }

    fn on_game_over(&mut self) {
        log::info!("GAME OVER");
    }

    fn on_powerup_collected(&mut self, pos: Vec2) {
        self.pickups += 1;
        log::info!("Catharsis collected at ({:.0}, {:.0})", pos.x, pos.y);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Catharsis (headless) starting...");

    let opts = Options::parse();
    let tuning = match &opts.tuning {
        Some(path) => Tuning::load(path),
        None => Tuning::default(),
    };

    let mut session = GameSession::new(opts.seed, tuning);
    let mut feedback = FeedbackLog::default();
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    let dt_ms = session.state.tuning.sim_dt_ms as u64;
    let total_ticks = opts.seconds.saturating_mul(1000).div_ceil(dt_ms);
    let mut spawned = 0u32;

    for _ in 0..total_ticks {
        session.tick(&input);
        for event in session.dispatch_events(&mut feedback) {
            if let GameEvent::EnemySpawned { .. } = event {
                spawned += 1;
            }
        }
        if session.is_game_over() {
            break;
        }
    }

    let snap = session.snapshot();
    println!(
        "seed {} | {:.1}s | score {} | level {} | core {}/{}{}",
        opts.seed,
        snap.time_ms as f64 / 1000.0,
        snap.score,
        snap.level,
        snap.core_health,
        session.state.tuning.core_max_health,
        if session.is_game_over() { " | GAME OVER" } else { "" },
    );
    println!(
        "spawned {} | kills {} | core hits {} | pickups {}",
        spawned, feedback.kills, feedback.core_hits, feedback.pickups,
    );

    if opts.json {
        match snap.to_json() {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Failed to serialize snapshot: {}", e),
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The web host embeds the library directly; there is no headless runner
}
