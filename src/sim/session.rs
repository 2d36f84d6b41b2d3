//! A single game session: state plus its random source
//!
//! Hosts drive a session instead of juggling `GameState` and an RNG by hand.
//! Any `rand::Rng` can be injected; the default is a seeded `Pcg32`.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::combat;
use super::events::{EffectHooks, GameEvent};
use super::health;
use super::snapshot::Snapshot;
use super::state::GameState;
use super::tick::{TickInput, tick};
use crate::tuning::Tuning;

pub struct GameSession<R: Rng = Pcg32> {
    pub state: GameState,
    rng: R,
}

impl GameSession<Pcg32> {
    /// New session whose randomness is fully determined by `seed`
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        log::info!("New session with seed {}", seed);
        Self::with_rng(seed, tuning, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> GameSession<R> {
    /// New session with a caller-supplied random source
    pub fn with_rng(seed: u64, tuning: Tuning, rng: R) -> Self {
        Self {
            state: GameState::new(seed, tuning),
            rng,
        }
    }

    /// Advance one fixed step
    pub fn tick(&mut self, input: &TickInput) {
        let dt_ms = self.state.tuning.sim_dt_ms;
        tick(&mut self.state, &mut self.rng, input, dt_ms);
    }

    /// Advance by at least `ms` worth of fixed steps with the same input
    pub fn run_for(&mut self, ms: u64, input: &TickInput) {
        let dt_ms = self.state.tuning.sim_dt_ms as u64;
        for _ in 0..ms.div_ceil(dt_ms) {
            self.tick(input);
        }
    }

    /// Pointer-down outside the tick loop. Returns whether a swing started.
    pub fn trigger_attack(&mut self) -> bool {
        combat::trigger_attack(&mut self.state, &mut self.rng)
    }

    /// Collision feed from the host. Returns whether the hit counted.
    pub fn report_core_contact(&mut self, enemy_id: u32) -> bool {
        health::enemy_hit_core(&mut self.state, &mut self.rng, enemy_id)
    }

    pub fn set_playfield(&mut self, width: f32, height: f32) {
        self.state.set_playfield(width, height);
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    /// Drain pending events into cosmetic hooks
    pub fn dispatch_events<H: EffectHooks + ?Sized>(&mut self, hooks: &mut H) -> Vec<GameEvent> {
        let events = self.state.drain_events();
        for event in &events {
            event.dispatch(hooks);
        }
        events
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }
}
