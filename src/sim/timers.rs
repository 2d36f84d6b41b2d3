//! Scheduled callbacks driven by simulation time
//!
//! Timers never capture entities. Entity-bound timers carry the entity's id and
//! the handler re-resolves it through the registry when the timer fires.

use serde::{Deserialize, Serialize};

/// Handle to a scheduled timer
pub type TimerId = u32;

/// What a timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerKind {
    /// Spawn one enemy (repeating, delay follows the current spawn delay)
    Spawn,
    /// Randomize a Doubt specter's heading (repeating, bound to the enemy's lifetime)
    Jitter { enemy_id: u32 },
    /// Close the melee attack window (one-shot)
    AttackExpiry,
    /// Drop the level-up text emphasis (one-shot)
    LevelFlashExpiry,
}

impl TimerKind {
    /// Cosmetic/window timers that still resolve after game over
    pub fn runs_after_game_over(&self) -> bool {
        matches!(self, TimerKind::AttackExpiry | TimerKind::LevelFlashExpiry)
    }
}

/// A single scheduled timer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timer {
    pub id: TimerId,
    pub kind: TimerKind,
    pub delay_ms: u32,
    pub elapsed_ms: u32,
    pub repeat: bool,
}

/// A timer that fired during `Scheduler::advance`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredTimer {
    pub id: TimerId,
    pub kind: TimerKind,
}

/// Owns every pending timer (sorted by id)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scheduler {
    timers: Vec<Timer>,
    next_id: TimerId,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            timers: Vec::new(),
            next_id: 1,
        }
    }

    fn insert(&mut self, kind: TimerKind, delay_ms: u32, repeat: bool) -> TimerId {
        // id 0 is never handed out, so a defaulted scheduler starts at 1 too
        self.next_id = self.next_id.max(1);
        let id = self.next_id;
        self.next_id += 1;
        self.timers.push(Timer {
            id,
            kind,
            delay_ms: delay_ms.max(1),
            elapsed_ms: 0,
            repeat,
        });
        id
    }

    /// Schedule a one-shot callback
    pub fn once(&mut self, kind: TimerKind, delay_ms: u32) -> TimerId {
        self.insert(kind, delay_ms, false)
    }

    /// Schedule a repeating callback
    pub fn repeating(&mut self, kind: TimerKind, delay_ms: u32) -> TimerId {
        self.insert(kind, delay_ms, true)
    }

    /// Change a timer's delay. Elapsed time is kept, so a shorter delay can
    /// make the timer fire on the next advance.
    pub fn set_delay(&mut self, id: TimerId, delay_ms: u32) -> bool {
        match self.timers.iter_mut().find(|t| t.id == id) {
            Some(timer) => {
                timer.delay_ms = delay_ms.max(1);
                true
            }
            None => false,
        }
    }

    /// Remove a timer; returns false if it was not pending
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    pub fn contains(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    pub fn get(&self, id: TimerId) -> Option<&Timer> {
        self.timers.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Number of pending timers of a given kind
    pub fn count_kind(&self, kind: TimerKind) -> usize {
        self.timers.iter().filter(|t| t.kind == kind).count()
    }

    /// Advance all timers by `dt_ms`.
    ///
    /// Returns fired timers ordered by when they came due inside the step
    /// (ties by timer id). One-shot timers are removed once fired.
    pub fn advance(&mut self, dt_ms: u32) -> Vec<FiredTimer> {
        self.advance_filtered(dt_ms, |_| true)
    }

    /// Like `advance`, but only timers whose kind passes `filter` make progress
    pub fn advance_filtered(
        &mut self,
        dt_ms: u32,
        filter: impl Fn(&TimerKind) -> bool,
    ) -> Vec<FiredTimer> {
        // (time into the step at which it fired, timer id, kind)
        let mut fired: Vec<(u32, TimerId, TimerKind)> = Vec::new();

        for timer in self.timers.iter_mut().filter(|t| filter(&t.kind)) {
            let start = timer.elapsed_ms;
            timer.elapsed_ms += dt_ms;
            let mut due_at = timer.delay_ms.saturating_sub(start);

            while timer.elapsed_ms >= timer.delay_ms {
                fired.push((due_at.min(dt_ms), timer.id, timer.kind));
                timer.elapsed_ms -= timer.delay_ms;
                if !timer.repeat {
                    break;
                }
                due_at += timer.delay_ms;
            }
        }

        let fired_once: Vec<TimerId> = fired
            .iter()
            .map(|&(_, id, _)| id)
            .filter(|id| self.get(*id).is_some_and(|t| !t.repeat))
            .collect();
        self.timers.retain(|t| !fired_once.contains(&t.id));

        fired.sort_by_key(|&(at, id, _)| (at, id));
        fired
            .into_iter()
            .map(|(_, id, kind)| FiredTimer { id, kind })
            .collect()
    }
}
