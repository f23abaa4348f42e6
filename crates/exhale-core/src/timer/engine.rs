//! Intervention countdown engine.
//!
//! A single-episode state machine. The engine owns no clock and spawns no
//! threads - the caller invokes `tick()` once per elapsed second, so a whole
//! episode can be simulated synchronously.
//!
//! ## State Transitions
//!
//! ```text
//! Running -> Completed -> (Resisted | GaveIn)
//!    |                         ^
//!    +-------------------------+   early resist or give-in mid-countdown
//! ```
//!
//! Discarding the engine at any point is cancellation: no terminal outcome,
//! no event. Only a `Resisted` outcome leads to a recorded craving event,
//! and that append is the coordinator's job, not the engine's.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::events::Event;

/// Default episode length in seconds (five minutes).
pub const DEFAULT_INTERVENTION_SECS: u32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TimerState {
    Running,
    /// Countdown reached zero; waiting for the user to resolve the episode.
    Completed,
    /// Terminal: the urge was withstood for `duration_secs`.
    Resisted { duration_secs: u32 },
    /// Terminal: user-acknowledged relapse. Nothing is recorded.
    GaveIn,
}

/// Core countdown engine for one intervention episode.
///
/// Serializes with serde so front ends can persist an in-flight episode
/// between invocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterventionTimer {
    total_secs: u32,
    remaining_secs: u32,
    state: TimerState,
}

impl InterventionTimer {
    /// Start a new episode in `Running` with the full duration remaining.
    pub fn new(total_secs: u32) -> Self {
        Self {
            total_secs,
            remaining_secs: total_secs,
            state: TimerState::Running,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn total_secs(&self) -> u32 {
        self.total_secs
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    /// Seconds elapsed since the episode started.
    pub fn elapsed_secs(&self) -> u32 {
        self.total_secs - self.remaining_secs
    }

    /// 0.0 .. 1.0 progress through the countdown.
    pub fn progress(&self) -> f64 {
        if self.total_secs == 0 {
            return 1.0;
        }
        1.0 - (f64::from(self.remaining_secs) / f64::from(self.total_secs))
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.state, TimerState::Resisted { .. } | TimerState::GaveIn)
    }

    /// Guidance phrase for the current remaining time. Presentational only.
    pub fn guidance(&self) -> &'static str {
        const PHRASES: [&str; 5] = [
            "The urge is a wave - it rises, and then it passes.",
            "Every urge you ride out makes the next one weaker.",
            "Think of how breathing clean air feels.",
            "Your health is worth these five minutes.",
            "This is not giving something up - it is choosing a better you.",
        ];
        if self.remaining_secs > 240 {
            PHRASES[0]
        } else if self.remaining_secs > 180 {
            PHRASES[1]
        } else if self.remaining_secs > 120 {
            PHRASES[2]
        } else if self.remaining_secs > 60 {
            PHRASES[3]
        } else {
            PHRASES[4]
        }
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::TimerSnapshot {
            state: self.state,
            remaining_secs: self.remaining_secs,
            total_secs: self.total_secs,
            guidance: self.guidance().to_string(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Advance the countdown by one second.
    ///
    /// Returns the completion event on the tick that reaches zero; `None`
    /// otherwise, including in every non-`Running` state.
    pub fn tick(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Running => {
                self.remaining_secs = self.remaining_secs.saturating_sub(1);
                if self.remaining_secs == 0 {
                    self.state = TimerState::Completed;
                    return Some(Event::InterventionCompleted {
                        total_secs: self.total_secs,
                        at: Utc::now(),
                    });
                }
                None
            }
            _ => None,
        }
    }

    /// Resolve the episode as resisted.
    ///
    /// Legal from `Completed` and directly from `Running` (early exit);
    /// the measured duration is the elapsed time at that moment.
    pub fn resolve_resisted(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Running | TimerState::Completed => {
                let duration_secs = self.elapsed_secs();
                self.state = TimerState::Resisted { duration_secs };
                Some(Event::InterventionResolved {
                    resisted: true,
                    duration_secs: Some(duration_secs),
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// Resolve the episode as a user-acknowledged relapse. Terminal;
    /// records nothing.
    pub fn give_in(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Running | TimerState::Completed => {
                self.state = TimerState::GaveIn;
                Some(Event::InterventionResolved {
                    resisted: false,
                    duration_secs: None,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }
}

impl Default for InterventionTimer {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVENTION_SECS)
    }
}
