// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Cooldown between successful submissions.
//!
//! A two-state machine: `Ready` and `Cooling { until }`. Only a successful
//! send moves it into `Cooling`; attempts made while cooling are refused
//! without resetting the timer. The remaining time is recomputed against a
//! monotonic clock on every query instead of being ticked down by a
//! periodic task, so there are no wakeups and nothing to cancel.

use std::time::{Duration, Instant};
use tracing::debug;

/// Observable cooldown state at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CooldownStatus {
    /// A new submission may proceed.
    Ready,
    /// Submissions are refused for `remaining` more time.
    Cooling { remaining: Duration },
}

#[derive(Debug, Clone, Copy)]
enum State {
    Ready,
    Cooling { until: Instant },
}

/// Cooldown timer enforcing a minimum delay between successful sends.
#[derive(Debug)]
pub struct CooldownTimer {
    duration: Duration,
    state: State,
}

impl CooldownTimer {
    /// Create a timer in the `Ready` state.
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            state: State::Ready,
        }
    }

    /// The configured cooldown duration.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Evaluate the state at `now`. An elapsed cooldown collapses to
    /// `Ready` here; once zero, the remaining time stays zero until the
    /// next successful send.
    pub fn status(&mut self, now: Instant) -> CooldownStatus {
        match self.state {
            State::Ready => CooldownStatus::Ready,
            State::Cooling { until } => {
                if now >= until {
                    self.state = State::Ready;
                    CooldownStatus::Ready
                } else {
                    CooldownStatus::Cooling {
                        remaining: until.duration_since(now),
                    }
                }
            }
        }
    }

    /// Record a successful send at `now`, starting a fresh cooldown.
    pub fn record_send(&mut self, now: Instant) {
        let until = now + self.duration;
        debug!(cooldown_ms = self.duration.as_millis() as u64, "Cooldown started");
        self.state = State::Cooling { until };
    }
}
