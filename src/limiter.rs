// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Sliding-window rate limiter for submission attempts.
//!
//! Attempts are tracked per client identifier in a trailing window
//! (5 attempts / 60 s by default). Entries are pruned lazily on each
//! check; a refused attempt is never recorded, so being over the limit
//! does not extend the lockout.
//!
//! The attempt store is injected rather than process-global, so tests and
//! independent form instances cannot leak state into each other.

use crate::config::RateLimitConfig;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tracing::debug;

/// Identifier used when the client IP cannot be resolved. All such clients
/// share one bucket; a known limitation inherited from the form.
pub const FALLBACK_IDENTIFIER: &str = "unknown";

/// Shared attempt history, keyed by client identifier.
#[derive(Debug, Clone, Default)]
pub struct AttemptStore {
    attempts: Arc<RwLock<HashMap<String, Vec<Instant>>>>,
}

impl AttemptStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Sliding-window rate limiter over an [`AttemptStore`].
pub struct SlidingWindowLimiter {
    config: RateLimitConfig,
    store: AttemptStore,
}

impl SlidingWindowLimiter {
    /// Create a limiter with the given configuration and store.
    pub fn new(config: RateLimitConfig, store: AttemptStore) -> Self {
        Self { config, store }
    }

    /// Check whether an attempt by `identifier` at `now` is allowed, and
    /// record it if so.
    ///
    /// Immediately after this returns, the identifier's bucket holds at
    /// most `max_attempts` entries: pruning runs first, and a refused
    /// attempt is not appended.
    pub async fn check_and_record(&self, identifier: &str, now: Instant) -> bool {
        if !self.config.enabled {
            return true;
        }

        let window = self.config.window_duration();
        let mut attempts = self.store.attempts.write().await;
        let timestamps = attempts.entry(identifier.to_string()).or_default();
        timestamps.retain(|t| now.duration_since(*t) < window);

        if timestamps.len() >= self.config.max_attempts as usize {
            debug!(
                identifier,
                attempts = timestamps.len(),
                limit = self.config.max_attempts,
                "Rate limit exceeded"
            );
            return false;
        }

        timestamps.push(now);
        true
    }

    /// Number of attempts currently inside the window for `identifier`.
    pub async fn attempts_in_window(&self, identifier: &str, now: Instant) -> usize {
        let window = self.config.window_duration();
        let attempts = self.store.attempts.read().await;
        attempts
            .get(identifier)
            .map(|ts| {
                ts.iter()
                    .filter(|t| now.duration_since(**t) < window)
                    .count()
            })
            .unwrap_or(0)
    }

    /// Drop identifiers whose entire history has aged out of the window.
    pub async fn cleanup(&self, now: Instant) {
        let window = self.config.window_duration();
        let mut attempts = self.store.attempts.write().await;
        attempts.retain(|_, ts| ts.iter().any(|t| now.duration_since(*t) < window));
    }
}
