// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Outcome tallies for flood simulation runs.

use std::collections::HashMap;

/// How the gatekeeper disposed of one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Allowed,
    RateLimited,
    RejectedValidation,
}

/// Collects outcomes during a flood simulation.
#[derive(Debug, Default)]
pub struct FloodMetrics {
    outcomes: HashMap<Outcome, usize>,
    attempts_per_identifier: HashMap<String, usize>,
}

impl FloodMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one attempt.
    pub fn record(&mut self, outcome: Outcome, identifier: &str) {
        *self.outcomes.entry(outcome).or_insert(0) += 1;
        *self
            .attempts_per_identifier
            .entry(identifier.to_string())
            .or_insert(0) += 1;
    }

    pub fn total(&self) -> usize {
        self.outcomes.values().sum()
    }

    pub fn count(&self, outcome: Outcome) -> usize {
        self.outcomes.get(&outcome).copied().unwrap_or(0)
    }

    /// Ratio of refused attempts to total.
    pub fn block_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let allowed = self.count(Outcome::Allowed);
        (total - allowed) as f64 / total as f64
    }

    /// Number of distinct identifiers seen.
    pub fn identifiers(&self) -> usize {
        self.attempts_per_identifier.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_rate_counts_everything_but_allowed() {
        let mut metrics = FloodMetrics::new();
        metrics.record(Outcome::Allowed, "a");
        metrics.record(Outcome::RateLimited, "a");
        metrics.record(Outcome::RejectedValidation, "b");
        metrics.record(Outcome::RateLimited, "b");

        assert_eq!(metrics.total(), 4);
        assert_eq!(metrics.count(Outcome::RateLimited), 2);
        assert_eq!(metrics.identifiers(), 2);
        assert!((metrics.block_rate() - 0.75).abs() < f64::EPSILON);
    }
}
