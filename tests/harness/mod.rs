// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Test harness for submission-flood simulation.
//!
//! Generators produce pools of client identifiers and messages; the
//! metrics collector tallies how the gatekeeper disposed of each attempt.

pub mod generators;
pub mod metrics;
