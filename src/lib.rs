// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Message Gate
//!
//! Client-side submission gatekeeper for the moderated message form. It
//! governs what is allowed to leave the client and when:
//!
//! - Ordered validation checklist (length, charset, repetition, forbidden
//!   words, bare URLs)
//! - Markup stripping before transmission
//! - Sliding-window rate limiting per client identifier (5 / 60 s)
//! - Cooldown after each successful send
//! - One controller orchestrating CSRF acquisition, the checks and the
//!   POST to the moderation backend
//!
//! The two historical form variants are expressed as [`Config`] profiles
//! rather than separate components. Nothing here persists: all state is
//! memory-resident and scoped to the mounted controller, except the
//! attempt store, which is scoped to wherever the application creates it.

pub mod client;
pub mod config;
pub mod controller;
pub mod cooldown;
pub mod limiter;
pub mod sanitizer;
pub mod validator;

pub use client::{Backend, HttpBackend, MessagePayload, SubmitResponse, TransportError};
pub use config::{CharsetPolicy, Config, CsrfMode, RateLimitConfig, UrlPolicy, ValidationConfig};
pub use controller::{
    RateLimitScope, SubmissionController, SubmissionState, SubmitError, SubmitOutcome,
};
pub use cooldown::{CooldownStatus, CooldownTimer};
pub use limiter::{AttemptStore, SlidingWindowLimiter, FALLBACK_IDENTIFIER};
pub use sanitizer::sanitize;
pub use validator::{MessageValidator, ValidationError, ValidationResult};
