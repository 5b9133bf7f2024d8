// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Submission controller.
//!
//! Orchestrates one submission attempt end to end, in a fixed order:
//! cooldown gate, local rate limit, validation, sanitization, POST,
//! response interpretation. The first failure wins and no later stage
//! runs; in particular, a message that fails validation never reaches
//! the network.
//!
//! Overlapping calls are refused deterministically through an explicit
//! `Submitting` state rather than being allowed to race. A successful
//! POST is the only event that starts the cooldown.

use crate::client::{Backend, MessagePayload, TransportError};
use crate::config::{Config, CsrfMode};
use crate::cooldown::{CooldownStatus, CooldownTimer};
use crate::limiter::{AttemptStore, SlidingWindowLimiter, FALLBACK_IDENTIFIER};
use crate::sanitizer::sanitize;
use crate::validator::{MessageValidator, ValidationError, ValidationResult};
use std::time::Instant;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Where a rate limit was enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitScope {
    /// Refused by the local sliding-window limiter.
    Local,
    /// Refused by the backend with HTTP 429.
    Server,
}

impl std::fmt::Display for RateLimitScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Server => write!(f, "server"),
        }
    }
}

/// Why a submission was refused. Every variant is user-presentable and
/// none is fatal; the form stays usable, subject to the cooldown.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("please wait {} s before sending again", .remaining_ms.div_ceil(1000))]
    CooldownActive { remaining_ms: u64 },

    #[error("too many requests, please try again later")]
    RateLimited(RateLimitScope),

    #[error(transparent)]
    Rejected(ValidationError),

    #[error("the server refused the message: {}", .0.as_deref().unwrap_or("invalid message"))]
    BadRequest(Option<String>),

    #[error("a submission is already in progress")]
    SubmissionInFlight,

    #[error("network failure while sending the message")]
    Network(String),

    #[error("something went wrong while sending the message")]
    Unknown,
}

impl SubmitError {
    /// Whether the refusal was resolved locally, before any network send.
    fn is_local(&self) -> bool {
        matches!(
            self,
            Self::CooldownActive { .. }
                | Self::RateLimited(RateLimitScope::Local)
                | Self::Rejected(_)
                | Self::SubmissionInFlight
        )
    }
}

/// Transient per-form submission state.
#[derive(Debug, Clone)]
pub enum SubmissionState {
    Idle,
    Blocked(SubmitError),
    Submitting,
    Succeeded,
    Failed(SubmitError),
}

/// Outcome of one `submit` call.
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// The backend accepted the message; the cooldown has started.
    Accepted,
    /// The submission was refused.
    Refused(SubmitError),
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted)
    }

    pub fn error(&self) -> Option<&SubmitError> {
        match self {
            SubmitOutcome::Accepted => None,
            SubmitOutcome::Refused(e) => Some(e),
        }
    }
}

struct Gate {
    cooldown: CooldownTimer,
    state: SubmissionState,
}

/// Submission controller for one form instance.
///
/// Owns the cooldown timer and the submission state exclusively; shares
/// the attempt store with whatever else the application scoped it to.
pub struct SubmissionController<B: Backend> {
    backend: B,
    validator: MessageValidator,
    limiter: SlidingWindowLimiter,
    csrf_token: Option<String>,
    gate: Mutex<Gate>,
}

impl<B: Backend> SubmissionController<B> {
    /// Mount the controller: when the configuration requires CSRF, the
    /// token is fetched here, once, and reused for every submission.
    pub async fn mount(
        backend: B,
        config: Config,
        store: AttemptStore,
    ) -> Result<Self, TransportError> {
        let csrf_token = match config.csrf {
            CsrfMode::Required => {
                let token = backend.fetch_csrf_token().await?;
                debug!("CSRF token acquired");
                Some(token)
            }
            CsrfMode::Absent => None,
        };

        Ok(Self {
            backend,
            validator: MessageValidator::new(config.validation.clone()),
            limiter: SlidingWindowLimiter::new(config.rate_limit.clone(), store),
            csrf_token,
            gate: Mutex::new(Gate {
                cooldown: CooldownTimer::new(config.cooldown_duration()),
                state: SubmissionState::Idle,
            }),
        })
    }

    /// Submit a raw message.
    pub async fn submit(&self, raw_text: &str) -> SubmitOutcome {
        // Gate phase: refuse while cooling or while another submit is in
        // flight, otherwise claim the Submitting slot. The lock is not
        // held across any await.
        {
            let mut gate = self.gate.lock().await;

            if matches!(gate.state, SubmissionState::Submitting) {
                debug!("Submission already in flight");
                return SubmitOutcome::Refused(SubmitError::SubmissionInFlight);
            }

            if let CooldownStatus::Cooling { remaining } = gate.cooldown.status(Instant::now()) {
                let err = SubmitError::CooldownActive {
                    remaining_ms: remaining.as_millis() as u64,
                };
                debug!(remaining_ms = remaining.as_millis() as u64, "Cooldown active");
                gate.state = SubmissionState::Blocked(err.clone());
                return SubmitOutcome::Refused(err);
            }

            gate.state = SubmissionState::Submitting;
        }

        let outcome = self.run_submission(raw_text).await;

        let mut gate = self.gate.lock().await;
        match &outcome {
            SubmitOutcome::Accepted => {
                gate.cooldown.record_send(Instant::now());
                gate.state = SubmissionState::Succeeded;
                info!("Message accepted for moderation");
            }
            SubmitOutcome::Refused(err) => {
                info!(error = %err, "Submission refused");
                gate.state = if err.is_local() {
                    SubmissionState::Blocked(err.clone())
                } else {
                    SubmissionState::Failed(err.clone())
                };
            }
        }
        outcome
    }

    /// The stages after the gate: rate limit, validate, sanitize, send.
    async fn run_submission(&self, raw_text: &str) -> SubmitOutcome {
        let identifier = match self.backend.client_ip().await {
            Ok(ip) => ip,
            Err(err) => {
                // Unresolvable clients all share one bucket.
                warn!(error = %err, "IP lookup failed, using fallback identifier");
                FALLBACK_IDENTIFIER.to_string()
            }
        };

        if !self
            .limiter
            .check_and_record(&identifier, Instant::now())
            .await
        {
            return SubmitOutcome::Refused(SubmitError::RateLimited(RateLimitScope::Local));
        }

        if let ValidationResult::Invalid(err) = self.validator.validate(raw_text) {
            return SubmitOutcome::Refused(SubmitError::Rejected(err));
        }

        let payload = MessagePayload {
            content: sanitize(raw_text),
        };

        let response = match self
            .backend
            .post_message(&payload, self.csrf_token.as_deref())
            .await
        {
            Ok(response) => response,
            Err(TransportError::Network(e)) => {
                return SubmitOutcome::Refused(SubmitError::Network(e))
            }
            Err(TransportError::MalformedResponse) => {
                return SubmitOutcome::Refused(SubmitError::Unknown)
            }
        };

        if response.is_success() {
            SubmitOutcome::Accepted
        } else {
            match response.status {
                429 => SubmitOutcome::Refused(SubmitError::RateLimited(RateLimitScope::Server)),
                400 => SubmitOutcome::Refused(SubmitError::BadRequest(response.server_message)),
                _ => SubmitOutcome::Refused(SubmitError::Unknown),
            }
        }
    }

    /// Current submission state.
    pub async fn state(&self) -> SubmissionState {
        self.gate.lock().await.state.clone()
    }

    /// Remaining cooldown, if any.
    pub async fn cooldown_remaining(&self) -> Option<std::time::Duration> {
        match self.gate.lock().await.cooldown.status(Instant::now()) {
            CooldownStatus::Ready => None,
            CooldownStatus::Cooling { remaining } => Some(remaining),
        }
    }
}
