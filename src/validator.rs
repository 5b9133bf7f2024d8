// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Message validator.
//!
//! An ordered checklist over the raw (unsanitized) text; the first failing
//! rule wins:
//!
//! 1. Empty or whitespace-only
//! 2. Over the character limit
//! 3. Outside the allowlisted character set (policy-dependent)
//! 4. Fewer than two distinct non-whitespace characters
//! 5. Contains a forbidden word (case-insensitive substring)
//! 6. Is itself a URL with an explicit protocol (policy-dependent)
//!
//! Every check is pure and deterministic; markup is deliberately not a
//! validation concern (the sanitizer handles it after validation).

use crate::config::{CharsetPolicy, UrlPolicy, ValidationConfig};
use std::collections::HashSet;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Punctuation permitted under [`CharsetPolicy::Allowlist`].
const ALLOWED_PUNCTUATION: &str = ".,!?;:()'\"-«»—…";

/// Validation error types, in user-presentable form.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("message must not be empty")]
    EmptyMessage,

    #[error("message is too long: at most {limit} characters are allowed")]
    TooLong { limit: usize },

    #[error("message contains characters outside the permitted set")]
    InvalidCharacters,

    #[error("message is little more than one repeated character")]
    RepeatedCharacters,

    #[error("message contains a forbidden word: {0:?}")]
    ForbiddenWord(String),

    #[error("links are not allowed in messages")]
    ContainsUrl,
}

/// Result of validation.
#[derive(Debug, Clone)]
pub enum ValidationResult {
    /// Message is acceptable
    Valid,
    /// Message is rejected
    Invalid(ValidationError),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(e) => Some(e),
        }
    }
}

/// Message validator.
pub struct MessageValidator {
    config: ValidationConfig,
}

impl MessageValidator {
    /// Create a new validator with the given configuration.
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate a raw message.
    pub fn validate(&self, text: &str) -> ValidationResult {
        if text.trim().is_empty() {
            debug!("Message empty or whitespace-only");
            return ValidationResult::Invalid(ValidationError::EmptyMessage);
        }

        let char_count = text.chars().count();
        if char_count > self.config.max_chars {
            debug!(char_count, limit = self.config.max_chars, "Message too long");
            return ValidationResult::Invalid(ValidationError::TooLong {
                limit: self.config.max_chars,
            });
        }

        if self.config.charset == CharsetPolicy::Allowlist {
            if let Some(bad) = text.chars().find(|c| !is_allowlisted(*c)) {
                debug!(character = %bad.escape_default(), "Character outside allowlist");
                return ValidationResult::Invalid(ValidationError::InvalidCharacters);
            }
        }

        let distinct: HashSet<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
        if distinct.len() < 2 {
            debug!("Fewer than two distinct non-whitespace characters");
            return ValidationResult::Invalid(ValidationError::RepeatedCharacters);
        }

        let lowered = text.to_lowercase();
        for word in &self.config.forbidden_words {
            if !word.is_empty() && lowered.contains(&word.to_lowercase()) {
                debug!(word = %word, "Forbidden word found");
                return ValidationResult::Invalid(ValidationError::ForbiddenWord(word.clone()));
            }
        }

        if self.config.urls == UrlPolicy::Reject && is_sole_url(text) {
            debug!("Message is a bare URL");
            return ValidationResult::Invalid(ValidationError::ContainsUrl);
        }

        ValidationResult::Valid
    }
}

fn is_allowlisted(c: char) -> bool {
    c.is_alphanumeric() || c.is_whitespace() || ALLOWED_PUNCTUATION.contains(c)
}

/// Whether the whole message parses as a URL with an explicit protocol.
fn is_sole_url(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.chars().any(char::is_whitespace) {
        return false;
    }
    match Url::parse(trimmed) {
        Ok(u) => matches!(u.scheme(), "http" | "https" | "ftp") && u.host_str().is_some(),
        Err(_) => false,
    }
}
