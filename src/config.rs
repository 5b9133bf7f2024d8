// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Configuration for the submission gatekeeper.
//!
//! The two message-form variants that previously shipped as separate
//! near-identical components collapse into one [`Config`] record here.
//! All values have compile-time defaults; nothing is read from the
//! environment.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Maximum message length in characters, shared by the form widget and the
/// validator.
pub const MAX_MESSAGE_CHARS: usize = 4096;

/// Configuration for the submission gatekeeper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Minimum delay after a successful send before the next one (default: 60000 ms)
    #[serde(default = "default_cooldown_ms")]
    pub cooldown_ms: u64,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Validation configuration
    #[serde(default)]
    pub validation: ValidationConfig,

    /// CSRF token handling
    #[serde(default)]
    pub csrf: CsrfMode,

    /// Endpoint URLs
    #[serde(default)]
    pub endpoints: EndpointConfig,
}

/// Sliding-window rate limiting configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Whether local rate limiting is applied at all (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Maximum attempts inside the window (default: 5)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Window length in seconds (default: 60)
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

/// Message validation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Maximum message length in characters (default: 4096)
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,

    /// Case-insensitive forbidden substrings (default: empty)
    #[serde(default)]
    pub forbidden_words: Vec<String>,

    /// Character-set policy (default: unrestricted)
    #[serde(default)]
    pub charset: CharsetPolicy,

    /// URL policy (default: allow)
    #[serde(default)]
    pub urls: UrlPolicy,
}

/// Which characters a message may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharsetPolicy {
    /// Any character is permitted.
    #[default]
    Unrestricted,
    /// Only letters, digits, whitespace and a fixed punctuation set.
    Allowlist,
}

/// Whether a message that is itself a URL is permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrlPolicy {
    /// URLs are ordinary text.
    #[default]
    Allow,
    /// A message consisting of a URL with an explicit protocol is rejected.
    Reject,
}

/// CSRF token handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CsrfMode {
    /// Fetch a token once at mount and attach it to every submit.
    #[default]
    Required,
    /// No token endpoint; submits carry no token header.
    Absent,
}

/// Endpoint URLs for the backend and external collaborators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Base URL of the backend serving the form (default: http://127.0.0.1:8080)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the message submission endpoint (default: /api/add_message)
    #[serde(default = "default_submit_path")]
    pub submit_path: String,

    /// Path of the CSRF token endpoint (default: /api/get-csrf-token)
    #[serde(default = "default_csrf_path")]
    pub csrf_token_path: String,

    /// External IP lookup used to derive the rate-limit identifier
    #[serde(default = "default_ip_lookup_url")]
    pub ip_lookup_url: String,
}

// Default value functions
fn default_cooldown_ms() -> u64 {
    60_000
}

fn default_max_attempts() -> u32 {
    5
}

fn default_window_secs() -> u64 {
    60
}

fn default_max_chars() -> usize {
    MAX_MESSAGE_CHARS
}

fn default_true() -> bool {
    true
}

fn default_base_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_submit_path() -> String {
    "/api/add_message".to_string()
}

fn default_csrf_path() -> String {
    "/api/get-csrf-token".to_string()
}

fn default_ip_lookup_url() -> String {
    "https://api.ipify.org?format=json".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cooldown_ms: default_cooldown_ms(),
            rate_limit: RateLimitConfig::default(),
            validation: ValidationConfig::default(),
            csrf: CsrfMode::default(),
            endpoints: EndpointConfig::default(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            max_attempts: default_max_attempts(),
            window_secs: default_window_secs(),
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_chars: default_max_chars(),
            forbidden_words: Vec::new(),
            charset: CharsetPolicy::default(),
            urls: UrlPolicy::default(),
        }
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            submit_path: default_submit_path(),
            csrf_token_path: default_csrf_path(),
            ip_lookup_url: default_ip_lookup_url(),
        }
    }
}

impl Config {
    /// Profile of the stricter form variant: short cooldown, allowlisted
    /// character set, URLs rejected, no CSRF endpoint and no local rate
    /// limiting.
    pub fn restricted() -> Self {
        Self {
            cooldown_ms: 15_000,
            rate_limit: RateLimitConfig {
                enabled: false,
                ..Default::default()
            },
            validation: ValidationConfig {
                charset: CharsetPolicy::Allowlist,
                urls: UrlPolicy::Reject,
                ..Default::default()
            },
            csrf: CsrfMode::Absent,
            ..Default::default()
        }
    }

    /// Get the cooldown duration.
    pub fn cooldown_duration(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }
}

impl RateLimitConfig {
    /// Get the rate window duration.
    pub fn window_duration(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }
}

impl EndpointConfig {
    /// Full URL of the submission endpoint.
    pub fn submit_url(&self) -> String {
        format!("{}{}", self.base_url, self.submit_path)
    }

    /// Full URL of the CSRF token endpoint.
    pub fn csrf_token_url(&self) -> String {
        format!("{}{}", self.base_url, self.csrf_token_path)
    }
}
