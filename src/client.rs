// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! HTTP collaborators for the submission controller.
//!
//! [`Backend`] is the seam between the gatekeeper and the network: the
//! CSRF token endpoint, the external IP lookup, and the message POST.
//! [`HttpBackend`] is the production implementation; tests substitute
//! their own.

use crate::config::EndpointConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// CSRF token request header, echoed back exactly as the backend issues it.
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Transport-level failure talking to a collaborator.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("network failure: {0}")]
    Network(String),

    #[error("malformed response body")]
    MalformedResponse,
}

/// JSON body sent to the submission endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagePayload {
    pub content: String,
}

/// Interpreted reply from the submission endpoint: the HTTP status plus
/// the server's error message when it sent one.
#[derive(Debug, Clone)]
pub struct SubmitResponse {
    pub status: u16,
    pub server_message: Option<String>,
}

impl SubmitResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Deserialize)]
struct CsrfTokenBody {
    csrf_token: String,
}

#[derive(Debug, Deserialize)]
struct IpBody {
    ip: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Network seam used by the submission controller.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Fetch the opaque CSRF token issued for this form session.
    async fn fetch_csrf_token(&self) -> Result<String, TransportError>;

    /// Resolve the client's externally visible IP address.
    async fn client_ip(&self) -> Result<String, TransportError>;

    /// POST a sanitized message, attaching the CSRF header when a token
    /// is present.
    async fn post_message(
        &self,
        payload: &MessagePayload,
        csrf_token: Option<&str>,
    ) -> Result<SubmitResponse, TransportError>;
}

/// Production [`Backend`] speaking to the real endpoints over reqwest.
pub struct HttpBackend {
    http: reqwest::Client,
    endpoints: EndpointConfig,
}

impl HttpBackend {
    /// Create a backend for the given endpoints.
    pub fn new(endpoints: EndpointConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoints,
        }
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn fetch_csrf_token(&self) -> Result<String, TransportError> {
        let url = self.endpoints.csrf_token_url();
        debug!(%url, "Fetching CSRF token");
        let body: CsrfTokenBody = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?
            .json()
            .await
            .map_err(|_| TransportError::MalformedResponse)?;
        Ok(body.csrf_token)
    }

    async fn client_ip(&self) -> Result<String, TransportError> {
        let url = &self.endpoints.ip_lookup_url;
        debug!(%url, "Resolving client IP");
        let body: IpBody = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?
            .json()
            .await
            .map_err(|_| TransportError::MalformedResponse)?;
        Ok(body.ip)
    }

    async fn post_message(
        &self,
        payload: &MessagePayload,
        csrf_token: Option<&str>,
    ) -> Result<SubmitResponse, TransportError> {
        let url = self.endpoints.submit_url();
        debug!(%url, csrf = csrf_token.is_some(), "Posting message");

        let mut request = self.http.post(&url).json(payload);
        if let Some(token) = csrf_token {
            request = request.header(CSRF_HEADER, token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        let status = response.status().as_u16();

        // Only the 400 reply carries a message worth surfacing.
        let server_message = if status == 400 {
            response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|b| b.error)
        } else {
            None
        };

        Ok(SubmitResponse {
            status,
            server_message,
        })
    }
}
