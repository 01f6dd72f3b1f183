use thiserror::Error;

/// Top-level error type for the `lbrep-api` crate.
///
/// Covers every failure mode across the three API surfaces:
/// Keystone authentication, transport, and the Neutron / Octavia REST APIs.
/// `lbrep-core` maps these into run-level diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Keystone rejected the credentials or returned no token.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// The service catalog has no endpoint matching the request.
    #[error("No {interface} endpoint for service '{service}' in the catalog{}", region_suffix(.region.as_deref()))]
    EndpointNotFound {
        service: String,
        interface: String,
        region: Option<String>,
    },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── REST APIs ───────────────────────────────────────────────────
    /// Non-success response from Neutron or Octavia.
    ///
    /// `body` keeps the raw payload so operators can see exactly what the
    /// service objected to.
    #[error("API error (HTTP {status}): {message}")]
    Api {
        status: u16,
        message: String,
        body: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

fn region_suffix(region: Option<&str>) -> String {
    region.map(|r| format!(" (region {r})")).unwrap_or_default()
}

impl Error {
    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Api { status: 404, .. } => true,
            _ => false,
        }
    }

    /// Returns `true` if the request ran out of time.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout(),
            Self::Timeout { .. } => true,
            _ => false,
        }
    }

    /// HTTP status of the failed response, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
