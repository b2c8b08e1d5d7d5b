use thiserror::Error;

/// Top-level error type for the `ovenwatch-api` crate.
///
/// Covers every way a single stats request can fail: transport,
/// non-success HTTP status, and payload decoding. `ovenwatch-core`
/// folds all of them into a single poll failure.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(String),

    // ── Server ──────────────────────────────────────────────────────
    /// The endpoint answered with a non-2xx status.
    #[error("Stats endpoint returned HTTP {status}")]
    Status { status: u16, body: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the request never produced a response
    /// (connection refused, timeout, DNS).
    pub fn is_unreachable(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// Returns `true` if the server answered but the body could not be decoded.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Deserialization { .. })
    }

    /// The HTTP status code, if the failure carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
