// ── Core error types ──
//
// The dashboard reacts to exactly one failure kind: a poll that did not
// produce a snapshot. Transport, HTTP status and decode errors from
// `ovenwatch-api` all fold into `PollFailure`.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Fetching or decoding a snapshot failed.
    #[error("Poll failed: {0}")]
    PollFailure(#[from] ovenwatch_api::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Short, cause-agnostic reason shown next to the connection indicator.
    pub fn indicator_reason(&self) -> String {
        match self {
            Self::PollFailure(e) if e.is_unreachable() => "endpoint unreachable".into(),
            Self::PollFailure(e) if e.is_decode() => "malformed payload".into(),
            Self::PollFailure(e) => match e.status() {
                Some(status) => format!("HTTP {status}"),
                None => "request failed".into(),
            },
            Self::Config { message } => message.clone(),
        }
    }
}
