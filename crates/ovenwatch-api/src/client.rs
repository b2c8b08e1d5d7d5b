// Stats endpoint HTTP client
//
// Wraps `reqwest::Client` with the single GET the dashboard needs, status
// checking, and shape-aware payload decoding.

use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;
use crate::wire::{RichPayload, SnapshotShape, WireCounters, WirePayload};

/// Longest body excerpt kept inside decode errors.
const BODY_EXCERPT_LEN: usize = 512;

/// HTTP client for a stats endpoint such as `http://localhost:10000/api/stats`.
#[derive(Debug, Clone)]
pub struct StatsClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl StatsClient {
    /// Create a new client from a `TransportConfig`.
    pub fn new(endpoint: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, endpoint })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, endpoint: Url) -> Self {
        Self { http, endpoint }
    }

    /// The endpoint this client polls.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetch and decode one snapshot.
    pub async fn fetch(&self, shape: SnapshotShape) -> Result<WirePayload, Error> {
        debug!("GET {}", self.endpoint);

        let resp = self
            .http
            .get(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;
        trace!(status = status.as_u16(), bytes = body.len(), "stats response");

        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                body: excerpt(&body),
            });
        }

        decode(&body, shape)
    }
}

/// Decode a `/api/stats` body according to the expected shape.
pub fn decode(body: &str, shape: SnapshotShape) -> Result<WirePayload, Error> {
    match shape {
        SnapshotShape::Auto => parse::<WirePayload>(body),
        SnapshotShape::Flat => parse::<WireCounters>(body).map(WirePayload::Flat),
        SnapshotShape::Rich => parse::<RichPayload>(body).map(WirePayload::Rich),
    }
}

fn parse<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    serde_json::from_str(body).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body: excerpt(body),
    })
}

fn excerpt(body: &str) -> String {
    match body.char_indices().nth(BODY_EXCERPT_LEN) {
        Some((idx, _)) => format!("{}…", &body[..idx]),
        None => body.to_owned(),
    }
}
