// ── Runtime poller configuration ──
//
// Describes *what* to poll and how often. Never touches disk; the binary
// resolves a `PollerConfig` from ovenwatch-config and CLI flags.

use std::time::Duration;

use url::Url;

use ovenwatch_api::{SnapshotShape, TlsMode, TransportConfig};

/// Endpoint served by the pizzeria's embedded web server.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:10000/api/stats";

/// TLS verification strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Skip verification (self-signed certs).
    DangerAcceptInvalid,
}

/// Configuration for a [`Poller`](crate::Poller).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollerConfig {
    /// Full URL of the stats endpoint.
    pub endpoint: Url,
    /// Expected payload form.
    pub shape: SnapshotShape,
    /// Period between cycles. The first cycle runs immediately.
    pub interval: Duration,
    /// Per-request timeout.
    pub timeout: Duration,
    pub tls: TlsVerification,
}

impl PollerConfig {
    /// Config for `endpoint` with the dashboard defaults (1s interval, 5s timeout).
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            shape: SnapshotShape::Auto,
            interval: Duration::from_secs(1),
            timeout: Duration::from_secs(5),
            tls: TlsVerification::default(),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_shape(mut self, shape: SnapshotShape) -> Self {
        self.shape = shape;
        self
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: match self.tls {
                TlsVerification::SystemDefaults => TlsMode::System,
                TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
            },
            timeout: self.timeout,
        }
    }
}
