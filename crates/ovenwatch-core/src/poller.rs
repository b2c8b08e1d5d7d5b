// ── Poller ──
//
// Owns the stats client and the poll schedule. Every cycle draws a
// sequence number when it is issued; its outcome is applied to the view
// model only if no newer cycle has been applied first. Ticks never wait
// for the previous cycle, so requests may overlap.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use ovenwatch_api::StatsClient;

use crate::config::PollerConfig;
use crate::error::CoreError;
use crate::model::StatsSnapshot;
use crate::view::DashboardState;

/// A client that cannot be built is a setup problem; no request was sent.
#[allow(clippy::needless_pass_by_value)]
fn client_build_error(err: ovenwatch_api::Error) -> CoreError {
    CoreError::Config {
        message: format!("failed to build HTTP client: {err}"),
    }
}

/// What a single cycle did to the view model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A snapshot was rendered and the indicator shows connected.
    Rendered,
    /// The cycle failed and the indicator shows disconnected.
    Disconnected,
    /// A newer cycle had already been applied; nothing changed.
    Stale,
}

/// Periodic `/api/stats` poller.
///
/// Cheaply cloneable via `Arc<PollerInner>`. Render targets subscribe to
/// the [`DashboardState`] watch channel.
#[derive(Clone)]
pub struct Poller {
    inner: Arc<PollerInner>,
}

struct PollerInner {
    config: PollerConfig,
    client: StatsClient,
    state: watch::Sender<Arc<DashboardState>>,
    /// Last issued sequence number. Cycles start at 1.
    issued: AtomicU64,
}

impl Poller {
    /// Build a poller and its HTTP client. Does NOT start polling --
    /// call [`spawn()`](Self::spawn) or [`refresh()`](Self::refresh).
    pub fn new(config: PollerConfig) -> Result<Self, CoreError> {
        if config.interval.is_zero() {
            return Err(CoreError::Config {
                message: "poll interval must be greater than zero".into(),
            });
        }
        let client = StatsClient::new(config.endpoint.clone(), &config.transport())
            .map_err(client_build_error)?;
        Ok(Self::with_client(client, config))
    }

    /// Build a poller around an existing client. The client's endpoint wins
    /// over `config.endpoint`.
    pub fn with_client(client: StatsClient, config: PollerConfig) -> Self {
        let (state, _) = watch::channel(Arc::new(DashboardState::default()));
        Self {
            inner: Arc::new(PollerInner {
                config,
                client,
                state,
                issued: AtomicU64::new(0),
            }),
        }
    }

    pub fn config(&self) -> &PollerConfig {
        &self.inner.config
    }

    /// Subscribe to view-model changes.
    pub fn subscribe(&self) -> watch::Receiver<Arc<DashboardState>> {
        self.inner.state.subscribe()
    }

    /// Current view model (cheap `Arc` clone).
    pub fn state(&self) -> Arc<DashboardState> {
        self.inner.state.borrow().clone()
    }

    /// Fetch one snapshot without touching the view model.
    pub async fn fetch_snapshot(&self) -> Result<StatsSnapshot, CoreError> {
        let payload = self.inner.client.fetch(self.inner.config.shape).await?;
        Ok(StatsSnapshot::from(payload))
    }

    /// Run one request/render cycle. Never fails: errors become a
    /// disconnected indicator.
    pub async fn refresh(&self) -> CycleOutcome {
        let sequence = self.inner.issued.fetch_add(1, Ordering::Relaxed) + 1;
        debug!(sequence, endpoint = %self.inner.client.endpoint(), "poll cycle started");
        let result = self.fetch_snapshot().await;
        self.complete(sequence, &result)
    }

    /// Apply the outcome of cycle `sequence` if it is the newest resolved one.
    fn complete(&self, sequence: u64, result: &Result<StatsSnapshot, CoreError>) -> CycleOutcome {
        if let Err(e) = result {
            warn!(sequence, error = %e, "stats poll failed");
        }

        let applied = self.inner.state.send_if_modified(|current| {
            let state = Arc::make_mut(current);
            match result {
                Ok(snapshot) => state.apply_snapshot(sequence, snapshot, Utc::now()),
                Err(e) => state.apply_failure(sequence, e.indicator_reason()),
            }
        });

        match (applied, result) {
            (false, _) => {
                debug!(sequence, "discarding stale poll outcome");
                CycleOutcome::Stale
            }
            (true, Ok(_)) => CycleOutcome::Rendered,
            (true, Err(_)) => CycleOutcome::Disconnected,
        }
    }

    /// Start the schedule: one cycle immediately, then one per interval.
    ///
    /// Each cycle runs in its own task so a slow response never delays the
    /// next tick. Stops issuing cycles once `cancel` fires.
    pub fn spawn(&self, cancel: CancellationToken) -> JoinHandle<()> {
        let poller = self.clone();
        let period = self.inner.config.interval.max(Duration::from_millis(1));

        tokio::spawn(async move {
            info!(
                endpoint = %poller.inner.client.endpoint(),
                interval = ?period,
                shape = %poller.inner.config.shape,
                "poller started"
            );

            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);

            loop {
                tokio::select! {
                    biased;

                    () = cancel.cancelled() => break,

                    _ = ticker.tick() => {
                        let cycle = poller.clone();
                        tokio::spawn(async move {
                            cycle.refresh().await;
                        });
                    }
                }
            }

            debug!("poller shut down");
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use ovenwatch_api::Error as ApiError;
    use url::Url;

    use crate::view::ConnectionState;

    fn poller() -> Poller {
        let endpoint = Url::parse("http://127.0.0.1:9/api/stats").unwrap();
        Poller::new(PollerConfig::new(endpoint)).unwrap()
    }

    fn snapshot(accepted: u64) -> Result<StatsSnapshot, CoreError> {
        Ok(StatsSnapshot {
            accepted,
            ..StatsSnapshot::default()
        })
    }

    fn failure() -> Result<StatsSnapshot, CoreError> {
        Err(CoreError::PollFailure(ApiError::Status {
            status: 502,
            body: String::new(),
        }))
    }

    #[test]
    fn client_build_failure_is_a_config_error() {
        let err = client_build_error(ApiError::Client("no TLS backend".into()));
        assert!(
            matches!(&err, CoreError::Config { message } if message.contains("no TLS backend")),
            "got {err:?}"
        );
        assert!(err.indicator_reason().starts_with("failed to build HTTP client"));
    }

    #[test]
    fn late_success_does_not_overwrite_newer_one() {
        let p = poller();
        assert_eq!(p.complete(2, &snapshot(20)), CycleOutcome::Rendered);
        assert_eq!(p.complete(1, &snapshot(10)), CycleOutcome::Stale);
        assert_eq!(p.state().accepted, Some(20));
    }

    #[test]
    fn late_failure_does_not_disconnect() {
        let p = poller();
        assert_eq!(p.complete(2, &snapshot(5)), CycleOutcome::Rendered);
        assert_eq!(p.complete(1, &failure()), CycleOutcome::Stale);
        assert!(p.state().connection.is_connected());
    }

    #[test]
    fn newer_failure_disconnects_but_keeps_counters() {
        let p = poller();
        p.complete(1, &snapshot(5));
        assert_eq!(p.complete(2, &failure()), CycleOutcome::Disconnected);

        let state = p.state();
        assert_eq!(
            state.connection,
            ConnectionState::Disconnected {
                reason: "HTTP 502".into()
            }
        );
        assert_eq!(state.accepted, Some(5));
    }

    #[test]
    fn subscribers_see_applied_outcomes_only() {
        let p = poller();
        let mut rx = p.subscribe();
        p.complete(1, &snapshot(1));
        assert!(rx.has_changed().unwrap());
        rx.borrow_and_update();

        p.complete(1, &snapshot(99));
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn zero_interval_is_rejected() {
        let endpoint = Url::parse("http://localhost/api/stats").unwrap();
        let config = PollerConfig::new(endpoint).with_interval(Duration::ZERO);
        assert!(matches!(Poller::new(config), Err(CoreError::Config { .. })));
    }
}
