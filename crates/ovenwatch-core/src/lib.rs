//! Data layer between `ovenwatch-api` and render targets (TUI, one-shot fetch).
//!
//! - **[`Poller`]**: Owns the stats client and the poll schedule:
//!   [`spawn()`](Poller::spawn) refreshes immediately, then once per
//!   configured interval. Every cycle is sequenced so a slow response can
//!   never overwrite a newer one.
//!
//! - **[`DashboardState`]**: The view model a render target draws:
//!   counters, ingredient bars, station rows and the connection indicator.
//!   Published through a `tokio::sync::watch` channel.
//!
//! - **Domain model** ([`model`]): [`StatsSnapshot`], [`Station`] and
//!   [`IngredientCounts`], converted from the wire types in [`convert`].

pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod poller;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{DEFAULT_ENDPOINT, PollerConfig, TlsVerification};
pub use error::CoreError;
pub use model::{Ingredient, IngredientCounts, Station, StatsSnapshot};
pub use poller::{CycleOutcome, Poller};
pub use view::{Badge, ConnectionState, DashboardState, IngredientBar, StationRow};

pub use ovenwatch_api::SnapshotShape;
