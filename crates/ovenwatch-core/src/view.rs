// ── Dashboard view model ──
//
// Everything a render target draws, derived from the latest applied poll
// outcome. Outcomes carry the sequence number of the cycle that produced
// them; anything at or below `last_sequence` is stale and ignored.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{Ingredient, IngredientCounts, Station, StatsSnapshot};

/// Opacity of a row for a station that is out of service.
pub const DIMMED_OPACITY: f32 = 0.5;

// ── ConnectionState ──────────────────────────────────────────────

/// State of the connectivity indicator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub enum ConnectionState {
    /// No cycle has resolved yet.
    #[default]
    Connecting,
    /// The most recent applied cycle succeeded.
    Connected,
    /// The most recent applied cycle failed.
    Disconnected { reason: String },
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connecting => f.write_str("connecting"),
            Self::Connected => f.write_str("connected"),
            Self::Disconnected { reason } => write!(f, "disconnected ({reason})"),
        }
    }
}

// ── Ingredient bars ──────────────────────────────────────────────

/// One `count-X` / `bar-X` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IngredientBar {
    pub ingredient: Ingredient,
    pub count: u64,
    /// Bar width in percent of the summed counts; 0 when nothing was used.
    pub pct: f64,
}

/// Bars for every category, in display order.
pub fn ingredient_bars(counts: &IngredientCounts) -> Vec<IngredientBar> {
    counts
        .iter()
        .map(|(ingredient, count)| IngredientBar {
            ingredient,
            count,
            pct: counts.share_pct(ingredient),
        })
        .collect()
}

// ── Station rows ─────────────────────────────────────────────────

/// A badge shown in a station row header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Badge {
    /// Supported size. Always present.
    Size(String),
    /// Joined restriction list. Only present when non-empty.
    Restriction(String),
    /// The station is unavailable.
    OutOfService,
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Size(size) if size.is_empty() => f.write_str("Size any"),
            Self::Size(size) => write!(f, "Size {size}"),
            Self::Restriction(text) => write!(f, "🚫 {text}"),
            Self::OutOfService => f.write_str("OUT OF SERVICE"),
        }
    }
}

/// One rendered station row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationRow {
    pub id: i64,
    pub current_load: u32,
    pub max_capacity: u32,
    /// Load ratio in percent; may exceed 100.
    pub ratio_pct: f64,
    /// Ratio at or above 100%: drawn with the "full" style.
    pub is_full: bool,
    pub badges: Vec<Badge>,
    /// Station unavailable: drawn at reduced opacity.
    pub dimmed: bool,
}

impl StationRow {
    pub fn from_station(station: &Station) -> Self {
        let mut badges = vec![Badge::Size(station.size.clone())];
        if let Some(text) = station.restriction_text() {
            badges.push(Badge::Restriction(text));
        }
        if !station.available {
            badges.push(Badge::OutOfService);
        }

        Self {
            id: station.id,
            current_load: station.current_load,
            max_capacity: station.max_capacity,
            ratio_pct: station.load_pct(),
            is_full: station.is_full(),
            badges,
            dimmed: !station.available,
        }
    }

    pub fn opacity(&self) -> f32 {
        if self.dimmed { DIMMED_OPACITY } else { 1.0 }
    }

    pub fn title(&self) -> String {
        format!("Station #{}", self.id)
    }

    pub fn load_text(&self) -> String {
        format!("{} / {} pizzas", self.current_load, self.max_capacity)
    }

    pub fn is_out_of_service(&self) -> bool {
        self.badges.contains(&Badge::OutOfService)
    }
}

/// Rows for every station, sorted by ascending id.
pub fn station_rows(stations: &[Station]) -> Vec<StationRow> {
    let mut rows: Vec<StationRow> = stations.iter().map(StationRow::from_station).collect();
    rows.sort_by_key(|row| row.id);
    rows
}

// ── DashboardState ───────────────────────────────────────────────

/// The complete view model. A fresh poll replaces every derived field.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardState {
    pub connection: ConnectionState,
    /// `nb-accepted`; `None` until the first successful poll.
    pub accepted: Option<u64>,
    /// `nb-refused`; `None` until the first successful poll.
    pub refused: Option<u64>,
    /// `None` when the endpoint serves the flat payload form.
    pub ingredients: Option<Vec<IngredientBar>>,
    /// `None` when the endpoint serves the flat payload form.
    pub stations: Option<Vec<StationRow>>,
    pub last_success: Option<DateTime<Utc>>,
    /// Sequence number of the last applied outcome.
    pub last_sequence: u64,
    pub polls_ok: u64,
    pub polls_failed: u64,
}

impl DashboardState {
    /// Render a successful poll. Returns `false` (and changes nothing) when
    /// `sequence` is not newer than the last applied outcome.
    pub fn apply_snapshot(
        &mut self,
        sequence: u64,
        snapshot: &StatsSnapshot,
        at: DateTime<Utc>,
    ) -> bool {
        if sequence <= self.last_sequence {
            return false;
        }
        self.last_sequence = sequence;
        self.accepted = Some(snapshot.accepted);
        self.refused = Some(snapshot.refused);
        self.ingredients = snapshot.ingredients.as_ref().map(ingredient_bars);
        self.stations = snapshot.stations.as_deref().map(station_rows);
        self.connection = ConnectionState::Connected;
        self.last_success = Some(at);
        self.polls_ok += 1;
        true
    }

    /// Flip the indicator to disconnected, keeping the last rendered data.
    /// Returns `false` when `sequence` is stale.
    pub fn apply_failure(&mut self, sequence: u64, reason: impl Into<String>) -> bool {
        if sequence <= self.last_sequence {
            return false;
        }
        self.last_sequence = sequence;
        self.connection = ConnectionState::Disconnected {
            reason: reason.into(),
        };
        self.polls_failed += 1;
        true
    }
}
