// ── Domain model ──
//
// Canonical types for one stats snapshot. Everything here is transient:
// each poll replaces the previous snapshot wholesale.

pub mod ingredient;
pub mod station;

use serde::{Deserialize, Serialize};

pub use ingredient::{Ingredient, IngredientCounts};
pub use station::Station;

/// System state at poll time, as reported by `/api/stats`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    /// Orders accepted since the server started.
    pub accepted: u64,
    /// Orders refused since the server started.
    pub refused: u64,
    /// Ingredient consumption. `None` for the flat payload form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<IngredientCounts>,
    /// Production stations, in server order. `None` for the flat payload form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stations: Option<Vec<Station>>,
}
