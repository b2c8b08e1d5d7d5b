// ── Ingredient categories ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The four tracked ingredient categories, keyed on the wire by a single
/// letter code.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
pub enum Ingredient {
    #[serde(rename = "R")]
    #[strum(serialize = "R")]
    Red,
    #[serde(rename = "J")]
    #[strum(serialize = "J")]
    Yellow,
    #[serde(rename = "V")]
    #[strum(serialize = "V")]
    Green,
    #[serde(rename = "B")]
    #[strum(serialize = "B")]
    Blue,
}

impl Ingredient {
    /// All categories in display order.
    pub const ALL: [Ingredient; 4] = [Self::Red, Self::Yellow, Self::Green, Self::Blue];

    /// Single-letter wire code.
    pub fn code(self) -> char {
        match self {
            Self::Red => 'R',
            Self::Yellow => 'J',
            Self::Green => 'V',
            Self::Blue => 'B',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::Yellow => "Yellow",
            Self::Green => "Green",
            Self::Blue => "Blue",
        }
    }
}

/// Consumption counters for every [`Ingredient`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientCounts {
    #[serde(rename = "R")]
    pub red: u64,
    #[serde(rename = "J")]
    pub yellow: u64,
    #[serde(rename = "V")]
    pub green: u64,
    #[serde(rename = "B")]
    pub blue: u64,
}

impl IngredientCounts {
    pub fn get(&self, ingredient: Ingredient) -> u64 {
        match ingredient {
            Ingredient::Red => self.red,
            Ingredient::Yellow => self.yellow,
            Ingredient::Green => self.green,
            Ingredient::Blue => self.blue,
        }
    }

    /// Sum of all counters. Wide enough that four `u64::MAX` cannot overflow.
    pub fn total(&self) -> u128 {
        Ingredient::ALL
            .iter()
            .map(|&i| u128::from(self.get(i)))
            .sum()
    }

    /// Share of `ingredient` in the total, in percent. 0 when the total is 0.
    #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
    pub fn share_pct(&self, ingredient: Ingredient) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.get(ingredient) as f64 / total as f64 * 100.0
    }

    /// `(ingredient, count)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Ingredient, u64)> + '_ {
        Ingredient::ALL.iter().map(move |&i| (i, self.get(i)))
    }
}
