// Wire types for the `/api/stats` payload.
//
// Two payload forms exist in the wild: the flat counters-only form and the
// richer form nesting counters under `stats` next to a `stations` array.
// Both are decoded here; the core crate converts them into domain types.

use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString};

/// Which payload form the endpoint is expected to return.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SnapshotShape {
    /// Accept either form (rich is tried first).
    #[default]
    Auto,
    /// `{"accepted": n, "refused": n}`
    Flat,
    /// `{"stats": {...}, "stations": [...]}`
    Rich,
}

/// Per-category ingredient counters, keyed by their single-letter codes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireIngredients {
    #[serde(rename = "R", default)]
    pub r: u64,
    #[serde(rename = "J", default)]
    pub j: u64,
    #[serde(rename = "V", default)]
    pub v: u64,
    #[serde(rename = "B", default)]
    pub b: u64,
}

/// Order counters, plus ingredient totals when the server tracks them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireCounters {
    pub accepted: u64,
    pub refused: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<WireIngredients>,
}

/// A production station as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireStation {
    pub id: i64,
    #[serde(default)]
    pub current_load: u32,
    #[serde(default)]
    pub max_capacity: u32,
    #[serde(default = "default_available")]
    pub available: bool,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub restrictions: Restrictions,
}

fn default_available() -> bool {
    true
}

/// The richer payload form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichPayload {
    pub stats: WireCounters,
    #[serde(default)]
    pub stations: Vec<WireStation>,
}

/// A decoded `/api/stats` body in either form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WirePayload {
    Rich(RichPayload),
    Flat(WireCounters),
}

impl WirePayload {
    pub fn shape(&self) -> SnapshotShape {
        match self {
            Self::Rich(_) => SnapshotShape::Rich,
            Self::Flat(_) => SnapshotShape::Flat,
        }
    }

    pub fn counters(&self) -> &WireCounters {
        match self {
            Self::Rich(rich) => &rich.stats,
            Self::Flat(flat) => flat,
        }
    }
}

// ── Restrictions ────────────────────────────────────────────────────

/// Station restrictions, normalized at decode time.
///
/// The server sends either free text or an array of strings. Text becomes a
/// single entry, kept as sent apart from surrounding whitespace; an array is
/// kept entry for entry. Either form collapses to an empty list when its
/// display text (entries joined with `, `) is blank or a dash placeholder
/// (`-`, `---`), so "no restriction" is always an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Restrictions(Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRestrictions {
    Text(String),
    List(Vec<String>),
}

fn is_placeholder(text: &str) -> bool {
    let text = text.trim();
    text.is_empty() || text.chars().all(|c| c == '-')
}

impl Restrictions {
    /// Build from the array form. Entries are not split or trimmed.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries: Vec<String> = entries.into_iter().map(Into::into).collect();
        if is_placeholder(&entries.join(", ")) {
            Self::default()
        } else {
            Self(entries)
        }
    }

    /// Build from the free-text form.
    pub fn parse(text: &str) -> Self {
        if is_placeholder(text) {
            Self::default()
        } else {
            Self(vec![text.trim().to_owned()])
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl<'de> Deserialize<'de> for Restrictions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<RawRestrictions>::deserialize(deserializer)? {
            None => Self::default(),
            Some(RawRestrictions::Text(text)) => Self::parse(&text),
            Some(RawRestrictions::List(list)) => Self::new(list),
        })
    }
}
