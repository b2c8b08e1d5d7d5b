// ── Production station ──

use serde::{Deserialize, Serialize};

/// A production station (oven) with parallel capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    /// Unique within a snapshot; stations are displayed in ascending order.
    pub id: i64,
    /// Pizzas currently in progress. May exceed `max_capacity`.
    pub current_load: u32,
    pub max_capacity: u32,
    /// `false` when the station is out of service.
    pub available: bool,
    /// Supported pizza size; empty means any size.
    pub size: String,
    /// Pizzas this station refuses. Empty means no restriction.
    pub restrictions: Vec<String>,
}

impl Station {
    /// `current_load / max_capacity` in percent. 0 when capacity is 0.
    pub fn load_pct(&self) -> f64 {
        if self.max_capacity == 0 {
            return 0.0;
        }
        f64::from(self.current_load) / f64::from(self.max_capacity) * 100.0
    }

    /// At or over capacity.
    pub fn is_full(&self) -> bool {
        self.load_pct() >= 100.0
    }

    /// Restrictions joined for display, or `None` when unrestricted.
    pub fn restriction_text(&self) -> Option<String> {
        if self.restrictions.is_empty() {
            None
        } else {
            Some(self.restrictions.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(load: u32, capacity: u32) -> Station {
        Station {
            id: 1,
            current_load: load,
            max_capacity: capacity,
            available: true,
            size: String::new(),
            restrictions: Vec::new(),
        }
    }

    #[test]
    fn exactly_at_capacity_is_full() {
        assert!(station(50, 50).is_full());
        assert!(!station(49, 50).is_full());
    }

    #[test]
    fn overload_is_full_and_exceeds_hundred() {
        let s = station(30, 20);
        assert!(s.is_full());
        assert!(s.load_pct() > 100.0);
    }

    #[test]
    fn zero_capacity_is_empty_not_nan() {
        let s = station(3, 0);
        assert!(s.load_pct().abs() < f64::EPSILON);
        assert!(!s.is_full());
    }

    #[test]
    fn restriction_text_joins_with_comma() {
        let mut s = station(0, 10);
        assert_eq!(s.restriction_text(), None);
        s.restrictions = vec!["Chevre".into(), "4_Fromages".into()];
        assert_eq!(s.restriction_text().as_deref(), Some("Chevre, 4_Fromages"));
    }
}
