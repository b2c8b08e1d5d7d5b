// ── Wire → domain conversion ──
//
// Flattens both payload forms into one `StatsSnapshot`. Restrictions are
// already normalized by the wire decoder.

use ovenwatch_api::{WireCounters, WireIngredients, WirePayload, WireStation};

use crate::model::{IngredientCounts, Station, StatsSnapshot};

impl From<WireIngredients> for IngredientCounts {
    fn from(w: WireIngredients) -> Self {
        Self {
            red: w.r,
            yellow: w.j,
            green: w.v,
            blue: w.b,
        }
    }
}

impl From<WireStation> for Station {
    fn from(w: WireStation) -> Self {
        Self {
            id: w.id,
            current_load: w.current_load,
            max_capacity: w.max_capacity,
            available: w.available,
            size: w.size.trim().to_owned(),
            restrictions: w.restrictions.into_vec(),
        }
    }
}

fn from_counters(counters: WireCounters, stations: Option<Vec<WireStation>>) -> StatsSnapshot {
    StatsSnapshot {
        accepted: counters.accepted,
        refused: counters.refused,
        ingredients: counters.ingredients.map(IngredientCounts::from),
        stations: stations.map(|s| s.into_iter().map(Station::from).collect()),
    }
}

impl From<WirePayload> for StatsSnapshot {
    fn from(payload: WirePayload) -> Self {
        match payload {
            WirePayload::Rich(rich) => from_counters(rich.stats, Some(rich.stations)),
            WirePayload::Flat(flat) => from_counters(flat, None),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use ovenwatch_api::{SnapshotShape, decode};

    #[test]
    fn flat_payload_has_no_ingredients_or_stations() {
        let payload = decode(r#"{"accepted": 4, "refused": 1}"#, SnapshotShape::Auto).unwrap();
        let snap = StatsSnapshot::from(payload);
        assert_eq!(snap.accepted, 4);
        assert_eq!(snap.refused, 1);
        assert!(snap.ingredients.is_none());
        assert!(snap.stations.is_none());
    }

    #[test]
    fn rich_payload_maps_every_field() {
        let body = r#"{
            "stats": {"accepted": 9, "refused": 2, "ingredients": {"R": 1, "J": 2, "V": 3, "B": 4}},
            "stations": [{"id": 2, "current_load": 5, "max_capacity": 25, "available": false,
                          "size": " M ", "restrictions": ["gluten"]}]
        }"#;
        let snap = StatsSnapshot::from(decode(body, SnapshotShape::Rich).unwrap());

        let ingredients = snap.ingredients.unwrap();
        assert_eq!(
            (ingredients.red, ingredients.yellow, ingredients.green, ingredients.blue),
            (1, 2, 3, 4)
        );

        let stations = snap.stations.unwrap();
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].size, "M");
        assert!(!stations[0].available);
        assert_eq!(stations[0].restrictions, vec!["gluten".to_string()]);
    }

    #[test]
    fn rich_payload_without_stations_is_empty_list() {
        let body = r#"{"stats": {"accepted": 0, "refused": 0}}"#;
        let snap = StatsSnapshot::from(decode(body, SnapshotShape::Rich).unwrap());
        assert_eq!(snap.stations, Some(Vec::new()));
    }
}
