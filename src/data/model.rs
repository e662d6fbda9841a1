use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// TransferRecord – one player movement between two clubs
// ---------------------------------------------------------------------------

/// A single transfer (one row of the source table).
///
/// Serde names match the column names of the exported dataset exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRecord {
    /// Transfer-market period label, e.g. `"23/24"`.
    #[serde(rename = "Season")]
    pub season: String,
    #[serde(rename = "name")]
    pub player_name: String,
    #[serde(rename = "Club From")]
    pub club_from: String,
    #[serde(rename = "Club To")]
    pub club_to: String,
    #[serde(rename = "Latitude From")]
    pub lat_from: f64,
    #[serde(rename = "Longitude From")]
    pub lon_from: f64,
    #[serde(rename = "Latitude To")]
    pub lat_to: f64,
    #[serde(rename = "Longitude To")]
    pub lon_to: f64,
    #[serde(rename = "Market Value")]
    pub market_value: f64,
    /// Transfer fee in euros; zero for free transfers and loans.
    #[serde(rename = "Fee")]
    pub fee: f64,
}

impl TransferRecord {
    /// Origin as `(lat, lon)`.
    pub fn origin(&self) -> (f64, f64) {
        (self.lat_from, self.lon_from)
    }

    /// Destination as `(lat, lon)`.
    pub fn destination(&self) -> (f64, f64) {
        (self.lat_to, self.lon_to)
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full, validated dataset with a pre-computed season index.
///
/// Built once and shared read-only; nothing mutates it after loading.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// All transfers, in input order.
    pub records: Vec<TransferRecord>,
    /// Sorted set of distinct season labels.
    pub seasons: BTreeSet<String>,
}

impl Dataset {
    /// Build the season index from already validated records.
    pub fn from_records(records: Vec<TransferRecord>) -> Self {
        let seasons = records.iter().map(|r| r.season.clone()).collect();
        Dataset { records, seasons }
    }

    /// Number of transfers.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_season(&self, season: &str) -> bool {
        self.seasons.contains(season)
    }
}

#[cfg(test)]
pub(crate) fn record(season: &str, from: &str, to: &str, fee: f64) -> TransferRecord {
    TransferRecord {
        season: season.to_string(),
        player_name: format!("{from} to {to}"),
        club_from: from.to_string(),
        club_to: to.to_string(),
        lat_from: 45.8131,
        lon_from: 15.978,
        lat_to: 52.3676,
        lon_to: 4.9041,
        market_value: 1_000_000.0,
        fee,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn season_index_is_sorted_and_deduplicated() {
        let ds = Dataset::from_records(vec![
            record("23/24", "A", "B", 1.0),
            record("21/22", "A", "B", 1.0),
            record("23/24", "B", "A", 1.0),
        ]);
        let seasons: Vec<&str> = ds.seasons.iter().map(String::as_str).collect();
        assert_eq!(seasons, vec!["21/22", "23/24"]);
        assert_eq!(ds.len(), 3);
        assert!(ds.has_season("21/22"));
        assert!(!ds.has_season("22/23"));
    }

    #[test]
    fn serde_uses_source_column_names() {
        let json = serde_json::to_value(record("22/23", "A", "B", 5.0)).unwrap();
        assert_eq!(json["Season"], "22/23");
        assert_eq!(json["Club From"], "A");
        assert_eq!(json["Fee"], 5.0);
    }
}
