use std::collections::{BTreeMap, BTreeSet};

use super::model::TransferRecord;

// ---------------------------------------------------------------------------
// Aggregate rows
// ---------------------------------------------------------------------------

/// Summed transfer fees of one season.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonFeeTotal {
    pub season: String,
    pub total_fee: f64,
}

/// Incoming / outgoing transfer counts of one season, relative to a
/// reference club.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionCount {
    pub season: String,
    pub incoming: u32,
    pub outgoing: u32,
}

// ---------------------------------------------------------------------------
// Season enumeration
// ---------------------------------------------------------------------------

/// Distinct season labels, ascending (byte-wise string order).
pub fn distinct_seasons(records: &[TransferRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.season.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Distinct season labels, newest first, as offered by the season selector.
pub fn seasons_descending(records: &[TransferRecord]) -> Vec<String> {
    let mut seasons = distinct_seasons(records);
    seasons.reverse();
    seasons
}

/// The lexicographically greatest season label, if any.
pub fn latest_season(records: &[TransferRecord]) -> Option<&str> {
    records.iter().map(|r| r.season.as_str()).max()
}

// ---------------------------------------------------------------------------
// Derived views
// ---------------------------------------------------------------------------

/// Records whose season equals `season` exactly, in original order.
///
/// An empty result is valid: it means nothing was transferred that season
/// (or the label is not present at all).
pub fn filter_by_season<'a>(records: &'a [TransferRecord], season: &str) -> Vec<&'a TransferRecord> {
    records.iter().filter(|r| r.season == season).collect()
}

/// Sum of fees per season, seasons ascending.
pub fn total_fee_by_season(records: &[TransferRecord]) -> Vec<SeasonFeeTotal> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for r in records {
        *totals.entry(r.season.as_str()).or_insert(0.0) += r.fee;
    }
    totals
        .into_iter()
        .map(|(season, total_fee)| SeasonFeeTotal {
            season: season.to_string(),
            total_fee,
        })
        .collect()
}

/// Per-season counts of transfers into (`club_to`) and out of (`club_from`)
/// `reference_club`, seasons ascending.
///
/// Every season of the input appears, even with both counts at zero. The two
/// directions are counted independently, so a record moving from the
/// reference club to itself adds to both.
pub fn transfer_direction_counts(
    records: &[TransferRecord],
    reference_club: &str,
) -> Vec<DirectionCount> {
    let mut counts: BTreeMap<&str, (u32, u32)> = records
        .iter()
        .map(|r| (r.season.as_str(), (0, 0)))
        .collect();

    for r in records {
        let Some((incoming, outgoing)) = counts.get_mut(r.season.as_str()) else {
            continue;
        };
        if r.club_to == reference_club {
            *incoming += 1;
        }
        if r.club_from == reference_club {
            *outgoing += 1;
        }
    }

    counts
        .into_iter()
        .map(|(season, (incoming, outgoing))| DirectionCount {
            season: season.to_string(),
            incoming,
            outgoing,
        })
        .collect()
}
