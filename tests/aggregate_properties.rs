//! Property tests for the aggregation functions.
//!
//! Uses proptest to verify:
//! 1. Season filter: only matching records, original order, exact partition
//! 2. Fee totals: ascending unique seasons, total fee preserved
//! 3. Direction counts: every season present, counts match a re-scan
//! 4. Idempotence: identical inputs give identical outputs

use std::collections::BTreeSet;

use dinamo_transfers::data::aggregate::{
    filter_by_season, total_fee_by_season, transfer_direction_counts,
};
use dinamo_transfers::data::model::TransferRecord;
use proptest::prelude::*;

const DINAMO: &str = "Dinamo Zagreb";
const SEASONS: [&str; 5] = ["19/20", "20/21", "21/22", "22/23", "23/24"];
const CLUBS: [&str; 4] = [DINAMO, "Ajax", "RB Leipzig", "HNK Rijeka"];

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_record() -> impl Strategy<Value = TransferRecord> {
    (
        prop::sample::select(SEASONS.to_vec()),
        prop::sample::select(CLUBS.to_vec()),
        prop::sample::select(CLUBS.to_vec()),
        // Whole euros keep the sums exact in f64.
        0u32..50_000_000,
        -90.0..90.0_f64,
        -180.0..180.0_f64,
    )
        .prop_map(|(season, from, to, fee, lat, lon)| TransferRecord {
            season: season.to_string(),
            player_name: format!("{from}->{to}"),
            club_from: from.to_string(),
            club_to: to.to_string(),
            lat_from: lat,
            lon_from: lon,
            lat_to: -lat,
            lon_to: -lon,
            market_value: f64::from(fee) * 1.5,
            fee: f64::from(fee),
        })
}

fn arb_dataset() -> impl Strategy<Value = Vec<TransferRecord>> {
    prop::collection::vec(arb_record(), 0..40)
}

fn arb_season() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(SEASONS.to_vec()).prop_map(str::to_string),
        Just("18/19".to_string()),
    ]
}

// ── 1. Season filter ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn filter_partitions_dataset(records in arb_dataset(), season in arb_season()) {
        let matched = filter_by_season(&records, &season);
        prop_assert!(matched.iter().all(|r| r.season == season));

        let complement = records.iter().filter(|r| r.season != season).count();
        prop_assert_eq!(matched.len() + complement, records.len());

        // Original relative order: the hits are a subsequence of the input.
        let expected: Vec<&TransferRecord> =
            records.iter().filter(|r| r.season == season).collect();
        prop_assert_eq!(matched, expected);
    }
}

// ── 2. Fee totals ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn fee_totals_ascending_and_conserved(records in arb_dataset()) {
        let totals = total_fee_by_season(&records);

        for pair in totals.windows(2) {
            prop_assert!(pair[0].season < pair[1].season);
        }

        let input: f64 = records.iter().map(|r| r.fee).sum();
        let output: f64 = totals.iter().map(|t| t.total_fee).sum();
        prop_assert_eq!(input, output);

        let seasons: BTreeSet<&str> = records.iter().map(|r| r.season.as_str()).collect();
        prop_assert_eq!(totals.len(), seasons.len());
    }
}

// ── 3. Direction counts ──────────────────────────────────────────────

proptest! {
    #[test]
    fn direction_counts_match_rescan(records in arb_dataset()) {
        let counts = transfer_direction_counts(&records, DINAMO);

        let seasons: Vec<&str> = records
            .iter()
            .map(|r| r.season.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let listed: Vec<&str> = counts.iter().map(|c| c.season.as_str()).collect();
        prop_assert_eq!(listed, seasons);

        for c in &counts {
            let mut incoming = 0;
            let mut outgoing = 0;
            for r in records.iter().filter(|r| r.season == c.season) {
                if r.club_to == DINAMO {
                    incoming += 1;
                }
                if r.club_from == DINAMO {
                    outgoing += 1;
                }
            }
            prop_assert_eq!((c.incoming, c.outgoing), (incoming, outgoing));
        }
    }
}

// ── 4. Idempotence ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn aggregations_are_idempotent(records in arb_dataset(), season in arb_season()) {
        prop_assert_eq!(
            filter_by_season(&records, &season),
            filter_by_season(&records, &season)
        );
        prop_assert_eq!(total_fee_by_season(&records), total_fee_by_season(&records));
        prop_assert_eq!(
            transfer_direction_counts(&records, DINAMO),
            transfer_direction_counts(&records, DINAMO)
        );
    }
}

// ── Worked example ───────────────────────────────────────────────────

#[test]
fn two_transfer_example() {
    let base = TransferRecord {
        season: "22/23".into(),
        player_name: "P".into(),
        club_from: "A".into(),
        club_to: DINAMO.into(),
        lat_from: 0.0,
        lon_from: 0.0,
        lat_to: 45.8131,
        lon_to: 15.978,
        market_value: 0.0,
        fee: 100.0,
    };
    let out = TransferRecord {
        club_from: DINAMO.into(),
        club_to: "B".into(),
        fee: 50.0,
        ..base.clone()
    };
    let d = vec![base, out];

    let totals = total_fee_by_season(&d);
    assert_eq!(totals.len(), 1);
    assert_eq!((totals[0].season.as_str(), totals[0].total_fee), ("22/23", 150.0));

    let counts = transfer_direction_counts(&d, DINAMO);
    assert_eq!(counts.len(), 1);
    assert_eq!((counts[0].incoming, counts[0].outgoing), (1, 1));

    assert!(filter_by_season(&d, "21/22").is_empty());
}
