use crate::data::aggregate::{DirectionCount, SeasonFeeTotal};
use crate::data::model::TransferRecord;

// ---------------------------------------------------------------------------
// Renderer-agnostic descriptors
// ---------------------------------------------------------------------------

pub const FEE_CHART_TITLE: &str = "Total Transfer Fees by Season";
pub const FEE_AXIS_LABEL: &str = "Total Fees (€)";
pub const DIRECTION_CHART_TITLE: &str = "Incoming and Outgoing Transfers by Season";
pub const COUNT_AXIS_LABEL: &str = "Number of Transfers";
pub const SEASON_AXIS_LABEL: &str = "Season";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Origin,
    Destination,
}

/// A single point on the globe with its hover text.
#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub lat: f64,
    pub lon: f64,
    pub endpoint: Endpoint,
    pub tooltip: String,
}

/// The line between a transfer's two endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferArc {
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub fee: f64,
}

/// Everything the map draws for one season.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapLayers {
    /// All origin markers first, then all destination markers.
    pub markers: Vec<MapMarker>,
    pub arcs: Vec<TransferArc>,
}

impl MapLayers {
    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    /// Largest fee among the arcs, for fee shading.
    pub fn max_fee(&self) -> f64 {
        self.arcs.iter().map(|a| a.fee).fold(0.0, f64::max)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    pub name: String,
    pub x: Vec<String>,
    pub y: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Incoming,
    Outgoing,
}

impl Direction {
    pub fn label(self) -> &'static str {
        match self {
            Direction::Incoming => "Incoming Transfers",
            Direction::Outgoing => "Outgoing Transfers",
        }
    }
}

/// One bar group member; every series of a chart shares the same `x`.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    pub direction: Direction,
    pub x: Vec<String>,
    pub y: Vec<u32>,
}

// ---------------------------------------------------------------------------
// Adapters
// ---------------------------------------------------------------------------

/// Markers and arcs for the given transfers, in their given order.
pub fn map_layers<'a>(records: impl IntoIterator<Item = &'a TransferRecord>) -> MapLayers {
    let records: Vec<&TransferRecord> = records.into_iter().collect();

    let origins = records.iter().map(|r| MapMarker {
        lat: r.lat_from,
        lon: r.lon_from,
        endpoint: Endpoint::Origin,
        tooltip: tooltip(r, Endpoint::Origin),
    });
    let destinations = records.iter().map(|r| MapMarker {
        lat: r.lat_to,
        lon: r.lon_to,
        endpoint: Endpoint::Destination,
        tooltip: tooltip(r, Endpoint::Destination),
    });

    MapLayers {
        markers: origins.chain(destinations).collect(),
        arcs: records
            .iter()
            .map(|r| TransferArc {
                from: r.origin(),
                to: r.destination(),
                fee: r.fee,
            })
            .collect(),
    }
}

/// Hover text: player, season, market value, fee and the club at this end.
pub fn tooltip(r: &TransferRecord, endpoint: Endpoint) -> String {
    let club = match endpoint {
        Endpoint::Origin => format!("From: {}", r.club_from),
        Endpoint::Destination => format!("To: {}", r.club_to),
    };
    format!(
        "{}\nSeason: {}\nMarket Value: {}\nFee: {}\n{club}",
        r.player_name,
        r.season,
        format_eur(r.market_value),
        format_eur(r.fee),
    )
}

pub fn fee_series(totals: &[SeasonFeeTotal]) -> LineSeries {
    LineSeries {
        name: FEE_CHART_TITLE.to_string(),
        x: totals.iter().map(|t| t.season.clone()).collect(),
        y: totals.iter().map(|t| t.total_fee).collect(),
    }
}

/// Incoming and outgoing bar series, in that order.
pub fn direction_series(counts: &[DirectionCount]) -> [BarSeries; 2] {
    let x: Vec<String> = counts.iter().map(|c| c.season.clone()).collect();
    [
        BarSeries {
            direction: Direction::Incoming,
            x: x.clone(),
            y: counts.iter().map(|c| c.incoming).collect(),
        },
        BarSeries {
            direction: Direction::Outgoing,
            x,
            y: counts.iter().map(|c| c.outgoing).collect(),
        },
    ]
}

/// Compact euro amount: `€20.7m`, `€750k`, `€0`, `-€5m`.
///
/// The unit is chosen after rounding, so `999_960` is `€1m`, not `€1000k`.
pub fn format_eur(value: f64) -> String {
    let abs = value.abs();
    let tenths = |scale: f64| (abs / scale * 10.0).round() / 10.0;

    let (amount, suffix) = if abs.round() < 1_000.0 {
        (abs.round(), "")
    } else if tenths(1_000.0) < 1_000.0 {
        (tenths(1_000.0), "k")
    } else {
        (tenths(1_000_000.0), "m")
    };
    let sign = if value < 0.0 && amount > 0.0 { "-" } else { "" };

    if amount.fract() == 0.0 {
        format!("{sign}€{amount:.0}{suffix}")
    } else {
        format!("{sign}€{amount:.1}{suffix}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::record;

    #[test]
    fn markers_and_arcs_per_record() {
        let records = vec![record("23/24", "A", "B", 10.0), record("23/24", "C", "D", 0.0)];
        let layers = map_layers(&records);
        assert_eq!(layers.markers.len(), 4);
        assert_eq!(layers.arcs.len(), 2);
        assert_eq!(layers.markers[0].endpoint, Endpoint::Origin);
        assert_eq!(layers.markers[1].endpoint, Endpoint::Origin);
        assert_eq!(layers.markers[2].endpoint, Endpoint::Destination);
        assert_eq!((layers.markers[2].lat, layers.markers[2].lon), records[0].destination());
        assert_eq!(layers.arcs[0].from, records[0].origin());
        assert_eq!(layers.max_fee(), 10.0);
    }

    #[test]
    fn empty_selection_gives_empty_layers() {
        let layers = map_layers(std::iter::empty());
        assert!(layers.is_empty());
        assert!(layers.markers.is_empty());
        assert_eq!(layers.max_fee(), 0.0);
    }

    #[test]
    fn tooltip_names_relevant_club() {
        let mut r = record("22/23", "Dinamo Zagreb", "Southampton", 8_250_000.0);
        r.player_name = "Mislav Oršić".into();
        r.market_value = 8_000_000.0;
        assert_eq!(
            tooltip(&r, Endpoint::Origin),
            "Mislav Oršić\nSeason: 22/23\nMarket Value: €8m\nFee: €8.3m\nFrom: Dinamo Zagreb"
        );
        assert!(tooltip(&r, Endpoint::Destination).ends_with("To: Southampton"));
    }

    #[test]
    fn chart_series_share_seasons() {
        let totals = vec![
            SeasonFeeTotal { season: "22/23".into(), total_fee: 150.0 },
            SeasonFeeTotal { season: "23/24".into(), total_fee: 0.0 },
        ];
        let line = fee_series(&totals);
        assert_eq!(line.x, vec!["22/23", "23/24"]);
        assert_eq!(line.y, vec![150.0, 0.0]);

        let counts = vec![DirectionCount { season: "22/23".into(), incoming: 1, outgoing: 2 }];
        let [incoming, outgoing] = direction_series(&counts);
        assert_eq!(incoming.direction, Direction::Incoming);
        assert_eq!(incoming.x, outgoing.x);
        assert_eq!((incoming.y[0], outgoing.y[0]), (1, 2));
    }

    #[test]
    fn euro_formatting() {
        assert_eq!(format_eur(20_700_000.0), "€20.7m");
        assert_eq!(format_eur(15_000_000.0), "€15m");
        assert_eq!(format_eur(750_000.0), "€750k");
        assert_eq!(format_eur(1_300_000.0), "€1.3m");
        assert_eq!(format_eur(0.0), "€0");
    }

    #[test]
    fn euro_unit_follows_rounding_and_sign() {
        assert_eq!(format_eur(999_960.0), "€1m");
        assert_eq!(format_eur(999.6), "€1k");
        assert_eq!(format_eur(949_949.0), "€949.9k");
        assert_eq!(format_eur(-5_000_000.0), "-€5m");
        assert_eq!(format_eur(-2_500.0), "-€2.5k");
        assert_eq!(format_eur(-0.2), "€0");
    }
}
