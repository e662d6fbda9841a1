use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_CLUB: &str = "Dinamo Zagreb";
pub const DEFAULT_SEASON: &str = "23/24";

/// Command-line options.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "dinamo-transfers",
    about = "Globe map and season charts of a club's player transfers"
)]
pub struct Cli {
    /// Dataset to open (.json, .csv or .parquet). Defaults to the bundled data.
    pub data: Option<PathBuf>,

    /// Season shown on the map at startup; falls back to the latest season
    /// when the dataset has no such label.
    #[arg(long, default_value = DEFAULT_SEASON)]
    pub season: String,

    /// Club that transfers are classified against (incoming / outgoing).
    #[arg(long, default_value = DEFAULT_CLUB)]
    pub club: String,
}

/// Settings the view controller needs, independent of how they were given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub reference_club: String,
    pub initial_season: Option<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            reference_club: DEFAULT_CLUB.to_string(),
            initial_season: Some(DEFAULT_SEASON.to_string()),
        }
    }
}

impl From<&Cli> for DashboardConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            reference_club: cli.club.clone(),
            initial_season: Some(cli.season.clone()),
        }
    }
}
