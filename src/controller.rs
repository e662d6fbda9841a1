use std::sync::Arc;

use crate::config::DashboardConfig;
use crate::data::aggregate::{filter_by_season, total_fee_by_season, transfer_direction_counts};
use crate::data::error::DataError;
use crate::data::model::{Dataset, TransferRecord};
use crate::series::{direction_series, fee_series, map_layers, BarSeries, LineSeries, MapLayers};

// ---------------------------------------------------------------------------
// Season-dependent view
// ---------------------------------------------------------------------------

/// What the map shows for the selected season.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeasonView {
    /// `None` only when the dataset is empty.
    pub season: Option<String>,
    pub map: MapLayers,
    pub transfer_count: usize,
}

pub type SubscriptionId = u64;

type Subscriber = Box<dyn FnMut(&SeasonView)>;

// ---------------------------------------------------------------------------
// View controller
// ---------------------------------------------------------------------------

/// Owns the selected season and every view derived from the dataset.
///
/// The two charts depend only on the dataset and are built once per
/// dataset; the map is rebuilt on every season change.  Subscribers are
/// called synchronously, in subscription order, after each change.
pub struct ViewController {
    dataset: Arc<Dataset>,
    config: DashboardConfig,
    season_options: Vec<String>,
    fee_chart: LineSeries,
    direction_chart: [BarSeries; 2],
    view: SeasonView,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: SubscriptionId,
}

impl ViewController {
    pub fn new(dataset: Arc<Dataset>, config: DashboardConfig) -> Self {
        let mut controller = ViewController {
            dataset: Arc::new(Dataset::default()),
            config,
            season_options: Vec::new(),
            fee_chart: fee_series(&[]),
            direction_chart: direction_series(&[]),
            view: SeasonView::default(),
            subscribers: Vec::new(),
            next_id: 0,
        };
        controller.install(dataset);
        controller
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn reference_club(&self) -> &str {
        &self.config.reference_club
    }

    /// Seasons offered by the selector, newest first.
    pub fn season_options(&self) -> &[String] {
        &self.season_options
    }

    pub fn selected_season(&self) -> Option<&str> {
        self.view.season.as_deref()
    }

    pub fn view(&self) -> &SeasonView {
        &self.view
    }

    /// Transfers of the selected season, in dataset order.
    pub fn selected_records(&self) -> Vec<&TransferRecord> {
        match &self.view.season {
            Some(season) => filter_by_season(&self.dataset.records, season),
            None => Vec::new(),
        }
    }

    pub fn fee_chart(&self) -> &LineSeries {
        &self.fee_chart
    }

    pub fn direction_chart(&self) -> &[BarSeries; 2] {
        &self.direction_chart
    }

    /// Switch the map to `season`.
    ///
    /// The selector only offers seasons from the dataset, so an unknown label
    /// is caller misuse: it is rejected and nothing changes.
    pub fn select_season(&mut self, season: &str) -> Result<(), DataError> {
        if !self.dataset.has_season(season) {
            return Err(DataError::UnknownSeason(season.to_string()));
        }
        if self.selected_season() == Some(season) {
            return Ok(());
        }
        log::debug!("Season changed to {season}");
        self.view = season_view(&self.dataset, Some(season.to_string()));
        self.notify();
        Ok(())
    }

    /// Swap in a newly loaded dataset, rebuild every view and reset the
    /// selection to the default rule.
    pub fn replace_dataset(&mut self, dataset: Arc<Dataset>) {
        self.install(dataset);
        self.notify();
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&SeasonView) + 'static) -> SubscriptionId {
        let id = self.next_id;
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Returns whether a subscriber was removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    fn install(&mut self, dataset: Arc<Dataset>) {
        self.season_options = dataset.seasons.iter().rev().cloned().collect();
        self.fee_chart = fee_series(&total_fee_by_season(&dataset.records));
        self.direction_chart = direction_series(&transfer_direction_counts(
            &dataset.records,
            &self.config.reference_club,
        ));
        let season = default_season(&dataset, self.config.initial_season.as_deref());
        self.view = season_view(&dataset, season);
        log::debug!(
            "Rebuilt views for {} transfers, {} seasons",
            dataset.len(),
            self.season_options.len()
        );
        self.dataset = dataset;
    }

    fn notify(&mut self) {
        for (_, callback) in &mut self.subscribers {
            callback(&self.view);
        }
    }
}

/// The configured season when the dataset has it, otherwise the latest.
fn default_season(dataset: &Dataset, preferred: Option<&str>) -> Option<String> {
    if let Some(season) = preferred {
        if dataset.has_season(season) {
            return Some(season.to_string());
        }
        if !dataset.is_empty() {
            log::warn!("Season '{season}' is not in the dataset; showing the latest season");
        }
    }
    dataset.seasons.last().cloned()
}

fn season_view(dataset: &Dataset, season: Option<String>) -> SeasonView {
    let records = match &season {
        Some(s) => filter_by_season(&dataset.records, s),
        None => Vec::new(),
    };
    SeasonView {
        transfer_count: records.len(),
        map: map_layers(records),
        season,
    }
}
