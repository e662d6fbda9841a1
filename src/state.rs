use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;
use std::sync::Arc;

use crate::config::DashboardConfig;
use crate::controller::ViewController;
use crate::data::loader;
use crate::data::model::Dataset;
use crate::geo::{self, Coastline, GlobeProjection};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Selected season and every derived view.
    pub controller: ViewController,

    /// Globe projection used by the map.
    pub projection: GlobeProjection,

    /// Land outlines under the arcs.  Empty when the bundled outlines fail
    /// to parse; the map is still usable without them.
    pub coastlines: Vec<Coastline>,

    /// Shade arcs by fee instead of the plain half-transparent blue.
    pub shade_by_fee: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Set by the controller whenever the map content changes, consumed by
    /// the map plot to recentre its view.
    map_dirty: Rc<Cell<bool>>,
}

impl AppState {
    pub fn new(dataset: Dataset, config: DashboardConfig) -> Self {
        let mut controller = ViewController::new(Arc::new(dataset), config);

        let map_dirty = Rc::new(Cell::new(true));
        {
            let map_dirty = Rc::clone(&map_dirty);
            controller.subscribe(move |_| map_dirty.set(true));
        }

        let coastlines = geo::bundled_coastlines().unwrap_or_else(|e| {
            log::warn!("Coastlines unavailable: {e:#}");
            Vec::new()
        });

        Self {
            controller,
            projection: GlobeProjection::default(),
            coastlines,
            shade_by_fee: false,
            status_message: None,
            map_dirty,
        }
    }

    /// Load a dataset from disk and make it current.  On failure the
    /// previous dataset stays active and the error is shown in the UI.
    pub fn open_path(&mut self, path: &Path) {
        match loader::load_file(path) {
            Ok(dataset) => {
                self.controller.replace_dataset(Arc::new(dataset));
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Change the map season.  The selector only offers known seasons; a
    /// rejected label is reported like a load error.
    pub fn select_season(&mut self, season: &str) {
        if let Err(e) = self.controller.select_season(season) {
            log::error!("{e}");
            self.status_message = Some(format!("Error: {e}"));
        }
    }

    /// Ask the map to return to its default view on the next frame.
    pub fn reset_map_view(&self) {
        self.map_dirty.set(true);
    }

    /// Whether the map should recentre this frame; clears the flag.
    pub fn take_map_reset(&self) -> bool {
        self.map_dirty.replace(false)
    }
}
