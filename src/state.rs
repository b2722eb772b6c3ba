use std::path::PathBuf;
use std::sync::Arc;

use trade_map::data::cache::DatasetCache;
use trade_map::data::commodity::{describe, CommodityDescription};
use trade_map::data::country::CountryResolver;
use trade_map::data::display::{display_rows, log_range, DisplayRow};
use trade_map::data::model::{PartnerVolume, TradeDataset};
use trade_map::data::query::{query, Selection, ViewMode};
use trade_map::data::source::DataSource;

use crate::color::ColorScale;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Load-once holder of the dataset for the configured source.
    pub cache: DatasetCache,

    /// Dataset currently shown (None until a load succeeds).
    pub dataset: Option<Arc<TradeDataset>>,

    /// Current selection.
    pub selection: Selection,

    /// Query result for `selection`.
    pub rows: Vec<PartnerVolume>,

    /// `rows` with the log10 transform applied, non-positive rows dropped.
    pub display: Vec<DisplayRow>,

    /// Colour axis over `display`.
    pub color_scale: Option<ColorScale>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(source: DataSource) -> Self {
        Self {
            cache: DatasetCache::new(source, CountryResolver::default()),
            dataset: None,
            selection: Selection::default(),
            rows: Vec::new(),
            display: Vec::new(),
            color_scale: None,
            status_message: None,
        }
    }

    /// Load (or fetch from the cache) and show the dataset.
    pub fn load(&mut self) {
        match self.cache.get_or_load() {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load trade data: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Forget the cached dataset and fetch the source again.
    pub fn reload(&mut self) {
        self.cache.invalidate();
        self.load();
    }

    /// Switch to a local CSV and load it.
    pub fn open_path(&mut self, path: PathBuf) {
        self.cache.set_source(DataSource::Local(path));
        self.load();
    }

    /// Ingest a newly loaded dataset and reset the selection.
    pub fn set_dataset(&mut self, dataset: Arc<TradeDataset>) {
        self.selection = Selection::default_for(&dataset);
        self.dataset = Some(dataset);
        self.status_message = None;
        self.requery();
    }

    /// Recompute rows after a selection change.
    pub fn requery(&mut self) {
        let Some(ds) = &self.dataset else {
            return;
        };
        self.rows = query(ds, &self.selection);
        self.display = display_rows(&self.rows);
        self.color_scale = log_range(&self.display).map(|(lo, hi)| ColorScale::new(lo, hi));
        log::debug!(
            "{} ({}): {} rows",
            self.selection.title(),
            self.selection.mode,
            self.rows.len()
        );
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        self.selection.mode = mode;
        self.requery();
    }

    pub fn set_commodity(&mut self, code: String) {
        self.selection.commodity_code = code;
        self.requery();
    }

    pub fn set_reporter(&mut self, reporter: String) {
        self.selection.reporter = reporter;
        self.requery();
    }

    pub fn set_period(&mut self, period: String) {
        self.selection.period = period;
        self.requery();
    }

    pub fn set_year(&mut self, year: String) {
        self.selection.year = year;
        self.requery();
    }

    /// Description of the selected commodity code.
    pub fn description(&self) -> CommodityDescription {
        describe(&self.selection.commodity_code)
    }
}
