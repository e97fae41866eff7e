use std::path::Path;

use log::info;

use crate::dataset::Dataset;
use crate::errors::ReportResult;
use crate::filter::DateWindow;
use crate::loader::load_folder;

/// A date filter applied on top of the canonical dataset.
#[derive(Debug, Clone)]
pub struct FilterSession {
    window: DateWindow,
    filtered: Dataset,
}

impl FilterSession {
    pub fn window(&self) -> &DateWindow {
        &self.window
    }

    pub fn data(&self) -> &Dataset {
        &self.filtered
    }
}

/// Holds one run's canonical dataset and the optional active filter.
///
/// The canonical dataset is never mutated; the filter is a derived view
/// that can be replaced or cleared at any time, so re-filtering with a
/// different window always starts from the full load.
#[derive(Debug, Clone, Default)]
pub struct ReportSession {
    dataset: Dataset,
    filter: Option<FilterSession>,
}

impl ReportSession {
    pub fn new(dataset: Dataset) -> Self {
        ReportSession {
            dataset,
            filter: None,
        }
    }

    /// Load every data file under `root` and start a session over the
    /// result.
    pub fn load(root: &Path) -> Self {
        Self::new(load_folder(root))
    }

    /// False when the load produced no records ("no data" outcome).
    pub fn has_data(&self) -> bool {
        !self.dataset.is_empty()
    }

    /// The canonical dataset as loaded, regardless of any active filter.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn filter(&self) -> Option<&FilterSession> {
        self.filter.as_ref()
    }

    /// Narrow the working view to `window`. Replaces any previous filter.
    pub fn apply_window(&mut self, window: DateWindow) -> &Dataset {
        info!(
            "Data filtered from {} to {}.",
            window.start, window.end
        );
        self.filter = Some(FilterSession {
            window,
            filtered: self.dataset.filter_by_window(&window),
        });
        self.active_data()
    }

    /// Parse caller-supplied bounds and narrow the working view.
    ///
    /// On a bad bound the error is returned and the session is left
    /// untouched.
    pub fn apply_bounds(&mut self, start: &str, end: &str) -> ReportResult<&Dataset> {
        let window = DateWindow::parse(start, end)?;
        Ok(self.apply_window(window))
    }

    pub fn clear_filter(&mut self) {
        self.filter = None;
    }

    /// The dataset downstream stages should consume: the filtered view
    /// when a filter is active, otherwise the full canonical dataset.
    pub fn active_data(&self) -> &Dataset {
        self.filter
            .as_ref()
            .map(FilterSession::data)
            .unwrap_or(&self.dataset)
    }
}
