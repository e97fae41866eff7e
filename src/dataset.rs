use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::filter::DateWindow;
use crate::types::{TransactionRecord, round2};

/// Accumulates per-file record batches into one canonical dataset.
///
/// Files that yielded no rows contribute nothing; [`finish`](Self::finish)
/// applies the collection-wide 2-decimal rounding of transaction amounts.
#[derive(Debug, Default)]
pub struct DatasetBuilder {
    records: Vec<TransactionRecord>,
}

impl DatasetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the rows of one source file. Empty batches are ignored.
    pub fn append_file(&mut self, rows: Vec<TransactionRecord>) {
        if rows.is_empty() {
            return;
        }
        self.records.extend(rows);
    }

    pub fn finish(mut self) -> Dataset {
        for record in &mut self.records {
            record.transaction = round2(record.transaction);
        }
        Dataset {
            records: self.records,
        }
    }
}

/// The canonical transaction collection for one run.
///
/// Immutable once built; filtering produces a new collection so the
/// original load stays available for re-filtering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    records: Vec<TransactionRecord>,
}

impl Dataset {
    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// An empty dataset is the "no data" outcome of a load, not an error.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest and latest transaction dates, for seeding filter bounds.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.records.iter().map(|r| r.date).min()?;
        let max = self.records.iter().map(|r| r.date).max()?;
        Some((min, max))
    }

    /// Records whose date falls inside the window, bounds inclusive.
    pub fn filter_by_window(&self, window: &DateWindow) -> Dataset {
        Dataset {
            records: self
                .records
                .iter()
                .filter(|record| window.contains(record.date))
                .cloned()
                .collect(),
        }
    }
}

impl FromIterator<TransactionRecord> for Dataset {
    fn from_iter<I: IntoIterator<Item = TransactionRecord>>(iter: I) -> Self {
        Dataset {
            records: iter.into_iter().collect(),
        }
    }
}
