use std::collections::BTreeMap;
use std::path::Path;

use calamine::{Data, Reader};
use log::{error, info, warn};
use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{ReportError, ReportResult};
use crate::types::round2;

/// Leading banner rows of a rate file, before the column header row.
pub const RATE_HEADER_ROWS: usize = 6;

/// One currency's conversion rate, as read from the rate file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateEntry {
    pub currency: String,
    pub rate: Decimal,
}

/// The currency -> rate mapping used by one run.
///
/// Currencies are unique: a duplicate code in the source overwrites the
/// earlier entry (last wins) with a logged warning, so a join can never
/// fan out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    rates: BTreeMap<String, Decimal>,
}

impl RateTable {
    pub fn from_entries<I: IntoIterator<Item = RateEntry>>(entries: I) -> Self {
        let mut rates = BTreeMap::new();
        for entry in entries {
            if rates
                .insert(entry.currency.clone(), round2(entry.rate))
                .is_some()
            {
                warn!(
                    "Duplicate rate for currency {}; keeping the last one.",
                    entry.currency
                );
            }
        }
        RateTable { rates }
    }

    /// Load the rate table from a spreadsheet.
    ///
    /// The first [`RATE_HEADER_ROWS`] rows are banner content and skipped;
    /// the next row must contain columns resolvable (case-insensitively)
    /// to `code` and `rate`. Rows missing either value, or whose rate does
    /// not coerce to a number, are dropped. Rates are rounded to 2
    /// decimals.
    pub fn load_xlsx(path: &Path) -> ReportResult<Self> {
        info!("Loading conversion rates from: {}", path.display());

        let mut workbook = calamine::open_workbook_auto(path)
            .map_err(|e| ReportError::SpreadsheetFailed(e.to_string()))?;
        let sheet = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ReportError::SpreadsheetFailed("workbook has no sheets".to_string()))?;
        let range = workbook
            .worksheet_range(&sheet)
            .map_err(|e| ReportError::SpreadsheetFailed(e.to_string()))?;

        // Row indices are absolute: leading blank banner rows are not
        // materialized by the reader but still count toward the skip.
        let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);
        let mut rows = range
            .rows()
            .enumerate()
            .map(|(i, row)| (first_row + i, row))
            .skip_while(|(abs, _)| *abs < RATE_HEADER_ROWS);

        let (_, header_row) = rows
            .next()
            .ok_or_else(|| ReportError::SpreadsheetFailed("rate file has no header row".into()))?;
        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell_text(cell).to_lowercase())
            .collect();
        let code_col = headers
            .iter()
            .position(|h| h == "code")
            .ok_or_else(|| ReportError::MissingColumn("code".to_string()))?;
        let rate_col = headers
            .iter()
            .position(|h| h == "rate")
            .ok_or_else(|| ReportError::MissingColumn("rate".to_string()))?;

        let mut table = RateTable::default();
        for (_, row) in rows {
            let currency = row.get(code_col).map(cell_text).unwrap_or_default();
            if currency.is_empty() {
                continue;
            }
            let Some(rate) = row.get(rate_col).and_then(cell_amount) else {
                continue;
            };
            if table.rates.insert(currency.clone(), round2(rate)).is_some() {
                warn!("Duplicate rate for currency {currency}; keeping the last one.");
            }
        }

        info!("Conversion rates loaded successfully: {} currencies.", table.len());
        Ok(table)
    }

    /// Stage-level degradation: on any load failure, log the error and
    /// return the empty table so the run continues with every rate
    /// treated as missing.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load_xlsx(path) {
            Ok(table) => table,
            Err(err) => {
                error!("Error loading conversion rates: {err}");
                RateTable::default()
            }
        }
    }

    pub fn rate_for(&self, currency: &str) -> Option<Decimal> {
        self.rates.get(currency).copied()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = RateEntry> + '_ {
        self.rates.iter().map(|(currency, rate)| RateEntry {
            currency: currency.clone(),
            rate: *rate,
        })
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Empty => String::new(),
        other => other.to_string().trim().to_string(),
    }
}

fn cell_amount(cell: &Data) -> Option<Decimal> {
    match cell {
        Data::Float(f) => Decimal::from_f64(*f),
        Data::Int(i) => Some(Decimal::from(*i)),
        Data::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
