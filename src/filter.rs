use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{ReportError, ReportResult};

const BOUND_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%y"];

/// An inclusive `[start, end]` date window for narrowing the dataset.
///
/// A reversed window (start after end) is allowed and simply selects
/// nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateWindow { start, end }
    }

    /// Parse caller-supplied bounds.
    ///
    /// Accepted formats, tried in order: `%Y-%m-%d`, `%d/%m/%Y`, `%d-%m-%y`.
    /// An unparsable bound is a user-facing error naming the input; no data
    /// is touched.
    pub fn parse(start: &str, end: &str) -> ReportResult<Self> {
        Ok(DateWindow {
            start: parse_bound(start)?,
            end: parse_bound(end)?,
        })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

fn parse_bound(text: &str) -> ReportResult<NaiveDate> {
    let trimmed = text.trim();
    for format in BOUND_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date);
        }
    }
    Err(ReportError::InvalidDateBound(text.to_string()))
}
