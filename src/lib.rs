//! Build multi-currency revenue reports from folders of dated transaction
//! exports.
//!
//! A run loads every `.csv`/`.xlsx` file under a folder (each file's path
//! must carry a `DD-MM-YY` date token), normalizes them into one canonical
//! dataset, optionally narrows it to a date window, converts amounts to USD
//! against a user-supplied rate table, and writes a four-sheet report
//! workbook with per-client, per-segment and per-country roll-ups.
//!
//! ```rust,ignore
//! use revenue_report_rs::{RateTable, ReportBuilder, ReportSession, convert_to_usd};
//!
//! let session = ReportSession::load(Path::new("exports/2024"));
//! let rates = RateTable::load_or_empty(Path::new("rates.xlsx"));
//! let conversion = convert_to_usd(session.active_data(), &rates);
//! let path = ReportBuilder::new().write(session.active_data(), &conversion)?;
//! ```

mod convert;
mod dataset;
mod dates;
mod filter;
mod loader;
mod rates;
mod report;
mod rollup;
mod session;
mod types;

pub mod errors;
pub mod parsers;

pub use convert::{Conversion, convert_to_usd};
pub use dataset::{Dataset, DatasetBuilder};
pub use dates::extract_date_from_path;
pub use errors::{ReportError, ReportResult};
pub use filter::DateWindow;
pub use loader::load_folder;
pub use parsers::prelude::*;
pub use rates::{RATE_HEADER_ROWS, RateEntry, RateTable};
pub use report::{
    DEFAULT_REPORT_FILE, ReportBuilder, SHEET_CLIENT_TOTALS, SHEET_COUNTRY, SHEET_MARKET_SECTION,
    SHEET_TRANSACTIONS,
};
pub use rollup::{
    ClientTotal, CountryTotal, SegmentDateTotal, client_totals, country_totals,
    segment_date_totals,
};
pub use session::{FilterSession, ReportSession};
pub use types::{ConvertedRecord, TransactionRecord, market_segment, round2};
