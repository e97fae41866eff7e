use std::path::Path;
use std::sync::OnceLock;

use chrono::NaiveDate;
use log::warn;
use regex::Regex;

fn date_token() -> &'static Regex {
    static DATE_TOKEN: OnceLock<Regex> = OnceLock::new();
    DATE_TOKEN.get_or_init(|| Regex::new(r"\b\d{2}-\d{2}-\d{2}\b").expect("valid regex"))
}

/// Extract the transaction date embedded in a file path.
///
/// Scans the path string for the first `DD-MM-YY` token and parses it as a
/// day-month-year date with chrono's two-digit-year pivot. Returns `None`
/// when no token is present, or when the first token is not a valid
/// calendar date (e.g. `32-13-99`) - later tokens are not retried.
pub fn extract_date_from_path(path: &Path) -> Option<NaiveDate> {
    let text = path.to_string_lossy();
    let token = date_token().find(&text)?;

    match NaiveDate::parse_from_str(token.as_str(), "%d-%m-%y") {
        Ok(date) => Some(date),
        Err(err) => {
            warn!("Error parsing date from path {}: {}", path.display(), err);
            None
        }
    }
}
