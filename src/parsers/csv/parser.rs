use std::fs;
use std::path::Path;

use csv::ReaderBuilder;
use log::warn;
use rust_decimal::Decimal;

use super::sniff::{SNIFF_SAMPLE_LEN, detect_delimiter};
use crate::parsers::columns::ColumnMap;
use crate::parsers::traits::{SourceParser, SourceRow, has_extension};

pub struct CsvParser;

impl SourceParser for CsvParser {
    type Output = SourceRow;

    fn is_supported(path: &Path) -> bool {
        has_extension(path, "csv")
    }

    /// Parse a delimited text file into source rows.
    ///
    /// The delimiter is sniffed from the first [`SNIFF_SAMPLE_LEN`] bytes.
    /// A missing required column fails the whole file; malformed rows
    /// (wrong field count, unparsable amount) are skipped with a warning.
    fn parse(path: &Path) -> Result<Vec<Self::Output>, String> {
        let content = fs::read(path).map_err(|e| format!("read error: {e}"))?;

        let sample = &content[..content.len().min(SNIFF_SAMPLE_LEN)];
        let delimiter =
            detect_delimiter(sample).ok_or_else(|| "could not detect field delimiter".to_string())?;

        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(content.as_slice());

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| format!("header read error: {e}"))?
            .iter()
            .map(str::to_string)
            .collect();
        let map = ColumnMap::resolve(&headers)?;

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = match result {
                Ok(record) => record,
                Err(err) => {
                    warn!("Skipping malformed row in {}: {}", path.display(), err);
                    continue;
                }
            };
            if record.len() <= map.max_index() {
                warn!(
                    "Skipping row {} in {}: too few fields",
                    record.position().map(|p| p.line()).unwrap_or_default(),
                    path.display()
                );
                continue;
            }
            let transaction = match record[map.transaction].trim().parse::<Decimal>() {
                Ok(amount) => amount,
                Err(err) => {
                    warn!(
                        "Skipping row {} in {}: bad transaction amount: {}",
                        record.position().map(|p| p.line()).unwrap_or_default(),
                        path.display(),
                        err
                    );
                    continue;
                }
            };
            rows.push(SourceRow {
                client: record[map.client].trim().to_string(),
                country: record[map.country].trim().to_string(),
                currency: record[map.currency].trim().to_string(),
                transaction,
            });
        }

        Ok(rows)
    }
}
