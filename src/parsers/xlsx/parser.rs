use std::path::Path;

use calamine::{Data, Reader};
use log::warn;
use num_traits::FromPrimitive;
use rust_decimal::Decimal;

use crate::parsers::columns::ColumnMap;
use crate::parsers::traits::{SourceParser, SourceRow, has_extension};

pub struct XlsxParser;

impl XlsxParser {
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
}

impl SourceParser for XlsxParser {
    type Output = SourceRow;

    fn is_supported(path: &Path) -> bool {
        has_extension(path, "xlsx")
    }

    /// Parse the first worksheet of a spreadsheet into source rows.
    ///
    /// Row 0 is the header; only the four required columns are read and
    /// anything else is ignored. A missing required column fails the whole
    /// file. Blank rows and rows without a usable transaction amount are
    /// skipped with a warning.
    fn parse(path: &Path) -> Result<Vec<Self::Output>, String> {
        let mut workbook =
            calamine::open_workbook_auto(path).map_err(|e| format!("open error: {e}"))?;

        let sheet = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| "workbook has no sheets".to_string())?;
        let range = workbook
            .worksheet_range(&sheet)
            .map_err(|e| format!("sheet read error: {e}"))?;

        let mut rows_iter = range.rows();
        let headers: Vec<String> = rows_iter
            .next()
            .ok_or_else(|| "workbook has no header row".to_string())?
            .iter()
            .map(Self::cell_text)
            .collect();
        let map = ColumnMap::resolve(&headers)?;

        let mut rows = Vec::new();
        for (index, row) in rows_iter.enumerate() {
            if row.iter().all(|cell| matches!(cell, Data::Empty)) {
                continue;
            }
            if row.len() <= map.max_index() {
                warn!(
                    "Skipping row {} in {}: too few cells",
                    index + 2,
                    path.display()
                );
                continue;
            }
            let Some(transaction) = Self::cell_amount(&row[map.transaction]) else {
                warn!(
                    "Skipping row {} in {}: bad transaction amount",
                    index + 2,
                    path.display()
                );
                continue;
            };
            rows.push(SourceRow {
                client: Self::cell_text(&row[map.client]),
                country: Self::cell_text(&row[map.country]),
                currency: Self::cell_text(&row[map.currency]),
                transaction,
            });
        }

        Ok(rows)
    }
}
