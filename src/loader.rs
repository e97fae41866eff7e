use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};
use walkdir::WalkDir;

use crate::dataset::{Dataset, DatasetBuilder};
use crate::dates::extract_date_from_path;
use crate::errors::{ReportError, ReportResult};
use crate::parsers::prelude::*;
use crate::types::TransactionRecord;

/// Load every supported data file under `root` into the canonical dataset.
///
/// The tree is walked recursively and files are visited in sorted order.
/// Unsupported extensions are skipped silently, files without a date token
/// in their path are skipped with a warning, and any per-file parse
/// failure is logged and isolated - the run always continues. The returned
/// dataset may be empty; callers treat that as the "no data" outcome.
pub fn load_folder(root: &Path) -> Dataset {
    info!("Loading data from folder: {}", root.display());
    let mut builder = DatasetBuilder::new();

    for path in data_files(root) {
        let Some(date) = extract_date_from_path(&path) else {
            warn!(
                "Skipping file {} - No valid date found in path.",
                path.display()
            );
            continue;
        };

        match parse_file(&path) {
            Ok(rows) => {
                debug!("Loaded {} rows from {}", rows.len(), path.display());
                builder.append_file(
                    rows.into_iter()
                        .map(|row| TransactionRecord::from_source(row, date))
                        .collect(),
                );
            }
            Err(err) => error!("Error reading file {}: {}", path.display(), err),
        }
    }

    let dataset = builder.finish();
    info!("Data loading completed: {} records.", dataset.len());
    dataset
}

/// Supported data files under `root`, sorted for deterministic output.
fn data_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            let supported = CsvParser::is_supported(path) || XlsxParser::is_supported(path);
            if !supported {
                debug!("Skipping non-data file: {}", path.display());
            }
            supported
        })
        .collect();
    files.sort();
    files
}

fn parse_file(path: &Path) -> ReportResult<Vec<SourceRow>> {
    if CsvParser::is_supported(path) {
        CsvParser::parse(path).map_err(ReportError::ParseFailed)
    } else if XlsxParser::is_supported(path) {
        XlsxParser::parse(path).map_err(ReportError::ParseFailed)
    } else {
        Err(ReportError::UnsupportedFormat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_xlsxwriter::Workbook;
    use std::fs;
    use std::str::FromStr;
    use tempfile::TempDir;

    fn write_csv(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn write_xlsx(root: &Path, rel: &str, rows: &[(&str, &str, &str, f64)]) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        for (col, header) in ["Client", "Country", "Currency", "Transaction"]
            .iter()
            .enumerate()
        {
            worksheet.write_string(0, col as u16, *header).unwrap();
        }
        for (r, (client, country, currency, amount)) in rows.iter().enumerate() {
            let r = (r + 1) as u32;
            worksheet.write_string(r, 0, *client).unwrap();
            worksheet.write_string(r, 1, *country).unwrap();
            worksheet.write_string(r, 2, *currency).unwrap();
            worksheet.write_number(r, 3, *amount).unwrap();
        }
        workbook.save(&path).unwrap();
    }

    #[test]
    fn test_loads_both_formats_with_path_dates() {
        let dir = TempDir::new().unwrap();
        write_xlsx(
            dir.path(),
            "01-03-24/sales.xlsx",
            &[("Acme", "US", "USD", 100.555)],
        );
        write_csv(
            dir.path(),
            "02-03-24/sales.csv",
            "Client,Country,Currency,Transaction\nBeta,UK,GBP,50.005\n",
        );

        let dataset = load_folder(dir.path());
        assert_eq!(dataset.len(), 2);

        let acme = &dataset.records()[0];
        assert_eq!(acme.client, "Acme");
        assert_eq!(acme.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        // collection-wide rounding applied after loading
        assert_eq!(acme.transaction, Decimal::from_str("100.56").unwrap());

        let beta = &dataset.records()[1];
        assert_eq!(beta.client, "Beta");
        assert_eq!(beta.date, NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
        assert_eq!(beta.transaction, Decimal::from_str("50.01").unwrap());
    }

    #[test]
    fn test_skips_unsupported_and_dateless_files() {
        let dir = TempDir::new().unwrap();
        write_csv(
            dir.path(),
            "01-03-24/sales.csv",
            "Client,Country,Currency,Transaction\nAcme,US,USD,10.00\n",
        );
        write_csv(
            dir.path(),
            "no-date/sales.csv",
            "Client,Country,Currency,Transaction\nBeta,UK,GBP,20.00\n",
        );
        write_csv(dir.path(), "01-03-24/readme.txt", "not a data file");

        let dataset = load_folder(dir.path());
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records()[0].client, "Acme");
    }

    #[test]
    fn test_broken_file_is_isolated() {
        let dir = TempDir::new().unwrap();
        write_csv(
            dir.path(),
            "01-03-24/good.csv",
            "Client,Country,Currency,Transaction\nAcme,US,USD,10.00\n",
        );
        // missing a required column: the file fails, the run continues
        write_csv(
            dir.path(),
            "02-03-24/bad.csv",
            "Client,Country,Transaction\nBeta,UK,20.00\n",
        );
        // not a real workbook
        write_csv(dir.path(), "03-03-24/fake.xlsx", "garbage bytes");

        let dataset = load_folder(dir.path());
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records()[0].client, "Acme");
    }

    #[test]
    fn test_row_count_matches_sum_of_valid_rows() {
        let dir = TempDir::new().unwrap();
        write_csv(
            dir.path(),
            "01-03-24/a.csv",
            "Client,Country,Currency,Transaction\n\
             Acme,US,USD,1.00\n\
             bad,row\n\
             Beta,UK,GBP,2.00\n",
        );
        write_xlsx(
            dir.path(),
            "02-03-24/b.xlsx",
            &[("Gamma", "DE", "EUR", 3.0), ("Delta", "FR", "EUR", 4.0)],
        );

        let dataset = load_folder(dir.path());
        // 2 valid rows from the csv + 2 from the xlsx
        assert_eq!(dataset.len(), 4);
    }

    #[test]
    fn test_empty_folder_yields_no_data() {
        let dir = TempDir::new().unwrap();
        let dataset = load_folder(dir.path());
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_files_visited_in_sorted_order() {
        let dir = TempDir::new().unwrap();
        write_csv(
            dir.path(),
            "02-03-24/z.csv",
            "Client,Country,Currency,Transaction\nZeta,US,USD,1.00\n",
        );
        write_csv(
            dir.path(),
            "01-03-24/a.csv",
            "Client,Country,Currency,Transaction\nAlpha,US,USD,1.00\n",
        );

        let dataset = load_folder(dir.path());
        assert_eq!(dataset.records()[0].client, "Alpha");
        assert_eq!(dataset.records()[1].client, "Zeta");
    }
}
