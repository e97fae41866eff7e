use std::path::{Path, PathBuf};

use log::info;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use rust_xlsxwriter::{Format, Workbook, Worksheet};

use crate::convert::Conversion;
use crate::dataset::Dataset;
use crate::errors::ReportResult;
use crate::rollup::{client_totals, country_totals, segment_date_totals};

/// Sheet holding the raw normalized transaction data.
pub const SHEET_TRANSACTIONS: &str = "Transactions";
/// Sheet holding the per-client USD roll-up.
pub const SHEET_CLIENT_TOTALS: &str = "Totals in USD";
/// Sheet holding the market-segment x date roll-up.
pub const SHEET_MARKET_SECTION: &str = "Revenue by Market Section";
/// Sheet holding the per-country roll-up.
pub const SHEET_COUNTRY: &str = "Revenue by Country";

/// Default output file, written to the working directory and overwritten
/// on every run.
pub const DEFAULT_REPORT_FILE: &str = "revenue_report.xlsx";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Assembles the four-sheet report workbook.
///
/// Every sheet opens with a three-row branded block (company line, sheet
/// title, year line) above the column headers; columns are auto-fitted and
/// screen gridlines are disabled.
///
/// ```rust,ignore
/// let path = ReportBuilder::new()
///     .company("EXAMPLE HOLDINGS")
///     .year("2024")
///     .write(session.active_data(), &conversion)?;
/// ```
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    output_path: PathBuf,
    company: String,
    year: String,
}

impl Default for ReportBuilder {
    fn default() -> Self {
        ReportBuilder {
            output_path: PathBuf::from(DEFAULT_REPORT_FILE),
            company: "FP&A REPORT".to_string(),
            year: "2024".to_string(),
        }
    }
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_path = path.as_ref().to_path_buf();
        self
    }

    pub fn company(mut self, company: &str) -> Self {
        self.company = company.to_string();
        self
    }

    pub fn year(mut self, year: &str) -> Self {
        self.year = year.to_string();
        self
    }

    /// Write the report workbook and return its path.
    ///
    /// `data` is the (possibly filtered) dataset shown on the
    /// `Transactions` sheet; `conversion` feeds the three roll-up sheets.
    /// An existing file at the output path is overwritten.
    pub fn write(&self, data: &Dataset, conversion: &Conversion) -> ReportResult<PathBuf> {
        let mut workbook = Workbook::new();
        let bold = Format::new().set_bold();

        let worksheet = workbook.add_worksheet().set_name(SHEET_TRANSACTIONS)?;
        self.header_block(worksheet, "Total Transactions Report", &bold)?;
        write_row(
            worksheet,
            4,
            &["Client", "Country", "Currency", "Transaction", "Date"],
        )?;
        for (i, record) in data.records().iter().enumerate() {
            let row = 5 + i as u32;
            worksheet.write_string(row, 0, &record.client)?;
            worksheet.write_string(row, 1, &record.country)?;
            worksheet.write_string(row, 2, &record.currency)?;
            write_amount(worksheet, row, 3, record.transaction)?;
            worksheet.write_string(row, 4, record.date.format(DATE_FORMAT).to_string())?;
        }
        finish_sheet(worksheet);

        let worksheet = workbook.add_worksheet().set_name(SHEET_CLIENT_TOTALS)?;
        self.header_block(worksheet, "Total Transactions by Client in USD", &bold)?;
        write_row(worksheet, 4, &["Client", "Sum of Transaction USD"])?;
        for (i, total) in client_totals(&conversion.records).iter().enumerate() {
            let row = 5 + i as u32;
            worksheet.write_string(row, 0, &total.client)?;
            write_amount(worksheet, row, 1, total.total_usd)?;
        }
        finish_sheet(worksheet);

        let worksheet = workbook.add_worksheet().set_name(SHEET_MARKET_SECTION)?;
        self.header_block(worksheet, "Revenue by Market Section", &bold)?;
        write_row(
            worksheet,
            4,
            &["Market Section", "Date", "Total Revenue (USD)"],
        )?;
        for (i, total) in segment_date_totals(&conversion.records).iter().enumerate() {
            let row = 5 + i as u32;
            worksheet.write_string(row, 0, &total.market_segment)?;
            worksheet.write_string(row, 1, total.date.format(DATE_FORMAT).to_string())?;
            write_amount(worksheet, row, 2, total.total_usd)?;
        }
        finish_sheet(worksheet);

        let worksheet = workbook.add_worksheet().set_name(SHEET_COUNTRY)?;
        self.header_block(worksheet, "Revenue by Country", &bold)?;
        write_row(worksheet, 4, &["Country", "Total Revenue (USD)"])?;
        for (i, total) in country_totals(&conversion.records).iter().enumerate() {
            let row = 5 + i as u32;
            worksheet.write_string(row, 0, &total.country)?;
            write_amount(worksheet, row, 1, total.total_usd)?;
        }
        finish_sheet(worksheet);

        workbook.save(&self.output_path)?;
        info!("Report saved as '{}'.", self.output_path.display());
        Ok(self.output_path.clone())
    }

    /// The fixed branded block: company, upper-cased title, year on rows
    /// 2-4 (row 1 stays blank), all bold.
    fn header_block(
        &self,
        worksheet: &mut Worksheet,
        title: &str,
        bold: &Format,
    ) -> ReportResult<()> {
        worksheet.write_string_with_format(1, 0, &self.company, bold)?;
        worksheet.write_string_with_format(2, 0, title.to_uppercase(), bold)?;
        worksheet.write_string_with_format(3, 0, &self.year, bold)?;
        Ok(())
    }
}

fn write_row(worksheet: &mut Worksheet, row: u32, values: &[&str]) -> ReportResult<()> {
    for (col, value) in values.iter().enumerate() {
        worksheet.write_string(row, col as u16, *value)?;
    }
    Ok(())
}

fn write_amount(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    amount: Decimal,
) -> ReportResult<()> {
    worksheet.write_number(row, col, amount.to_f64().unwrap_or_default())?;
    Ok(())
}

fn finish_sheet(worksheet: &mut Worksheet) {
    worksheet.autofit();
    worksheet.set_screen_gridlines(false);
}
