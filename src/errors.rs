use thiserror::Error;

/// Failures surfaced by the report pipeline.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Generic failure while parsing a source file (detail in the message)
    #[error("Parse failed: {0}")]
    ParseFailed(String),

    /// File extension is not one of the supported data formats
    #[error("Unsupported file format")]
    UnsupportedFormat,

    /// A required column could not be resolved in a source or rate file
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Error reported by the spreadsheet reader
    #[error("Spreadsheet read failed: {0}")]
    SpreadsheetFailed(String),

    /// A date-range bound supplied by the caller did not parse
    #[error("Invalid date bound: {0}")]
    InvalidDateBound(String),

    /// Error reported by the workbook writer
    #[error("Workbook write failed: {0}")]
    WorkbookFailed(#[from] rust_xlsxwriter::XlsxError),
}

/// Convenient alias for Result with the pipeline's error type
pub type ReportResult<T> = Result<T, ReportError>;
