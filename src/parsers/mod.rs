pub mod columns;
pub mod csv;
pub mod traits;
pub mod xlsx;

pub mod prelude {
    pub use super::columns::{ColumnMap, REQUIRED_COLUMNS, title_case};
    pub use super::csv::CsvParser;
    pub use super::traits::{SourceParser, SourceRow};
    pub use super::xlsx::XlsxParser;
}
