use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One parsed line item before the path date is attached.
///
/// Both source formats reduce to this shape; extra columns in the source
/// are discarded during parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRow {
    pub client: String,
    pub country: String,
    pub currency: String,
    pub transaction: Decimal,
}

pub trait SourceParser {
    type Output;

    fn is_supported(path: &Path) -> bool;

    fn parse(path: &Path) -> Result<Vec<Self::Output>, String>;
}

pub(crate) fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}
