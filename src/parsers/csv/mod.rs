mod parser;
mod sniff;

pub use parser::CsvParser;
pub use sniff::{SNIFF_SAMPLE_LEN, detect_delimiter};
