use std::collections::BTreeSet;

use log::{info, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::rates::RateTable;
use crate::types::{ConvertedRecord, round2};

/// The outcome of converting a dataset to USD.
///
/// Every input record is present in `records`; the ones whose currency had
/// no rate carry a zero USD amount and their currency appears in
/// `missing_currencies`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    pub records: Vec<ConvertedRecord>,
    pub missing_currencies: BTreeSet<String>,
}

impl Conversion {
    pub fn total_usd(&self) -> Decimal {
        self.records.iter().map(|r| r.transaction_usd).sum()
    }
}

/// Left-join the dataset against the rate table and derive USD amounts.
///
/// Transaction-preserving: records with an unmatched currency are kept
/// with `transaction_usd = 0` and the distinct unmatched currencies are
/// reported, never treated as a failure.
pub fn convert_to_usd(dataset: &Dataset, rates: &RateTable) -> Conversion {
    info!("Calculating transactions in USD.");

    let mut conversion = Conversion::default();
    for record in dataset.records() {
        let usd = match rates.rate_for(&record.currency) {
            Some(rate) => round2(record.transaction * rate),
            None => {
                conversion
                    .missing_currencies
                    .insert(record.currency.clone());
                Decimal::ZERO
            }
        };
        conversion
            .records
            .push(ConvertedRecord::from_record(record, usd));
    }

    if !conversion.missing_currencies.is_empty() {
        warn!(
            "Missing conversion rates for currencies: {:?}",
            conversion.missing_currencies
        );
    }
    info!("USD transaction calculation completed.");
    conversion
}
