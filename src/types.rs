use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::parsers::prelude::*;

/// Round a monetary amount to 2 decimal places.
///
/// Midpoint rounds away from zero (50.005 -> 50.01), matching how the
/// report treats half-cent amounts everywhere in the pipeline.
pub fn round2(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// First character of the client identifier, used as the market-segment key.
///
/// An empty client yields an empty segment.
pub fn market_segment(client: &str) -> String {
    client.chars().next().map(String::from).unwrap_or_default()
}

/// One normalized line item of the canonical dataset.
///
/// Created by the file loader from a parsed source row plus the date
/// extracted from the file's path; immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub client: String,
    pub country: String,
    pub currency: String,
    pub transaction: Decimal,
    pub date: NaiveDate,
}

impl TransactionRecord {
    pub fn from_source(row: SourceRow, date: NaiveDate) -> Self {
        TransactionRecord {
            client: row.client,
            country: row.country,
            currency: row.currency,
            transaction: row.transaction,
            date,
        }
    }
}

/// A [`TransactionRecord`] augmented with its USD-equivalent amount.
///
/// `transaction_usd` is zero when the record's currency had no rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertedRecord {
    pub client: String,
    pub country: String,
    pub currency: String,
    pub transaction: Decimal,
    pub date: NaiveDate,
    pub transaction_usd: Decimal,
}

impl ConvertedRecord {
    pub fn from_record(record: &TransactionRecord, transaction_usd: Decimal) -> Self {
        ConvertedRecord {
            client: record.client.clone(),
            country: record.country.clone(),
            currency: record.currency.clone(),
            transaction: record.transaction,
            date: record.date,
            transaction_usd,
        }
    }
}
