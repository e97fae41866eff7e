use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{ConvertedRecord, market_segment};

/// Total USD revenue for one client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientTotal {
    pub client: String,
    pub total_usd: Decimal,
}

/// Total USD revenue for one market segment on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentDateTotal {
    pub market_segment: String,
    pub date: NaiveDate,
    pub total_usd: Decimal,
}

/// Total USD revenue for one country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryTotal {
    pub country: String,
    pub total_usd: Decimal,
}

/// Group by client and sum USD amounts.
///
/// Grouping keys are matched exactly; normalization already happened at
/// load time. Results come back in key order.
pub fn client_totals(records: &[ConvertedRecord]) -> Vec<ClientTotal> {
    let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();
    for record in records {
        *totals.entry(record.client.clone()).or_default() += record.transaction_usd;
    }
    totals
        .into_iter()
        .map(|(client, total_usd)| ClientTotal { client, total_usd })
        .collect()
}

/// Group by (market segment, date) and sum USD amounts.
///
/// The market segment is the first character of the client identifier.
pub fn segment_date_totals(records: &[ConvertedRecord]) -> Vec<SegmentDateTotal> {
    let mut totals: BTreeMap<(String, NaiveDate), Decimal> = BTreeMap::new();
    for record in records {
        *totals
            .entry((market_segment(&record.client), record.date))
            .or_default() += record.transaction_usd;
    }
    totals
        .into_iter()
        .map(|((market_segment, date), total_usd)| SegmentDateTotal {
            market_segment,
            date,
            total_usd,
        })
        .collect()
}

/// Group by country and sum USD amounts.
pub fn country_totals(records: &[ConvertedRecord]) -> Vec<CountryTotal> {
    let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();
    for record in records {
        *totals.entry(record.country.clone()).or_default() += record.transaction_usd;
    }
    totals
        .into_iter()
        .map(|(country, total_usd)| CountryTotal { country, total_usd })
        .collect()
}
