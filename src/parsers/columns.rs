//! Header normalization shared by the source-file parsers.
//!
//! Source files disagree on casing and whitespace ("client", " COUNTRY ",
//! "Transaction"); every header is trimmed and title-cased before the
//! required columns are resolved by name.

/// The four logical columns every source file must provide.
pub const REQUIRED_COLUMNS: [&str; 4] = ["Client", "Country", "Currency", "Transaction"];

/// Title-case a header name: uppercase after any non-alphabetic character,
/// lowercase otherwise ("market SEGMENT" -> "Market Segment").
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}

fn normalize(header: &str) -> String {
    title_case(header.trim())
}

/// Positions of the required columns within a source file's header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub client: usize,
    pub country: usize,
    pub currency: usize,
    pub transaction: usize,
}

impl ColumnMap {
    /// Resolve the required columns from a raw header row.
    ///
    /// Headers are matched after trim + title-case; extra columns are
    /// ignored. The error names the first required column that is absent.
    pub fn resolve<S: AsRef<str>>(headers: &[S]) -> Result<Self, String> {
        let normalized: Vec<String> = headers.iter().map(|h| normalize(h.as_ref())).collect();

        let find = |name: &str| -> Result<usize, String> {
            normalized
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| format!("missing required column: {name}"))
        };

        Ok(ColumnMap {
            client: find("Client")?,
            country: find("Country")?,
            currency: find("Currency")?,
            transaction: find("Transaction")?,
        })
    }

    /// The highest mapped index; rows shorter than this cannot be complete.
    pub fn max_index(&self) -> usize {
        self.client
            .max(self.country)
            .max(self.currency)
            .max(self.transaction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("client", "Client")]
    #[case("COUNTRY", "Country")]
    #[case("  currency  ", "  Currency  ")] // trim happens in normalize(), not here
    #[case("transaction amount", "Transaction Amount")]
    #[case("client_name", "Client_Name")]
    #[case("", "")]
    fn test_title_case(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(title_case(input), expected);
    }

    #[test]
    fn test_resolve_exact_headers() {
        let map = ColumnMap::resolve(&["Client", "Country", "Currency", "Transaction"]).unwrap();
        assert_eq!(
            map,
            ColumnMap {
                client: 0,
                country: 1,
                currency: 2,
                transaction: 3
            }
        );
    }

    #[test]
    fn test_resolve_messy_headers_out_of_order() {
        let map =
            ColumnMap::resolve(&[" transaction ", "CLIENT", "currency", "Notes", "country"])
                .unwrap();
        assert_eq!(map.transaction, 0);
        assert_eq!(map.client, 1);
        assert_eq!(map.currency, 2);
        assert_eq!(map.country, 4);
        assert_eq!(map.max_index(), 4);
    }

    #[rstest]
    #[case(&["Country", "Currency", "Transaction"], "Client")]
    #[case(&["Client", "Currency", "Transaction"], "Country")]
    #[case(&["Client", "Country", "Transaction"], "Currency")]
    #[case(&["Client", "Country", "Currency"], "Transaction")]
    fn test_resolve_names_missing_column(#[case] headers: &[&str], #[case] missing: &str) {
        let err = ColumnMap::resolve(headers).unwrap_err();
        assert_eq!(err, format!("missing required column: {missing}"));
    }

    #[test]
    fn test_resolve_ignores_extra_columns() {
        let map = ColumnMap::resolve(&[
            "Region",
            "Client",
            "Country",
            "Manager",
            "Currency",
            "Transaction",
        ])
        .unwrap();
        assert_eq!(map.client, 1);
        assert_eq!(map.transaction, 5);
    }
}
