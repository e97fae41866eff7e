/// Bytes of the file sampled when guessing the delimiter.
pub const SNIFF_SAMPLE_LEN: usize = 2048;

const CANDIDATES: [u8; 4] = [b',', b';', b'\t', b'|'];

/// Guess the field delimiter from the leading bytes of a delimited file.
///
/// Candidates are comma, semicolon, tab and pipe. A candidate wins when it
/// appears in every sampled complete line the same number of times; ties go
/// to the higher count. Returns `None` when no candidate fits, in which
/// case the file is treated as unparsable.
pub fn detect_delimiter(sample: &[u8]) -> Option<u8> {
    let text = String::from_utf8_lossy(&sample[..sample.len().min(SNIFF_SAMPLE_LEN)]);

    let mut lines: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();
    // The sample may cut the last line short; drop it unless it is all we have.
    if lines.len() > 1 && !text.ends_with('\n') {
        lines.pop();
    }
    if lines.is_empty() {
        return None;
    }

    let mut best: Option<(u8, usize)> = None;
    for candidate in CANDIDATES {
        let mut counts = lines
            .iter()
            .map(|line| line.bytes().filter(|&b| b == candidate).count());
        let first = counts.next().unwrap_or(0);
        if first == 0 || !counts.all(|count| count == first) {
            continue;
        }
        if best.is_none_or(|(_, count)| first > count) {
            best = Some((candidate, first));
        }
    }
    if let Some((delimiter, _)) = best {
        return Some(delimiter);
    }

    // Quoted fields can make per-line counts disagree; fall back to the
    // most frequent candidate in the header line.
    CANDIDATES
        .into_iter()
        .map(|candidate| {
            (
                candidate,
                lines[0].bytes().filter(|&b| b == candidate).count(),
            )
        })
        .filter(|&(_, count)| count > 0)
        .max_by_key(|&(_, count)| count)
        .map(|(delimiter, _)| delimiter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(b"Client,Country,Currency,Transaction\nAcme,US,USD,100.55\n", b',')]
    #[case(b"Client;Country;Currency;Transaction\nAcme;US;USD;100.55\n", b';')]
    #[case(b"Client\tCountry\tCurrency\tTransaction\nAcme\tUS\tUSD\t100.55\n", b'\t')]
    #[case(b"Client|Country|Currency|Transaction\nAcme|US|USD|100.55\n", b'|')]
    fn test_detects_common_delimiters(#[case] sample: &[u8], #[case] expected: u8) {
        assert_eq!(detect_delimiter(sample), Some(expected));
    }

    #[test]
    fn test_header_only_sample() {
        assert_eq!(
            detect_delimiter(b"Client,Country,Currency,Transaction\n"),
            Some(b',')
        );
    }

    #[test]
    fn test_inconsistent_counts_are_rejected() {
        // Semicolons appear but not the same number of times per line;
        // commas are consistent and win.
        let sample = b"a,b;x,c\none,two,three\n";
        assert_eq!(detect_delimiter(sample), Some(b','));
    }

    #[test]
    fn test_quoted_fields_fall_back_to_header_count() {
        // The quoted comma makes the data line disagree with the header;
        // the header-line majority still picks comma.
        let sample = b"a,b,c\n\"x, y\",z,w\n";
        assert_eq!(detect_delimiter(sample), Some(b','));
    }

    #[test]
    fn test_no_delimiter_found() {
        assert_eq!(detect_delimiter(b"just one bare value\nanother\n"), None);
        assert_eq!(detect_delimiter(b""), None);
        assert_eq!(detect_delimiter(b"\n\n"), None);
    }

    #[test]
    fn test_partial_trailing_line_is_ignored() {
        // The truncated last line would disagree on the comma count.
        let sample = b"a,b,c\nd,e,f\ng,h";
        assert_eq!(detect_delimiter(sample), Some(b','));
    }

    #[test]
    fn test_sample_is_capped() {
        let mut sample = Vec::new();
        sample.extend_from_slice(b"a,b,c\n");
        while sample.len() < SNIFF_SAMPLE_LEN * 2 {
            sample.extend_from_slice(b"d,e,f\n");
        }
        assert_eq!(detect_delimiter(&sample), Some(b','));
    }
}
