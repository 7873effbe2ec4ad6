//! Numeric file ID ranges: `3,5-7,12`

use std::collections::HashSet;

use super::error::FilterError;

/// Upper bound on the number of IDs one input may expand to
pub const MAX_RANGE_IDS: usize = 100_000;

/// Parse a comma-separated list of IDs and inclusive ranges
///
/// Tokens are trimmed and empty tokens skipped. Duplicates are dropped,
/// keeping first-seen order. An input with no tokens yields an empty list.
///
/// # Errors
/// Returns `FilterError::InvalidRange` naming the token that is not a
/// non-negative integer or an `N-M` range with `N <= M`, or the token that
/// pushes the input past [`MAX_RANGE_IDS`] IDs.
pub fn parse_file_id_range(input: &str) -> Result<Vec<i64>, FilterError> {
    let mut ids = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let invalid = || FilterError::InvalidRange(token.to_string());

        let (start, end) = if token.contains('-') {
            let parts: Vec<&str> = token.split('-').collect();
            let [start, end] = parts.as_slice() else {
                return Err(invalid());
            };
            let start = parse_id(start).ok_or_else(invalid)?;
            let end = parse_id(end).ok_or_else(invalid)?;
            if start > end || end - start >= MAX_RANGE_IDS as i64 {
                return Err(invalid());
            }
            (start, end)
        } else {
            let id = parse_id(token).ok_or_else(invalid)?;
            (id, id)
        };

        for id in start..=end {
            if seen.insert(id) {
                ids.push(id);
            }
        }
        if ids.len() > MAX_RANGE_IDS {
            return Err(invalid());
        }
    }

    Ok(ids)
}

fn parse_id(text: &str) -> Option<i64> {
    let text = text.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}
