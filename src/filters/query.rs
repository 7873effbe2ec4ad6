//! Bulk tag queries
//!
//! `color:red, size:large` selects files carrying both pairs;
//! `color:red OR color:blue` selects files carrying either. Mixing the two
//! forms is not supported: one ` OR ` anywhere makes the whole query OR.

use regex::Regex;
use std::sync::LazyLock;

use super::error::FilterError;
use super::types::{QueryMode, TagPair, TagQuery};

static OR_KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i) OR ").unwrap_or_else(|e| panic!("invalid OR pattern: {e}"))
});

/// Parse a tag query into pairs and a combination mode
///
/// # Errors
/// - `FilterError::EmptyQuery` if the query has no pairs
/// - `FilterError::InvalidTagSyntax` for a piece without `:` or with an
///   empty category or value
pub fn parse_tag_query(query: &str) -> Result<TagQuery, FilterError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(FilterError::EmptyQuery);
    }

    let (mode, pieces): (QueryMode, Vec<&str>) = if OR_KEYWORD.is_match(query) {
        (QueryMode::Any, OR_KEYWORD.split(query).collect())
    } else {
        (QueryMode::All, query.split(',').collect())
    };

    let pairs = pieces
        .into_iter()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(parse_pair)
        .collect::<Result<Vec<_>, _>>()?;

    if pairs.is_empty() {
        return Err(FilterError::EmptyQuery);
    }
    Ok(TagQuery { mode, pairs })
}

/// Split `category:value` at the first colon
///
/// # Errors
/// Returns `FilterError::InvalidTagSyntax` with the piece as given.
pub fn parse_pair(piece: &str) -> Result<TagPair, FilterError> {
    let invalid = || FilterError::InvalidTagSyntax(piece.to_string());
    let (category, value) = piece.split_once(':').ok_or_else(invalid)?;
    let (category, value) = (category.trim(), value.trim());
    if category.is_empty() || value.is_empty() {
        return Err(invalid());
    }
    Ok(TagPair::new(category, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_and_query() {
        let q = parse_tag_query(" color:red , size:large ").unwrap();
        assert_eq!(q.mode, QueryMode::All);
        assert_eq!(
            q.pairs,
            vec![TagPair::new("color", "red"), TagPair::new("size", "large")]
        );
    }

    #[test]
    fn test_or_query_any_case_keeps_values() {
        let q = parse_tag_query("color:Red or color:Blue OR mood:Calm").unwrap();
        assert_eq!(q.mode, QueryMode::Any);
        let values: Vec<_> = q.pairs.iter().map(|p| p.value.as_str()).collect();
        assert_eq!(values, vec!["Red", "Blue", "Calm"]);
    }

    #[test]
    fn test_or_wins_over_commas() {
        let q = parse_tag_query("color:red, size:large OR mood:calm").unwrap();
        assert_eq!(q.mode, QueryMode::Any);
        // Commas are not separators in OR mode
        assert_eq!(
            q.pairs,
            vec![
                TagPair::new("color", "red, size:large"),
                TagPair::new("mood", "calm")
            ]
        );
    }

    #[test]
    fn test_value_may_contain_colon() {
        let q = parse_tag_query("time:12:30").unwrap();
        assert_eq!(q.pairs, vec![TagPair::new("time", "12:30")]);
    }

    #[test]
    fn test_empty_pieces_skipped() {
        let q = parse_tag_query("color:red,,").unwrap();
        assert_eq!(q.pairs.len(), 1);
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_tag_query("   "), Err(FilterError::EmptyQuery));
        assert_eq!(parse_tag_query(",,"), Err(FilterError::EmptyQuery));
        assert_eq!(
            parse_tag_query("red"),
            Err(FilterError::InvalidTagSyntax("red".into()))
        );
        assert_eq!(
            parse_tag_query("color:"),
            Err(FilterError::InvalidTagSyntax("color:".into()))
        );
        assert_eq!(
            parse_tag_query(":red"),
            Err(FilterError::InvalidTagSyntax(":red".into()))
        );
    }

    #[test]
    fn test_word_or_inside_value_is_not_a_keyword() {
        let q = parse_tag_query("place:oregon,mood:bored").unwrap();
        assert_eq!(q.mode, QueryMode::All);
        assert_eq!(q.pairs.len(), 2);
    }
}
