//! Path-segment tag filters
//!
//! `/tag/color/red/and/tag/size/large` selects files tagged `color:red`
//! (or an alias of red) and `size:large`.

use serde::Serialize;

use super::error::FilterError;
use super::types::{FilterCriterion, FilterKind};
use crate::schema::{AliasTable, PREVIEW_VALUE, UNASSIGNED_VALUE};

const PATH_PREFIX: &str = "tag/";
const SEGMENT_SEPARATOR: &str = "/and/tag/";

/// Parse a filter path into criteria, in path order
///
/// The leading `/tag/` is optional. Each segment must be exactly
/// `<category>/<value>` with both parts non-empty.
///
/// # Errors
/// Returns `FilterError::MalformedFilterPath` naming the first bad segment.
pub fn parse_filter_path(path: &str, aliases: &AliasTable) -> Result<Vec<FilterCriterion>, FilterError> {
    let trimmed = path.trim().trim_start_matches('/');
    let body = trimmed.strip_prefix(PATH_PREFIX).unwrap_or(trimmed);

    body.split(SEGMENT_SEPARATOR)
        .map(|segment| parse_segment(segment, aliases))
        .collect()
}

fn parse_segment(segment: &str, aliases: &AliasTable) -> Result<FilterCriterion, FilterError> {
    let parts: Vec<&str> = segment.split('/').collect();
    let [category, value] = parts.as_slice() else {
        return Err(FilterError::MalformedFilterPath(segment.to_string()));
    };
    if category.is_empty() || value.is_empty() {
        return Err(FilterError::MalformedFilterPath(segment.to_string()));
    }

    let kind = match *value {
        UNASSIGNED_VALUE => FilterKind::Unassigned,
        PREVIEW_VALUE => FilterKind::Preview,
        _ => FilterKind::ValueMatch(aliases.expand(category, value)),
    };

    Ok(FilterCriterion {
        category: (*category).to_string(),
        requested: (*value).to_string(),
        kind,
    })
}

/// A navigation entry for the display side
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub name: String,
    pub url: String,
}

impl Breadcrumb {
    fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// A parsed filter path with display helpers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterPath {
    pub criteria: Vec<FilterCriterion>,
}

impl FilterPath {
    /// # Errors
    /// See [`parse_filter_path`].
    pub fn parse(path: &str, aliases: &AliasTable) -> Result<Self, FilterError> {
        Ok(Self {
            criteria: parse_filter_path(path, aliases)?,
        })
    }

    #[must_use]
    pub fn has_preview(&self) -> bool {
        self.criteria.iter().any(FilterCriterion::is_preview)
    }

    /// Page heading, e.g. `Tagged: color: red, size: large`
    ///
    /// Preview paths join their parts with ` + ` instead.
    #[must_use]
    pub fn title(&self) -> String {
        let parts: Vec<String> = self
            .criteria
            .iter()
            .map(|c| format!("{}: {}", c.category, c.requested))
            .collect();
        let separator = if self.has_preview() { " + " } else { ", " };
        format!("Tagged: {}", parts.join(separator))
    }

    /// Canonical path for the first `upto` criteria
    #[must_use]
    pub fn url(&self, upto: usize) -> String {
        let mut url = String::from("/tag");
        for (idx, c) in self.criteria.iter().take(upto).enumerate() {
            if idx > 0 {
                url.push_str("/and/tag");
            }
            url.push('/');
            url.push_str(&c.category);
            url.push('/');
            url.push_str(&c.requested);
        }
        url
    }

    /// Home, Tags, then one entry per new category and one per value
    #[must_use]
    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        let mut crumbs = vec![Breadcrumb::new("Home", "/"), Breadcrumb::new("Tags", "/tags")];
        let mut seen: Vec<&str> = Vec::new();

        for (idx, c) in self.criteria.iter().enumerate() {
            if !seen.contains(&c.category.as_str()) {
                seen.push(&c.category);
                crumbs.push(Breadcrumb::new(
                    title_case(&c.category),
                    format!("/tags#tag-{}", c.category),
                ));
            }
            crumbs.push(Breadcrumb::new(title_case(&c.requested), self.url(idx + 1)));
        }
        crumbs
    }
}

/// Uppercase the first letter of every word
///
/// Any character other than a letter, digit or `_` starts a new word, so
/// `sci-fi` becomes `Sci-Fi`.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        if at_word_start {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        at_word_start = !(ch.is_alphanumeric() || ch == '_');
    }
    out
}
