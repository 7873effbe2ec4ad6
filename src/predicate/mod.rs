//! Set predicates over the file/tag relation
//!
//! Filters are first lowered into a small clause IR and then compiled to a
//! parameterized SQL `WHERE` fragment. Category names and values only ever
//! travel as bound parameters; the SQL text depends on nothing but the
//! clause shapes and the number of values.

pub mod compile;

pub use compile::{CompiledPredicate, SqlParam, compile};

use serde::Serialize;

use crate::filters::{FilterCriterion, FilterKind, TagPair};

/// One membership test against a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Clause {
    /// File has a tag in `category` whose value is one of `values`
    ValueIn { category: String, values: Vec<String> },
    /// File has exactly `category:value`
    Exists { category: String, value: String },
    /// File has some tag in `category`
    Assigned { category: String },
    /// File has no tag in `category`
    NotExists { category: String },
}

/// How the clauses of a predicate combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Combinator {
    #[default]
    All,
    Any,
}

/// A conjunction (or disjunction) of clauses
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Predicate {
    pub combinator: Combinator,
    pub clauses: Vec<Clause>,
}

impl Predicate {
    /// Lower path-filter criteria into an AND of clauses
    ///
    /// Preview criteria are skipped; the selection layer substitutes them.
    #[must_use]
    pub fn from_criteria(criteria: &[FilterCriterion]) -> Self {
        let clauses = criteria
            .iter()
            .filter_map(|c| match &c.kind {
                FilterKind::ValueMatch(values) => Some(Clause::ValueIn {
                    category: c.category.clone(),
                    values: values.clone(),
                }),
                FilterKind::Unassigned => Some(Clause::NotExists {
                    category: c.category.clone(),
                }),
                FilterKind::Preview => None,
            })
            .collect();
        Self {
            combinator: Combinator::All,
            clauses,
        }
    }

    /// Files carrying every pair
    #[must_use]
    pub fn all_of(pairs: &[TagPair]) -> Self {
        Self {
            combinator: Combinator::All,
            clauses: pairs.iter().map(Clause::exists).collect(),
        }
    }

    /// Files carrying at least one pair
    #[must_use]
    pub fn any_of(pairs: &[TagPair]) -> Self {
        Self {
            combinator: Combinator::Any,
            clauses: pairs.iter().map(Clause::exists).collect(),
        }
    }

    /// Add a clause, builder style
    #[must_use]
    pub fn with(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

impl Clause {
    fn exists(pair: &TagPair) -> Self {
        Self::Exists {
            category: pair.category.clone(),
            value: pair.value.clone(),
        }
    }
}
