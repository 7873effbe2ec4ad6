use rusqlite::ToSql;
use rusqlite::types::ToSqlOutput;

use super::{Clause, Combinator, Predicate};
use crate::db::placeholders;

/// A value bound to one `?` placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlParam {
    Text(String),
    Int(i64),
}

impl ToSql for SqlParam {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            Self::Text(text) => Ok(ToSqlOutput::from(text.as_str())),
            Self::Int(n) => Ok(ToSqlOutput::from(*n)),
        }
    }
}

/// SQL fragment over the `files f` alias plus its parameters, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPredicate {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

const MEMBERSHIP_JOIN: &str = "SELECT 1 FROM file_tags ft \
     JOIN tags t ON t.id = ft.tag_id \
     JOIN categories c ON c.id = t.category_id \
     WHERE ft.file_id = f.id AND c.name = ?";

/// Compile a predicate into a `WHERE` fragment
///
/// An empty conjunction is `1=1`; an empty disjunction is `0=1`.
#[must_use]
pub fn compile(predicate: &Predicate) -> CompiledPredicate {
    let mut params = Vec::new();
    let fragments: Vec<String> = predicate
        .clauses
        .iter()
        .map(|clause| compile_clause(clause, &mut params))
        .collect();

    let sql = match (predicate.combinator, fragments.is_empty()) {
        (Combinator::All, true) => "1=1".to_string(),
        (Combinator::Any, true) => "0=1".to_string(),
        (Combinator::All, false) => fragments.join(" AND "),
        (Combinator::Any, false) => format!("({})", fragments.join(" OR ")),
    };

    CompiledPredicate { sql, params }
}

fn compile_clause(clause: &Clause, params: &mut Vec<SqlParam>) -> String {
    match clause {
        Clause::ValueIn { category, values } => {
            if values.is_empty() {
                return "0=1".to_string();
            }
            params.push(SqlParam::Text(category.clone()));
            params.extend(values.iter().cloned().map(SqlParam::Text));
            format!(
                "EXISTS ({MEMBERSHIP_JOIN} AND t.value IN ({}))",
                placeholders(values.len())
            )
        }
        Clause::Exists { category, value } => {
            params.push(SqlParam::Text(category.clone()));
            params.push(SqlParam::Text(value.clone()));
            format!("EXISTS ({MEMBERSHIP_JOIN} AND t.value = ?)")
        }
        Clause::Assigned { category } => {
            params.push(SqlParam::Text(category.clone()));
            format!("EXISTS ({MEMBERSHIP_JOIN})")
        }
        Clause::NotExists { category } => {
            params.push(SqlParam::Text(category.clone()));
            format!("NOT EXISTS ({MEMBERSHIP_JOIN})")
        }
    }
}
