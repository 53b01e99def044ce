//! Text synthesis for the four relational commands.
//!
//! Parameter placeholders follow the [`DialectPolicy`]; the WHERE
//! predicates themselves come from the caller or the criteria builder.

use crate::DialectPolicy;
use thiserror::Error;

/// Errors raised while synthesizing command text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SynthError {
    /// An order entry was not a `name:direction` pair.
    #[error("malformed order entry {0:?}: expected name:direction")]
    MalformedOrder(String),
}

/// Synthesize a SELECT.
///
/// An empty `columns` slice projects `*`. `search` is appended verbatim
/// as the WHERE predicate when non-empty. Order entries are
/// `name:direction` pairs; direction is case-insensitive and anything
/// other than a descending token sorts ascending. A `limit` of zero
/// means no limit clause.
pub fn select(
    table: &str,
    columns: &[String],
    search: &str,
    order: &[String],
    limit: u32,
) -> Result<String, SynthError> {
    let projection = if columns.is_empty() {
        "*".to_string()
    } else {
        columns.join(",")
    };

    let mut sql = format!("select {projection} from {table}");
    if !search.is_empty() {
        sql.push_str(" where ");
        sql.push_str(search);
    }
    sql.push_str(&order_clause(order)?);
    if limit > 0 {
        sql.push_str(&format!(" limit {limit}"));
    }
    Ok(sql)
}

/// Synthesize an INSERT for one value row of the batch.
///
/// Column identifiers are lower-cased and quoted per dialect.
pub fn insert(policy: &DialectPolicy, table: &str, columns: &[String]) -> String {
    let cols: Vec<String> = columns
        .iter()
        .map(|c| policy.quote_ident(&c.to_lowercase()))
        .collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table,
        cols.join(","),
        policy.placeholders(columns.len())
    )
}

/// Synthesize the UPDATE prefix up to and including `WHERE `.
///
/// The SET list covers the full projection, not just the key fields;
/// the caller appends the predicate for each row.
pub fn update(policy: &DialectPolicy, table: &str, columns: &[String]) -> String {
    let sets: Vec<String> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{}={}", c, policy.placeholder(i + 1)))
        .collect();
    format!("UPDATE {} SET {} WHERE ", table, sets.join(","))
}

/// Synthesize a DELETE.
///
/// An empty predicate legally means "all rows" and omits the WHERE
/// clause entirely.
pub fn delete(table: &str, predicate: &str) -> String {
    if predicate.is_empty() {
        format!("DELETE FROM {table}")
    } else {
        format!("DELETE FROM {table} WHERE {predicate}")
    }
}

fn order_clause(order: &[String]) -> Result<String, SynthError> {
    if order.is_empty() {
        return Ok(String::new());
    }
    let mut parts = Vec::with_capacity(order.len());
    for entry in order {
        let pieces: Vec<&str> = entry.split(':').collect();
        if pieces.len() != 2 {
            return Err(SynthError::MalformedOrder(entry.clone()));
        }
        let dir = if pieces[1].eq_ignore_ascii_case("desc") {
            "DESC"
        } else {
            "ASC"
        };
        parts.push(format!("{} {}", pieces[0], dir));
    }
    Ok(format!(" order by {}", parts.join(", ")))
}
