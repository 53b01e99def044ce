//! WHERE-clause construction from key fields and literal conditions.

use crate::Value;

/// Build the WHERE predicate for one row of an update batch.
///
/// Entries of `update` that already carry a comparison operator are
/// appended verbatim as caller-supplied conditions. Plain entries name a
/// projected column and bind that column's value from the row by
/// equality, rendered bare. Clauses are AND-joined.
///
/// An empty result is legal and means "all rows"; callers must pass it
/// through deliberately, never by accident.
pub fn where_from_keys(update: &[String], fields: &[String], row: &[Value]) -> String {
    let mut clauses = Vec::new();
    for key in update {
        if key.contains('=') || key.contains('<') || key.contains('>') {
            clauses.push(key.clone());
            continue;
        }
        if let Some(idx) = fields.iter().position(|f| f == key) {
            if let Some(value) = row.get(idx) {
                clauses.push(format!("{}={}", key, value.bare_literal()));
            }
        }
    }
    clauses.join(" AND ")
}

/// Build the WHERE predicate for one deleted row from field/value pairs.
///
/// A field name prefixed with `%` becomes a LIKE match on the stripped
/// name; everything else is an equality. String-typed values are
/// single-quoted here, unlike the bare rendering of key-field criteria.
pub fn where_for_delete(fields: &[String], row: &[Value]) -> String {
    let mut clauses = Vec::new();
    for (idx, field) in fields.iter().enumerate() {
        let Some(value) = row.get(idx) else {
            continue;
        };
        match field.strip_prefix('%') {
            Some(name) => clauses.push(format!("{} LIKE {}", name, value.sql_literal())),
            None => clauses.push(format!("{}={}", field, value.sql_literal())),
        }
    }
    clauses.join(" AND ")
}
