//! The driver seam and per-handle operation orchestration.
//!
//! Vendor drivers implement [`Driver`]; everything above the trait is
//! backend-agnostic. A [`Handle`] owns one driver and a single
//! transaction slot.

use recmap_sql::{DialectPolicy, Value, where_for_delete, where_from_keys};
use tracing::debug;

use crate::bind::BoundRecord;
use crate::catalog::FieldCatalog;
use crate::cursor::{RowCallback, RowCursor, materialize};
use crate::query::{Entries, Query};
use crate::{Error, Result};

/// Vendor driver contract.
///
/// Connection management, transaction wiring, and the wire protocol all
/// live behind this trait, outside the engine. Execution errors are
/// surfaced verbatim and never retried here.
pub trait Driver: Send {
    /// The SQL-generation knobs for this backend.
    fn policy(&self) -> DialectPolicy;

    /// Run a mutation, returning the affected-row count.
    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<u64>;

    /// Run a query, returning a row cursor.
    fn query(&mut self, sql: &str, params: &[Value]) -> Result<Box<dyn RowCursor + '_>>;

    fn begin(&mut self) -> Result<()>;
    fn commit(&mut self) -> Result<()>;
    fn rollback(&mut self) -> Result<()>;
}

/// One database connection with a single transaction slot.
///
/// A handle drives one operation at a time; its bound record and
/// adapters are mutated in place per row. Run concurrent operations on
/// independent handles.
pub struct Handle {
    driver: Box<dyn Driver>,
    in_transaction: bool,
}

impl Handle {
    pub fn new(driver: Box<dyn Driver>) -> Self {
        Self {
            driver,
            in_transaction: false,
        }
    }

    /// Begin a transaction. Beginning while one is open is an error,
    /// never a silent nesting.
    pub fn begin(&mut self) -> Result<()> {
        if self.in_transaction {
            return Err(Error::TransactionOpen);
        }
        self.driver.begin()?;
        self.in_transaction = true;
        Ok(())
    }

    pub fn commit(&mut self) -> Result<()> {
        if !self.in_transaction {
            return Err(Error::NoTransaction);
        }
        self.driver.commit()?;
        self.in_transaction = false;
        Ok(())
    }

    pub fn rollback(&mut self) -> Result<()> {
        if !self.in_transaction {
            return Err(Error::NoTransaction);
        }
        self.driver.rollback()?;
        self.in_transaction = false;
        Ok(())
    }

    /// SELECT and materialize, invoking the callback once per row until
    /// the cursor is exhausted or the callback signals termination.
    pub fn search(&mut self, query: &Query, callback: &mut RowCallback<'_>) -> Result<()> {
        let mut bound = match &query.shape {
            Some(shape) => {
                let catalog = FieldCatalog::build(shape)?;
                BoundRecord::for_read(&catalog, &query.fields)?
            }
            None => {
                let literal: Vec<String> = query
                    .fields
                    .iter()
                    .filter(|f| f.as_str() != "*")
                    .cloned()
                    .collect();
                BoundRecord::loose(&literal)
            }
        };
        let sql = recmap_sql::select(
            &query.table_name,
            &bound.row_fields,
            &query.search,
            &query.order,
            query.limit,
        )?;
        debug!(%sql, "search");
        let mut cursor = self.driver.query(&sql, &[])?;
        materialize(query, cursor.as_mut(), &mut bound, callback)
    }

    /// INSERT, one execution per value row.
    ///
    /// For dialects that report affected rows, an execution matching
    /// zero rows is promoted to [`Error::NoRowsAffected`]. The first
    /// failing row aborts the remainder of the batch.
    pub fn insert(&mut self, table: &str, entries: &Entries) -> Result<u64> {
        let (fields, rows) = entry_rows(entries)?;
        let policy = self.driver.policy();
        let sql = recmap_sql::insert(&policy, table, &fields);
        debug!(%sql, rows = rows.len(), "insert");
        let mut total = 0;
        for row in &rows {
            if row.len() != fields.len() {
                return Err(Error::ShapeMismatch(format!(
                    "value row with {} entries for {} fields",
                    row.len(),
                    fields.len()
                )));
            }
            let affected = self.driver.execute(&sql, row)?;
            if affected == 0 && policy.reports_affected_rows {
                return Err(Error::NoRowsAffected);
            }
            total += affected;
        }
        Ok(total)
    }

    /// UPDATE with the full projection in SET and the `update` key
    /// fields (or the criteria override) in WHERE, per row.
    ///
    /// An empty predicate legally means "all rows" and omits the WHERE
    /// clause entirely.
    pub fn update(&mut self, table: &str, entries: &Entries) -> Result<u64> {
        let (fields, rows) = entry_rows(entries)?;
        let policy = self.driver.policy();
        let prefix = recmap_sql::update(&policy, table, &fields);
        let mut total = 0;
        for row in &rows {
            let predicate = if entries.criteria.is_empty() {
                where_from_keys(&entries.update, &fields, row)
            } else {
                entries.criteria.clone()
            };
            let sql = if predicate.is_empty() {
                prefix.strip_suffix(" WHERE ").unwrap_or(&prefix).to_string()
            } else {
                format!("{prefix}{predicate}")
            };
            debug!(%sql, "update");
            total += self.driver.execute(&sql, row)?;
        }
        Ok(total)
    }

    /// DELETE by the criteria override, or per row by synthesized
    /// field/value equality (one `%`-prefixed LIKE field supported).
    pub fn delete(&mut self, table: &str, entries: &Entries) -> Result<u64> {
        if !entries.criteria.is_empty() {
            let sql = recmap_sql::delete(table, &entries.criteria);
            debug!(%sql, "delete");
            return self.driver.execute(&sql, &[]);
        }
        let (fields, rows) = entry_rows(entries)?;
        let mut total = 0;
        for row in &rows {
            let sql = recmap_sql::delete(table, &where_for_delete(&fields, row));
            debug!(%sql, "delete");
            total += self.driver.execute(&sql, &[])?;
        }
        Ok(total)
    }
}

/// Resolve an entries descriptor to concrete fields and value rows.
///
/// With a shape and records, the catalog drives the projection and each
/// record is bound for writing; otherwise the literal fields/values are
/// taken as-is.
fn entry_rows(entries: &Entries) -> Result<(Vec<String>, Vec<Vec<Value>>)> {
    match (&entries.shape, entries.records.is_empty()) {
        (Some(shape), false) => {
            let catalog = FieldCatalog::build(shape)?;
            let mut fields = Vec::new();
            let mut rows = Vec::with_capacity(entries.records.len());
            for record in &entries.records {
                let bound = BoundRecord::for_write(&catalog, &entries.fields, record)?;
                if fields.is_empty() {
                    fields = bound.row_fields;
                }
                rows.push(bound.values);
            }
            Ok((fields, rows))
        }
        _ => Ok((entries.fields.clone(), entries.values.clone())),
    }
}
