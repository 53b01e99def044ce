//! Row cursors and result materialization.

use recmap_sql::Value;

use crate::bind::BoundRecord;
use crate::query::{Query, RowResult};
use crate::{Error, Result};

/// A driver-owned row cursor.
///
/// The wire or file protocol behind it is the driver's business; the
/// materializer only advances it and scans columns into adapters.
pub trait RowCursor {
    /// Column names of the result set, in projection order. Drivers
    /// that cannot report names return an empty list.
    fn columns(&self) -> Vec<String>;

    /// Advance to the next row. Returns false when exhausted.
    fn advance(&mut self) -> Result<bool>;

    /// Scan column `idx` of the current row into `slot`.
    fn scan(&mut self, idx: usize, slot: &mut crate::bind::ScanAdapter) -> Result<()>;
}

/// Callback invoked once per materialized row.
///
/// Returning an error aborts iteration immediately; the error becomes
/// the operation's result, which callers also use for early
/// termination.
pub type RowCallback<'a> = dyn FnMut(&Query, &RowResult) -> Result<()> + 'a;

/// Drain a cursor through a bound record, invoking the callback per row.
///
/// A binding with no columns at all (a shapeless `*` projection) is
/// rebound against the cursor's reported column names, so the result
/// set drives the projection instead of coming back empty.
pub fn materialize(
    query: &Query,
    cursor: &mut dyn RowCursor,
    bound: &mut BoundRecord,
    callback: &mut RowCallback<'_>,
) -> Result<()> {
    if bound.row_fields.is_empty() && !bound.has_paths() {
        let discovered = cursor.columns();
        if !discovered.is_empty() {
            *bound = BoundRecord::loose(&discovered);
        }
    }
    while cursor.advance()? {
        for (idx, slot) in bound.scan.iter_mut().enumerate() {
            cursor.scan(idx, slot)?;
        }
        let rows = bound
            .scan
            .iter()
            .map(|slot| {
                if slot.is_present() {
                    Some(slot.value())
                } else {
                    None
                }
            })
            .collect();
        let record = if query.shape.is_some() && bound.has_paths() {
            bound.shift()?;
            Some(bound.copy.clone())
        } else {
            None
        };
        let result = RowResult {
            fields: bound.row_fields.clone(),
            rows,
            record,
        };
        callback(query, &result)?;
    }
    Ok(())
}

/// A cursor over pre-fetched value rows.
///
/// Drivers that buffer their result set whole, and tests, wrap it here.
#[derive(Debug, Default)]
pub struct VecCursor {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
    pos: usize,
}

impl VecCursor {
    pub fn new(rows: Vec<Vec<Value>>) -> Self {
        Self {
            columns: Vec::new(),
            rows,
            pos: 0,
        }
    }

    pub fn with_columns(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self {
            columns,
            rows,
            pos: 0,
        }
    }
}

impl RowCursor for VecCursor {
    fn columns(&self) -> Vec<String> {
        self.columns.clone()
    }

    fn advance(&mut self) -> Result<bool> {
        if self.pos < self.rows.len() {
            self.pos += 1;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn scan(&mut self, idx: usize, slot: &mut crate::bind::ScanAdapter) -> Result<()> {
        let row = &self.rows[self.pos - 1];
        let value = row
            .get(idx)
            .cloned()
            .ok_or_else(|| Error::Driver(format!("row has no column {idx}")))?;
        slot.accept(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FieldCatalog;
    use crate::shape::{FieldDef, FieldType, RecordShape};

    fn query_with_shape() -> (Query, FieldCatalog) {
        let shape = RecordShape::new(
            "Song",
            vec![
                FieldDef::new("Title", FieldType::Text),
                FieldDef::new("Plays", FieldType::Int),
            ],
        );
        let catalog = FieldCatalog::build(&shape).unwrap();
        let mut query = Query::new("songs");
        query.shape = Some(shape);
        (query, catalog)
    }

    #[test]
    fn test_null_materializes_as_none() {
        let (query, catalog) = query_with_shape();
        let mut bound = BoundRecord::for_read(&catalog, &[]).unwrap();
        let mut cursor = VecCursor::new(vec![
            vec![Value::from("Blue"), Value::Int(9)],
            vec![Value::Null, Value::Null],
        ]);

        let mut seen = Vec::new();
        let mut cb = |_: &Query, r: &RowResult| {
            seen.push(r.rows.clone());
            Ok(())
        };
        materialize(&query, &mut cursor, &mut bound, &mut cb).unwrap();

        assert_eq!(
            seen,
            vec![
                vec![Some(Value::from("Blue")), Some(Value::Int(9))],
                vec![None, None],
            ]
        );
    }

    #[test]
    fn test_record_rebuilt_per_row() {
        let (query, catalog) = query_with_shape();
        let mut bound = BoundRecord::for_read(&catalog, &[]).unwrap();
        let mut cursor = VecCursor::new(vec![vec![Value::from("Blue"), Value::Null]]);

        let mut records = Vec::new();
        let mut cb = |_: &Query, r: &RowResult| {
            records.push(r.record.clone().expect("record projection"));
            Ok(())
        };
        materialize(&query, &mut cursor, &mut bound, &mut cb).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get(&[0]).unwrap(), Value::String("Blue".into()));
        // NULL column defaults to the zero value in the rebuilt record
        assert_eq!(records[0].get(&[1]).unwrap(), Value::Int(0));
    }

    #[test]
    fn test_empty_binding_rebinds_to_cursor_columns() {
        let query = Query::new("songs");
        let mut bound = BoundRecord::loose(&[]);
        let mut cursor = VecCursor::with_columns(
            vec!["title".to_string(), "plays".to_string()],
            vec![vec![Value::from("Blue"), Value::Int(9)]],
        );

        let mut seen = Vec::new();
        let mut cb = |_: &Query, r: &RowResult| {
            seen.push((r.fields.clone(), r.rows.clone()));
            Ok(())
        };
        materialize(&query, &mut cursor, &mut bound, &mut cb).unwrap();

        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, vec!["title", "plays"]);
        // loose bindings scan everything through the generic string adapter
        assert_eq!(
            seen[0].1,
            vec![Some(Value::from("Blue")), Some(Value::from("9"))]
        );
    }

    #[test]
    fn test_callback_error_aborts_iteration() {
        let (query, catalog) = query_with_shape();
        let mut bound = BoundRecord::for_read(&catalog, &[]).unwrap();
        let mut cursor = VecCursor::new(vec![
            vec![Value::from("one"), Value::Int(1)],
            vec![Value::from("two"), Value::Int(2)],
        ]);

        let mut count = 0;
        let mut cb = |_: &Query, _: &RowResult| {
            count += 1;
            Err(Error::Aborted("enough".into()))
        };
        let err = materialize(&query, &mut cursor, &mut bound, &mut cb).unwrap_err();
        assert!(matches!(err, Error::Aborted(_)));
        assert_eq!(count, 1);
    }
}
