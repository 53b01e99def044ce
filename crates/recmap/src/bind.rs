//! Value binding.
//!
//! A [`BoundRecord`] is one operation's working set: the selected
//! columns, the parallel write-value and null-safe scan-adapter
//! sequences, and a freshly allocated copy target that materialized
//! rows are rebuilt into. The three sequences are always index-aligned.

use chrono::{DateTime, Utc};
use recmap_sql::Value;

use crate::catalog::{CatalogEntry, FieldCatalog, FieldPath};
use crate::record::{RecordValue, zero_value};
use crate::shape::FieldType;
use crate::{Error, Result};

/// Null-safe scan slot for one projected column.
///
/// Adapters answer "is a value present" and hand back the unwrapped
/// value after a scan. Bytes carry no nullability wrapper; an empty
/// sequence means "no data".
#[derive(Debug, Clone, PartialEq)]
pub enum ScanAdapter {
    Text(Option<String>),
    Int(Option<i64>),
    Float(Option<f64>),
    Bool(Option<bool>),
    Timestamp(Option<DateTime<Utc>>),
    Bytes(Vec<u8>),
}

impl ScanAdapter {
    /// Pick the adapter for a declared leaf type. Unknown declared
    /// types fall back to the generic nullable-string adapter.
    pub fn for_type(ty: &FieldType) -> Self {
        match ty {
            FieldType::Int => ScanAdapter::Int(None),
            FieldType::Float => ScanAdapter::Float(None),
            FieldType::Bool => ScanAdapter::Bool(None),
            FieldType::Timestamp => ScanAdapter::Timestamp(None),
            FieldType::Bytes => ScanAdapter::Bytes(Vec::new()),
            _ => ScanAdapter::Text(None),
        }
    }

    /// Accept one scanned value. NULL clears the slot; a value of the
    /// wrong semantic type is a shape mismatch. The text adapter also
    /// absorbs numerics and booleans, the way generic drivers hand
    /// anything back as a string.
    pub fn accept(&mut self, value: Value) -> Result<()> {
        match (self, value) {
            (ScanAdapter::Text(slot), Value::String(v)) => *slot = Some(v),
            (ScanAdapter::Text(slot), Value::Int(v)) => *slot = Some(v.to_string()),
            (ScanAdapter::Text(slot), Value::Float(v)) => *slot = Some(v.to_string()),
            (ScanAdapter::Text(slot), Value::Bool(v)) => *slot = Some(v.to_string()),
            (ScanAdapter::Text(slot), Value::Null) => *slot = None,
            (ScanAdapter::Int(slot), Value::Int(v)) => *slot = Some(v),
            (ScanAdapter::Int(slot), Value::Null) => *slot = None,
            (ScanAdapter::Float(slot), Value::Float(v)) => *slot = Some(v),
            (ScanAdapter::Float(slot), Value::Null) => *slot = None,
            (ScanAdapter::Bool(slot), Value::Bool(v)) => *slot = Some(v),
            (ScanAdapter::Bool(slot), Value::Null) => *slot = None,
            (ScanAdapter::Timestamp(slot), Value::Timestamp(v)) => *slot = Some(v),
            (ScanAdapter::Timestamp(slot), Value::Null) => *slot = None,
            (ScanAdapter::Bytes(slot), Value::Bytes(v)) => *slot = v,
            (ScanAdapter::Bytes(slot), Value::Null) => slot.clear(),
            (adapter, value) => {
                return Err(Error::ShapeMismatch(format!(
                    "cannot scan {value:?} into {adapter:?}"
                )));
            }
        }
        Ok(())
    }

    /// Whether the last scan produced a value.
    pub fn is_present(&self) -> bool {
        match self {
            ScanAdapter::Text(v) => v.is_some(),
            ScanAdapter::Int(v) => v.is_some(),
            ScanAdapter::Float(v) => v.is_some(),
            ScanAdapter::Bool(v) => v.is_some(),
            ScanAdapter::Timestamp(v) => v.is_some(),
            ScanAdapter::Bytes(v) => !v.is_empty(),
        }
    }

    /// The unwrapped value, NULL when absent.
    pub fn value(&self) -> Value {
        match self {
            ScanAdapter::Text(Some(v)) => Value::String(v.clone()),
            ScanAdapter::Int(Some(v)) => Value::Int(*v),
            ScanAdapter::Float(Some(v)) => Value::Float(*v),
            ScanAdapter::Bool(Some(v)) => Value::Bool(*v),
            ScanAdapter::Timestamp(Some(v)) => Value::Timestamp(*v),
            ScanAdapter::Bytes(v) if !v.is_empty() => Value::Bytes(v.clone()),
            _ => Value::Null,
        }
    }
}

/// One operation's binding session.
#[derive(Debug)]
pub struct BoundRecord {
    /// Selected column names, in projection order.
    pub row_fields: Vec<String>,
    /// Write values, index-aligned with `row_fields`.
    pub values: Vec<Value>,
    /// Scan adapters, index-aligned with `row_fields`.
    pub scan: Vec<ScanAdapter>,
    /// Rebuild target for materialized rows.
    pub copy: RecordValue,
    paths: Vec<FieldPath>,
}

impl BoundRecord {
    /// Bind a record instance for writing: one value per selected
    /// column, in catalog order when the projection is `*`.
    pub fn for_write(
        catalog: &FieldCatalog,
        fields: &[String],
        record: &RecordValue,
    ) -> Result<Self> {
        if record.shape() != catalog.shape() {
            return Err(Error::ShapeMismatch(format!(
                "record of shape {} bound against catalog for {}",
                record.shape().name,
                catalog.shape().name
            )));
        }
        let entries = resolve(catalog, fields)?;
        let values = entries
            .iter()
            .map(|e| record.get(&e.path))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_entries(catalog, entries, values))
    }

    /// Bind for reading: a scan adapter per selected column and a fresh
    /// copy target.
    pub fn for_read(catalog: &FieldCatalog, fields: &[String]) -> Result<Self> {
        let entries = resolve(catalog, fields)?;
        let values = entries.iter().map(|e| zero_value(&e.ty)).collect();
        Ok(Self::from_entries(catalog, entries, values))
    }

    /// Bind a bare column list with no record shape. Every adapter is
    /// the generic nullable-string fallback and `shift` is a no-op.
    pub fn loose(fields: &[String]) -> Self {
        let shape = crate::shape::RecordShape::new("", Vec::new());
        Self {
            row_fields: fields.to_vec(),
            values: vec![Value::Null; fields.len()],
            scan: fields.iter().map(|_| ScanAdapter::Text(None)).collect(),
            copy: RecordValue::zero_of(&shape),
            paths: Vec::new(),
        }
    }

    fn from_entries(
        catalog: &FieldCatalog,
        entries: Vec<CatalogEntry>,
        values: Vec<Value>,
    ) -> Self {
        let row_fields = entries.iter().map(|e| e.column.clone()).collect();
        let scan = entries.iter().map(|e| ScanAdapter::for_type(&e.ty)).collect();
        let paths = entries.into_iter().map(|e| e.path).collect();
        Self {
            row_fields,
            values,
            scan,
            copy: RecordValue::zero_of(catalog.shape()),
            paths,
        }
    }

    /// Whether this binding can rebuild records.
    pub fn has_paths(&self) -> bool {
        !self.paths.is_empty()
    }

    /// Copy each present adapter value into the rebuild target.
    ///
    /// The target is re-zeroed first, so absent columns come out as
    /// their zero value and optional sub-records stay unallocated
    /// unless one of their leaves was present.
    pub fn shift(&mut self) -> Result<()> {
        let shape = self.copy.shape().clone();
        self.copy = RecordValue::zero_of(&shape);
        for (idx, path) in self.paths.iter().enumerate() {
            let adapter = &self.scan[idx];
            if adapter.is_present() {
                self.copy.set(path, adapter.value())?;
            }
        }
        Ok(())
    }
}

fn resolve(catalog: &FieldCatalog, fields: &[String]) -> Result<Vec<CatalogEntry>> {
    let all = fields.is_empty() || (fields.len() == 1 && fields[0] == "*");
    if all {
        return Ok(catalog.iter().cloned().collect());
    }
    fields
        .iter()
        .map(|name| catalog.entry(name).cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{FieldDef, RecordShape};
    use std::sync::Arc;

    fn shape() -> Arc<RecordShape> {
        RecordShape::new(
            "Track",
            vec![
                FieldDef::new("Title", FieldType::Text),
                FieldDef::new("Plays", FieldType::Int),
                FieldDef::new(
                    "Extra",
                    FieldType::OptionalRecord(RecordShape::new(
                        "Extra",
                        vec![FieldDef::new("Note", FieldType::Text)],
                    )),
                ),
            ],
        )
    }

    #[test]
    fn test_sequences_stay_aligned() {
        let catalog = FieldCatalog::build(&shape()).unwrap();
        let bound = BoundRecord::for_read(&catalog, &["*".to_string()]).unwrap();
        assert_eq!(bound.row_fields, vec!["Title", "Plays", "Note"]);
        assert_eq!(bound.row_fields.len(), bound.values.len());
        assert_eq!(bound.values.len(), bound.scan.len());
    }

    #[test]
    fn test_write_values_follow_catalog_order() {
        let catalog = FieldCatalog::build(&shape()).unwrap();
        let mut rec = RecordValue::zero_of(&shape());
        rec.set(&[0], Value::from("Blue")).unwrap();
        rec.set(&[1], Value::Int(42)).unwrap();
        let bound = BoundRecord::for_write(&catalog, &[], &rec).unwrap();
        assert_eq!(
            bound.values,
            vec![Value::from("Blue"), Value::Int(42), Value::Null]
        );
    }

    #[test]
    fn test_unknown_column_reported() {
        let catalog = FieldCatalog::build(&shape()).unwrap();
        let err = BoundRecord::for_read(&catalog, &["Nope".to_string()]).unwrap_err();
        assert!(matches!(err, Error::UnknownColumn(name) if name == "Nope"));
    }

    #[test]
    fn test_shape_mismatch_reported() {
        let catalog = FieldCatalog::build(&shape()).unwrap();
        let other = RecordShape::new("Other", vec![FieldDef::new("X", FieldType::Int)]);
        let rec = RecordValue::zero_of(&other);
        assert!(matches!(
            BoundRecord::for_write(&catalog, &[], &rec),
            Err(Error::ShapeMismatch(_))
        ));
    }

    #[test]
    fn test_shift_zero_defaults_absent_columns() {
        let catalog = FieldCatalog::build(&shape()).unwrap();
        let mut bound = BoundRecord::for_read(&catalog, &[]).unwrap();
        bound.scan[0].accept(Value::from("Blue")).unwrap();
        bound.scan[1].accept(Value::Null).unwrap();
        bound.shift().unwrap();
        assert_eq!(bound.copy.get(&[0]).unwrap(), Value::String("Blue".into()));
        assert_eq!(bound.copy.get(&[1]).unwrap(), Value::Int(0));
        // optional sub-record got no present leaf: still absent
        assert_eq!(bound.copy.get(&[2, 0]).unwrap(), Value::Null);
    }

    #[test]
    fn test_shift_allocates_optional_with_present_leaf() {
        let catalog = FieldCatalog::build(&shape()).unwrap();
        let mut bound = BoundRecord::for_read(&catalog, &[]).unwrap();
        bound.scan[2].accept(Value::from("liner notes")).unwrap();
        bound.shift().unwrap();
        assert_eq!(
            bound.copy.get(&[2, 0]).unwrap(),
            Value::String("liner notes".into())
        );
    }

    #[test]
    fn test_adapter_type_mismatch() {
        let mut adapter = ScanAdapter::Int(None);
        assert!(adapter.accept(Value::from("nope")).is_err());
        assert!(adapter.accept(Value::Int(3)).is_ok());
        assert!(adapter.is_present());
        assert_eq!(adapter.value(), Value::Int(3));
    }

    #[test]
    fn test_bytes_adapter_empty_means_no_data() {
        let mut adapter = ScanAdapter::Bytes(Vec::new());
        assert!(!adapter.is_present());
        adapter.accept(Value::Bytes(vec![1, 2])).unwrap();
        assert!(adapter.is_present());
        assert_eq!(adapter.value(), Value::Bytes(vec![1, 2]));
    }
}
