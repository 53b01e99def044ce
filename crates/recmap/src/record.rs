//! Dynamic record instances.
//!
//! A [`RecordValue`] mirrors its [`RecordShape`] field for field and is
//! navigated by the catalog's field paths. Optional sub-records are an
//! explicit `Option`: absent until a write reaches into them, so a
//! materialized record only carries a sub-record when at least one of
//! its leaves was present.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use recmap_sql::Value;

use crate::shape::{FieldType, RecordShape};
use crate::{Error, Result};

/// One field slot of a record instance.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Scalar(Value),
    Record(RecordValue),
    Optional(Option<Box<RecordValue>>),
}

/// A record instance aligned field-for-field with its shape.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordValue {
    shape: Arc<RecordShape>,
    fields: Vec<FieldValue>,
}

impl RecordValue {
    /// Allocate a zero-valued instance of a shape.
    ///
    /// Optional sub-records start absent.
    pub fn zero_of(shape: &Arc<RecordShape>) -> Self {
        let fields = shape
            .fields
            .iter()
            .map(|f| match &f.ty {
                FieldType::Record(inner) => FieldValue::Record(Self::zero_of(inner)),
                FieldType::OptionalRecord(_) => FieldValue::Optional(None),
                leaf => FieldValue::Scalar(zero_value(leaf)),
            })
            .collect();
        Self {
            shape: shape.clone(),
            fields,
        }
    }

    pub fn shape(&self) -> &Arc<RecordShape> {
        &self.shape
    }

    /// Read the leaf at `path`. Leaves behind an absent optional
    /// sub-record read as NULL.
    pub fn get(&self, path: &[usize]) -> Result<Value> {
        let (&idx, rest) = path
            .split_first()
            .ok_or_else(|| mismatch(&self.shape, "empty field path"))?;
        let field = self
            .fields
            .get(idx)
            .ok_or_else(|| mismatch(&self.shape, "field path out of range"))?;
        match (field, rest.is_empty()) {
            (FieldValue::Scalar(v), true) => Ok(v.clone()),
            (FieldValue::Record(r), false) => r.get(rest),
            (FieldValue::Optional(Some(r)), false) => r.get(rest),
            (FieldValue::Optional(None), false) => Ok(Value::Null),
            _ => Err(mismatch(&self.shape, "field path does not reach a leaf")),
        }
    }

    /// Write the leaf at `path`, allocating optional sub-records along
    /// the way.
    pub fn set(&mut self, path: &[usize], value: Value) -> Result<()> {
        let shape = self.shape.clone();
        let (&idx, rest) = path
            .split_first()
            .ok_or_else(|| mismatch(&shape, "empty field path"))?;
        let field = self
            .fields
            .get_mut(idx)
            .ok_or_else(|| mismatch(&shape, "field path out of range"))?;
        match (field, rest.is_empty()) {
            (FieldValue::Scalar(slot), true) => {
                *slot = value;
                Ok(())
            }
            (FieldValue::Record(r), false) => r.set(rest, value),
            (FieldValue::Optional(slot), false) => {
                if slot.is_none() {
                    let inner = match &shape.fields[idx].ty {
                        FieldType::OptionalRecord(inner) => inner,
                        _ => return Err(mismatch(&shape, "optional slot without optional type")),
                    };
                    *slot = Some(Box::new(Self::zero_of(inner)));
                }
                match slot {
                    Some(r) => r.set(rest, value),
                    None => unreachable!("allocated above"),
                }
            }
            _ => Err(mismatch(&shape, "field path does not reach a leaf")),
        }
    }
}

fn mismatch(shape: &RecordShape, what: &str) -> Error {
    Error::ShapeMismatch(format!("{} in shape {}", what, shape.name))
}

/// The zero value for a leaf type.
pub fn zero_value(ty: &FieldType) -> Value {
    match ty {
        FieldType::Text => Value::String(String::new()),
        FieldType::Int => Value::Int(0),
        FieldType::Float => Value::Float(0.0),
        FieldType::Bool => Value::Bool(false),
        FieldType::Bytes => Value::Bytes(Vec::new()),
        FieldType::Timestamp => Value::Timestamp(DateTime::<Utc>::UNIX_EPOCH),
        // Composite and unsupported types have no scalar zero.
        _ => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::FieldDef;

    fn nested_shape() -> Arc<RecordShape> {
        RecordShape::new(
            "Outer",
            vec![
                FieldDef::new("Name", FieldType::Text),
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
    fn test_zero_allocation() {
        let rec = RecordValue::zero_of(&nested_shape());
        assert_eq!(rec.get(&[0]).unwrap(), Value::String(String::new()));
        // absent optional reads as NULL
        assert_eq!(rec.get(&[1, 0]).unwrap(), Value::Null);
    }

    #[test]
    fn test_set_allocates_optional_on_demand() {
        let mut rec = RecordValue::zero_of(&nested_shape());
        rec.set(&[1, 0], Value::from("hi")).unwrap();
        assert_eq!(rec.get(&[1, 0]).unwrap(), Value::String("hi".into()));
    }

    #[test]
    fn test_bad_path_is_shape_mismatch() {
        let rec = RecordValue::zero_of(&nested_shape());
        assert!(matches!(rec.get(&[9]), Err(Error::ShapeMismatch(_))));
        assert!(matches!(rec.get(&[0, 0]), Err(Error::ShapeMismatch(_))));
        assert!(matches!(rec.get(&[]), Err(Error::ShapeMismatch(_))));
    }
}
