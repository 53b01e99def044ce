//! Field catalog construction.
//!
//! A [`FieldCatalog`] is the ordered column-name-to-field-path mapping
//! for one record shape: depth-first, declaration order, with `key`,
//! `isn`, and `ignore` tags filtering membership without disturbing the
//! relative order of the remaining fields. It is pure metadata with no
//! external I/O, so building it twice for the same shape always yields
//! the same ordering.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::shape::{FieldTag, FieldType, RecordShape, TagBehavior};
use crate::{Error, Result};

/// Reserved catalog name designating the primary-key field.
pub const KEY_FIELD: &str = "#key";
/// Reserved catalog name designating the implicit sequence-number field.
pub const INDEX_FIELD: &str = "#index";

/// Ordered field indices locating one leaf inside a nested shape.
pub type FieldPath = Vec<usize>;

/// One catalog entry: a column backed by a leaf field.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub column: String,
    pub path: FieldPath,
    pub ty: FieldType,
}

/// The ordered column-name-to-field-path mapping for one record shape.
#[derive(Debug, Clone)]
pub struct FieldCatalog {
    shape: Arc<RecordShape>,
    entries: IndexMap<String, CatalogEntry>,
    key: Option<CatalogEntry>,
    index: Option<CatalogEntry>,
}

impl FieldCatalog {
    /// Walk a record shape and build its catalog.
    ///
    /// Fails with [`Error::UnsupportedShape`] on sequence-of-non-byte or
    /// fixed-size array fields, naming the offending field, and with
    /// [`Error::DuplicateColumn`] when two leaves resolve to the same
    /// column name.
    pub fn build(shape: &Arc<RecordShape>) -> Result<Self> {
        let mut catalog = Self {
            shape: shape.clone(),
            entries: IndexMap::new(),
            key: None,
            index: None,
        };
        let mut prefix = Vec::new();
        catalog.walk(shape.as_ref(), &mut prefix)?;
        Ok(catalog)
    }

    fn walk(&mut self, shape: &RecordShape, prefix: &mut FieldPath) -> Result<()> {
        for (idx, field) in shape.fields.iter().enumerate() {
            let tag = field
                .tag
                .as_deref()
                .map(FieldTag::parse)
                .unwrap_or_default();
            if tag.behavior == TagBehavior::Ignore {
                continue;
            }
            let column = tag.rename.clone().unwrap_or_else(|| field.name.clone());

            prefix.push(idx);
            match &field.ty {
                FieldType::Record(inner) | FieldType::OptionalRecord(inner) => {
                    self.walk(inner, prefix)?;
                }
                FieldType::List(_) | FieldType::FixedArray { .. } => {
                    prefix.pop();
                    return Err(Error::UnsupportedShape {
                        field: field.name.clone(),
                    });
                }
                leaf => {
                    let entry = CatalogEntry {
                        column: column.clone(),
                        path: prefix.clone(),
                        ty: leaf.clone(),
                    };
                    match tag.behavior {
                        TagBehavior::Key => self.key = Some(entry),
                        TagBehavior::Isn => self.index = Some(entry),
                        TagBehavior::Column => {
                            if self.entries.insert(column.clone(), entry).is_some() {
                                prefix.pop();
                                return Err(Error::DuplicateColumn(column));
                            }
                        }
                        TagBehavior::Ignore => unreachable!("filtered above"),
                    }
                }
            }
            prefix.pop();
        }
        Ok(())
    }

    /// The shape this catalog was built from.
    pub fn shape(&self) -> &Arc<RecordShape> {
        &self.shape
    }

    /// Normal column names in traversal order.
    pub fn columns(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Number of normal columns.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a column, including the reserved `#key` / `#index` names.
    pub fn entry(&self, name: &str) -> Result<&CatalogEntry> {
        let found = match name {
            KEY_FIELD => self.key.as_ref(),
            INDEX_FIELD => self.index.as_ref(),
            _ => self.entries.get(name),
        };
        found.ok_or_else(|| Error::UnknownColumn(name.to_string()))
    }

    /// The field tagged `key`, if any.
    pub fn key_field(&self) -> Option<&CatalogEntry> {
        self.key.as_ref()
    }

    /// The field tagged `isn`, if any.
    pub fn index_field(&self) -> Option<&CatalogEntry> {
        self.index.as_ref()
    }

    /// Entries in traversal order.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }
}
