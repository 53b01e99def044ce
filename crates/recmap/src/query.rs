//! Caller-facing operation descriptors.
//!
//! These are transient, caller-owned value objects. A [`Query`] or
//! [`Entries`] describes one operation; a [`RowResult`] is handed to the
//! row callback once per materialized row.

use std::sync::Arc;

use recmap_sql::Value;

use crate::record::RecordValue;
use crate::shape::RecordShape;

/// A relational read request.
#[derive(Debug, Clone, Default)]
pub struct Query {
    pub table_name: String,
    /// Free-form search predicate, passed through verbatim.
    pub search: String,
    /// Projection; empty or `*` means catalog-driven "all".
    pub fields: Vec<String>,
    /// Ordering as `name:asc|desc` pairs.
    pub order: Vec<String>,
    /// Row limit; zero means unlimited.
    pub limit: u32,
    /// Record template driving projection and materialization.
    pub shape: Option<Arc<RecordShape>>,
}

impl Query {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            ..Default::default()
        }
    }
}

/// A batch write descriptor.
#[derive(Debug, Clone, Default)]
pub struct Entries {
    /// Target columns; empty or `*` with a shape means the catalog
    /// projection.
    pub fields: Vec<String>,
    /// One value row per batch entry, index-aligned with `fields`.
    pub values: Vec<Vec<Value>>,
    /// WHERE key-field selectors for UPDATE, or caller-literal
    /// conditions carrying their own comparison operator.
    pub update: Vec<String>,
    /// Literal WHERE override; wins over any generated predicate.
    pub criteria: String,
    /// Record template; with `records`, replaces `fields`/`values`.
    pub shape: Option<Arc<RecordShape>>,
    /// Record instances to write, one per batch entry.
    pub records: Vec<RecordValue>,
}

/// One materialized row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowResult {
    /// Resolved column names.
    pub fields: Vec<String>,
    /// One entry per projected column; `None` is SQL NULL.
    pub rows: Vec<Option<Value>>,
    /// Rebuilt record when the query carried a shape.
    pub record: Option<RecordValue>,
}
