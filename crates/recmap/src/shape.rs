//! Record shape descriptors.
//!
//! The engine never reflects over native structs at runtime. Callers
//! describe a record type once as a [`RecordShape`]; catalogs, bindings,
//! and materialization targets are all derived from that description.
//!
//! Fields carry an optional mapping tag of the form
//! `name[:behavior[:extra]]`. The rename segment may be empty to keep
//! the declared name; recognized behaviors are `key`, `isn`, and
//! `ignore`.

use std::sync::Arc;

/// Leaf and composite field types understood by the mapper.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    /// Text
    Text,
    /// 64-bit signed integer semantics
    Int,
    /// 64-bit float
    Float,
    /// Boolean / bit
    Bool,
    /// Byte blob; a sequence of bytes is a single opaque column
    Bytes,
    /// Timestamp / date
    Timestamp,
    /// Nested record, flattened in place
    Record(Arc<RecordShape>),
    /// Optional nested record, allocated only when populated
    OptionalRecord(Arc<RecordShape>),
    /// Sequence of non-byte elements; unsupported by the column model
    List(Box<FieldType>),
    /// Fixed-size array; unsupported by the column model
    FixedArray { elem: Box<FieldType>, len: usize },
}

impl FieldType {
    /// True for types that map to a single column.
    pub fn is_leaf(&self) -> bool {
        !matches!(
            self,
            FieldType::Record(_)
                | FieldType::OptionalRecord(_)
                | FieldType::List(_)
                | FieldType::FixedArray { .. }
        )
    }
}

/// One declared field of a record shape.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    pub name: String,
    /// Optional mapping tag: `name[:behavior[:extra]]`.
    pub tag: Option<String>,
    pub ty: FieldType,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            tag: None,
            ty,
        }
    }

    pub fn tagged(name: impl Into<String>, tag: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            tag: Some(tag.into()),
            ty,
        }
    }
}

/// A record type description: a name and its ordered fields.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordShape {
    pub name: String,
    pub fields: Vec<FieldDef>,
}

impl RecordShape {
    pub fn new(name: impl Into<String>, fields: Vec<FieldDef>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            fields,
        })
    }
}

/// Behavior segment of a field tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagBehavior {
    /// Plain column, possibly renamed.
    #[default]
    Column,
    /// Primary key; registered under the reserved `#key` slot.
    Key,
    /// Implicit sequence number; registered under `#index`.
    Isn,
    /// Skipped entirely.
    Ignore,
}

/// Parsed form of a field tag.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldTag {
    pub rename: Option<String>,
    pub behavior: TagBehavior,
    pub extra: Option<String>,
}

impl FieldTag {
    /// Parse `name[:behavior[:extra]]`. Unrecognized behavior tokens
    /// fall back to a plain column.
    pub fn parse(tag: &str) -> Self {
        let mut parts = tag.splitn(3, ':');
        let rename = parts
            .next()
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string());
        let behavior = match parts.next() {
            Some(b) if b.eq_ignore_ascii_case("key") => TagBehavior::Key,
            Some(b) if b.eq_ignore_ascii_case("isn") => TagBehavior::Isn,
            Some(b) if b.eq_ignore_ascii_case("ignore") => TagBehavior::Ignore,
            _ => TagBehavior::Column,
        };
        let extra = parts.next().filter(|s| !s.is_empty()).map(|s| s.to_string());
        Self {
            rename,
            behavior,
            extra,
        }
    }
}
