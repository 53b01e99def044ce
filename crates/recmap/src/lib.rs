//! Database-agnostic record mapping and query synthesis.
//!
//! Callers describe a relational operation in terms of their own record
//! shapes; the engine converts it at runtime into dialect-specific SQL
//! plus typed parameter bindings, and materializes query results back
//! into loose row values or a rebuilt record instance.
//!
//! The moving parts, leaves first:
//!
//! - [`shape`]: explicit record-type descriptors with mapping tags
//! - [`catalog`]: the deterministic, tag-aware field catalog
//! - [`bind`]: parallel write-value / scan-adapter sequences
//! - [`cursor`]: row cursors and result materialization
//! - [`driver`]: the vendor-driver seam and the operation handle
//! - [`registry`]: the guarded process-wide handle registry
//! - [`messages`]: the numeric error-message catalog
//!
//! SQL text itself is synthesized by the `recmap-sql` crate, re-exported
//! here.
//!
//! # Example
//!
//! ```ignore
//! use recmap::{Entries, FieldDef, FieldType, Handle, Query, RecordShape, Value};
//!
//! let shape = RecordShape::new("Album", vec![
//!     FieldDef::tagged("Id", ":key", FieldType::Int),
//!     FieldDef::new("Title", FieldType::Text),
//! ]);
//!
//! let mut handle = Handle::new(driver);
//! let mut query = Query::new("albums");
//! query.shape = Some(shape);
//! handle.search(&query, &mut |_, row| {
//!     println!("{:?}", row.record);
//!     Ok(())
//! })?;
//! ```

pub mod bind;
pub mod catalog;
pub mod cursor;
pub mod driver;
mod error;
pub mod messages;
pub mod query;
pub mod record;
pub mod registry;
pub mod shape;

pub use bind::{BoundRecord, ScanAdapter};
pub use catalog::{CatalogEntry, FieldCatalog, FieldPath, INDEX_FIELD, KEY_FIELD};
pub use cursor::{RowCallback, RowCursor, VecCursor, materialize};
pub use driver::{Driver, Handle};
pub use error::Error;
pub use query::{Entries, Query, RowResult};
pub use record::{FieldValue, RecordValue};
pub use registry::{HandleId, Reference, Registry, lookup, register, unregister};
pub use shape::{FieldDef, FieldTag, FieldType, RecordShape, TagBehavior};

// Re-export the SQL layer for convenience.
pub use recmap_sql::{DialectPolicy, SynthError, Value};

/// Result type for recmap operations.
pub type Result<T> = std::result::Result<T, Error>;
