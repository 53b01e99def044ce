//! SQL command synthesis for recmap.
//!
//! Turns a table name, a column projection, and a handful of per-backend
//! knobs (the [`DialectPolicy`]) into SQL text for the four relational
//! commands. Parameter values travel separately as [`Value`]s; only the
//! criteria builder ever inlines a value into the text.

mod criteria;
mod dialect;
mod synth;
mod value;

pub use criteria::{where_for_delete, where_from_keys};
pub use dialect::DialectPolicy;
pub use synth::{SynthError, delete, insert, select, update};
pub use value::Value;
