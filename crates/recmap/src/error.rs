use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unsupported field shape: {field}")]
    UnsupportedShape { field: String },

    #[error("unknown column: {0}")]
    UnknownColumn(String),

    #[error("duplicate column: {0}")]
    DuplicateColumn(String),

    #[error("record does not match catalog shape: {0}")]
    ShapeMismatch(String),

    #[error(transparent)]
    Synth(#[from] recmap_sql::SynthError),

    #[error("no rows affected")]
    NoRowsAffected,

    #[error("a transaction is already open on this handle")]
    TransactionOpen,

    #[error("no open transaction on this handle")]
    NoTransaction,

    #[error("unknown handle id: {0}")]
    UnknownHandle(u64),

    #[error("invalid connection reference: {0}")]
    InvalidReference(String),

    #[error("message catalog: {0}")]
    MessageCatalog(String),

    #[error("driver error: {0}")]
    Driver(String),

    /// Carrier for caller-chosen early termination from a row callback.
    /// Distinguished from system failure only by convention.
    #[error("{0}")]
    Aborted(String),
}
