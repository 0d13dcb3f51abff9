use vecframe_storage::{StorageError, TypeCode};

pub type ColumnResult<T> = Result<T, ColumnError>;

/// Error type produced by column functions.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum ColumnError {
    #[error("expected a column of type {expected}, got {actual}")]
    TypeMismatch {
        expected: TypeCode,
        actual: TypeCode,
    },

    #[error(transparent)]
    Allocation(#[from] StorageError),

    #[error("column function failed at index {index}: {source}")]
    FunctionApplication {
        index: usize,
        #[source]
        source: BoxError,
    },

    #[error("domain mismatch: expected {expected:?}, got {actual:?}")]
    DomainMismatch {
        expected: Vec<String>,
        actual: Vec<String>,
    },

    #[error("categorical column has no label domain")]
    MissingDomain,

    #[error("code {code} is outside a domain of {cardinality} labels")]
    CodeOutOfDomain { code: i64, cardinality: usize },

    #[error("duplicate label in domain: {0}")]
    DuplicateLabel(String),
}
