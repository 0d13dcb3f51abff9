use crate::types::TypeCode;

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("cannot allocate a column of type {0}")]
    UnsupportedType(TypeCode),

    #[error("failed to allocate {len} rows of type {type_code}: {reason}")]
    AllocationFailed {
        len: usize,
        type_code: TypeCode,
        reason: String,
    },

    #[error("column length mismatch: expected {expected} rows, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}
