//! Chunked, untyped column storage.
//!
//! A [`RawColumn`] is an ordered sequence of raw cells split into contiguous
//! partitions ([`Chunk`]s). Cells are plain `f64`/`i64`/string values plus a
//! per-partition validity bit; nothing at this level knows about domain types.
//!
//! - Allocation of zero-filled columns ([`Storage::allocate`]).
//! - Partition enumeration and lookup by row.
//! - Re-partitioning a column to match another column's layout ([`RawColumn::align`]).
//! - Categorical label domains recorded on the column.

#![forbid(unsafe_code)]

mod access;
mod bitmap;
mod chunk;
mod column;
mod error;
mod storage;
mod types;

pub use crate::access::RawAccess;
pub use crate::bitmap::BitVec;
pub use crate::chunk::Chunk;
pub use crate::column::{ColumnKey, RawColumn};
pub use crate::error::{StorageError, StorageResult};
pub use crate::storage::{Storage, StorageOptions};
pub use crate::types::TypeCode;
