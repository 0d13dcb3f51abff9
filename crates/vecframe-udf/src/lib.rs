//! Type-safe access to untyped, chunked column storage.
//!
//! A [`ColumnFactory`] binds a domain type to a storage [`TypeCode`]. It wraps raw
//! partitions as [`DataChunk`]s and raw columns as typed [`Column`]s, rejecting raw
//! columns of the wrong type. The [`Frame`] engine builds new columns by evaluating a
//! pure `index -> value` function over every partition of a freshly allocated column.
//!
//! Categorical columns ([`Enums`], [`EnumColumn`]) store integer codes that index into
//! an ordered label domain recorded on the raw column.

#![forbid(unsafe_code)]

mod chunk;
mod column;
mod error;
mod factory;
mod frame;
pub mod functions;
mod parallel;
mod specialized;
mod value;

pub use crate::chunk::DataChunk;
pub use crate::column::{Column, DataColumn};
pub use crate::error::{BoxError, ColumnError, ColumnResult};
pub use crate::factory::ColumnFactory;
pub use crate::frame::{FillMode, Frame};
pub use crate::specialized::{Dates, Domain, Doubles, EnumColumn, Enums, Integers, Strings};
pub use crate::value::ColumnValue;

pub use vecframe_storage::{
    Chunk, RawAccess, RawColumn, Storage, StorageError, StorageOptions, TypeCode,
};
