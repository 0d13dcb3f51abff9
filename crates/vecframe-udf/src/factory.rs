use crate::chunk::DataChunk;
use crate::column::Column;
use crate::error::{BoxError, ColumnError, ColumnResult};
use crate::frame::Frame;
use crate::functions;
use crate::value::ColumnValue;
use std::convert::Infallible;
use std::fmt;
use vecframe_storage::{Chunk, RawColumn, Storage, TypeCode};

/// Type-specific strategy for allocating, wrapping, and materializing columns
/// of one [`TypeCode`].
///
/// Implementors supply the translation ([`ColumnFactory::wrap_partition`]) and
/// validation ([`ColumnFactory::wrap_column`]); allocation and materialization
/// are shared.
pub trait ColumnFactory: Clone + fmt::Debug + Send + Sync + 'static {
    type Value: ColumnValue;
    type Column: Column<Value = Self::Value>;

    /// The storage type this factory produces and accepts.
    fn type_code(&self) -> TypeCode;

    fn name(&self) -> &str;

    /// Wrap a raw partition. The partition's type code is not checked.
    fn wrap_partition<'a>(&self, chunk: &'a Chunk) -> DataChunk<'a, Self::Value>;

    /// Wrap a raw column, failing with [`ColumnError::TypeMismatch`] when its
    /// type code is not [`ColumnFactory::type_code`].
    fn wrap_column(&self, vec: RawColumn) -> ColumnResult<Self::Column>;

    /// A zero-filled raw column of `len` rows with this factory's type code.
    fn allocate(&self, storage: &Storage, len: usize) -> ColumnResult<RawColumn> {
        Ok(storage.allocate(len, self.type_code())?)
    }

    /// A zero-filled raw column whose partitions match `master`'s row for row.
    fn allocate_aligned(&self, storage: &Storage, master: &RawColumn) -> ColumnResult<RawColumn> {
        let vec = self.allocate(storage, master.len())?;
        vec.align(master)?;
        Ok(vec)
    }

    /// Build a column of `len` rows where row `i` holds `f(i)`; `None` writes a
    /// missing value.
    ///
    /// `f` must be a pure function of the index: partitions are filled
    /// concurrently and in no particular order.
    fn materialize<G>(&self, storage: &Storage, len: usize, f: G) -> ColumnResult<Self::Column>
    where
        G: Fn(usize) -> Option<Self::Value> + Sync,
    {
        Frame::new(self, len, move |i| Ok::<_, Infallible>(f(i))).new_column(storage)
    }

    /// Like [`ColumnFactory::materialize`], for functions that can fail.
    ///
    /// The first failure is reported as [`ColumnError::FunctionApplication`]
    /// with the offending index; the partially filled column is dropped.
    fn try_materialize<G, E>(
        &self,
        storage: &Storage,
        len: usize,
        f: G,
    ) -> ColumnResult<Self::Column>
    where
        G: Fn(usize) -> Result<Option<Self::Value>, E> + Sync,
        E: Into<BoxError>,
    {
        Frame::new(self, len, f).new_column(storage)
    }

    /// Re-run every value of `source` through this factory into a fresh column
    /// aligned with `source`.
    fn materialize_aligned<C>(&self, storage: &Storage, source: &C) -> ColumnResult<Self::Column>
    where
        C: Column<Value = Self::Value> + ?Sized,
    {
        Frame::for_column(self, source).new_column(storage)
    }

    fn materialize_from_list(
        &self,
        storage: &Storage,
        values: &[Self::Value],
    ) -> ColumnResult<Self::Column> {
        Frame::new(self, values.len(), functions::on_list(values)).new_column(storage)
    }

    fn materialize_constant(
        &self,
        storage: &Storage,
        value: Self::Value,
        len: usize,
    ) -> ColumnResult<Self::Column> {
        self.materialize(storage, len, functions::constant(value))
    }
}

pub(crate) fn ensure_type_code(expected: TypeCode, vec: &RawColumn) -> ColumnResult<()> {
    let actual = vec.type_code();
    if actual != expected {
        return Err(ColumnError::TypeMismatch { expected, actual });
    }
    Ok(())
}
