use crate::value::ColumnValue;
use std::fmt;
use std::marker::PhantomData;
use std::ops::Range;
use vecframe_storage::{Chunk, RawAccess};

/// Typed view over one raw partition.
///
/// Indices are partition-local. The view owns no cells; it is a stateless
/// translator, so create one per access session rather than caching it.
pub struct DataChunk<'a, T> {
    chunk: &'a Chunk,
    _value: PhantomData<fn() -> T>,
}

impl<'a, T: ColumnValue> DataChunk<'a, T> {
    pub fn new(chunk: &'a Chunk) -> Self {
        Self {
            chunk,
            _value: PhantomData,
        }
    }

    pub fn chunk(&self) -> &'a Chunk {
        self.chunk
    }

    pub fn len(&self) -> usize {
        self.chunk.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunk.is_empty()
    }

    /// Global row index of local index `0`.
    pub fn start(&self) -> usize {
        self.chunk.start()
    }

    pub fn range(&self) -> Range<usize> {
        self.chunk.range()
    }

    pub fn is_na(&self, idx: usize) -> bool {
        self.chunk.is_na(idx)
    }

    pub fn get(&self, idx: usize) -> Option<T> {
        T::read(self.chunk, idx)
    }

    pub fn set(&self, idx: usize, value: Option<T>) {
        T::write(self.chunk, idx, value.as_ref())
    }
}

impl<T> fmt::Debug for DataChunk<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataChunk")
            .field("range", &self.chunk.range())
            .field("type_code", &self.chunk.type_code())
            .finish()
    }
}
