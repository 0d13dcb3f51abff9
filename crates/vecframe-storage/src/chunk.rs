use crate::access::RawAccess;
use crate::bitmap::BitVec;
use crate::error::{StorageError, StorageResult};
use crate::types::TypeCode;
use std::ops::Range;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Clone, Debug)]
pub(crate) enum ChunkValues {
    F64(Vec<f64>),
    I64(Vec<i64>),
    Str(Vec<Arc<str>>),
}

impl ChunkValues {
    fn len(&self) -> usize {
        match self {
            ChunkValues::F64(v) => v.len(),
            ChunkValues::I64(v) => v.len(),
            ChunkValues::Str(v) => v.len(),
        }
    }
}

/// Cells and validity for one partition.
#[derive(Clone, Debug)]
pub(crate) struct ChunkData {
    values: ChunkValues,
    validity: BitVec,
}

impl ChunkData {
    /// Zero-filled, fully valid cells for a column of `type_code`.
    pub(crate) fn zeroed(type_code: TypeCode, len: usize) -> StorageResult<Self> {
        let alloc_err = |e: std::collections::TryReserveError| StorageError::AllocationFailed {
            len,
            type_code,
            reason: e.to_string(),
        };

        let values = match type_code {
            TypeCode::Num => {
                let mut v: Vec<f64> = Vec::new();
                v.try_reserve_exact(len).map_err(alloc_err)?;
                v.resize(len, 0.0);
                ChunkValues::F64(v)
            }
            TypeCode::Cat | TypeCode::Time => {
                let mut v: Vec<i64> = Vec::new();
                v.try_reserve_exact(len).map_err(alloc_err)?;
                v.resize(len, 0);
                ChunkValues::I64(v)
            }
            TypeCode::Str => {
                let mut v: Vec<Arc<str>> = Vec::new();
                v.try_reserve_exact(len).map_err(alloc_err)?;
                v.resize(len, Arc::from(""));
                ChunkValues::Str(v)
            }
            TypeCode::Bad | TypeCode::Uuid => return Err(StorageError::UnsupportedType(type_code)),
        };

        Ok(Self {
            values,
            validity: BitVec::with_len_all_true(len),
        })
    }

    /// Concatenation of every row in `parts`, in order.
    pub(crate) fn concat<'a>(parts: impl IntoIterator<Item = &'a ChunkData>) -> Option<Self> {
        let mut parts = parts.into_iter();
        let mut out = parts.next()?.clone();
        for part in parts {
            out.append_rows(part, 0..part.len());
        }
        Some(out)
    }

    pub(crate) fn slice(&self, rows: Range<usize>) -> Self {
        let mut out = Self {
            values: match &self.values {
                ChunkValues::F64(_) => ChunkValues::F64(Vec::with_capacity(rows.len())),
                ChunkValues::I64(_) => ChunkValues::I64(Vec::with_capacity(rows.len())),
                ChunkValues::Str(_) => ChunkValues::Str(Vec::with_capacity(rows.len())),
            },
            validity: BitVec::with_capacity_bits(rows.len()),
        };
        out.append_rows(self, rows);
        out
    }

    fn append_rows(&mut self, other: &ChunkData, rows: Range<usize>) {
        match (&mut self.values, &other.values) {
            (ChunkValues::F64(dst), ChunkValues::F64(src)) => dst.extend_from_slice(&src[rows.clone()]),
            (ChunkValues::I64(dst), ChunkValues::I64(src)) => dst.extend_from_slice(&src[rows.clone()]),
            (ChunkValues::Str(dst), ChunkValues::Str(src)) => dst.extend_from_slice(&src[rows.clone()]),
            _ => unreachable!("chunks of one column share a representation"),
        }
        self.validity
            .extend_from(&other.validity, rows.start, rows.len());
    }

    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    pub(crate) fn missing_count(&self) -> usize {
        self.validity.len() - self.validity.count_ones()
    }
}

/// Handle on one partition of a [`crate::RawColumn`].
///
/// Indices passed to [`RawAccess`] methods are partition-local. Clones share
/// the same cells.
#[derive(Clone, Debug)]
pub struct Chunk {
    start: usize,
    len: usize,
    type_code: TypeCode,
    data: Arc<RwLock<ChunkData>>,
}

impl Chunk {
    pub(crate) fn new(start: usize, type_code: TypeCode, data: ChunkData) -> Self {
        Self {
            start,
            len: data.len(),
            type_code,
            data: Arc::new(RwLock::new(data)),
        }
    }

    /// Global row index of local index `0`.
    pub fn start(&self) -> usize {
        self.start
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Global rows covered by this partition.
    pub fn range(&self) -> Range<usize> {
        self.start..self.start + self.len
    }

    pub fn type_code(&self) -> TypeCode {
        self.type_code
    }

    /// Number of missing cells in this partition.
    pub fn missing_count(&self) -> usize {
        self.read().missing_count()
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, ChunkData> {
        self.data.read().expect("chunk lock poisoned")
    }

    fn write(&self) -> RwLockWriteGuard<'_, ChunkData> {
        self.data.write().expect("chunk lock poisoned")
    }
}

impl RawAccess for Chunk {
    fn len(&self) -> usize {
        self.len
    }

    fn is_na(&self, idx: usize) -> bool {
        !self.read().validity.get(idx)
    }

    fn at(&self, idx: usize) -> f64 {
        let data = self.read();
        if !data.validity.get(idx) {
            return f64::NAN;
        }
        match &data.values {
            ChunkValues::F64(v) => v[idx],
            ChunkValues::I64(v) => v[idx] as f64,
            ChunkValues::Str(_) => f64::NAN,
        }
    }

    fn at_long(&self, idx: usize) -> Option<i64> {
        let data = self.read();
        if !data.validity.get(idx) {
            return None;
        }
        match &data.values {
            ChunkValues::F64(v) => {
                let x = v[idx];
                x.is_finite().then_some(x as i64)
            }
            ChunkValues::I64(v) => Some(v[idx]),
            ChunkValues::Str(_) => None,
        }
    }

    fn at_str(&self, idx: usize) -> Option<Arc<str>> {
        let data = self.read();
        if !data.validity.get(idx) {
            return None;
        }
        match &data.values {
            ChunkValues::Str(v) => Some(v[idx].clone()),
            _ => None,
        }
    }

    fn set(&self, idx: usize, value: f64) {
        if value.is_nan() {
            self.set_na(idx);
            return;
        }
        let mut data = self.write();
        match &mut data.values {
            ChunkValues::F64(v) => v[idx] = value,
            ChunkValues::I64(v) => v[idx] = value as i64,
            ChunkValues::Str(_) => panic!("cannot store a number in a {} chunk", self.type_code),
        }
        data.validity.set(idx, true);
    }

    fn set_long(&self, idx: usize, value: i64) {
        let mut data = self.write();
        match &mut data.values {
            ChunkValues::F64(v) => v[idx] = value as f64,
            ChunkValues::I64(v) => v[idx] = value,
            ChunkValues::Str(_) => panic!("cannot store a number in a {} chunk", self.type_code),
        }
        data.validity.set(idx, true);
    }

    fn set_str(&self, idx: usize, value: Arc<str>) {
        let mut data = self.write();
        match &mut data.values {
            ChunkValues::Str(v) => v[idx] = value,
            _ => panic!("cannot store a string in a {} chunk", self.type_code),
        }
        data.validity.set(idx, true);
    }

    fn set_na(&self, idx: usize) {
        self.write().validity.set(idx, false);
    }
}
