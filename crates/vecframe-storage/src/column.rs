use crate::access::RawAccess;
use crate::chunk::{Chunk, ChunkData};
use crate::error::{StorageError, StorageResult};
use crate::types::TypeCode;
use std::fmt;
use std::ops::Range;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard};

/// Process-unique identity of a raw column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnKey(u64);

impl ColumnKey {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        ColumnKey(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "vec#{}", self.0)
    }
}

#[derive(Debug)]
struct Layout {
    /// `starts[i]` is the first global row of `chunks[i]`.
    starts: Vec<usize>,
    chunks: Vec<Chunk>,
}

#[derive(Debug)]
struct ColumnInner {
    key: ColumnKey,
    type_code: TypeCode,
    len: usize,
    layout: RwLock<Layout>,
    domain: RwLock<Option<Arc<[Arc<str>]>>>,
}

/// Shared handle on a partitioned column of raw cells.
///
/// Clones refer to the same storage. The type code and length never change;
/// the partition layout changes only through [`RawColumn::align`].
#[derive(Clone, Debug)]
pub struct RawColumn {
    inner: Arc<ColumnInner>,
}

impl RawColumn {
    pub(crate) fn from_parts(type_code: TypeCode, parts: Vec<ChunkData>) -> Self {
        let mut starts = Vec::with_capacity(parts.len());
        let mut chunks = Vec::with_capacity(parts.len());
        let mut start = 0usize;
        for data in parts {
            let len = data.len();
            starts.push(start);
            chunks.push(Chunk::new(start, type_code, data));
            start += len;
        }

        Self {
            inner: Arc::new(ColumnInner {
                key: ColumnKey::next(),
                type_code,
                len: start,
                layout: RwLock::new(Layout { starts, chunks }),
                domain: RwLock::new(None),
            }),
        }
    }

    pub fn key(&self) -> ColumnKey {
        self.inner.key
    }

    pub fn type_code(&self) -> TypeCode {
        self.inner.type_code
    }

    pub fn len(&self) -> usize {
        self.inner.len
    }

    pub fn is_empty(&self) -> bool {
        self.inner.len == 0
    }

    /// Whether both handles refer to the same storage.
    pub fn same_column(&self, other: &RawColumn) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    fn layout(&self) -> RwLockReadGuard<'_, Layout> {
        self.inner.layout.read().expect("column layout lock poisoned")
    }

    pub fn n_chunks(&self) -> usize {
        self.layout().chunks.len()
    }

    pub fn chunk(&self, idx: usize) -> Option<Chunk> {
        self.layout().chunks.get(idx).cloned()
    }

    pub fn chunks(&self) -> Vec<Chunk> {
        self.layout().chunks.clone()
    }

    /// Partition boundaries: the first global row of every partition.
    pub fn chunk_starts(&self) -> Vec<usize> {
        self.layout().starts.clone()
    }

    /// The partition holding `row`, or `None` when `row >= len()`.
    pub fn chunk_for_row(&self, row: usize) -> Option<Chunk> {
        if row >= self.inner.len {
            return None;
        }
        let layout = self.layout();
        let idx = layout.starts.partition_point(|&s| s <= row).checked_sub(1)?;
        layout.chunks.get(idx).cloned()
    }

    /// Every partition overlapping `rows`.
    pub fn chunks_in_range(&self, rows: Range<usize>) -> Vec<Chunk> {
        self.layout()
            .chunks
            .iter()
            .filter(|c| {
                let r = c.range();
                r.start < rows.end && rows.start < r.end
            })
            .cloned()
            .collect()
    }

    /// Re-partition this column so its boundaries match `master`'s.
    ///
    /// Cell values and missing bits are preserved. Handles to the previous
    /// partitions stay readable but no longer belong to this column.
    pub fn align(&self, master: &RawColumn) -> StorageResult<()> {
        if self.same_column(master) {
            return Ok(());
        }
        if self.inner.len != master.len() {
            return Err(StorageError::LengthMismatch {
                expected: master.len(),
                actual: self.inner.len,
            });
        }

        // Copy the master's boundaries first so two columns aligning to each
        // other never hold both layout locks.
        let target = master.chunk_starts();

        let mut layout = self
            .inner
            .layout
            .write()
            .expect("column layout lock poisoned");
        if layout.starts == target {
            return Ok(());
        }

        let guards: Vec<_> = layout.chunks.iter().map(|c| c.read()).collect();
        let Some(flat) = ChunkData::concat(guards.iter().map(|g| &**g)) else {
            return Ok(());
        };
        drop(guards);

        let mut chunks = Vec::with_capacity(target.len());
        for (i, &start) in target.iter().enumerate() {
            let end = target.get(i + 1).copied().unwrap_or(self.inner.len);
            chunks.push(Chunk::new(start, self.inner.type_code, flat.slice(start..end)));
        }

        log::debug!(
            "aligned {} to {}: {} -> {} chunks",
            self.inner.key,
            master.key(),
            layout.chunks.len(),
            chunks.len()
        );

        layout.starts = target;
        layout.chunks = chunks;
        Ok(())
    }

    /// The categorical label domain recorded on this column, if any.
    pub fn domain(&self) -> Option<Arc<[Arc<str>]>> {
        self.inner
            .domain
            .read()
            .expect("column domain lock poisoned")
            .clone()
    }

    /// Replace the recorded label domain. This is a declaration, not a merge.
    pub fn set_domain(&self, domain: Option<Arc<[Arc<str>]>>) {
        log::debug!(
            "{}: domain set to {} labels",
            self.inner.key,
            domain.as_ref().map_or(0, |d| d.len())
        );
        *self
            .inner
            .domain
            .write()
            .expect("column domain lock poisoned") = domain;
    }

    pub fn cardinality(&self) -> Option<usize> {
        self.inner
            .domain
            .read()
            .expect("column domain lock poisoned")
            .as_ref()
            .map(|d| d.len())
    }

    /// Number of missing cells across all partitions.
    pub fn missing_count(&self) -> usize {
        self.layout().chunks.iter().map(|c| c.missing_count()).sum()
    }

    fn locate(&self, row: usize) -> (Chunk, usize) {
        match self.chunk_for_row(row) {
            Some(chunk) => {
                let local = row - chunk.start();
                (chunk, local)
            }
            None => panic!("row {row} out of bounds for column of length {}", self.inner.len),
        }
    }
}

impl RawAccess for RawColumn {
    fn len(&self) -> usize {
        self.inner.len
    }

    fn is_na(&self, idx: usize) -> bool {
        let (chunk, local) = self.locate(idx);
        chunk.is_na(local)
    }

    fn at(&self, idx: usize) -> f64 {
        let (chunk, local) = self.locate(idx);
        chunk.at(local)
    }

    fn at_long(&self, idx: usize) -> Option<i64> {
        let (chunk, local) = self.locate(idx);
        chunk.at_long(local)
    }

    fn at_str(&self, idx: usize) -> Option<Arc<str>> {
        let (chunk, local) = self.locate(idx);
        chunk.at_str(local)
    }

    fn set(&self, idx: usize, value: f64) {
        let (chunk, local) = self.locate(idx);
        chunk.set(local, value)
    }

    fn set_long(&self, idx: usize, value: i64) {
        let (chunk, local) = self.locate(idx);
        chunk.set_long(local, value)
    }

    fn set_str(&self, idx: usize, value: Arc<str>) {
        let (chunk, local) = self.locate(idx);
        chunk.set_str(local, value)
    }

    fn set_na(&self, idx: usize) {
        let (chunk, local) = self.locate(idx);
        chunk.set_na(local)
    }
}
