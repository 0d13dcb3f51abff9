use crate::chunk::ChunkData;
use crate::column::RawColumn;
use crate::error::{StorageError, StorageResult};
use crate::types::TypeCode;

#[derive(Debug, Clone, Copy)]
pub struct StorageOptions {
    /// Rows per partition for [`Storage::allocate`]; the last partition may be shorter.
    pub chunk_size_rows: usize,
    /// Largest column this storage will allocate.
    pub max_rows: Option<usize>,
}

impl Default for StorageOptions {
    fn default() -> Self {
        Self {
            chunk_size_rows: 65_536,
            max_rows: None,
        }
    }
}

/// Allocator for zero-filled raw columns.
#[derive(Debug, Clone, Default)]
pub struct Storage {
    options: StorageOptions,
}

impl Storage {
    pub fn new(options: StorageOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &StorageOptions {
        &self.options
    }

    /// Allocate a zero-filled column of `len` rows, partitioned every
    /// `chunk_size_rows` rows.
    pub fn allocate(&self, len: usize, type_code: TypeCode) -> StorageResult<RawColumn> {
        let chunk_size = self.options.chunk_size_rows.max(1);
        let mut sizes = Vec::with_capacity(len.div_ceil(chunk_size));
        let mut remaining = len;
        while remaining > 0 {
            let take = remaining.min(chunk_size);
            sizes.push(take);
            remaining -= take;
        }
        self.allocate_with_chunk_sizes(type_code, &sizes)
    }

    /// Allocate a zero-filled column with an explicit partition layout.
    ///
    /// Zero-sized entries are skipped. An empty column still has one (empty)
    /// partition.
    pub fn allocate_with_chunk_sizes(
        &self,
        type_code: TypeCode,
        chunk_sizes: &[usize],
    ) -> StorageResult<RawColumn> {
        let len = chunk_sizes
            .iter()
            .try_fold(0usize, |acc, &n| acc.checked_add(n))
            .ok_or_else(|| StorageError::AllocationFailed {
                len: usize::MAX,
                type_code,
                reason: "row count overflows usize".to_string(),
            })?;

        if let Some(max_rows) = self.options.max_rows {
            if len > max_rows {
                return Err(StorageError::AllocationFailed {
                    len,
                    type_code,
                    reason: format!("exceeds the storage limit of {max_rows} rows"),
                });
            }
        }

        let mut parts = chunk_sizes
            .iter()
            .filter(|&&n| n > 0)
            .map(|&n| ChunkData::zeroed(type_code, n))
            .collect::<StorageResult<Vec<_>>>()?;
        if parts.is_empty() {
            parts.push(ChunkData::zeroed(type_code, 0)?);
        }

        let column = RawColumn::from_parts(type_code, parts);
        log::debug!(
            "allocated {}: {} rows of {} in {} chunks",
            column.key(),
            len,
            type_code,
            column.n_chunks()
        );
        Ok(column)
    }
}
