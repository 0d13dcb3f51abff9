use std::sync::Arc;

/// Untyped cell access shared by whole columns (global row index) and
/// partitions (partition-local index).
///
/// Out-of-range indices panic, like slice indexing. Writes take `&self`:
/// storage is shared and synchronizes internally per partition.
pub trait RawAccess {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_na(&self, idx: usize) -> bool;

    /// Numeric value of the cell; `NaN` when missing or non-numeric.
    fn at(&self, idx: usize) -> f64;

    /// Integral value of the cell; `None` when missing or non-numeric.
    fn at_long(&self, idx: usize) -> Option<i64>;

    /// String value of the cell; `None` when missing or non-string.
    fn at_str(&self, idx: usize) -> Option<Arc<str>>;

    fn set(&self, idx: usize, value: f64);

    fn set_long(&self, idx: usize, value: i64);

    fn set_str(&self, idx: usize, value: Arc<str>);

    fn set_na(&self, idx: usize);
}
