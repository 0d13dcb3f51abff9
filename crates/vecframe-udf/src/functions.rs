//! Index functions for column materialization.

/// Raised when a list-backed function is asked for an index past its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("index {index} is out of range for a list of {len} values")]
pub struct IndexOutOfRange {
    pub index: usize,
    pub len: usize,
}

/// `i -> values[i]`.
pub fn on_list<T: Clone + Sync>(
    values: &[T],
) -> impl Fn(usize) -> Result<Option<T>, IndexOutOfRange> + Sync + '_ {
    move |index| {
        values.get(index).cloned().map(Some).ok_or(IndexOutOfRange {
            index,
            len: values.len(),
        })
    }
}

/// `_ -> value`.
pub fn constant<T: Clone + Sync>(value: T) -> impl Fn(usize) -> Option<T> + Sync {
    move |_| Some(value.clone())
}
