use chrono::{DateTime, Utc};
use std::sync::Arc;
use vecframe_storage::RawAccess;

/// Translation between a domain value and a raw storage cell.
///
/// `None` stands for the missing-value marker in both directions.
pub trait ColumnValue: Clone + Send + Sync + 'static {
    fn read<A: RawAccess + ?Sized>(raw: &A, idx: usize) -> Option<Self>;

    fn write<A: RawAccess + ?Sized>(raw: &A, idx: usize, value: Option<&Self>);
}

impl ColumnValue for f64 {
    fn read<A: RawAccess + ?Sized>(raw: &A, idx: usize) -> Option<Self> {
        // Missing cells read back as NaN, and NaN is never stored as a value.
        let v = raw.at(idx);
        (!v.is_nan()).then_some(v)
    }

    fn write<A: RawAccess + ?Sized>(raw: &A, idx: usize, value: Option<&Self>) {
        match value {
            Some(v) => raw.set(idx, *v),
            None => raw.set_na(idx),
        }
    }
}

/// Cells outside the `i32` range read back as missing.
impl ColumnValue for i32 {
    fn read<A: RawAccess + ?Sized>(raw: &A, idx: usize) -> Option<Self> {
        raw.at_long(idx).and_then(|v| i32::try_from(v).ok())
    }

    fn write<A: RawAccess + ?Sized>(raw: &A, idx: usize, value: Option<&Self>) {
        match value {
            Some(v) => raw.set_long(idx, i64::from(*v)),
            None => raw.set_na(idx),
        }
    }
}

impl ColumnValue for String {
    fn read<A: RawAccess + ?Sized>(raw: &A, idx: usize) -> Option<Self> {
        raw.at_str(idx).map(|s| s.to_string())
    }

    fn write<A: RawAccess + ?Sized>(raw: &A, idx: usize, value: Option<&Self>) {
        match value {
            Some(s) => raw.set_str(idx, Arc::from(s.as_str())),
            None => raw.set_na(idx),
        }
    }
}

/// Stored as epoch milliseconds.
impl ColumnValue for DateTime<Utc> {
    fn read<A: RawAccess + ?Sized>(raw: &A, idx: usize) -> Option<Self> {
        raw.at_long(idx).and_then(DateTime::from_timestamp_millis)
    }

    fn write<A: RawAccess + ?Sized>(raw: &A, idx: usize, value: Option<&Self>) {
        match value {
            Some(t) => raw.set_long(idx, t.timestamp_millis()),
            None => raw.set_na(idx),
        }
    }
}
