use crate::factory::ColumnFactory;
use crate::value::ColumnValue;
use vecframe_storage::{RawAccess, RawColumn, TypeCode};

/// Typed, whole-column access over a raw column.
///
/// Indices are global row indices. Reads and writes go straight to the shared
/// raw storage; no synchronization is added beyond what the storage provides.
pub trait Column: Send + Sync {
    type Value: ColumnValue;

    /// The raw column backing this view.
    fn vec(&self) -> &RawColumn;

    fn len(&self) -> usize {
        self.vec().len()
    }

    fn is_empty(&self) -> bool {
        self.vec().is_empty()
    }

    fn type_code(&self) -> TypeCode {
        self.vec().type_code()
    }

    fn is_na(&self, idx: usize) -> bool {
        self.vec().is_na(idx)
    }

    fn get(&self, idx: usize) -> Option<Self::Value> {
        Self::Value::read(self.vec(), idx)
    }

    fn set(&self, idx: usize, value: Option<Self::Value>) {
        Self::Value::write(self.vec(), idx, value.as_ref())
    }

    /// Every value in row order, read partition by partition.
    fn values(&self) -> Vec<Option<Self::Value>> {
        let mut out = Vec::with_capacity(self.len());
        for chunk in self.vec().chunks() {
            out.extend((0..chunk.len()).map(|i| Self::Value::read(&chunk, i)));
        }
        out
    }
}

/// A raw column together with the factory that validated it.
#[derive(Clone, Debug)]
pub struct DataColumn<F> {
    vec: RawColumn,
    factory: F,
}

impl<F: ColumnFactory> DataColumn<F> {
    /// Callers must have checked that `vec` has the factory's type code.
    pub(crate) fn new(vec: RawColumn, factory: F) -> Self {
        debug_assert_eq!(vec.type_code(), factory.type_code());
        Self { vec, factory }
    }

    /// The factory this column was produced by; its logical identity.
    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn into_vec(self) -> RawColumn {
        self.vec
    }
}

impl<F: ColumnFactory> Column for DataColumn<F> {
    type Value = F::Value;

    fn vec(&self) -> &RawColumn {
        &self.vec
    }
}
