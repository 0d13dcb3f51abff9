use crate::chunk::DataChunk;
use crate::column::DataColumn;
use crate::error::ColumnResult;
use crate::factory::{ensure_type_code, ColumnFactory};
use serde::{Deserialize, Serialize};
use vecframe_storage::{Chunk, RawColumn, TypeCode};

/// `f64` values over numeric storage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doubles;

impl ColumnFactory for Doubles {
    type Value = f64;
    type Column = DataColumn<Doubles>;

    fn type_code(&self) -> TypeCode {
        TypeCode::Num
    }

    fn name(&self) -> &str {
        "Doubles"
    }

    fn wrap_partition<'a>(&self, chunk: &'a Chunk) -> DataChunk<'a, f64> {
        DataChunk::new(chunk)
    }

    fn wrap_column(&self, vec: RawColumn) -> ColumnResult<DataColumn<Doubles>> {
        ensure_type_code(TypeCode::Num, &vec)?;
        Ok(DataColumn::new(vec, *self))
    }
}
