use crate::chunk::DataChunk;
use crate::column::DataColumn;
use crate::error::ColumnResult;
use crate::factory::{ensure_type_code, ColumnFactory};
use serde::{Deserialize, Serialize};
use vecframe_storage::{Chunk, RawColumn, TypeCode};

/// `i32` values over numeric storage. Fractional cells read back truncated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Integers;

impl ColumnFactory for Integers {
    type Value = i32;
    type Column = DataColumn<Integers>;

    fn type_code(&self) -> TypeCode {
        TypeCode::Num
    }

    fn name(&self) -> &str {
        "Integers"
    }

    fn wrap_partition<'a>(&self, chunk: &'a Chunk) -> DataChunk<'a, i32> {
        DataChunk::new(chunk)
    }

    fn wrap_column(&self, vec: RawColumn) -> ColumnResult<DataColumn<Integers>> {
        ensure_type_code(TypeCode::Num, &vec)?;
        Ok(DataColumn::new(vec, *self))
    }
}
