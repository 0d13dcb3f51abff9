use crate::chunk::DataChunk;
use crate::column::DataColumn;
use crate::error::ColumnResult;
use crate::factory::{ensure_type_code, ColumnFactory};
use serde::{Deserialize, Serialize};
use vecframe_storage::{Chunk, RawColumn, TypeCode};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strings;

impl ColumnFactory for Strings {
    type Value = String;
    type Column = DataColumn<Strings>;

    fn type_code(&self) -> TypeCode {
        TypeCode::Str
    }

    fn name(&self) -> &str {
        "Strings"
    }

    fn wrap_partition<'a>(&self, chunk: &'a Chunk) -> DataChunk<'a, String> {
        DataChunk::new(chunk)
    }

    fn wrap_column(&self, vec: RawColumn) -> ColumnResult<DataColumn<Strings>> {
        ensure_type_code(TypeCode::Str, &vec)?;
        Ok(DataColumn::new(vec, *self))
    }
}
