use crate::chunk::DataChunk;
use crate::column::DataColumn;
use crate::error::ColumnResult;
use crate::factory::{ensure_type_code, ColumnFactory};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vecframe_storage::{Chunk, RawColumn, TypeCode};

/// UTC timestamps with millisecond precision over time storage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dates;

impl ColumnFactory for Dates {
    type Value = DateTime<Utc>;
    type Column = DataColumn<Dates>;

    fn type_code(&self) -> TypeCode {
        TypeCode::Time
    }

    fn name(&self) -> &str {
        "Dates"
    }

    fn wrap_partition<'a>(&self, chunk: &'a Chunk) -> DataChunk<'a, DateTime<Utc>> {
        DataChunk::new(chunk)
    }

    fn wrap_column(&self, vec: RawColumn) -> ColumnResult<DataColumn<Dates>> {
        ensure_type_code(TypeCode::Time, &vec)?;
        Ok(DataColumn::new(vec, *self))
    }
}
