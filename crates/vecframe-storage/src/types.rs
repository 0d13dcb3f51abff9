use serde::{Deserialize, Serialize};
use std::fmt;

/// The raw representation tag carried by every column.
///
/// The numeric values are stable and may be persisted.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeCode {
    /// All-missing column with no usable representation.
    Bad = 0,
    Uuid = 1,
    Str = 2,
    Num = 3,
    /// Categorical: integer codes indexing into a label domain.
    Cat = 4,
    /// Timestamps as epoch milliseconds.
    Time = 5,
}

impl TypeCode {
    pub fn name(self) -> &'static str {
        match self {
            TypeCode::Bad => "Bad",
            TypeCode::Uuid => "UUID",
            TypeCode::Str => "String",
            TypeCode::Num => "Numeric",
            TypeCode::Cat => "Enum",
            TypeCode::Time => "Time",
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            0 => TypeCode::Bad,
            1 => TypeCode::Uuid,
            2 => TypeCode::Str,
            3 => TypeCode::Num,
            4 => TypeCode::Cat,
            5 => TypeCode::Time,
            _ => return None,
        })
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
