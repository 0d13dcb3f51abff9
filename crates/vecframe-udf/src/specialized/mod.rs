//! Concrete factories, one per supported domain type.

mod dates;
mod doubles;
mod enums;
mod integers;
mod strings;

pub use dates::Dates;
pub use doubles::Doubles;
pub use enums::{Domain, EnumColumn, Enums};
pub use integers::Integers;
pub use strings::Strings;
