pub use crate::errors::{ErrorKind, TabulaError, TabulaResult};
pub use crate::table::{Column, Row, Table};
pub use crate::value::{Value, ValueKind};

pub mod describe;
pub mod errors;
pub mod predicates;
pub mod project;
pub mod table;
pub mod validate;
pub mod value;
