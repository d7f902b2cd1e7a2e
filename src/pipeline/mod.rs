//! Pipeline module - loading, the preparation stages and their driver

pub mod encode;
pub mod error;
pub mod features;
pub mod impute;
pub mod loader;
pub mod prepare;
pub mod schema;

pub use encode::*;
pub use error::*;
pub use features::*;
pub use impute::*;
pub use loader::*;
pub use prepare::*;
pub use schema::{validate_inputs, validate_record_set, ColumnKind, ENCODED_COLUMNS};
