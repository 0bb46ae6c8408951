//! Model module
//!
//! This module contains the table container, column metadata, and SQL type descriptors.

pub mod column;
pub mod table;
pub mod types;

pub use column::Column;
pub use table::{Table, TableBuilder, TableSource};
pub use types::{DataDefinition, SmallInt, TinyInt};
