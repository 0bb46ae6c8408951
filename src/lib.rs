//! Spreadbase - typed table model for importing spreadsheet data into H2
//!
//! This library provides the modeling core of an import pipeline:
//! - SQL type descriptors that render their own H2 DDL fragment and carry range checks
//! - Columns pairing a name with exactly one type descriptor
//! - Tables as insertion-ordered maps of columns with name and positional lookup

pub mod error;
pub mod model;

pub use error::{Error, Result};
pub use model::{Column, DataDefinition, Table, TableBuilder, TableSource};
