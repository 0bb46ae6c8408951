//! SQL type descriptors for Spreadbase
//!
//! Each variant of [`DataDefinition`] owns the H2 keyword it renders to and,
//! where the type has a bounded numeric domain, the range rule used to decide
//! whether a candidate value fits before it is imported.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// H2 `tinyint` bounds as a standalone predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TinyInt;

impl TinyInt {
    pub const MIN: i64 = -128;
    pub const MAX: i64 = 127;

    /// Returns true iff `value` lies within `MIN..=MAX`.
    pub fn in_range(value: i64) -> bool {
        (Self::MIN..=Self::MAX).contains(&value)
    }
}

/// H2 `smallint` bounds as a standalone predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmallInt;

impl SmallInt {
    pub const MIN: i64 = -32768;
    pub const MAX: i64 = 32767;

    /// Returns true iff `value` lies within `MIN..=MAX`.
    pub fn in_range(value: i64) -> bool {
        (Self::MIN..=Self::MAX).contains(&value)
    }
}

/// Column type descriptor
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataDefinition {
    /// 8-bit integer
    TinyInt,
    /// 16-bit integer
    SmallInt,
    /// Integer, no declared range check
    Int,
    /// 64-bit integer
    BigInt,
    /// Double-precision floating point
    Double,
    /// Boolean
    Boolean,
    /// Date (year, month, day)
    Date,
    /// Timestamp (date + time)
    Timestamp,
    /// Variable-length character string with optional max length
    Varchar(Option<usize>),
}

impl DataDefinition {
    /// Get the DDL fragment for this type
    pub fn render(&self) -> String {
        match self {
            DataDefinition::Varchar(Some(len)) => format!("varchar({})", len),
            other => other.keyword().to_string(),
        }
    }

    /// Get the bare H2 keyword, without any length modifier
    pub fn keyword(&self) -> &'static str {
        match self {
            DataDefinition::TinyInt => "tinyint",
            DataDefinition::SmallInt => "smallint",
            DataDefinition::Int => "int",
            DataDefinition::BigInt => "bigint",
            DataDefinition::Double => "double",
            DataDefinition::Boolean => "boolean",
            DataDefinition::Date => "date",
            DataDefinition::Timestamp => "timestamp",
            DataDefinition::Varchar(_) => "varchar",
        }
    }

    /// Get the inclusive numeric domain, if this type declares one
    pub fn bounds(&self) -> Option<RangeInclusive<i64>> {
        match self {
            DataDefinition::TinyInt => Some(TinyInt::MIN..=TinyInt::MAX),
            DataDefinition::SmallInt => Some(SmallInt::MIN..=SmallInt::MAX),
            DataDefinition::BigInt => Some(i64::MIN..=i64::MAX),
            _ => None,
        }
    }

    /// Check whether `value` fits this type.
    ///
    /// Types without declared bounds accept every value.
    pub fn in_range(&self, value: i64) -> bool {
        self.bounds().map_or(true, |range| range.contains(&value))
    }

    /// Like [`in_range`](Self::in_range), but reports a miss as an error.
    pub fn check(&self, value: i64) -> Result<()> {
        if self.in_range(value) {
            Ok(())
        } else {
            Err(Error::ValueOutOfRange {
                value,
                definition: self.render(),
            })
        }
    }

    /// Check if this type is an integer type
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            DataDefinition::TinyInt
                | DataDefinition::SmallInt
                | DataDefinition::Int
                | DataDefinition::BigInt
        )
    }

    /// Smallest integer type able to hold `value`.
    ///
    /// `Int` is chosen for values that fit in 32 bits, matching H2 storage.
    pub fn narrowest_integer(value: i64) -> DataDefinition {
        if TinyInt::in_range(value) {
            DataDefinition::TinyInt
        } else if SmallInt::in_range(value) {
            DataDefinition::SmallInt
        } else if i32::try_from(value).is_ok() {
            DataDefinition::Int
        } else {
            DataDefinition::BigInt
        }
    }
}

impl Default for DataDefinition {
    fn default() -> Self {
        DataDefinition::Varchar(None)
    }
}

impl fmt::Display for DataDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}
