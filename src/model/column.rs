//! Column metadata for Spreadbase

use super::types::DataDefinition;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A named column with exactly one type descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ColumnData")]
pub struct Column {
    /// Column name, never empty
    name: String,
    /// Type descriptor
    definition: DataDefinition,
    /// Free-form description
    description: Option<String>,
}

impl Column {
    /// Create a new column with the default type
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Self::with_definition(name, DataDefinition::default())
    }

    /// Create a new column with an explicit type
    pub fn with_definition(name: impl Into<String>, definition: DataDefinition) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::EmptyColumnName);
        }
        Ok(Self {
            name,
            definition,
            description: None,
        })
    }

    /// Set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the column. Empty names are rejected and leave the column unchanged.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::EmptyColumnName);
        }
        self.name = name;
        Ok(())
    }

    pub fn definition(&self) -> &DataDefinition {
        &self.definition
    }

    /// Replace the type descriptor.
    ///
    /// Values already imported under the old type are not re-validated.
    pub fn set_definition(&mut self, definition: DataDefinition) {
        self.definition = definition;
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    /// The DDL type fragment for this column
    pub fn ddl_fragment(&self) -> String {
        self.definition.render()
    }
}

/// Unchecked wire form of a column; validated on the way into [`Column`]
#[derive(Deserialize)]
struct ColumnData {
    name: String,
    definition: DataDefinition,
    #[serde(default)]
    description: Option<String>,
}

impl TryFrom<ColumnData> for Column {
    type Error = Error;

    fn try_from(data: ColumnData) -> Result<Self> {
        let mut column = Column::with_definition(data.name, data.definition)?;
        column.description = data.description;
        Ok(column)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.definition)
    }
}
