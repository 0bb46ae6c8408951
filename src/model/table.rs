//! Table container for Spreadbase
//!
//! A table is an insertion-ordered map from column name to [`Column`], plus
//! table-level metadata (name, description, origin). Columns can be looked up
//! by name or by their position in insertion order.

use super::column::Column;
use super::types::DataDefinition;
use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

/// Ordered collection of named, typed columns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    /// Table name
    name: String,
    /// Table description
    description: Option<String>,
    /// Source the table was imported from; stored, never opened
    origin: Option<PathBuf>,
    /// Columns keyed by name, in insertion order
    columns: IndexMap<String, Column>,
}

impl Table {
    /// Create a new table with no columns
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            origin: None,
            columns: IndexMap::new(),
        }
    }

    /// Create a table seeding one default-typed column per name.
    ///
    /// A repeated name replaces the earlier column but keeps its position.
    pub fn create<I, S>(
        name: impl Into<String>,
        description: Option<String>,
        column_names: I,
        origin: Option<PathBuf>,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut builder = TableBuilder::new(name).columns(column_names);
        if let Some(description) = description {
            builder = builder.description(description);
        }
        if let Some(origin) = origin {
            builder = builder.origin(origin);
        }
        builder.build()
    }

    /// Create a table from an import collaborator's description
    pub fn from_source(source: TableSource) -> Result<Self> {
        Self::create(
            source.name,
            source.description,
            source.columns,
            source.origin,
        )
    }

    // ========== Table Metadata ==========

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    pub fn origin(&self) -> Option<&Path> {
        self.origin.as_deref()
    }

    pub fn set_origin(&mut self, origin: Option<PathBuf>) {
        self.origin = origin;
    }

    // ========== Column Lookup ==========

    /// Get column by name
    pub fn get_by_name(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    /// Get mutable column by name
    pub fn get_by_name_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.get_mut(name)
    }

    /// Get column by insertion position. Valid indices are `0..size()`.
    pub fn get_by_index(&self, index: usize) -> Result<&Column> {
        let size = self.size();
        match self.columns.get_index(index) {
            Some((_, column)) => Ok(column),
            None => {
                trace!(table = %self.name, index, size, "positional lookup out of bounds");
                Err(Error::IndexOutOfBounds { index, size })
            }
        }
    }

    /// Get mutable column by insertion position
    pub fn get_by_index_mut(&mut self, index: usize) -> Result<&mut Column> {
        let size = self.size();
        if index >= size {
            trace!(table = %self.name, index, size, "positional lookup out of bounds");
            return Err(Error::IndexOutOfBounds { index, size });
        }
        self.columns
            .get_index_mut(index)
            .map(|(_, column)| column)
            .ok_or(Error::IndexOutOfBounds { index, size })
    }

    /// Get the insertion position of a column
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.get_index_of(name)
    }

    // ========== Map Operations ==========

    /// Insert or replace the column stored under `name`.
    ///
    /// The map key is authoritative; `column.name()` is not compared against it.
    /// A replaced column keeps its original position.
    pub fn put(&mut self, name: impl Into<String>, column: Column) -> Option<Column> {
        let name = name.into();
        let previous = self.columns.insert(name, column);
        if let Some(prev) = &previous {
            debug!(table = %self.name, column = %prev.name(), "replaced column");
        }
        previous
    }

    /// Insert or replace every column in `columns`
    pub fn put_all<I, S>(&mut self, columns: I)
    where
        I: IntoIterator<Item = (S, Column)>,
        S: Into<String>,
    {
        for (name, column) in columns {
            self.put(name, column);
        }
    }

    /// Remove a column, keeping the order of the remaining ones
    pub fn remove(&mut self, name: &str) -> Option<Column> {
        self.columns.shift_remove(name)
    }

    /// Remove every column. Table metadata is left untouched.
    pub fn clear(&mut self) {
        self.columns.clear();
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn contains_value(&self, column: &Column) -> bool {
        self.columns.values().any(|c| c == column)
    }

    /// Column names in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Columns in insertion order
    pub fn values(&self) -> impl Iterator<Item = &Column> {
        self.columns.values()
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut Column> {
        self.columns.values_mut()
    }

    /// `(name, column)` pairs in insertion order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Column> {
        self.columns.iter()
    }

    pub fn size(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Column order is part of a table's identity.
impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.description == other.description
            && self.origin == other.origin
            && self.columns.iter().eq(other.columns.iter())
    }
}

impl Eq for Table {}

impl<'a> IntoIterator for &'a Table {
    type Item = (&'a String, &'a Column);
    type IntoIter = indexmap::map::Iter<'a, String, Column>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}

/// Diagnostic listing; not valid DDL.
impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} (", self.name)?;
        for column in self.columns.values() {
            writeln!(f, "\t{}", column)?;
        }
        writeln!(f, ")")
    }
}

/// Table description handed over by an importer
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TableSource {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub origin: Option<PathBuf>,
}

impl TableSource {
    /// Parse a source description from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Builder for creating tables with a fluent API
#[derive(Debug, Clone)]
pub struct TableBuilder {
    name: String,
    description: Option<String>,
    origin: Option<PathBuf>,
    default_definition: DataDefinition,
    columns: Vec<(String, Option<DataDefinition>)>,
}

impl TableBuilder {
    /// Start building a new table
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            origin: None,
            default_definition: DataDefinition::default(),
            columns: Vec::new(),
        }
    }

    /// Set description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set origin
    pub fn origin(mut self, origin: impl Into<PathBuf>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Set the type given to columns added without one
    pub fn default_definition(mut self, definition: DataDefinition) -> Self {
        self.default_definition = definition;
        self
    }

    /// Add a column with the default type
    pub fn column(mut self, name: impl Into<String>) -> Self {
        self.columns.push((name.into(), None));
        self
    }

    /// Add a column with an explicit type
    pub fn typed_column(mut self, name: impl Into<String>, definition: DataDefinition) -> Self {
        self.columns.push((name.into(), Some(definition)));
        self
    }

    /// Add several columns with the default type
    pub fn columns<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns
            .extend(names.into_iter().map(|name| (name.into(), None)));
        self
    }

    /// Build the table
    pub fn build(self) -> Result<Table> {
        let mut table = Table::new(self.name);
        table.description = self.description;
        table.origin = self.origin;

        for (name, definition) in self.columns {
            let definition = definition.unwrap_or_else(|| self.default_definition.clone());
            let column = Column::with_definition(name.clone(), definition)?;
            if table.columns.contains_key(&name) {
                warn!(table = %table.name, column = %name, "duplicate column name");
            }
            table.columns.insert(name, column);
        }

        debug!(
            table = %table.name,
            columns = table.size(),
            origin = ?table.origin,
            "created table"
        );
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn people() -> Table {
        Table::create("people", Some("test table".to_string()), ["id", "age"], None).unwrap()
    }

    #[test]
    fn test_create_from_names() {
        let table = people();

        assert_eq!(table.name(), "people");
        assert_eq!(table.description(), Some("test table"));
        assert_eq!(table.size(), 2);
        assert_eq!(table.keys().collect::<Vec<_>>(), vec!["id", "age"]);
        assert_eq!(table.get_by_index(0).unwrap().name(), "id");
        assert_eq!(table.get_by_index(1).unwrap().name(), "age");
        assert_eq!(table.get_by_name("age"), Some(table.get_by_index(1).unwrap()));
    }

    #[test]
    fn test_create_empty() {
        let table = Table::create("empty", None, Vec::<String>::new(), None).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.size(), 0);
        assert!(table.origin().is_none());
    }

    #[test]
    fn test_index_out_of_bounds() {
        let table = people();

        let err = table.get_by_index(2).unwrap_err();
        assert!(matches!(err, Error::IndexOutOfBounds { index: 2, size: 2 }));

        assert_eq!(
            table.get_by_index(2).unwrap_err().to_string(),
            "The index 2 is out of bounds for 2 columns"
        );

        let err = table.get_by_index(7).unwrap_err();
        assert_eq!(
            err.to_string(),
            "The index 7 is out of bounds for 2 columns"
        );
    }

    #[test]
    fn test_put_overwrite_keeps_position() {
        let mut table = people();
        let c1 = Column::with_definition("id", DataDefinition::SmallInt).unwrap();
        let c2 = Column::with_definition("id", DataDefinition::Int).unwrap();

        assert!(table.put("id", c1.clone()).is_some());
        let previous = table.put("id", c2.clone());

        assert_eq!(previous, Some(c1));
        assert_eq!(table.size(), 2);
        assert_eq!(table.get_by_name("id"), Some(&c2));
        assert_eq!(table.position("id"), Some(0));
    }

    #[test]
    fn test_put_key_is_authoritative() {
        let mut table = Table::new("t");
        let column = Column::new("other").unwrap();

        assert!(table.put("key", column.clone()).is_none());
        assert!(table.contains_key("key"));
        assert!(!table.contains_key("other"));
        assert!(table.contains_value(&column));
    }

    #[test]
    fn test_put_all_merge() {
        let mut table = people();
        table.put_all(vec![
            ("name", Column::new("name").unwrap()),
            ("id", Column::with_definition("id", DataDefinition::BigInt).unwrap()),
        ]);

        assert_eq!(table.keys().collect::<Vec<_>>(), vec!["id", "age", "name"]);
        assert_eq!(
            table.get_by_index(0).unwrap().definition(),
            &DataDefinition::BigInt
        );
    }

    #[test]
    fn test_remove_and_clear() {
        let mut table = Table::create("t", None, ["a", "b", "c"], None).unwrap();

        assert!(table.remove("missing").is_none());
        let removed = table.remove("b").unwrap();
        assert_eq!(removed.name(), "b");
        assert_eq!(table.keys().collect::<Vec<_>>(), vec!["a", "c"]);

        table.clear();
        assert_eq!(table.size(), 0);
        assert!(table.is_empty());
        assert_eq!(table.name(), "t");
    }

    #[test]
    fn test_duplicate_names_in_list() {
        let table = Table::create("t", None, ["a", "b", "a"], None).unwrap();
        assert_eq!(table.size(), 2);
        assert_eq!(table.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_empty_name_in_list() {
        let result = Table::create("t", None, ["a", ""], None);
        assert!(matches!(result, Err(Error::EmptyColumnName)));
    }

    #[test]
    fn test_builder() {
        let table = TableBuilder::new("scores")
            .description("exam scores")
            .origin("/data/scores.xlsx")
            .default_definition(DataDefinition::Int)
            .column("student")
            .typed_column("score", DataDefinition::SmallInt)
            .build()
            .unwrap();

        assert_eq!(table.origin(), Some(Path::new("/data/scores.xlsx")));
        assert_eq!(table.get_by_name("student").unwrap().ddl_fragment(), "int");
        assert_eq!(table.get_by_name("score").unwrap().ddl_fragment(), "smallint");
    }

    #[test]
    fn test_mutable_lookup() {
        let mut table = people();
        table
            .get_by_name_mut("age")
            .unwrap()
            .set_definition(DataDefinition::SmallInt);
        table
            .get_by_index_mut(0)
            .unwrap()
            .set_definition(DataDefinition::Int);

        let fragments: Vec<String> = table.values().map(Column::ddl_fragment).collect();
        assert_eq!(fragments, vec!["int", "smallint"]);
        assert!(matches!(
            table.get_by_index_mut(2),
            Err(Error::IndexOutOfBounds { index: 2, size: 2 })
        ));
    }

    #[test]
    fn test_equality_respects_column_order() {
        let xy = Table::create("t", None, ["x", "y"], None).unwrap();
        let yx = Table::create("t", None, ["y", "x"], None).unwrap();

        assert_ne!(xy, yx);
        assert_eq!(xy, Table::create("t", None, ["x", "y"], None).unwrap());
    }

    #[test]
    fn test_deserialize_rejects_empty_column_name() {
        let json = r#"{
            "name": "t",
            "description": null,
            "origin": null,
            "columns": {"": {"name": "", "definition": "Int", "description": null}}
        }"#;
        assert!(serde_json::from_str::<Table>(json).is_err());
    }

    #[test]
    fn test_display() {
        let mut table = people();
        table
            .get_by_name_mut("id")
            .unwrap()
            .set_definition(DataDefinition::Int);

        assert_eq!(table.to_string(), "people (\n\tid int\n\tage varchar\n)\n");
    }

    #[test]
    fn test_from_source() {
        let source = TableSource::from_json(
            r#"{"name": "people", "columns": ["id", "age"], "origin": "people.xls"}"#,
        )
        .unwrap();
        let table = Table::from_source(source).unwrap();

        assert_eq!(table.size(), 2);
        assert!(table.description().is_none());
        assert_eq!(table.origin(), Some(Path::new("people.xls")));

        assert!(matches!(
            TableSource::from_json("{\"columns\": []}"),
            Err(Error::Json(_))
        ));
    }
}
