use std::fmt::{Display, Formatter};

use crate::column::{HostType, RawValue};

/// A single named, typed column value produced by the host per write.
///
/// Immutable once constructed; consumed exactly once by a mapper. Null
/// cells never reach the core — the host simply omits them, so a column
/// always carries a value.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    value: RawValue,
    host_type: HostType,
}

impl Column {
    /// Creates a new column.
    pub fn new<V: Into<RawValue>>(name: &str, value: V, host_type: HostType) -> Self {
        Column {
            name: name.to_string(),
            value: value.into(),
            host_type,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &RawValue {
        &self.value
    }

    pub fn host_type(&self) -> &HostType {
        &self.host_type
    }
}

impl Display for Column {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// The flat set of columns for one row.
///
/// Collection-valued host columns arrive expanded, one entry per element
/// under the same name, so mappers treat multi-valued columns as repeated
/// scalars of the element type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Columns {
    columns: Vec<Column>,
}

impl Columns {
    /// Creates an empty column set.
    pub fn new() -> Self {
        Columns { columns: Vec::new() }
    }

    /// Adds a column, builder style.
    pub fn add<V: Into<RawValue>>(mut self, name: &str, value: V, host_type: HostType) -> Self {
        self.columns.push(Column::new(name, value, host_type));
        self
    }

    /// Pushes a pre-built column.
    pub fn push(&mut self, column: Column) {
        self.columns.push(column);
    }

    /// All columns carrying the given name, in insertion order.
    pub fn by_name<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Column> {
        self.columns.iter().filter(move |c| c.name() == name)
    }

    /// The first column with the given name, if any.
    pub fn first(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Column> {
        self.columns.iter()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<'a> IntoIterator for &'a Columns {
    type Item = &'a Column;
    type IntoIter = std::slice::Iter<'a, Column>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}
