//! Ordered name lists with an inverse index

use std::collections::HashMap;

use hlt_config_core::{Error, Result};

/// Ordered list of names plus the name → position map
///
/// The position of an absent name is the list length (one past the end).
/// When a name occurs twice the later position is indexed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameTable {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl NameTable {
    /// Index `names` keeping their order
    pub fn new(names: Vec<String>) -> Self {
        let index = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        Self { names, index }
    }

    /// Index `names` after sorting them lexicographically
    pub fn sorted(mut names: Vec<String>) -> Self {
        names.sort();
        Self::new(names)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Position of `name`, or `len()` when absent
    pub fn position(&self, name: &str) -> usize {
        self.index.get(name).copied().unwrap_or(self.names.len())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Name at `index`, bounds-checked
    pub fn name(&self, table: &'static str, index: usize) -> Result<&str> {
        self.names
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| Error::out_of_range(table, index, self.names.len()))
    }
}

/// Key selecting a row of a named table, by position or by name
pub trait TableKey {
    fn position_in(&self, table: &NameTable) -> usize;
}

impl TableKey for usize {
    fn position_in(&self, _table: &NameTable) -> usize {
        *self
    }
}

impl TableKey for &str {
    fn position_in(&self, table: &NameTable) -> usize {
        table.position(self)
    }
}

impl TableKey for String {
    fn position_in(&self, table: &NameTable) -> usize {
        table.position(self)
    }
}

impl TableKey for &String {
    fn position_in(&self, table: &NameTable) -> usize {
        table.position(self)
    }
}

/// Bounds-checked row access shared by all per-name tables
pub(crate) fn row<'t, R>(
    rows: &'t [R],
    table: &'static str,
    names: &NameTable,
    key: impl TableKey,
) -> Result<&'t R> {
    let index = key.position_in(names);
    rows.get(index)
        .ok_or_else(|| Error::out_of_range(table, index, rows.len()))
}
