//! Header resolution: which column each leaf field reads from or writes to.
//!
//! A [`HeaderMap`] indexes every header cell, repeated names included. A
//! repeated name only becomes an error once a field is bound to it.

use std::collections::{HashMap, hash_map::Entry};

use log::debug;

use crate::{
    error::{Error, Result},
    schema::Leaf,
};

/// Column name to zero-based positions, built from a header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    columns: HashMap<String, Vec<usize>>,
}

impl HeaderMap {
    /// Indexes `row` by cell text. Empty cells are ignored.
    pub fn from_row(row: &[String]) -> Self {
        let mut columns: HashMap<String, Vec<usize>> = HashMap::with_capacity(row.len());
        for (idx, name) in row.iter().enumerate() {
            if name.is_empty() {
                continue;
            }
            columns.entry(name.clone()).or_default().push(idx);
        }
        Self { columns }
    }

    /// First position of `name`.
    pub fn get(&self, name: &str) -> Option<usize> {
        self.positions(name).first().copied()
    }

    /// Every position carrying `name`, in header order.
    pub fn positions(&self, name: &str) -> &[usize] {
        self.columns.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Position of `name` for a field that maps to it.
    ///
    /// Fails with [`Error::DuplicateColumn`] when the header repeats `name`.
    pub fn resolve(&self, name: &str) -> Result<Option<usize>> {
        match self.positions(name) {
            [] => Ok(None),
            [index] => Ok(Some(*index)),
            [first, second, ..] => Err(Error::DuplicateColumn {
                name: name.to_string(),
                first: first + 1,
                second: second + 1,
            }),
        }
    }

    /// Number of distinct non-empty names.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Rejects a derived header that names the same column twice.
pub fn ensure_unique(header: &[String]) -> Result<()> {
    let mut seen: HashMap<&str, usize> = HashMap::with_capacity(header.len());
    for (idx, name) in header.iter().enumerate() {
        match seen.entry(name.as_str()) {
            Entry::Occupied(existing) => {
                return Err(Error::DuplicateColumn {
                    name: name.clone(),
                    first: *existing.get() + 1,
                    second: idx + 1,
                });
            }
            Entry::Vacant(slot) => {
                slot.insert(idx);
            }
        }
    }
    Ok(())
}

/// A leaf field bound to a column position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub leaf: Leaf,
    pub index: usize,
}

/// Binds each leaf that `locate` finds a position for; the rest are dropped.
pub fn bind<F>(leaves: Vec<Leaf>, mut locate: F) -> Result<Vec<Column>>
where
    F: FnMut(&Leaf) -> Result<Option<usize>>,
{
    let total = leaves.len();
    let mut columns = Vec::with_capacity(total);
    for leaf in leaves {
        if let Some(index) = locate(&leaf)? {
            columns.push(Column { leaf, index });
        }
    }
    debug!(
        "Bound {} of {} field path(s) to columns",
        columns.len(),
        total
    );
    Ok(columns)
}
