//! The relation table and its JSON/YAML file formats.

use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    record::Record,
    schema::{self, Mode},
};

/// Maps relational field paths to candidate column names.
///
/// Only the first candidate is used. A path with no entry, no candidates or
/// an empty first candidate is neither exported nor imported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationTable {
    entries: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableFormat {
    Json,
    Yaml,
}

impl TableFormat {
    fn from_path(path: &Path) -> anyhow::Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(TableFormat::Json),
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Ok(TableFormat::Yaml)
            }
            _ => bail!("Relation table {path:?} must have a .json, .yaml or .yml extension"),
        }
    }
}

impl RelationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the candidates for `path`, returning the previous ones.
    pub fn insert<I, S>(&mut self, path: impl Into<String>, names: I) -> Option<Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries
            .insert(path.into(), names.into_iter().map(Into::into).collect())
    }

    pub fn with(mut self, path: impl Into<String>, name: impl Into<String>) -> Self {
        self.insert(path, [name]);
        self
    }

    /// The authoritative column name for `path`, if it is mapped.
    pub fn column_name(&self, path: &str) -> Option<&str> {
        self.entries
            .get(path)?
            .first()
            .map(String::as_str)
            .filter(|name| !name.is_empty())
    }

    pub fn candidates(&self, path: &str) -> &[String] {
        self.entries.get(path).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(path, names)| (path.as_str(), names.as_slice()))
    }

    /// A table mapping every relational path of `R` to itself, as a starting
    /// point for hand-edited tables.
    pub fn template<R: Record + Default>() -> Result<Self> {
        Ok(schema::paths(&R::default(), Mode::Relational)?
            .into_iter()
            .map(|path| (path.clone(), path))
            .collect())
    }

    pub fn from_yaml_str(input: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(input).context("Parsing relation table YAML")
    }

    pub fn from_json_str(input: &str) -> anyhow::Result<Self> {
        serde_json::from_str(input).context("Parsing relation table JSON")
    }

    pub fn to_yaml_string(&self) -> anyhow::Result<String> {
        serde_yaml::to_string(self).context("Serializing relation table to YAML")
    }

    /// Loads a table from a `.json`, `.yaml` or `.yml` file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let format = TableFormat::from_path(path)?;
        let file =
            File::open(path).with_context(|| format!("Opening relation table {path:?}"))?;
        let reader = BufReader::new(file);
        match format {
            TableFormat::Json => {
                serde_json::from_reader(reader).context("Parsing relation table JSON")
            }
            TableFormat::Yaml => {
                serde_yaml::from_reader(reader).context("Parsing relation table YAML")
            }
        }
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let format = TableFormat::from_path(path)?;
        let file =
            File::create(path).with_context(|| format!("Creating relation table {path:?}"))?;
        let writer = BufWriter::new(file);
        match format {
            TableFormat::Json => {
                serde_json::to_writer_pretty(writer, self).context("Writing relation table JSON")
            }
            TableFormat::Yaml => {
                serde_yaml::to_writer(writer, self).context("Writing relation table YAML")
            }
        }
    }
}

impl<K, N> FromIterator<(K, N)> for RelationTable
where
    K: Into<String>,
    N: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, N)>>(iter: I) -> Self {
        let mut table = RelationTable::new();
        for (path, name) in iter {
            table.insert(path, [name]);
        }
        table
    }
}
