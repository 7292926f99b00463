//! Relational encoding: the header holds the table's names for the mapped
//! paths, in declaration order.

use std::fmt;

use log::{debug, trace};

use crate::{
    error::{Error, Result},
    header::{Column, ensure_unique},
    record::Record,
    schema::{self, Mode},
    tokenizer::Dialect,
    transcode,
};

use super::RelationTable;

/// Header slots allocated from a relation table, in first-lookup order.
#[derive(Debug, Clone)]
pub struct RelationEncoder {
    dialect: Dialect,
    header: Vec<String>,
    columns: Vec<Column>,
}

impl RelationEncoder {
    pub fn new<R: Record + Default>(relations: &RelationTable) -> Result<Self> {
        Self::with_dialect::<R>(relations, Dialect::default())
    }

    pub fn with_dialect<R: Record + Default>(
        relations: &RelationTable,
        dialect: Dialect,
    ) -> Result<Self> {
        Self::from_record(&R::default(), relations, dialect)
    }

    pub fn from_record(
        record: &dyn Record,
        relations: &RelationTable,
        dialect: Dialect,
    ) -> Result<Self> {
        if relations.is_empty() {
            return Err(Error::EmptyRelationTable);
        }
        let mut header = Vec::new();
        let mut columns = Vec::new();
        for leaf in schema::leaves(record, Mode::Relational)? {
            let Some(name) = relations.column_name(&leaf.path) else {
                trace!("No relation for path {:?}", leaf.path);
                continue;
            };
            columns.push(Column {
                leaf,
                index: header.len(),
            });
            header.push(name.to_string());
        }
        if header.is_empty() {
            return Err(Error::EmptyHeader);
        }
        ensure_unique(&header)?;
        debug!(
            "Allocated {} header slot(s) from {} relation(s)",
            header.len(),
            relations.len()
        );
        Ok(Self {
            dialect,
            header,
            columns,
        })
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Renders the header followed by one row per record that has at least
    /// one non-empty mapped value. All-blank records are dropped.
    pub fn encode<R: Record>(&self, records: &[R]) -> Result<Vec<u8>> {
        let mut rows = Vec::with_capacity(records.len());
        for (idx, record) in records.iter().enumerate() {
            let (cells, contributed) =
                transcode::encode_row(record, &self.columns, self.header.len())?;
            if contributed {
                rows.push(cells);
            } else {
                trace!("Dropping record {idx}: no mapped value");
            }
        }
        transcode::render(&self.header, rows, &self.dialect)
    }

    pub fn encode_record<R: Record>(&self, record: &R) -> Result<Vec<u8>> {
        self.encode(std::slice::from_ref(record))
    }
}

impl fmt::Display for RelationEncoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Header fields:")?;
        for column in &self.columns {
            writeln!(
                f,
                "\t{:?} >> {}",
                column.leaf.path, self.header[column.index]
            )?;
        }
        Ok(())
    }
}
