//! Direct-mode encoding: the header is the record's dotted field paths in
//! declaration order.

use std::fmt;

use itertools::Itertools;
use log::debug;

use crate::{
    error::Result,
    header::{Column, ensure_unique},
    record::Record,
    schema::{self, Mode},
    tokenizer::Dialect,
    transcode,
};

/// Header derived from a record type, reused for every encoded record.
#[derive(Debug, Clone)]
pub struct Encoder {
    dialect: Dialect,
    header: Vec<String>,
    columns: Vec<Column>,
}

impl Encoder {
    pub fn new<R: Record + Default>() -> Result<Self> {
        Self::with_dialect::<R>(Dialect::default())
    }

    pub fn with_dialect<R: Record + Default>(dialect: Dialect) -> Result<Self> {
        Self::from_record(&R::default(), dialect)
    }

    /// Derives the header from a live record.
    ///
    /// Two fields resolving to the same path are a
    /// [`DuplicateColumn`](crate::Error::DuplicateColumn) error.
    pub fn from_record(record: &dyn Record, dialect: Dialect) -> Result<Self> {
        let leaves = schema::leaves(record, Mode::Direct)?;
        let header = leaves.iter().map(|leaf| leaf.path.clone()).collect_vec();
        ensure_unique(&header)?;
        let columns = leaves
            .into_iter()
            .enumerate()
            .map(|(index, leaf)| Column { leaf, index })
            .collect_vec();
        debug!("Derived header with {} column(s)", header.len());
        Ok(Self {
            dialect,
            header,
            columns,
        })
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Renders the header followed by one row per record, blank rows included.
    pub fn encode<R: Record>(&self, records: &[R]) -> Result<Vec<u8>> {
        let rows = records
            .iter()
            .map(|record| {
                transcode::encode_row(record, &self.columns, self.header.len())
                    .map(|(cells, _)| cells)
            })
            .collect::<Result<Vec<_>>>()?;
        transcode::render(&self.header, rows, &self.dialect)
    }

    pub fn encode_record<R: Record>(&self, record: &R) -> Result<Vec<u8>> {
        self.encode(std::slice::from_ref(record))
    }
}

impl fmt::Display for Encoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Header fields:")?;
        for column in &self.columns {
            writeln!(
                f,
                "\t{:?} >> {}",
                column.leaf.path,
                column.leaf.fields.iter().join(".")
            )?;
        }
        Ok(())
    }
}

/// Encodes `records` with a header derived from `R`.
pub fn marshal<R: Record + Default>(records: &[R]) -> Result<Vec<u8>> {
    Encoder::new::<R>()?.encode(records)
}

/// Encodes a single record: the header plus one row.
pub fn marshal_record<R: Record>(record: &R) -> Result<Vec<u8>> {
    Encoder::from_record(record, Dialect::default())?.encode_record(record)
}
