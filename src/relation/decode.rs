//! Relational decoding: each field's relation path is translated through the
//! table into a header name before its column is looked up.

use crate::{
    error::{Error, Result},
    header::{Column, HeaderMap, bind},
    record::Record,
    schema::{self, Mode},
    tokenizer::Dialect,
    transcode::Sheet,
};

use super::RelationTable;

/// A tokenized CSV document decoded through a relation table.
#[derive(Debug, Clone)]
pub struct RelationDecoder<'t> {
    sheet: Sheet,
    relations: &'t RelationTable,
}

impl<'t> RelationDecoder<'t> {
    pub fn new(bytes: &[u8], relations: &'t RelationTable) -> Result<Self> {
        Self::with_dialect(bytes, relations, &Dialect::default())
    }

    pub fn with_dialect(
        bytes: &[u8],
        relations: &'t RelationTable,
        dialect: &Dialect,
    ) -> Result<Self> {
        if relations.is_empty() {
            return Err(Error::EmptyRelationTable);
        }
        Ok(Self {
            sheet: Sheet::parse(bytes, dialect)?,
            relations,
        })
    }

    pub fn header(&self) -> &[String] {
        self.sheet.header_row()
    }

    pub fn header_map(&self) -> &HeaderMap {
        self.sheet.header_map()
    }

    pub fn row_count(&self) -> usize {
        self.sheet.row_count()
    }

    pub fn relations(&self) -> &'t RelationTable {
        self.relations
    }

    /// Appends one record per data row that fills at least one field.
    pub fn decode<R>(&self, records: &mut Vec<R>) -> Result<()>
    where
        R: Record + Default,
    {
        let columns = self.columns(&R::default())?;
        let decoded = self.sheet.decode_all(&columns)?;
        records.extend(decoded);
        Ok(())
    }

    pub fn decode_row<R: Record>(&self, row: usize, record: &mut R) -> Result<()> {
        self.sheet.check_row(row)?;
        let columns = self.columns(&*record)?;
        self.sheet.decode_one(row, record, &columns)
    }

    fn columns(&self, record: &dyn Record) -> Result<Vec<Column>> {
        let header = self.sheet.header_map();
        let leaves = schema::leaves(record, Mode::Relational)?;
        bind(leaves, |leaf| match self.relations.column_name(&leaf.path) {
            Some(name) => header.resolve(name),
            None => Ok(None),
        })
    }
}
