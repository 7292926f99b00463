//! Direct-mode decoding: header cells are matched verbatim against dotted
//! field paths.

use crate::{
    error::Result,
    header::{Column, HeaderMap, bind},
    record::Record,
    schema::{self, Mode},
    tokenizer::Dialect,
    transcode::Sheet,
};

/// A tokenized CSV document ready to be decoded into records.
#[derive(Debug, Clone)]
pub struct Decoder {
    sheet: Sheet,
}

impl Decoder {
    pub fn new(bytes: &[u8]) -> Result<Self> {
        Self::with_dialect(bytes, &Dialect::default())
    }

    pub fn with_dialect(bytes: &[u8], dialect: &Dialect) -> Result<Self> {
        Ok(Self {
            sheet: Sheet::parse(bytes, dialect)?,
        })
    }

    /// The first row as tokenized.
    pub fn header(&self) -> &[String] {
        self.sheet.header_row()
    }

    pub fn header_map(&self) -> &HeaderMap {
        self.sheet.header_map()
    }

    /// Number of rows, header included.
    pub fn row_count(&self) -> usize {
        self.sheet.row_count()
    }

    /// Appends one record per data row that fills at least one field.
    ///
    /// On error `records` is left as it was.
    pub fn decode<R>(&self, records: &mut Vec<R>) -> Result<()>
    where
        R: Record + Default,
    {
        let columns = self.columns(&R::default())?;
        let decoded = self.sheet.decode_all(&columns)?;
        records.extend(decoded);
        Ok(())
    }

    /// Decodes row `row` (the header is row 0) into `record` in place.
    ///
    /// Fields without a matching column keep their current values. On error
    /// `record` is left as it was.
    pub fn decode_row<R: Record>(&self, row: usize, record: &mut R) -> Result<()> {
        self.sheet.check_row(row)?;
        let columns = self.columns(&*record)?;
        self.sheet.decode_one(row, record, &columns)
    }

    fn columns(&self, record: &dyn Record) -> Result<Vec<Column>> {
        let header = self.sheet.header_map();
        let leaves = schema::leaves(record, Mode::Direct)?;
        bind(leaves, |leaf| header.resolve(&leaf.path))
    }
}

/// Decodes every data row of `bytes` and appends the records to `records`.
pub fn unmarshal<R>(bytes: &[u8], records: &mut Vec<R>) -> Result<()>
where
    R: Record + Default,
{
    Decoder::new(bytes)?.decode(records)
}

/// Decodes data row `row` of `bytes` into `record`.
pub fn unmarshal_row<R: Record>(row: usize, bytes: &[u8], record: &mut R) -> Result<()> {
    Decoder::new(bytes)?.decode_row(row, record)
}
