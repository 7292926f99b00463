//! Row transcoding shared by the direct and relational mappers.
//!
//! A [`Sheet`] is a tokenized document plus its header map. Rows are read and
//! written through bound [`Column`]s; which columns exist is the only thing
//! the two mapping modes disagree on.

use log::{debug, trace};

use crate::{
    error::{Error, Result},
    header::{Column, HeaderMap},
    record::Record,
    schema,
    tokenizer::{self, Dialect},
    value::{Value, ValueError, parse_typed_value},
};

#[derive(Debug, Clone)]
pub(crate) struct Sheet {
    rows: Vec<Vec<String>>,
    header: HeaderMap,
}

impl Sheet {
    pub(crate) fn parse(bytes: &[u8], dialect: &Dialect) -> Result<Self> {
        let rows = tokenizer::parse(bytes, dialect)?;
        let header = match rows.first() {
            Some(first) => HeaderMap::from_row(first),
            None => return Err(Error::EmptyInput),
        };
        debug!(
            "Tokenized {} row(s) with {} named column(s)",
            rows.len(),
            header.len()
        );
        Ok(Self { rows, header })
    }

    pub(crate) fn header_map(&self) -> &HeaderMap {
        &self.header
    }

    pub(crate) fn header_row(&self) -> &[String] {
        self.rows.first().map(Vec::as_slice).unwrap_or_default()
    }

    /// Total rows, header included.
    pub(crate) fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn cells(&self, row: usize) -> &[String] {
        self.rows.get(row).map(Vec::as_slice).unwrap_or_default()
    }

    /// Decodes every data row, dropping rows that fill no field.
    ///
    /// Nothing is returned unless every row decodes.
    pub(crate) fn decode_all<R>(&self, columns: &[Column]) -> Result<Vec<R>>
    where
        R: Record + Default,
    {
        if self.rows.len() < 2 {
            return Err(Error::NotEnoughRows {
                rows: self.rows.len(),
            });
        }
        let mut decoded = Vec::with_capacity(self.rows.len() - 1);
        for row in 1..self.rows.len() {
            let mut record = R::default();
            if decode_row(&mut record, columns, row, self.cells(row))? {
                decoded.push(record);
            } else {
                trace!("Skipping blank row {row}");
            }
        }
        debug!(
            "Decoded {} record(s) from {} data row(s)",
            decoded.len(),
            self.rows.len() - 1
        );
        Ok(decoded)
    }

    /// Rejects row numbers outside `1..=row_count()`.
    pub(crate) fn check_row(&self, row: usize) -> Result<()> {
        if row < 1 || row > self.rows.len() {
            return Err(Error::InvalidRow {
                row,
                rows: self.rows.len(),
            });
        }
        Ok(())
    }

    /// Decodes a single row into `record` in place, blank or not.
    pub(crate) fn decode_one(
        &self,
        row: usize,
        record: &mut dyn Record,
        columns: &[Column],
    ) -> Result<()> {
        decode_row(record, columns, row, self.cells(row))?;
        Ok(())
    }
}

/// Writes the mapped cells of `cells` into `record`.
///
/// Every cell is parsed and range-checked before any field is written, so a
/// coercion error leaves `record` untouched. Returns whether any non-empty
/// cell was stored.
pub(crate) fn decode_row(
    record: &mut dyn Record,
    columns: &[Column],
    row: usize,
    cells: &[String],
) -> Result<bool> {
    let staged = stage_row(&*record, columns, row, cells)?;
    let filled = !staged.is_empty();
    for (column, value) in staged {
        schema::scalar_mut(record, &column.leaf)?
            .assign(value)
            .map_err(|source| coercion(row, column, source))?;
    }
    Ok(filled)
}

fn stage_row<'c>(
    record: &dyn Record,
    columns: &'c [Column],
    row: usize,
    cells: &[String],
) -> Result<Vec<(&'c Column, Value)>> {
    columns.iter().try_fold(Vec::new(), |mut staged, column| {
        let scalar = schema::scalar(record, &column.leaf)?;
        let raw = cells.get(column.index).map(String::as_str).unwrap_or("");
        let parsed = parse_typed_value(raw, scalar.kind())
            .map_err(|source| coercion(row, column, source))?;
        if let Some(value) = parsed {
            scalar
                .check(&value)
                .map_err(|source| coercion(row, column, source))?;
            staged.push((column, value));
        }
        Ok(staged)
    })
}

fn coercion(row: usize, column: &Column, source: ValueError) -> Error {
    Error::Coercion {
        row,
        field: column.leaf.name(),
        path: column.leaf.path.clone(),
        source,
    }
}

/// Renders `record` into a row of `width` cells.
///
/// Returns the row and whether any cell is non-empty.
pub(crate) fn encode_row(
    record: &dyn Record,
    columns: &[Column],
    width: usize,
) -> Result<(Vec<String>, bool)> {
    let mut cells = vec![String::new(); width];
    let mut contributed = false;
    for column in columns {
        let rendered = schema::scalar(record, &column.leaf)?.render();
        if rendered.is_empty() {
            continue;
        }
        if let Some(cell) = cells.get_mut(column.index) {
            *cell = rendered;
            contributed = true;
        }
    }
    Ok((cells, contributed))
}

pub(crate) fn render(
    header: &[String],
    rows: impl IntoIterator<Item = Vec<String>>,
    dialect: &Dialect,
) -> Result<Vec<u8>> {
    let mut all = vec![header.to_vec()];
    all.extend(rows);
    tokenizer::render(&all, dialect)
}
