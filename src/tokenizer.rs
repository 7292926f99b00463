//! Row tokenization at the byte boundary.
//!
//! The mapper itself only sees rows of string cells. This module turns bytes
//! into those rows and back using the `csv` crate, after decoding the input
//! with the [`Dialect`]'s text encoding (`encoding_rs`, UTF-8 by default).
//!
//! - Reads are flexible: a row may be shorter than the header.
//! - Writes quote cells only when needed and end every row with `\n`.

use std::io;

use csv::{QuoteStyle, Terminator};
use encoding_rs::{Encoding, UTF_8};

use crate::error::{Error, Result};

pub const DEFAULT_DELIMITER: u8 = b',';

/// Delimiter and text encoding of a CSV document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    pub delimiter: u8,
    pub encoding: &'static Encoding,
}

impl Default for Dialect {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            encoding: UTF_8,
        }
    }
}

impl Dialect {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Resolves a WHATWG encoding label such as `latin1` or `windows-1252`.
    pub fn with_encoding_label(self, label: &str) -> Result<Self> {
        Ok(self.with_encoding(resolve_encoding(Some(label))?))
    }
}

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    match label {
        Some(value) => {
            Encoding::for_label(value.trim().as_bytes()).ok_or_else(|| Error::UnknownEncoding {
                label: value.to_string(),
            })
        }
        None => Ok(UTF_8),
    }
}

fn open_csv_reader(bytes: &[u8], delimiter: u8) -> csv::Reader<&[u8]> {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(false)
        .delimiter(delimiter)
        .double_quote(true)
        .flexible(true);
    builder.from_reader(bytes)
}

fn open_csv_writer(delimiter: u8) -> csv::Writer<Vec<u8>> {
    let mut builder = csv::WriterBuilder::new();
    builder
        .delimiter(delimiter)
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .double_quote(true);
    builder.from_writer(Vec::new())
}

pub fn decode_bytes(bytes: &[u8], encoding: &'static Encoding) -> Result<String> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        Err(Error::Encoding {
            encoding: encoding.name(),
        })
    } else {
        Ok(text.into_owned())
    }
}

fn encode_text(bytes: Vec<u8>, encoding: &'static Encoding) -> Result<Vec<u8>> {
    if encoding == UTF_8 {
        return Ok(bytes);
    }
    let text = String::from_utf8(bytes).map_err(|_| Error::Encoding {
        encoding: UTF_8.name(),
    })?;
    let (encoded, _, had_errors) = encoding.encode(&text);
    if had_errors {
        return Err(Error::Encoding {
            encoding: encoding.name(),
        });
    }
    Ok(encoded.into_owned())
}

/// Tokenizes `bytes` into rows of cells. Blank lines are skipped.
pub fn parse(bytes: &[u8], dialect: &Dialect) -> Result<Vec<Vec<String>>> {
    let text = decode_bytes(bytes, dialect.encoding)?;
    let mut reader = open_csv_reader(text.as_bytes(), dialect.delimiter);
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

/// Renders rows back into bytes in the dialect's delimiter and encoding.
pub fn render(rows: &[Vec<String>], dialect: &Dialect) -> Result<Vec<u8>> {
    let mut writer = open_csv_writer(dialect.delimiter);
    for row in rows {
        writer.write_record(row)?;
    }
    let bytes = writer.into_inner().map_err(|err| {
        Error::Io(io::Error::new(err.error().kind(), err.error().to_string()))
    })?;
    encode_text(bytes, dialect.encoding)
}
