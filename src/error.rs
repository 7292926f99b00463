//! Error taxonomy shared by the direct and relational mappers.
//!
//! Every failure aborts the current marshal/unmarshal call. Use
//! [`Error::category()`] to branch on the broad class of failure instead of
//! matching individual variants.

use thiserror::Error;

use crate::value::ValueError;

/// Convenience result type for mapping operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Broad class of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The call itself was set up wrong: bad row number, empty relation
    /// table, nothing to decode, no usable columns.
    Configuration,
    /// The tokenizer failed to read or render rows.
    Parse,
    /// A non-empty cell did not parse as its destination field's kind.
    Coercion,
    /// A field recorded while deriving the header could not be found again.
    SchemaConsistency,
}

#[derive(Debug, Error)]
pub enum Error {
    /// Malformed CSV input or a failed CSV write.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Input bytes were not valid in the configured text encoding.
    #[error("failed to decode input as {encoding}")]
    Encoding { encoding: &'static str },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The input produced no rows at all, not even a header.
    #[error("input contains no rows")]
    EmptyInput,

    /// A whole-dataset decode found a header but no data rows.
    #[error("not enough rows: found {rows} row(s), need a header and at least one data row")]
    NotEnoughRows { rows: usize },

    /// An explicit row number fell outside `1..=rows`.
    #[error("invalid row {row}: expected a row number between 1 and {rows}")]
    InvalidRow { row: usize, rows: usize },

    /// A column a field maps to appears more than once in the header.
    #[error("duplicate column '{name}' at positions {first} and {second}")]
    DuplicateColumn {
        name: String,
        first: usize,
        second: usize,
    },

    /// Relational mapping was requested with a table that has no entries.
    #[error("relation table is empty")]
    EmptyRelationTable,

    /// The relation table matched none of the record's fields.
    #[error("relation table maps none of the fields of the record type")]
    EmptyHeader,

    /// A configured encoding label is not known to `encoding_rs`.
    #[error("unknown encoding '{label}'")]
    UnknownEncoding { label: String },

    /// A cell could not be coerced into its destination field.
    #[error("row {row}, field '{field}' (column path '{path}'): {source}")]
    Coercion {
        row: usize,
        field: &'static str,
        path: String,
        #[source]
        source: ValueError,
    },

    /// A field named while deriving the header no longer resolves on the record.
    #[error("field '{field}' on path '{path}' could not be resolved on the record")]
    SchemaMismatch { field: String, path: String },
}

impl Error {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Csv(_) | Error::Encoding { .. } | Error::Io(_) => ErrorCategory::Parse,
            Error::Coercion { .. } => ErrorCategory::Coercion,
            Error::SchemaMismatch { .. } => ErrorCategory::SchemaConsistency,
            Error::EmptyInput
            | Error::NotEnoughRows { .. }
            | Error::InvalidRow { .. }
            | Error::DuplicateColumn { .. }
            | Error::EmptyRelationTable
            | Error::EmptyHeader
            | Error::UnknownEncoding { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn is_configuration(&self) -> bool {
        self.category() == ErrorCategory::Configuration
    }
}
