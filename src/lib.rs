//! Typed CSV records.
//!
//! Maps CSV documents to collections of typed, possibly nested records and
//! back. Two mapping modes share one schema walk:
//!
//! - **Direct** ([`marshal`], [`unmarshal`], [`unmarshal_row`]): a field's
//!   column is its `csv` directive (or field name), prefixed by the dotted
//!   path of any enclosing record.
//! - **Relational** ([`relation`]): a field's space-joined `relation` path is
//!   translated through a [`RelationTable`] into an arbitrary column name.
//!
//! Records describe themselves through the [`Record`] trait, usually via the
//! [`record!`] macro. Empty cells leave fields untouched; whole-document
//! decoding drops rows that fill no field at all.
//!
//! The crate logs through the `log` facade and never installs a logger.

pub mod decode;
pub mod encode;
pub mod error;
pub mod header;
pub mod record;
pub mod relation;
pub mod schema;
pub mod tokenizer;
mod transcode;
pub mod value;

pub use decode::{Decoder, unmarshal, unmarshal_row};
pub use encode::{Encoder, marshal, marshal_record};
pub use error::{Error, ErrorCategory, Result};
pub use record::{Directive, Field, FieldMut, FieldRef, FieldType, Record};
pub use relation::{RelationDecoder, RelationEncoder, RelationTable};
pub use schema::Mode;
pub use tokenizer::Dialect;
pub use value::{Kind, Scalar, Value, ValueError};
