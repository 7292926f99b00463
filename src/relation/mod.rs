//! Relational mapping through an external [`RelationTable`].
//!
//! Fields opt in with a `relation` directive; their space-joined paths are
//! translated through the table into column names, so the on-disk header can
//! differ from the code-level names. Fields whose path the table does not map
//! are neither written nor read.
//!
//! Every operation fails with [`Error::EmptyRelationTable`](crate::Error::EmptyRelationTable)
//! when the table has no entries.

mod decode;
mod encode;
mod table;

pub use decode::RelationDecoder;
pub use encode::RelationEncoder;
pub use table::RelationTable;

use crate::{
    error::Result,
    record::Record,
    schema::{self, Mode},
    tokenizer::Dialect,
};

/// Every relational path of `R`, in declaration order.
pub fn options<R: Record + Default>() -> Result<Vec<String>> {
    schema::paths(&R::default(), Mode::Relational)
}

pub fn marshal<R: Record + Default>(records: &[R], relations: &RelationTable) -> Result<Vec<u8>> {
    RelationEncoder::new::<R>(relations)?.encode(records)
}

pub fn marshal_record<R: Record>(record: &R, relations: &RelationTable) -> Result<Vec<u8>> {
    RelationEncoder::from_record(record, relations, Dialect::default())?.encode_record(record)
}

pub fn unmarshal<R>(bytes: &[u8], records: &mut Vec<R>, relations: &RelationTable) -> Result<()>
where
    R: Record + Default,
{
    RelationDecoder::new(bytes, relations)?.decode(records)
}

pub fn unmarshal_row<R: Record>(
    row: usize,
    bytes: &[u8],
    record: &mut R,
    relations: &RelationTable,
) -> Result<()> {
    RelationDecoder::new(bytes, relations)?.decode_row(row, record)
}
