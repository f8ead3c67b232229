//! `rela` chunk: raw {subject, predicate, object} byte triples
//!
//! The triples are returned untouched; nothing here maps them to symbols.

use serde::Serialize;

use crate::chunk::{decode_records, ChunkTag};
use crate::cursor::Cursor;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Relation {
    pub subject: u8,
    pub predicate: u8,
    pub object: u8,
}

impl Relation {
    pub const SIZE: usize = 3;

    pub fn decode(cursor: &mut Cursor<'_>) -> Result<Self> {
        let [subject, predicate, object] = cursor.read_array::<{ Relation::SIZE }>()?;
        Ok(Self {
            subject,
            predicate,
            object,
        })
    }
}

/// Decode a whole `rela` payload
pub fn decode(payload: &[u8]) -> Result<Vec<Relation>> {
    decode_records(ChunkTag::Rela, payload, Relation::decode)
}
