//! `srcs` chunk: include graph nodes
//!
//! Record layout:
//! - 1 byte: Flags
//! - String: URI
//! - 8 bytes: Content digest
//! - Varint count, then that many strings (direct includes)

use serde::Serialize;

use crate::chunk::{capacity_hint, decode_records, ChunkTag};
use crate::cursor::Cursor;
use crate::string_table::StringTable;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFile {
    pub flags: u8,
    pub uri: String,
    #[serde(serialize_with = "hex::serialize")]
    pub digest: [u8; 8],
    pub direct_includes: Vec<String>,
}

impl SourceFile {
    pub fn decode(cursor: &mut Cursor<'_>, strings: &StringTable) -> Result<Self> {
        let flags = cursor.read_u8()?;
        let uri = strings.read(cursor)?;
        let digest = cursor.read_array()?;

        let count = cursor.read_varint()?;
        let mut direct_includes = Vec::with_capacity(capacity_hint(count, cursor));
        for _ in 0..count {
            direct_includes.push(strings.read(cursor)?);
        }

        Ok(Self {
            flags,
            uri,
            digest,
            direct_includes,
        })
    }

    pub fn digest_hex(&self) -> String {
        hex::encode(self.digest)
    }
}

/// Decode a whole `srcs` payload
pub fn decode(payload: &[u8], strings: &StringTable) -> Result<Vec<SourceFile>> {
    decode_records(ChunkTag::Srcs, payload, |cursor| SourceFile::decode(cursor, strings))
}
