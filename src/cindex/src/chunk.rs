//! Chunk tags, chunk headers and the per-chunk record loop

use byteorder::{ByteOrder, LE};
use serde::Serialize;
use std::fmt;

use crate::cursor::Cursor;
use crate::{Error, Result};

/// The seven chunk kinds an index file may contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkTag {
    /// Format version
    Meta,
    /// Compressed string table
    Stri,
    /// Symbols
    Symb,
    /// References, grouped by symbol
    Refs,
    /// Relations between symbols
    Rela,
    /// Source files and their includes
    Srcs,
    /// Compile commands
    Cmdl,
}

impl ChunkTag {
    pub const ALL: [ChunkTag; 7] = [
        Self::Meta,
        Self::Stri,
        Self::Symb,
        Self::Refs,
        Self::Rela,
        Self::Srcs,
        Self::Cmdl,
    ];

    /// Map raw tag bytes to a known chunk kind
    pub fn from_bytes(tag: &[u8; 4]) -> Option<Self> {
        match tag {
            b"meta" => Some(Self::Meta),
            b"stri" => Some(Self::Stri),
            b"symb" => Some(Self::Symb),
            b"refs" => Some(Self::Refs),
            b"rela" => Some(Self::Rela),
            b"srcs" => Some(Self::Srcs),
            b"cmdl" => Some(Self::Cmdl),
            _ => None,
        }
    }

    pub fn as_bytes(self) -> &'static [u8; 4] {
        match self {
            Self::Meta => b"meta",
            Self::Stri => b"stri",
            Self::Symb => b"symb",
            Self::Refs => b"refs",
            Self::Rela => b"rela",
            Self::Srcs => b"srcs",
            Self::Cmdl => b"cmdl",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Meta => "meta",
            Self::Stri => "stri",
            Self::Symb => "symb",
            Self::Refs => "refs",
            Self::Rela => "rela",
            Self::Srcs => "srcs",
            Self::Cmdl => "cmdl",
        }
    }

    /// Whether records of this kind hold string indices
    pub fn needs_strings(self) -> bool {
        matches!(self, Self::Symb | Self::Refs | Self::Srcs | Self::Cmdl)
    }
}

impl fmt::Display for ChunkTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chunk header (8 bytes): tag + payload size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    pub tag: [u8; 4],
    pub size: u32,
}

impl ChunkHeader {
    pub const SIZE: usize = 8;

    /// Read the whole header or nothing
    pub fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
        let raw = cursor.read_bytes(Self::SIZE)?;

        let mut tag = [0u8; 4];
        tag.copy_from_slice(&raw[0..4]);
        Ok(Self {
            tag,
            size: LE::read_u32(&raw[4..8]),
        })
    }

    /// Resolve the tag, failing for anything outside the known set
    pub fn kind(&self, offset: usize) -> Result<ChunkTag> {
        ChunkTag::from_bytes(&self.tag).ok_or_else(|| Error::UnknownChunkTag {
            tag: String::from_utf8_lossy(&self.tag).into_owned(),
            offset,
        })
    }
}

/// Decode records back to back until the payload is used up
///
/// A record that runs off the end of the payload is reported as
/// [`Error::TruncatedRecord`] with the offset where that record began.
pub(crate) fn decode_records<'a, T, F>(tag: ChunkTag, payload: &'a [u8], mut decode: F) -> Result<Vec<T>>
where
    F: FnMut(&mut Cursor<'a>) -> Result<T>,
{
    let mut cursor = Cursor::new(payload);
    let mut records = Vec::new();

    while !cursor.is_empty() {
        let start = cursor.position();
        let record = decode(&mut cursor).map_err(|e| match e {
            Error::UnexpectedEof { .. } => Error::TruncatedRecord {
                tag: tag.as_str(),
                record: records.len(),
                offset: start,
            },
            other => other,
        })?;
        records.push(record);
    }

    Ok(records)
}

/// Capacity hint for a varint-counted list: every element takes at least
/// one byte, so never reserve more than what is left
#[inline]
pub(crate) fn capacity_hint(count: u64, cursor: &Cursor<'_>) -> usize {
    usize::try_from(count)
        .unwrap_or(usize::MAX)
        .min(cursor.remaining())
}
