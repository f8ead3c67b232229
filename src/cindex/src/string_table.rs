//! Shared string table (`stri` chunk)
//!
//! Payload layout:
//! - Bytes 0-3: Uncompressed size (u32 LE)
//! - Bytes 4+: zlib stream
//!
//! The decompressed bytes are split on NUL. clangd terminates every string,
//! so the split yields a trailing empty entry; it is kept so indices line up
//! with the writer's.

use flate2::read::ZlibDecoder;
use serde::Serialize;
use std::io::Read;

use crate::cursor::Cursor;
use crate::{Error, Result};

/// Ordered, immutable pool of strings referenced by index
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StringTable {
    strings: Vec<String>,
}

impl StringTable {
    /// Decode a `stri` chunk payload
    pub fn decode(payload: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(payload);
        let expected = cursor.read_u32()? as usize;
        let raw = inflate(cursor.read_rest(), expected)?;

        let text = String::from_utf8(raw)
            .map_err(|e| Error::StringTableCorrupt(format!("invalid UTF-8: {}", e)))?;

        Ok(Self::from_strings(text.split('\0').map(str::to_owned)))
    }

    pub fn from_strings<I, S>(strings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            strings: strings.into_iter().map(Into::into).collect(),
        }
    }

    /// Look up a string by index
    pub fn get(&self, index: u64) -> Option<&str> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.strings.get(i))
            .map(String::as_str)
    }

    /// Read a varint index from the cursor and resolve it
    ///
    /// An out-of-range index is reported at the offset of its varint.
    pub fn read(&self, cursor: &mut Cursor<'_>) -> Result<String> {
        let offset = cursor.position();
        let index = cursor.read_varint()?;
        self.get(index)
            .map(str::to_owned)
            .ok_or(Error::StringIndexOutOfRange {
                index,
                len: self.strings.len(),
                offset,
            })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.strings.iter().map(String::as_str)
    }
}

/// Inflate a zlib stream that must produce exactly `expected` bytes
fn inflate(compressed: &[u8], expected: usize) -> Result<Vec<u8>> {
    // One byte of headroom so an oversized stream shows up as a mismatch
    let limit = expected as u64 + 1;
    let mut raw = Vec::new();

    ZlibDecoder::new(compressed)
        .take(limit)
        .read_to_end(&mut raw)
        .map_err(|e| Error::StringTableCorrupt(format!("zlib: {}", e)))?;

    if raw.len() > expected {
        return Err(Error::StringTableCorrupt(format!(
            "uncompressed size mismatch: expected {}, stream is longer",
            expected
        )));
    }
    if raw.len() < expected {
        return Err(Error::StringTableCorrupt(format!(
            "uncompressed size mismatch: expected {}, got {}",
            expected,
            raw.len()
        )));
    }

    Ok(raw)
}
