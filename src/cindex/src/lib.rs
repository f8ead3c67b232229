//! Decoder for clangd RIFF index files
//!
//! clangd's background and static indexes are stored in a RIFF container
//! holding one chunk per record category. This crate decodes such a file
//! into typed records with every string resolved.
//!
//! # Format Overview
//!
//! ## Container
//!
//! - Bytes 0-3: Container tag (`RIFF`)
//! - Bytes 4-7: Total size (u32 LE)
//! - Bytes 8-11: Format tag (`CdIx`)
//! - Bytes 12+: Chunks until the position reaches the total size
//!
//! ## Chunk
//!
//! - Bytes 0-3: ASCII tag (`meta`, `stri`, `symb`, `refs`, `rela`, `srcs`, `cmdl`)
//! - Bytes 4-7: Payload size (u32 LE)
//! - Bytes 8+: Payload
//!
//! Strings are stored once in the zlib-compressed `stri` chunk and referenced
//! by varint index from every other chunk, so `stri` has to come first.
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let index = cindex::Index::open("background-index/main.cpp.idx")?;
//!
//! for symbol in &index.symbols {
//!     println!("{}{} ({:?})", symbol.scope, symbol.name, symbol.kind);
//! }
//! # Ok(())
//! # }
//! ```

mod chunk;
mod command;
mod cursor;
mod index;
mod location;
mod meta;
mod refs;
mod relation;
mod source;
mod string_table;
mod symbol;
pub mod varint;

#[cfg(test)]
pub(crate) mod testutil;

// Re-export main types
pub use chunk::{ChunkHeader, ChunkTag};
pub use command::CompileCommand;
pub use cursor::Cursor;
pub use index::{ContainerHeader, Index};
pub use location::{Location, Position};
pub use refs::{RefEntry, RefKind, Reference};
pub use relation::Relation;
pub use source::SourceFile;
pub use string_table::StringTable;
pub use symbol::{IncludeHeader, Symbol, SymbolId, SymbolKind, SymbolLanguage};

/// Container tag expected at offset 0: "RIFF"
pub const RIFF_MAGIC: [u8; 4] = *b"RIFF";

/// Format tag clangd writes at offset 8: "CdIx"
pub const INDEX_FORMAT: [u8; 4] = *b"CdIx";

/// Errors from index decoding
///
/// Offsets inside [`Error::Chunk`] are relative to that chunk's payload;
/// the wrapper carries the absolute offset of the chunk itself.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Unexpected end of data at offset {offset}: need {needed} bytes, {available} available")]
    UnexpectedEof {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("Unknown chunk tag {tag:?} at offset {offset}")]
    UnknownChunkTag { tag: String, offset: usize },

    #[error("Invalid {kind} value {value} at offset {offset}")]
    InvalidEnumValue {
        kind: &'static str,
        value: u8,
        offset: usize,
    },

    #[error("String table corrupt: {0}")]
    StringTableCorrupt(String),

    #[error("Truncated '{tag}' record #{record} at offset {offset}")]
    TruncatedRecord {
        tag: &'static str,
        record: usize,
        offset: usize,
    },

    #[error("String index {index} at offset {offset} out of range (table has {len} strings)")]
    StringIndexOutOfRange {
        index: u64,
        len: usize,
        offset: usize,
    },

    #[error("Chunk '{tag}' references strings but no 'stri' chunk precedes it")]
    MissingStringTable { tag: &'static str },

    #[error("In '{tag}' chunk at offset {offset}: {source}")]
    Chunk {
        tag: &'static str,
        offset: usize,
        #[source]
        source: Box<Error>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// The structural cause, with any chunk context stripped
    pub fn root(&self) -> &Error {
        match self {
            Error::Chunk { source, .. } => source.root(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Check if data starts with a RIFF container tag
pub fn is_riff(data: &[u8]) -> bool {
    data.len() >= 4 && data[0..4] == RIFF_MAGIC
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_riff() {
        assert!(is_riff(b"RIFF\x10\x00\x00\x00CdIx"));
        assert!(!is_riff(b"RIFX\x10\x00\x00\x00CdIx"));

        // Too short
        assert!(!is_riff(b"RIF"));
    }

    #[test]
    fn test_magic_constants() {
        assert_eq!(RIFF_MAGIC, [0x52, 0x49, 0x46, 0x46]);
        assert_eq!(INDEX_FORMAT, [0x43, 0x64, 0x49, 0x78]);
    }

    #[test]
    fn test_error_display() {
        let err = Error::UnexpectedEof {
            offset: 4,
            needed: 8,
            available: 2,
        };
        assert!(err.to_string().contains("Unexpected end of data"));

        let err = Error::UnknownChunkTag {
            tag: "xxxx".to_string(),
            offset: 12,
        };
        assert!(err.to_string().contains("\"xxxx\""));

        let err = Error::InvalidEnumValue {
            kind: "symbol kind",
            value: 99,
            offset: 8,
        };
        assert!(err.to_string().contains("Invalid symbol kind value 99"));

        let err = Error::StringIndexOutOfRange {
            index: 7,
            len: 3,
            offset: 21,
        };
        assert!(err.to_string().contains("at offset 21"));
        assert!(err.to_string().contains("table has 3 strings"));

        let err = Error::TruncatedRecord {
            tag: "refs",
            record: 2,
            offset: 40,
        };
        assert!(err.to_string().contains("Truncated 'refs' record #2"));
    }

    #[test]
    fn test_error_root() {
        let err = Error::Chunk {
            tag: "symb",
            offset: 24,
            source: Box::new(Error::StringIndexOutOfRange {
                index: 5,
                len: 2,
                offset: 3,
            }),
        };
        assert!(err.to_string().contains("In 'symb' chunk at offset 24"));
        assert!(matches!(
            err.root(),
            Error::StringIndexOutOfRange {
                index: 5,
                len: 2,
                offset: 3
            }
        ));

        let plain = Error::StringTableCorrupt("bad".to_string());
        assert!(matches!(plain.root(), Error::StringTableCorrupt(_)));
    }
}
