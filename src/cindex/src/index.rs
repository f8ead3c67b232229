//! Container walk and chunk dispatch
//!
//! Decoding reads the 12-byte container header once, then reads chunks
//! until the position reaches the header's total size. The size field is
//! compared against the absolute file position, matching the tools that
//! already consume these files. Each chunk is routed by tag to its record
//! decoder; the first error ends the decode.

use serde::Serialize;
use std::path::Path;
use tracing::{debug, trace, warn};

use crate::chunk::{ChunkHeader, ChunkTag};
use crate::command::{self, CompileCommand};
use crate::cursor::Cursor;
use crate::meta;
use crate::refs::{self, RefEntry};
use crate::relation::{self, Relation};
use crate::source::{self, SourceFile};
use crate::string_table::StringTable;
use crate::symbol::{self, Symbol};
use crate::{Error, Result, INDEX_FORMAT, RIFF_MAGIC};

/// Container header (12 bytes)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContainerHeader {
    /// Container tag, `RIFF` for files clangd writes
    pub riff_tag: [u8; 4],
    /// Size field; chunks are read while the position is below it
    pub total_size: u32,
    /// Format tag, `CdIx` for clangd indexes
    pub format_tag: [u8; 4],
}

impl ContainerHeader {
    pub const SIZE: usize = 12;

    pub fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            riff_tag: cursor.read_array()?,
            total_size: cursor.read_u32()?,
            format_tag: cursor.read_array()?,
        })
    }

    #[inline]
    pub fn is_riff(&self) -> bool {
        self.riff_tag == RIFF_MAGIC
    }

    #[inline]
    pub fn is_clangd_index(&self) -> bool {
        self.format_tag == INDEX_FORMAT
    }
}

/// Records produced by one chunk
enum ChunkData {
    Version(u32),
    Strings(StringTable),
    Symbols(Vec<Symbol>),
    Refs(Vec<RefEntry>),
    Relations(Vec<Relation>),
    Sources(Vec<SourceFile>),
    Commands(Vec<CompileCommand>),
}

impl ChunkData {
    fn len(&self) -> usize {
        match self {
            Self::Version(_) => 1,
            Self::Strings(table) => table.len(),
            Self::Symbols(v) => v.len(),
            Self::Refs(v) => v.len(),
            Self::Relations(v) => v.len(),
            Self::Sources(v) => v.len(),
            Self::Commands(v) => v.len(),
        }
    }
}

/// Route a payload to the decoder for its tag
///
/// Chunks holding string indices need the table from an earlier `stri`.
fn decode_chunk(tag: ChunkTag, payload: &[u8], strings: Option<&StringTable>) -> Result<ChunkData> {
    let need_strings = || strings.ok_or(Error::MissingStringTable { tag: tag.as_str() });

    let data = match tag {
        ChunkTag::Meta => ChunkData::Version(meta::decode(payload)?),
        ChunkTag::Stri => ChunkData::Strings(StringTable::decode(payload)?),
        ChunkTag::Symb => ChunkData::Symbols(symbol::decode(payload, need_strings()?)?),
        ChunkTag::Refs => ChunkData::Refs(refs::decode(payload, need_strings()?)?),
        ChunkTag::Rela => ChunkData::Relations(relation::decode(payload)?),
        ChunkTag::Srcs => ChunkData::Sources(source::decode(payload, need_strings()?)?),
        ChunkTag::Cmdl => ChunkData::Commands(command::decode(payload, need_strings()?)?),
    };

    Ok(data)
}

/// A fully decoded index file
///
/// Serializes keyed by chunk tag. Record chunks that appear more than once
/// are concatenated in file order; a repeated `meta` or `stri` replaces the
/// earlier one.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Index {
    #[serde(skip)]
    pub header: ContainerHeader,
    #[serde(rename = "meta")]
    pub version: Option<u32>,
    #[serde(rename = "stri")]
    pub strings: Option<StringTable>,
    #[serde(rename = "symb")]
    pub symbols: Vec<Symbol>,
    pub refs: Vec<RefEntry>,
    #[serde(rename = "rela")]
    pub relations: Vec<Relation>,
    #[serde(rename = "srcs")]
    pub sources: Vec<SourceFile>,
    #[serde(rename = "cmdl")]
    pub commands: Vec<CompileCommand>,
}

impl Index {
    /// Read and decode an index file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        debug!(path = %path.as_ref().display(), bytes = data.len(), "read index file");
        Self::parse(&data)
    }

    /// Decode an index held in memory
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(data);
        let header = ContainerHeader::read(&mut cursor)?;

        trace!(
            riff_tag = %String::from_utf8_lossy(&header.riff_tag),
            total_size = header.total_size,
            format_tag = %String::from_utf8_lossy(&header.format_tag),
            "container header"
        );
        if !header.is_riff() {
            warn!(tag = ?header.riff_tag, "container tag is not RIFF");
        }
        if !header.is_clangd_index() {
            warn!(tag = ?header.format_tag, "format tag is not CdIx");
        }

        let mut index = Self {
            header,
            ..Self::default()
        };

        let end = header.total_size as usize;
        while !cursor.is_at(end) {
            let offset = cursor.position();
            let chunk = ChunkHeader::read(&mut cursor)?;
            let tag = chunk.kind(offset)?;

            let in_chunk = |source: Error| Error::Chunk {
                tag: tag.as_str(),
                offset,
                source: Box::new(source),
            };

            let payload = cursor.read_bytes(chunk.size as usize).map_err(in_chunk)?;
            let data = decode_chunk(tag, payload, index.strings.as_ref()).map_err(in_chunk)?;

            debug!(
                tag = tag.as_str(),
                offset,
                size = chunk.size,
                records = data.len(),
                "decoded chunk"
            );
            index.absorb(tag, data);
        }

        Ok(index)
    }

    fn absorb(&mut self, tag: ChunkTag, data: ChunkData) {
        match data {
            ChunkData::Version(version) => {
                if let Some(previous) = self.version.replace(version) {
                    warn!(previous, version, "repeated {} chunk", tag);
                }
            }
            ChunkData::Strings(table) => {
                if self.strings.replace(table).is_some() {
                    warn!("repeated {} chunk replaces the string table", tag);
                }
            }
            ChunkData::Symbols(v) => self.symbols.extend(v),
            ChunkData::Refs(v) => self.refs.extend(v),
            ChunkData::Relations(v) => self.relations.extend(v),
            ChunkData::Sources(v) => self.sources.extend(v),
            ChunkData::Commands(v) => self.commands.extend(v),
        }
    }

    pub fn string_table(&self) -> Option<&StringTable> {
        self.strings.as_ref()
    }

    /// Whether no records were decoded (version and strings aside)
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
            && self.refs.is_empty()
            && self.relations.is_empty()
            && self.sources.is_empty()
            && self.commands.is_empty()
    }
}
