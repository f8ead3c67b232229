//! `symb` chunk: symbol records
//!
//! Record layout:
//! - 8 bytes: Symbol id
//! - 1 byte: Kind, 1 byte: Language
//! - Strings: name, scope, template specialization args
//! - Locations: definition, canonical declaration
//! - Varint: reference count
//! - 1 byte: Flags
//! - Strings: signature, completion snippet suffix, documentation,
//!   return type, type
//! - Varint count of include headers, each a string plus a varint packing
//!   `references << 2 | supported_directives`

use serde::{Serialize, Serializer};
use std::fmt;

use crate::chunk::{capacity_hint, decode_records, ChunkTag};
use crate::cursor::Cursor;
use crate::location::Location;
use crate::string_table::StringTable;
use crate::{Error, Result};

/// Opaque 8-byte symbol identifier (a truncated USR hash)
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SymbolId(#[serde(serialize_with = "hex::serialize")] pub [u8; 8]);

impl SymbolId {
    pub const SIZE: usize = 8;

    pub fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
        cursor.read_array::<{ SymbolId::SIZE }>().map(Self)
    }

    /// All-zero id, used by references with no container
    pub fn is_null(&self) -> bool {
        self.0 == [0; 8]
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolId({})", self)
    }
}

/// Symbol category (LSP `SymbolKind` numbering)
///
/// Serializes as its numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SymbolKind {
    File = 1,
    Module = 2,
    Namespace = 3,
    Package = 4,
    Class = 5,
    Method = 6,
    Property = 7,
    Field = 8,
    Constructor = 9,
    Enum = 10,
    Interface = 11,
    Function = 12,
    Variable = 13,
    Constant = 14,
    String = 15,
    Number = 16,
    Boolean = 17,
    Array = 18,
    Object = 19,
    Key = 20,
    Null = 21,
    EnumMember = 22,
    Struct = 23,
    Event = 24,
    Operator = 25,
    TypeParameter = 26,
}

impl SymbolKind {
    pub fn from_u8(value: u8) -> Option<Self> {
        let kind = match value {
            1 => Self::File,
            2 => Self::Module,
            3 => Self::Namespace,
            4 => Self::Package,
            5 => Self::Class,
            6 => Self::Method,
            7 => Self::Property,
            8 => Self::Field,
            9 => Self::Constructor,
            10 => Self::Enum,
            11 => Self::Interface,
            12 => Self::Function,
            13 => Self::Variable,
            14 => Self::Constant,
            15 => Self::String,
            16 => Self::Number,
            17 => Self::Boolean,
            18 => Self::Array,
            19 => Self::Object,
            20 => Self::Key,
            21 => Self::Null,
            22 => Self::EnumMember,
            23 => Self::Struct,
            24 => Self::Event,
            25 => Self::Operator,
            26 => Self::TypeParameter,
            _ => return None,
        };
        Some(kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SymbolLanguage {
    C = 0,
    Cpp = 1,
    ObjC = 2,
    Swift = 3,
}

impl SymbolLanguage {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::C),
            1 => Some(Self::Cpp),
            2 => Some(Self::ObjC),
            3 => Some(Self::Swift),
            _ => None,
        }
    }
}

impl Serialize for SymbolKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

impl Serialize for SymbolLanguage {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

/// Header that brings a symbol into scope
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncludeHeader {
    pub header: String,
    pub references: u64,
    /// Bit 0: `#include`, bit 1: `#import`
    pub supported_directives: u8,
}

impl IncludeHeader {
    fn decode(cursor: &mut Cursor<'_>, strings: &StringTable) -> Result<Self> {
        let header = strings.read(cursor)?;
        let packed = cursor.read_varint()?;
        Ok(Self {
            header,
            references: packed >> 2,
            supported_directives: (packed & 0b11) as u8,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Symbol {
    pub id: SymbolId,
    pub kind: SymbolKind,
    pub lang: SymbolLanguage,
    pub name: String,
    pub scope: String,
    pub template_specialization_args: String,
    pub definition: Location,
    pub canonical_declaration: Location,
    pub references: u64,
    pub flags: u8,
    pub signature: String,
    pub completion_snippet_suffix: String,
    pub documentation: String,
    pub return_type: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub include_headers: Vec<IncludeHeader>,
}

impl Symbol {
    pub fn decode(cursor: &mut Cursor<'_>, strings: &StringTable) -> Result<Self> {
        let id = SymbolId::read(cursor)?;

        let offset = cursor.position();
        let raw_kind = cursor.read_u8()?;
        let kind = SymbolKind::from_u8(raw_kind).ok_or(Error::InvalidEnumValue {
            kind: "symbol kind",
            value: raw_kind,
            offset,
        })?;

        let offset = cursor.position();
        let raw_lang = cursor.read_u8()?;
        let lang = SymbolLanguage::from_u8(raw_lang).ok_or(Error::InvalidEnumValue {
            kind: "symbol language",
            value: raw_lang,
            offset,
        })?;

        let name = strings.read(cursor)?;
        let scope = strings.read(cursor)?;
        let template_specialization_args = strings.read(cursor)?;
        let definition = Location::decode(cursor, strings)?;
        let canonical_declaration = Location::decode(cursor, strings)?;
        let references = cursor.read_varint()?;
        let flags = cursor.read_u8()?;
        let signature = strings.read(cursor)?;
        let completion_snippet_suffix = strings.read(cursor)?;
        let documentation = strings.read(cursor)?;
        let return_type = strings.read(cursor)?;
        let type_name = strings.read(cursor)?;

        let count = cursor.read_varint()?;
        let mut include_headers = Vec::with_capacity(capacity_hint(count, cursor));
        for _ in 0..count {
            include_headers.push(IncludeHeader::decode(cursor, strings)?);
        }

        Ok(Self {
            id,
            kind,
            lang,
            name,
            scope,
            template_specialization_args,
            definition,
            canonical_declaration,
            references,
            flags,
            signature,
            completion_snippet_suffix,
            documentation,
            return_type,
            type_name,
            include_headers,
        })
    }

    /// Scope-qualified name, e.g. `std::vector`
    pub fn qualified_name(&self) -> String {
        format!("{}{}", self.scope, self.name)
    }
}

/// Decode a whole `symb` payload
pub fn decode(payload: &[u8], strings: &StringTable) -> Result<Vec<Symbol>> {
    decode_records(ChunkTag::Symb, payload, |cursor| Symbol::decode(cursor, strings))
}
