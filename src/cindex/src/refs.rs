//! `refs` chunk: references grouped by the symbol they point to
//!
//! Each group is an 8-byte symbol id and a varint count, followed by that
//! many references of {1-byte kind mask, location, 8-byte container id}.

use serde::Serialize;
use std::fmt;

use crate::chunk::{capacity_hint, decode_records, ChunkTag};
use crate::cursor::Cursor;
use crate::location::Location;
use crate::string_table::StringTable;
use crate::symbol::SymbolId;
use crate::Result;

/// Reference kind bit mask
///
/// Kept as the raw byte; unknown bits are preserved.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RefKind(pub u8);

impl RefKind {
    pub const UNKNOWN: Self = Self(0);
    pub const DECLARATION: Self = Self(1 << 0);
    pub const DEFINITION: Self = Self(1 << 1);
    pub const REFERENCE: Self = Self(1 << 2);
    pub const SPELLED: Self = Self(1 << 3);
    pub const ALL: Self = Self(0b1111);

    const NAMES: [(Self, &'static str); 4] = [
        (Self::DECLARATION, "Declaration"),
        (Self::DEFINITION, "Definition"),
        (Self::REFERENCE, "Reference"),
        (Self::SPELLED, "Spelled"),
    ];

    #[inline]
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Whether every bit of `other` is set
    #[inline]
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub fn is_declaration(self) -> bool {
        self.contains(Self::DECLARATION)
    }

    #[inline]
    pub fn is_definition(self) -> bool {
        self.contains(Self::DEFINITION)
    }

    #[inline]
    pub fn is_reference(self) -> bool {
        self.contains(Self::REFERENCE)
    }

    #[inline]
    pub fn is_spelled(self) -> bool {
        self.contains(Self::SPELLED)
    }
}

impl fmt::Debug for RefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return f.write_str("RefKind(Unknown)");
        }

        let mut names: Vec<String> = Self::NAMES
            .iter()
            .filter(|(bit, _)| self.contains(*bit))
            .map(|(_, name)| name.to_string())
            .collect();

        let extra = self.0 & !Self::ALL.0;
        if extra != 0 {
            names.push(format!("{:#04x}", extra));
        }

        write!(f, "RefKind({})", names.join(" | "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reference {
    pub kind: RefKind,
    pub location: Location,
    /// Symbol enclosing the reference; all zeros when there is none
    pub container: SymbolId,
}

impl Reference {
    fn decode(cursor: &mut Cursor<'_>, strings: &StringTable) -> Result<Self> {
        let kind = RefKind(cursor.read_u8()?);
        let location = Location::decode(cursor, strings)?;
        let container = SymbolId::read(cursor)?;
        Ok(Self {
            kind,
            location,
            container,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefEntry {
    pub symbol_id: SymbolId,
    pub references: Vec<Reference>,
}

impl RefEntry {
    pub fn decode(cursor: &mut Cursor<'_>, strings: &StringTable) -> Result<Self> {
        let symbol_id = SymbolId::read(cursor)?;
        let count = cursor.read_varint()?;

        let mut references = Vec::with_capacity(capacity_hint(count, cursor));
        for _ in 0..count {
            references.push(Reference::decode(cursor, strings)?);
        }

        Ok(Self {
            symbol_id,
            references,
        })
    }
}

/// Decode a whole `refs` payload
pub fn decode(payload: &[u8], strings: &StringTable) -> Result<Vec<RefEntry>> {
    decode_records(ChunkTag::Refs, payload, |cursor| RefEntry::decode(cursor, strings))
}
