//! Source spans
//!
//! A location is a file URI string index followed by start line, start
//! column, end line and end column, each a varint. Values are kept exactly
//! as stored; nothing checks that the span is ordered.

use serde::Serialize;

use crate::cursor::Cursor;
use crate::string_table::StringTable;
use crate::Result;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Position {
    pub line: u64,
    pub column: u64,
}

impl Position {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self> {
        let line = cursor.read_varint()?;
        let column = cursor.read_varint()?;
        Ok(Self { line, column })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Location {
    pub file_uri: String,
    pub start: Position,
    pub end: Position,
}

impl Location {
    pub fn decode(cursor: &mut Cursor<'_>, strings: &StringTable) -> Result<Self> {
        let file_uri = strings.read(cursor)?;
        let start = Position::decode(cursor)?;
        let end = Position::decode(cursor)?;
        Ok(Self {
            file_uri,
            start,
            end,
        })
    }

    /// True when no file is attached (clangd stores an empty URI)
    pub fn is_empty(&self) -> bool {
        self.file_uri.is_empty()
    }
}
