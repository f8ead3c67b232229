//! `cmdl` chunk: compile commands
//!
//! Each record is a working directory string, a varint count and that many
//! argument strings.

use serde::Serialize;

use crate::chunk::{capacity_hint, decode_records, ChunkTag};
use crate::cursor::Cursor;
use crate::string_table::StringTable;
use crate::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompileCommand {
    pub directory: String,
    #[serde(rename = "commands")]
    pub arguments: Vec<String>,
}

impl CompileCommand {
    pub fn decode(cursor: &mut Cursor<'_>, strings: &StringTable) -> Result<Self> {
        let directory = strings.read(cursor)?;

        let count = cursor.read_varint()?;
        let mut arguments = Vec::with_capacity(capacity_hint(count, cursor));
        for _ in 0..count {
            arguments.push(strings.read(cursor)?);
        }

        Ok(Self {
            directory,
            arguments,
        })
    }

    /// Arguments joined with spaces, for display
    pub fn command_line(&self) -> String {
        self.arguments.join(" ")
    }
}

/// Decode a whole `cmdl` payload
pub fn decode(payload: &[u8], strings: &StringTable) -> Result<Vec<CompileCommand>> {
    decode_records(ChunkTag::Cmdl, payload, |cursor| {
        CompileCommand::decode(cursor, strings)
    })
}
