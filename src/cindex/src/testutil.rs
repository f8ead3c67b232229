//! Byte builders for tests
//!
//! The crate only decodes; these produce the payloads the tests feed it.

use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::Write;

pub fn encode_varint(mut value: u64, out: &mut Vec<u8>) {
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            return;
        }
        out.push(byte | 0x80);
    }
}

/// Payload writer for record chunks
#[derive(Default)]
pub struct Payload {
    bytes: Vec<u8>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn u8(mut self, value: u8) -> Self {
        self.bytes.push(value);
        self
    }

    pub fn bytes(mut self, value: &[u8]) -> Self {
        self.bytes.extend_from_slice(value);
        self
    }

    pub fn varint(mut self, value: u64) -> Self {
        encode_varint(value, &mut self.bytes);
        self
    }

    /// Location: file index, then start and end line/column
    pub fn location(self, file: u64, start: (u64, u64), end: (u64, u64)) -> Self {
        self.varint(file)
            .varint(start.0)
            .varint(start.1)
            .varint(end.0)
            .varint(end.1)
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}

/// `stri` payload for raw (already separated) decompressed bytes
pub fn string_table_raw(raw: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(raw).unwrap();
    let compressed = encoder.finish().unwrap();

    let mut payload = (raw.len() as u32).to_le_bytes().to_vec();
    payload.extend_from_slice(&compressed);
    payload
}

/// `stri` payload with every string null-terminated, as clangd writes it
pub fn string_table(strings: &[&str]) -> Vec<u8> {
    let mut raw = Vec::new();
    for s in strings {
        raw.extend_from_slice(s.as_bytes());
        raw.push(0);
    }
    string_table_raw(&raw)
}

pub fn chunk(tag: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut out = tag.to_vec();
    out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    out.extend_from_slice(payload);
    out
}

/// RIFF container with the size field counting from offset 8
pub fn container(chunks: &[Vec<u8>]) -> Vec<u8> {
    let body: usize = chunks.iter().map(Vec::len).sum();
    container_with_size(chunks, (body + 4) as u32)
}

pub fn container_with_size(chunks: &[Vec<u8>], total_size: u32) -> Vec<u8> {
    let mut out = b"RIFF".to_vec();
    out.extend_from_slice(&total_size.to_le_bytes());
    out.extend_from_slice(b"CdIx");
    for chunk in chunks {
        out.extend_from_slice(chunk);
    }
    out
}
