//! Command handlers

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

use cindex::Index;

/// Decode an index file and write it as pretty-printed JSON
pub fn decode(input: &Path, output: Option<&Path>) -> Result<()> {
    let index = Index::open(input)
        .with_context(|| format!("Failed to decode {}", input.display()))?;

    tracing::debug!(
        symbols = index.symbols.len(),
        refs = index.refs.len(),
        sources = index.sources.len(),
        "decoded {}",
        input.display()
    );

    let json = serde_json::to_string_pretty(&index).context("Failed to serialize index")?;
    write_output(output, json.as_bytes())
}

fn write_output(output: Option<&Path>, data: &[u8]) -> Result<()> {
    match output {
        Some(path) => fs::write(path, data)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(data).context("Failed to write to stdout")?;
            stdout.write_all(b"\n").context("Failed to write to stdout")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(tag: &[u8; 4], payload: &[u8]) -> Vec<u8> {
        let mut out = tag.to_vec();
        out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        out.extend_from_slice(payload);
        out
    }

    fn container(chunks: &[Vec<u8>]) -> Vec<u8> {
        let body: Vec<u8> = chunks.concat();
        let mut out = b"RIFF".to_vec();
        out.extend_from_slice(&(body.len() as u32 + 4).to_le_bytes());
        out.extend_from_slice(b"CdIx");
        out.extend_from_slice(&body);
        out
    }

    #[test]
    fn test_decode_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("main.cpp.idx");
        let output = dir.path().join("main.json");

        let data = container(&[
            chunk(b"meta", &19u32.to_le_bytes()),
            chunk(b"rela", &[1, 0, 2]),
        ]);
        fs::write(&input, data).unwrap();

        decode(&input, Some(&output)).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(json["meta"], 19);
        assert_eq!(json["rela"][0]["subject"], 1);
        assert_eq!(json["rela"][0]["object"], 2);
        assert!(json["symb"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_decode_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("broken.idx");
        let output = dir.path().join("broken.json");

        fs::write(&input, container(&[chunk(b"zzzz", &[0])])).unwrap();

        let err = decode(&input, Some(&output)).unwrap_err();
        assert!(err.to_string().contains("broken.idx"));
        assert!(matches!(
            err.downcast_ref::<cindex::Error>(),
            Some(cindex::Error::UnknownChunkTag { offset: 12, .. })
        ));
        assert!(!output.exists());
    }

    #[test]
    fn test_decode_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(decode(&dir.path().join("nope.idx"), None).is_err());
    }
}
