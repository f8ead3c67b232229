//! `meta` chunk: format version (u32 LE, whole payload)

use crate::chunk::ChunkTag;
use crate::cursor::Cursor;
use crate::{Error, Result};

pub fn decode(payload: &[u8]) -> Result<u32> {
    let mut cursor = Cursor::new(payload);
    let version = cursor.read_u32()?;

    if !cursor.is_empty() {
        return Err(Error::TruncatedRecord {
            tag: ChunkTag::Meta.as_str(),
            record: 0,
            offset: cursor.position(),
        });
    }

    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode() {
        assert_eq!(decode(&[0x01, 0x00, 0x00, 0x00]).unwrap(), 1);
        assert_eq!(decode(&19u32.to_le_bytes()).unwrap(), 19);
        assert_eq!(decode(&[0x00, 0x01, 0x00, 0x00]).unwrap(), 256);
    }

    #[test]
    fn test_short_payload() {
        assert!(matches!(
            decode(&[0x01, 0x00]),
            Err(Error::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn test_trailing_bytes() {
        assert!(matches!(
            decode(&[0x01, 0x00, 0x00, 0x00, 0x00]),
            Err(Error::TruncatedRecord {
                tag: "meta",
                offset: 4,
                ..
            })
        ));
    }
}
