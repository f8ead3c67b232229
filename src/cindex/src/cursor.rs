//! Sequential byte reader used by every decoder
//!
//! All reads advance the position and fail with [`Error::UnexpectedEof`]
//! rather than returning partial data.

use byteorder::{ByteOrder, LE};

use crate::{varint, Error, Result};

/// Byte cursor over a borrowed buffer
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Read exactly `n` bytes
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        let available = self.remaining();
        if n > available {
            return Err(Error::UnexpectedEof {
                offset: self.pos,
                needed: n,
                available,
            });
        }

        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Read a fixed-size byte array (tags, ids, digests)
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    #[inline]
    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(LE::read_u32(self.read_bytes(4)?))
    }

    /// Read a base-128 varint (see [`varint::decode`])
    #[inline]
    pub fn read_varint(&mut self) -> Result<u64> {
        varint::decode(self)
    }

    /// Consume everything left in the buffer
    pub fn read_rest(&mut self) -> &'a [u8] {
        let rest = &self.data[self.pos..];
        self.pos = self.data.len();
        rest
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Whether the position has reached `bound`
    #[inline]
    pub fn is_at(&self, bound: usize) -> bool {
        self.pos >= bound
    }

    /// Whether every byte has been consumed
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.is_at(self.data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_fixed_width() {
        let data = [0x2a, 0x01, 0x00, 0x00, 0x00, 0xff];
        let mut cursor = Cursor::new(&data);

        assert_eq!(cursor.read_u8().unwrap(), 0x2a);
        assert_eq!(cursor.read_u32().unwrap(), 1);
        assert_eq!(cursor.position(), 5);
        assert_eq!(cursor.remaining(), 1);
        assert!(!cursor.is_empty());

        assert_eq!(cursor.read_u8().unwrap(), 0xff);
        assert!(cursor.is_empty());
    }

    #[test]
    fn test_read_array() {
        let data = *b"RIFFtail";
        let mut cursor = Cursor::new(&data);

        let tag: [u8; 4] = cursor.read_array().unwrap();
        assert_eq!(&tag, b"RIFF");
        assert_eq!(cursor.read_rest(), b"tail");
        assert!(cursor.is_empty());
    }

    #[test]
    fn test_read_past_end() {
        let data = [0x01, 0x02, 0x03];
        let mut cursor = Cursor::new(&data);

        let err = cursor.read_u32().unwrap_err();
        assert!(matches!(
            err,
            Error::UnexpectedEof {
                offset: 0,
                needed: 4,
                available: 3
            }
        ));

        // A failed read does not move the cursor
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.read_bytes(3).unwrap(), &data);
        assert!(cursor.read_u8().is_err());
    }

    #[test]
    fn test_is_at_bound() {
        let data = [0u8; 8];
        let mut cursor = Cursor::new(&data);

        assert!(cursor.is_at(0));
        assert!(!cursor.is_at(4));

        cursor.read_bytes(4).unwrap();
        assert!(cursor.is_at(4));
        assert!(cursor.is_at(2));
        assert!(!cursor.is_at(5));
        assert_eq!(cursor.len(), 8);
    }
}
