use crate::DecodeError;

/// Forward-only reader over an immutable program image.
pub struct ByteCursor<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[inline]
    pub fn has_more(&self) -> bool {
        self.position < self.bytes.len()
    }

    pub fn read_byte(&mut self) -> Result<u8, DecodeError> {
        let byte = *self
            .bytes
            .get(self.position)
            .ok_or(DecodeError::OutOfData {
                offset: self.position,
                len: self.bytes.len(),
            })?;
        self.position += 1;
        Ok(byte)
    }

    /// Little-endian: low byte first.
    pub fn read_word(&mut self) -> Result<u16, DecodeError> {
        let lo = self.read_byte()? as u16;
        let hi = self.read_byte()? as u16;
        Ok((hi << 8) | lo)
    }
}
