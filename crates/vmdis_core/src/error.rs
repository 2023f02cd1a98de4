use thiserror::Error;

/// Conditions that abort a whole decode run.
///
/// Unknown opcodes, type bytes and offset tags are not errors; they are
/// embedded in the listing as markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("ROM size exceeded 16-bit integer limit (got {len} bytes)")]
    OversizeInput { len: usize },

    #[error("unexpected end of data at offset {offset:#06X} (image is {len} bytes)")]
    OutOfData { offset: usize, len: usize },
}
