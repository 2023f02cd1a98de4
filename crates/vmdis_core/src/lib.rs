mod cursor;
mod decoder;
mod error;
mod instruction;
mod listing;
mod operand;

pub use cursor::ByteCursor;
pub use decoder::{decode_instruction, instruction_len};
pub use error::DecodeError;
pub use instruction::Instruction;
pub use listing::{disassemble, render_image, Disassembler, Listing};
pub use operand::{OffsetExpr, OffsetOp, OffsetOperand, Operand, TypeId};

pub use vmdis_common::{Renderer, Token, Unknown};

/// Images of this many bytes or more are refused outright, keeping every
/// address printable as four hex digits. Fixed contract, not `u16::MAX + 1`.
pub const MAX_IMAGE_LEN: usize = 65355;
/// Width of the opcode word in bytes.
pub const OPCODE_LEN: usize = 2;
/// Compound offset operand: tag, data, operator, tag, data.
pub const OFFSET_EXPR_LEN: usize = 7;
