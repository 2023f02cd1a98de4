use vmdis_common::{Token, Unknown};

use crate::{ByteCursor, DecodeError};

/// A value type named by `vnew`'s one-byte type field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeId {
    U8,
    U16,
    I16,
    Void,
    Unknown(u8),
}

impl TypeId {
    pub fn from_u8(byte: u8) -> Self {
        match byte {
            0x00 => TypeId::U8,
            0x01 => TypeId::U16,
            0x02 => TypeId::I16,
            0x03 => TypeId::Void,
            other => TypeId::Unknown(other),
        }
    }

    pub fn name(&self) -> Option<&'static str> {
        match self.token() {
            Token::TypeName(name) => Some(name),
            _ => None,
        }
    }

    fn token(&self) -> Token {
        match *self {
            TypeId::U8 => Token::TypeName("u8"),
            TypeId::U16 => Token::TypeName("u16"),
            TypeId::I16 => Token::TypeName("i16"),
            TypeId::Void => Token::TypeName("void"),
            TypeId::Unknown(byte) => Token::UnknownMarker(Unknown::Type(byte)),
        }
    }
}

/// One side of an offset expression.
///
/// Tag byte: 0 = literal, 1 = variable, 2 = variable address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OffsetOperand {
    Literal(u16),
    VarRef(u16),
    VarAddr(u16),
    Unknown { tag: u8, data: u16 },
}

impl OffsetOperand {
    pub fn from_parts(tag: u8, data: u16) -> Self {
        match tag {
            0x00 => OffsetOperand::Literal(data),
            0x01 => OffsetOperand::VarRef(data),
            0x02 => OffsetOperand::VarAddr(data),
            tag => OffsetOperand::Unknown { tag, data },
        }
    }

    fn token(&self) -> Token {
        match *self {
            OffsetOperand::Literal(value) => Token::hex4(value),
            OffsetOperand::VarRef(id) => Token::VarName(id),
            OffsetOperand::VarAddr(id) => Token::VarAddress(id),
            OffsetOperand::Unknown { tag, .. } => Token::UnknownMarker(Unknown::OffsetOperand(tag)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OffsetOp {
    Add,
    Sub,
}

impl OffsetOp {
    /// 0 subtracts, anything else adds.
    pub fn from_u8(byte: u8) -> Self {
        if byte == 0 {
            OffsetOp::Sub
        } else {
            OffsetOp::Add
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            OffsetOp::Add => "+",
            OffsetOp::Sub => "-",
        }
    }
}

/// Compound addressing operand, rendered `[lhs+rhs]` or `[lhs-rhs]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OffsetExpr {
    pub lhs: OffsetOperand,
    pub op: OffsetOp,
    pub rhs: OffsetOperand,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operand {
    /// Immediate; `width` is the encoded size in bytes.
    Literal { value: u16, width: u8 },
    VarRef(u16),
    VarAddr(u16),
    StackPop,
    Offset(OffsetExpr),
    /// Absolute address or constant destination written as a bare number.
    RawAddress(u16),
    /// `*VAR_xxxx`
    Deref(u16),
    Type(TypeId),
}

impl Operand {
    /// Number of operand bytes this operand occupied in the image.
    pub fn encoded_len(&self) -> usize {
        match self {
            Operand::Literal { width, .. } => *width as usize,
            Operand::VarRef(_)
            | Operand::VarAddr(_)
            | Operand::RawAddress(_)
            | Operand::Deref(_) => 2,
            Operand::Offset(_) => crate::OFFSET_EXPR_LEN,
            Operand::Type(_) => 1,
            Operand::StackPop => 0,
        }
    }

    pub fn push_tokens(&self, out: &mut Vec<Token>) {
        match self {
            Operand::Literal { value, width } => out.push(Token::HexLiteral {
                value: *value,
                width: width * 2,
            }),
            Operand::VarRef(id) => out.push(Token::VarName(*id)),
            Operand::VarAddr(id) => out.push(Token::VarAddress(*id)),
            Operand::StackPop => out.push(Token::Keyword("pop")),
            Operand::RawAddress(value) => out.push(Token::hex4(*value)),
            Operand::Deref(id) => {
                out.push(Token::RawText("*"));
                out.push(Token::VarName(*id));
            }
            Operand::Type(type_id) => out.push(type_id.token()),
            Operand::Offset(expr) => {
                out.push(Token::RawText("["));
                out.push(expr.lhs.token());
                out.push(Token::RawText(expr.op.symbol()));
                out.push(expr.rhs.token());
                out.push(Token::RawText("]"));
            }
        }
    }
}

// Operand readers. Each consumes a fixed number of bytes.

pub(crate) fn literal(cursor: &mut ByteCursor<'_>) -> Result<Operand, DecodeError> {
    Ok(Operand::Literal {
        value: cursor.read_word()?,
        width: 2,
    })
}

pub(crate) fn var_ref(cursor: &mut ByteCursor<'_>) -> Result<Operand, DecodeError> {
    Ok(Operand::VarRef(cursor.read_word()?))
}

pub(crate) fn var_addr(cursor: &mut ByteCursor<'_>) -> Result<Operand, DecodeError> {
    Ok(Operand::VarAddr(cursor.read_word()?))
}

pub(crate) fn raw_address(cursor: &mut ByteCursor<'_>) -> Result<Operand, DecodeError> {
    Ok(Operand::RawAddress(cursor.read_word()?))
}

pub(crate) fn deref(cursor: &mut ByteCursor<'_>) -> Result<Operand, DecodeError> {
    Ok(Operand::Deref(cursor.read_word()?))
}

pub(crate) fn type_id(cursor: &mut ByteCursor<'_>) -> Result<Operand, DecodeError> {
    let type_id = TypeId::from_u8(cursor.read_byte()?);
    if let TypeId::Unknown(byte) = type_id {
        log::warn!("unknown type id {byte:#04X} at {:#06X}", cursor.position() - 1);
    }
    Ok(Operand::Type(type_id))
}

pub(crate) fn offset(cursor: &mut ByteCursor<'_>) -> Result<Operand, DecodeError> {
    // All seven bytes are read before anything is interpreted.
    let lhs_tag = cursor.read_byte()?;
    let lhs_data = cursor.read_word()?;
    let op = cursor.read_byte()?;
    let rhs_tag = cursor.read_byte()?;
    let rhs_data = cursor.read_word()?;

    let expr = OffsetExpr {
        lhs: OffsetOperand::from_parts(lhs_tag, lhs_data),
        op: OffsetOp::from_u8(op),
        rhs: OffsetOperand::from_parts(rhs_tag, rhs_data),
    };
    for side in [expr.lhs, expr.rhs] {
        if let OffsetOperand::Unknown { tag, .. } = side {
            log::warn!("unknown offset operand tag {tag:#04X}");
        }
    }
    Ok(Operand::Offset(expr))
}
