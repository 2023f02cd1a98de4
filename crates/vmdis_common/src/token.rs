use std::borrow::Cow;

/// What a listing marker lost confidence about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Unknown {
    /// The opcode word has no table entry.
    Opcode,
    /// `vnew` type byte outside `0..=3`.
    Type(u8),
    /// Offset sub-operand tag outside `0..=2`.
    OffsetOperand(u8),
}

impl Unknown {
    pub fn text(&self) -> &'static str {
        match self {
            Unknown::Opcode => "unknown",
            Unknown::Type(_) => "UNKNOWN TYPE",
            Unknown::OffsetOperand(_) => "UNKNOWN_DATA",
        }
    }
}

/// A single semantically tagged piece of a listing line.
///
/// Tokens carry meaning, not markup. A line is laid out as
/// `HexLiteral(address) HexLiteral(opcode) Keyword(mnemonic) operands.. LineBreak`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Token {
    Keyword(&'static str),
    /// `width` is the display width in hex digits.
    HexLiteral { value: u16, width: u8 },
    TypeName(&'static str),
    VarName(u16),
    /// Address-of a variable, `&VAR_xxxx`.
    VarAddress(u16),
    /// Punctuation: `,` `[` `]` `+` `-` `*`.
    RawText(&'static str),
    LineBreak,
    UnknownMarker(Unknown),
}

impl Token {
    pub const COMMA: Token = Token::RawText(",");

    pub const fn hex4(value: u16) -> Token {
        Token::HexLiteral { value, width: 4 }
    }

    /// Markup-free text of the token. Hex literals have no `$` prefix, that
    /// convention belongs to renderers.
    pub fn text(&self) -> Cow<'static, str> {
        match *self {
            Token::Keyword(s) | Token::TypeName(s) | Token::RawText(s) => Cow::Borrowed(s),
            Token::HexLiteral { value, width } => Cow::Owned(hex_digits(value, width)),
            Token::VarName(id) => Cow::Owned(var_name(id)),
            Token::VarAddress(id) => Cow::Owned(format!("&{}", var_name(id))),
            Token::LineBreak => Cow::Borrowed("\n"),
            Token::UnknownMarker(unknown) => Cow::Borrowed(unknown.text()),
        }
    }
}

/// Uppercase, zero-padded to `width` digits.
pub fn hex_digits(value: u16, width: u8) -> String {
    format!("{:0width$X}", value, width = width as usize)
}

pub fn var_name(id: u16) -> String {
    format!("VAR_{id:04X}")
}
