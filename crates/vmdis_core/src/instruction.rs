use vmdis_common::{Token, Unknown};

use crate::{Operand, OPCODE_LEN};

/// One decoded instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instruction {
    /// Byte offset of the opcode word.
    pub address: u16,
    pub opcode: u16,
    /// `None` when the opcode word has no table entry.
    pub mnemonic: Option<&'static str>,
    pub operands: Vec<Operand>,
}

impl Instruction {
    pub fn is_known(&self) -> bool {
        self.mnemonic.is_some()
    }

    /// Opcode word plus every operand byte.
    pub fn byte_len(&self) -> usize {
        OPCODE_LEN + self.operands.iter().map(Operand::encoded_len).sum::<usize>()
    }

    /// Mnemonic followed by comma separated operands.
    pub fn body_tokens(&self) -> Vec<Token> {
        let mut out = Vec::new();
        self.push_body(&mut out);
        out
    }

    /// A complete listing line: address, opcode, body, line break.
    pub fn push_line(&self, out: &mut Vec<Token>) {
        out.push(Token::hex4(self.address));
        out.push(Token::hex4(self.opcode));
        self.push_body(out);
        out.push(Token::LineBreak);
    }

    fn push_body(&self, out: &mut Vec<Token>) {
        match self.mnemonic {
            Some(mnemonic) => out.push(Token::Keyword(mnemonic)),
            None => out.push(Token::UnknownMarker(Unknown::Opcode)),
        }
        for (i, operand) in self.operands.iter().enumerate() {
            if i > 0 {
                out.push(Token::COMMA);
            }
            operand.push_tokens(out);
        }
    }
}
