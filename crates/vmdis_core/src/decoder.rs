use crate::operand::{deref, literal, offset, raw_address, type_id, var_addr, var_ref};
use crate::{ByteCursor, DecodeError, Instruction, Operand, OPCODE_LEN};

#[cfg(test)]
mod tests;

const ARITHMETIC: [&str; 7] = ["inc", "dec", "add", "sub", "div", "mul", "mod"];
const BITWISE: [&str; 4] = ["and", "or", "xor", "not"];
const SHIFT: [&str; 2] = ["lsr", "rsr"];
const COMPARE: [&str; 2] = ["cmp", "ncmp"];
const RELATION: [&str; 6] = ["equ", "neq", "lwr", "lwr_equ", "grt", "grt_equ"];

/// Longest encoding in the table: `mov [..], [..]`.
const MAX_INSTRUCTION_LEN: usize = OPCODE_LEN + 2 * crate::OFFSET_EXPR_LEN;

/// Decode the instruction starting at the cursor.
///
/// On success the cursor sits just past the last operand byte. Unknown opcode
/// words consume only themselves.
pub fn decode_instruction(cursor: &mut ByteCursor<'_>) -> Result<Instruction, DecodeError> {
    let address = u16::try_from(cursor.position())
        .map_err(|_| DecodeError::OversizeInput { len: cursor.len() })?;
    let opcode = cursor.read_word()?;
    let (mnemonic, operands) = decode_operands(opcode, cursor)?;

    match mnemonic {
        Some(mnemonic) => log::debug!("{address:04X}: {opcode:04X} {mnemonic}"),
        None => log::warn!("unknown opcode {opcode:04X} at {address:04X}"),
    }

    Ok(Instruction {
        address,
        opcode,
        mnemonic,
        operands,
    })
}

/// Encoded size of `opcode` including the opcode word itself.
///
/// Operand sizes depend only on the opcode value, so decoding against a
/// zeroed buffer yields the exact length. The buffer holds the longest
/// encoding in the table, so the decode cannot run out of data.
pub fn instruction_len(opcode: u16) -> usize {
    let mut image = [0u8; MAX_INSTRUCTION_LEN];
    image[..OPCODE_LEN].copy_from_slice(&opcode.to_le_bytes());
    let mut cursor = ByteCursor::new(&image);
    let decoded = decode_instruction(&mut cursor);
    debug_assert!(decoded.is_ok(), "{opcode:04X} longer than {MAX_INSTRUCTION_LEN} bytes");
    decoded.map_or(MAX_INSTRUCTION_LEN, |instruction| instruction.byte_len())
}

type Decoded = (Option<&'static str>, Vec<Operand>);

fn op(mnemonic: &'static str, operands: Vec<Operand>) -> Decoded {
    (Some(mnemonic), operands)
}

fn decode_operands(opcode: u16, c: &mut ByteCursor<'_>) -> Result<Decoded, DecodeError> {
    let decoded = match opcode {
        // 0000 - NOP
        0x0000 => op("nop", vec![]),
        // 0001 - RET
        0x0001 => op("ret", vec![]),
        // 0002 - HALT
        0x0002 => op("halt", vec![]),

        // 0500 - VNEW var, type
        0x0500 => op("vnew", vec![var_ref(c)?, type_id(c)?]),

        // 0900 - ALLOC var, size
        0x0900 => op("alloc", vec![var_ref(c)?, literal(c)?]),

        // 0A0x, 0AAx, 0ABx, 0ACx, 0ADx - ALU on the operand stack
        0x0A00..=0x0A06 => op(ARITHMETIC[(opcode - 0x0A00) as usize], vec![]),
        0x0AA0..=0x0AA3 => op(BITWISE[(opcode - 0x0AA0) as usize], vec![]),
        0x0AB0..=0x0AB1 => op(SHIFT[(opcode - 0x0AB0) as usize], vec![]),
        0x0AC0..=0x0AC1 => op(COMPARE[(opcode - 0x0AC0) as usize], vec![]),
        0x0AD0..=0x0AD5 => op(RELATION[(opcode - 0x0AD0) as usize], vec![]),

        // 1000..1002 - STR var, imm
        0x1000..=0x1002 => op("str", vec![var_ref(c)?, literal(c)?]),
        // 1003 - STR var, var
        0x1003 => op("str", vec![var_ref(c)?, var_ref(c)?]),
        // 1004 - STR var, &var
        0x1004 => op("str", vec![var_ref(c)?, var_addr(c)?]),
        // 1005 - STR var, pop
        0x1005 => op("str", vec![var_ref(c)?, Operand::StackPop]),

        // 1100..1106 - MOV var, src
        0x1100..=0x1102 => op("mov", vec![var_ref(c)?, literal(c)?]),
        0x1103 => op("mov", vec![var_ref(c)?, var_ref(c)?]),
        0x1104 => op("mov", vec![var_ref(c)?, var_addr(c)?]),
        0x1105 => op("mov", vec![var_ref(c)?, Operand::StackPop]),
        0x1106 => op("mov", vec![var_ref(c)?, offset(c)?]),

        // 1110..1116 - MOV addr, src
        0x1110..=0x1112 => op("mov", vec![raw_address(c)?, literal(c)?]),
        0x1113 => op("mov", vec![raw_address(c)?, var_ref(c)?]),
        0x1114 => op("mov", vec![raw_address(c)?, var_addr(c)?]),
        0x1115 => op("mov", vec![raw_address(c)?, Operand::StackPop]),
        0x1116 => op("mov", vec![raw_address(c)?, offset(c)?]),

        // 1120..1126 - MOV [offset], src
        0x1120..=0x1122 => op("mov", vec![offset(c)?, literal(c)?]),
        // 1123/1124 take a bare address destination like 1113/1114, not an
        // offset like their neighbours. Kept as encoded.
        0x1123 => op("mov", vec![raw_address(c)?, var_ref(c)?]),
        0x1124 => op("mov", vec![raw_address(c)?, var_addr(c)?]),
        0x1125 => op("mov", vec![offset(c)?, Operand::StackPop]),
        0x1126 => op("mov", vec![offset(c)?, offset(c)?]),

        // 1200..1204 - PTR var, src
        0x1200 => op("ptr", vec![var_ref(c)?, literal(c)?]),
        0x1201 => op("ptr", vec![var_ref(c)?, var_ref(c)?]),
        0x1202 => op("ptr", vec![var_ref(c)?, deref(c)?]),
        0x1203 => op("ptr", vec![var_ref(c)?, Operand::StackPop]),
        0x1204 => op("ptr", vec![var_ref(c)?, offset(c)?]),

        // 1500 - GOTO addr
        0x1500 => op("goto", vec![raw_address(c)?]),
        // 1510 - CALL addr
        0x1510 => op("call", vec![raw_address(c)?]),

        // 2000..2004 - PUSH src
        0x2000..=0x2002 => op("push", vec![literal(c)?]),
        0x2003 => op("push", vec![var_ref(c)?]),
        0x2004 => op("push", vec![var_addr(c)?]),
        // 2100 - POP
        0x2100 => op("pop", vec![]),

        // FFF0 - DROP var
        0xFFF0 => op("drop", vec![var_ref(c)?]),
        // FFF1 - FREE var
        0xFFF1 => op("free", vec![var_ref(c)?]),
        // FFF2 - FREE var, size
        0xFFF2 => op("free", vec![var_ref(c)?, literal(c)?]),
        // FFF3 - FREE [offset], size
        0xFFF3 => op("free", vec![offset(c)?, literal(c)?]),

        // No operand length is known, so nothing past the opcode word is consumed.
        _ => (None, vec![]),
    };
    Ok(decoded)
}
