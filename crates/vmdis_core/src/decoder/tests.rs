use super::*;
use crate::{OffsetExpr, OffsetOp, OffsetOperand, TypeId};
use vmdis_common::{Token, Unknown};

fn image(opcode: u16, operands: &[u8]) -> Vec<u8> {
    let mut bytes = opcode.to_le_bytes().to_vec();
    bytes.extend_from_slice(operands);
    bytes
}

fn concat_bytes(a: &[u8], b: &[u8]) -> Vec<u8> {
    [a, b].concat()
}

/// Decode one instruction and require it to consume the whole image.
fn decode_exact(opcode: u16, operands: &[u8]) -> Instruction {
    let bytes = image(opcode, operands);
    let mut cursor = ByteCursor::new(&bytes);
    let instruction = decode_instruction(&mut cursor)
        .unwrap_or_else(|err| panic!("{opcode:04X}: {err}"));
    assert_eq!(cursor.position(), bytes.len(), "{opcode:04X} length");
    assert!(!cursor.has_more());
    assert_eq!(instruction.byte_len(), bytes.len());
    assert_eq!(instruction_len(opcode), bytes.len());
    instruction
}

fn body(opcode: u16, operands: &[u8]) -> Vec<Token> {
    decode_exact(opcode, operands).body_tokens()
}

const OFFSET_LIT_ADD_VAR: [u8; 7] = [0x00, 0x10, 0x00, 0x01, 0x01, 0x20, 0x00];
const OFFSET_ADDR_SUB_LIT: [u8; 7] = [0x02, 0x03, 0x00, 0x00, 0x00, 0x04, 0x00];

fn offset_lit_add_var() -> Vec<Token> {
    vec![
        Token::RawText("["),
        Token::hex4(0x0010),
        Token::RawText("+"),
        Token::VarName(0x0020),
        Token::RawText("]"),
    ]
}

fn offset_addr_sub_lit() -> Vec<Token> {
    vec![
        Token::RawText("["),
        Token::VarAddress(0x0003),
        Token::RawText("-"),
        Token::hex4(0x0004),
        Token::RawText("]"),
    ]
}

fn concat(parts: &[Vec<Token>]) -> Vec<Token> {
    parts.concat()
}

#[test]
fn operandless_opcodes() {
    let table: &[(u16, &str)] = &[
        (0x0000, "nop"),
        (0x0001, "ret"),
        (0x0002, "halt"),
        (0x0A00, "inc"),
        (0x0A01, "dec"),
        (0x0A02, "add"),
        (0x0A03, "sub"),
        (0x0A04, "div"),
        (0x0A05, "mul"),
        (0x0A06, "mod"),
        (0x0AA0, "and"),
        (0x0AA1, "or"),
        (0x0AA2, "xor"),
        (0x0AA3, "not"),
        (0x0AB0, "lsr"),
        (0x0AB1, "rsr"),
        (0x0AC0, "cmp"),
        (0x0AC1, "ncmp"),
        (0x0AD0, "equ"),
        (0x0AD1, "neq"),
        (0x0AD2, "lwr"),
        (0x0AD3, "lwr_equ"),
        (0x0AD4, "grt"),
        (0x0AD5, "grt_equ"),
        (0x2100, "pop"),
    ];
    for &(opcode, mnemonic) in table {
        let instruction = decode_exact(opcode, &[]);
        assert_eq!(instruction.mnemonic, Some(mnemonic), "{opcode:04X}");
        assert!(instruction.operands.is_empty());
        assert_eq!(instruction_len(opcode), 2);
    }
}

#[test]
fn vnew_declares_typed_variable() {
    assert_eq!(
        body(0x0500, &[0x34, 0x12, 0x01]),
        vec![
            Token::Keyword("vnew"),
            Token::VarName(0x1234),
            Token::RawText(","),
            Token::TypeName("u16"),
        ]
    );
}

#[test]
fn vnew_with_unknown_type_keeps_decoding() {
    let bytes = [0x00, 0x05, 0x01, 0x00, 0x07, 0x01, 0x00];
    let listing = crate::disassemble(&bytes).unwrap();
    let vnew = &listing.instructions()[0];
    assert_eq!(vnew.operands[1], Operand::Type(TypeId::Unknown(7)));
    assert_eq!(
        vnew.body_tokens().last(),
        Some(&Token::UnknownMarker(Unknown::Type(7)))
    );
    assert_eq!(listing.instructions()[1].mnemonic, Some("ret"));
}

#[test]
fn alloc_and_free() {
    assert_eq!(
        body(0x0900, &[0x01, 0x00, 0x00, 0x01]),
        vec![
            Token::Keyword("alloc"),
            Token::VarName(0x0001),
            Token::COMMA,
            Token::hex4(0x0100),
        ]
    );
    assert_eq!(
        body(0xFFF0, &[0x02, 0x00]),
        vec![Token::Keyword("drop"), Token::VarName(0x0002)]
    );
    assert_eq!(
        body(0xFFF1, &[0x02, 0x00]),
        vec![Token::Keyword("free"), Token::VarName(0x0002)]
    );
    assert_eq!(
        body(0xFFF2, &[0x02, 0x00, 0x40, 0x00]),
        vec![
            Token::Keyword("free"),
            Token::VarName(0x0002),
            Token::COMMA,
            Token::hex4(0x0040),
        ]
    );
    assert_eq!(
        body(0xFFF3, &concat_bytes(&OFFSET_LIT_ADD_VAR, &[0x40, 0x00])),
        concat(&[
            vec![Token::Keyword("free")],
            offset_lit_add_var(),
            vec![Token::COMMA, Token::hex4(0x0040)],
        ])
    );
}

#[test]
fn str_immediate_encodings_are_equivalent() {
    let operands = [0xCD, 0xAB, 0xEF, 0xBE];
    let expected = vec![
        Token::Keyword("str"),
        Token::VarName(0xABCD),
        Token::COMMA,
        Token::hex4(0xBEEF),
    ];
    for opcode in 0x1000..=0x1002 {
        assert_eq!(body(opcode, &operands), expected, "{opcode:04X}");
    }
}

#[test]
fn str_sources() {
    let dest = [0x01, 0x00];
    assert_eq!(
        body(0x1003, &[0x01, 0x00, 0x02, 0x00]),
        vec![
            Token::Keyword("str"),
            Token::VarName(1),
            Token::COMMA,
            Token::VarName(2),
        ]
    );
    assert_eq!(
        body(0x1004, &[0x01, 0x00, 0x02, 0x00]),
        vec![
            Token::Keyword("str"),
            Token::VarName(1),
            Token::COMMA,
            Token::VarAddress(2),
        ]
    );
    assert_eq!(
        body(0x1005, &dest),
        vec![
            Token::Keyword("str"),
            Token::VarName(1),
            Token::COMMA,
            Token::Keyword("pop"),
        ]
    );
}

#[test]
fn mov_to_variable() {
    for opcode in 0x1100..=0x1102 {
        assert_eq!(
            body(opcode, &[0x01, 0x00, 0x05, 0x00]),
            vec![
                Token::Keyword("mov"),
                Token::VarName(1),
                Token::COMMA,
                Token::hex4(5),
            ]
        );
    }
    assert_eq!(
        decode_exact(0x1103, &[0x01, 0x00, 0x02, 0x00]).operands,
        vec![Operand::VarRef(1), Operand::VarRef(2)]
    );
    assert_eq!(
        decode_exact(0x1104, &[0x01, 0x00, 0x02, 0x00]).operands,
        vec![Operand::VarRef(1), Operand::VarAddr(2)]
    );
    assert_eq!(
        decode_exact(0x1105, &[0x01, 0x00]).operands,
        vec![Operand::VarRef(1), Operand::StackPop]
    );
    assert_eq!(
        body(0x1106, &concat_bytes(&[0x01, 0x00], &OFFSET_LIT_ADD_VAR)),
        concat(&[
            vec![Token::Keyword("mov"), Token::VarName(1), Token::COMMA],
            offset_lit_add_var(),
        ])
    );
}

#[test]
fn mov_to_raw_address() {
    for opcode in 0x1110..=0x1112 {
        assert_eq!(
            decode_exact(opcode, &[0x00, 0x80, 0x05, 0x00]).operands,
            vec![
                Operand::RawAddress(0x8000),
                Operand::Literal { value: 5, width: 2 },
            ]
        );
    }
    assert_eq!(
        body(0x1113, &[0x00, 0x80, 0x02, 0x00]),
        vec![
            Token::Keyword("mov"),
            Token::hex4(0x8000),
            Token::COMMA,
            Token::VarName(2),
        ]
    );
    assert_eq!(
        decode_exact(0x1114, &[0x00, 0x80, 0x02, 0x00]).operands,
        vec![Operand::RawAddress(0x8000), Operand::VarAddr(2)]
    );
    assert_eq!(
        decode_exact(0x1115, &[0x00, 0x80]).operands,
        vec![Operand::RawAddress(0x8000), Operand::StackPop]
    );
    assert_eq!(
        body(0x1116, &concat_bytes(&[0x00, 0x80], &OFFSET_ADDR_SUB_LIT)),
        concat(&[
            vec![Token::Keyword("mov"), Token::hex4(0x8000), Token::COMMA],
            offset_addr_sub_lit(),
        ])
    );
}

#[test]
fn mov_to_offset() {
    for opcode in 0x1120..=0x1122 {
        assert_eq!(
            body(opcode, &concat_bytes(&OFFSET_LIT_ADD_VAR, &[0x09, 0x00])),
            concat(&[
                vec![Token::Keyword("mov")],
                offset_lit_add_var(),
                vec![Token::COMMA, Token::hex4(9)],
            ])
        );
    }
    assert_eq!(
        body(0x1125, &OFFSET_LIT_ADD_VAR),
        concat(&[
            vec![Token::Keyword("mov")],
            offset_lit_add_var(),
            vec![Token::COMMA, Token::Keyword("pop")],
        ])
    );
    assert_eq!(
        body(0x1126, &concat_bytes(&OFFSET_LIT_ADD_VAR, &OFFSET_ADDR_SUB_LIT)),
        concat(&[
            vec![Token::Keyword("mov")],
            offset_lit_add_var(),
            vec![Token::COMMA],
            offset_addr_sub_lit(),
        ])
    );
}

#[test]
fn mov_1123_and_1124_decode_like_raw_address_forms() {
    let operands = [0x00, 0x80, 0x02, 0x00];
    assert_eq!(
        decode_exact(0x1123, &operands).operands,
        decode_exact(0x1113, &operands).operands
    );
    assert_eq!(
        decode_exact(0x1124, &operands).operands,
        decode_exact(0x1114, &operands).operands
    );
    assert_eq!(instruction_len(0x1123), 6);
    assert_eq!(instruction_len(0x1124), 6);
}

#[test]
fn ptr_forms() {
    assert_eq!(
        decode_exact(0x1200, &[0x01, 0x00, 0x02, 0x00]).operands,
        vec![Operand::VarRef(1), Operand::Literal { value: 2, width: 2 }]
    );
    assert_eq!(
        decode_exact(0x1201, &[0x01, 0x00, 0x02, 0x00]).operands,
        vec![Operand::VarRef(1), Operand::VarRef(2)]
    );
    assert_eq!(
        body(0x1202, &[0x01, 0x00, 0x02, 0x00]),
        vec![
            Token::Keyword("ptr"),
            Token::VarName(1),
            Token::COMMA,
            Token::RawText("*"),
            Token::VarName(2),
        ]
    );
    assert_eq!(
        decode_exact(0x1203, &[0x01, 0x00]).operands,
        vec![Operand::VarRef(1), Operand::StackPop]
    );
    assert_eq!(
        decode_exact(0x1204, &concat_bytes(&[0x01, 0x00], &OFFSET_LIT_ADD_VAR)).operands,
        vec![
            Operand::VarRef(1),
            Operand::Offset(OffsetExpr {
                lhs: OffsetOperand::Literal(0x0010),
                op: OffsetOp::Add,
                rhs: OffsetOperand::VarRef(0x0020),
            }),
        ]
    );
}

#[test]
fn branches_take_raw_addresses() {
    assert_eq!(
        body(0x1500, &[0x10, 0x00]),
        vec![Token::Keyword("goto"), Token::hex4(0x0010)]
    );
    assert_eq!(
        body(0x1510, &[0x20, 0x01]),
        vec![Token::Keyword("call"), Token::hex4(0x0120)]
    );
}

#[test]
fn push_forms() {
    for opcode in 0x2000..=0x2002 {
        assert_eq!(
            body(opcode, &[0xFF, 0x00]),
            vec![Token::Keyword("push"), Token::hex4(0x00FF)]
        );
    }
    assert_eq!(
        body(0x2003, &[0x07, 0x00]),
        vec![Token::Keyword("push"), Token::VarName(7)]
    );
    assert_eq!(
        body(0x2004, &[0x07, 0x00]),
        vec![Token::Keyword("push"), Token::VarAddress(7)]
    );
}

#[test]
fn unknown_opcode_consumes_only_the_opcode_word() {
    let bytes = image(0x00FF, &[0x01, 0x00]);
    let mut cursor = ByteCursor::new(&bytes);
    let instruction = decode_instruction(&mut cursor).unwrap();
    assert!(!instruction.is_known());
    assert_eq!(cursor.position(), 2);
    assert_eq!(
        instruction.body_tokens(),
        vec![Token::UnknownMarker(Unknown::Opcode)]
    );
    assert_eq!(instruction_len(0x00FF), 2);
    assert_eq!(instruction_len(0x0A07), 2);
}

#[test]
fn truncated_operands_are_out_of_data() {
    let bytes = image(0x0900, &[0x01, 0x00, 0x00]);
    let mut cursor = ByteCursor::new(&bytes);
    assert_eq!(
        decode_instruction(&mut cursor),
        Err(DecodeError::OutOfData { offset: 5, len: 5 })
    );
}

#[test]
fn instruction_lengths() {
    let table: &[(u16, usize)] = &[
        (0x0500, 5),
        (0x0900, 6),
        (0x1000, 6),
        (0x1005, 4),
        (0x1106, 11),
        (0x1116, 11),
        (0x1120, 11),
        (0x1125, 9),
        (0x1126, 16),
        (0x1204, 11),
        (0x1500, 4),
        (0x2004, 4),
        (0xFFF3, 11),
    ];
    for &(opcode, len) in table {
        assert_eq!(instruction_len(opcode), len, "{opcode:04X}");
    }
}

#[test]
fn mov_with_unknown_offset_tag_keeps_decoding() {
    // mov VAR_0001, [?+VAR_0020] then ret
    let bytes = [
        0x06, 0x11, 0x01, 0x00, 0x05, 0x10, 0x00, 0x01, 0x01, 0x20, 0x00, //
        0x01, 0x00,
    ];
    let listing = crate::disassemble(&bytes).unwrap();
    assert_eq!(listing.len(), 2);

    let mov = &listing.instructions()[0];
    assert_eq!(mov.byte_len(), 11);
    assert_eq!(
        mov.operands[1],
        Operand::Offset(OffsetExpr {
            lhs: OffsetOperand::Unknown { tag: 5, data: 0x0010 },
            op: OffsetOp::Add,
            rhs: OffsetOperand::VarRef(0x0020),
        })
    );
    assert!(mov
        .body_tokens()
        .contains(&Token::UnknownMarker(Unknown::OffsetOperand(5))));

    let ret = &listing.instructions()[1];
    assert_eq!(ret.address, 11);
    assert_eq!(ret.mnemonic, Some("ret"));
}

#[test]
fn every_opcode_length_matches_its_decode() {
    for opcode in 0..=u16::MAX {
        let len = instruction_len(opcode);
        assert!((OPCODE_LEN..=MAX_INSTRUCTION_LEN).contains(&len), "{opcode:04X}");
        let mut bytes = vec![0u8; len];
        bytes[..OPCODE_LEN].copy_from_slice(&opcode.to_le_bytes());
        let mut cursor = ByteCursor::new(&bytes);
        assert!(decode_instruction(&mut cursor).is_ok(), "{opcode:04X}");
        assert_eq!(cursor.position(), len, "{opcode:04X}");
    }
}
