use vmdis_common::{Renderer, Token};

use crate::{decode_instruction, ByteCursor, DecodeError, Instruction, MAX_IMAGE_LEN};

/// Forward-only instruction iterator over one image.
///
/// Yields instructions until the image is exhausted. An image of
/// `MAX_IMAGE_LEN` bytes or more yields a single `OversizeInput` error and
/// nothing else. After the first error it yields nothing more. A fresh run
/// needs a fresh `Disassembler`.
pub struct Disassembler<'a> {
    cursor: ByteCursor<'a>,
    done: bool,
}

impl<'a> Disassembler<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            cursor: ByteCursor::new(bytes),
            done: false,
        }
    }

    pub fn position(&self) -> usize {
        self.cursor.position()
    }
}

impl Iterator for Disassembler<'_> {
    type Item = Result<Instruction, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || !self.cursor.has_more() {
            self.done = true;
            return None;
        }
        if self.cursor.len() >= MAX_IMAGE_LEN {
            self.done = true;
            log::error!("refusing {} byte image", self.cursor.len());
            return Some(Err(DecodeError::OversizeInput {
                len: self.cursor.len(),
            }));
        }
        let result = decode_instruction(&mut self.cursor);
        if result.is_err() {
            self.done = true;
        }
        Some(result)
    }
}

/// A fully decoded image.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Listing {
    instructions: Vec<Instruction>,
}

impl Listing {
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Flat token stream, one line per instruction.
    pub fn tokens(&self) -> Vec<Token> {
        let mut out = Vec::new();
        for instruction in &self.instructions {
            instruction.push_line(&mut out);
        }
        out
    }

    pub fn render<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        renderer.begin();
        for token in self.tokens() {
            renderer.token(&token);
        }
        renderer.end();
    }
}

/// Decode a whole image.
///
/// Nothing is returned for an image of `MAX_IMAGE_LEN` bytes or more, nor for
/// one whose last instruction is truncated.
pub fn disassemble(bytes: &[u8]) -> Result<Listing, DecodeError> {
    let instructions = Disassembler::new(bytes).collect::<Result<Vec<_>, _>>()?;
    log::debug!(
        "decoded {} instructions from {} bytes",
        instructions.len(),
        bytes.len()
    );
    Ok(Listing { instructions })
}

/// Decode `bytes` and feed the result to `renderer`.
///
/// An oversize image is reported through `Renderer::oversize` only. A
/// truncated image renders nothing. Both still return the error.
pub fn render_image<R: Renderer + ?Sized>(
    bytes: &[u8],
    renderer: &mut R,
) -> Result<(), DecodeError> {
    match disassemble(bytes) {
        Ok(listing) => {
            listing.render(renderer);
            Ok(())
        }
        Err(err @ DecodeError::OversizeInput { len }) => {
            renderer.oversize(len);
            Err(err)
        }
        Err(err) => Err(err),
    }
}
