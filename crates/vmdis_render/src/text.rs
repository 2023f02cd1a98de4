use vmdis_common::{Color, Renderer, Token};

use crate::{OutputFormat, RenderOptions};

const RESET: &str = "\x1b[0m";

/// Tab separated terminal listing, optionally coloured.
pub struct TextRenderer {
    options: RenderOptions,
    out: String,
    slot: usize,
    /// A mnemonic was written and the operands still need their separator.
    pending_tab: bool,
}

impl TextRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            out: String::new(),
            slot: 0,
            pending_tab: false,
        }
    }

    pub fn into_output(self) -> String {
        self.out
    }

    fn coloured(&mut self, color: Color, text: &str) {
        if self.options.format == OutputFormat::Ansi {
            self.out.push_str(&format!("{}{text}{RESET}", color.ansi_fg()));
        } else {
            self.out.push_str(text);
        }
    }

    fn hex(&mut self, token: &Token) {
        let text = format!("${}", token.text());
        self.coloured(self.options.palette.hex, &text);
    }
}

impl Renderer for TextRenderer {
    fn begin(&mut self) {
        self.slot = 0;
        self.pending_tab = false;
        if self.options.header {
            let caption = self.options.columns.caption();
            self.out.push_str(&caption);
            self.out.push('\n');
        }
    }

    fn token(&mut self, token: &Token) {
        if self.slot < 2 {
            if self.options.columns.shows_slot(self.slot) {
                self.hex(token);
                self.out.push('\t');
            }
            self.slot += 1;
            return;
        }

        if *token == Token::LineBreak {
            self.out.push('\n');
            self.slot = 0;
            self.pending_tab = false;
            return;
        }
        if self.pending_tab {
            self.out.push('\t');
            self.pending_tab = false;
        }

        let palette = self.options.palette;
        match token {
            Token::Keyword(keyword) => {
                self.coloured(palette.keyword, keyword);
                self.pending_tab = true;
            }
            Token::HexLiteral { .. } => self.hex(token),
            Token::TypeName(name) => self.coloured(palette.type_name, name),
            Token::VarAddress(_) => self.coloured(palette.address, &token.text()),
            Token::UnknownMarker(unknown) => self.coloured(palette.error, unknown.text()),
            Token::RawText(",") => self.out.push_str(", "),
            _ => self.out.push_str(&token.text()),
        }
        self.slot += 1;
    }

    fn end(&mut self) {}

    fn oversize(&mut self, len: usize) {
        let text = format!("Error: ROM size exceeded 16-bit integer limit. (Got {len} bytes)");
        self.coloured(self.options.palette.error, &text);
        self.out.push('\n');
    }
}
