use vmdis_common::{Renderer, Token};

use crate::{Columns, RenderOptions};

/// Renders the listing page markup.
pub struct HtmlRenderer {
    options: RenderOptions,
    out: String,
    /// Index of the next token within the current line.
    slot: usize,
}

impl HtmlRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            out: String::new(),
            slot: 0,
        }
    }

    pub fn into_output(self) -> String {
        self.out
    }

    fn write_hex(&mut self, token: &Token) {
        let hex = format!("<span class=\"style_hex\">${}</span>", token.text());
        self.out.push_str(&hex);
    }

    fn write_stylesheet(&mut self) {
        let palette = self.options.palette;
        let stylesheet = format!(
            "<style>.style_hex{{color:{}}}.style_keyword{{color:{}}}\
             .style_type{{color:{}}}.style_addr{{color:{}}}.style_error{{color:{}}}</style>",
            palette.hex.to_hex(),
            palette.keyword.to_hex(),
            palette.type_name.to_hex(),
            palette.address.to_hex(),
            palette.error.to_hex(),
        );
        self.out.push_str(&stylesheet);
    }

    fn prefix(&mut self, token: &Token) {
        let columns = self.options.columns;
        let any = columns.intersects(Columns::ADDRESS | Columns::OPCODE);
        if self.slot == 0 && any {
            self.out.push_str("<span class=\"no_select\">");
        }
        if columns.shows_slot(self.slot) {
            self.write_hex(token);
            self.out.push('\t');
        }
        if self.slot == 1 && any {
            self.out.push_str("</span>");
        }
    }
}

impl Renderer for HtmlRenderer {
    fn begin(&mut self) {
        self.slot = 0;
        if self.options.stylesheet {
            self.write_stylesheet();
        }
        self.out.push_str("<pre>");
        if self.options.header {
            self.out.push_str("<h2>Displaying Disassembly</h2>");
        }
        self.out.push_str("<div class=\"DisassemblyBox\">");
        if self.options.header {
            let caption = self.options.columns.caption();
            self.out.push_str(&format!("<span class='no_select'>{caption}</span><hr>"));
        }
    }

    fn token(&mut self, token: &Token) {
        if self.slot < 2 {
            self.prefix(token);
            self.slot += 1;
            return;
        }

        match token {
            Token::Keyword(keyword) => {
                let keyword = format!("<span class=\"style_keyword\">{keyword}</span>\t");
                self.out.push_str(&keyword);
            }
            Token::HexLiteral { .. } => self.write_hex(token),
            Token::TypeName(name) => {
                self.out.push_str(&format!("<span class=\"style_type\">{name}</span>"));
            }
            Token::VarName(_) => self.out.push_str(&token.text()),
            Token::VarAddress(_) => {
                let addr = format!("<span class=style_addr>{}</span>", token.text());
                self.out.push_str(&addr);
            }
            Token::RawText(",") => self.out.push_str(", "),
            Token::RawText(text) => self.out.push_str(text),
            Token::UnknownMarker(unknown) => self.out.push_str(unknown.text()),
            Token::LineBreak => {
                self.out.push_str("<br/>");
                self.slot = 0;
                return;
            }
        }
        self.slot += 1;
    }

    fn end(&mut self) {
        self.out.push_str("</div></pre>");
    }

    fn oversize(&mut self, len: usize) {
        if self.options.stylesheet {
            self.write_stylesheet();
        }
        let banner = format!(
            "<h2><span class='style_error'>Error</span></h2> ROM size exceeded 16-bit integer limit.\
             <span class=\"small\"> (Got {len} bytes)</span>"
        );
        self.out.push_str(&banner);
    }
}
