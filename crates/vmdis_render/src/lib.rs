mod html;
mod text;
#[cfg(feature = "wasm")]
mod wasm;

use bitflags::bitflags;
use typed_builder::TypedBuilder;

use vmdis_common::Color;
use vmdis_core::{render_image, DecodeError};

pub use html::HtmlRenderer;
pub use text::TextRenderer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Markup for the listing page: spans with `style_*` classes.
    Html,
    Text,
    /// `Text` with truecolor escapes from the palette.
    Ansi,
}

bitflags! {
    /// Prefix columns shown in front of each disassembled instruction.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Columns: u8 {
        const ADDRESS = 0b01;
        const OPCODE = 0b10;
    }
}

impl Columns {
    /// Whether prefix slot `slot` (0 = address, 1 = opcode) is visible.
    pub(crate) fn shows_slot(&self, slot: usize) -> bool {
        match slot {
            0 => self.contains(Columns::ADDRESS),
            1 => self.contains(Columns::OPCODE),
            _ => false,
        }
    }

    pub(crate) fn caption(&self) -> String {
        let mut caption = String::new();
        if self.contains(Columns::ADDRESS) {
            caption.push_str("Addr\t");
        }
        if self.contains(Columns::OPCODE) {
            caption.push_str("Op\t");
        }
        caption.push_str("Disassembled");
        caption
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub hex: Color,
    pub keyword: Color,
    pub type_name: Color,
    pub address: Color,
    pub error: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            hex: Color::CYAN,
            keyword: Color::ORANGE,
            type_name: Color::GREEN,
            address: Color::MAGENTA,
            error: Color::RED,
        }
    }
}

#[derive(Debug, Clone, TypedBuilder)]
pub struct RenderOptions {
    #[builder(default = OutputFormat::Text)]
    pub format: OutputFormat,
    #[builder(default = Columns::all())]
    pub columns: Columns,
    /// Title and column caption above the listing.
    #[builder(default = true)]
    pub header: bool,
    /// HTML only: prepend a `<style>` block built from the palette.
    #[builder(default = false)]
    pub stylesheet: bool,
    #[builder(default)]
    pub palette: Palette,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions::builder().build()
    }
}

/// Rendered output of one image. `output` is still meaningful when `error`
/// is set: an oversize image renders its error banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub output: String,
    pub error: Option<DecodeError>,
}

pub fn render(bytes: &[u8], options: &RenderOptions) -> Rendered {
    log::debug!("rendering {} bytes as {:?}", bytes.len(), options.format);
    let (output, result) = match options.format {
        OutputFormat::Html => {
            let mut renderer = HtmlRenderer::new(options.clone());
            let result = render_image(bytes, &mut renderer);
            (renderer.into_output(), result)
        }
        OutputFormat::Text | OutputFormat::Ansi => {
            let mut renderer = TextRenderer::new(options.clone());
            let result = render_image(bytes, &mut renderer);
            (renderer.into_output(), result)
        }
    };
    Rendered {
        output,
        error: result.err(),
    }
}

pub fn map_format_name(name: &str) -> Option<OutputFormat> {
    match name {
        "html" | "HTML" => Some(OutputFormat::Html),
        "text" | "txt" | "plain" => Some(OutputFormat::Text),
        "ansi" | "color" | "colour" => Some(OutputFormat::Ansi),
        _ => None,
    }
}
