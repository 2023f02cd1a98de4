use js_sys::Uint8Array;
use wasm_bindgen::prelude::*;

use crate::{render, OutputFormat, RenderOptions};

/// Listing markup for a host page to place into its output element.
#[wasm_bindgen]
pub fn disassemble_html(image: Uint8Array) -> String {
    let bytes = image.to_vec();
    let options = RenderOptions::builder().format(OutputFormat::Html).build();
    let rendered = render(&bytes, &options);
    if let Some(err) = rendered.error {
        log::warn!("disassembly failed: {err}");
    }
    rendered.output
}
