use anyhow::{Context, Result};
use vmdis_render::{render, RenderOptions};

pub use vmdis_render::{map_format_name, OutputFormat};

/// Disassemble `image` and print the listing to stdout.
///
/// The oversize banner is printed even though the run fails.
pub fn run(options: &RenderOptions, image: &[u8]) -> Result<()> {
    let rendered = render(image, options);
    print!("{}", rendered.output);
    match rendered.error {
        Some(err) => Err(err).context("failed to disassemble image"),
        None => Ok(()),
    }
}

pub fn options_for(format: OutputFormat, header: bool) -> RenderOptions {
    RenderOptions::builder()
        .format(format)
        .header(header)
        .stylesheet(format == OutputFormat::Html)
        .build()
}
