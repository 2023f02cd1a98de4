const USAGE: &str = "Usage: vmdis <image_path> [html|text|ansi] [--no-header]";

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let image_path = args.next().unwrap_or_else(|| {
        eprintln!("{USAGE}");
        std::process::exit(2);
    });

    let mut format = vmdis::OutputFormat::Text;
    let mut header = true;
    for arg in args {
        if arg == "--no-header" {
            header = false;
            continue;
        }
        format = vmdis::map_format_name(&arg).unwrap_or_else(|| {
            eprintln!("Unknown format '{}'. Supported: html, text, ansi", arg);
            std::process::exit(2);
        });
    }

    let image = std::fs::read(&image_path).unwrap_or_else(|err| {
        eprintln!("Failed to read image '{image_path}': {err}");
        std::process::exit(1);
    });
    log::info!("Disassembling '{}' ({} bytes)", image_path, image.len());

    let options = vmdis::options_for(format, header);
    if let Err(err) = vmdis::run(&options, &image) {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}
