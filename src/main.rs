use std::env;
use std::fs;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use howto_random::{gather, suggest_filename};

/// How the result leaves the process: an image file on disk plus a summary
/// for humans, or one JSON object on stdout for scripting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    File,
    Json,
}

fn parse_output_mode(mut args: impl Iterator<Item = String>) -> Result<OutputMode, String> {
    let mut mode = OutputMode::File;
    while let Some(arg) = args.next() {
        let value = if arg == "--output" {
            args.next()
                .ok_or("--output requires a value (file or json)")?
        } else if let Some(value) = arg.strip_prefix("--output=") {
            value.to_string()
        } else {
            return Err(format!("Unknown argument: {arg}"));
        };
        mode = match value.as_str() {
            "file" => OutputMode::File,
            "json" => OutputMode::Json,
            other => {
                return Err(format!(
                    "Unknown output mode: {other} (expected file or json)"
                ))
            }
        };
    }
    Ok(mode)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let mode = parse_output_mode(env::args().skip(1))?;

    let mut metadata = gather()?;
    match mode {
        OutputMode::File => {
            let filename = suggest_filename(&metadata);
            fs::write(&filename, metadata.image.data.as_deref().unwrap_or_default())?;
            println!(
                "Written to {filename}\nCopyright license seems to be {} with {}:\n\t{}\n\t{}\nHave a great day!",
                metadata.license.name,
                metadata.uploader.name,
                metadata.license.url,
                metadata.uploader.url
            );
        }
        OutputMode::Json => {
            if let Some(data) = metadata.image.data.take() {
                metadata.image.data_base64 = Some(STANDARD.encode(data));
            }
            println!("{}", serde_json::to_string(&metadata)?);
        }
    }

    Ok(())
}
