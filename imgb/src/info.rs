//! Image inspection: decode and display format and geometry.

use std::path::Path;

use serde::Serialize;

use crate::InfoArgs;
use crate::inputs;

/// Run the `info` subcommand.
pub fn run(args: InfoArgs) -> anyhow::Result<()> {
    let files = inputs::expand_inputs(&args.files)?;

    if files.is_empty() {
        anyhow::bail!("no image files found");
    }

    let multi = files.len() > 1;

    for (i, path) in files.iter().enumerate() {
        if multi && !args.json {
            if i > 0 {
                println!();
            }
            println!("{}:", path.display());
        }

        match inspect_file(path) {
            Ok(info) => {
                if args.json {
                    println!("{}", serde_json::to_string_pretty(&info)?);
                } else {
                    print_info(&info);
                }
            }
            Err(e) => {
                eprintln!("  error: {e}");
            }
        }
    }

    Ok(())
}

/// Decode a single file and return structured info.
fn inspect_file(path: &Path) -> anyhow::Result<ImageInfoDisplay> {
    let data = std::fs::read(path)?;
    let file_size = data.len() as u64;

    let output = imgbridge::DecodeRequest::new(&data).decode()?;

    Ok(ImageInfoDisplay {
        path: path.display().to_string(),
        format: format!("{:?}", output.format),
        mime_type: output.format.mime_type().to_string(),
        rows: output.rows(),
        cols: output.cols(),
        channels: output.channels(),
        layout: format!("{:?}", output.image.layout()),
        file_size,
    })
}

#[derive(Debug, Serialize)]
struct ImageInfoDisplay {
    path: String,
    format: String,
    mime_type: String,
    rows: usize,
    cols: usize,
    channels: usize,
    layout: String,
    file_size: u64,
}

fn print_info(info: &ImageInfoDisplay) {
    println!("  Format:       {} ({})", info.format, info.mime_type);
    println!("  Dimensions:   {}x{} (cols x rows)", info.cols, info.rows);
    println!("  Channels:     {} ({})", info.channels, info.layout);
    println!("  File size:    {}", inputs::format_size(info.file_size));
}
