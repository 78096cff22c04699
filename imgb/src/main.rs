//! imgb: inspect and convert BMP, JPEG and PNG images.
//!
//! A thin command line over the imgbridge decode/encode pipeline. Set
//! `RUST_LOG=debug` to see dispatch decisions.

mod convert;
mod info;
mod inputs;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "imgb", version, about = "Inspect and convert BMP/JPEG/PNG images")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode images and display format and geometry.
    Info(InfoArgs),

    /// Decode an image and re-encode it in another format.
    Convert(ConvertArgs),
}

/// Arguments for the `info` subcommand.
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Input files, directories, or glob patterns.
    #[arg(required = true)]
    pub files: Vec<String>,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `convert` subcommand.
#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// Input image.
    pub input: std::path::PathBuf,

    /// Output image.
    pub output: std::path::PathBuf,

    /// Target format. Defaults to the output file's extension.
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// JPEG quality (1-100).
    #[arg(short, long, default_value_t = imgbridge::DEFAULT_JPEG_QUALITY)]
    pub quality: u8,

    /// Allow overwriting an existing output file.
    #[arg(long)]
    pub force: bool,
}

/// Target image format.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FormatArg {
    Bmp,
    Jpeg,
    Png,
}

impl FormatArg {
    pub fn to_image_format(self) -> imgbridge::ImageFormat {
        match self {
            FormatArg::Bmp => imgbridge::ImageFormat::Bmp,
            FormatArg::Jpeg => imgbridge::ImageFormat::Jpeg,
            FormatArg::Png => imgbridge::ImageFormat::Png,
        }
    }
}

impl ConvertArgs {
    /// Resolve the target format from --format or the output extension.
    pub fn resolve_format(&self) -> anyhow::Result<imgbridge::ImageFormat> {
        if let Some(fmt) = self.format {
            return Ok(fmt.to_image_format());
        }
        self.output
            .extension()
            .and_then(|e| e.to_str())
            .and_then(imgbridge::ImageFormat::from_extension)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "cannot infer format from {}; pass --format",
                    self.output.display()
                )
            })
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    match Cli::parse().command {
        Command::Info(args) => info::run(args),
        Command::Convert(args) => convert::run(args),
    }
}
