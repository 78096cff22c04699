//! Format conversion: decode, re-encode, write.

use anyhow::Context;
use imgbridge::{DecodeRequest, EncodeConfig, EncodeRequest};

use crate::ConvertArgs;
use crate::inputs::format_size;

/// Run the `convert` subcommand.
pub fn run(args: ConvertArgs) -> anyhow::Result<()> {
    let format = args.resolve_format()?;

    if args.output.exists() && !args.force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            args.output.display()
        );
    }

    let data = std::fs::read(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let decoded = DecodeRequest::new(&data)
        .decode()
        .with_context(|| format!("decoding {}", args.input.display()))?;
    log::info!(
        "{}: {:?} {}x{}x{}",
        args.input.display(),
        decoded.format,
        decoded.rows(),
        decoded.cols(),
        decoded.channels()
    );

    let config = EncodeConfig::default().with_jpeg_quality(args.quality);
    let encoded = EncodeRequest::new(format)
        .with_config(&config)
        .encode(decoded.image.view())
        .with_context(|| format!("encoding {format:?}"))?;

    std::fs::write(&args.output, &encoded.data)
        .with_context(|| format!("writing {}", args.output.display()))?;

    eprintln!(
        "{} ({}) -> {} ({})",
        args.input.display(),
        format_size(data.len() as u64),
        args.output.display(),
        format_size(encoded.data.len() as u64)
    );
    Ok(())
}
