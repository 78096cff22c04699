//! File-level read and export, with rich errors.
//!
//! This is the surface the C ABI in [`crate::ffi`] wraps. Rust callers can
//! use it directly and keep the full [`CodecError`].

use std::path::Path;

use crate::pixel::{self, ChannelLayout, DecodedImage, PixelView};
use crate::{io, CodecError, DecodeRequest, EncodeConfig, EncodeRequest, ImageFormat, Limits};

/// Read and decode an image file of any supported format, under
/// [`Limits::boundary`].
pub fn read(path: impl AsRef<Path>) -> Result<DecodedImage, CodecError> {
    read_with_limits(path, &Limits::boundary())
}

/// [`read`] with decode limits.
pub fn read_with_limits(
    path: impl AsRef<Path>,
    limits: &Limits,
) -> Result<DecodedImage, CodecError> {
    let data = io::read_file(path.as_ref())?;
    let output = DecodeRequest::new(&data).with_limits(limits).decode()?;
    Ok(output.image)
}

/// Encode caller pixels as `format` and write them to `path`.
///
/// `bytes` holds `rows × cols` pixels, row-major, in BGR (`channels == 3`)
/// or BGRA (`channels == 4`) order. Arguments are validated before the file
/// is touched, and the file is only created once encoding has succeeded.
pub fn export(
    path: impl AsRef<Path>,
    format: ImageFormat,
    bytes: &[u8],
    rows: i32,
    cols: i32,
    channels: i32,
) -> Result<(), CodecError> {
    export_with_config(path, format, bytes, rows, cols, channels, &EncodeConfig::default())
}

/// [`export`] with explicit encoder settings.
pub fn export_with_config(
    path: impl AsRef<Path>,
    format: ImageFormat,
    bytes: &[u8],
    rows: i32,
    cols: i32,
    channels: i32,
    config: &EncodeConfig,
) -> Result<(), CodecError> {
    let layout = ChannelLayout::from_channels(channels)?;
    let (rows, cols) = pixel::geometry(rows, cols)?;
    let view = PixelView::wrap(bytes, rows, cols, layout)?;

    let encoded = EncodeRequest::new(format).with_config(config).encode(view)?;
    io::write_file(path.as_ref(), &encoded.data)
}

pub fn export_bmp(
    path: impl AsRef<Path>,
    bytes: &[u8],
    rows: i32,
    cols: i32,
    channels: i32,
) -> Result<(), CodecError> {
    export(path, ImageFormat::Bmp, bytes, rows, cols, channels)
}

pub fn export_jpeg(
    path: impl AsRef<Path>,
    bytes: &[u8],
    rows: i32,
    cols: i32,
    channels: i32,
) -> Result<(), CodecError> {
    export(path, ImageFormat::Jpeg, bytes, rows, cols, channels)
}

/// Export as PNG. Pixels are stored red-first and every scanline uses the
/// Paeth filter.
pub fn export_png(
    path: impl AsRef<Path>,
    bytes: &[u8],
    rows: i32,
    cols: i32,
    channels: i32,
) -> Result<(), CodecError> {
    export(path, ImageFormat::Png, bytes, rows, cols, channels)
}
