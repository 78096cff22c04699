//! Codec adapters for format-specific implementations.
//!
//! Each module provides a thin adapter between imgbridge's boundary types
//! and the format-specific codec. All adapters implement [`Codec`], and
//! [`codec_for`] is the only place that maps a format to one of them.

use crate::config::EncodeConfig;
use crate::pixel::{DecodedImage, PixelView};
use crate::{CodecError, EncodeOutput, ImageFormat, Limits};

pub mod bmp;

#[cfg(feature = "jpeg")]
pub mod jpeg;

#[cfg(feature = "png")]
pub mod png;

/// Decode and encode capability shared by every supported format.
pub trait Codec: Sync {
    /// Format this codec handles.
    fn format(&self) -> ImageFormat;

    /// Decode a complete file into BGR or BGRA pixels.
    fn decode(&self, data: &[u8], limits: &Limits) -> Result<DecodedImage, CodecError>;

    /// Encode BGR or BGRA pixels into a complete file.
    fn encode(
        &self,
        image: PixelView<'_>,
        config: &EncodeConfig,
    ) -> Result<EncodeOutput, CodecError>;
}

/// Select the codec for a format.
pub fn codec_for(format: ImageFormat) -> Result<&'static dyn Codec, CodecError> {
    match format {
        ImageFormat::Bmp => Ok(&bmp::BmpCodec),

        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => Ok(&jpeg::JpegCodec),
        #[cfg(not(feature = "jpeg"))]
        ImageFormat::Jpeg => Err(CodecError::CodecUnavailable(format)),

        #[cfg(feature = "png")]
        ImageFormat::Png => Ok(&png::PngCodec),
        #[cfg(not(feature = "png"))]
        ImageFormat::Png => Err(CodecError::CodecUnavailable(format)),
    }
}
