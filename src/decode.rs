//! Image decoding.

use crate::codecs::codec_for;
use crate::pixel::DecodedImage;
use crate::{CodecError, ImageFormat, Limits};

/// Decoded image output.
#[derive(Clone, Debug)]
pub struct DecodeOutput {
    /// Decoded pixels, BGR or BGRA.
    pub image: DecodedImage,
    /// Format the bytes were decoded as.
    pub format: ImageFormat,
}

impl DecodeOutput {
    /// Image height in pixels (convenience accessor).
    pub fn rows(&self) -> usize {
        self.image.rows()
    }

    /// Image width in pixels (convenience accessor).
    pub fn cols(&self) -> usize {
        self.image.cols()
    }

    /// Channels per pixel, 3 or 4.
    pub fn channels(&self) -> usize {
        self.image.channels()
    }
}

/// Image decode request builder.
///
/// # Example
///
/// ```no_run
/// use imgbridge::DecodeRequest;
///
/// let data: &[u8] = &[]; // your image bytes
/// let output = DecodeRequest::new(data).decode()?;
/// println!("{}x{}x{}", output.rows(), output.cols(), output.channels());
/// # Ok::<(), imgbridge::CodecError>(())
/// ```
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    format: Option<ImageFormat>,
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    /// Create a new decode request.
    ///
    /// Format will be auto-detected from magic bytes.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            format: None,
            limits: None,
        }
    }

    /// Override format auto-detection.
    pub fn with_format(mut self, format: ImageFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Set resource limits.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Decode the image to pixels.
    pub fn decode(self) -> Result<DecodeOutput, CodecError> {
        let format = match self.format {
            Some(f) => f,
            None => ImageFormat::detect(self.data).ok_or(CodecError::UnsupportedFormat)?,
        };

        let default_limits = Limits::none();
        let limits = self.limits.unwrap_or(&default_limits);

        let image = codec_for(format)?.decode(self.data, limits)?;
        log::debug!(
            "decoded {format:?}: {}x{}x{}",
            image.rows(),
            image.cols(),
            image.channels()
        );
        Ok(DecodeOutput { image, format })
    }
}
