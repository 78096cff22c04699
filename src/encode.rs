//! Image encoding.

use alloc::vec::Vec;

use crate::codecs::codec_for;
use crate::config::EncodeConfig;
use crate::pixel::PixelView;
use crate::{CodecError, ImageFormat};

/// Encoded image output.
#[derive(Clone, Debug)]
pub struct EncodeOutput {
    /// Encoded image data.
    pub data: Vec<u8>,
    /// Format used for encoding.
    pub format: ImageFormat,
}

/// Image encode request builder.
///
/// # Example
///
/// ```no_run
/// use imgbridge::{ChannelLayout, EncodeConfig, EncodeRequest, ImageFormat, PixelView};
///
/// let bgr = vec![0u8; 100 * 100 * 3];
/// let view = PixelView::wrap(&bgr, 100, 100, ChannelLayout::Bgr8)?;
/// let config = EncodeConfig::default().with_jpeg_quality(85);
/// let output = EncodeRequest::new(ImageFormat::Jpeg)
///     .with_config(&config)
///     .encode(view)?;
/// # Ok::<(), imgbridge::CodecError>(())
/// ```
pub struct EncodeRequest<'a> {
    format: ImageFormat,
    config: Option<&'a EncodeConfig>,
}

impl<'a> EncodeRequest<'a> {
    /// Encode to a specific format.
    pub fn new(format: ImageFormat) -> Self {
        Self {
            format,
            config: None,
        }
    }

    /// Set encoder configuration.
    pub fn with_config(mut self, config: &'a EncodeConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Encode BGR or BGRA pixels.
    pub fn encode(self, image: PixelView<'_>) -> Result<EncodeOutput, CodecError> {
        let default_config = EncodeConfig::default();
        let config = self.config.unwrap_or(&default_config);

        let output = codec_for(self.format)?.encode(image, config)?;
        log::debug!(
            "encoded {:?}: {}x{} {:?} -> {} bytes",
            self.format,
            image.rows(),
            image.cols(),
            image.layout(),
            output.data.len()
        );
        Ok(output)
    }
}
