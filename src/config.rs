//! Format-specific encoder configuration.
//!
//! [`EncodeConfig`] bundles every encoder knob into one value passed to
//! [`EncodeRequest`](crate::EncodeRequest). The C ABI always uses
//! [`EncodeConfig::default`].

/// PNG configuration types from the png crate.
#[cfg(feature = "png")]
pub mod png_codec {
    pub use png::{Compression, Filter};
}

/// Default JPEG quality used by the boundary.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Encoder settings.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct EncodeConfig {
    /// JPEG quality, 1-100.
    pub jpeg_quality: u8,

    /// PNG filter applied to every scanline. Defaults to Paeth.
    #[cfg(feature = "png")]
    pub png_filter: png::Filter,

    /// PNG deflate compression level.
    #[cfg(feature = "png")]
    pub png_compression: png::Compression,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            #[cfg(feature = "png")]
            png_filter: png::Filter::Paeth,
            #[cfg(feature = "png")]
            png_compression: png::Compression::default(),
        }
    }
}

impl EncodeConfig {
    /// Set JPEG quality. Clamped to 1-100.
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    /// Set PNG filter strategy.
    #[cfg(feature = "png")]
    pub fn with_png_filter(mut self, filter: png::Filter) -> Self {
        self.png_filter = filter;
        self
    }

    /// Set PNG compression level.
    #[cfg(feature = "png")]
    pub fn with_png_compression(mut self, compression: png::Compression) -> Self {
        self.png_compression = compression;
        self
    }
}
