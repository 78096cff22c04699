//! Image format detection from magic bytes.

/// Supported image formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Bmp,
}

/// Ordered signature table. The first entry whose bytes prefix the data wins.
pub(crate) static SIGNATURES: &[(&[u8], ImageFormat)] = &[
    (&[0x89, 0x50, 0x4E, 0x47], ImageFormat::Png),
    (&[0xFF, 0xD8], ImageFormat::Jpeg),
    (&[0x42, 0x4D], ImageFormat::Bmp),
];

impl ImageFormat {
    /// Detect format from magic bytes. Returns `None` if unrecognized.
    ///
    /// Buffers shorter than a signature never match it.
    pub fn detect(data: &[u8]) -> Option<Self> {
        SIGNATURES
            .iter()
            .find(|(magic, _)| data.starts_with(magic))
            .map(|&(_, format)| format)
    }

    /// Detect format from file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" | "jpe" | "jfif" => Some(ImageFormat::Jpeg),
            "bmp" | "dib" => Some(ImageFormat::Bmp),
            _ => None,
        }
    }

    /// Preferred file extension.
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Bmp => "bmp",
        }
    }

    /// MIME type string.
    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Bmp => "image/bmp",
        }
    }

    /// Whether this format can carry an alpha channel.
    pub fn supports_alpha(self) -> bool {
        match self {
            ImageFormat::Png => true,
            ImageFormat::Jpeg => false,
            ImageFormat::Bmp => true,
        }
    }
}

/// Classify a buffer by its leading bytes. `None` means unsupported.
pub fn classify(data: &[u8]) -> Option<ImageFormat> {
    ImageFormat::detect(data)
}
