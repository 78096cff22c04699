//! Unified error types for codec and boundary operations.

use alloc::boxed::Box;
use alloc::string::String;

use crate::format::ImageFormat;

/// Unified error type for decode, encode, and file operations.
///
/// Rich errors are only visible to Rust callers. The C ABI in [`crate::ffi`]
/// collapses every variant to a sentinel.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CodecError {
    /// Opening, reading, or writing a file failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// No known signature matched the leading bytes.
    #[error("unsupported image format")]
    UnsupportedFormat,

    /// Signature matched but the codec rejected the bytes.
    #[error("malformed {format:?} data: {source}")]
    MalformedInput {
        format: ImageFormat,
        source: Box<dyn core::error::Error + Send + Sync>,
    },

    /// Encoder failed on otherwise valid input.
    #[error("{format:?} encode failed: {source}")]
    Encode {
        format: ImageFormat,
        source: Box<dyn core::error::Error + Send + Sync>,
    },

    /// Channel count other than 3 or 4.
    #[error("invalid channel count {0}, expected 3 or 4")]
    InvalidChannelCount(i32),

    /// Negative, zero, or overflowing geometry.
    #[error("invalid dimensions: {rows} rows x {cols} cols")]
    InvalidDimensions { rows: i64, cols: i64 },

    /// Pixel buffer shorter than its declared geometry.
    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    /// Resource limit exceeded.
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    /// Storage for pixels could not be obtained.
    #[error("out of memory")]
    AllocationFailure,

    /// Format recognized but its codec was not compiled in.
    #[error("format {0:?} not supported (codec not compiled in)")]
    CodecUnavailable(ImageFormat),

    /// A required pointer argument was null.
    #[error("null pointer passed for `{0}`")]
    NullPointer(&'static str),

    /// File name cannot be represented as a path on this platform.
    #[error("file name is not valid UTF-8")]
    InvalidPath,
}

/// Coarse classification of [`CodecError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Open, read, or write failed.
    Io,
    /// Signature matched none of the known formats.
    UnsupportedFormat,
    /// Codec-level parse or encode failure.
    MalformedInput,
    /// Export requested with neither 3 nor 4 channels.
    InvalidChannelCount,
    /// Storage could not be obtained or a limit forbade it.
    AllocationFailure,
    /// Bad arguments: geometry, short buffers, null pointers, paths.
    InvalidInput,
}

impl CodecError {
    /// Wrap a codec-specific decode error.
    pub fn from_codec<E>(format: ImageFormat, error: E) -> Self
    where
        E: core::error::Error + Send + Sync + 'static,
    {
        CodecError::MalformedInput {
            format,
            source: Box::new(error),
        }
    }

    /// Decode failure described only by a message.
    pub fn malformed(format: ImageFormat, detail: impl Into<String>) -> Self {
        let detail: String = detail.into();
        CodecError::MalformedInput {
            format,
            source: detail.into(),
        }
    }

    /// Wrap a codec-specific encode error.
    pub fn from_encoder<E>(format: ImageFormat, error: E) -> Self
    where
        E: core::error::Error + Send + Sync + 'static,
    {
        CodecError::Encode {
            format,
            source: Box::new(error),
        }
    }

    pub(crate) fn dimensions(rows: impl Into<i64>, cols: impl Into<i64>) -> Self {
        CodecError::InvalidDimensions {
            rows: rows.into(),
            cols: cols.into(),
        }
    }

    /// Which bucket of the error taxonomy this falls into.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CodecError::Io(_) => ErrorKind::Io,
            CodecError::UnsupportedFormat | CodecError::CodecUnavailable(_) => {
                ErrorKind::UnsupportedFormat
            }
            CodecError::MalformedInput { .. } | CodecError::Encode { .. } => {
                ErrorKind::MalformedInput
            }
            CodecError::InvalidChannelCount(_) => ErrorKind::InvalidChannelCount,
            CodecError::AllocationFailure | CodecError::LimitExceeded(_) => {
                ErrorKind::AllocationFailure
            }
            CodecError::InvalidDimensions { .. }
            | CodecError::BufferTooSmall { .. }
            | CodecError::NullPointer(_)
            | CodecError::InvalidPath => ErrorKind::InvalidInput,
        }
    }
}
