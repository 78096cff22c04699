//! Resource limits for decode operations.

use alloc::string::ToString;
use alloc::vec::Vec;

use crate::CodecError;

/// Resource limits for decode operations.
///
/// All limits are optional. Decoders check dimensions after parsing headers
/// and before allocating pixel storage.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    /// Maximum image width in pixels.
    pub max_width: Option<u64>,
    /// Maximum image height in pixels.
    pub max_height: Option<u64>,
    /// Maximum total pixels (width × height).
    pub max_pixels: Option<u64>,
    /// Maximum memory allocation in bytes.
    pub max_memory_bytes: Option<u64>,
}

/// Pixel cap applied by [`Limits::boundary`]: 64 Mpx, an 8192 x 8192 image.
pub const BOUNDARY_MAX_PIXELS: u64 = 1 << 26;

/// Output-size cap applied by [`Limits::boundary`]: 256 MiB, the cap above at
/// four channels.
pub const BOUNDARY_MAX_MEMORY: u64 = 1 << 28;

impl Limits {
    /// Create a new Limits with no restrictions.
    pub fn none() -> Self {
        Self::default()
    }

    /// Limits used by file reads through [`crate::bridge::read`] and the C
    /// ABI. A header can declare far more pixels than the file holds, so
    /// untrusted files are capped before any pixel storage is committed.
    pub fn boundary() -> Self {
        Self {
            max_pixels: Some(BOUNDARY_MAX_PIXELS),
            max_memory_bytes: Some(BOUNDARY_MAX_MEMORY),
            ..Self::default()
        }
    }

    /// Check if dimensions are within limits.
    pub fn check_dimensions(&self, width: u64, height: u64) -> Result<(), CodecError> {
        if let Some(max_width) = self.max_width {
            if width > max_width {
                return Err(CodecError::LimitExceeded("width exceeds limit".to_string()));
            }
        }

        if let Some(max_height) = self.max_height {
            if height > max_height {
                return Err(CodecError::LimitExceeded("height exceeds limit".to_string()));
            }
        }

        if let Some(max_pixels) = self.max_pixels {
            let pixels = width.saturating_mul(height);
            if pixels > max_pixels {
                return Err(CodecError::LimitExceeded(
                    "pixel count exceeds limit".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Check if a memory allocation is within limits.
    pub fn check_memory(&self, bytes: u64) -> Result<(), CodecError> {
        if let Some(max_memory) = self.max_memory_bytes {
            if bytes > max_memory {
                return Err(CodecError::LimitExceeded(
                    "memory allocation exceeds limit".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Check dimensions and the output size of a `width × height × channels`
    /// image in one go. Returns the pixel count.
    pub(crate) fn check_image(
        &self,
        width: usize,
        height: usize,
        channels: usize,
    ) -> Result<usize, CodecError> {
        self.check_dimensions(width as u64, height as u64)?;
        let pixels = width
            .checked_mul(height)
            .ok_or_else(|| CodecError::dimensions(height as i64, width as i64))?;
        let bytes = pixels
            .checked_mul(channels)
            .ok_or_else(|| CodecError::dimensions(height as i64, width as i64))?;
        self.check_memory(bytes as u64)?;
        Ok(pixels)
    }
}

/// Allocate an empty vector able to hold `len` elements without reallocating.
///
/// Maps allocator refusal to [`CodecError::AllocationFailure`] instead of
/// aborting the process.
pub(crate) fn try_alloc<T>(len: usize) -> Result<Vec<T>, CodecError> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)
        .map_err(|_| CodecError::AllocationFailure)?;
    Ok(v)
}
