//! Handing decoded pixels to a foreign caller.
//!
//! A decoded image moves through three states:
//!
//! 1. **Decoded**: a [`DecodedImage`] owned by Rust.
//! 2. **Transferred**: [`TransferredBuffer::into_raw`] has returned a raw
//!    pointer. Rust keeps no handle; the caller is the only owner.
//! 3. **Released**: the caller passed the pointer to
//!    [`TransferredBuffer::release`] and the storage is gone.
//!
//! The caller only gets a pointer back, so the block carries its own length
//! in a hidden prefix in front of the pixel bytes. `release` steps back over
//! the prefix to rebuild the original allocation.

use alloc::boxed::Box;

use crate::CodecError;
use crate::limits::try_alloc;
use crate::pixel::DecodedImage;

/// Bytes reserved in front of the pixels. The first 8 hold the pixel byte
/// count as little-endian `u64`; the rest are zero. The block is a byte
/// slice, so the pixel pointer carries no alignment beyond 1.
const PREFIX: usize = 16;

/// Decoded pixels in a block that can cross the C ABI.
#[derive(Debug)]
pub struct TransferredBuffer {
    block: Box<[u8]>,
    rows: usize,
    cols: usize,
    channels: usize,
}

impl TransferredBuffer {
    /// Copy a decoded image into a transferable block.
    ///
    /// The image's own storage is dropped when this returns, on success and
    /// on failure alike.
    pub fn from_image(image: DecodedImage) -> Result<Self, CodecError> {
        let (rows, cols, channels) = (image.rows(), image.cols(), image.channels());
        let pixels = image.as_bytes();
        let total = PREFIX
            .checked_add(pixels.len())
            .ok_or(CodecError::AllocationFailure)?;

        let mut block = try_alloc::<u8>(total)?;
        block.extend_from_slice(&(pixels.len() as u64).to_le_bytes());
        block.resize(PREFIX, 0);
        block.extend_from_slice(pixels);

        Ok(Self {
            block: block.into_boxed_slice(),
            rows,
            cols,
            channels,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Pixel bytes, row-major BGR or BGRA.
    pub fn as_bytes(&self) -> &[u8] {
        &self.block[PREFIX..]
    }

    /// Give up ownership and return a pointer to the first pixel byte.
    ///
    /// The pointer must eventually be passed to [`release`](Self::release)
    /// exactly once, or the block leaks.
    pub fn into_raw(self) -> *mut u8 {
        let base = Box::into_raw(self.block).cast::<u8>();
        base.wrapping_add(PREFIX)
    }

    /// Free a block previously returned by [`into_raw`](Self::into_raw).
    ///
    /// A null pointer is ignored.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or a pointer returned by `into_raw` that has not
    /// been released yet. Releasing twice, or releasing a pointer from any
    /// other allocator, is undefined behavior; nothing here detects it.
    pub unsafe fn release(ptr: *mut u8) {
        if ptr.is_null() {
            return;
        }
        // SAFETY: per the contract, `ptr` sits PREFIX bytes into a live
        // boxed slice whose first 8 bytes hold the pixel length.
        unsafe {
            let base = ptr.sub(PREFIX);
            let mut len = [0u8; 8];
            core::ptr::copy_nonoverlapping(base, len.as_mut_ptr(), len.len());
            let len = u64::from_le_bytes(len) as usize;
            let block = core::ptr::slice_from_raw_parts_mut(base, PREFIX + len);
            drop(Box::from_raw(block));
        }
    }
}
