//! Typed pixel buffers.
//!
//! Uses `imgref` for 2D pixel data with typed pixels from the `rgb` crate.
//! Everything crossing the boundary is in blue-green-red order; RGB types
//! only appear at the PNG encoder.

use alloc::vec::Vec;

pub use imgref::{Img, ImgRef, ImgVec};
pub use rgb::{Bgr, Bgra, Rgb, Rgba};

use crate::CodecError;

/// Channel layout of a boundary pixel buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChannelLayout {
    /// Three channels, blue-green-red.
    Bgr8,
    /// Four channels, blue-green-red-alpha.
    Bgra8,
}

impl ChannelLayout {
    /// Map a caller-declared channel count to a layout.
    pub fn from_channels(channels: i32) -> Result<Self, CodecError> {
        match channels {
            3 => Ok(ChannelLayout::Bgr8),
            4 => Ok(ChannelLayout::Bgra8),
            other => Err(CodecError::InvalidChannelCount(other)),
        }
    }

    /// Bytes per pixel.
    pub fn channels(self) -> usize {
        match self {
            ChannelLayout::Bgr8 => 3,
            ChannelLayout::Bgra8 => 4,
        }
    }

    /// Byte length of a tightly packed `rows × cols` buffer in this layout.
    pub fn buffer_len(self, rows: usize, cols: usize) -> Result<usize, CodecError> {
        rows.checked_mul(cols)
            .and_then(|n| n.checked_mul(self.channels()))
            .ok_or_else(|| CodecError::dimensions(rows as i64, cols as i64))
    }
}

/// Validate caller-supplied geometry. Both sides must be positive.
pub fn geometry(rows: i32, cols: i32) -> Result<(usize, usize), CodecError> {
    if rows <= 0 || cols <= 0 {
        return Err(CodecError::dimensions(rows, cols));
    }
    Ok((rows as usize, cols as usize))
}

/// Borrowed, typed view over a caller's pixel bytes (export path).
///
/// Constructing a view never copies; it is valid for as long as the
/// borrowed bytes are.
#[derive(Clone, Copy, Debug)]
pub enum PixelView<'a> {
    Bgr8(ImgRef<'a, Bgr<u8>>),
    Bgra8(ImgRef<'a, Bgra<u8>>),
}

impl<'a> PixelView<'a> {
    /// Wrap `rows × cols` pixels of `layout` starting at `bytes[0]`.
    ///
    /// Extra trailing bytes are ignored. Fails if the buffer is too short
    /// or either side is zero.
    pub fn wrap(
        bytes: &'a [u8],
        rows: usize,
        cols: usize,
        layout: ChannelLayout,
    ) -> Result<Self, CodecError> {
        if rows == 0 || cols == 0 {
            return Err(CodecError::dimensions(rows as i64, cols as i64));
        }
        let needed = layout.buffer_len(rows, cols)?;
        if bytes.len() < needed {
            return Err(CodecError::BufferTooSmall {
                needed,
                actual: bytes.len(),
            });
        }
        let bytes = &bytes[..needed];
        Ok(match layout {
            ChannelLayout::Bgr8 => {
                PixelView::Bgr8(ImgRef::new(bytemuck::cast_slice(bytes), cols, rows))
            }
            ChannelLayout::Bgra8 => {
                PixelView::Bgra8(ImgRef::new(bytemuck::cast_slice(bytes), cols, rows))
            }
        })
    }

    pub fn layout(&self) -> ChannelLayout {
        match self {
            PixelView::Bgr8(_) => ChannelLayout::Bgr8,
            PixelView::Bgra8(_) => ChannelLayout::Bgra8,
        }
    }

    pub fn rows(&self) -> usize {
        match self {
            PixelView::Bgr8(img) => img.height(),
            PixelView::Bgra8(img) => img.height(),
        }
    }

    pub fn cols(&self) -> usize {
        match self {
            PixelView::Bgr8(img) => img.width(),
            PixelView::Bgra8(img) => img.width(),
        }
    }

    /// The viewed bytes, row-major and tightly packed.
    pub fn as_bytes(&self) -> &'a [u8] {
        match *self {
            PixelView::Bgr8(img) => bytemuck::cast_slice(img.into_buf()),
            PixelView::Bgra8(img) => bytemuck::cast_slice(img.into_buf()),
        }
    }
}

/// Owned decode result. Exactly one variant per decode, chosen by whether
/// the source carries alpha.
#[derive(Clone, Debug)]
pub enum DecodedImage {
    Bgr8(ImgVec<Bgr<u8>>),
    Bgra8(ImgVec<Bgra<u8>>),
}

impl DecodedImage {
    pub fn layout(&self) -> ChannelLayout {
        match self {
            DecodedImage::Bgr8(_) => ChannelLayout::Bgr8,
            DecodedImage::Bgra8(_) => ChannelLayout::Bgra8,
        }
    }

    pub fn rows(&self) -> usize {
        match self {
            DecodedImage::Bgr8(img) => img.height(),
            DecodedImage::Bgra8(img) => img.height(),
        }
    }

    pub fn cols(&self) -> usize {
        match self {
            DecodedImage::Bgr8(img) => img.width(),
            DecodedImage::Bgra8(img) => img.width(),
        }
    }

    pub fn channels(&self) -> usize {
        self.layout().channels()
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            DecodedImage::Bgr8(img) => bytemuck::cast_slice(&img.buf()[..]),
            DecodedImage::Bgra8(img) => bytemuck::cast_slice(&img.buf()[..]),
        }
    }

    /// Borrow as an export view.
    pub fn view(&self) -> PixelView<'_> {
        match self {
            DecodedImage::Bgr8(img) => PixelView::Bgr8(img.as_ref()),
            DecodedImage::Bgra8(img) => PixelView::Bgra8(img.as_ref()),
        }
    }

    /// Take the pixel bytes, dropping the typed wrapper.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            DecodedImage::Bgr8(img) => bytemuck::allocation::cast_vec(img.into_buf()),
            DecodedImage::Bgra8(img) => bytemuck::allocation::cast_vec(img.into_buf()),
        }
    }
}

// --- Channel-order casts ---

#[inline]
pub fn bgr_to_rgb(p: Bgr<u8>) -> Rgb<u8> {
    Rgb {
        r: p.r,
        g: p.g,
        b: p.b,
    }
}

#[inline]
pub fn rgb_to_bgr(p: Rgb<u8>) -> Bgr<u8> {
    Bgr {
        b: p.b,
        g: p.g,
        r: p.r,
    }
}

#[inline]
pub fn bgra_to_rgba(p: Bgra<u8>) -> Rgba<u8> {
    Rgba {
        r: p.r,
        g: p.g,
        b: p.b,
        a: p.a,
    }
}

#[inline]
pub fn rgba_to_bgra(p: Rgba<u8>) -> Bgra<u8> {
    Bgra {
        b: p.b,
        g: p.g,
        r: p.r,
        a: p.a,
    }
}

/// Element-wise BGR → RGB copy of a view.
pub fn to_rgb8(img: ImgRef<'_, Bgr<u8>>) -> ImgVec<Rgb<u8>> {
    let buf = img.pixels().map(bgr_to_rgb).collect();
    ImgVec::new(buf, img.width(), img.height())
}

/// Element-wise BGRA → RGBA copy of a view.
pub fn to_rgba8(img: ImgRef<'_, Bgra<u8>>) -> ImgVec<Rgba<u8>> {
    let buf = img.pixels().map(bgra_to_rgba).collect();
    ImgVec::new(buf, img.width(), img.height())
}
