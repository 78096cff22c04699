//! BMP codec adapter using zenbitmaps.
//!
//! zenbitmaps decodes every common variant (palettes, bitfields, RLE4/RLE8,
//! top-down rows) to RGB/RGBA; the adapter swaps to BGR/BGRA and replicates
//! grayscale. Export writes uncompressed 24-bit or 32-bit files.

use enough::Unstoppable;
use zenbitmaps::{BitmapError, PixelLayout};

use super::Codec;
use crate::config::EncodeConfig;
use crate::limits::try_alloc;
use crate::pixel::{self, Bgr, Bgra, DecodedImage, ImgVec, PixelView, Rgb, Rgba};
use crate::{CodecError, EncodeOutput, ImageFormat, Limits};

/// BMP codec backed by zenbitmaps.
#[derive(Clone, Copy, Debug, Default)]
pub struct BmpCodec;

impl Codec for BmpCodec {
    fn format(&self) -> ImageFormat {
        ImageFormat::Bmp
    }

    fn decode(&self, data: &[u8], limits: &Limits) -> Result<DecodedImage, CodecError> {
        let bitmap_limits = to_bitmap_limits(limits);
        let decoded = zenbitmaps::decode_bmp_with_limits(data, &bitmap_limits, Unstoppable)
            .map_err(decode_error)?;

        let w = decoded.width as usize;
        let h = decoded.height as usize;
        log::debug!("bmp: {w}x{h} {:?}", decoded.layout);

        let channels = match decoded.layout {
            PixelLayout::Rgba8 => 4,
            _ => 3,
        };
        let count = limits.check_image(w, h, channels)?;
        let raw = decoded.pixels();
        if raw.len() != count * decoded.layout.bytes_per_pixel() {
            return Err(CodecError::malformed(
                ImageFormat::Bmp,
                "decoded pixels do not match the header geometry",
            ));
        }

        let image = match decoded.layout {
            PixelLayout::Rgb8 => {
                let rgb: &[Rgb<u8>] = bytemuck::cast_slice(raw);
                let mut buf = try_alloc::<Bgr<u8>>(count)?;
                buf.extend(rgb.iter().copied().map(pixel::rgb_to_bgr));
                DecodedImage::Bgr8(ImgVec::new(buf, w, h))
            }
            PixelLayout::Rgba8 => {
                let rgba: &[Rgba<u8>] = bytemuck::cast_slice(raw);
                let mut buf = try_alloc::<Bgra<u8>>(count)?;
                buf.extend(rgba.iter().copied().map(pixel::rgba_to_bgra));
                DecodedImage::Bgra8(ImgVec::new(buf, w, h))
            }
            PixelLayout::Gray8 => {
                let mut buf = try_alloc::<Bgr<u8>>(count)?;
                buf.extend(raw.iter().map(|&v| Bgr { b: v, g: v, r: v }));
                DecodedImage::Bgr8(ImgVec::new(buf, w, h))
            }
            other => {
                return Err(CodecError::malformed(
                    ImageFormat::Bmp,
                    alloc::format!("unexpected BMP pixel layout {other:?}"),
                ));
            }
        };
        Ok(image)
    }

    fn encode(
        &self,
        image: PixelView<'_>,
        _config: &EncodeConfig,
    ) -> Result<EncodeOutput, CodecError> {
        let (rows, cols) = (image.rows(), image.cols());
        let too_large = || CodecError::dimensions(rows as i64, cols as i64);
        let width = u32::try_from(cols).map_err(|_| too_large())?;
        let height = u32::try_from(rows).map_err(|_| too_large())?;

        let data = match image {
            PixelView::Bgr8(_) => zenbitmaps::encode_bmp(
                image.as_bytes(),
                width,
                height,
                PixelLayout::Bgr8,
                Unstoppable,
            ),
            PixelView::Bgra8(_) => zenbitmaps::encode_bmp_rgba(
                image.as_bytes(),
                width,
                height,
                PixelLayout::Bgra8,
                Unstoppable,
            ),
        }
        .map_err(|e| CodecError::from_encoder(ImageFormat::Bmp, e))?;

        Ok(EncodeOutput {
            data,
            format: ImageFormat::Bmp,
        })
    }
}

fn to_bitmap_limits(limits: &Limits) -> zenbitmaps::Limits {
    zenbitmaps::Limits {
        max_width: limits.max_width,
        max_height: limits.max_height,
        max_pixels: limits.max_pixels,
        max_memory_bytes: limits.max_memory_bytes,
    }
}

fn decode_error(e: BitmapError) -> CodecError {
    match e {
        BitmapError::LimitExceeded(msg) => CodecError::LimitExceeded(msg),
        e => CodecError::from_codec(ImageFormat::Bmp, e),
    }
}
