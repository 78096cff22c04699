//! JPEG codec adapter: zune-jpeg for decoding, jpeg-encoder for encoding.
//!
//! JPEG has no alpha channel. Decoding always yields BGR unless the decoder
//! hands back four components; BGRA input is encoded with alpha dropped.

use std::io::Cursor;

use alloc::format;

use super::Codec;
use crate::config::EncodeConfig;
use crate::limits::try_alloc;
use crate::pixel::{Bgr, Bgra, DecodedImage, ImgVec, PixelView};
use crate::{CodecError, EncodeOutput, ImageFormat, Limits};

/// JPEG codec backed by zune-jpeg and jpeg-encoder.
#[derive(Clone, Copy, Debug, Default)]
pub struct JpegCodec;

impl Codec for JpegCodec {
    fn format(&self) -> ImageFormat {
        ImageFormat::Jpeg
    }

    fn decode(&self, data: &[u8], limits: &Limits) -> Result<DecodedImage, CodecError> {
        let mut decoder = zune_jpeg::JpegDecoder::new(Cursor::new(data));
        decoder
            .decode_headers()
            .map_err(|e| CodecError::malformed(ImageFormat::Jpeg, format!("{e:?}")))?;
        let (w, h) = decoder.dimensions().ok_or_else(|| {
            CodecError::malformed(ImageFormat::Jpeg, "missing frame header")
        })?;
        let components = decoder
            .output_colorspace()
            .map_or(3, |colorspace| colorspace.num_components());
        log::debug!("jpeg: {w}x{h}, {components} output components");
        // Gray output is widened to BGR.
        limits.check_image(w, h, components.max(3))?;

        let raw = decoder
            .decode()
            .map_err(|e| CodecError::malformed(ImageFormat::Jpeg, format!("{e:?}")))?;

        let count = w
            .checked_mul(h)
            .filter(|&n| n > 0)
            .ok_or_else(|| CodecError::dimensions(h as i64, w as i64))?;
        match raw.len() / count {
            1 => {
                let mut buf = try_alloc::<Bgr<u8>>(count)?;
                buf.extend(raw[..count].iter().map(|&v| Bgr { b: v, g: v, r: v }));
                Ok(DecodedImage::Bgr8(ImgVec::new(buf, w, h)))
            }
            3 => {
                let mut buf = try_alloc::<Bgr<u8>>(count)?;
                buf.extend(raw[..count * 3].chunks_exact(3).map(|p| Bgr {
                    b: p[2],
                    g: p[1],
                    r: p[0],
                }));
                Ok(DecodedImage::Bgr8(ImgVec::new(buf, w, h)))
            }
            4 => {
                let mut buf = try_alloc::<Bgra<u8>>(count)?;
                buf.extend(raw[..count * 4].chunks_exact(4).map(|p| Bgra {
                    b: p[2],
                    g: p[1],
                    r: p[0],
                    a: p[3],
                }));
                Ok(DecodedImage::Bgra8(ImgVec::new(buf, w, h)))
            }
            n => Err(CodecError::malformed(
                ImageFormat::Jpeg,
                format!("unexpected component count {n} for {w}x{h} output"),
            )),
        }
    }

    fn encode(
        &self,
        image: PixelView<'_>,
        config: &EncodeConfig,
    ) -> Result<EncodeOutput, CodecError> {
        let (rows, cols) = (image.rows(), image.cols());
        let too_large = || CodecError::dimensions(rows as i64, cols as i64);
        let width = u16::try_from(cols).map_err(|_| too_large())?;
        let height = u16::try_from(rows).map_err(|_| too_large())?;

        let color = match image {
            PixelView::Bgr8(_) => jpeg_encoder::ColorType::Bgr,
            PixelView::Bgra8(_) => jpeg_encoder::ColorType::Bgra,
        };

        let mut data = alloc::vec::Vec::new();
        let encoder = jpeg_encoder::Encoder::new(&mut data, config.jpeg_quality);
        encoder
            .encode(image.as_bytes(), width, height, color)
            .map_err(|e| CodecError::from_encoder(ImageFormat::Jpeg, e))?;

        Ok(EncodeOutput {
            data,
            format: ImageFormat::Jpeg,
        })
    }
}
