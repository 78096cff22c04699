//! PNG codec adapter using png crate.
//!
//! PNG stores red first, so both directions transcode through the `rgb`
//! channel-order casts.

use std::io::Cursor;

use alloc::vec::Vec;

use super::Codec;
use crate::config::EncodeConfig;
use crate::limits::try_alloc;
use crate::pixel::{
    self, Bgr, Bgra, DecodedImage, ImgRef, ImgVec, PixelView, Rgb, Rgba,
};
use crate::{CodecError, EncodeOutput, ImageFormat, Limits};

/// PNG codec backed by the png crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct PngCodec;

impl Codec for PngCodec {
    fn format(&self) -> ImageFormat {
        ImageFormat::Png
    }

    fn decode(&self, data: &[u8], limits: &Limits) -> Result<DecodedImage, CodecError> {
        decode(data, limits)
    }

    fn encode(
        &self,
        image: PixelView<'_>,
        config: &EncodeConfig,
    ) -> Result<EncodeOutput, CodecError> {
        match image {
            PixelView::Bgr8(img) => encode_rgb8(
                pixel::to_rgb8(img).as_ref(),
                config.png_filter,
                config.png_compression,
            ),
            PixelView::Bgra8(img) => encode_rgba8(
                pixel::to_rgba8(img).as_ref(),
                config.png_filter,
                config.png_compression,
            ),
        }
    }
}

/// Decode PNG to BGR or BGRA pixels.
///
/// Palettes and low bit depths are expanded, 16-bit samples are stripped to
/// 8 bits, and grayscale is replicated across the three color channels.
pub(crate) fn decode(data: &[u8], limits: &Limits) -> Result<DecodedImage, CodecError> {
    let mut decoder = png::Decoder::new(Cursor::new(data));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);

    let mut reader = decoder.read_info().map_err(decode_error)?;

    let info = reader.info();
    let w = info.width as usize;
    let h = info.height as usize;
    log::debug!(
        "png: {w}x{h} {:?} {:?}, interlaced={}",
        info.color_type,
        info.bit_depth,
        info.interlaced
    );

    let (color_type, _bit_depth) = reader.output_color_type();
    let channels = match color_type {
        png::ColorType::Rgba | png::ColorType::GrayscaleAlpha => 4,
        _ => 3,
    };
    limits.check_image(w, h, channels)?;

    let buffer_size = reader.output_buffer_size().ok_or_else(|| {
        CodecError::malformed(ImageFormat::Png, "cannot determine PNG output buffer size")
    })?;
    let mut raw_pixels = try_alloc::<u8>(buffer_size)?;
    raw_pixels.resize(buffer_size, 0);

    let output_info = reader.next_frame(&mut raw_pixels).map_err(decode_error)?;
    raw_pixels.truncate(output_info.buffer_size());

    let count = w * h;
    let image = match color_type {
        png::ColorType::Rgb | png::ColorType::Indexed => {
            let rgb: &[Rgb<u8>] = bytemuck::cast_slice(&raw_pixels);
            let mut buf = try_alloc::<Bgr<u8>>(count)?;
            buf.extend(rgb.iter().copied().map(pixel::rgb_to_bgr));
            DecodedImage::Bgr8(ImgVec::new(buf, w, h))
        }
        png::ColorType::Rgba => {
            let rgba: &[Rgba<u8>] = bytemuck::cast_slice(&raw_pixels);
            let mut buf = try_alloc::<Bgra<u8>>(count)?;
            buf.extend(rgba.iter().copied().map(pixel::rgba_to_bgra));
            DecodedImage::Bgra8(ImgVec::new(buf, w, h))
        }
        png::ColorType::Grayscale => {
            let mut buf = try_alloc::<Bgr<u8>>(count)?;
            buf.extend(raw_pixels.iter().map(|&v| Bgr { b: v, g: v, r: v }));
            DecodedImage::Bgr8(ImgVec::new(buf, w, h))
        }
        png::ColorType::GrayscaleAlpha => {
            let mut buf = try_alloc::<Bgra<u8>>(count)?;
            buf.extend(raw_pixels.chunks_exact(2).map(|ga| Bgra {
                b: ga[0],
                g: ga[0],
                r: ga[0],
                a: ga[1],
            }));
            DecodedImage::Bgra8(ImgVec::new(buf, w, h))
        }
    };

    if image.as_bytes().len() != count * image.channels() {
        return Err(CodecError::malformed(
            ImageFormat::Png,
            "decoded frame is smaller than the header declares",
        ));
    }

    Ok(image)
}

fn decode_error(e: png::DecodingError) -> CodecError {
    match e {
        png::DecodingError::LimitsExceeded => {
            CodecError::LimitExceeded("png decoder buffer limit".into())
        }
        e => CodecError::from_codec(ImageFormat::Png, e),
    }
}

/// Encode RGB8 pixels to PNG.
pub fn encode_rgb8(
    img: ImgRef<'_, Rgb<u8>>,
    filter: png::Filter,
    compression: png::Compression,
) -> Result<EncodeOutput, CodecError> {
    let (buf, width, height) = img.to_contiguous_buf();
    write_png(
        bytemuck::cast_slice(buf.as_ref()),
        width,
        height,
        png::ColorType::Rgb,
        filter,
        compression,
    )
}

/// Encode RGBA8 pixels to PNG.
pub fn encode_rgba8(
    img: ImgRef<'_, Rgba<u8>>,
    filter: png::Filter,
    compression: png::Compression,
) -> Result<EncodeOutput, CodecError> {
    let (buf, width, height) = img.to_contiguous_buf();
    write_png(
        bytemuck::cast_slice(buf.as_ref()),
        width,
        height,
        png::ColorType::Rgba,
        filter,
        compression,
    )
}

fn write_png(
    bytes: &[u8],
    width: usize,
    height: usize,
    color: png::ColorType,
    filter: png::Filter,
    compression: png::Compression,
) -> Result<EncodeOutput, CodecError> {
    let width = u32::try_from(width).map_err(|_| CodecError::dimensions(height as i64, width as i64))?;
    let height =
        u32::try_from(height).map_err(|_| CodecError::dimensions(height as i64, width as i64))?;

    let mut output = Vec::new();
    let mut encoder = png::Encoder::new(&mut output, width, height);
    encoder.set_color(color);
    encoder.set_depth(png::BitDepth::Eight);
    // set_compression also picks a filter, so the explicit filter goes last.
    encoder.set_compression(compression);
    encoder.set_filter(filter);

    let mut writer = encoder
        .write_header()
        .map_err(|e| CodecError::from_encoder(ImageFormat::Png, e))?;

    writer
        .write_image_data(bytes)
        .map_err(|e| CodecError::from_encoder(ImageFormat::Png, e))?;

    writer
        .finish()
        .map_err(|e| CodecError::from_encoder(ImageFormat::Png, e))?;

    Ok(EncodeOutput {
        data: output,
        format: ImageFormat::Png,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::ChannelLayout;
    use alloc::vec;

    #[test]
    fn bgr_export_is_stored_as_rgb() {
        // Pure blue in BGR order.
        let pixels = vec![255u8, 0, 0, 255, 0, 0, 255, 0, 0, 255, 0, 0];
        let view = PixelView::wrap(&pixels, 2, 2, ChannelLayout::Bgr8).unwrap();
        let out = PngCodec.encode(view, &EncodeConfig::default()).unwrap();

        let decoder = png::Decoder::new(Cursor::new(&out.data[..]));
        let mut reader = decoder.read_info().unwrap();
        assert_eq!(reader.info().color_type, png::ColorType::Rgb);
        let mut buf = vec![0u8; reader.output_buffer_size().unwrap()];
        reader.next_frame(&mut buf).unwrap();
        assert_eq!(&buf[..3], &[0, 0, 255]);
    }

    #[test]
    fn roundtrip_bgra8() {
        let pixels: Vec<u8> = (0..3 * 5 * 4).map(|i| (i * 13 % 256) as u8).collect();
        let view = PixelView::wrap(&pixels, 3, 5, ChannelLayout::Bgra8).unwrap();
        let out = PngCodec.encode(view, &EncodeConfig::default()).unwrap();

        let decoded = PngCodec.decode(&out.data, &Limits::none()).unwrap();
        assert_eq!(decoded.layout(), ChannelLayout::Bgra8);
        assert_eq!((decoded.rows(), decoded.cols()), (3, 5));
        assert_eq!(decoded.as_bytes(), &pixels[..]);
    }

    #[test]
    fn grayscale_is_replicated() {
        let mut out = Vec::new();
        let mut encoder = png::Encoder::new(&mut out, 2, 1);
        encoder.set_color(png::ColorType::Grayscale);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(&[7, 200]).unwrap();
        writer.finish().unwrap();

        let decoded = PngCodec.decode(&out, &Limits::none()).unwrap();
        assert_eq!(decoded.layout(), ChannelLayout::Bgr8);
        assert_eq!(decoded.as_bytes(), &[7, 7, 7, 200, 200, 200]);
    }

    #[test]
    fn sixteen_bit_is_stripped() {
        let mut out = Vec::new();
        let mut encoder = png::Encoder::new(&mut out, 1, 1);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Sixteen);
        let mut writer = encoder.write_header().unwrap();
        writer
            .write_image_data(&[0xAB, 0x00, 0x12, 0x00, 0xFF, 0xFF])
            .unwrap();
        writer.finish().unwrap();

        let decoded = PngCodec.decode(&out, &Limits::none()).unwrap();
        assert_eq!(decoded.as_bytes(), &[0xFF, 0x12, 0xAB]);
    }

    #[test]
    fn truncated_is_malformed() {
        let pixels = vec![1u8; 4 * 4 * 3];
        let view = PixelView::wrap(&pixels, 4, 4, ChannelLayout::Bgr8).unwrap();
        let out = PngCodec.encode(view, &EncodeConfig::default()).unwrap();

        let err = PngCodec.decode(&out.data[..20], &Limits::none()).unwrap_err();
        assert!(matches!(
            err,
            CodecError::MalformedInput {
                format: ImageFormat::Png,
                ..
            }
        ));
    }

    #[test]
    fn limits_are_checked() {
        let pixels = vec![0u8; 8 * 8 * 3];
        let view = PixelView::wrap(&pixels, 8, 8, ChannelLayout::Bgr8).unwrap();
        let out = PngCodec.encode(view, &EncodeConfig::default()).unwrap();

        let limits = Limits {
            max_pixels: Some(10),
            ..Default::default()
        };
        assert!(matches!(
            PngCodec.decode(&out.data, &limits),
            Err(CodecError::LimitExceeded(_))
        ));
    }
}
