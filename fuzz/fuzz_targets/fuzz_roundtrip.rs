#![no_main]

use arbitrary::Arbitrary;
use imgbridge::{ChannelLayout, DecodeRequest, EncodeRequest, ImageFormat, PixelView};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    rows: u8,
    cols: u8,
    alpha: bool,
    format: u8,
    pixels: Vec<u8>,
}

fuzz_target!(|input: Input| {
    let layout = if input.alpha {
        ChannelLayout::Bgra8
    } else {
        ChannelLayout::Bgr8
    };
    let (rows, cols) = (input.rows as usize + 1, input.cols as usize + 1);
    let Ok(view) = PixelView::wrap(&input.pixels, rows, cols, layout) else {
        return;
    };
    let format = match input.format % 3 {
        0 => ImageFormat::Bmp,
        1 => ImageFormat::Png,
        _ => ImageFormat::Jpeg,
    };

    let encoded = EncodeRequest::new(format).encode(view).expect("encode");
    let decoded = DecodeRequest::new(&encoded.data).decode().expect("decode");
    assert_eq!(decoded.format, format);
    assert_eq!((decoded.rows(), decoded.cols()), (rows, cols));

    // Lossless formats keep pixels and layout exactly.
    if format != ImageFormat::Jpeg {
        assert_eq!(decoded.image.layout(), layout);
        assert_eq!(decoded.image.as_bytes(), view.as_bytes());
    }
});
