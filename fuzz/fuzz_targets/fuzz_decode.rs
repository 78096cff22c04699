#![no_main]

use imgbridge::{DecodeRequest, Limits};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let limits = Limits {
        max_pixels: Some(16 * 1024 * 1024),
        max_memory_bytes: Some(256 * 1024 * 1024),
        ..Default::default()
    };
    if let Ok(output) = DecodeRequest::new(data).with_limits(&limits).decode() {
        assert_eq!(
            output.image.as_bytes().len(),
            output.rows() * output.cols() * output.channels()
        );
    }
});
