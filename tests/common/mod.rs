#![allow(dead_code)]

use std::ffi::CString;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

static COUNTER: AtomicUsize = AtomicUsize::new(0);

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A path under the system temp dir that no other test uses.
pub fn temp_path(ext: &str) -> PathBuf {
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!(
        "imgbridge-test-{}-{n}.{ext}",
        std::process::id()
    ))
}

pub fn c_path(path: &std::path::Path) -> CString {
    CString::new(path.to_str().expect("temp path is UTF-8")).expect("no interior NUL")
}

/// Deterministic `rows × cols × channels` pixel bytes.
pub fn gradient(rows: usize, cols: usize, channels: usize) -> Vec<u8> {
    (0..rows * cols * channels)
        .map(|i| ((i * 37 + i / 5) % 256) as u8)
        .collect()
}

/// Removes the file when dropped.
pub struct TempFile(pub PathBuf);

impl TempFile {
    pub fn new(ext: &str) -> Self {
        TempFile(temp_path(ext))
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

/// Filter type byte of every scanline in an 8-bit RGB or RGBA PNG.
pub fn png_row_filters(file: &[u8]) -> Vec<u8> {
    use std::io::Read;

    let be32 = |b: &[u8]| u32::from_be_bytes([b[0], b[1], b[2], b[3]]) as usize;
    let (mut width, mut channels) = (0, 0);
    let mut idat = Vec::new();
    let mut pos = 8;
    while pos + 8 <= file.len() {
        let len = be32(&file[pos..]);
        let data = &file[pos + 8..pos + 8 + len];
        match &file[pos + 4..pos + 8] {
            b"IHDR" => {
                width = be32(data);
                assert_eq!(data[8], 8, "bit depth");
                channels = match data[9] {
                    2 => 3,
                    6 => 4,
                    other => panic!("unexpected color type {other}"),
                };
            }
            b"IDAT" => idat.extend_from_slice(data),
            _ => {}
        }
        pos += 12 + len;
    }

    let mut raw = Vec::new();
    flate2::read::ZlibDecoder::new(&idat[..])
        .read_to_end(&mut raw)
        .expect("IDAT inflates");
    raw.chunks(1 + width * channels).map(|row| row[0]).collect()
}

/// A PNG whose header declares `width × height` RGBA pixels but whose
/// image data is empty.
#[cfg(feature = "png")]
pub fn oversized_png(width: u32, height: u32) -> Vec<u8> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().expect("header");
        writer.write_chunk(png::chunk::IDAT, &[]).expect("IDAT");
        // The writer appends IEND when dropped.
    }
    out
}
