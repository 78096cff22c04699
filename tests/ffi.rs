//! Drives the C ABI through its exported symbols.

mod common;

use std::ffi::{c_char, c_int};
use std::ptr;

use common::{TempFile, c_path, gradient, init_logging, png_row_filters};
use imgbridge::ffi::{
    EXPORT_FAILED, EXPORT_OK, imgbridge_bmp_export, imgbridge_free, imgbridge_jpeg_export,
    imgbridge_png_export, imgbridge_read,
};

type ExportFn = unsafe extern "C" fn(*const c_char, *const c_char, c_int, c_int, c_int) -> c_int;

/// Call `imgbridge_read`, copy the pixels out, and free the buffer.
fn read_back(file: &TempFile) -> Option<(Vec<u8>, c_int, c_int, c_int)> {
    let name = c_path(&file.0);
    let (mut rows, mut cols, mut channels) = (-1, -1, -1);
    let ptr = unsafe { imgbridge_read(name.as_ptr(), &mut rows, &mut cols, &mut channels) };
    if ptr.is_null() {
        assert_eq!((rows, cols, channels), (0, 0, 0));
        return None;
    }
    let len = (rows * cols * channels) as usize;
    let pixels = unsafe { std::slice::from_raw_parts(ptr.cast::<u8>(), len) }.to_vec();
    unsafe { imgbridge_free(ptr) };
    Some((pixels, rows, cols, channels))
}

fn export(f: ExportFn, file: &TempFile, data: &[u8], rows: c_int, cols: c_int, ch: c_int) -> c_int {
    let name = c_path(&file.0);
    unsafe { f(name.as_ptr(), data.as_ptr().cast(), rows, cols, ch) }
}

#[test]
fn truncated_png_reads_as_null() {
    init_logging();
    let file = TempFile::new("png");
    let mut bytes = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x0D, b'I', b'H']);
    std::fs::write(&file.0, &bytes).unwrap();

    assert!(read_back(&file).is_none());
}

#[test]
fn unsupported_reads_as_null() {
    init_logging();
    let file = TempFile::new("gif");
    std::fs::write(&file.0, b"GIF89a\x01\x00\x01\x00").unwrap();
    assert!(read_back(&file).is_none());

    let empty = TempFile::new("bin");
    std::fs::write(&empty.0, b"").unwrap();
    assert!(read_back(&empty).is_none());
}

#[test]
fn missing_file_reads_as_null() {
    init_logging();
    let file = TempFile::new("png");
    assert!(read_back(&file).is_none());
}

#[cfg(feature = "png")]
#[test]
fn png_export_transcodes_to_rgb() {
    init_logging();
    let file = TempFile::new("png");
    // Four pixels of (255, 0, 0) in blue-green-red order.
    let data = [255u8, 0, 0].repeat(4);
    assert_eq!(export(imgbridge_png_export, &file, &data, 2, 2, 3), EXPORT_OK);

    // The file itself holds red-first samples.
    let encoded = std::fs::read(&file.0).unwrap();
    let decoder = png::Decoder::new(std::io::Cursor::new(&encoded[..]));
    let mut reader = decoder.read_info().unwrap();
    let mut buf = vec![0u8; reader.output_buffer_size().unwrap()];
    reader.next_frame(&mut buf).unwrap();
    assert_eq!(buf, [0u8, 0, 255].repeat(4));

    // Reading it back through the boundary restores the caller's order.
    let (pixels, rows, cols, channels) = read_back(&file).unwrap();
    assert_eq!((rows, cols, channels), (2, 2, 3));
    assert_eq!(pixels, data);
}

#[cfg(feature = "png")]
#[test]
fn png_export_uses_paeth_on_every_row() {
    init_logging();
    for channels in [3, 4] {
        let file = TempFile::new("png");
        let data = gradient(7, 5, channels as usize);
        assert_eq!(export(imgbridge_png_export, &file, &data, 7, 5, channels), EXPORT_OK);

        let encoded = std::fs::read(&file.0).unwrap();
        assert_eq!(png_row_filters(&encoded), vec![4u8; 7]);
    }
}

#[cfg(feature = "png")]
#[test]
fn oversized_png_header_reads_as_null() {
    use imgbridge::{CodecError, bridge};
    use std::time::{Duration, Instant};

    init_logging();
    let file = TempFile::new("png");
    std::fs::write(&file.0, common::oversized_png(20_000, 20_000)).unwrap();

    let started = Instant::now();
    assert!(read_back(&file).is_none());
    assert!(started.elapsed() < Duration::from_secs(2));

    assert!(matches!(bridge::read(&file.0), Err(CodecError::LimitExceeded(_))));
}

#[cfg(unix)]
#[test]
fn non_utf8_filename_roundtrip() {
    use std::ffi::CString;
    use std::os::unix::ffi::{OsStrExt, OsStringExt};

    init_logging();
    let mut raw = common::temp_path("name").into_os_string().into_vec();
    raw.extend_from_slice(b"-\xff\xfe.bmp");
    let file = TempFile(std::ffi::OsString::from_vec(raw).into());
    let name = CString::new(file.0.as_os_str().as_bytes()).unwrap();

    let data = gradient(2, 3, 3);
    let status = unsafe { imgbridge_bmp_export(name.as_ptr(), data.as_ptr().cast(), 2, 3, 3) };
    assert_eq!(status, EXPORT_OK);
    assert!(file.0.exists());

    let (mut r, mut c, mut ch) = (0, 0, 0);
    let ptr = unsafe { imgbridge_read(name.as_ptr(), &mut r, &mut c, &mut ch) };
    assert!(!ptr.is_null());
    assert_eq!((r, c, ch), (2, 3, 3));
    let pixels = unsafe { std::slice::from_raw_parts(ptr.cast::<u8>(), data.len()) }.to_vec();
    unsafe { imgbridge_free(ptr) };
    assert_eq!(pixels, data);
}

#[cfg(feature = "png")]
#[test]
fn png_bgra_roundtrip() {
    init_logging();
    let file = TempFile::new("png");
    let data = gradient(5, 3, 4);
    assert_eq!(export(imgbridge_png_export, &file, &data, 5, 3, 4), EXPORT_OK);

    let (pixels, rows, cols, channels) = read_back(&file).unwrap();
    assert_eq!((rows, cols, channels), (5, 3, 4));
    assert_eq!(pixels, data);
}

#[test]
fn bmp_roundtrip_geometry() {
    init_logging();
    for channels in [3, 4] {
        for (rows, cols) in [(1, 1), (2, 3), (7, 5), (16, 9)] {
            let file = TempFile::new("bmp");
            let data = gradient(rows as usize, cols as usize, channels as usize);
            assert_eq!(
                export(imgbridge_bmp_export, &file, &data, rows, cols, channels),
                EXPORT_OK
            );

            let (pixels, r, c, ch) = read_back(&file).unwrap();
            assert_eq!((r, c), (rows, cols));
            assert_eq!(ch, channels);
            assert_eq!(pixels, data);
        }
    }
}

#[cfg(feature = "jpeg")]
#[test]
fn jpeg_export_reads_back_as_bgr() {
    init_logging();
    let file = TempFile::new("jpg");
    let data = [200u8, 100, 50].repeat(16 * 16);
    assert_eq!(export(imgbridge_jpeg_export, &file, &data, 16, 16, 3), EXPORT_OK);

    let (pixels, rows, cols, channels) = read_back(&file).unwrap();
    assert_eq!((rows, cols, channels), (16, 16, 3));
    for (got, want) in pixels[..3].iter().zip([200u8, 100, 50]) {
        assert!(got.abs_diff(want) < 12, "{got} vs {want}");
    }
}

#[test]
fn invalid_channel_count_fails_without_file() {
    init_logging();
    let data = gradient(2, 2, 4);
    let exports: [ExportFn; 3] = [imgbridge_bmp_export, imgbridge_jpeg_export, imgbridge_png_export];
    for f in exports {
        for channels in [-1, 0, 1, 2, 5, 8] {
            let file = TempFile::new("out");
            assert_eq!(export(f, &file, &data, 2, 2, channels), EXPORT_FAILED);
            assert!(!file.0.exists());
        }
    }
}

#[test]
fn invalid_geometry_fails_without_file() {
    init_logging();
    let data = gradient(2, 2, 3);
    for (rows, cols) in [(0, 2), (2, 0), (-1, 2), (2, -3)] {
        let file = TempFile::new("bmp");
        assert_eq!(
            export(imgbridge_bmp_export, &file, &data, rows, cols, 3),
            EXPORT_FAILED
        );
        assert!(!file.0.exists());
    }
}

#[test]
fn unwritable_destination_fails() {
    init_logging();
    let dir = TempFile::new("dir");
    let file = TempFile(dir.0.join("nested").join("out.bmp"));
    let data = gradient(2, 2, 3);
    assert_eq!(export(imgbridge_bmp_export, &file, &data, 2, 2, 3), EXPORT_FAILED);
}

#[test]
fn null_arguments_fail() {
    init_logging();
    let data = gradient(1, 1, 3);
    let status = unsafe { imgbridge_bmp_export(ptr::null(), data.as_ptr().cast(), 1, 1, 3) };
    assert_eq!(status, EXPORT_FAILED);

    let (mut r, mut c, mut ch) = (1, 1, 1);
    let out = unsafe { imgbridge_read(ptr::null(), &mut r, &mut c, &mut ch) };
    assert!(out.is_null());
    assert_eq!((r, c, ch), (0, 0, 0));

    unsafe { imgbridge_free(ptr::null_mut()) };
}

#[test]
fn single_free_after_read() {
    init_logging();
    let file = TempFile::new("bmp");
    let data = gradient(3, 3, 3);
    assert_eq!(export(imgbridge_bmp_export, &file, &data, 3, 3, 3), EXPORT_OK);

    let name = c_path(&file.0);
    let (mut r, mut c, mut ch) = (0, 0, 0);
    let ptr = unsafe { imgbridge_read(name.as_ptr(), &mut r, &mut c, &mut ch) };
    assert!(!ptr.is_null());
    unsafe { imgbridge_free(ptr) };
}
