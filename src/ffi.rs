//! C ABI.
//!
//! Every function here collapses failures to a sentinel: `imgbridge_read`
//! returns null and zeroes its out-parameters, the export functions return
//! [`EXPORT_FAILED`]. Panics are caught as well, so nothing unwinds into the
//! caller. The underlying [`CodecError`] is logged at `debug` level before
//! it is discarded.
//!
//! Buffers returned by `imgbridge_read` belong to the caller and must be
//! passed to `imgbridge_free` exactly once.

use core::ffi::{c_char, c_int};
use core::panic::AssertUnwindSafe;
use std::ffi::CStr;
use std::panic;
use std::path::Path;

use crate::pixel::{self, ChannelLayout};
use crate::{bridge, CodecError, ImageFormat, TransferredBuffer};

/// Export status on success.
pub const EXPORT_OK: c_int = 0;
/// Export status on any failure.
pub const EXPORT_FAILED: c_int = -1;

/// Run `f`, turning errors and panics into `None`.
fn guard<T>(op: &'static str, f: impl FnOnce() -> Result<T, CodecError>) -> Option<T> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(value)) => Some(value),
        Ok(Err(e)) => {
            log::debug!("{op} failed ({:?}): {e}", e.kind());
            None
        }
        Err(_) => {
            log::error!("{op} panicked");
            None
        }
    }
}

/// # Safety
///
/// `ptr` must be null or a valid NUL-terminated string.
unsafe fn path_arg<'a>(ptr: *const c_char) -> Result<&'a Path, CodecError> {
    if ptr.is_null() {
        return Err(CodecError::NullPointer("filename"));
    }
    // SAFETY: non-null and NUL-terminated per the caller's contract.
    let name = unsafe { CStr::from_ptr(ptr) };
    path_from_c(name)
}

/// Unix paths are raw bytes, so any name the caller can open is accepted.
#[cfg(unix)]
fn path_from_c(name: &CStr) -> Result<&Path, CodecError> {
    use std::os::unix::ffi::OsStrExt;
    Ok(Path::new(std::ffi::OsStr::from_bytes(name.to_bytes())))
}

#[cfg(not(unix))]
fn path_from_c(name: &CStr) -> Result<&Path, CodecError> {
    let name = name.to_str().map_err(|_| CodecError::InvalidPath)?;
    Ok(Path::new(name))
}

fn to_c_int(n: usize) -> Result<c_int, CodecError> {
    c_int::try_from(n).map_err(|_| CodecError::LimitExceeded("dimension exceeds C int".into()))
}

/// Decode the file at `filename` and hand its pixels to the caller.
///
/// On success returns a pointer to `row * col * channels` bytes, BGR when
/// `channels` is 3 and BGRA when it is 4, and fills the out-parameters. On
/// failure returns null and sets every non-null out-parameter to 0.
///
/// # Safety
///
/// `filename` must be null or a NUL-terminated string. `row`, `col` and
/// `channels` must each be null or valid for a write of one `int`. A null
/// out-parameter makes the call fail.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn imgbridge_read(
    filename: *const c_char,
    row: *mut c_int,
    col: *mut c_int,
    channels: *mut c_int,
) -> *mut c_char {
    let result = guard("imgbridge_read", || {
        if row.is_null() || col.is_null() || channels.is_null() {
            return Err(CodecError::NullPointer("geometry out-parameter"));
        }
        // SAFETY: forwarded from this function's contract.
        let path = unsafe { path_arg(filename)? };
        let image = bridge::read(path)?;

        let geometry = (
            to_c_int(image.rows())?,
            to_c_int(image.cols())?,
            to_c_int(image.channels())?,
        );
        let buffer = TransferredBuffer::from_image(image)?;
        Ok((buffer.into_raw(), geometry))
    });

    let (ptr, (r, c, ch)) = match result {
        Some(ok) => ok,
        None => (core::ptr::null_mut(), (0, 0, 0)),
    };
    for (out, value) in [(row, r), (col, c), (channels, ch)] {
        if !out.is_null() {
            // SAFETY: non-null out-parameters are writable per the contract.
            unsafe { out.write(value) };
        }
    }
    ptr.cast()
}

/// Shared body of the export functions.
///
/// # Safety
///
/// See [`imgbridge_bmp_export`].
unsafe fn export(
    op: &'static str,
    format: ImageFormat,
    filename: *const c_char,
    data: *const c_char,
    row: c_int,
    col: c_int,
    channels: c_int,
) -> c_int {
    let done = guard(op, || {
        let layout = ChannelLayout::from_channels(channels)?;
        let (rows, cols) = pixel::geometry(row, col)?;
        let len = layout.buffer_len(rows, cols)?;
        if len > isize::MAX as usize {
            return Err(CodecError::dimensions(row, col));
        }
        if data.is_null() {
            return Err(CodecError::NullPointer("data"));
        }
        // SAFETY: forwarded from the caller's contract.
        let path = unsafe { path_arg(filename)? };
        // SAFETY: the caller guarantees `data` covers row * col * channels
        // bytes, which is `len`, for the duration of this call.
        let bytes = unsafe { core::slice::from_raw_parts(data.cast::<u8>(), len) };
        bridge::export(path, format, bytes, row, col, channels)
    });
    match done {
        Some(()) => EXPORT_OK,
        None => EXPORT_FAILED,
    }
}

/// Encode `row × col` pixels as BMP and write them to `filename`.
///
/// `channels` is 3 for BGR or 4 for BGRA. Returns 0 on success and -1 on
/// any failure, in which case no file is created unless the failure
/// happened while writing.
///
/// # Safety
///
/// `filename` must be null or a NUL-terminated string. `data` must be null
/// or point to at least `row * col * channels` readable bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn imgbridge_bmp_export(
    filename: *const c_char,
    data: *const c_char,
    row: c_int,
    col: c_int,
    channels: c_int,
) -> c_int {
    unsafe {
        export(
            "imgbridge_bmp_export",
            ImageFormat::Bmp,
            filename,
            data,
            row,
            col,
            channels,
        )
    }
}

/// Encode as JPEG. Same contract as [`imgbridge_bmp_export`]; alpha is
/// discarded.
///
/// # Safety
///
/// See [`imgbridge_bmp_export`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn imgbridge_jpeg_export(
    filename: *const c_char,
    data: *const c_char,
    row: c_int,
    col: c_int,
    channels: c_int,
) -> c_int {
    unsafe {
        export(
            "imgbridge_jpeg_export",
            ImageFormat::Jpeg,
            filename,
            data,
            row,
            col,
            channels,
        )
    }
}

/// Encode as PNG. Same contract as [`imgbridge_bmp_export`]; pixels are
/// stored as RGB/RGBA with the Paeth filter on every scanline.
///
/// # Safety
///
/// See [`imgbridge_bmp_export`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn imgbridge_png_export(
    filename: *const c_char,
    data: *const c_char,
    row: c_int,
    col: c_int,
    channels: c_int,
) -> c_int {
    unsafe {
        export(
            "imgbridge_png_export",
            ImageFormat::Png,
            filename,
            data,
            row,
            col,
            channels,
        )
    }
}

/// Release a buffer returned by [`imgbridge_read`]. Null is ignored.
///
/// # Safety
///
/// `ptr` must be null or a pointer returned by `imgbridge_read` that has not
/// been freed. Freeing twice is undefined behavior.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn imgbridge_free(ptr: *mut c_char) {
    // SAFETY: forwarded from this function's contract.
    unsafe { TransferredBuffer::release(ptr.cast()) }
}
