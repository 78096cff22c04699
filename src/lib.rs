//! # imgbridge
//!
//! A C ABI for decoding BMP, JPEG, and PNG files into raw BGR/BGRA pixel
//! buffers and encoding such buffers back to any of the three formats.
//!
//! The format of an input file is sniffed from its leading bytes; the
//! caller never names it. Decoded buffers are handed over to the caller,
//! who releases them with `imgbridge_free`. See `include/imgbridge.h`.
//!
//! JPEG and PNG are feature-gated; BMP is always available:
//!
//! ```toml
//! [dependencies]
//! imgbridge = { version = "0.1", default-features = false, features = ["png"] }
//! ```
//!
//! ## Rust usage
//!
//! ```rust,no_run
//! use imgbridge::{ChannelLayout, DecodeRequest, EncodeRequest, ImageFormat, PixelView};
//!
//! let data: &[u8] = &[]; // your image bytes
//! let decoded = DecodeRequest::new(data).decode()?;
//!
//! // Re-encode the BGR(A) pixels as PNG
//! let png = EncodeRequest::new(ImageFormat::Png).encode(decoded.image.view())?;
//!
//! // Or wrap foreign bytes without copying
//! let bgr = vec![0u8; 4 * 4 * 3];
//! let view = PixelView::wrap(&bgr, 4, 4, ChannelLayout::Bgr8)?;
//! let bmp = EncodeRequest::new(ImageFormat::Bmp).encode(view)?;
//! # Ok::<(), imgbridge::CodecError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn)]

extern crate alloc;

mod config;
mod decode;
mod encode;
mod error;
mod format;
mod limits;
mod transfer;

pub mod bridge;
pub mod codecs;
pub mod ffi;
pub mod io;
pub mod pixel;

pub use codecs::{Codec, codec_for};
pub use config::{DEFAULT_JPEG_QUALITY, EncodeConfig};
#[cfg(feature = "png")]
pub use config::png_codec;
pub use decode::{DecodeOutput, DecodeRequest};
pub use encode::{EncodeOutput, EncodeRequest};
pub use error::{CodecError, ErrorKind};
pub use format::{ImageFormat, classify};
pub use limits::{BOUNDARY_MAX_MEMORY, BOUNDARY_MAX_PIXELS, Limits};
pub use pixel::{ChannelLayout, DecodedImage, PixelView};
pub use transfer::TransferredBuffer;
