//! # Structpack Core
//!
//! Format-string driven conversion between typed scalar values and flat byte buffers.
//!
//! ```
//! use structpack_core::{pack, unpack, Mode, Value};
//!
//! let bytes = pack("<BH", &[Value::from(1u8), Value::from(0x0203u16)], Mode::Strict).unwrap();
//! assert_eq!(&bytes[..], &[1, 3, 2]);
//! assert_eq!(
//!     unpack("<BH", &bytes, Mode::Strict).unwrap(),
//!     vec![Value::UInt(1), Value::UInt(0x0203)]
//! );
//! ```
//!
//! ## Modules
//!
//! - `constants`: Grammar characters and limits
//! - `types`: Core types (Value, ByteOrder, Mode, FieldSpec)
//! - `codec`: Static per-type encode/decode table
//! - `format`: Format-string parser and `Layout`
//! - `packer`: Pack driver
//! - `unpacker`: Unpack driver
//! - `cache`: Process-wide layout cache (std only)

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

#[cfg(feature = "std")]
pub mod cache;
pub mod codec;
pub mod constants;
pub mod error;
pub mod format;
pub mod packer;
pub mod types;
pub mod unpacker;

// Re-export commonly used types
pub use codec::TypeCodec;
pub use error::StructError;
pub use format::{parse, Layout};
pub use types::{ByteOrder, FieldSpec, Mode, TypeCode, Value};

use alloc::vec::Vec;
use bytes::Bytes;

/// Result type alias for structpack operations
pub type Result<T> = core::result::Result<T, StructError>;

#[cfg(feature = "std")]
fn with_layout<T>(format: &str, f: impl FnOnce(&Layout) -> Result<T>) -> Result<T> {
    let layout = cache::layout(format)?;
    f(&*layout)
}

#[cfg(not(feature = "std"))]
fn with_layout<T>(format: &str, f: impl FnOnce(&Layout) -> Result<T>) -> Result<T> {
    f(&Layout::parse(format)?)
}

/// Total number of bytes described by `format`
pub fn calc_length(format: &str) -> Result<usize> {
    with_layout(format, |layout| Ok(layout.calc_length()))
}

/// Pack `values` according to `format`
///
/// Format errors, out-of-range and mismatched values always fail. A shortage
/// of values fails in [`Mode::Strict`] and truncates the output in [`Mode::Loose`].
pub fn pack(format: &str, values: &[Value], mode: Mode) -> Result<Bytes> {
    with_layout(format, |layout| layout.pack(values, mode))
}

/// Pack `values` into `buf` at `offset`, returning the number of bytes written
pub fn pack_into(
    format: &str,
    buf: &mut [u8],
    offset: usize,
    values: &[Value],
    mode: Mode,
) -> Result<usize> {
    with_layout(format, |layout| layout.pack_into(buf, offset, values, mode))
}

/// Unpack `bytes` according to `format`
///
/// A shortage of bytes fails in [`Mode::Strict`] and yields the decoded prefix
/// in [`Mode::Loose`].
pub fn unpack(format: &str, bytes: &[u8], mode: Mode) -> Result<Vec<Value>> {
    with_layout(format, |layout| layout.unpack(bytes, mode))
}

/// Unpack `bytes` starting at `offset`
pub fn unpack_from(format: &str, bytes: &[u8], offset: usize, mode: Mode) -> Result<Vec<Value>> {
    with_layout(format, |layout| layout.unpack_from(bytes, offset, mode))
}
