//! Per-type encode/decode table
//!
//! Every type code maps to one static [`TypeCodec`] entry holding its width and
//! its value class. Integers are serialized by emitting the big-endian byte
//! sequence and reversing it for little-endian output; decoding reverses first
//! and then folds the bytes with shift-and-combine.
//!
//! Range policy: integer codes up to 32 bits reject values outside their
//! range with [`StructError::OutOfRange`]. The 64-bit codes `q` and `Q` wrap
//! modulo 2^64, so any `Int` or `UInt` is accepted and both codes produce the
//! same bytes for the same bit pattern. For `f`, a finite value whose nearest
//! binary32 is infinite fails with [`StructError::FloatOverflow`]; infinities
//! and NaN pass through unchanged.

use crate::constants::{MAX_PASCAL_LEN, PAD_BYTE};
use crate::error::StructError;
use crate::types::{ByteOrder, TypeCode, Value};
use bytes::{BufMut, BytesMut};

/// Value class of a type code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecKind {
    /// Zero byte, no value
    Pad,
    /// Two's-complement integer
    Signed,
    /// Unsigned integer
    Unsigned,
    /// IEEE-754 float of the codec width
    Float,
    /// Fixed-length byte string
    Str,
    /// Byte string with a one-byte length prefix
    Pascal,
}

/// One entry of the codec table
#[derive(Debug, PartialEq, Eq)]
pub struct TypeCodec {
    /// Type code served by this entry
    pub code: TypeCode,
    /// Width in bytes of one element
    pub width: usize,
    /// Value class
    pub kind: CodecKind,
}

const fn entry(code: TypeCode, width: usize, kind: CodecKind) -> TypeCodec {
    TypeCodec { code, width, kind }
}

/// The codec table, indexed by `TypeCode as usize`
pub static CODECS: [TypeCodec; 15] = [
    entry(TypeCode::Pad, 1, CodecKind::Pad),
    entry(TypeCode::I8, 1, CodecKind::Signed),
    entry(TypeCode::U8, 1, CodecKind::Unsigned),
    entry(TypeCode::I16, 2, CodecKind::Signed),
    entry(TypeCode::U16, 2, CodecKind::Unsigned),
    entry(TypeCode::I32, 4, CodecKind::Signed),
    entry(TypeCode::U32, 4, CodecKind::Unsigned),
    entry(TypeCode::Long, 4, CodecKind::Signed),
    entry(TypeCode::ULong, 4, CodecKind::Unsigned),
    entry(TypeCode::I64, 8, CodecKind::Signed),
    entry(TypeCode::U64, 8, CodecKind::Unsigned),
    entry(TypeCode::F32, 4, CodecKind::Float),
    entry(TypeCode::F64, 8, CodecKind::Float),
    entry(TypeCode::Str, 1, CodecKind::Str),
    entry(TypeCode::Pascal, 1, CodecKind::Pascal),
];

impl TypeCodec {
    /// Entry for a type code
    pub fn get(code: TypeCode) -> &'static TypeCodec {
        &CODECS[code as usize]
    }

    /// Entry for a format character, if it is a type code
    pub fn lookup(c: char) -> Option<&'static TypeCodec> {
        TypeCode::from_char(c).map(Self::get)
    }

    /// True for signed integer codes
    pub const fn is_signed(&self) -> bool {
        matches!(self.kind, CodecKind::Signed)
    }

    /// Encode one unit of `unit_len` bytes into `out`
    ///
    /// `unit_len` equals the width for scalars and the repeat count for strings.
    pub fn encode(
        &self,
        value: &Value,
        unit_len: usize,
        order: ByteOrder,
        out: &mut BytesMut,
    ) -> Result<(), StructError> {
        match self.kind {
            CodecKind::Pad => out.put_bytes(PAD_BYTE, unit_len),
            CodecKind::Signed | CodecKind::Unsigned => {
                let raw = self.integer_bits(value)?;
                put_uint(out, raw, self.width, order);
            }
            CodecKind::Float => {
                let v = value.as_f64().ok_or_else(|| self.mismatch(value))?;
                let raw = if self.width == 4 {
                    let narrowed = v as f32;
                    if narrowed.is_infinite() && v.is_finite() {
                        return Err(StructError::FloatOverflow {
                            code: self.code.as_char(),
                        });
                    }
                    u64::from(narrowed.to_bits())
                } else {
                    v.to_bits()
                };
                put_uint(out, raw, self.width, order);
            }
            CodecKind::Str => {
                let data = value.as_bytes().ok_or_else(|| self.mismatch(value))?;
                let n = data.len().min(unit_len);
                out.put_slice(&data[..n]);
                out.put_bytes(PAD_BYTE, unit_len - n);
            }
            CodecKind::Pascal => {
                let data = value.as_bytes().ok_or_else(|| self.mismatch(value))?;
                let n = data
                    .len()
                    .min(unit_len.saturating_sub(1))
                    .min(MAX_PASCAL_LEN);
                out.put_u8(n as u8);
                out.put_slice(&data[..n]);
                out.put_bytes(PAD_BYTE, unit_len.saturating_sub(n + 1));
            }
        }
        Ok(())
    }

    /// Decode one unit; `bytes` holds exactly the unit's bytes
    ///
    /// Returns `None` for pad codes.
    pub fn decode(&self, bytes: &[u8], order: ByteOrder) -> Option<Value> {
        let value = match self.kind {
            CodecKind::Pad => return None,
            CodecKind::Signed => {
                let shift = 64 - 8 * self.width as u32;
                let raw = accumulate(bytes, order);
                Value::Int(((raw << shift) as i64) >> shift)
            }
            CodecKind::Unsigned => Value::UInt(accumulate(bytes, order)),
            CodecKind::Float => {
                let raw = accumulate(bytes, order);
                if self.width == 4 {
                    Value::Float(f64::from(f32::from_bits(raw as u32)))
                } else {
                    Value::Float(f64::from_bits(raw))
                }
            }
            CodecKind::Str => Value::Bytes(bytes.to_vec()),
            CodecKind::Pascal => {
                let (&len, data) = bytes.split_first()?;
                let n = usize::from(len).min(data.len());
                Value::Bytes(data[..n].to_vec())
            }
        };
        Some(value)
    }

    /// Bit pattern of an integer value, checked against the codec width
    fn integer_bits(&self, value: &Value) -> Result<u64, StructError> {
        let wide = match *value {
            Value::Int(v) => i128::from(v),
            Value::UInt(v) => i128::from(v),
            _ => return Err(self.mismatch(value)),
        };

        let bits = 8 * self.width as u32;
        if bits == 64 {
            // Wraps modulo 2^64
            return Ok(wide as u64);
        }

        let (min, max) = if self.is_signed() {
            (-(1i128 << (bits - 1)), (1i128 << (bits - 1)) - 1)
        } else {
            (0, (1i128 << bits) - 1)
        };
        if wide < min || wide > max {
            return Err(StructError::OutOfRange {
                code: self.code.as_char(),
                value: wide,
            });
        }

        Ok((wide as u64) & ((1u64 << bits) - 1))
    }

    fn mismatch(&self, value: &Value) -> StructError {
        StructError::TypeMismatch {
            code: self.code.as_char(),
            found: value.kind(),
        }
    }
}

/// Write the low `width` bytes of `raw` in the requested order
fn put_uint(out: &mut BytesMut, raw: u64, width: usize, order: ByteOrder) {
    let be = raw.to_be_bytes();
    let bytes = &be[be.len() - width..];
    match order {
        ByteOrder::Big => out.put_slice(bytes),
        ByteOrder::Little => {
            for &b in bytes.iter().rev() {
                out.put_u8(b);
            }
        }
    }
}

/// Fold up to 8 bytes into an integer, most-significant byte first after ordering
fn accumulate(bytes: &[u8], order: ByteOrder) -> u64 {
    let combine = |acc: u64, &b: &u8| (acc << 8) | u64::from(b);
    match order {
        ByteOrder::Big => bytes.iter().fold(0, combine),
        ByteOrder::Little => bytes.iter().rev().fold(0, combine),
    }
}
