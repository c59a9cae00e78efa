//! Core types shared by the parser, the codec table and the drivers

use crate::constants::{
    ORDER_BIG, ORDER_LITTLE, ORDER_NATIVE, ORDER_NATIVE_STANDARD, ORDER_NETWORK,
};
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// Byte order applied to multi-byte scalars
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ByteOrder {
    /// Least-significant byte first
    Little,
    /// Most-significant byte first
    Big,
}

impl ByteOrder {
    /// Byte order of the compilation target
    pub const fn native() -> Self {
        if cfg!(target_endian = "little") {
            ByteOrder::Little
        } else {
            ByteOrder::Big
        }
    }

    /// Map a byte-order marker character to its order
    pub const fn from_marker(marker: char) -> Option<Self> {
        match marker {
            ORDER_NATIVE | ORDER_NATIVE_STANDARD => Some(Self::native()),
            ORDER_LITTLE => Some(ByteOrder::Little),
            ORDER_BIG | ORDER_NETWORK => Some(ByteOrder::Big),
            _ => None,
        }
    }
}

impl Default for ByteOrder {
    fn default() -> Self {
        Self::native()
    }
}

/// How the drivers react when values (pack) or bytes (unpack) run out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Any shortfall fails the whole call; no partial result is returned
    #[default]
    Strict,
    /// A shortfall ends the scan and the prefix produced so far is returned
    Loose,
}

impl Mode {
    /// Build a mode from a "loose" flag
    pub const fn from_loose(loose: bool) -> Self {
        if loose {
            Mode::Loose
        } else {
            Mode::Strict
        }
    }

    /// True for [`Mode::Strict`]
    pub const fn is_strict(&self) -> bool {
        matches!(self, Mode::Strict)
    }
}

/// A type code of the format grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeCode {
    /// `x`: pad byte, carries no value
    Pad,
    /// `b`
    I8,
    /// `B`
    U8,
    /// `h`
    I16,
    /// `H`
    U16,
    /// `i`
    I32,
    /// `I`
    U32,
    /// `l`, alias of `i`
    Long,
    /// `L`, alias of `I`
    ULong,
    /// `q`
    I64,
    /// `Q`
    U64,
    /// `f`
    F32,
    /// `d`
    F64,
    /// `s`: fixed-length byte string, the repeat count is its length
    Str,
    /// `p`: length-prefixed byte string, the repeat count is its total length
    Pascal,
}

impl TypeCode {
    /// Resolve a format character
    pub const fn from_char(c: char) -> Option<Self> {
        Some(match c {
            'x' => TypeCode::Pad,
            'b' => TypeCode::I8,
            'B' => TypeCode::U8,
            'h' => TypeCode::I16,
            'H' => TypeCode::U16,
            'i' => TypeCode::I32,
            'I' => TypeCode::U32,
            'l' => TypeCode::Long,
            'L' => TypeCode::ULong,
            'q' => TypeCode::I64,
            'Q' => TypeCode::U64,
            'f' => TypeCode::F32,
            'd' => TypeCode::F64,
            's' => TypeCode::Str,
            'p' => TypeCode::Pascal,
            _ => return None,
        })
    }

    /// The format character for this code
    pub const fn as_char(&self) -> char {
        match self {
            TypeCode::Pad => 'x',
            TypeCode::I8 => 'b',
            TypeCode::U8 => 'B',
            TypeCode::I16 => 'h',
            TypeCode::U16 => 'H',
            TypeCode::I32 => 'i',
            TypeCode::U32 => 'I',
            TypeCode::Long => 'l',
            TypeCode::ULong => 'L',
            TypeCode::I64 => 'q',
            TypeCode::U64 => 'Q',
            TypeCode::F32 => 'f',
            TypeCode::F64 => 'd',
            TypeCode::Str => 's',
            TypeCode::Pascal => 'p',
        }
    }

    /// String codes treat the repeat count as a length, not as a number of values
    pub const fn is_string(&self) -> bool {
        matches!(self, TypeCode::Str | TypeCode::Pascal)
    }

    /// Pad codes occupy bytes but never a value slot
    pub const fn is_pad(&self) -> bool {
        matches!(self, TypeCode::Pad)
    }
}

/// One parsed group of a format string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    /// Repeat count (string length for `s` and `p`), always at least 1
    pub count: usize,

    /// Type code of the group
    pub code: TypeCode,

    /// Byte order active when the group was parsed
    pub order: ByteOrder,

    /// Width in bytes of one element of this type code
    pub size: usize,
}

impl FieldSpec {
    /// Total bytes covered by the group
    pub const fn byte_len(&self) -> usize {
        self.count * self.size
    }

    /// Number of encode/decode steps the drivers run for this group
    pub const fn units(&self) -> usize {
        if self.code.is_string() {
            1
        } else {
            self.count
        }
    }

    /// Bytes covered by a single unit
    pub const fn unit_len(&self) -> usize {
        if self.code.is_string() {
            self.byte_len()
        } else {
            self.size
        }
    }

    /// Values this group consumes on pack and produces on unpack
    pub const fn value_count(&self) -> usize {
        if self.code.is_pad() {
            0
        } else {
            self.units()
        }
    }
}

/// A scalar flowing in or out of the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Signed integer, produced by `b h i l q`
    Int(i64),
    /// Unsigned integer, produced by `B H I L Q`
    UInt(u64),
    /// Floating point, produced by `f` and `d`
    Float(f64),
    /// Raw bytes, produced by `s` and `p`
    Bytes(Vec<u8>),
}

impl Value {
    /// Variant name used in diagnostics
    pub const fn kind(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::UInt(_) => "uint",
            Value::Float(_) => "float",
            Value::Bytes(_) => "bytes",
        }
    }

    /// Signed view, if the value is an integer that fits in `i64`
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::Int(v) => Some(v),
            Value::UInt(v) => i64::try_from(v).ok(),
            _ => None,
        }
    }

    /// Unsigned view, if the value is a non-negative integer
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Value::Int(v) => u64::try_from(v).ok(),
            Value::UInt(v) => Some(v),
            _ => None,
        }
    }

    /// Float payload
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Float(v) => Some(v),
            _ => None,
        }
    }

    /// Byte payload
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }
}

macro_rules! impl_value_from {
    ($variant:ident, $target:ty, $($ty:ty),+) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(<$target>::from(v))
                }
            }
        )+
    };
}

impl_value_from!(Int, i64, i8, i16, i32, i64);
impl_value_from!(UInt, u64, u8, u16, u32, u64);
impl_value_from!(Float, f64, f32, f64);

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Bytes(v.to_vec())
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Bytes(v.as_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_mapping() {
        assert_eq!(ByteOrder::from_marker('<'), Some(ByteOrder::Little));
        assert_eq!(ByteOrder::from_marker('>'), Some(ByteOrder::Big));
        assert_eq!(ByteOrder::from_marker('!'), Some(ByteOrder::Big));
        assert_eq!(ByteOrder::from_marker('='), Some(ByteOrder::native()));
        assert_eq!(ByteOrder::from_marker('@'), Some(ByteOrder::native()));
        assert_eq!(ByteOrder::from_marker('B'), None);
    }

    #[test]
    fn test_type_code_chars() {
        for c in crate::constants::TYPE_CHARS.chars() {
            let code = TypeCode::from_char(c).unwrap();
            assert_eq!(code.as_char(), c);
        }
        assert_eq!(TypeCode::from_char('z'), None);
    }

    #[test]
    fn test_string_group_is_one_unit() {
        let spec = FieldSpec {
            count: 10,
            code: TypeCode::Str,
            order: ByteOrder::Big,
            size: 1,
        };
        assert_eq!(spec.units(), 1);
        assert_eq!(spec.unit_len(), 10);
        assert_eq!(spec.byte_len(), 10);
    }

    #[test]
    fn test_pad_group_has_no_values() {
        let spec = FieldSpec {
            count: 3,
            code: TypeCode::Pad,
            order: ByteOrder::Little,
            size: 1,
        };
        assert_eq!(spec.units(), 3);
        assert_eq!(spec.value_count(), 0);
    }

    #[test]
    fn test_integer_views() {
        assert_eq!(Value::from(-1i32).as_u64(), None);
        assert_eq!(Value::from(u64::MAX).as_i64(), None);
        assert_eq!(Value::from(7u8).as_i64(), Some(7));
        assert_eq!(Value::from("ab").as_bytes(), Some(&b"ab"[..]));
    }
}
