//! Unpack driver: bytes to values

use crate::codec::TypeCodec;
use crate::error::StructError;
use crate::types::{FieldSpec, Mode, Value};
use alloc::vec::Vec;

#[cfg(feature = "logging")]
use tracing::debug;

/// Unpack `bytes` following `fields`
///
/// A read cursor advances monotonically. Before a group starts, all of its
/// bytes must be available:
/// - Strict: a shortfall fails the call ([`StructError::NotEnoughBytes`]),
///   which is distinct from a successful empty result
/// - Loose: a shortfall ends the scan and the values decoded so far are returned
///
/// Pad groups only advance the cursor. Trailing bytes are ignored.
pub fn unpack_fields(fields: &[FieldSpec], bytes: &[u8], mode: Mode) -> Result<Vec<Value>, StructError> {
    // Every value occupies at least one byte
    let value_count: usize = fields.iter().map(FieldSpec::value_count).sum();
    let mut values = Vec::with_capacity(value_count.min(bytes.len()));
    let mut cursor = 0;

    for field in fields {
        let group_len = field.byte_len();
        let remaining = bytes.len() - cursor;
        if remaining < group_len {
            if mode.is_strict() {
                return Err(StructError::NotEnoughBytes {
                    needed: fields.iter().map(FieldSpec::byte_len).sum(),
                    available: bytes.len(),
                });
            }

            #[cfg(feature = "logging")]
            debug!(
                "Loose unpack stopped at {:?}: {} bytes left, group needs {}",
                field.code, remaining, group_len
            );

            break;
        }

        let codec = TypeCodec::get(field.code);
        let unit_len = field.unit_len();
        let group = &bytes[cursor..cursor + group_len];
        values.extend(
            group
                .chunks_exact(unit_len)
                .filter_map(|unit| codec.decode(unit, field.order)),
        );
        cursor += group_len;
    }

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::parse;

    fn unpack(format: &str, bytes: &[u8], mode: Mode) -> Result<Vec<Value>, StructError> {
        unpack_fields(&parse(format).unwrap(), bytes, mode)
    }

    #[test]
    fn test_unpack_mixed() {
        assert_eq!(
            unpack(">BHi", &[1, 2, 3, 0xff, 0xff, 0xff, 0xfe], Mode::Strict).unwrap(),
            vec![Value::UInt(1), Value::UInt(0x0203), Value::Int(-2)]
        );
    }

    #[test]
    fn test_pad_only_advances() {
        assert_eq!(
            unpack("<B2xB", &[7, 0xee, 0xee, 9], Mode::Strict).unwrap(),
            vec![Value::UInt(7), Value::UInt(9)]
        );
    }

    #[test]
    fn test_strings() {
        assert_eq!(
            unpack("3s2p", b"a\0c\x01z", Mode::Strict).unwrap(),
            vec![Value::from("a\0c"), Value::from("z")]
        );
    }

    #[test]
    fn test_strict_shortfall_is_distinct_from_empty() {
        assert_eq!(
            unpack("<BB", &[0], Mode::Strict),
            Err(StructError::NotEnoughBytes { needed: 2, available: 1 })
        );
        assert_eq!(unpack("", &[], Mode::Strict), Ok(vec![]));
    }

    #[test]
    fn test_loose_stops_before_short_group() {
        assert_eq!(unpack("<BI", &[2, 10, 0, 0], Mode::Loose).unwrap(), vec![Value::UInt(2)]);
        assert_eq!(
            unpack("<BI", &[2, 10, 0, 0, 0], Mode::Loose).unwrap(),
            vec![Value::UInt(2), Value::UInt(10)]
        );
    }

    #[test]
    fn test_loose_may_return_empty() {
        assert_eq!(unpack("<I", &[1, 2], Mode::Loose).unwrap(), vec![]);
    }

    #[test]
    fn test_huge_counts_on_empty_input() {
        let fields = parse(&"16777216B".repeat(64)).unwrap();
        assert_eq!(unpack_fields(&fields, &[], Mode::Loose).unwrap(), vec![]);
        assert_eq!(
            unpack_fields(&fields, &[], Mode::Strict),
            Err(StructError::NotEnoughBytes { needed: 1 << 30, available: 0 })
        );
        assert_eq!(
            unpack_fields(&fields, &[1, 2, 3], Mode::Loose).unwrap(),
            vec![]
        );
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        assert_eq!(unpack("<B", &[5, 6, 7], Mode::Strict).unwrap(), vec![Value::UInt(5)]);
    }
}
