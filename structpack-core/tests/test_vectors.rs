//! Known-answer vectors for 64-bit integers and strict/loose length handling
//!
//! Byte sequences were cross-checked against Python's `struct` module.

use structpack_core::{pack, unpack, Mode, StructError, Value};

fn packed(format: &str, values: &[Value], mode: Mode) -> Vec<u8> {
    pack(format, values, mode).unwrap().to_vec()
}

// 228290380562207 = 0x0000cfa0ff09ff1f
const LONG_LE: [u8; 8] = [0x1f, 0xff, 0x09, 0xff, 0xa0, 0xcf, 0x00, 0x00];
// -228290380562207 = 0xffff305f00f600e1 as two's complement
const NEG_LONG_LE: [u8; 8] = [0xe1, 0x00, 0xf6, 0x00, 0x5f, 0x30, 0xff, 0xff];

#[test]
fn long_pack_unsigned_le() {
    assert_eq!(
        packed("<Q", &[Value::UInt(228290380562207)], Mode::Strict),
        LONG_LE
    );
}

#[test]
fn long_unpack_unsigned_le() {
    let values = unpack("<Q", &LONG_LE, Mode::Strict).unwrap();
    assert_eq!(values, vec![Value::UInt(0x0000cfa0ff09ff1f)]);
}

#[test]
fn long_pack_signed_le() {
    assert_eq!(
        packed("<q", &[Value::Int(-228290380562207)], Mode::Strict),
        NEG_LONG_LE
    );
}

#[test]
fn long_unpack_signed_le() {
    let values = unpack("<q", &NEG_LONG_LE, Mode::Strict).unwrap();
    assert_eq!(values, vec![Value::Int(-228290380562207)]);
    // Same bits read through Q
    let unsigned = unpack("<Q", &NEG_LONG_LE, Mode::Strict).unwrap();
    assert_eq!(unsigned, vec![Value::UInt(0xffff305f00f600e1)]);
}

// 0xffa0ffe1ffff
const MID_LE: [u8; 8] = [0xff, 0xff, 0xe1, 0xff, 0xa0, 0xff, 0x00, 0x00];
const MID_BE: [u8; 8] = [0x00, 0x00, 0xff, 0xa0, 0xff, 0xe1, 0xff, 0xff];

#[test]
fn int64_pack_both_orders() {
    assert_eq!(packed("<Q", &[Value::UInt(0xffa0ffe1ffff)], Mode::Strict), MID_LE);
    assert_eq!(packed(">Q", &[Value::UInt(0xffa0ffe1ffff)], Mode::Strict), MID_BE);
}

#[test]
fn int64_unpack_both_orders() {
    assert_eq!(
        unpack("<Q", &MID_LE, Mode::Strict).unwrap(),
        vec![Value::UInt(0xffa0ffe1ffff)]
    );
    assert_eq!(
        unpack(">Q", &MID_BE, Mode::Strict).unwrap(),
        vec![Value::UInt(0xffa0ffe1ffff)]
    );
}

#[test]
fn int64_signed_code_positive_value() {
    assert_eq!(packed(">q", &[Value::UInt(0xffa0ffe1ffff)], Mode::Strict), MID_BE);
    assert_eq!(packed(">q", &[Value::Int(0xffa0ffe1ffff)], Mode::Strict), MID_BE);
    assert_eq!(
        unpack("<q", &MID_LE, Mode::Strict).unwrap(),
        vec![Value::Int(0xffa0ffe1ffff)]
    );
}

#[test]
fn boundary_all_ones() {
    let ones = [0xffu8; 8];
    for format in ["<Q", ">Q"] {
        assert_eq!(
            unpack(format, &ones, Mode::Strict).unwrap(),
            vec![Value::UInt(u64::MAX)]
        );
        assert_eq!(packed(format, &[Value::UInt(u64::MAX)], Mode::Strict), ones);
    }
    assert_eq!(unpack(">q", &ones, Mode::Strict).unwrap(), vec![Value::Int(-1)]);
}

#[test]
fn boundary_zero() {
    let zeros = [0u8; 8];
    for format in ["<Q", ">Q"] {
        assert_eq!(unpack(format, &zeros, Mode::Strict).unwrap(), vec![Value::UInt(0)]);
        assert_eq!(packed(format, &[Value::UInt(0)], Mode::Strict), zeros);
        assert_eq!(packed(format, &[Value::Int(0)], Mode::Strict), zeros);
    }
}

#[test]
fn boundary_repeated_bytes() {
    for (byte, value) in [(0x01u8, 0x0101010101010101u64), (0xfe, 0xfefefefefefefefe)] {
        let bytes = [byte; 8];
        for format in ["<Q", ">Q"] {
            assert_eq!(unpack(format, &bytes, Mode::Strict).unwrap(), vec![Value::UInt(value)]);
            assert_eq!(packed(format, &[Value::UInt(value)], Mode::Strict), bytes);
        }
    }
}

#[test]
fn int64_signed_extremes() {
    assert_eq!(
        packed(">q", &[Value::Int(i64::MIN)], Mode::Strict),
        [0x80, 0, 0, 0, 0, 0, 0, 0]
    );
    assert_eq!(
        packed(">q", &[Value::Int(i64::MAX)], Mode::Strict),
        [0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]
    );
}

#[test]
fn strict_pack_less_data_fails() {
    assert!(matches!(
        pack("<BB", &[Value::UInt(0)], Mode::Strict),
        Err(StructError::NotEnoughValues { .. })
    ));
}

#[test]
fn strict_unpack_less_data_fails() {
    assert!(matches!(
        unpack("<BB", &[0], Mode::Strict),
        Err(StructError::NotEnoughBytes { .. })
    ));
}

#[test]
fn loose_pack_less_data() {
    assert_eq!(packed("<BB", &[Value::UInt(2)], Mode::Loose), [0x02]);
}

#[test]
fn loose_pack_less_data_series() {
    // 3B needs three values but only one is left, so the group is dropped whole
    assert_eq!(
        packed("<B3B", &[Value::UInt(2), Value::UInt(4)], Mode::Loose),
        [0x02]
    );
}

#[test]
fn loose_unpack_less_data() {
    assert_eq!(unpack("<BB", &[2], Mode::Loose).unwrap(), vec![Value::UInt(2)]);
}

#[test]
fn loose_unpack_cut_before_int() {
    // Only three bytes left for a four-byte I
    assert_eq!(
        unpack("<BI", &[2, 10, 0, 0], Mode::Loose).unwrap(),
        vec![Value::UInt(2)]
    );
}

#[test]
fn loose_unpack_int_exactly_fits() {
    assert_eq!(
        unpack("<BI", &[2, 10, 0, 0, 0], Mode::Loose).unwrap(),
        vec![Value::UInt(2), Value::UInt(10)]
    );
}

#[test]
fn loose_unpack_less_data_series() {
    // B and I fit, 3B needs three bytes but only one remains
    assert_eq!(
        unpack("<BI3B", &[2, 10, 0, 0, 0, 4], Mode::Loose).unwrap(),
        vec![Value::UInt(2), Value::UInt(10)]
    );
}

#[test]
fn format_errors_escape_loose_mode() {
    assert!(matches!(
        pack("<B?", &[Value::UInt(1)], Mode::Loose),
        Err(StructError::UnknownTypeCode { code: '?', position: 2 })
    ));
    assert!(matches!(
        unpack("<3", &[1, 2, 3], Mode::Loose),
        Err(StructError::DanglingCount { position: 1 })
    ));
}
