//! JSON <-> value conversion driven by a layout's value slots

use anyhow::{bail, Context, Result};
use serde_json::Value as Json;
use structpack_core::{codec::CodecKind, FieldSpec, Layout, TypeCodec, Value};

/// Convert JSON items to values, using the field each item lands in to pick the variant
///
/// Numbers become `Float` for `f`/`d` and `Int`/`UInt` for integer codes.
/// Strings (UTF-8) and arrays of 0..=255 become `Bytes` for `s`/`p`.
/// Items beyond the layout's value slots are dropped, as pack would ignore them.
pub fn json_to_values(layout: &Layout, items: &[Json]) -> Result<Vec<Value>> {
    layout
        .value_slots()
        .zip(items)
        .enumerate()
        .map(|(i, (slot, item))| {
            convert_item(slot, item).with_context(|| format!("Invalid value at index {}", i))
        })
        .collect()
}

fn convert_item(slot: &FieldSpec, item: &Json) -> Result<Value> {
    let codec = TypeCodec::get(slot.code);
    let code = slot.code.as_char();

    match codec.kind {
        CodecKind::Float => match item.as_f64() {
            Some(v) => Ok(Value::Float(v)),
            None => bail!("type code '{}' expects a number, got {}", code, item),
        },
        CodecKind::Signed | CodecKind::Unsigned => {
            let Json::Number(n) = item else {
                bail!("type code '{}' expects an integer, got {}", code, item);
            };
            match (n.as_i64(), n.as_u64()) {
                (Some(v), _) if codec.is_signed() => Ok(Value::Int(v)),
                (_, Some(v)) => Ok(Value::UInt(v)),
                (Some(v), _) => Ok(Value::Int(v)),
                _ => bail!("type code '{}' expects an integer, got {}", code, n),
            }
        }
        CodecKind::Str | CodecKind::Pascal => match item {
            Json::String(s) => Ok(Value::from(s.as_str())),
            Json::Array(items) => items
                .iter()
                .map(|b| {
                    b.as_u64()
                        .and_then(|v| u8::try_from(v).ok())
                        .with_context(|| format!("byte string element {} is not in 0..=255", b))
                })
                .collect::<Result<Vec<u8>>>()
                .map(Value::Bytes),
            _ => bail!("type code '{}' expects a string or byte array, got {}", code, item),
        },
        CodecKind::Pad => bail!("pad fields take no value"),
    }
}

/// Render a value as JSON; byte strings become lossy UTF-8 text when `bytes_as_text` is set
pub fn value_to_json(value: &Value, bytes_as_text: bool) -> Result<Json> {
    match value {
        Value::Bytes(b) if bytes_as_text => Ok(Json::String(String::from_utf8_lossy(b).into_owned())),
        other => serde_json::to_value(other).context("Failed to serialize value"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numbers_follow_slot_kind() {
        let layout = Layout::parse("<bBdQ").unwrap();
        let items = [json!(-3), json!(200), json!(2), json!(18446744073709551615u64)];
        let values = json_to_values(&layout, &items).unwrap();
        assert_eq!(
            values,
            vec![
                Value::Int(-3),
                Value::UInt(200),
                Value::Float(2.0),
                Value::UInt(u64::MAX)
            ]
        );
    }

    #[test]
    fn test_strings_and_byte_arrays() {
        let layout = Layout::parse("4s3p").unwrap();
        let items = [json!("ab"), json!([1, 2])];
        let values = json_to_values(&layout, &items).unwrap();
        assert_eq!(values, vec![Value::from("ab"), Value::Bytes(vec![1, 2])]);
    }

    #[test]
    fn test_pad_slots_are_skipped() {
        let layout = Layout::parse("<BxB").unwrap();
        let values = json_to_values(&layout, &[json!(1), json!(2)]).unwrap();
        assert_eq!(values, vec![Value::UInt(1), Value::UInt(2)]);
    }

    #[test]
    fn test_rejects_wrong_json_type() {
        let layout = Layout::parse("<H").unwrap();
        assert!(json_to_values(&layout, &[json!("x")]).is_err());
        assert!(json_to_values(&layout, &[json!(1.5)]).is_err());

        let layout = Layout::parse("2s").unwrap();
        assert!(json_to_values(&layout, &[json!([300])]).is_err());
    }

    #[test]
    fn test_value_to_json() {
        assert_eq!(value_to_json(&Value::Int(-1), false).unwrap(), json!(-1));
        assert_eq!(value_to_json(&Value::from("hi"), false).unwrap(), json!([104, 105]));
        assert_eq!(value_to_json(&Value::from("hi"), true).unwrap(), json!("hi"));
    }
}
