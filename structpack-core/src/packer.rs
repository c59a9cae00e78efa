//! Pack driver: values to bytes

use crate::codec::TypeCodec;
use crate::constants::PAD_BYTE;
use crate::error::StructError;
use crate::types::{FieldSpec, Mode, Value};
use bytes::{BufMut, Bytes, BytesMut};

#[cfg(feature = "logging")]
use tracing::debug;

/// Pack `values` following `fields`
///
/// Groups run in order. Before a group starts, the remaining values must cover
/// every unit of it:
/// - Strict: a shortfall fails the call and no bytes are returned
/// - Loose: a shortfall ends the scan; the bytes of all completed groups are
///   returned and the short group contributes nothing
///
/// Values beyond what the format consumes are ignored.
pub fn pack_fields(fields: &[FieldSpec], values: &[Value], mode: Mode) -> Result<Bytes, StructError> {
    if mode.is_strict() {
        let needed: usize = fields.iter().map(FieldSpec::value_count).sum();
        if values.len() < needed {
            return Err(StructError::NotEnoughValues {
                needed,
                available: values.len(),
            });
        }
    }

    let mut out = BytesMut::with_capacity(output_bound(fields, values.len()));
    let mut next = 0;

    for field in fields {
        if field.code.is_pad() {
            out.put_bytes(PAD_BYTE, field.byte_len());
            continue;
        }

        let needed = field.value_count();
        let remaining = values.len() - next;
        if remaining < needed {
            #[cfg(feature = "logging")]
            debug!(
                "Loose pack stopped at {:?}: {} values left, group needs {}",
                field.code, remaining, needed
            );

            break;
        }

        let codec = TypeCodec::get(field.code);
        for value in &values[next..next + needed] {
            codec.encode(value, field.unit_len(), field.order, &mut out)?;
        }
        next += needed;
    }

    Ok(out.freeze())
}

/// Length of the output a pack of `available` values produces
///
/// Walks the groups the values can complete, so the reservation follows the
/// input rather than the repeat counts of the format.
fn output_bound(fields: &[FieldSpec], available: usize) -> usize {
    let mut left = available;
    let mut len = 0;
    for field in fields {
        if !field.code.is_pad() {
            let needed = field.value_count();
            if left < needed {
                break;
            }
            left -= needed;
        }
        len += field.byte_len();
    }
    len
}

/// Pack into an existing buffer at `offset`, returning the number of bytes written
///
/// The buffer is left untouched when packing fails or the bytes do not fit.
pub fn pack_fields_into(
    fields: &[FieldSpec],
    buf: &mut [u8],
    offset: usize,
    values: &[Value],
    mode: Mode,
) -> Result<usize, StructError> {
    let packed = pack_fields(fields, values, mode)?;
    let available = buf.len().saturating_sub(offset);
    if offset > buf.len() || packed.len() > available {
        return Err(StructError::BufferTooSmall {
            needed: packed.len(),
            available,
        });
    }

    buf[offset..offset + packed.len()].copy_from_slice(&packed);
    Ok(packed.len())
}
