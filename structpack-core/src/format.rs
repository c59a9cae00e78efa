//! Format-string parsing
//!
//! A format is a sequence of byte-order markers and `digits? type` groups.
//! The parser produces a [`Layout`]: the ordered list of [`FieldSpec`]s both
//! drivers execute.

use crate::codec::TypeCodec;
use crate::constants::{MAX_LAYOUT_LEN, MAX_REPEAT_COUNT};
use crate::error::StructError;
use crate::types::{ByteOrder, FieldSpec, Mode, Value};
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use bytes::Bytes;

#[cfg(feature = "logging")]
use tracing::trace;

/// Repeat count being accumulated
struct PendingCount {
    value: usize,
    start: usize,
}

/// Parse a format string into its field specifications
///
/// This function:
/// 1. Accumulates digits into a pending repeat count
/// 2. Switches the active byte order on `@ = < > !` without touching the count
/// 3. Closes the count into a [`FieldSpec`] on each type character
/// 4. Skips whitespace between groups
///
/// A format whose total byte length exceeds [`MAX_LAYOUT_LEN`] fails with
/// [`StructError::CountOverflow`] at the group that crosses the limit.
pub fn parse(format: &str) -> Result<Vec<FieldSpec>, StructError> {
    let mut fields = Vec::new();
    let mut order = ByteOrder::native();
    let mut total_len = 0usize;
    let mut pending: Option<PendingCount> = None;

    for (position, c) in format.chars().enumerate() {
        if let Some(digit) = c.to_digit(10) {
            let count = pending.get_or_insert(PendingCount {
                value: 0,
                start: position,
            });
            count.value = count
                .value
                .checked_mul(10)
                .and_then(|v| v.checked_add(digit as usize))
                .filter(|&v| v <= MAX_REPEAT_COUNT)
                .ok_or(StructError::CountOverflow {
                    position: count.start,
                })?;
            continue;
        }

        if let Some(next) = ByteOrder::from_marker(c) {
            order = next;
            continue;
        }

        if c.is_ascii_whitespace() {
            if pending.is_some() {
                return Err(StructError::MisplacedCount { position });
            }
            continue;
        }

        let codec = TypeCodec::lookup(c)
            .ok_or(StructError::UnknownTypeCode { code: c, position })?;

        let (count, start) = match pending.take() {
            Some(PendingCount { value: 0, start }) => {
                return Err(StructError::ZeroCount { position: start })
            }
            Some(p) => (p.value, p.start),
            None => (1, position),
        };

        let field = FieldSpec {
            count,
            code: codec.code,
            order,
            size: codec.width,
        };
        total_len = grow(total_len, field.byte_len())
            .ok_or(StructError::CountOverflow { position: start })?;
        fields.push(field);
    }

    if let Some(p) = pending {
        return Err(StructError::DanglingCount { position: p.start });
    }

    #[cfg(feature = "logging")]
    trace!("Parsed format {:?} into {} fields", format, fields.len());

    Ok(fields)
}

/// Add one group's byte length to a layout total, bounded by [`MAX_LAYOUT_LEN`]
fn grow(total: usize, group_len: usize) -> Option<usize> {
    total.checked_add(group_len).filter(|&t| t <= MAX_LAYOUT_LEN)
}

/// A parsed format string, ready to drive pack and unpack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    format: String,
    fields: Vec<FieldSpec>,
}

impl Layout {
    /// Parse a format string
    pub fn parse(format: &str) -> Result<Self, StructError> {
        Ok(Self {
            format: format.to_string(),
            fields: parse(format)?,
        })
    }

    /// Source format string
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Field specifications in source order
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Total number of bytes the format covers
    pub fn calc_length(&self) -> usize {
        self.fields.iter().map(FieldSpec::byte_len).sum()
    }

    /// Number of values a full pack consumes (and a full unpack produces)
    pub fn value_count(&self) -> usize {
        self.fields.iter().map(FieldSpec::value_count).sum()
    }

    /// The field spec serving each value slot, in order
    pub fn value_slots(&self) -> impl Iterator<Item = &FieldSpec> + '_ {
        self.fields
            .iter()
            .flat_map(|f| core::iter::repeat(f).take(f.value_count()))
    }

    /// Pack `values` according to this layout
    pub fn pack(&self, values: &[Value], mode: Mode) -> Result<Bytes, StructError> {
        crate::packer::pack_fields(&self.fields, values, mode)
    }

    /// Pack `values` into `buf` starting at `offset`, returning the bytes written
    pub fn pack_into(
        &self,
        buf: &mut [u8],
        offset: usize,
        values: &[Value],
        mode: Mode,
    ) -> Result<usize, StructError> {
        crate::packer::pack_fields_into(&self.fields, buf, offset, values, mode)
    }

    /// Unpack `bytes` according to this layout
    pub fn unpack(&self, bytes: &[u8], mode: Mode) -> Result<Vec<Value>, StructError> {
        crate::unpacker::unpack_fields(&self.fields, bytes, mode)
    }

    /// Unpack starting at `offset` within `bytes`
    pub fn unpack_from(
        &self,
        bytes: &[u8],
        offset: usize,
        mode: Mode,
    ) -> Result<Vec<Value>, StructError> {
        let tail = bytes.get(offset..).unwrap_or(&[]);
        crate::unpacker::unpack_fields(&self.fields, tail, mode)
    }
}

impl core::str::FromStr for Layout {
    type Err = StructError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Layout::parse(s)
    }
}
