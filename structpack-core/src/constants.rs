//! Constants for the format-string grammar

/// Byte-order marker: native size, native order
pub const ORDER_NATIVE: char = '@';

/// Byte-order marker: standard size, native order
pub const ORDER_NATIVE_STANDARD: char = '=';

/// Byte-order marker: little-endian
pub const ORDER_LITTLE: char = '<';

/// Byte-order marker: big-endian
pub const ORDER_BIG: char = '>';

/// Byte-order marker: network order (big-endian)
pub const ORDER_NETWORK: char = '!';

/// Every character accepted as a type code, in table order
pub const TYPE_CHARS: &str = "xbBhHiIlLqQfdsp";

/// Largest repeat count the parser accepts in front of a single type code
///
/// Keeps `count * width` of one group inside `usize` on 32-bit targets.
pub const MAX_REPEAT_COUNT: usize = 1 << 24;

/// Largest total byte length of a layout; the parser rejects longer formats
pub const MAX_LAYOUT_LEN: usize = isize::MAX as usize;

/// Largest payload a Pascal string (`p`) can describe with its one-byte length prefix
pub const MAX_PASCAL_LEN: usize = u8::MAX as usize;

/// Byte written for pad fields and string padding
pub const PAD_BYTE: u8 = 0x00;
