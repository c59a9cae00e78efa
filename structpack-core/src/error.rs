//! Error types for pack/unpack operations

/// Errors that can occur while parsing a format or running a driver
#[cfg_attr(feature = "std", derive(thiserror::Error))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructError {
    /// A character that is neither a type code, a byte-order marker nor a digit
    #[cfg_attr(feature = "std", error("Unknown type code {code:?} at position {position}"))]
    UnknownTypeCode {
        /// The offending character.
        code: char,
        /// Character index in the format string.
        position: usize,
    },

    /// Repeat count at the end of the format with no type code after it
    #[cfg_attr(feature = "std", error("Repeat count at position {position} is not followed by a type code"))]
    DanglingCount {
        /// Character index where the count starts.
        position: usize,
    },

    /// Repeat count of zero
    #[cfg_attr(feature = "std", error("Repeat count at position {position} must be at least 1"))]
    ZeroCount {
        /// Character index where the count starts.
        position: usize,
    },

    /// Repeat count too large to represent
    #[cfg_attr(feature = "std", error("Repeat count at position {position} is too large"))]
    CountOverflow {
        /// Character index where the count starts.
        position: usize,
    },

    /// Repeat count separated from its type code
    #[cfg_attr(feature = "std", error("Repeat count interrupted at position {position}"))]
    MisplacedCount {
        /// Character index of the interrupting character.
        position: usize,
    },

    /// Integer outside the range of its fixed-width type code
    #[cfg_attr(feature = "std", error("Value {value} out of range for type code {code:?}"))]
    OutOfRange {
        /// Type code being encoded.
        code: char,
        /// The rejected value.
        value: i128,
    },

    /// Finite float too large for a 32-bit float code
    #[cfg_attr(feature = "std", error("Float value too large for type code {code:?}"))]
    FloatOverflow {
        /// Type code being encoded.
        code: char,
    },

    /// Value variant not accepted by the type code
    #[cfg_attr(feature = "std", error("Type code {code:?} cannot encode a {found} value"))]
    TypeMismatch {
        /// Type code being encoded.
        code: char,
        /// Variant name of the supplied value.
        found: &'static str,
    },

    /// Strict pack ran out of values
    #[cfg_attr(feature = "std", error("Not enough values: format needs {needed}, got {available}"))]
    NotEnoughValues {
        /// Values the format consumes.
        needed: usize,
        /// Values supplied.
        available: usize,
    },

    /// Strict unpack ran out of bytes
    #[cfg_attr(feature = "std", error("Not enough bytes: format needs {needed}, got {available}"))]
    NotEnoughBytes {
        /// Bytes the format covers.
        needed: usize,
        /// Bytes available from the read offset.
        available: usize,
    },

    /// Destination of `pack_into` cannot hold the packed bytes
    #[cfg_attr(feature = "std", error("Buffer too small: need {needed} bytes, have {available}"))]
    BufferTooSmall {
        /// Bytes to be written.
        needed: usize,
        /// Bytes available after the write offset.
        available: usize,
    },
}

impl StructError {
    /// True for defects of the format string itself
    pub const fn is_format_error(&self) -> bool {
        matches!(
            self,
            StructError::UnknownTypeCode { .. }
                | StructError::DanglingCount { .. }
                | StructError::ZeroCount { .. }
                | StructError::CountOverflow { .. }
                | StructError::MisplacedCount { .. }
        )
    }

    /// True for value or byte shortfalls, the only errors [`crate::Mode::Loose`] suppresses
    pub const fn is_shortfall(&self) -> bool {
        matches!(
            self,
            StructError::NotEnoughValues { .. } | StructError::NotEnoughBytes { .. }
        )
    }
}
