//! Fuzzing entry points for structpack-core
//!
//! To use with cargo-fuzz:
//! 1. Install cargo-fuzz: cargo install cargo-fuzz
//! 2. Run fuzzer: cargo fuzz run fuzz_unpack

use structpack_core::{Layout, Mode};

/// Parse arbitrary bytes as a format string
pub fn fuzz_parse(data: &[u8]) {
    let format = String::from_utf8_lossy(data);

    // Should either parse or return an error, never panic
    if let Ok(layout) = Layout::parse(&format) {
        let _ = layout.calc_length();
    }
}

/// Split the input at the first NUL into a format and a payload, then unpack
pub fn fuzz_unpack(data: &[u8]) {
    let (format, payload) = split_input(data);
    let Ok(layout) = Layout::parse(&format) else {
        return;
    };

    let _ = layout.unpack(payload, Mode::Strict);
    let _ = layout.unpack(payload, Mode::Loose);
}

/// Unpack with a format, then pack the values back; loose output must be a prefix of the input
pub fn fuzz_round_trip(data: &[u8]) {
    let (format, payload) = split_input(data);
    let Ok(layout) = Layout::parse(&format) else {
        return;
    };

    let Ok(values) = layout.unpack(payload, Mode::Loose) else {
        return;
    };

    let repacked = layout.pack(&values, Mode::Loose);
    if let Ok(bytes) = repacked {
        // Pascal strings and floats may renormalize, so only the length is checked
        assert!(bytes.len() <= layout.calc_length());
    }
}

fn split_input(data: &[u8]) -> (String, &[u8]) {
    match data.iter().position(|&b| b == 0) {
        Some(i) => (String::from_utf8_lossy(&data[..i]).into_owned(), &data[i + 1..]),
        None => (String::from_utf8_lossy(data).into_owned(), &[]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuzz_parse_empty() {
        fuzz_parse(&[]);
    }

    #[test]
    fn test_fuzz_parse_garbage() {
        fuzz_parse(b"<99999999999999999999Q\xff\xfe");
    }

    #[test]
    fn test_fuzz_unpack_random() {
        fuzz_unpack(b"<BI3B\0\x02\x0a\x00\x00\x00\x04");
    }

    #[test]
    fn test_fuzz_unpack_no_payload() {
        fuzz_unpack(b">Qd10p");
    }

    #[test]
    fn test_fuzz_round_trip() {
        fuzz_round_trip(b"<4s2pHfx\0abcd\x09zz\x01\x02\x00\x00\x80\x7f\x00");
    }
}
