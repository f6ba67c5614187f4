//! Hex byte to bit expansion
//!
//! Converts the 2-digit hex groups printed by the sniffer into bit sequences.
//! Only lowercase digits are accepted, matching what the frame grammar allows.

use crate::types::{BitSequence, MonitorError, Result};

/// Decode a single lowercase hex digit
fn hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        _ => None,
    }
}

/// Decode exactly two lowercase hex digits into a byte
pub fn decode_hex_byte(text: &str) -> Result<u8> {
    match text.as_bytes() {
        [hi, lo] => match (hex_digit(*hi), hex_digit(*lo)) {
            (Some(hi), Some(lo)) => Ok((hi << 4) | lo),
            _ => Err(MonitorError::InvalidHexByte(text.to_string())),
        },
        _ => Err(MonitorError::InvalidHexByte(text.to_string())),
    }
}

/// Expand a list of 2-digit hex strings into a bit sequence of 8 bits per byte
///
/// # Example
/// ```
/// use lin_trace_decoder::bits::expand_hex_bytes;
///
/// let bits = expand_hex_bytes(&["0a", "ff"]).unwrap();
/// assert_eq!(bits.to_string(), "0000101011111111");
/// ```
pub fn expand_hex_bytes<S: AsRef<str>>(hex_bytes: &[S]) -> Result<BitSequence> {
    let bytes = hex_bytes
        .iter()
        .map(|s| decode_hex_byte(s.as_ref()))
        .collect::<Result<Vec<u8>>>()?;
    Ok(BitSequence::from_bytes(&bytes))
}
