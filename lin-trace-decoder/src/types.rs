//! Core types for the LIN trace decoder library
//!
//! This module defines the frame, bit and diff types that flow between the
//! parser, the bit expander and the diff tracker.

use std::fmt;

/// Result type for decoder operations
pub type Result<T> = std::result::Result<T, MonitorError>;

/// Placeholder rendered for bit positions that did not change
pub const UNCHANGED_MARKER: char = '-';

/// A LIN frame as printed by the bus sniffer: `id data... checksum`
///
/// Constructed per line and discarded once its diff has been computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinFrame {
    /// Frame identifier
    pub id: u8,
    /// Data bytes, in transmission order (at least one)
    pub data: Vec<u8>,
    /// Checksum byte as reported on the line (not verified)
    pub checksum: u8,
}

impl LinFrame {
    /// Identifier as 2 lowercase hex digits, the key used for history
    pub fn id_hex(&self) -> String {
        format!("{:02x}", self.id)
    }

    /// Number of data bytes
    pub fn dlc(&self) -> usize {
        self.data.len()
    }
}

impl fmt::Display for LinFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:02x}] [", self.id)?;
        for (i, byte) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{:02x}", byte)?;
        }
        write!(f, "] [{:02x}]", self.checksum)
    }
}

/// Errors that can occur while decoding or monitoring
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    #[error("Invalid hex byte: {0:?}")]
    InvalidHexByte(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A single bit of frame data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bit {
    Zero,
    One,
}

impl Bit {
    /// Character used when rendering the bit
    pub fn as_char(self) -> char {
        match self {
            Bit::Zero => '0',
            Bit::One => '1',
        }
    }
}

impl From<bool> for Bit {
    fn from(set: bool) -> Self {
        if set {
            Bit::One
        } else {
            Bit::Zero
        }
    }
}

/// Ordered bits of a frame's data, MSB first within each byte
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitSequence(Vec<Bit>);

impl BitSequence {
    /// Expand bytes into 8 bits each, most significant bit first
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut bits = Vec::with_capacity(bytes.len() * 8);
        for &byte in bytes {
            for shift in (0..8).rev() {
                bits.push(Bit::from((byte >> shift) & 0x01 != 0));
            }
        }
        Self(bits)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn bits(&self) -> &[Bit] {
        &self.0
    }
}

impl FromIterator<Bit> for BitSequence {
    fn from_iter<T: IntoIterator<Item = Bit>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for BitSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.0 {
            write!(f, "{}", bit.as_char())?;
        }
        Ok(())
    }
}

/// Per-bit change mask: `Some(bit)` where the bit changed, `None` where it did not
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffMask(Vec<Option<Bit>>);

impl DiffMask {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of positions that changed
    pub fn changed_count(&self) -> usize {
        self.0.iter().filter(|b| b.is_some()).count()
    }
}

impl FromIterator<Option<Bit>> for DiffMask {
    fn from_iter<T: IntoIterator<Item = Option<Bit>>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for DiffMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for position in &self.0 {
            let c = position.map(Bit::as_char).unwrap_or(UNCHANGED_MARKER);
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_display() {
        let frame = LinFrame {
            id: 0x2a,
            data: vec![0x01, 0x02],
            checksum: 0xff,
        };
        assert_eq!(frame.to_string(), "[2a] [01 02] [ff]");
        assert_eq!(frame.id_hex(), "2a");
        assert_eq!(frame.dlc(), 2);
    }

    #[test]
    fn test_bit_sequence_msb_first() {
        let bits = BitSequence::from_bytes(&[0x80, 0x01]);
        assert_eq!(bits.len(), 16);
        assert_eq!(bits.to_string(), "1000000000000001");
    }

    #[test]
    fn test_diff_mask_display() {
        let mask: DiffMask = vec![None, Some(Bit::One), None, Some(Bit::Zero)]
            .into_iter()
            .collect();
        assert_eq!(mask.to_string(), "-1-0");
        assert_eq!(mask.changed_count(), 2);
    }
}
