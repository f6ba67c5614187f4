//! LIN frame line parser
//!
//! Recognizes lines of the form `id b1 [b2 ...] ck` where every field is
//! exactly two lowercase hex digits separated by single spaces. Anything
//! else (error-suffixed lines, uppercase, extra spaces, debug chatter) is
//! not a frame and yields `None`.

use crate::bits::decode_hex_byte;
use crate::types::LinFrame;

/// Parse a line into a LIN frame
///
/// Returns `None` for any line that does not match the frame grammar. A
/// non-matching line is the normal case for sniffer output, not an error.
///
/// # Example
/// ```
/// use lin_trace_decoder::parse_line;
///
/// let frame = parse_line("2a 01 02 ff").unwrap();
/// assert_eq!(frame.id, 0x2a);
/// assert_eq!(frame.data, vec![0x01, 0x02]);
/// assert_eq!(frame.checksum, 0xff);
///
/// assert!(parse_line("2a 01 02 ff ERR").is_none());
/// ```
pub fn parse_line(line: &str) -> Option<LinFrame> {
    // Splitting on a single space keeps empty fields, so doubled or
    // leading/trailing spaces fail the 2-digit check below.
    let mut fields = line
        .split(' ')
        .map(|field| decode_hex_byte(field).ok())
        .collect::<Option<Vec<u8>>>()?;

    // id + at least one data byte + checksum
    if fields.len() < 3 {
        log::trace!("Too few fields for a frame: {:?}", line);
        return None;
    }

    let checksum = fields.pop()?;
    let id = fields.remove(0);

    Some(LinFrame {
        id,
        data: fields,
        checksum,
    })
}
