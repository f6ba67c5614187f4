//! Output line rendering

use crate::clock::RelativeTime;
use crate::types::DiffMask;

/// Join consecutive `n`-character chunks of `text` with `sep`
///
/// The last chunk may be shorter than `n`.
pub fn insert_separators(text: &str, n: usize, sep: &str) -> String {
    if n == 0 {
        return text.to_string();
    }
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(n)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(sep)
}

/// Group a rendered mask: a space every 4 characters, then `| ` every 10
/// characters of the spaced string, which lands on byte boundaries
pub fn group_bits(bits: &str) -> String {
    let spaced = insert_separators(bits, 4, " ");
    insert_separators(&spaced, 10, "| ")
}

/// `<timestamp>  <line>`
pub fn format_raw(timestamp: RelativeTime, line: &str) -> String {
    format!("{}  {}", timestamp, line)
}

/// `<timestamp>  <id>: | <grouped mask> |`
pub fn format_diff(timestamp: RelativeTime, id: u8, mask: &DiffMask) -> String {
    format!(
        "{}  {:02x}: | {} |",
        timestamp,
        id,
        group_bits(&mask.to_string())
    )
}
