//! Per-identifier bit change tracking
//!
//! Keeps the last bit sequence seen for every frame identifier and computes
//! which bits changed when the next frame with that identifier arrives.

use crate::types::{BitSequence, DiffMask};
use std::collections::HashMap;

/// Tracks the most recent bit sequence per frame identifier
///
/// History always reflects the latest frame seen, whether or not it
/// produced a diff. Entries are never pruned.
#[derive(Debug, Default)]
pub struct DiffTracker {
    history: HashMap<u8, BitSequence>,
}

impl DiffTracker {
    /// Create a tracker with empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `bits` for `id` and return the change mask against the previous frame
    ///
    /// # Returns
    /// * `None` on the first sighting of `id`, or if nothing changed
    /// * `Some(mask)` with the new bit at each changed position
    ///
    /// If the byte count for `id` changed, history is reset to the new frame
    /// and every bit is reported as changed.
    pub fn update(&mut self, id: u8, bits: BitSequence) -> Option<DiffMask> {
        let old = self.history.insert(id, bits);
        let old = old?;
        // Borrow back the sequence we just stored
        let new = self.history.get(&id)?;

        if old.len() != new.len() {
            log::debug!(
                "Frame {:02x} changed length from {} to {} bits, resetting history",
                id,
                old.len(),
                new.len()
            );
            return Some(new.bits().iter().map(|&bit| Some(bit)).collect());
        }

        if old == *new {
            return None;
        }

        Some(
            old.bits()
                .iter()
                .zip(new.bits())
                .map(|(old_bit, new_bit)| (old_bit != new_bit).then_some(*new_bit))
                .collect(),
        )
    }

    /// Last bit sequence recorded for `id`
    pub fn last_seen(&self, id: u8) -> Option<&BitSequence> {
        self.history.get(&id)
    }

    /// Number of distinct identifiers seen
    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}
