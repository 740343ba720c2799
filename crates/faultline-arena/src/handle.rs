//! Slot handles.
//!
//! A [`SlotHandle`] names a value by slot index and generation instead of
//! by address. The generation makes staleness an O(1) comparison: once a
//! slot is released its generation advances, and every handle minted
//! before that no longer resolves.

use std::fmt;

/// Location of a value inside a [`SlotTable`](crate::SlotTable).
///
/// Handles are `Copy` and may be held past the value's lifetime; doing so
/// is harmless because resolving them is checked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub struct SlotHandle {
    /// Index into the table's slot vector.
    pub(crate) index: u32,
    /// Generation of the slot when this handle was issued.
    pub(crate) generation: u32,
}

impl SlotHandle {
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Generation the handle was issued at.
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for SlotHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SlotHandle(slot={}, gen={})", self.index, self.generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        let h = SlotHandle::new(3, 42);
        assert_eq!(h.index(), 3);
        assert_eq!(h.generation(), 42);
    }

    #[test]
    fn display_names_slot_and_generation() {
        assert_eq!(
            SlotHandle::new(0, 7).to_string(),
            "SlotHandle(slot=0, gen=7)"
        );
    }

    #[test]
    fn handles_differ_by_generation() {
        assert_ne!(SlotHandle::new(1, 0), SlotHandle::new(1, 1));
    }
}
