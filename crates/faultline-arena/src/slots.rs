//! Generation-checked slot storage.
//!
//! [`SlotTable`] stores values in reusable slots. Each slot carries a
//! generation counter that advances on release, so a [`SlotHandle`]
//! issued before the release can never resolve to whatever is stored in
//! the slot afterwards.

use faultline_core::ViolationError;
use tracing::debug;

use crate::handle::SlotHandle;

struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// A table of values addressed by [`SlotHandle`].
///
/// Released slots go on a free list and are reused by later inserts with
/// a bumped generation.
pub struct SlotTable<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
}

impl<T> SlotTable<T> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Store `value` and return a handle to it.
    ///
    /// Fails with [`ViolationError::AllocationFailure`] once every `u32`
    /// slot index is taken.
    pub fn insert(&mut self, value: T) -> Result<SlotHandle, ViolationError> {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.value = Some(value);
            return Ok(SlotHandle::new(index, slot.generation));
        }
        let index = next_index(self.slots.len())?;
        self.slots.push(Slot {
            generation: 0,
            value: Some(value),
        });
        Ok(SlotHandle::new(index, 0))
    }

    /// Resolve `handle` to a shared reference.
    pub fn get(&self, handle: SlotHandle) -> Result<&T, ViolationError> {
        self.slot(handle, "get")?
            .value
            .as_ref()
            .ok_or(ViolationError::UseAfterRelease { operation: "get" })
    }

    /// Resolve `handle` to a mutable reference.
    pub fn get_mut(&mut self, handle: SlotHandle) -> Result<&mut T, ViolationError> {
        self.slot_mut(handle, "get_mut")?
            .value
            .as_mut()
            .ok_or(ViolationError::UseAfterRelease {
                operation: "get_mut",
            })
    }

    /// Remove the value behind `handle` and return it.
    ///
    /// The slot's generation advances, invalidating `handle` and every
    /// copy of it. Releasing again fails with `UseAfterRelease`.
    pub fn release(&mut self, handle: SlotHandle) -> Result<T, ViolationError> {
        let slot = self.slot_mut(handle, "release")?;
        let value = slot
            .value
            .take()
            .ok_or(ViolationError::UseAfterRelease {
                operation: "release",
            })?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        debug!(%handle, "released slot");
        Ok(value)
    }

    /// Whether `handle` still resolves.
    pub fn is_live(&self, handle: SlotHandle) -> bool {
        self.get(handle).is_ok()
    }

    /// Number of live values.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Whether no values are live.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total slots ever created, live or free.
    pub fn total_slots(&self) -> usize {
        self.slots.len()
    }

    fn slot(
        &self,
        handle: SlotHandle,
        operation: &'static str,
    ) -> Result<&Slot<T>, ViolationError> {
        let capacity = self.slots.len();
        let slot = self
            .slots
            .get(handle.index as usize)
            .ok_or(ViolationError::OutOfBounds {
                index: handle.index as usize,
                capacity,
            })?;
        if slot.generation != handle.generation {
            return Err(ViolationError::UseAfterRelease { operation });
        }
        Ok(slot)
    }

    fn slot_mut(
        &mut self,
        handle: SlotHandle,
        operation: &'static str,
    ) -> Result<&mut Slot<T>, ViolationError> {
        let capacity = self.slots.len();
        let slot = self
            .slots
            .get_mut(handle.index as usize)
            .ok_or(ViolationError::OutOfBounds {
                index: handle.index as usize,
                capacity,
            })?;
        if slot.generation != handle.generation {
            return Err(ViolationError::UseAfterRelease { operation });
        }
        Ok(slot)
    }
}

/// Index of a slot appended to a table holding `len` slots.
fn next_index(len: usize) -> Result<u32, ViolationError> {
    u32::try_from(len).map_err(|_| ViolationError::AllocationFailure {
        requested: len.saturating_add(1),
    })
}

impl<T> Default for SlotTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_get() {
        let mut table = SlotTable::new();
        let h = table.insert(1337).unwrap();
        assert_eq!(table.get(h), Ok(&1337));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn get_mut_updates_value() {
        let mut table = SlotTable::new();
        let h = table.insert(1).unwrap();
        *table.get_mut(h).unwrap() += 1;
        assert_eq!(table.get(h), Ok(&2));
    }

    #[test]
    fn get_after_release_is_use_after_release() {
        let mut table = SlotTable::new();
        let h = table.insert(1337).unwrap();
        assert_eq!(table.release(h), Ok(1337));
        assert_eq!(
            table.get(h),
            Err(ViolationError::UseAfterRelease { operation: "get" })
        );
        assert!(!table.is_live(h));
        assert!(table.is_empty());
    }

    #[test]
    fn double_release_is_rejected() {
        let mut table = SlotTable::new();
        let h = table.insert("Hello".to_string()).unwrap();
        table.release(h).unwrap();
        for _ in 0..100 {
            assert_eq!(
                table.release(h),
                Err(ViolationError::UseAfterRelease {
                    operation: "release"
                })
            );
        }
    }

    #[test]
    fn stale_handle_does_not_see_reused_slot() {
        let mut table = SlotTable::new();
        let old = table.insert(1337).unwrap();
        table.release(old).unwrap();
        let new = table.insert(42).unwrap();
        assert_eq!(new.index(), old.index());
        assert_ne!(new.generation(), old.generation());
        assert_eq!(table.get(new), Ok(&42));
        assert!(table.get(old).is_err());
        assert_eq!(table.total_slots(), 1);
    }

    #[test]
    fn foreign_handle_is_out_of_bounds() {
        let mut other = SlotTable::new();
        let _ = other.insert(0).unwrap();
        let foreign = other.insert(1).unwrap();
        let table: SlotTable<i32> = SlotTable::new();
        assert_eq!(
            table.get(foreign),
            Err(ViolationError::OutOfBounds {
                index: 1,
                capacity: 0
            })
        );
    }

    #[test]
    fn slot_index_past_u32_is_allocation_failure() {
        assert_eq!(next_index(7), Ok(7));
        assert_eq!(next_index(u32::MAX as usize), Ok(u32::MAX));
        let len = u32::MAX as usize + 1;
        assert_eq!(
            next_index(len),
            Err(ViolationError::AllocationFailure { requested: len + 1 })
        );
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn released_handles_never_resolve(
                ops in proptest::collection::vec(any::<bool>(), 1..64),
            ) {
                let mut table = SlotTable::new();
                let mut live = Vec::new();
                let mut dead = Vec::new();
                for (i, insert) in ops.into_iter().enumerate() {
                    if insert || live.is_empty() {
                        live.push(table.insert(i).unwrap());
                    } else {
                        let h = live.remove(0);
                        prop_assert!(table.release(h).is_ok());
                        dead.push(h);
                    }
                }
                for h in &dead {
                    prop_assert!(!table.is_live(*h));
                }
                for h in &live {
                    prop_assert!(table.is_live(*h));
                }
                prop_assert_eq!(table.len(), live.len());
            }
        }
    }
}
