//! Benchmark fixtures for faultline.
//!
//! - [`filled_table`]: a slot table with a mix of live and released slots
//! - [`NullConsole`]: a console that discards output

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use faultline_arena::{SlotHandle, SlotTable};
use faultline_core::Console;

/// Build a table of `len` slots, releasing every third one.
///
/// Returns the table and the handles still live, in insertion order.
pub fn filled_table(len: u32) -> (SlotTable<u32>, Vec<SlotHandle>) {
    let mut table = SlotTable::new();
    let handles: Vec<SlotHandle> = (0..len).filter_map(|i| table.insert(i).ok()).collect();
    let mut live = Vec::with_capacity(handles.len());
    for (i, handle) in handles.into_iter().enumerate() {
        if i % 3 == 2 {
            let _ = table.release(handle);
        } else {
            live.push(handle);
        }
    }
    (table, live)
}

/// Console that drops every line.
#[derive(Debug, Default)]
pub struct NullConsole;

impl Console for NullConsole {
    fn line(&mut self, _text: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filled_table_releases_every_third_slot() {
        let (table, live) = filled_table(9);
        assert_eq!(table.total_slots(), 9);
        assert_eq!(table.len(), 6);
        assert_eq!(live.len(), 6);
        assert!(live.iter().all(|&h| table.is_live(h)));
    }

    #[test]
    fn released_slots_stay_released() {
        let (table, live) = filled_table(1_500);
        assert_eq!(table.total_slots(), 1_500);
        assert_eq!(table.len(), 1_000);
        assert_eq!(live.len(), 1_000);
        assert!(live.iter().all(|h| h.index() % 3 != 2));
    }
}
