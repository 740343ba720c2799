//! Checked storage primitives for the faultline catalogue.
//!
//! Each primitive replaces one raw-memory idiom with a form that turns
//! the corresponding misuse into a [`ViolationError`] or a compile error:
//!
//! ```text
//! GreetingBuffer   malloc'd char[]     index past capacity  -> OutOfBounds
//!                                      free twice           -> E0382 (moved)
//! SlotTable        &local / raw addr   lookup after release -> UseAfterRelease
//! TrackedHandle    nullable pointer    use before acquire   -> NullHandle
//!                                      release twice        -> UseAfterRelease
//!                                      acquire twice        -> AlreadyAcquired
//! ```
//!
//! Nothing in this crate uses `unsafe`.
//!
//! [`ViolationError`]: faultline_core::ViolationError

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod buffer;
pub mod config;
pub mod handle;
pub mod slots;
pub mod tracked;

pub use buffer::GreetingBuffer;
pub use config::{BufferConfig, ConfigError};
pub use handle::SlotHandle;
pub use slots::SlotTable;
pub use tracked::TrackedHandle;
