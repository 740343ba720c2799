//! The four demos of the faultline catalogue.
//!
//! | Module | Class | Safe path prints | Violation is stopped by |
//! |--------|-------|------------------|-------------------------|
//! | [`scope`] | Scope | `x = 1337` | borrow checker (E0597); slot generations at runtime |
//! | [`spatial`] | Spatial | `Hello` | bounds-checked [`GreetingBuffer::write`] |
//! | [`temporal`] | Temporal | `Hello!` | move-only `free` (E0382); [`TrackedHandle`] at runtime |
//! | [`type_confusion`] | TypeConfusion | `Hello!` | enum payloads (E0599, E0004); tag-checked accessors |
//!
//! [`Catalogue`] registers all four in class order.
//!
//! [`GreetingBuffer::write`]: faultline_arena::GreetingBuffer::write
//! [`TrackedHandle`]: faultline_arena::TrackedHandle

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod catalogue;
pub mod config;
pub mod greeting;
pub mod record;
mod report;
pub mod scope;
pub mod spatial;
pub mod temporal;
pub mod type_confusion;

pub use catalogue::{Catalogue, CatalogueRun};
pub use config::{DemoConfig, DemoConfigError};
pub use record::{Greeting, UserKind, UserRecord, Visit, VisitCount};
pub use scope::{DanglingRef, ScopeDemo, ScopedValue};
pub use spatial::SpatialDemo;
pub use temporal::TemporalDemo;
pub use type_confusion::TypeConfusionDemo;
