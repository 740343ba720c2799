//! faultline: four memory-safety bug classes and how Rust contains them.
//!
//! This is the top-level facade crate. It re-exports the public API of the
//! sub-crates and hosts the `faultline` command-line front end.
//!
//! # Quick start
//!
//! ```rust
//! use faultline::prelude::*;
//!
//! struct Lines(Vec<String>);
//! impl Console for Lines {
//!     fn line(&mut self, text: &str) {
//!         self.0.push(text.to_string());
//!     }
//! }
//!
//! let catalogue = Catalogue::standard(&DemoConfig::default()).unwrap();
//! let mut console = Lines(Vec::new());
//! let run = catalogue
//!     .execute(ViolationClass::Spatial, &mut console, true)
//!     .unwrap();
//!
//! assert_eq!(console.0[0], "Hello");
//! assert_eq!(
//!     run.result.unwrap()[0],
//!     Containment::Caught(ViolationError::OutOfBounds { index: 12, capacity: 6 })
//! );
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `faultline-core` | Violation taxonomy, handle states, core traits |
//! | [`arena`] | `faultline-arena` | Checked buffers, slot tables, tracked handles |
//! | [`demos`] | `faultline-demos` | The four demos and the catalogue |
//! | [`cli`] | this crate | Argument parsing and dispatch for the binary |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Checked storage primitives (`faultline-arena`).
pub use faultline_arena as arena;

/// Core types and traits (`faultline-core`).
pub use faultline_core as types;

/// The demos and their registry (`faultline-demos`).
pub use faultline_demos as demos;

pub mod cli;

/// Common imports for running the catalogue.
pub mod prelude {
    pub use faultline_arena::{BufferConfig, GreetingBuffer, SlotTable, TrackedHandle};
    pub use faultline_core::{
        Console, Containment, Demo, DemoError, HandleState, StdoutConsole, ViolationClass,
        ViolationError,
    };
    pub use faultline_demos::{Catalogue, CatalogueRun, DemoConfig, UserRecord};
}
