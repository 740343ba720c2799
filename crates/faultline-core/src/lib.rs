//! Core types and traits for the faultline violation catalogue.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by every other crate in the workspace:
//! violation classes, the error taxonomy, the handle state machine,
//! and the [`Demo`] / [`Console`] traits.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod class;
pub mod error;
pub mod outcome;
pub mod state;
pub mod traits;

pub use class::ViolationClass;
pub use error::{DemoError, ViolationError};
pub use outcome::Containment;
pub use state::HandleState;
pub use traits::{Console, Demo, StdoutConsole};
