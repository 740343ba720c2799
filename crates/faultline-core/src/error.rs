//! Error types for the faultline catalogue.
//!
//! [`ViolationError`] is the taxonomy of memory-safety faults that the
//! checked primitives turn into values instead of undefined behaviour.
//! [`DemoError`] is what a demo returns when something goes wrong that
//! it did not deliberately induce.

use std::error::Error;
use std::fmt;

use crate::class::ViolationClass;

/// A memory-safety fault caught at runtime by a checked primitive.
///
/// `UseAfterRelease` and `VariantMismatch` are only produced by the
/// explicitly runtime-checked types; the move-only and enum-based APIs
/// reject the same mistakes at compile time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViolationError {
    /// The requested capacity could not be reserved.
    AllocationFailure {
        /// Bytes requested from a buffer, or slots from a table.
        requested: usize,
    },
    /// An index outside `[0, capacity)`.
    OutOfBounds {
        /// The offending index.
        index: usize,
        /// Capacity of the accessed buffer.
        capacity: usize,
    },
    /// An operation on a handle that has already been released.
    UseAfterRelease {
        /// The operation that was attempted.
        operation: &'static str,
    },
    /// An operation on a tagged union invoked under the wrong variant.
    VariantMismatch {
        /// The variant the operation requires.
        expected: &'static str,
        /// The variant that was actually active.
        found: &'static str,
    },
    /// An operation on a handle whose acquisition never succeeded.
    NullHandle {
        /// The operation that was attempted.
        operation: &'static str,
    },
    /// An acquisition on a handle that already owns a live resource.
    AlreadyAcquired {
        /// The operation that was attempted.
        operation: &'static str,
    },
}

impl ViolationError {
    /// Process exit status reported by the CLI for this fault.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::AllocationFailure { .. } => 2,
            Self::OutOfBounds { .. } => 3,
            Self::UseAfterRelease { .. } => 4,
            Self::VariantMismatch { .. } => 5,
            Self::NullHandle { .. } => 6,
            Self::AlreadyAcquired { .. } => 7,
        }
    }
}

impl fmt::Display for ViolationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocationFailure { requested } => {
                write!(f, "allocation failure: could not reserve {requested} bytes")
            }
            Self::OutOfBounds { index, capacity } => {
                write!(f, "out of bounds: index {index} outside capacity {capacity}")
            }
            Self::UseAfterRelease { operation } => {
                write!(f, "use after release: {operation} on a released handle")
            }
            Self::VariantMismatch { expected, found } => {
                write!(f, "variant mismatch: expected {expected}, found {found}")
            }
            Self::NullHandle { operation } => {
                write!(f, "null handle: {operation} before acquisition succeeded")
            }
            Self::AlreadyAcquired { operation } => {
                write!(f, "already acquired: {operation} on a live handle")
            }
        }
    }
}

impl Error for ViolationError {}

/// Errors returned by a [`Demo`](crate::Demo) run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DemoError {
    /// The safe path itself hit a fault it did not induce.
    Violation(ViolationError),
    /// An induced violation was not rejected.
    ///
    /// This indicates a bug in a checked primitive: the catalogue
    /// expects every attempted violation to be contained.
    Uncontained {
        /// The class of the demo that leaked.
        class: ViolationClass,
        /// What went through unchecked.
        detail: String,
    },
}

impl DemoError {
    /// Process exit status reported by the CLI for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Violation(err) => err.exit_code(),
            Self::Uncontained { .. } => 70,
        }
    }
}

impl fmt::Display for DemoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Violation(err) => write!(f, "safe path failed: {err}"),
            Self::Uncontained { class, detail } => {
                write!(f, "{class} violation escaped containment: {detail}")
            }
        }
    }
}

impl Error for DemoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Violation(err) => Some(err),
            Self::Uncontained { .. } => None,
        }
    }
}

impl From<ViolationError> for DemoError {
    fn from(err: ViolationError) -> Self {
        Self::Violation(err)
    }
}
