//! How an attempted violation was stopped.

use std::fmt;

use crate::error::ViolationError;

/// The result of deliberately attempting a violation.
///
/// A demo's attempt yields one `Containment` per induced fault. There is
/// no "escaped" variant: a violation that goes through is reported as
/// [`DemoError::Uncontained`](crate::DemoError::Uncontained) instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Containment {
    /// The violating form does not compile.
    ///
    /// `case` names the `compile_fail` doctest that proves it and
    /// `error_code` is the rustc error code that doctest expects.
    CompileTime {
        /// Item whose documentation holds the rejected snippet.
        case: &'static str,
        /// The rustc error code, e.g. `E0597`.
        error_code: &'static str,
    },
    /// The violation was attempted and a checked primitive rejected it.
    Caught(ViolationError),
}

impl Containment {
    /// The caught error, if this containment happened at runtime.
    pub fn caught(&self) -> Option<&ViolationError> {
        match self {
            Self::Caught(err) => Some(err),
            Self::CompileTime { .. } => None,
        }
    }

    /// Exit status for a list of containments.
    ///
    /// The first runtime-caught fault decides the code. A list holding
    /// only compile-time rejections exits with 1; an empty list with 0.
    pub fn exit_code(contained: &[Containment]) -> u8 {
        if let Some(err) = contained.iter().find_map(Containment::caught) {
            return err.exit_code();
        }
        if contained.is_empty() {
            0
        } else {
            1
        }
    }
}

impl fmt::Display for Containment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CompileTime { case, error_code } => {
                write!(f, "rejected at compile time ({error_code}, see {case})")
            }
            Self::Caught(err) => write!(f, "caught at runtime: {err}"),
        }
    }
}
