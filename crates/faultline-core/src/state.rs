//! The `Uninitialized -> Active -> Released` handle lifecycle.

use std::fmt;

use crate::error::ViolationError;

/// Lifecycle state of a runtime-tracked resource handle.
///
/// `Released` is terminal. Every transition out of it, and every use
/// while in it, fails with [`ViolationError::UseAfterRelease`]. Use of an
/// `Uninitialized` handle fails with [`ViolationError::NullHandle`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HandleState {
    /// No resource has been acquired yet.
    #[default]
    Uninitialized,
    /// The handle owns a live resource.
    Active,
    /// The resource was released. Terminal.
    Released,
}

impl HandleState {
    /// Check that `operation` may run against a handle in this state.
    pub fn check_live(self, operation: &'static str) -> Result<(), ViolationError> {
        match self {
            Self::Active => Ok(()),
            Self::Uninitialized => Err(ViolationError::NullHandle { operation }),
            Self::Released => Err(ViolationError::UseAfterRelease { operation }),
        }
    }

    /// Check that a new resource may be acquired in this state.
    ///
    /// Only a fresh handle qualifies. A live handle fails with
    /// [`ViolationError::AlreadyAcquired`], a released one with
    /// [`ViolationError::UseAfterRelease`].
    pub fn check_fresh(self, operation: &'static str) -> Result<(), ViolationError> {
        match self {
            Self::Uninitialized => Ok(()),
            Self::Active => Err(ViolationError::AlreadyAcquired { operation }),
            Self::Released => Err(ViolationError::UseAfterRelease { operation }),
        }
    }

    /// `Uninitialized -> Active`.
    pub fn activate(&mut self) -> Result<(), ViolationError> {
        self.check_fresh("acquire")?;
        *self = Self::Active;
        Ok(())
    }

    /// `Active -> Released`.
    pub fn release(&mut self) -> Result<(), ViolationError> {
        self.check_live("release")?;
        *self = Self::Released;
        Ok(())
    }

    /// Whether the state is terminal.
    pub fn is_released(self) -> bool {
        self == Self::Released
    }
}

impl fmt::Display for HandleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uninitialized => "uninitialized",
            Self::Active => "active",
            Self::Released => "released",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_lifecycle() {
        let mut state = HandleState::default();
        assert_eq!(state, HandleState::Uninitialized);
        state.activate().unwrap();
        assert!(state.check_live("read").is_ok());
        state.release().unwrap();
        assert!(state.is_released());
    }

    #[test]
    fn uninitialized_use_is_null_handle() {
        let state = HandleState::Uninitialized;
        assert_eq!(
            state.check_live("len"),
            Err(ViolationError::NullHandle { operation: "len" })
        );
        let mut state = state;
        assert_eq!(
            state.release(),
            Err(ViolationError::NullHandle { operation: "release" })
        );
    }

    #[test]
    fn released_is_terminal() {
        let mut state = HandleState::Active;
        state.release().unwrap();
        for _ in 0..100 {
            assert_eq!(
                state.release(),
                Err(ViolationError::UseAfterRelease { operation: "release" })
            );
            assert!(state.activate().is_err());
            assert!(state.is_released());
        }
    }

    #[test]
    fn double_activate_is_already_acquired() {
        let mut state = HandleState::Uninitialized;
        state.activate().unwrap();
        let err = state.activate().unwrap_err();
        assert_eq!(
            err,
            ViolationError::AlreadyAcquired {
                operation: "acquire"
            }
        );
        assert_eq!(err.to_string(), "already acquired: acquire on a live handle");
        assert_eq!(state, HandleState::Active);
    }

    #[test]
    fn activate_after_release_is_use_after_release() {
        let mut state = HandleState::Active;
        state.release().unwrap();
        assert_eq!(
            state.activate(),
            Err(ViolationError::UseAfterRelease {
                operation: "acquire"
            })
        );
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn released_at_most_once(ops in proptest::collection::vec(0u8..3, 0..64)) {
                let mut state = HandleState::Uninitialized;
                let mut releases = 0;
                for op in ops {
                    let was_released = state.is_released();
                    match op {
                        0 => { let _ = state.activate(); }
                        1 => if state.release().is_ok() { releases += 1; },
                        _ => { let _ = state.check_live("read"); }
                    }
                    // Released never transitions anywhere.
                    if was_released {
                        prop_assert!(state.is_released());
                    }
                }
                prop_assert!(releases <= 1);
            }
        }
    }
}
