//! Runtime-tracked resource handles.
//!
//! [`TrackedHandle`] is the dynamic counterpart of a move-only owner. It
//! is for code that has to keep a handle around after releasing it, the
//! way a C program keeps a pointer variable after `free`. Every access
//! goes through the [`HandleState`] machine, so a use before acquisition
//! or after release is a reported error instead of undefined behaviour.

use faultline_core::{HandleState, ViolationError};
use tracing::debug;

/// A handle that owns at most one resource over its lifetime.
///
/// ```text
/// Uninitialized --acquire--> Active --release--> Released (terminal)
/// ```
///
/// The resource is dropped on release, or when the handle itself is
/// dropped while still active.
#[derive(Debug)]
pub struct TrackedHandle<T> {
    state: HandleState,
    resource: Option<T>,
}

impl<T> TrackedHandle<T> {
    /// A handle that has not acquired anything yet.
    pub fn uninitialized() -> Self {
        Self {
            state: HandleState::Uninitialized,
            resource: None,
        }
    }

    /// Run `allocate` and take ownership of what it returns.
    ///
    /// On failure the handle stays `Uninitialized` and the allocation
    /// error is returned. Acquiring on a live handle fails with
    /// `AlreadyAcquired`, and on a released one with `UseAfterRelease`,
    /// in both cases without calling `allocate`.
    pub fn acquire<F>(&mut self, allocate: F) -> Result<(), ViolationError>
    where
        F: FnOnce() -> Result<T, ViolationError>,
    {
        self.state.check_fresh("acquire")?;
        let resource = allocate()?;
        self.state.activate()?;
        self.resource = Some(resource);
        debug!("tracked handle acquired");
        Ok(())
    }

    /// Shared access to the resource.
    pub fn get(&self, operation: &'static str) -> Result<&T, ViolationError> {
        self.state.check_live(operation)?;
        self.resource
            .as_ref()
            .ok_or(ViolationError::NullHandle { operation })
    }

    /// Exclusive access to the resource.
    pub fn get_mut(&mut self, operation: &'static str) -> Result<&mut T, ViolationError> {
        self.state.check_live(operation)?;
        self.resource
            .as_mut()
            .ok_or(ViolationError::NullHandle { operation })
    }

    /// Drop the resource and move to the terminal `Released` state.
    pub fn release(&mut self) -> Result<(), ViolationError> {
        self.state.release()?;
        drop(self.resource.take());
        debug!("tracked handle released");
        Ok(())
    }

    /// Current lifecycle state.
    pub fn state(&self) -> HandleState {
        self.state
    }
}

impl<T> Default for TrackedHandle<T> {
    fn default() -> Self {
        Self::uninitialized()
    }
}
