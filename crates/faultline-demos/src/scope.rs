//! Scope violations: a reference outliving its referent.
//!
//! With plain references the borrow checker refuses the program outright
//! (see [`ScopedValue`]). The escaping value is recovered as an owned copy
//! instead. For the runtime picture, [`Frame`] keeps the scoped value in a
//! [`SlotTable`] and hands out a [`DanglingRef`] that names it by slot and
//! generation; resolving it after the frame ends is a reported error.

use faultline_arena::{SlotHandle, SlotTable};
use faultline_core::{Console, Containment, Demo, DemoError, ViolationClass, ViolationError};
use tracing::debug;

use crate::report;

/// An integer owned by a nested scope.
///
/// Deliberately not `Copy`, so that taking it out of its scope requires
/// either a reference (rejected below) or an explicit owned copy through
/// [`value`](ScopedValue::value).
///
/// Keeping a reference past the end of the scope does not compile:
///
/// ```compile_fail,E0597
/// use faultline_demos::ScopedValue;
///
/// let p: &ScopedValue;
/// {
///     let x = ScopedValue::new(1337);
///     p = &x;
/// }
/// println!("x = {}", p.value());
/// ```
#[derive(Debug, PartialEq, Eq)]
pub struct ScopedValue(i32);

impl ScopedValue {
    /// Wrap `value`.
    pub fn new(value: i32) -> Self {
        Self(value)
    }

    /// An owned copy of the value.
    pub fn value(&self) -> i32 {
        self.0
    }

    /// Overwrite the value.
    pub fn set(&mut self, value: i32) {
        self.0 = value;
    }
}

/// Run an inner scope and bring its value out by copy.
///
/// Returning a reference into the scope instead does not compile:
///
/// ```compile_fail,E0515
/// use faultline_demos::ScopedValue;
///
/// fn escape() -> &'static ScopedValue {
///     let x = ScopedValue::new(1337);
///     &x
/// }
/// ```
pub fn value_from_inner_scope(value: i32) -> i32 {
    let x;
    {
        let scoped = ScopedValue::new(value);
        x = scoped.value();
    }
    x
}

/// A reference to a [`ScopedValue`] by slot, never by address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DanglingRef {
    handle: SlotHandle,
}

impl DanglingRef {
    /// Look the referent up.
    ///
    /// Fails with [`ViolationError::UseAfterRelease`] once the frame that
    /// owned it has ended, even if its slot now holds a newer value.
    pub fn resolve<'t>(
        &self,
        frames: &'t SlotTable<ScopedValue>,
    ) -> Result<&'t ScopedValue, ViolationError> {
        frames.get(self.handle)
    }

    /// Look the referent up for writing. Fails exactly when
    /// [`resolve`](DanglingRef::resolve) does.
    pub fn resolve_mut<'t>(
        &self,
        frames: &'t mut SlotTable<ScopedValue>,
    ) -> Result<&'t mut ScopedValue, ViolationError> {
        frames.get_mut(self.handle)
    }

    /// The underlying slot handle.
    pub fn handle(&self) -> SlotHandle {
        self.handle
    }
}

/// A lexical scope owning one [`ScopedValue`].
///
/// Entering stores the value; dropping the frame releases it, on every
/// exit path.
pub struct Frame<'t> {
    frames: &'t mut SlotTable<ScopedValue>,
    handle: SlotHandle,
}

impl<'t> Frame<'t> {
    /// Enter a scope that owns `value`.
    pub fn enter(
        frames: &'t mut SlotTable<ScopedValue>,
        value: i32,
    ) -> Result<Self, ViolationError> {
        let handle = frames.insert(ScopedValue::new(value))?;
        debug!(%handle, "scope entered");
        Ok(Self { frames, handle })
    }

    /// Take a reference to the frame's value.
    pub fn reference(&self) -> DanglingRef {
        DanglingRef {
            handle: self.handle,
        }
    }

    /// The table, for resolving references while the frame is live.
    pub fn frames(&self) -> &SlotTable<ScopedValue> {
        &*self.frames
    }
}

impl Drop for Frame<'_> {
    fn drop(&mut self) {
        match self.frames.release(self.handle) {
            Ok(_) => debug!(handle = %self.handle, "scope exited"),
            Err(err) => debug!(handle = %self.handle, error = %err, "scope already released"),
        }
    }
}

/// The scope demo.
///
/// Safe path prints `x = <value>` using an owned copy taken inside the
/// scope.
pub struct ScopeDemo {
    value: i32,
}

impl ScopeDemo {
    /// Demo owning `value` in its inner scope.
    pub fn new(value: i32) -> Self {
        Self { value }
    }

    /// Enter a frame, take a reference, and resolve it while live.
    ///
    /// Returns the reference, now outliving its frame, and the value
    /// copied out of the scope.
    fn scoped_reference(
        &self,
        frames: &mut SlotTable<ScopedValue>,
    ) -> Result<(DanglingRef, i32), ViolationError> {
        let frame = Frame::enter(frames, self.value)?;
        let reference = frame.reference();
        let x = reference.resolve(frame.frames())?.value();
        Ok((reference, x))
    }
}

impl Demo for ScopeDemo {
    fn class(&self) -> ViolationClass {
        ViolationClass::Scope
    }

    fn run(&self, console: &mut dyn Console) -> Result<(), DemoError> {
        let mut frames = SlotTable::new();
        let (_, x) = self.scoped_reference(&mut frames)?;
        debug_assert_eq!(x, value_from_inner_scope(self.value));
        console.line(&format!("x = {x}"));
        Ok(())
    }

    fn attempt(&self, console: &mut dyn Console) -> Result<Vec<Containment>, DemoError> {
        let class = self.class();
        let mut contained = vec![
            report::compile_time(class, console, "ScopedValue", "E0597"),
            report::compile_time(class, console, "scope::value_from_inner_scope", "E0515"),
        ];

        let mut frames = SlotTable::new();
        let (reference, _) = self.scoped_reference(&mut frames)?;
        let err = report::expect_fault(
            class,
            reference.resolve(&frames).map(ScopedValue::value),
            "reference resolved after its scope ended",
        )?;
        contained.push(report::caught(class, console, err));

        let err = report::expect_fault(
            class,
            reference.resolve_mut(&mut frames).map(|x| x.set(0)),
            "write through a reference after its scope ended",
        )?;
        contained.push(report::caught(class, console, err));

        // A new scope reuses the slot; the old reference must not see it.
        let frame = Frame::enter(&mut frames, self.value.wrapping_add(1))?;
        let err = report::expect_fault(
            class,
            reference.resolve(frame.frames()).map(ScopedValue::value),
            "stale reference resolved to a reused slot",
        )?;
        drop(frame);
        contained.push(report::caught(class, console, err));

        Ok(contained)
    }
}
