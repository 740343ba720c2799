//! Temporal violations: using or releasing a buffer after it is gone.
//!
//! The classic snippet has two independent bugs. It computes the length
//! of the greeting before checking that the allocation succeeded, and it
//! frees the greeting a second time after the normal release. Its helper
//! also reads the byte one past the allocation while asserting on the
//! terminator. All three are reproduced here as caught conditions on a
//! [`TrackedHandle`]; the move-only [`GreetingBuffer::free`] rejects the
//! double free at compile time.

use faultline_arena::{GreetingBuffer, TrackedHandle};
use faultline_core::{Console, Containment, Demo, DemoError, ViolationClass, ViolationError};
use tracing::debug;

use crate::config::DemoConfig;
use crate::greeting::get_greeting;
use crate::report;

/// The temporal demo.
///
/// Safe path: acquire the greeting, measure it, append the suffix, print
/// `Hello!` and release. The attempt then keeps using the released handle.
pub struct TemporalDemo {
    config: DemoConfig,
}

impl TemporalDemo {
    /// Demo over `config`.
    pub fn new(config: DemoConfig) -> Self {
        Self { config }
    }

    /// Acquire, extend, print and release, leaving `greeting` released.
    fn greet(
        &self,
        greeting: &mut TrackedHandle<GreetingBuffer>,
        console: &mut dyn Console,
    ) -> Result<(), ViolationError> {
        greeting.acquire(|| get_greeting(&self.config))?;
        let len = greeting.get("strlen")?.terminated_len()?;
        greeting
            .get_mut("realloc")?
            .append_terminated(self.config.suffix)?;
        debug!(len, appended = %char::from(self.config.suffix), "extended greeting");
        console.line(&greeting.get("puts")?.text()?);
        greeting.release()
    }
}

impl Demo for TemporalDemo {
    fn class(&self) -> ViolationClass {
        ViolationClass::Temporal
    }

    fn run(&self, console: &mut dyn Console) -> Result<(), DemoError> {
        let mut greeting = TrackedHandle::uninitialized();
        self.greet(&mut greeting, console)?;
        Ok(())
    }

    fn attempt(&self, console: &mut dyn Console) -> Result<Vec<Containment>, DemoError> {
        let class = self.class();
        let mut contained = Vec::new();

        let mut greeting = TrackedHandle::uninitialized();
        self.greet(&mut greeting, console)?;
        if !greeting.state().is_released() {
            return Err(DemoError::Uncontained {
                class,
                detail: format!("greeting left {} after its release", greeting.state()),
            });
        }

        let err = report::expect_fault(class, greeting.release(), "second release succeeded")?;
        contained.push(report::caught(class, console, err));

        let err = report::expect_fault(
            class,
            greeting.get("strlen").map(|_| ()),
            "read after release succeeded",
        )?;
        contained.push(report::caught(class, console, err));

        // Length computed before the allocation was checked.
        let unchecked: TrackedHandle<GreetingBuffer> = TrackedHandle::uninitialized();
        let err = report::expect_fault(
            class,
            unchecked.get("strlen").map(|_| ()),
            "length of an unacquired handle",
        )?;
        contained.push(report::caught(class, console, err));

        // The helper's assert reads one byte past the allocation.
        let buffer = get_greeting(&self.config)?;
        let err = report::expect_fault(
            class,
            buffer.read(buffer.capacity()),
            "read one past the allocation succeeded",
        )?;
        buffer.free();
        contained.push(report::caught(class, console, err));

        contained.push(report::compile_time(
            class,
            console,
            "GreetingBuffer::free",
            "E0382",
        ));
        Ok(contained)
    }
}
