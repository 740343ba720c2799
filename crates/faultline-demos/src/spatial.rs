//! Spatial violations: writing past the end of an allocation.

use faultline_core::{Console, Containment, Demo, DemoError, ViolationClass};

use crate::config::DemoConfig;
use crate::greeting::get_greeting;
use crate::report;

/// The spatial demo.
///
/// Allocates a buffer sized exactly to the greeting and its terminator,
/// then writes the suffix at `overflow_index`. The write is rejected with
/// `OutOfBounds` and the greeting prints intact.
pub struct SpatialDemo {
    config: DemoConfig,
}

impl SpatialDemo {
    /// Demo over `config`.
    pub fn new(config: DemoConfig) -> Self {
        Self { config }
    }
}

impl Demo for SpatialDemo {
    fn class(&self) -> ViolationClass {
        ViolationClass::Spatial
    }

    fn run(&self, console: &mut dyn Console) -> Result<(), DemoError> {
        let greeting = get_greeting(&self.config)?;
        console.line(&greeting.text()?);
        greeting.free();
        Ok(())
    }

    fn attempt(&self, console: &mut dyn Console) -> Result<Vec<Containment>, DemoError> {
        let class = self.class();
        let mut greeting = get_greeting(&self.config)?;
        let before = greeting.as_bytes().to_vec();

        let err = report::expect_fault(
            class,
            greeting.write(self.config.overflow_index, self.config.suffix),
            "write past capacity succeeded",
        )?;
        let contained = report::caught(class, console, err);

        if greeting.as_bytes() != before.as_slice() {
            return Err(DemoError::Uncontained {
                class,
                detail: "rejected write still modified the buffer".into(),
            });
        }
        console.line(&greeting.text()?);
        greeting.free();
        Ok(vec![contained])
    }
}
