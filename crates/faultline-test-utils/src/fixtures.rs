//! Reusable demo fixtures.
//!
//! Three misbehaving demos for exercising catalogue and CLI error paths:
//!
//! - [`LeakyDemo`]: its attempt lets the violation through.
//! - [`FailingDemo`]: its safe path fails.
//! - [`StaticOnlyDemo`]: every violation is a compile-time rejection.

use faultline_core::{Console, Containment, Demo, DemoError, ViolationClass, ViolationError};

/// Prints `output` on the safe path and reports its attempt as uncontained.
pub struct LeakyDemo {
    pub class: ViolationClass,
    pub output: String,
}

impl LeakyDemo {
    pub fn new(class: ViolationClass, output: impl Into<String>) -> Self {
        Self {
            class,
            output: output.into(),
        }
    }
}

impl Demo for LeakyDemo {
    fn class(&self) -> ViolationClass {
        self.class
    }

    fn run(&self, console: &mut dyn Console) -> Result<(), DemoError> {
        console.line(&self.output);
        Ok(())
    }

    fn attempt(&self, _console: &mut dyn Console) -> Result<Vec<Containment>, DemoError> {
        Err(DemoError::Uncontained {
            class: self.class,
            detail: "fixture leaks on purpose".into(),
        })
    }
}

/// Safe path fails with the configured violation.
pub struct FailingDemo {
    pub class: ViolationClass,
    pub error: ViolationError,
}

impl FailingDemo {
    pub fn new(class: ViolationClass, error: ViolationError) -> Self {
        Self { class, error }
    }
}

impl Demo for FailingDemo {
    fn class(&self) -> ViolationClass {
        self.class
    }

    fn run(&self, _console: &mut dyn Console) -> Result<(), DemoError> {
        Err(DemoError::Violation(self.error.clone()))
    }

    fn attempt(&self, console: &mut dyn Console) -> Result<Vec<Containment>, DemoError> {
        self.run(console)?;
        Ok(Vec::new())
    }
}

/// Every induced violation is rejected at compile time.
pub struct StaticOnlyDemo {
    pub class: ViolationClass,
}

impl Demo for StaticOnlyDemo {
    fn class(&self) -> ViolationClass {
        self.class
    }

    fn run(&self, _console: &mut dyn Console) -> Result<(), DemoError> {
        Ok(())
    }

    fn attempt(&self, _console: &mut dyn Console) -> Result<Vec<Containment>, DemoError> {
        Ok(vec![Containment::CompileTime {
            case: "fixture",
            error_code: "E0000",
        }])
    }
}
