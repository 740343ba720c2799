//! Core abstraction traits for running demos and emitting their output.

use std::io::Write;

use crate::class::ViolationClass;
use crate::error::DemoError;
use crate::outcome::Containment;

/// Line-oriented sink for a demo's user-visible output.
///
/// Demos never print directly. The CLI passes a [`StdoutConsole`];
/// tests pass a capturing implementation and assert on the lines.
pub trait Console {
    /// Emit one line of output.
    fn line(&mut self, text: &str);
}

/// [`Console`] that writes each line to standard output.
#[derive(Debug, Default)]
pub struct StdoutConsole;

impl Console for StdoutConsole {
    fn line(&mut self, text: &str) {
        let stdout = std::io::stdout();
        let mut lock = stdout.lock();
        // A closed stdout (e.g. `| head`) is not a demo failure.
        let _ = writeln!(lock, "{text}");
    }
}

/// One entry in the violation catalogue.
///
/// A demo has a safe path that must always succeed, and an attempt path
/// that deliberately commits the violation its class is named after and
/// reports how each induced fault was contained.
pub trait Demo {
    /// The bug class this demo illustrates.
    fn class(&self) -> ViolationClass;

    /// Run the safe path, writing its output to `console`.
    fn run(&self, console: &mut dyn Console) -> Result<(), DemoError>;

    /// Attempt the violation.
    ///
    /// Every induced fault must be contained, either at compile time or by
    /// a checked primitive at runtime. Returns
    /// [`DemoError::Uncontained`] if one goes through.
    fn attempt(&self, console: &mut dyn Console) -> Result<Vec<Containment>, DemoError>;
}
