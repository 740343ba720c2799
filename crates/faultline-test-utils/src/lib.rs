//! Test utilities and fixture demos for faultline development.
//!
//! Provides [`CapturedConsole`], a [`Console`] that records output for
//! assertions, and the fixture demos in [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use faultline_core::Console;

/// [`Console`] that keeps every line in memory.
#[derive(Debug, Default)]
pub struct CapturedConsole {
    lines: Vec<String>,
}

impl CapturedConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// All lines emitted so far, in order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The first line, which for every demo is its safe-path output.
    pub fn first(&self) -> Option<&str> {
        self.lines.first().map(String::as_str)
    }

    /// Lines that report a contained violation.
    pub fn contained(&self) -> Vec<&str> {
        self.lines
            .iter()
            .filter(|l| {
                l.contains("] caught at runtime: ") || l.contains("] rejected at compile time")
            })
            .map(String::as_str)
            .collect()
    }

    /// Forget everything captured so far.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl Console for CapturedConsole {
    fn line(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }
}
