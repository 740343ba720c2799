//! The greeting buffer both buffer demos start from.

use faultline_arena::GreetingBuffer;
use faultline_core::ViolationError;

use crate::config::DemoConfig;

/// Allocate a buffer for the configured greeting and copy it in.
///
/// The terminator is checked to sit immediately after the greeting,
/// through a bounds-checked read: with a capacity too small to hold it
/// this fails with `OutOfBounds` rather than reading past the end.
pub fn get_greeting(config: &DemoConfig) -> Result<GreetingBuffer, ViolationError> {
    let mut buffer = GreetingBuffer::with_config(&config.buffer)?;
    buffer.copy_padded(config.greeting.as_bytes());
    check_terminator(&buffer, config.greeting.len())?;
    Ok(buffer)
}

/// Require a NUL at `index`.
///
/// A missing terminator is reported the way `strlen` would overrun: as
/// `OutOfBounds` at the buffer's capacity.
fn check_terminator(buffer: &GreetingBuffer, index: usize) -> Result<(), ViolationError> {
    if buffer.read(index)? != 0 {
        let capacity = buffer.capacity();
        return Err(ViolationError::OutOfBounds {
            index: capacity,
            capacity,
        });
    }
    Ok(())
}
