//! Demo configuration and validation.
//!
//! [`DemoConfig`] carries the constants every demo is parameterised by.
//! The defaults reproduce the classic snippets exactly: a `"Hello"`
//! greeting in a 6-byte buffer, an overflow write at index 12, a suffix
//! of `'!'` and a scoped value of 1337.

use std::error::Error;
use std::fmt;

use faultline_arena::{BufferConfig, ConfigError};

/// Parameters shared by the catalogue's demos.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DemoConfig {
    /// Greeting copied into the buffer. Must not contain NUL.
    pub greeting: String,
    /// Byte appended by the temporal demo and written out of bounds by
    /// the spatial one.
    pub suffix: u8,
    /// Value owned by the scope demo's inner scope.
    pub scoped_value: i32,
    /// Index of the spatial demo's overflowing write.
    pub overflow_index: usize,
    /// Allocation parameters for greeting buffers.
    pub buffer: BufferConfig,
}

impl DemoConfig {
    /// Default greeting.
    pub const DEFAULT_GREETING: &'static str = "Hello";

    /// Default overflow index.
    pub const DEFAULT_OVERFLOW_INDEX: usize = 12;

    /// Default scoped value.
    pub const DEFAULT_SCOPED_VALUE: i32 = 1337;

    /// Config for `greeting`, with a buffer sized exactly to fit it.
    pub fn new(greeting: impl Into<String>) -> Self {
        let greeting = greeting.into();
        let buffer = BufferConfig::new(greeting.len() + 1);
        Self {
            greeting,
            suffix: b'!',
            scoped_value: Self::DEFAULT_SCOPED_VALUE,
            overflow_index: Self::DEFAULT_OVERFLOW_INDEX,
            buffer,
        }
    }

    /// Greeting plus suffix, as held by a new user's record.
    pub fn record_greeting(&self) -> String {
        let mut text = self.greeting.clone();
        text.push(char::from(self.suffix));
        text
    }

    /// Check that the demos can run their safe paths with this config.
    pub fn validate(&self) -> Result<(), DemoConfigError> {
        self.buffer.validate().map_err(DemoConfigError::Buffer)?;
        if self.greeting.as_bytes().contains(&0) {
            return Err(DemoConfigError::GreetingContainsNul);
        }
        if self.suffix == 0 || !self.suffix.is_ascii() {
            return Err(DemoConfigError::InvalidSuffix { suffix: self.suffix });
        }
        let needed = self.greeting.len() + 1;
        if self.buffer.capacity < needed {
            return Err(DemoConfigError::CapacityTooSmall {
                needed,
                configured: self.buffer.capacity,
            });
        }
        if self.overflow_index < self.buffer.capacity {
            return Err(DemoConfigError::OverflowIndexInBounds {
                index: self.overflow_index,
                capacity: self.buffer.capacity,
            });
        }
        Ok(())
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_GREETING)
    }
}

/// Errors detected during [`DemoConfig::validate()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DemoConfigError {
    /// Buffer configuration is invalid.
    Buffer(ConfigError),
    /// The greeting has an embedded NUL and would be truncated.
    GreetingContainsNul,
    /// The suffix is NUL or not ASCII.
    InvalidSuffix {
        /// The rejected byte.
        suffix: u8,
    },
    /// The buffer cannot hold the greeting and its terminator.
    CapacityTooSmall {
        /// Bytes the greeting needs including its terminator.
        needed: usize,
        /// Configured capacity.
        configured: usize,
    },
    /// The "overflowing" write would land inside the buffer.
    OverflowIndexInBounds {
        /// Configured overflow index.
        index: usize,
        /// Configured capacity.
        capacity: usize,
    },
}

impl DemoConfigError {
    /// Process exit status reported by the CLI (`EX_USAGE`).
    pub fn exit_code(&self) -> u8 {
        64
    }
}

impl fmt::Display for DemoConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buffer(err) => write!(f, "buffer config: {err}"),
            Self::GreetingContainsNul => write!(f, "greeting must not contain NUL"),
            Self::InvalidSuffix { suffix } => {
                write!(f, "suffix byte {suffix:#04x} must be non-NUL ASCII")
            }
            Self::CapacityTooSmall { needed, configured } => write!(
                f,
                "buffer capacity {configured} cannot hold greeting and terminator ({needed} bytes)"
            ),
            Self::OverflowIndexInBounds { index, capacity } => write!(
                f,
                "overflow index {index} is inside the buffer (capacity {capacity})"
            ),
        }
    }
}

impl Error for DemoConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Buffer(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_snippets() {
        let config = DemoConfig::default();
        assert_eq!(config.greeting, "Hello");
        assert_eq!(config.buffer.capacity, 6);
        assert_eq!(config.overflow_index, 12);
        assert_eq!(config.scoped_value, 1337);
        assert_eq!(config.record_greeting(), "Hello!");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn buffer_sized_to_greeting() {
        let config = DemoConfig::new("Hi there");
        assert_eq!(config.buffer.capacity, 9);
        assert!(config.validate().is_ok());

        // A longer greeting can swallow the default overflow index.
        let config = DemoConfig::new("Howdy, world");
        assert!(matches!(
            config.validate(),
            Err(DemoConfigError::OverflowIndexInBounds { index: 12, capacity: 13 })
        ));
    }

    #[test]
    fn overflow_index_inside_buffer_rejected() {
        let config = DemoConfig {
            overflow_index: 3,
            ..DemoConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(DemoConfigError::OverflowIndexInBounds {
                index: 3,
                capacity: 6
            })
        );
    }

    #[test]
    fn capacity_must_fit_terminator() {
        let mut config = DemoConfig::default();
        config.buffer.capacity = 5;
        assert_eq!(
            config.validate(),
            Err(DemoConfigError::CapacityTooSmall {
                needed: 6,
                configured: 5
            })
        );
    }

    #[test]
    fn nul_in_greeting_rejected() {
        let config = DemoConfig::new("He\0llo");
        assert_eq!(config.validate(), Err(DemoConfigError::GreetingContainsNul));
    }

    #[test]
    fn nul_suffix_rejected() {
        let config = DemoConfig {
            suffix: 0,
            ..DemoConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(DemoConfigError::InvalidSuffix { suffix: 0 })
        );
    }

    #[test]
    fn buffer_errors_are_chained() {
        let mut config = DemoConfig::default();
        config.buffer.capacity = 0;
        let err = config.validate().unwrap_err();
        assert_eq!(err, DemoConfigError::Buffer(ConfigError::ZeroCapacity));
        assert!(err.source().is_some());
        assert_eq!(err.exit_code(), 64);
    }
}
