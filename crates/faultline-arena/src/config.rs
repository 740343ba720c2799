//! Buffer configuration parameters.

use std::error::Error;
use std::fmt;

/// Configuration for [`GreetingBuffer`](crate::GreetingBuffer) allocation.
///
/// Validated with [`validate()`](BufferConfig::validate); all values are
/// plain data and immutable once a buffer is allocated from them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BufferConfig {
    /// Declared capacity of a new buffer in bytes.
    ///
    /// Default: 6, exactly `"Hello"` plus its terminator.
    pub capacity: usize,

    /// Upper bound for any allocation or resize of the buffer.
    ///
    /// Requests above this limit fail with `AllocationFailure` instead of
    /// reaching the allocator. Default: 4096.
    pub max_capacity: usize,
}

impl BufferConfig {
    /// Default capacity: `"Hello"` + NUL.
    pub const DEFAULT_CAPACITY: usize = 6;

    /// Default allocation ceiling.
    pub const DEFAULT_MAX_CAPACITY: usize = 4096;

    /// Create a config for the given capacity with the default ceiling.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            max_capacity: Self::DEFAULT_MAX_CAPACITY,
        }
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.capacity > self.max_capacity {
            return Err(ConfigError::CapacityAboveLimit {
                capacity: self.capacity,
                max_capacity: self.max_capacity,
            });
        }
        Ok(())
    }
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

/// Errors detected by [`BufferConfig::validate()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A buffer must hold at least its terminator.
    ZeroCapacity,
    /// Declared capacity exceeds the allocation ceiling.
    CapacityAboveLimit {
        /// The configured capacity.
        capacity: usize,
        /// The configured ceiling.
        max_capacity: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroCapacity => write!(f, "buffer capacity must be at least 1"),
            Self::CapacityAboveLimit {
                capacity,
                max_capacity,
            } => write!(
                f,
                "buffer capacity {capacity} exceeds the limit of {max_capacity}"
            ),
        }
    }
}

impl Error for ConfigError {}
