//! Fixed-capacity, bounds-checked byte buffers.
//!
//! A [`GreetingBuffer`] is the checked counterpart of a `malloc`'d
//! `char[]` holding a NUL-terminated string. Its length always equals its
//! declared capacity; every index is checked against it.

use std::borrow::Cow;

use faultline_core::ViolationError;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::config::BufferConfig;

/// Buffers up to this many bytes live inline without a heap allocation.
pub const INLINE_BYTES: usize = 16;

/// A fixed-capacity byte sequence with checked access.
///
/// Storage is acquired on construction and released exactly once, when
/// the buffer is dropped or passed to [`free`](GreetingBuffer::free).
/// Because `free` consumes the buffer, releasing it twice does not
/// compile:
///
/// ```compile_fail,E0382
/// use faultline_arena::GreetingBuffer;
///
/// let greeting = GreetingBuffer::from_greeting("Hello", 6).unwrap();
/// greeting.free();
/// greeting.free();
/// ```
///
/// and neither does reading it after release:
///
/// ```compile_fail,E0382
/// use faultline_arena::GreetingBuffer;
///
/// let greeting = GreetingBuffer::from_greeting("Hello", 6).unwrap();
/// greeting.free();
/// println!("{}", greeting.text().unwrap());
/// ```
#[derive(Debug)]
pub struct GreetingBuffer {
    bytes: SmallVec<[u8; INLINE_BYTES]>,
    max_capacity: usize,
}

impl GreetingBuffer {
    /// Allocate a zero-filled buffer of `capacity` bytes.
    pub fn allocate(capacity: usize) -> Result<Self, ViolationError> {
        Self::with_config(&BufferConfig::new(capacity))
    }

    /// Allocate a zero-filled buffer as described by `config`.
    ///
    /// Returns [`ViolationError::AllocationFailure`] if the capacity is
    /// above `config.max_capacity` or cannot be reserved.
    pub fn with_config(config: &BufferConfig) -> Result<Self, ViolationError> {
        let mut buffer = Self {
            bytes: SmallVec::new(),
            max_capacity: config.max_capacity,
        };
        buffer.resize(config.capacity)?;
        debug!(capacity = config.capacity, "allocated greeting buffer");
        Ok(buffer)
    }

    /// Allocate `capacity` bytes and copy `text` in with NUL padding.
    pub fn from_greeting(text: &str, capacity: usize) -> Result<Self, ViolationError> {
        let mut buffer = Self::allocate(capacity)?;
        buffer.copy_padded(text.as_bytes());
        Ok(buffer)
    }

    /// Copy `src` into the buffer, `strncpy` style.
    ///
    /// Copies up to the first NUL in `src` or the buffer's capacity,
    /// whichever comes first, then zero-fills the rest. If `src` fills the
    /// whole buffer, no terminator is written.
    pub fn copy_padded(&mut self, src: &[u8]) {
        let src = src.split(|&b| b == 0).next().unwrap_or_default();
        let n = src.len().min(self.bytes.len());
        self.bytes[..n].copy_from_slice(&src[..n]);
        self.bytes[n..].fill(0);
    }

    /// Write `byte` at `index`.
    ///
    /// Fails with [`ViolationError::OutOfBounds`] for any index outside
    /// `[0, capacity)`; the contents are left untouched.
    pub fn write(&mut self, index: usize, byte: u8) -> Result<(), ViolationError> {
        let capacity = self.capacity();
        let slot = self
            .bytes
            .get_mut(index)
            .ok_or(ViolationError::OutOfBounds { index, capacity })?;
        *slot = byte;
        Ok(())
    }

    /// Read the byte at `index`.
    pub fn read(&self, index: usize) -> Result<u8, ViolationError> {
        self.bytes
            .get(index)
            .copied()
            .ok_or(ViolationError::OutOfBounds {
                index,
                capacity: self.capacity(),
            })
    }

    /// Length of the string before the first NUL, `strlen` style.
    ///
    /// An unterminated buffer is an error: `strlen` would read byte
    /// `capacity`, so that is the index reported.
    pub fn terminated_len(&self) -> Result<usize, ViolationError> {
        let capacity = self.capacity();
        self.bytes
            .iter()
            .position(|&b| b == 0)
            .ok_or(ViolationError::OutOfBounds {
                index: capacity,
                capacity,
            })
    }

    /// The string before the first NUL, decoded lossily as UTF-8.
    pub fn text(&self) -> Result<Cow<'_, str>, ViolationError> {
        let len = self.terminated_len()?;
        Ok(String::from_utf8_lossy(&self.bytes[..len]))
    }

    /// Change the capacity, zero-filling any new bytes (`realloc`).
    ///
    /// Shrinking truncates. Growing beyond the configured ceiling, or
    /// beyond what the allocator can reserve, fails with
    /// [`ViolationError::AllocationFailure`] and leaves the buffer as it was.
    pub fn resize(&mut self, new_capacity: usize) -> Result<(), ViolationError> {
        let failure = ViolationError::AllocationFailure {
            requested: new_capacity,
        };
        if new_capacity > self.max_capacity {
            return Err(failure);
        }
        let additional = new_capacity.saturating_sub(self.bytes.len());
        self.bytes
            .try_reserve_exact(additional)
            .map_err(|_| failure)?;
        self.bytes.resize(new_capacity, 0);
        Ok(())
    }

    /// Append `byte` to the terminated string, growing by one if needed.
    ///
    /// The new byte goes where the terminator was and a fresh terminator
    /// follows it.
    pub fn append_terminated(&mut self, byte: u8) -> Result<(), ViolationError> {
        let len = self.terminated_len()?;
        let needed = len
            .checked_add(2)
            .ok_or(ViolationError::AllocationFailure {
                requested: usize::MAX,
            })?;
        if needed > self.capacity() {
            self.resize(needed)?;
            debug!(capacity = needed, "grew greeting buffer");
        }
        self.write(len, byte)?;
        self.write(len + 1, 0)
    }

    /// Release the buffer. Consumes it, so it cannot be released again.
    pub fn free(self) {
        drop(self);
    }

    /// Declared capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    /// The full contents, terminator and padding included.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Whether the contents still fit in inline storage.
    pub fn is_inline(&self) -> bool {
        !self.bytes.spilled()
    }
}

impl Drop for GreetingBuffer {
    fn drop(&mut self) {
        trace!(capacity = self.bytes.len(), "released greeting buffer");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_is_zero_filled() {
        let buf = GreetingBuffer::allocate(6).unwrap();
        assert_eq!(buf.capacity(), 6);
        assert_eq!(buf.as_bytes(), &[0u8; 6]);
        assert!(buf.is_inline());
    }

    #[test]
    fn from_greeting_terminates_at_index_five() {
        let buf = GreetingBuffer::from_greeting("Hello", 6).unwrap();
        assert_eq!(buf.as_bytes(), b"Hello\0");
        assert_eq!(buf.read(5), Ok(0));
        assert_eq!(buf.text().unwrap(), "Hello");
    }

    #[test]
    fn writes_in_bounds_round_trip() {
        let mut buf = GreetingBuffer::allocate(6).unwrap();
        for (i, &b) in b"Hello\0".iter().enumerate() {
            buf.write(i, b).unwrap();
        }
        assert_eq!(buf.text().unwrap(), "Hello");
        for (i, &b) in b"Hello\0".iter().enumerate() {
            assert_eq!(buf.read(i), Ok(b));
        }
    }

    #[test]
    fn write_past_capacity_is_rejected_and_contents_unchanged() {
        let mut buf = GreetingBuffer::from_greeting("Hello", 6).unwrap();
        let before = buf.as_bytes().to_vec();
        let capacity = buf.capacity();
        for index in [capacity, capacity + 1, capacity + 100, 12] {
            assert_eq!(
                buf.write(index, b'!'),
                Err(ViolationError::OutOfBounds { index, capacity })
            );
        }
        assert_eq!(buf.as_bytes(), before.as_slice());
    }

    #[test]
    fn read_at_capacity_is_rejected() {
        let buf = GreetingBuffer::from_greeting("Hello", 6).unwrap();
        assert_eq!(
            buf.read(6),
            Err(ViolationError::OutOfBounds {
                index: 6,
                capacity: 6
            })
        );
    }

    #[test]
    fn unterminated_buffer_has_no_length() {
        let buf = GreetingBuffer::from_greeting("Hello!", 6).unwrap();
        assert_eq!(buf.as_bytes(), b"Hello!");
        assert_eq!(
            buf.terminated_len(),
            Err(ViolationError::OutOfBounds {
                index: 6,
                capacity: 6
            })
        );
        assert!(buf.text().is_err());
    }

    #[test]
    fn copy_stops_at_embedded_nul() {
        let buf = GreetingBuffer::from_greeting("Hi\0there", 8).unwrap();
        assert_eq!(buf.as_bytes(), b"Hi\0\0\0\0\0\0");
    }

    #[test]
    fn append_grows_by_one() {
        let mut buf = GreetingBuffer::from_greeting("Hello", 6).unwrap();
        buf.append_terminated(b'!').unwrap();
        assert_eq!(buf.capacity(), 7);
        assert_eq!(buf.as_bytes(), b"Hello!\0");
        assert_eq!(buf.text().unwrap(), "Hello!");
    }

    #[test]
    fn append_reuses_spare_capacity() {
        let mut buf = GreetingBuffer::from_greeting("Hello", 10).unwrap();
        buf.append_terminated(b'!').unwrap();
        assert_eq!(buf.capacity(), 10);
        assert_eq!(buf.text().unwrap(), "Hello!");
    }

    #[test]
    fn resize_above_ceiling_fails_and_keeps_contents() {
        let config = BufferConfig {
            capacity: 6,
            max_capacity: 6,
        };
        let mut buf = GreetingBuffer::with_config(&config).unwrap();
        buf.copy_padded(b"Hello");
        assert_eq!(
            buf.append_terminated(b'!'),
            Err(ViolationError::AllocationFailure { requested: 7 })
        );
        assert_eq!(buf.as_bytes(), b"Hello\0");
    }

    #[test]
    fn allocate_above_ceiling_fails() {
        let config = BufferConfig {
            capacity: 64,
            max_capacity: 32,
        };
        assert_eq!(
            GreetingBuffer::with_config(&config).unwrap_err(),
            ViolationError::AllocationFailure { requested: 64 }
        );
    }

    #[test]
    fn large_buffers_spill_to_the_heap() {
        let buf = GreetingBuffer::allocate(INLINE_BYTES + 1).unwrap();
        assert!(!buf.is_inline());
    }

    #[test]
    fn shrink_truncates() {
        let mut buf = GreetingBuffer::from_greeting("Hello", 6).unwrap();
        buf.resize(3).unwrap();
        assert_eq!(buf.as_bytes(), b"Hel");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn in_bounds_writes_read_back(
                capacity in 1usize..64,
                writes in proptest::collection::vec((0usize..64, any::<u8>()), 0..32),
            ) {
                let mut buf = GreetingBuffer::allocate(capacity).unwrap();
                let mut model = vec![0u8; capacity];
                for (index, byte) in writes {
                    let result = buf.write(index, byte);
                    if index < capacity {
                        prop_assert!(result.is_ok());
                        model[index] = byte;
                    } else {
                        prop_assert_eq!(result, Err(ViolationError::OutOfBounds { index, capacity }));
                    }
                }
                prop_assert_eq!(buf.as_bytes(), model.as_slice());
            }

            #[test]
            fn any_index_past_capacity_is_out_of_bounds(
                capacity in 1usize..64,
                past in 0usize..10_000,
            ) {
                let mut buf = GreetingBuffer::allocate(capacity).unwrap();
                let index = capacity + past;
                prop_assert_eq!(
                    buf.write(index, 0xAA),
                    Err(ViolationError::OutOfBounds { index, capacity })
                );
                prop_assert!(buf.as_bytes().iter().all(|&b| b == 0));
            }
        }
    }
}
