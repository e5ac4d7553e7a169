//! Growable output buffer
//!
//! The buffer keeps capacity and occupied length apart: `storage` is always
//! fully initialized up to its capacity, and `offset` marks the next free
//! position. Growth is explicit and goes through [`GrowableBuffer::ensure_capacity`].

use ber_core::{BerError, BerResult};
use crate::config::GrowthStrategy;

/// Owned byte region with a logical write offset
#[derive(Debug, Clone)]
pub struct GrowableBuffer {
    storage: Vec<u8>,
    offset: usize,
    strategy: GrowthStrategy,
}

impl GrowableBuffer {
    /// Create a buffer with the given initial capacity and growth policy
    ///
    /// # Arguments
    /// * `capacity` - Initial capacity in bytes, may be zero
    /// * `strategy` - How to grow when a write does not fit
    pub fn new(capacity: usize, strategy: GrowthStrategy) -> Self {
        Self {
            storage: vec![0; capacity],
            offset: 0,
            strategy,
        }
    }

    /// Make room for `additional` bytes past the write offset
    ///
    /// Existing content `[0, offset)` is preserved unchanged.
    ///
    /// # Arguments
    /// * `additional` - Bytes about to be written
    ///
    /// # Error Handling
    /// Returns `BerError::AllocationFailure` if the required size overflows
    /// or the allocator refuses the request. The buffer is unchanged in
    /// that case.
    pub fn ensure_capacity(&mut self, additional: usize) -> BerResult<()> {
        let required = self.offset.checked_add(additional).ok_or_else(|| {
            BerError::AllocationFailure(format!(
                "Required size overflows: {} + {}",
                self.offset, additional
            ))
        })?;

        let capacity = self.storage.len();
        if required <= capacity {
            return Ok(());
        }

        let new_capacity = self.strategy.next_capacity(capacity, required);
        self.storage
            .try_reserve_exact(new_capacity - capacity)
            .map_err(|e| {
                BerError::AllocationFailure(format!(
                    "Cannot grow buffer to {} bytes: {}",
                    new_capacity, e
                ))
            })?;
        self.storage.resize(new_capacity, 0);

        log::trace!(
            "BER buffer grown from {} to {} bytes ({:?})",
            capacity,
            new_capacity,
            self.strategy
        );
        Ok(())
    }

    /// Append a single byte
    pub fn append_byte(&mut self, byte: u8) -> BerResult<()> {
        self.ensure_capacity(1)?;
        self.storage[self.offset] = byte;
        self.offset += 1;
        Ok(())
    }

    /// Append a byte slice
    pub fn append_bytes(&mut self, bytes: &[u8]) -> BerResult<()> {
        self.ensure_capacity(bytes.len())?;
        let end = self.offset + bytes.len();
        self.storage[self.offset..end].copy_from_slice(bytes);
        self.offset = end;
        Ok(())
    }

    /// Insert `bytes` at position `at`, shifting `[at, offset)` right
    ///
    /// Only the sequence engine widens length fields, so positions always
    /// come from its markers.
    ///
    /// # Arguments
    /// * `at` - Insertion point, at most the write offset
    /// * `bytes` - Bytes to place at `at`
    ///
    /// # Error Handling
    /// Fails without modifying the buffer if growth fails. A position past
    /// the write offset is a writer bug: it panics in debug builds and is
    /// reported as an invariant violation otherwise.
    pub(crate) fn insert_bytes(&mut self, at: usize, bytes: &[u8]) -> BerResult<()> {
        debug_assert!(
            at <= self.offset,
            "insert position {} beyond write offset {}",
            at,
            self.offset
        );
        if at > self.offset {
            return Err(BerError::Encoding(format!(
                "Buffer invariant violated: insert position {} beyond write offset {}",
                at, self.offset
            )));
        }

        self.ensure_capacity(bytes.len())?;
        let shift = bytes.len();
        self.storage.copy_within(at..self.offset, at + shift);
        self.storage[at..at + shift].copy_from_slice(bytes);
        self.offset += shift;
        Ok(())
    }

    /// Replace the byte at `at` without moving the write offset
    ///
    /// # Arguments
    /// * `at` - Position inside the occupied prefix
    /// * `byte` - New value
    pub(crate) fn overwrite_byte(&mut self, at: usize, byte: u8) -> BerResult<()> {
        debug_assert!(
            at < self.offset,
            "overwrite position {} beyond write offset {}",
            at,
            self.offset
        );
        if at >= self.offset {
            return Err(BerError::Encoding(format!(
                "Buffer invariant violated: overwrite position {} beyond write offset {}",
                at, self.offset
            )));
        }

        self.storage[at] = byte;
        Ok(())
    }

    /// Get the occupied prefix `[0, offset)`
    pub fn as_slice(&self) -> &[u8] {
        &self.storage[..self.offset]
    }

    /// Consume the buffer, keeping only the occupied prefix
    pub fn into_vec(mut self) -> Vec<u8> {
        self.storage.truncate(self.offset);
        self.storage
    }

    /// Current write offset
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Current capacity in bytes
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Reset the write offset, keeping the allocation
    pub fn clear(&mut self) {
        self.offset = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_grow() {
        let mut buffer = GrowableBuffer::new(2, GrowthStrategy::Doubling);
        buffer.append_bytes(b"hello").unwrap();
        buffer.append_byte(b'!').unwrap();
        assert_eq!(buffer.as_slice(), b"hello!");
        assert_eq!(buffer.offset(), 6);
        assert!(buffer.capacity() >= 6);
    }

    #[test]
    fn test_doubling_growth() {
        let mut buffer = GrowableBuffer::new(4, GrowthStrategy::Doubling);
        buffer.append_bytes(&[1, 2, 3, 4, 5]).unwrap();
        assert_eq!(buffer.capacity(), 8);

        buffer.append_bytes(&[0; 20]).unwrap();
        assert_eq!(buffer.capacity(), 25);
    }

    #[test]
    fn test_exact_fit_growth() {
        let mut buffer = GrowableBuffer::new(4, GrowthStrategy::ExactFit);
        buffer.append_bytes(&[1, 2, 3, 4, 5]).unwrap();
        assert_eq!(buffer.capacity(), 5);
        assert_eq!(buffer.as_slice(), &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_zero_initial_capacity() {
        let mut buffer = GrowableBuffer::new(0, GrowthStrategy::Doubling);
        buffer.append_byte(0xC2).unwrap();
        assert_eq!(buffer.as_slice(), &[0xC2]);
    }

    #[test]
    fn test_insert_bytes_shifts_tail() {
        let mut buffer = GrowableBuffer::new(4, GrowthStrategy::Doubling);
        buffer.append_bytes(&[1, 2, 5, 6]).unwrap();
        buffer.insert_bytes(2, &[3, 4]).unwrap();
        assert_eq!(buffer.as_slice(), &[1, 2, 3, 4, 5, 6]);

        buffer.insert_bytes(6, &[7]).unwrap();
        assert_eq!(buffer.as_slice(), &[1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "insert position 3 beyond write offset 2")]
    fn test_insert_past_offset_panics_in_debug() {
        let mut buffer = GrowableBuffer::new(8, GrowthStrategy::Doubling);
        buffer.append_bytes(&[1, 2]).unwrap();
        let _ = buffer.insert_bytes(3, &[0]);
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn test_insert_past_offset_reports_invariant() {
        let mut buffer = GrowableBuffer::new(8, GrowthStrategy::Doubling);
        buffer.append_bytes(&[1, 2]).unwrap();
        let result = buffer.insert_bytes(3, &[0]);
        assert!(matches!(result, Err(BerError::Encoding(msg)) if msg.contains("invariant")));
        assert_eq!(buffer.as_slice(), &[1, 2]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "overwrite position 2 beyond write offset 2")]
    fn test_overwrite_past_offset_panics_in_debug() {
        let mut buffer = GrowableBuffer::new(8, GrowthStrategy::Doubling);
        buffer.append_bytes(&[0x30, 0x00]).unwrap();
        let _ = buffer.overwrite_byte(2, 0xff);
    }

    #[test]
    fn test_overwrite_byte() {
        let mut buffer = GrowableBuffer::new(8, GrowthStrategy::Doubling);
        buffer.append_bytes(&[0x30, 0x00]).unwrap();
        buffer.overwrite_byte(1, 0x0d).unwrap();
        assert_eq!(buffer.as_slice(), &[0x30, 0x0d]);
        assert_eq!(buffer.offset(), 2);
    }

    #[test]
    fn test_overflowing_request_fails() {
        let mut buffer = GrowableBuffer::new(4, GrowthStrategy::Doubling);
        buffer.append_byte(1).unwrap();
        assert!(matches!(
            buffer.ensure_capacity(usize::MAX),
            Err(BerError::AllocationFailure(_))
        ));
        assert_eq!(buffer.as_slice(), &[1]);
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut buffer = GrowableBuffer::new(4, GrowthStrategy::Doubling);
        buffer.append_bytes(&[1, 2, 3, 4, 5]).unwrap();
        buffer.clear();
        assert!(buffer.as_slice().is_empty());
        assert_eq!(buffer.capacity(), 8);
    }
}
