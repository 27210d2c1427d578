//! Fixed-capacity sliding history for LZ77 encoding and decoding.
//!
//! The history holds the most recent `capacity` bytes that have passed
//! through the codec. Once full, every new byte evicts the oldest one.
//! Positions are addressed by distance from the newest byte: distance 1 is
//! the most recently written byte, distance `len()` the oldest.

use crate::error::{DuopackError, Result};

/// A power-of-two ring buffer of recently seen bytes.
#[derive(Debug, Clone)]
pub struct RingBuffer {
    /// The underlying storage.
    buffer: Vec<u8>,
    /// Next write index.
    position: usize,
    /// Number of valid bytes (up to capacity).
    size: usize,
    /// `capacity - 1`, for masking indices.
    mask: usize,
}

impl RingBuffer {
    /// Create an empty history of the given capacity.
    ///
    /// The capacity must be a non-zero power of two.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 || !capacity.is_power_of_two() {
            return Err(DuopackError::invalid_config(format!(
                "history capacity {} is not a non-zero power of two",
                capacity
            )));
        }

        Ok(Self {
            buffer: vec![0; capacity],
            position: 0,
            size: 0,
            mask: capacity - 1,
        })
    }

    /// Maximum number of bytes retained.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Number of bytes currently held.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Whether no byte has been written yet.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Whether the next write will evict the oldest byte.
    pub fn is_full(&self) -> bool {
        self.size == self.buffer.len()
    }

    /// Forget every byte.
    pub fn clear(&mut self) {
        self.position = 0;
        self.size = 0;
    }

    /// Append a byte, evicting the oldest one when full.
    #[inline]
    pub fn write_byte(&mut self, byte: u8) {
        self.buffer[self.position] = byte;
        self.position = (self.position + 1) & self.mask;
        if self.size < self.buffer.len() {
            self.size += 1;
        }
    }

    /// Append every byte of `bytes` in order.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.write_byte(byte);
        }
    }

    /// Byte at `distance` back from the newest, without bounds checking
    /// against `len()`.
    ///
    /// The caller guarantees `1 <= distance <= len()`.
    #[inline]
    pub fn byte_at_distance(&self, distance: usize) -> u8 {
        debug_assert!(distance >= 1 && distance <= self.size);
        self.buffer[self.position.wrapping_sub(distance) & self.mask]
    }

    /// Byte at `distance` back from the newest.
    pub fn read_at_distance(&self, distance: usize) -> Result<u8> {
        if distance == 0 || distance > self.size {
            return Err(DuopackError::invalid_distance(distance, self.size));
        }
        Ok(self.byte_at_distance(distance))
    }

    /// Copy `length` bytes starting `distance` back, appending each copied
    /// byte to the history immediately and to `output`.
    ///
    /// Because every byte is re-appended before the next one is read, a
    /// `length` larger than `distance` repeats the copied run.
    pub fn copy_from_history(
        &mut self,
        distance: usize,
        length: usize,
        output: &mut Vec<u8>,
    ) -> Result<()> {
        if distance == 0 || distance > self.size {
            return Err(DuopackError::invalid_distance(distance, self.size));
        }

        output.reserve(length);
        for _ in 0..length {
            // The source stays `distance` behind the write head.
            let byte = self.byte_at_distance(distance);
            self.write_byte(byte);
            output.push(byte);
        }

        Ok(())
    }

    /// The last `count` bytes in write order (clamped to `len()`).
    pub fn last_bytes(&self, count: usize) -> Vec<u8> {
        let count = count.min(self.size);
        (1..=count)
            .rev()
            .map(|distance| self.byte_at_distance(distance))
            .collect()
    }
}
