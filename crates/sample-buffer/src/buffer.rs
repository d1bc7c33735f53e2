//! Circular Sample Buffer Implementation

use std::sync::atomic::{AtomicUsize, Ordering};

/// Default buffer capacity (30 samples = ~1.2s at 40ms/sample)
pub const DEFAULT_CAPACITY: usize = 30;

/// Single-writer ring buffer of raw ADC counts
///
/// The write index wraps modulo capacity, so once the buffer has been filled
/// a snapshot always covers the most recent `capacity` samples. During a
/// partial refill the snapshot mixes old and new samples; the staleness
/// window is one buffer cycle.
pub struct SampleBuffer {
    /// Pre-allocated storage, zero-initialized
    storage: Box<[u16]>,
    /// Capacity of the buffer
    capacity: usize,
    /// Write index (next slot to overwrite)
    write_index: AtomicUsize,
    /// Total samples written (for warm-up detection)
    total_written: AtomicUsize,
}

impl SampleBuffer {
    /// Create a new sample buffer with given capacity
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "sample buffer capacity must be non-zero");
        Self {
            storage: vec![0u16; capacity].into_boxed_slice(),
            capacity,
            write_index: AtomicUsize::new(0),
            total_written: AtomicUsize::new(0),
        }
    }

    /// Create a buffer with default capacity (30 samples)
    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }

    /// Push a raw sample, overwriting the oldest slot once full
    pub fn push(&self, sample: u16) {
        let index = self.write_index.load(Ordering::Relaxed);

        // SAFETY: We're the only writer, storage is pre-allocated
        unsafe {
            let ptr = self.storage.as_ptr() as *mut u16;
            std::ptr::write(ptr.add(index), sample);
        }

        self.write_index
            .store((index + 1) % self.capacity, Ordering::Release);
        self.total_written.fetch_add(1, Ordering::Relaxed);
    }

    /// Copy the current window of samples
    ///
    /// The copy never observes a torn sample, but slots ahead of the write
    /// index still hold values from the previous cycle (or zero before the
    /// first fill).
    pub fn snapshot(&self) -> Vec<u16> {
        let _ = self.write_index.load(Ordering::Acquire);
        self.storage.to_vec()
    }

    /// Get the buffer capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total samples written since creation
    pub fn total_written(&self) -> usize {
        self.total_written.load(Ordering::Relaxed)
    }

    /// Whether every slot has been written at least once
    pub fn is_warm(&self) -> bool {
        self.total_written() >= self.capacity
    }
}

// SAFETY: SampleBuffer is designed for single-writer use; readers only take
// snapshot copies of plain u16 slots, so sharing across tasks is sound for
// the mixed-generation reads the acquisition contract already allows.
unsafe impl Send for SampleBuffer {}
unsafe impl Sync for SampleBuffer {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_push_and_snapshot() {
        let buffer = SampleBuffer::new(5);

        for i in 0..3u16 {
            buffer.push(100 + i);
        }

        let snapshot = buffer.snapshot();
        assert_eq!(snapshot.len(), 5);
        assert_eq!(&snapshot[..3], &[100, 101, 102]);
        // Unfilled slots are still zero
        assert_eq!(&snapshot[3..], &[0, 0]);
        assert!(!buffer.is_warm());
    }

    #[test]
    fn test_wraparound_overwrites_oldest() {
        let buffer = SampleBuffer::new(5);

        for i in 0..7u16 {
            buffer.push(i);
        }

        // Slots 0 and 1 were overwritten by samples 5 and 6
        assert_eq!(buffer.snapshot(), vec![5, 6, 2, 3, 4]);
        assert_eq!(buffer.total_written(), 7);
        assert!(buffer.is_warm());
    }

    #[test]
    fn test_snapshot_does_not_mutate() {
        let buffer = SampleBuffer::new(3);
        buffer.push(7);

        let first = buffer.snapshot();
        let second = buffer.snapshot();
        assert_eq!(first, second);
        assert_eq!(buffer.total_written(), 1);
    }

    proptest! {
        #[test]
        fn prop_snapshot_holds_last_capacity_samples(samples in prop::collection::vec(any::<u16>(), 1..200)) {
            let buffer = SampleBuffer::new(DEFAULT_CAPACITY);
            for &s in &samples {
                buffer.push(s);
            }

            let snapshot = buffer.snapshot();
            prop_assert_eq!(snapshot.len(), DEFAULT_CAPACITY);

            // Every sample from the last full cycle is present in its slot
            let start = samples.len().saturating_sub(DEFAULT_CAPACITY);
            for (offset, &sample) in samples[start..].iter().enumerate() {
                let slot = (start + offset) % DEFAULT_CAPACITY;
                prop_assert_eq!(snapshot[slot], sample);
            }
        }
    }
}
