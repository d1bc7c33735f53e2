//! Interrupt-to-Loop Packet Flag

use std::sync::atomic::{AtomicBool, Ordering};

/// Single-writer/single-reader handoff between the receive interrupt and the
/// main loop
///
/// The flag is a boolean, not a counter: a packet that lands while the loop
/// is mid-drain is dropped, exactly as on the hardware. The interrupt side
/// only touches the two atomics; no allocation, no blocking.
#[derive(Debug)]
pub struct PacketFlag {
    /// Packet-arrived flag, set by the interrupt
    pending: AtomicBool,
    /// Suppression switch, cleared by the loop while it reads
    enabled: AtomicBool,
}

impl PacketFlag {
    /// Create a flag with interrupts enabled
    pub fn new() -> Self {
        Self {
            pending: AtomicBool::new(false),
            enabled: AtomicBool::new(true),
        }
    }

    /// Interrupt side: mark a packet as pending
    ///
    /// Returns false (and does nothing) while the loop has the flag
    /// suppressed.
    pub fn raise(&self) -> bool {
        if !self.enabled.load(Ordering::Acquire) {
            return false;
        }
        self.pending.store(true, Ordering::Release);
        true
    }

    /// Loop side: consume the pending flag, returning whether it was set
    pub fn take(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }

    /// Whether a packet is pending
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Suppress the interrupt side while the loop drains the radio
    pub fn suppress(&self) {
        self.enabled.store(false, Ordering::Release);
    }

    /// Re-enable the interrupt side after the drain
    pub fn resume(&self) {
        self.enabled.store(true, Ordering::Release);
    }

    /// Whether the interrupt side is currently enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }
}

impl Default for PacketFlag {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raise_then_take() {
        let flag = PacketFlag::new();
        assert!(!flag.is_pending());

        assert!(flag.raise());
        assert!(flag.is_pending());

        assert!(flag.take());
        assert!(!flag.is_pending());
        assert!(!flag.take());
    }

    #[test]
    fn test_raise_while_suppressed_is_dropped() {
        let flag = PacketFlag::new();

        flag.suppress();
        assert!(!flag.raise());
        assert!(!flag.is_pending());

        flag.resume();
        assert!(flag.raise());
        assert!(flag.is_pending());
    }

    #[test]
    fn test_flag_is_boolean_not_a_counter() {
        let flag = PacketFlag::new();

        flag.raise();
        flag.raise();

        assert!(flag.take());
        // The second raise was coalesced into the same pending bit
        assert!(!flag.take());
    }
}
