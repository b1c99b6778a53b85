//! Auto-growing plot ceilings.
//!
//! The vertical scale only ever ratchets upward: when a plotted value
//! reaches its ceiling the ceiling doubles for the next frame. Never
//! shrinking prevents the scale from oscillating around a borderline
//! value, which would make the whole plot flicker.

use crate::history::Measurement;

/// Initial bandwidth ceiling in sectors per second.
const INITIAL_MAX_BANDWIDTH: u64 = 8192;

/// Initial in-flight operation ceiling.
const INITIAL_MAX_OPS: u64 = 16;

/// Overflow observed during one render pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overflow {
    /// Some read or write rate reached the bandwidth ceiling.
    pub bandwidth: bool,
    /// Some in-flight count exceeded the operation ceiling.
    pub ops: bool,
}

impl Overflow {
    /// Record one sample against the current ceilings.
    ///
    /// Rates at or above the ceiling count as overflow; in-flight counts
    /// must strictly exceed theirs.
    pub fn observe(&mut self, sample: Measurement, scale: &ScaleState) {
        if sample.read_rate >= scale.max_bandwidth() || sample.write_rate >= scale.max_bandwidth() {
            self.bandwidth = true;
        }
        if sample.inflight > scale.max_ops() {
            self.ops = true;
        }
    }
}

/// Monotonically non-decreasing plot ceilings.
///
/// `max_bandwidth` normalizes the read/write series, `max_ops` the
/// in-flight overlay. Both survive terminal resizes unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleState {
    max_bandwidth: u64,
    max_ops: u64,
}

impl Default for ScaleState {
    fn default() -> Self {
        Self::new()
    }
}

impl ScaleState {
    /// Create a scale at the initial ceilings (8192 sectors/s, 16 ops).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_bandwidth: INITIAL_MAX_BANDWIDTH,
            max_ops: INITIAL_MAX_OPS,
        }
    }

    /// Current bandwidth ceiling in sectors per second.
    #[must_use]
    pub const fn max_bandwidth(&self) -> u64 {
        self.max_bandwidth
    }

    /// Current in-flight operation ceiling.
    #[must_use]
    pub const fn max_ops(&self) -> u64 {
        self.max_ops
    }

    /// Double the ceilings that overflowed, effective next frame.
    pub fn apply(&mut self, overflow: Overflow) {
        if overflow.bandwidth {
            self.max_bandwidth *= 2;
        }
        if overflow.ops {
            self.max_ops *= 2;
        }
    }

    /// One quarter of the bandwidth ceiling, converted to whole MiB/s
    /// (512-byte sectors). Used for the left-hand axis labels.
    #[must_use]
    pub const fn quarter_bandwidth_mib(&self) -> u64 {
        self.max_bandwidth * 512 / (4 * 1024 * 1024)
    }

    /// One quarter of the operation ceiling, for the right-hand labels.
    #[must_use]
    pub const fn quarter_ops(&self) -> u64 {
        self.max_ops / 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::Measurement;

    fn sample(read: u64, write: u64, inflight: u64) -> Measurement {
        Measurement {
            read_rate: read,
            write_rate: write,
            inflight,
        }
    }

    #[test]
    fn test_initial_ceilings() {
        let scale = ScaleState::new();
        assert_eq!(scale.max_bandwidth(), 8192);
        assert_eq!(scale.max_ops(), 16);
    }

    #[test]
    fn test_rate_above_ceiling_doubles_bandwidth() {
        // max_bandwidth 8192, a single 9000 sectors/s sample -> 16384.
        let mut scale = ScaleState::new();
        let mut overflow = Overflow::default();
        overflow.observe(sample(9000, 0, 0), &scale);
        scale.apply(overflow);
        assert_eq!(scale.max_bandwidth(), 16384);
        assert_eq!(scale.max_ops(), 16);
    }

    #[test]
    fn test_rate_exactly_at_ceiling_is_overflow() {
        let mut scale = ScaleState::new();
        let mut overflow = Overflow::default();
        overflow.observe(sample(0, 8192, 0), &scale);
        assert!(overflow.bandwidth);
        scale.apply(overflow);
        assert_eq!(scale.max_bandwidth(), 16384);
    }

    #[test]
    fn test_rate_below_ceiling_is_not_overflow() {
        let scale = ScaleState::new();
        let mut overflow = Overflow::default();
        overflow.observe(sample(8191, 8191, 0), &scale);
        assert!(!overflow.bandwidth);
    }

    #[test]
    fn test_inflight_at_ceiling_is_not_overflow() {
        let scale = ScaleState::new();
        let mut overflow = Overflow::default();
        overflow.observe(sample(0, 0, 16), &scale);
        assert!(!overflow.ops);
    }

    #[test]
    fn test_inflight_above_ceiling_doubles_ops() {
        let mut scale = ScaleState::new();
        let mut overflow = Overflow::default();
        overflow.observe(sample(0, 0, 17), &scale);
        scale.apply(overflow);
        assert_eq!(scale.max_ops(), 32);
        assert_eq!(scale.max_bandwidth(), 8192);
    }

    #[test]
    fn test_ceilings_are_monotonic() {
        let mut scale = ScaleState::new();
        let mut seen_bw = scale.max_bandwidth();
        let mut seen_ops = scale.max_ops();
        let samples = [
            sample(10_000, 0, 0),
            sample(0, 0, 0),
            sample(0, 20_000, 40),
            sample(1, 1, 1),
            sample(100_000, 0, 0),
        ];
        for s in samples {
            let mut overflow = Overflow::default();
            overflow.observe(s, &scale);
            scale.apply(overflow);
            assert!(scale.max_bandwidth() >= seen_bw);
            assert!(scale.max_ops() >= seen_ops);
            seen_bw = scale.max_bandwidth();
            seen_ops = scale.max_ops();
        }
    }

    #[test]
    fn test_quarter_marks() {
        let scale = ScaleState::new();
        // 8192 sectors * 512 bytes = 4 MiB, so a quarter is 1 MiB/s.
        assert_eq!(scale.quarter_bandwidth_mib(), 1);
        assert_eq!(scale.quarter_ops(), 4);
    }
}
