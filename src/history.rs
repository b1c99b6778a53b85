//! Fixed-capacity measurement history.
//!
//! The ring keeps the most recent [`HIST_CAPACITY`] samples. Pushing into a
//! full ring silently evicts the oldest sample, so the buffer always holds
//! the tail end of the session with no reallocation in steady state.

/// Number of samples retained; one per rendered column at most.
pub const HIST_CAPACITY: usize = 320;

/// One sampling tick's worth of device activity.
///
/// Rates are unit-normalized counts per second (sectors/s for this tool);
/// `inflight` is an instantaneous operation count. Immutable once pushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Measurement {
    /// Sectors read per second over the last interval.
    pub read_rate: u64,
    /// Sectors written per second over the last interval.
    pub write_rate: u64,
    /// Operations in flight at sampling time.
    pub inflight: u64,
}

/// Circular buffer of [`Measurement`]s with oldest-first eviction.
///
/// `head` is the oldest retained index and `tail` the next write index,
/// both modulo capacity; logical size is `(tail - head) mod capacity`.
/// Callers never see raw indices, only ages relative to the newest sample.
#[derive(Debug)]
pub struct HistoryRing {
    slots: Box<[Measurement; HIST_CAPACITY]>,
    head: usize,
    tail: usize,
}

impl Default for HistoryRing {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryRing {
    /// Create an empty ring.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Box::new([Measurement::default(); HIST_CAPACITY]),
            head: 0,
            tail: 0,
        }
    }

    /// Number of retained samples, `0..=HIST_CAPACITY`.
    #[must_use]
    pub fn len(&self) -> usize {
        (self.tail + HIST_CAPACITY - self.head) % HIST_CAPACITY
    }

    /// Whether no samples have been retained yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    /// Append a sample, evicting the oldest one when full. O(1).
    pub fn push(&mut self, sample: Measurement) {
        self.slots[self.tail] = sample;
        self.tail = (self.tail + 1) % HIST_CAPACITY;
        if self.tail == self.head {
            self.head = (self.head + 1) % HIST_CAPACITY;
        }
    }

    /// Sample `age` ticks before the most recent one (age 0 = newest).
    ///
    /// Returns `None` when `age >= len()`.
    #[must_use]
    pub fn at(&self, age: usize) -> Option<Measurement> {
        if age >= self.len() {
            return None;
        }
        let idx = (self.tail + HIST_CAPACITY - 1 - age) % HIST_CAPACITY;
        Some(self.slots[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn m(read: u64) -> Measurement {
        Measurement {
            read_rate: read,
            write_rate: 0,
            inflight: 0,
        }
    }

    #[test]
    fn test_new_ring_is_empty() {
        let ring = HistoryRing::new();
        assert!(ring.is_empty());
        assert_eq!(ring.len(), 0);
        assert_eq!(ring.at(0), None);
    }

    #[test]
    fn test_push_and_at() {
        let mut ring = HistoryRing::new();
        ring.push(m(1));
        ring.push(m(2));
        ring.push(m(3));
        assert_eq!(ring.len(), 3);
        assert_eq!(ring.at(0), Some(m(3)));
        assert_eq!(ring.at(1), Some(m(2)));
        assert_eq!(ring.at(2), Some(m(1)));
        assert_eq!(ring.at(3), None);
    }

    #[test]
    fn test_len_never_exceeds_capacity() {
        let mut ring = HistoryRing::new();
        for i in 0..1000 {
            ring.push(m(i));
            assert!(ring.len() <= HIST_CAPACITY);
        }
        assert_eq!(ring.len(), HIST_CAPACITY);
    }

    #[test]
    fn test_oldest_eviction_after_400_pushes() {
        // 400 pushes into a 320-slot ring: the oldest retained sample is
        // push #81 (1-indexed).
        let mut ring = HistoryRing::new();
        for i in 1..=400u64 {
            ring.push(m(i));
        }
        assert_eq!(ring.len(), 320);
        assert_eq!(ring.at(0), Some(m(400)));
        assert_eq!(ring.at(ring.len() - 1), Some(m(81)));
    }

    #[test]
    fn test_eviction_keeps_most_recent() {
        let mut ring = HistoryRing::new();
        for i in 0..(HIST_CAPACITY as u64 + 5) {
            ring.push(m(i));
        }
        // at(len-1) is the 320th-most-recent push, not an older one.
        assert_eq!(ring.at(HIST_CAPACITY - 1), Some(m(5)));
    }

    #[test]
    fn test_at_out_of_range() {
        let mut ring = HistoryRing::new();
        ring.push(m(1));
        assert_eq!(ring.at(1), None);
        assert_eq!(ring.at(HIST_CAPACITY), None);
    }

    proptest! {
        #[test]
        fn prop_len_bounded(count in 0usize..2000) {
            let mut ring = HistoryRing::new();
            for i in 0..count {
                ring.push(m(i as u64));
            }
            prop_assert_eq!(ring.len(), count.min(HIST_CAPACITY));
        }

        #[test]
        fn prop_newest_is_last_pushed(count in 1usize..700) {
            let mut ring = HistoryRing::new();
            for i in 0..count {
                ring.push(m(i as u64));
            }
            prop_assert_eq!(ring.at(0), Some(m(count as u64 - 1)));
        }

        #[test]
        fn prop_ages_are_contiguous(count in 1usize..700, age in 0usize..320) {
            let mut ring = HistoryRing::new();
            for i in 0..count {
                ring.push(m(i as u64));
            }
            let expected = if age < ring.len() {
                Some(m((count - 1 - age) as u64))
            } else {
                None
            };
            prop_assert_eq!(ring.at(age), expected);
        }
    }
}
