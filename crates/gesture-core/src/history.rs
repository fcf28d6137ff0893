//! Bounded touch history.
//!
//! Emissions only ever read the latest and the second-to-latest sample,
//! so the history keeps those two in a fixed ring and counts the rest.

use tactile_touch_model::touch::{TimestampMs, TouchEvent};

/// The part of a touch event the recognizer needs after the fact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub time_ms: TimestampMs,
}

impl From<&TouchEvent> for Sample {
    fn from(event: &TouchEvent) -> Self {
        Self {
            time_ms: event.time_ms(),
        }
    }
}

/// Samples retained since the primary touch point went down.
#[derive(Debug, Clone, Default)]
pub struct TouchHistory {
    slots: [Option<Sample>; 2],
    /// Index of the latest sample in `slots`.
    head: usize,
    len: usize,
}

impl TouchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sample: Sample) {
        if self.len > 0 {
            self.head ^= 1;
        }
        self.slots[self.head] = Some(sample);
        self.len += 1;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Number of samples retained for the current gesture, including evicted ones.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn latest(&self) -> Option<&Sample> {
        if self.len == 0 {
            return None;
        }
        self.slots[self.head].as_ref()
    }

    /// The sample before the latest one.
    pub fn previous(&self) -> Option<&Sample> {
        if self.len < 2 {
            return None;
        }
        self.slots[self.head ^ 1].as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(time_ms: TimestampMs) -> Sample {
        Sample { time_ms }
    }

    #[test]
    fn test_empty_history() {
        let history = TouchHistory::new();
        assert!(history.is_empty());
        assert!(history.latest().is_none());
        assert!(history.previous().is_none());
    }

    #[test]
    fn test_single_sample_has_no_previous() {
        let mut history = TouchHistory::new();
        history.push(sample(10));
        assert_eq!(history.len(), 1);
        assert_eq!(history.latest().unwrap().time_ms, 10);
        assert!(history.previous().is_none());
    }

    #[test]
    fn test_ring_keeps_last_two() {
        let mut history = TouchHistory::new();
        for t in [10, 20, 30, 40, 50] {
            history.push(sample(t));
        }
        assert_eq!(history.len(), 5);
        assert_eq!(history.latest().unwrap().time_ms, 50);
        assert_eq!(history.previous().unwrap().time_ms, 40);
    }

    #[test]
    fn test_clear_resets() {
        let mut history = TouchHistory::new();
        history.push(sample(10));
        history.push(sample(20));
        history.clear();
        assert!(history.is_empty());
        assert!(history.previous().is_none());

        history.push(sample(30));
        assert_eq!(history.latest().unwrap().time_ms, 30);
        assert!(history.previous().is_none());
    }
}
