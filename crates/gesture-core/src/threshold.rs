//! Phased threshold adjustment.
//!
//! A pan is only recognized after the primary point has already travelled
//! the minimum distance. Reporting that jump in one emission makes slow
//! pans lurch, so for slow starts the skipped distance is subtracted from
//! the reported position and paid back linearly over a fixed number of
//! emissions.

use tactile_touch_model::vector::Vector2;

/// Remaining adjustment schedule for the current pan.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ThresholdSmoother {
    remaining: u32,
    per_step: Vector2,
}

impl ThresholdSmoother {
    /// Schedule `steps` adjustments that together remove `skipped`.
    ///
    /// `steps == 0` disarms.
    pub fn arm(&mut self, steps: u32, skipped: Vector2) {
        if steps == 0 {
            self.disarm();
            return;
        }
        self.remaining = steps;
        self.per_step = skipped / steps as f32;
    }

    pub fn disarm(&mut self) {
        self.remaining = 0;
        self.per_step = Vector2::ZERO;
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn per_step(&self) -> Vector2 {
        self.per_step
    }

    pub fn is_armed(&self) -> bool {
        self.remaining > 0
    }

    /// Consume one step and return the adjusted position.
    ///
    /// The step that brings `remaining` to zero reports `raw` unchanged.
    pub fn apply(&mut self, raw: Vector2) -> Vector2 {
        if self.remaining == 0 {
            return raw;
        }
        self.remaining -= 1;
        raw - self.per_step * self.remaining as f32
    }
}
