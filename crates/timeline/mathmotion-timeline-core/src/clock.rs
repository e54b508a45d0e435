//! Converts host frame deltas into whole timer ticks.

/// Fixed-interval accumulator. The remainder carries over between frames so
/// irregular frame pacing still yields one tick per interval on average.
#[derive(Clone, Debug, PartialEq)]
pub struct TickClock {
    interval_ms: f64,
    carry_ms: f64,
}

impl TickClock {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: interval_ms.max(1) as f64,
            carry_ms: 0.0,
        }
    }

    #[inline]
    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Add `dt_ms` and return how many ticks elapsed. Negative or non-finite
    /// deltas count as zero.
    pub fn advance(&mut self, dt_ms: f64) -> u32 {
        if !dt_ms.is_finite() || dt_ms <= 0.0 {
            return 0;
        }
        self.carry_ms += dt_ms;
        let ticks = (self.carry_ms / self.interval_ms).floor();
        self.carry_ms -= ticks * self.interval_ms;
        ticks.min(u32::MAX as f64) as u32
    }

    /// Drop any partial interval (timer cancelled or restarted).
    #[inline]
    pub fn reset(&mut self) {
        self.carry_ms = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carries_remainder() {
        let mut c = TickClock::new(100);
        assert_eq!(c.advance(60.0), 0);
        assert_eq!(c.advance(60.0), 1);
        assert_eq!(c.advance(80.0), 1);
        assert_eq!(c.advance(350.0), 3);
    }

    #[test]
    fn ignores_bad_deltas_and_resets() {
        let mut c = TickClock::new(100);
        assert_eq!(c.advance(-5.0), 0);
        assert_eq!(c.advance(f64::NAN), 0);
        c.advance(90.0);
        c.reset();
        assert_eq!(c.advance(20.0), 0);
    }
}
