/// Default tick period: engines count whole seconds.
pub const TICK_PERIOD_MS: u32 = 1000;

/// Owned, cancellable periodic schedule.
///
/// Each engine stores exactly one `Ticker`. Arming always replaces the
/// previous schedule, so there is never more than one outstanding stream of
/// ticks. Frame time fed to `accumulate` only counts while armed.
#[derive(Debug, Clone)]
pub struct Ticker {
    /// Period between ticks in milliseconds.
    period_ms: u32,
    /// Elapsed time carried toward the next tick.
    accumulator_ms: u64,
    armed: bool,
}

impl Ticker {
    pub fn new(period_ms: u32) -> Self {
        Self {
            period_ms: period_ms.max(1),
            accumulator_ms: 0,
            armed: false,
        }
    }

    /// One tick per second.
    pub fn seconds() -> Self {
        Self::new(TICK_PERIOD_MS)
    }

    /// Cancel whatever is pending and arm a fresh schedule.
    pub fn arm(&mut self) {
        self.cancel();
        self.armed = true;
    }

    /// Drop the pending schedule and any partially elapsed period.
    pub fn cancel(&mut self) {
        self.armed = false;
        self.accumulator_ms = 0;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Add elapsed frame time. Returns the number of whole periods due.
    /// Nothing accumulates while disarmed.
    pub fn accumulate(&mut self, elapsed_ms: u32) -> u32 {
        if !self.armed {
            return 0;
        }
        self.accumulator_ms += u64::from(elapsed_ms);
        let period = u64::from(self.period_ms);
        let due = self.accumulator_ms / period;
        self.accumulator_ms -= due * period;
        due.min(u64::from(u32::MAX)) as u32
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::seconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disarmed_ticker_never_fires() {
        let mut t = Ticker::seconds();
        assert_eq!(t.accumulate(5000), 0);
        assert!(!t.is_armed());
    }

    #[test]
    fn accumulates_partial_periods() {
        let mut t = Ticker::seconds();
        t.arm();
        assert_eq!(t.accumulate(400), 0);
        assert_eq!(t.accumulate(700), 1);
        assert_eq!(t.accumulate(899), 0);
        assert_eq!(t.accumulate(1), 1);
    }

    #[test]
    fn large_frame_yields_every_elapsed_period() {
        let mut t = Ticker::seconds();
        t.arm();
        assert_eq!(t.accumulate(3500), 3);
        assert_eq!(t.accumulate(500), 1);
    }

    #[test]
    fn rearm_discards_partial_progress() {
        let mut t = Ticker::seconds();
        t.arm();
        t.accumulate(900);
        t.arm();
        assert_eq!(t.accumulate(900), 0);
        assert_eq!(t.accumulate(100), 1);
    }

    #[test]
    fn cancel_drops_schedule() {
        let mut t = Ticker::seconds();
        t.arm();
        t.accumulate(999);
        t.cancel();
        assert!(!t.is_armed());
        t.arm();
        assert_eq!(t.accumulate(1), 0);
    }

    #[test]
    fn custom_period() {
        let mut t = Ticker::new(250);
        t.arm();
        assert_eq!(t.accumulate(1000), 4);
        assert_eq!(Ticker::new(0).accumulate(10), 0);
    }
}
