//! Paced breathing: IN -> HOLD -> OUT -> IN ... with fixed 4/4/6 second phases.

use serde::Serialize;

use crate::core::time::Ticker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BreathPhase {
    In,
    Hold,
    Out,
}

impl BreathPhase {
    /// Cycle order, starting phase first.
    pub const ORDER: [BreathPhase; 3] = [BreathPhase::In, BreathPhase::Hold, BreathPhase::Out];

    /// Fixed phase length in seconds.
    pub const fn duration(self) -> u32 {
        match self {
            BreathPhase::In => 4,
            BreathPhase::Hold => 4,
            BreathPhase::Out => 6,
        }
    }

    pub const fn next(self) -> BreathPhase {
        match self {
            BreathPhase::In => BreathPhase::Hold,
            BreathPhase::Hold => BreathPhase::Out,
            BreathPhase::Out => BreathPhase::In,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BreathPhase::In => "Udah",
            BreathPhase::Hold => "Zadrži",
            BreathPhase::Out => "Izdah",
        }
    }
}

/// Length of one full cycle in seconds.
pub const CYCLE_SECONDS: u32 =
    BreathPhase::In.duration() + BreathPhase::Hold.duration() + BreathPhase::Out.duration();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreathCycle {
    pub phase: BreathPhase,
    pub seconds_left_in_phase: u32,
    pub running: bool,
}

impl Default for BreathCycle {
    fn default() -> Self {
        Self {
            phase: BreathPhase::In,
            seconds_left_in_phase: BreathPhase::In.duration(),
            running: false,
        }
    }
}

/// Runs until explicitly stopped or reset; never terminates on its own.
pub struct PhaseCycle {
    cycle: BreathCycle,
    ticker: Ticker,
}

impl PhaseCycle {
    pub fn new() -> Self {
        Self {
            cycle: BreathCycle::default(),
            ticker: Ticker::seconds(),
        }
    }

    /// Start or pause. Phase and countdown are kept across a pause.
    pub fn toggle_running(&mut self) -> bool {
        if self.cycle.running {
            self.ticker.cancel();
            self.cycle.running = false;
        } else {
            self.ticker.arm();
            self.cycle.running = true;
        }
        self.cycle.running
    }

    pub fn reset(&mut self) {
        self.ticker.cancel();
        self.cycle = BreathCycle::default();
    }

    /// Feed elapsed frame time; one `tick` per whole elapsed second.
    pub fn advance(&mut self, elapsed_ms: u32) {
        for _ in 0..self.ticker.accumulate(elapsed_ms) {
            self.tick();
        }
    }

    /// One elapsed second. Rolls into the next phase instead of dropping
    /// below one.
    pub fn tick(&mut self) {
        if !self.cycle.running {
            return;
        }
        if self.cycle.seconds_left_in_phase <= 1 {
            let next = self.cycle.phase.next();
            self.cycle.phase = next;
            self.cycle.seconds_left_in_phase = next.duration();
        } else {
            self.cycle.seconds_left_in_phase -= 1;
        }
    }

    pub fn cycle(&self) -> BreathCycle {
        self.cycle
    }

    pub fn label(&self) -> &'static str {
        self.cycle.phase.label()
    }

    pub fn has_pending_tick(&self) -> bool {
        self.ticker.is_armed()
    }

    pub fn unmount(&mut self) {
        self.ticker.cancel();
        self.cycle.running = false;
    }
}

impl Default for PhaseCycle {
    fn default() -> Self {
        Self::new()
    }
}
