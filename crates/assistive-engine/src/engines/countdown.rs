//! Transition countdown with one-shot milestone announcements.
//!
//! State machine: Idle -> Running -> (Idle | Finished). The timer owns a
//! single `Ticker`; every start/stop/reset cancels it before anything new is
//! armed, so a restart can never leave two decrement streams behind.

use serde::Serialize;

use crate::core::time::Ticker;

/// Preset durations offered to the user, in minutes.
pub const PRESET_MINUTES: [u32; 4] = [1, 3, 5, 10];

/// Preset selected before the user picks one.
pub const DEFAULT_PRESET_MINUTES: u32 = 5;

/// Status line shown when the countdown runs out.
pub const FINISHED_STATUS: &str = "Vrijeme je!";

/// Phrase spoken when the countdown runs out.
pub const FINISHED_SPOKEN: &str = "Vrijeme je.";

/// Fixed announcement thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Milestone {
    FiveMinutes,
    OneMinute,
}

impl Milestone {
    pub const ALL: [Milestone; 2] = [Milestone::FiveMinutes, Milestone::OneMinute];

    /// Remaining seconds at which this milestone fires.
    pub fn threshold(self) -> u32 {
        match self {
            Milestone::FiveMinutes => 5 * 60,
            Milestone::OneMinute => 60,
        }
    }

    /// Status line and spoken phrase (they are identical for milestones).
    pub fn text(self) -> &'static str {
        match self {
            Milestone::FiveMinutes => "Još 5 minuta.",
            Milestone::OneMinute => "Još 1 minuta.",
        }
    }

    /// Level crossing: `now` has reached the threshold and the previous value
    /// was above it. A countdown seeded exactly on the threshold (`prev` is
    /// `None`) counts as a crossing; one seeded below it never fires.
    fn crossed(self, prev: Option<u32>, now: u32) -> bool {
        let mark = self.threshold();
        match prev {
            Some(prev) => prev > mark && now <= mark,
            None => now == mark,
        }
    }
}

/// Notifications emitted by the countdown, drained by the owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimerEvent {
    Milestone { milestone: Milestone },
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerPhase {
    Idle,
    Running,
    Finished,
}

/// Observable countdown state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    pub total_seconds: u32,
    pub remaining_seconds: u32,
    pub running: bool,
}

pub struct CountdownTimer {
    state: TimerState,
    phase: TimerPhase,
    ticker: Ticker,
    preset_minutes: u32,
    announcement: Option<&'static str>,
    events: Vec<TimerEvent>,
}

impl CountdownTimer {
    pub fn new() -> Self {
        Self {
            state: TimerState::default(),
            phase: TimerPhase::Idle,
            ticker: Ticker::seconds(),
            preset_minutes: DEFAULT_PRESET_MINUTES,
            announcement: None,
            events: Vec::with_capacity(4),
        }
    }

    /// Choose one of the presets. Does not affect a running countdown.
    pub fn select_preset(&mut self, minutes: u32) -> bool {
        if !PRESET_MINUTES.contains(&minutes) {
            log::debug!("countdown: ignoring unknown preset {}", minutes);
            return false;
        }
        self.preset_minutes = minutes;
        true
    }

    pub fn preset_minutes(&self) -> u32 {
        self.preset_minutes
    }

    /// Start from the selected preset.
    pub fn start_preset(&mut self) -> bool {
        self.start(self.preset_minutes * 60)
    }

    /// Seed a fresh countdown. Returns `false` (and changes nothing) when the
    /// duration is zero.
    pub fn start(&mut self, duration_seconds: u32) -> bool {
        if duration_seconds == 0 {
            log::debug!("countdown: rejected start with zero duration");
            return false;
        }
        self.ticker.arm();
        self.state = TimerState {
            total_seconds: duration_seconds,
            remaining_seconds: duration_seconds,
            running: true,
        };
        self.phase = TimerPhase::Running;
        self.announcement = None;
        self.check_milestones(None, duration_seconds);
        log::debug!("countdown: started for {}s", duration_seconds);
        true
    }

    /// Freeze the remaining time. A later `start` reseeds from scratch.
    pub fn stop(&mut self) {
        self.ticker.cancel();
        self.state.running = false;
        if self.phase == TimerPhase::Running {
            self.phase = TimerPhase::Idle;
        }
    }

    pub fn reset(&mut self) {
        self.ticker.cancel();
        self.state.running = false;
        self.state.remaining_seconds = 0;
        self.phase = TimerPhase::Idle;
        self.announcement = None;
    }

    /// Feed elapsed frame time; runs one `tick` per whole elapsed second.
    pub fn advance(&mut self, elapsed_ms: u32) {
        let due = self.ticker.accumulate(elapsed_ms);
        for _ in 0..due {
            if !self.state.running {
                break;
            }
            self.tick();
        }
    }

    /// One elapsed second. No-op unless running.
    pub fn tick(&mut self) {
        if !self.state.running {
            return;
        }
        let prev = self.state.remaining_seconds;
        let now = prev.saturating_sub(1);
        self.state.remaining_seconds = now;
        self.check_milestones(Some(prev), now);

        if now == 0 {
            self.ticker.cancel();
            self.state.running = false;
            self.phase = TimerPhase::Finished;
            self.announcement = Some(FINISHED_STATUS);
            self.events.push(TimerEvent::Finished);
            log::debug!("countdown: finished");
        }
    }

    fn check_milestones(&mut self, prev: Option<u32>, now: u32) {
        for milestone in Milestone::ALL {
            if milestone.crossed(prev, now) {
                self.announcement = Some(milestone.text());
                self.events.push(TimerEvent::Milestone { milestone });
            }
        }
    }

    /// Take all events emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<TimerEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    /// The most recent status line, if any.
    pub fn announcement(&self) -> Option<&'static str> {
        self.announcement
    }

    /// `MM:SS` while there is time left, otherwise the selected preset.
    pub fn display(&self) -> String {
        if self.state.remaining_seconds > 0 {
            format_mm_ss(self.state.remaining_seconds)
        } else {
            format!("{}:00", self.preset_minutes)
        }
    }

    /// Whether a tick schedule is currently pending.
    pub fn has_pending_tick(&self) -> bool {
        self.ticker.is_armed()
    }

    /// Cancel the pending schedule when the hosting surface goes away.
    pub fn unmount(&mut self) {
        self.stop();
    }
}

impl Default for CountdownTimer {
    fn default() -> Self {
        Self::new()
    }
}

/// Zero-padded minutes and seconds.
pub fn format_mm_ss(total_seconds: u32) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}
