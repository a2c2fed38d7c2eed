use serde::Serialize;

/// An audio cue requested by activity logic.
/// The numeric value maps to a host-defined sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CueId(pub u32);

impl CueId {
    /// Short tone at the end of a countdown.
    pub const TIMER_DONE: CueId = CueId(1);
}

/// A notification from an activity to its host.
/// Generic container: `kind` identifies the event, `value` carries payload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActivityEvent {
    pub kind: u32,
    pub value: f32,
}

impl ActivityEvent {
    pub fn new(kind: u32, value: f32) -> Self {
        Self { kind, value }
    }
}
