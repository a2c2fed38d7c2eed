pub mod api;
pub mod core;
pub mod engines;
pub mod input;
pub mod records;

// Re-export key types at crate root for convenience
pub use api::activity::{Activity, ActivityConfig, ActivityContext};
pub use api::types::{ActivityEvent, CueId};
pub use api::voice::{CollaboratorError, CuePlayer, Silent, SpeechOutput, VoicePolicy, VoiceQueue};
pub use crate::core::rng::Rng;
pub use crate::core::store::{MemoryBackend, RecordKey, StorageBackend, Store, StoreError};
pub use crate::core::time::Ticker;
pub use input::queue::{InputEvent, InputQueue};

pub use engines::aac::{AacBoard, AacCard};
pub use engines::countdown::{CountdownTimer, Milestone, TimerEvent, TimerPhase, TimerState};
pub use engines::phase_cycle::{BreathCycle, BreathPhase, PhaseCycle};
pub use engines::placement::{
    Badge, LayoutError, PlaceOutcome, PlacementPuzzle, PuzzleLayout, Rect, Tool, Zone,
};
pub use engines::quiz::{Question, QuizEngine, QuizProgress};
pub use engines::schedule::{ClockTime, ClockTimeError, ScheduleBoard, ScheduleError, ScheduleItem};
pub use records::reflection::Reflection;
pub use records::settings::{ComfortSettings, ComfortToggle};

// Geometry for pointer input
pub use glam::Vec2;
