use crate::api::types::ActivityEvent;
use crate::api::voice::{VoiceQueue, DEFAULT_MAX_PENDING};
use crate::core::store::Store;
use crate::input::queue::InputQueue;

/// Configuration for the host, provided by the activity.
#[derive(Debug, Clone)]
pub struct ActivityConfig {
    /// BCP 47 language tag for speech output (default: "hr-HR").
    pub speech_lang: String,
    /// Maximum queued speech or cue requests per frame (default: 8).
    pub max_pending_voice: usize,
    /// Maximum activity events kept per frame (default: 32).
    pub max_events: usize,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            speech_lang: "hr-HR".to_owned(),
            max_pending_voice: DEFAULT_MAX_PENDING,
            max_events: 32,
        }
    }
}

/// The contract every interactive activity fulfills.
///
/// The host calls `update` once per frame with the input gathered since the
/// previous frame and the elapsed time. Activities own their engines; engines
/// turn elapsed milliseconds into whole-second ticks themselves.
pub trait Activity {
    /// Return host configuration. Called once before init.
    fn config(&self) -> ActivityConfig {
        ActivityConfig::default()
    }

    /// Load persisted state and set up engines.
    fn init(&mut self, ctx: &mut ActivityContext);

    /// Apply input, advance timers, persist what changed.
    fn update(&mut self, ctx: &mut ActivityContext, input: &InputQueue, elapsed_ms: u32);

    /// Read-only snapshot for the UI layer.
    fn view(&self) -> serde_json::Value;

    /// The hosting surface is going away. Cancel any pending ticks.
    fn unmount(&mut self, _ctx: &mut ActivityContext) {}
}

/// Mutable host services, passed to `Activity::init` and `Activity::update`.
pub struct ActivityContext {
    pub store: Store,
    pub voice: VoiceQueue,
    pub events: Vec<ActivityEvent>,
    /// Seed for id generation; hosts pass something time-derived.
    pub seed: u64,
    max_events: usize,
}

impl ActivityContext {
    pub fn new(store: Store, config: &ActivityConfig) -> Self {
        Self {
            store,
            voice: VoiceQueue::new(config.max_pending_voice),
            events: Vec::new(),
            seed: 1,
            max_events: config.max_events,
        }
    }

    /// Context over an in-memory store with default configuration.
    pub fn in_memory() -> Self {
        Self::new(Store::in_memory(), &ActivityConfig::default())
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Emit an event to be forwarded to the UI layer.
    pub fn emit_event(&mut self, event: ActivityEvent) {
        if self.events.len() >= self.max_events {
            log::warn!("activity: event buffer full, dropping {:?}", event);
            return;
        }
        self.events.push(event);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

impl Default for ActivityContext {
    fn default() -> Self {
        Self::in_memory()
    }
}
