use assistive_engine::{
    Activity, ActivityConfig, ActivityContext, CuePlayer, InputEvent, InputQueue, SpeechOutput,
    Store,
};

use crate::audio::{AudioCue, BrowserSpeech};
use crate::storage::LocalStorageBackend;

/// Generic activity runner that wires up the host loop.
///
/// Each concrete activity (e.g., `autism-tools`) creates a `thread_local!`
/// ActivityRunner and exports free functions via `#[wasm_bindgen]`, because
/// wasm-bindgen cannot export generic structs directly.
pub struct ActivityRunner<A: Activity> {
    activity: A,
    ctx: ActivityContext,
    input: InputQueue,
    config: ActivityConfig,
    speech: Box<dyn SpeechOutput>,
    cues: Box<dyn CuePlayer>,
    initialized: bool,
    /// Fractional milliseconds carried between frames.
    carry_ms: f64,
    /// Events from the most recent frame, serialized for JS.
    events_json: String,
}

impl<A: Activity> ActivityRunner<A> {
    pub fn new(
        activity: A,
        store: Store,
        speech: impl SpeechOutput + 'static,
        cues: impl CuePlayer + 'static,
    ) -> Self {
        let config = activity.config();
        let ctx = ActivityContext::new(store, &config);

        Self {
            activity,
            ctx,
            input: InputQueue::new(),
            config,
            speech: Box::new(speech),
            cues: Box::new(cues),
            initialized: false,
            carry_ms: 0.0,
            events_json: String::from("[]"),
        }
    }

    /// Runner backed by `localStorage`, `speechSynthesis` and an audio element.
    pub fn browser(activity: A) -> Self {
        let seed = js_sys::Date::now() as u64;
        let mut runner = Self::new(
            activity,
            Store::new(LocalStorageBackend::new()),
            BrowserSpeech::new(),
            AudioCue::new(),
        );
        runner.ctx.seed = seed;
        runner
    }

    /// Initialize the activity. Call once after construction.
    pub fn init(&mut self) {
        self.config = self.activity.config();
        self.activity.init(&mut self.ctx);
        self.initialized = true;
    }

    /// Push an input event into the queue. Input arriving before `init` or
    /// after `unmount` is dropped.
    pub fn push_input(&mut self, event: InputEvent) {
        if !self.initialized {
            log::debug!("runner: dropping input while not mounted: {:?}", event);
            return;
        }
        self.input.push(event);
    }

    /// Run one frame: apply input, advance timers, flush speech and cues.
    pub fn tick(&mut self, dt_ms: f64) {
        if !self.initialized {
            self.input.drain();
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        let total = self.carry_ms + dt_ms.max(0.0);
        let whole = total.floor();
        self.carry_ms = total - whole;
        let elapsed_ms = whole.min(f64::from(u32::MAX)) as u32;

        self.activity.update(&mut self.ctx, &self.input, elapsed_ms);

        // Drain input after update
        self.input.drain();

        self.ctx.voice.flush(
            &self.config.speech_lang,
            self.speech.as_mut(),
            self.cues.as_mut(),
        );

        self.events_json = match serde_json::to_string(&self.ctx.events) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("runner: failed to encode events: {}", e);
                String::from("[]")
            }
        };
    }

    /// JSON snapshot of the activity for the UI layer.
    pub fn view_json(&self) -> String {
        self.activity.view().to_string()
    }

    /// JSON array of events emitted during the last frame.
    pub fn events_json(&self) -> &str {
        &self.events_json
    }

    /// Cancel pending ticks. Also runs on drop.
    pub fn unmount(&mut self) {
        if self.initialized {
            self.activity.unmount(&mut self.ctx);
            self.initialized = false;
        }
    }

    pub fn activity(&self) -> &A {
        &self.activity
    }

    pub fn context(&self) -> &ActivityContext {
        &self.ctx
    }
}

impl<A: Activity> Drop for ActivityRunner<A> {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assistive_engine::{ActivityEvent, CountdownTimer, Silent};

    /// Minimal activity: a countdown started by command 1.
    struct Countdown {
        timer: CountdownTimer,
        unmounted: bool,
    }

    impl Activity for Countdown {
        fn init(&mut self, _ctx: &mut ActivityContext) {}

        fn update(&mut self, ctx: &mut ActivityContext, input: &InputQueue, elapsed_ms: u32) {
            for event in input.iter() {
                if let InputEvent::Command { kind: 1, a, .. } = event {
                    self.timer.start(*a);
                }
            }
            self.timer.advance(elapsed_ms);
            for _ in self.timer.drain_events() {
                ctx.emit_event(ActivityEvent::new(1, 0.0));
            }
        }

        fn view(&self) -> serde_json::Value {
            serde_json::json!({ "remaining": self.timer.state().remaining_seconds })
        }

        fn unmount(&mut self, _ctx: &mut ActivityContext) {
            self.timer.unmount();
            self.unmounted = true;
        }
    }

    fn runner() -> ActivityRunner<Countdown> {
        let activity = Countdown { timer: CountdownTimer::new(), unmounted: false };
        let mut r = ActivityRunner::new(activity, Store::in_memory(), Silent, Silent);
        r.init();
        r
    }

    #[test]
    fn fractional_frames_add_up() {
        let mut r = runner();
        r.push_input(InputEvent::Command { kind: 1, a: 10, b: 0 });
        r.tick(0.0);
        for _ in 0..61 {
            r.tick(1000.0 / 60.0);
        }
        assert_eq!(r.view_json(), r#"{"remaining":9}"#);
    }

    #[test]
    fn ticks_before_init_are_ignored() {
        let activity = Countdown { timer: CountdownTimer::new(), unmounted: false };
        let mut r = ActivityRunner::new(activity, Store::in_memory(), Silent, Silent);
        r.push_input(InputEvent::Command { kind: 1, a: 10, b: 0 });
        r.tick(5000.0);
        assert!(!r.activity().timer.is_running());
    }

    #[test]
    fn input_before_init_is_not_replayed() {
        let activity = Countdown { timer: CountdownTimer::new(), unmounted: false };
        let mut r = ActivityRunner::new(activity, Store::in_memory(), Silent, Silent);
        r.push_input(InputEvent::Command { kind: 1, a: 10, b: 0 });
        r.init();
        r.tick(1000.0);
        assert!(!r.activity().timer.is_running());
        assert!(!r.activity().timer.has_pending_tick());
    }

    #[test]
    fn input_after_unmount_is_dropped() {
        let mut r = runner();
        r.unmount();
        r.push_input(InputEvent::Command { kind: 1, a: 10, b: 0 });
        r.init();
        r.tick(0.0);
        assert!(!r.activity().timer.is_running());
    }

    #[test]
    fn events_are_exposed_for_one_frame() {
        let mut r = runner();
        r.push_input(InputEvent::Command { kind: 1, a: 1, b: 0 });
        r.tick(1000.0);
        assert_ne!(r.events_json(), "[]");
        r.tick(16.0);
        assert_eq!(r.events_json(), "[]");
    }

    #[test]
    fn unmount_cancels_pending_ticks() {
        let mut r = runner();
        r.push_input(InputEvent::Command { kind: 1, a: 30, b: 0 });
        r.tick(0.0);
        assert!(r.activity().timer.has_pending_tick());
        r.unmount();
        assert!(r.activity().unmounted);
        assert!(!r.activity().timer.has_pending_tick());
        r.tick(5000.0);
        assert_eq!(r.activity().timer.state().remaining_seconds, 30);
    }
}
