pub mod audio;
pub mod runner;
pub mod storage;

pub use assistive_engine;
pub use audio::{AudioCue, BrowserSpeech};
pub use runner::ActivityRunner;
pub use storage::LocalStorageBackend;

/// Generate all `#[wasm_bindgen]` exports for an activity.
///
/// Generates:
/// - `thread_local!` storage for the ActivityRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (init, tick, input handlers, view accessors, unmount)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod activity;
/// use activity::MyActivity;
///
/// assistive_web::export_activity!(MyActivity, "my-activity");
/// ```
///
/// # Arguments
///
/// - `$activity_type`: The activity struct type that implements
///   `assistive_engine::Activity` and has a `new()` constructor
/// - `$activity_name`: A string literal used in log messages
#[macro_export]
macro_rules! export_activity {
    ($activity_type:ty, $activity_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::ActivityRunner<$activity_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::ActivityRunner<$activity_type>) -> R) -> Option<R> {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                match borrow.as_mut() {
                    Some(runner) => Some(f(runner)),
                    None => {
                        log::warn!("{}: not initialized, call activity_init() first", $activity_name);
                        None
                    }
                }
            })
        }

        #[wasm_bindgen]
        pub fn activity_init() {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let activity = <$activity_type>::new();
            let runner = $crate::ActivityRunner::browser(activity);

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            with_runner(|r| r.init());
            log::info!("{}: initialized", $activity_name);
        }

        #[wasm_bindgen]
        pub fn activity_tick(dt_ms: f64) {
            with_runner(|r| r.tick(dt_ms));
        }

        #[wasm_bindgen]
        pub fn activity_command(kind: u32, a: u32, b: u32) {
            with_runner(|r| r.push_input($crate::assistive_engine::InputEvent::Command { kind, a, b }));
        }

        #[wasm_bindgen]
        pub fn activity_text(kind: u32, value: String) {
            with_runner(|r| r.push_input($crate::assistive_engine::InputEvent::Text { kind, value }));
        }

        #[wasm_bindgen]
        pub fn activity_pointer_down(x: f32, y: f32) {
            with_runner(|r| r.push_input($crate::assistive_engine::InputEvent::PointerDown { x, y }));
        }

        #[wasm_bindgen]
        pub fn activity_pointer_up(x: f32, y: f32) {
            with_runner(|r| r.push_input($crate::assistive_engine::InputEvent::PointerUp { x, y }));
        }

        #[wasm_bindgen]
        pub fn activity_pointer_move(x: f32, y: f32) {
            with_runner(|r| r.push_input($crate::assistive_engine::InputEvent::PointerMove { x, y }));
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn activity_view() -> String {
            with_runner(|r| r.view_json()).unwrap_or_else(|| String::from("null"))
        }

        #[wasm_bindgen]
        pub fn activity_events() -> String {
            with_runner(|r| r.events_json().to_owned()).unwrap_or_else(|| String::from("[]"))
        }

        /// Drop the runner. Any pending tick is cancelled.
        #[wasm_bindgen]
        pub fn activity_unmount() {
            let runner = RUNNER.with(|cell| cell.borrow_mut().take());
            if runner.is_some() {
                log::info!("{}: unmounted", $activity_name);
            }
        }
    };
}
