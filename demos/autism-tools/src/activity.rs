use assistive_engine::*;
use serde_json::json;

// Command kinds (UI → Rust)
const CMD_SCHEDULE_TOGGLE: u32 = 1;
const CMD_SCHEDULE_REMOVE: u32 = 2;
const CMD_SCHEDULE_ADD: u32 = 3;
const CMD_SCHEDULE_RESET: u32 = 4;
const CMD_TIMER_PRESET: u32 = 10;
const CMD_TIMER_START: u32 = 11;
const CMD_TIMER_STOP: u32 = 12;
const CMD_TIMER_RESET: u32 = 13;
const CMD_AAC_PRESS: u32 = 20;
const CMD_BREATH_TOGGLE: u32 = 30;
const CMD_BREATH_RESET: u32 = 31;
const CMD_QUIZ_PICK: u32 = 40;
const CMD_QUIZ_NEXT: u32 = 41;
const CMD_QUIZ_RESET: u32 = 42;
const CMD_SETTING: u32 = 50;

// Text field kinds (UI → Rust)
const TEXT_NEW_TIME: u32 = 1;
const TEXT_NEW_TITLE: u32 = 2;

// Activity event kinds (Rust → UI)
const EVENT_TIMER_MILESTONE: u32 = 1;
const EVENT_TIMER_FINISHED: u32 = 2;

const DEFAULT_NEW_TIME: &str = "09:00";

/// Visual schedule, transition timer, AAC cards, breathing and the social
/// situations quiz, sharing one set of comfort settings.
pub struct AutismTools {
    settings: ComfortSettings,
    schedule: ScheduleBoard,
    timer: CountdownTimer,
    aac: AacBoard,
    breath: PhaseCycle,
    quiz: QuizEngine,
    new_time: String,
    new_title: String,
}

impl AutismTools {
    pub fn new() -> Self {
        Self {
            settings: ComfortSettings::default(),
            schedule: ScheduleBoard::seeded(1),
            timer: CountdownTimer::new(),
            aac: AacBoard::standard(),
            breath: PhaseCycle::new(),
            quiz: QuizEngine::situations(),
            new_time: DEFAULT_NEW_TIME.to_owned(),
            new_title: String::new(),
        }
    }

    /// Id of the item at a position in the time-sorted list.
    fn sorted_id(&self, index: u32) -> Option<String> {
        self.schedule
            .sorted()
            .get(index as usize)
            .map(|item| item.id.clone())
    }

    fn handle_command(&mut self, ctx: &mut ActivityContext, kind: u32, a: u32, b: u32) {
        match kind {
            CMD_SCHEDULE_TOGGLE => {
                if let Some(id) = self.sorted_id(a) {
                    self.schedule.toggle_done(&id);
                    self.schedule.save(&mut ctx.store);
                }
            }
            CMD_SCHEDULE_REMOVE => {
                if let Some(id) = self.sorted_id(a) {
                    self.schedule.remove(&id);
                    self.schedule.save(&mut ctx.store);
                }
            }
            CMD_SCHEDULE_ADD => match self.schedule.add(&self.new_time, &self.new_title) {
                Ok(_) => {
                    self.new_title.clear();
                    self.schedule.save(&mut ctx.store);
                }
                Err(e) => log::debug!("autism-tools: not adding activity: {}", e),
            },
            CMD_SCHEDULE_RESET => self.schedule.reset_saved(&mut ctx.store),
            CMD_TIMER_PRESET => {
                self.timer.select_preset(a);
            }
            CMD_TIMER_START => {
                self.timer.start_preset();
            }
            CMD_TIMER_STOP => self.timer.stop(),
            CMD_TIMER_RESET => self.timer.reset(),
            CMD_AAC_PRESS => {
                if let Some(phrase) = self.aac.press_index(a as usize) {
                    ctx.voice.speak(phrase);
                }
            }
            CMD_BREATH_TOGGLE => {
                self.breath.toggle_running();
            }
            CMD_BREATH_RESET => self.breath.reset(),
            CMD_QUIZ_PICK => {
                self.quiz.pick(a as usize);
            }
            CMD_QUIZ_NEXT => {
                self.quiz.advance();
            }
            CMD_QUIZ_RESET => self.quiz.reset(),
            CMD_SETTING => {
                if let Some(toggle) = ComfortToggle::from_index(a) {
                    self.settings.set(toggle, b != 0);
                    self.settings.save(&mut ctx.store);
                    ctx.voice.set_policy(self.settings.voice_policy());
                }
            }
            _ => log::debug!("autism-tools: unknown command {}", kind),
        }
    }

    /// Turn timer notifications into UI events, speech and the end cue.
    fn forward_timer_events(&mut self, ctx: &mut ActivityContext) {
        for event in self.timer.drain_events() {
            match event {
                TimerEvent::Milestone { milestone } => {
                    ctx.voice.speak(milestone.text());
                    ctx.emit_event(ActivityEvent::new(
                        EVENT_TIMER_MILESTONE,
                        milestone.threshold() as f32,
                    ));
                }
                TimerEvent::Finished => {
                    ctx.voice.cue(CueId::TIMER_DONE);
                    ctx.voice.speak(assistive_engine::engines::countdown::FINISHED_SPOKEN);
                    ctx.emit_event(ActivityEvent::new(EVENT_TIMER_FINISHED, 0.0));
                }
            }
        }
    }
}

impl Default for AutismTools {
    fn default() -> Self {
        Self::new()
    }
}

impl Activity for AutismTools {
    fn init(&mut self, ctx: &mut ActivityContext) {
        self.settings = ComfortSettings::load(&ctx.store);
        self.schedule = ScheduleBoard::load(&ctx.store, ctx.seed);
        ctx.voice.set_policy(self.settings.voice_policy());
        log::info!(
            "autism-tools: {} schedule items loaded",
            self.schedule.items().len()
        );
    }

    fn update(&mut self, ctx: &mut ActivityContext, input: &InputQueue, elapsed_ms: u32) {
        for event in input.iter() {
            match event {
                InputEvent::Command { kind, a, b } => self.handle_command(ctx, *kind, *a, *b),
                InputEvent::Text { kind: TEXT_NEW_TIME, value } => self.new_time.clone_from(value),
                InputEvent::Text { kind: TEXT_NEW_TITLE, value } => self.new_title.clone_from(value),
                _ => {}
            }
        }

        self.timer.advance(elapsed_ms);
        self.breath.advance(elapsed_ms);
        self.forward_timer_events(ctx);
    }

    fn view(&self) -> serde_json::Value {
        let breath = self.breath.cycle();
        json!({
            "settings": self.settings,
            "schedule": {
                "items": self.schedule.sorted(),
                "newTime": self.new_time,
                "newTitle": self.new_title,
            },
            "timer": {
                "presetMinutes": self.timer.preset_minutes(),
                "display": self.timer.display(),
                "phase": self.timer.phase(),
                "state": self.timer.state(),
                "announcement": self.timer.announcement(),
            },
            "aac": {
                "cards": self.aac.cards(),
                "message": self.aac.message(),
            },
            "breath": {
                "label": self.breath.label(),
                "secondsLeft": breath.seconds_left_in_phase,
                "running": breath.running,
            },
            "quiz": self.quiz.view(),
        })
    }

    fn unmount(&mut self, _ctx: &mut ActivityContext) {
        self.timer.unmount();
        self.breath.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mounted() -> (AutismTools, ActivityContext) {
        let mut ctx = ActivityContext::in_memory().with_seed(7);
        let mut tools = AutismTools::new();
        tools.init(&mut ctx);
        (tools, ctx)
    }

    fn frame(tools: &mut AutismTools, ctx: &mut ActivityContext, events: Vec<InputEvent>, ms: u32) {
        ctx.clear_frame_data();
        let mut input = InputQueue::new();
        for e in events {
            input.push(e);
        }
        tools.update(ctx, &input, ms);
    }

    fn command(kind: u32, a: u32, b: u32) -> InputEvent {
        InputEvent::Command { kind, a, b }
    }

    #[test]
    fn added_activity_is_persisted() {
        let (mut tools, mut ctx) = mounted();
        frame(
            &mut tools,
            &mut ctx,
            vec![
                InputEvent::Text { kind: TEXT_NEW_TIME, value: "09:15".into() },
                InputEvent::Text { kind: TEXT_NEW_TITLE, value: "Zadaća".into() },
                command(CMD_SCHEDULE_ADD, 0, 0),
            ],
            0,
        );
        assert!(tools.new_title.is_empty());

        let reloaded = ScheduleBoard::load(&ctx.store, 99);
        assert_eq!(reloaded.items().len(), SEED_LEN + 1);
        assert_eq!(reloaded.sorted()[2].title, "Zadaća");
    }

    const SEED_LEN: usize = assistive_engine::engines::schedule::SEED_DAY.len();

    #[test]
    fn toggle_uses_sorted_position() {
        let (mut tools, mut ctx) = mounted();
        frame(&mut tools, &mut ctx, vec![command(CMD_SCHEDULE_TOGGLE, 0, 0)], 0);
        assert!(tools.schedule.sorted()[0].done);
        assert_eq!(tools.schedule.sorted()[0].time, "07:30");
        frame(&mut tools, &mut ctx, vec![command(CMD_SCHEDULE_TOGGLE, 42, 0)], 0);
        assert_eq!(tools.schedule.items().iter().filter(|i| i.done).count(), 1);
    }

    #[test]
    fn one_minute_timer_runs_to_the_end() {
        let (mut tools, mut ctx) = mounted();
        frame(
            &mut tools,
            &mut ctx,
            vec![
                command(CMD_SETTING, 3, 1),
                command(CMD_SETTING, 4, 1),
                command(CMD_TIMER_PRESET, 1, 0),
                command(CMD_TIMER_START, 0, 0),
            ],
            0,
        );
        assert_eq!(ctx.events, vec![ActivityEvent::new(EVENT_TIMER_MILESTONE, 60.0)]);
        assert_eq!(ctx.voice.pending_speech(), ["Još 1 minuta."]);

        ctx.voice = VoiceQueue::default();
        ctx.voice.set_policy(tools.settings.voice_policy());
        frame(&mut tools, &mut ctx, Vec::new(), 60_000);
        assert_eq!(ctx.events, vec![ActivityEvent::new(EVENT_TIMER_FINISHED, 0.0)]);
        assert_eq!(ctx.voice.pending_cues(), [CueId::TIMER_DONE]);
        assert_eq!(ctx.voice.pending_speech(), ["Vrijeme je."]);
        assert!(!tools.timer.is_running());
    }

    #[test]
    fn silent_by_default() {
        let (mut tools, mut ctx) = mounted();
        frame(&mut tools, &mut ctx, vec![command(CMD_AAC_PRESS, 0, 0)], 0);
        assert_eq!(tools.aac.message(), "Trebam pauzu.");
        assert!(ctx.voice.is_empty());
    }

    #[test]
    fn settings_survive_reload() {
        let (mut tools, mut ctx) = mounted();
        frame(&mut tools, &mut ctx, vec![command(CMD_SETTING, 0, 1)], 0);
        assert!(ComfortSettings::load(&ctx.store).large_text);
    }

    #[test]
    fn unmount_stops_timer_and_breathing() {
        let (mut tools, mut ctx) = mounted();
        frame(
            &mut tools,
            &mut ctx,
            vec![command(CMD_TIMER_START, 0, 0), command(CMD_BREATH_TOGGLE, 0, 0)],
            0,
        );
        assert!(tools.timer.has_pending_tick());
        assert!(tools.breath.has_pending_tick());
        tools.unmount(&mut ctx);
        assert!(!tools.timer.has_pending_tick());
        assert!(!tools.breath.has_pending_tick());
    }

    #[test]
    fn quiz_needs_a_pick_before_next() {
        let (mut tools, mut ctx) = mounted();
        frame(&mut tools, &mut ctx, vec![command(CMD_QUIZ_NEXT, 0, 0)], 0);
        assert_eq!(tools.quiz.progress().question_index, 0);
        frame(
            &mut tools,
            &mut ctx,
            vec![command(CMD_QUIZ_PICK, 1, 0), command(CMD_QUIZ_NEXT, 0, 0)],
            0,
        );
        assert_eq!(tools.quiz.progress().question_index, 1);
        assert_eq!(tools.quiz.score(), 1);
    }

    #[test]
    fn view_is_json_object() {
        let (tools, _ctx) = mounted();
        let view = tools.view();
        assert_eq!(view["timer"]["display"], "5:00");
        assert_eq!(view["aac"]["message"], "Klikni karticu");
        assert_eq!(view["schedule"]["items"].as_array().map(Vec::len), Some(SEED_LEN));
    }
}
