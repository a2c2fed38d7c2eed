use assistive_engine::*;
use serde_json::json;

// Command kinds (UI → Rust)
const CMD_SELECT_TOOL: u32 = 1;
const CMD_CLICK_ZONE: u32 = 2;
const CMD_RESET: u32 = 3;
const CMD_REFLECTION_CLEAR: u32 = 4;

// Activity event kinds (Rust → UI)
const EVENT_BADGE: u32 = 1;

/// Drag accessibility tools onto the school floor plan, then reflect.
pub struct SchoolRetrofit {
    puzzle: PlacementPuzzle,
    reflection: Reflection,
    /// Whether the completion event was already emitted for this round.
    announced: bool,
}

impl SchoolRetrofit {
    pub fn new() -> Self {
        Self {
            puzzle: PlacementPuzzle::school(),
            reflection: Reflection::default(),
            announced: false,
        }
    }

    fn tool_id(&self, index: u32) -> Option<String> {
        self.puzzle.layout().tools.get(index as usize).map(|t| t.id.clone())
    }

    fn zone_id(&self, index: u32) -> Option<String> {
        self.puzzle.layout().zones.get(index as usize).map(|z| z.id.clone())
    }

    fn handle_command(&mut self, ctx: &mut ActivityContext, kind: u32, a: u32) {
        match kind {
            CMD_SELECT_TOOL => {
                if let Some(id) = self.tool_id(a) {
                    self.puzzle.select_tool(&id);
                }
            }
            CMD_CLICK_ZONE => {
                if let Some(id) = self.zone_id(a) {
                    self.puzzle.click_zone(&id);
                }
            }
            CMD_RESET => {
                self.puzzle.reset();
                self.announced = false;
            }
            CMD_REFLECTION_CLEAR => {
                self.reflection.clear();
                self.reflection.save(&mut ctx.store);
            }
            _ => log::debug!("school-retrofit: unknown command {}", kind),
        }
    }
}

impl Default for SchoolRetrofit {
    fn default() -> Self {
        Self::new()
    }
}

impl Activity for SchoolRetrofit {
    fn init(&mut self, ctx: &mut ActivityContext) {
        self.reflection = Reflection::load(&ctx.store);
        log::info!(
            "school-retrofit: {} zones, {} tools",
            self.puzzle.layout().zones.len(),
            self.puzzle.layout().tools.len()
        );
    }

    fn update(&mut self, ctx: &mut ActivityContext, input: &InputQueue, _elapsed_ms: u32) {
        for event in input.iter() {
            match event {
                InputEvent::Command { kind, a, .. } => self.handle_command(ctx, *kind, *a),
                InputEvent::Text { kind, value } => {
                    if self.reflection.set_answer(*kind, value) {
                        self.reflection.save(&mut ctx.store);
                    }
                }
                InputEvent::PointerDown { x, y } => {
                    self.puzzle.pointer_down(Vec2::new(*x, *y));
                }
                InputEvent::PointerUp { x, y } => {
                    self.puzzle.pointer_up(Vec2::new(*x, *y));
                }
                InputEvent::PointerMove { .. } => {}
            }
        }

        if self.puzzle.is_complete() && !self.announced {
            self.announced = true;
            log::debug!("school-retrofit: complete with score {}", self.puzzle.score());
            ctx.emit_event(ActivityEvent::new(EVENT_BADGE, self.puzzle.score() as f32));
        }
    }

    fn view(&self) -> serde_json::Value {
        json!({
            "layout": self.puzzle.layout(),
            "puzzle": self.puzzle.view(),
            "dragging": self.puzzle.is_dragging(),
            "reflection": self.reflection,
        })
    }
}
