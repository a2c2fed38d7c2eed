//! Placement puzzle: drop the right accessibility tool on each obstacle.
//!
//! Each zone has exactly one correct tool. A zone holding its correct tool is
//! frozen for the rest of the session. Placements arrive either by clicking
//! (select a tool, then a zone) or by dragging a tool rectangle onto a zone
//! rectangle in world coordinates.

use std::collections::HashSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Points for a newly correct placement.
pub const CORRECT_POINTS: u32 = 10;

/// Points deducted for a wrong placement (score never drops below zero).
pub const WRONG_PENALTY: u32 = 5;

/// Minimum final score for the higher badge tier.
pub const ARCHITECT_THRESHOLD: u32 = 25;

pub const INITIAL_FEEDBACK: &str = "Odaberi alat i postavi ga na pravo mjesto (drag&drop ili klikom).";
pub const ALREADY_SOLVED_FEEDBACK: &str =
    "✅ Ovo je već odlično postavljeno. Probaj riješiti i ostala mjesta.";
pub const NO_TOOL_SELECTED_FEEDBACK: &str = "Prvo odaberi alat iz kutije (desno).";
pub const UNKNOWN_TARGET_FEEDBACK: &str = "Nepoznat alat ili mjesto.";

/// Axis-aligned rectangle in world units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + w, y + h),
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }
}

/// A candidate solution the player can place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tool {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub emoji: String,
    #[serde(default)]
    pub description: String,
    /// Drag source area in the toolbox.
    #[serde(default)]
    pub rect: Option<Rect>,
}

/// A location with one obstacle and one correct tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub obstacle_emoji: String,
    pub obstacle: String,
    pub correct_tool: String,
    /// Drop target area on the floor plan.
    #[serde(default)]
    pub rect: Option<Rect>,
}

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("layout has no zones")]
    NoZones,

    #[error("duplicate id: {0}")]
    DuplicateId(String),

    #[error("zone {zone} expects unknown tool {tool}")]
    UnknownTool { zone: String, tool: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Tools and zones for one puzzle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuzzleLayout {
    pub tools: Vec<Tool>,
    pub zones: Vec<Zone>,
}

impl PuzzleLayout {
    /// Parse and validate a layout from JSON.
    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        let layout: PuzzleLayout = serde_json::from_str(json)?;
        layout.validate()?;
        Ok(layout)
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.zones.is_empty() {
            return Err(LayoutError::NoZones);
        }
        unique_ids(self.tools.iter().map(|t| t.id.as_str()))?;
        unique_ids(self.zones.iter().map(|z| z.id.as_str()))?;
        for zone in &self.zones {
            if self.tool_index(&zone.correct_tool).is_none() {
                return Err(LayoutError::UnknownTool {
                    zone: zone.id.clone(),
                    tool: zone.correct_tool.clone(),
                });
            }
        }
        Ok(())
    }

    fn tool_index(&self, id: &str) -> Option<usize> {
        self.tools.iter().position(|t| t.id == id)
    }

    fn zone_index(&self, id: &str) -> Option<usize> {
        self.zones.iter().position(|z| z.id == id)
    }

    /// The school floor plan: entrance stairs, narrow door, stairs without rail.
    pub fn school() -> Self {
        let tool = |id: &str, name: &str, emoji: &str, description: &str, y: f32| Tool {
            id: id.into(),
            name: name.into(),
            emoji: emoji.into(),
            description: description.into(),
            rect: Some(Rect::new(560.0, y, 200.0, 80.0)),
        };
        let zone = |id: &str, title: &str, emoji: &str, obstacle: &str, correct: &str, y: f32| Zone {
            id: id.into(),
            title: title.into(),
            obstacle_emoji: emoji.into(),
            obstacle: obstacle.into(),
            correct_tool: correct.into(),
            rect: Some(Rect::new(40.0, y, 440.0, 150.0)),
        };
        Self {
            tools: vec![
                tool("ramp", "Rampa", "🛝", "Pomaže kad postoje stepenice – omogućuje pristupačan ulaz.", 80.0),
                tool("wideDoor", "Šira vrata", "🚪", "Olakšava prolaz kolicima, hodalicama i svima s većim torbama.", 200.0),
                tool("handrail", "Rukohvat", "🤚", "Pruža oslonac na stepenicama i u hodnicima – sigurnije kretanje.", 320.0),
            ],
            zones: vec![
                zone("entranceStairs", "Ulaz škole", "🧱", "Stepenice na ulazu", "ramp", 40.0),
                zone("mainDoor", "Glavni ulaz", "🚪", "Uska vrata", "wideDoor", 220.0),
                zone("stairsHall", "Stubište", "🪜", "Stepenice bez rukohvata", "handrail", 400.0),
            ],
        }
    }
}

/// Tools and zones live in separate id spaces; only clashes within one
/// list are errors.
fn unique_ids<'a>(ids: impl Iterator<Item = &'a str>) -> Result<(), LayoutError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(LayoutError::DuplicateId(id.to_owned()));
        }
    }
    Ok(())
}

/// Result of a single placement attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceOutcome {
    Correct,
    Incorrect,
    AlreadySolved,
    Unknown,
}

/// Reward tier, available only once every zone is solved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Badge {
    /// Completed with a score below the threshold.
    Friend,
    /// Completed with at least `ARCHITECT_THRESHOLD` points.
    Architect,
}

impl Badge {
    /// Pure function of completion and final score.
    pub fn for_result(complete: bool, score: u32) -> Option<Badge> {
        if !complete {
            return None;
        }
        Some(if score >= ARCHITECT_THRESHOLD {
            Badge::Architect
        } else {
            Badge::Friend
        })
    }

    pub fn title(self) -> &'static str {
        match self {
            Badge::Friend => "🏅 Značka: Prijatelj pristupačnosti",
            Badge::Architect => "🏅 Značka: Arhitekt pristupačnosti",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ZoneView {
    pub id: String,
    pub tool: Option<String>,
    pub correct: bool,
}

/// Read-only snapshot for the host UI.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleView {
    pub score: u32,
    pub completed_count: usize,
    pub zone_count: usize,
    pub complete: bool,
    pub feedback: String,
    pub badge: Option<&'static str>,
    pub selected_tool: Option<String>,
    pub zones: Vec<ZoneView>,
}

pub struct PlacementPuzzle {
    layout: PuzzleLayout,
    /// Per zone: index of the placed tool.
    placed: Vec<Option<usize>>,
    score: u32,
    feedback: String,
    selected: Option<usize>,
    dragging: Option<usize>,
}

impl PlacementPuzzle {
    /// Build a puzzle over a layout. The layout should already be validated
    /// (`PuzzleLayout::from_json` does this).
    pub fn new(layout: PuzzleLayout) -> Self {
        let zones = layout.zones.len();
        Self {
            layout,
            placed: vec![None; zones],
            score: 0,
            feedback: INITIAL_FEEDBACK.to_owned(),
            selected: None,
            dragging: None,
        }
    }

    pub fn school() -> Self {
        Self::new(PuzzleLayout::school())
    }

    pub fn layout(&self) -> &PuzzleLayout {
        &self.layout
    }

    fn is_solved(&self, zone: usize) -> bool {
        let correct = self.layout.tool_index(&self.layout.zones[zone].correct_tool);
        self.placed[zone].is_some() && self.placed[zone] == correct
    }

    /// Submit `tool_id` for `zone_id`.
    pub fn place(&mut self, zone_id: &str, tool_id: &str) -> PlaceOutcome {
        let (Some(zone), Some(tool)) = (self.layout.zone_index(zone_id), self.layout.tool_index(tool_id)) else {
            log::debug!("placement: unknown zone {} or tool {}", zone_id, tool_id);
            self.feedback = UNKNOWN_TARGET_FEEDBACK.to_owned();
            return PlaceOutcome::Unknown;
        };
        self.place_indices(zone, tool)
    }

    fn place_indices(&mut self, zone: usize, tool: usize) -> PlaceOutcome {
        if self.is_solved(zone) {
            self.feedback = ALREADY_SOLVED_FEEDBACK.to_owned();
            return PlaceOutcome::AlreadySolved;
        }

        self.placed[zone] = Some(tool);
        let z = &self.layout.zones[zone];
        let t = &self.layout.tools[tool];

        if t.id == z.correct_tool {
            self.score += CORRECT_POINTS;
            self.feedback = format!("✅ Bravo! {} pomaže za: {}.", t.name, z.obstacle.to_lowercase());
            log::debug!("placement: {} solved, score {}", z.id, self.score);
            PlaceOutcome::Correct
        } else {
            self.score = self.score.saturating_sub(WRONG_PENALTY);
            let hint = self
                .layout
                .tools
                .iter()
                .find(|h| h.id == z.correct_tool);
            self.feedback = match hint {
                Some(h) => format!(
                    "➖ To nije najbolje rješenje za \"{}\". Pokušaj s: {} {}",
                    z.obstacle, h.name, h.emoji
                ),
                None => format!("➖ To nije najbolje rješenje za \"{}\".", z.obstacle),
            };
            PlaceOutcome::Incorrect
        }
    }

    /// Toggle the click-mode tool selection.
    pub fn select_tool(&mut self, tool_id: &str) -> bool {
        let Some(tool) = self.layout.tool_index(tool_id) else {
            return false;
        };
        self.selected = if self.selected == Some(tool) { None } else { Some(tool) };
        let t = &self.layout.tools[tool];
        self.feedback = format!(
            "Odabran alat: {} {}. Klikni mjesto na tlocrta da ga postaviš.",
            t.name, t.emoji
        );
        true
    }

    /// Click-mode placement using the selected tool.
    pub fn click_zone(&mut self, zone_id: &str) -> Option<PlaceOutcome> {
        let Some(tool) = self.selected else {
            self.feedback = NO_TOOL_SELECTED_FEEDBACK.to_owned();
            return None;
        };
        let tool_id = self.layout.tools[tool].id.clone();
        Some(self.place(zone_id, &tool_id))
    }

    /// Begin a drag if `pos` is over a tool.
    pub fn pointer_down(&mut self, pos: Vec2) -> bool {
        self.dragging = self
            .layout
            .tools
            .iter()
            .position(|t| t.rect.is_some_and(|r| r.contains(pos)));
        self.dragging.is_some()
    }

    /// Finish a drag. Dropping over a zone places the dragged tool there.
    pub fn pointer_up(&mut self, pos: Vec2) -> Option<PlaceOutcome> {
        let tool = self.dragging.take()?;
        let zone = self
            .layout
            .zones
            .iter()
            .position(|z| z.rect.is_some_and(|r| r.contains(pos)))?;
        Some(self.place_indices(zone, tool))
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging.is_some()
    }

    pub fn reset(&mut self) {
        self.placed.iter_mut().for_each(|p| *p = None);
        self.score = 0;
        self.selected = None;
        self.dragging = None;
        self.feedback = INITIAL_FEEDBACK.to_owned();
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn completed_count(&self) -> usize {
        (0..self.placed.len()).filter(|&z| self.is_solved(z)).count()
    }

    pub fn is_complete(&self) -> bool {
        self.completed_count() == self.layout.zones.len()
    }

    pub fn badge(&self) -> Option<Badge> {
        Badge::for_result(self.is_complete(), self.score)
    }

    pub fn feedback(&self) -> &str {
        &self.feedback
    }

    /// Tool currently placed on a zone.
    pub fn placed_tool(&self, zone_id: &str) -> Option<&str> {
        let zone = self.layout.zone_index(zone_id)?;
        self.placed[zone].map(|t| self.layout.tools[t].id.as_str())
    }

    pub fn view(&self) -> PuzzleView {
        PuzzleView {
            score: self.score,
            completed_count: self.completed_count(),
            zone_count: self.layout.zones.len(),
            complete: self.is_complete(),
            feedback: self.feedback.clone(),
            badge: self.badge().map(Badge::title),
            selected_tool: self.selected.map(|t| self.layout.tools[t].id.clone()),
            zones: self
                .layout
                .zones
                .iter()
                .enumerate()
                .map(|(i, z)| ZoneView {
                    id: z.id.clone(),
                    tool: self.placed[i].map(|t| self.layout.tools[t].id.clone()),
                    correct: self.is_solved(i),
                })
                .collect(),
        }
    }
}
