//! Visual day schedule: short, time-stamped activities that can be ticked off.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::rng::Rng;
use crate::core::store::{RecordKey, Store};

pub const SCHEDULE_KEY: RecordKey = RecordKey::new("autism", "schedule", 1);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClockTimeError {
    #[error("expected HH:MM, got {0:?}")]
    Format(String),

    #[error("time out of range: {0:?}")]
    Range(String),
}

/// Wall-clock time of day with minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self { hour, minute })
    }

    pub fn minutes_since_midnight(self) -> u32 {
        u32::from(self.hour) * 60 + u32::from(self.minute)
    }
}

impl FromStr for ClockTime {
    type Err = ClockTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (h, m) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| ClockTimeError::Format(s.to_owned()))?;
        let hour = two_digits(h).ok_or_else(|| ClockTimeError::Format(s.to_owned()))?;
        let minute = two_digits(m).ok_or_else(|| ClockTimeError::Format(s.to_owned()))?;
        ClockTime::new(hour, minute).ok_or_else(|| ClockTimeError::Range(s.to_owned()))
    }
}

/// Exactly two ASCII digits, as `<input type="time">` produces.
fn two_digits(field: &str) -> Option<u8> {
    match field.as_bytes() {
        [a, b] if a.is_ascii_digit() && b.is_ascii_digit() => Some((a - b'0') * 10 + (b - b'0')),
        _ => None,
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Persisted schedule entry. `time` stays a string on the wire ("08:00").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleItem {
    pub id: String,
    pub time: String,
    pub title: String,
    #[serde(default)]
    pub done: bool,
}

impl ScheduleItem {
    /// Sort key. Unparseable times sort last.
    fn sort_minutes(&self) -> u32 {
        self.time
            .parse::<ClockTime>()
            .map(ClockTime::minutes_since_midnight)
            .unwrap_or(u32::MAX)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("activity title is empty")]
    EmptyTitle,

    #[error(transparent)]
    Time(#[from] ClockTimeError),
}

/// Activities offered when nothing has been saved yet.
pub const SEED_DAY: [(&str, &str); 5] = [
    ("07:30", "Jutarnja rutina"),
    ("08:00", "Doručak"),
    ("10:30", "Pauza (tiho mjesto)"),
    ("12:00", "Ručak"),
    ("16:00", "Slobodno vrijeme"),
];

pub struct ScheduleBoard {
    items: Vec<ScheduleItem>,
    rng: Rng,
}

impl ScheduleBoard {
    /// Start from stored items; an empty list means "use the seed day".
    pub fn from_items(items: Vec<ScheduleItem>, seed: u64) -> Self {
        let mut board = Self {
            items,
            rng: Rng::new(seed),
        };
        if board.items.is_empty() {
            board.reset_to_seed();
        }
        board
    }

    pub fn seeded(seed: u64) -> Self {
        Self::from_items(Vec::new(), seed)
    }

    /// Load the saved schedule, falling back to the seed day.
    pub fn load(store: &Store, seed: u64) -> Self {
        Self::from_items(store.read(&SCHEDULE_KEY, Vec::new()), seed)
    }

    pub fn save(&self, store: &mut Store) {
        store.write(&SCHEDULE_KEY, &self.items);
    }

    /// Forget the saved schedule and go back to the seed day.
    pub fn reset_saved(&mut self, store: &mut Store) {
        store.remove(&SCHEDULE_KEY);
        self.reset_to_seed();
    }

    pub fn reset_to_seed(&mut self) {
        self.items = SEED_DAY
            .iter()
            .map(|(time, title)| ScheduleItem {
                id: self.rng.next_id(),
                time: (*time).to_owned(),
                title: (*title).to_owned(),
                done: false,
            })
            .collect();
    }

    /// Append an activity. Returns the new item's id.
    pub fn add(&mut self, time: &str, title: &str) -> Result<String, ScheduleError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ScheduleError::EmptyTitle);
        }
        let time: ClockTime = time.parse()?;
        let id = self.rng.next_id();
        self.items.push(ScheduleItem {
            id: id.clone(),
            time: time.to_string(),
            title: title.to_owned(),
            done: false,
        });
        Ok(id)
    }

    pub fn toggle_done(&mut self, id: &str) -> bool {
        match self.items.iter_mut().find(|i| i.id == id) {
            Some(item) => {
                item.done = !item.done;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.id != id);
        self.items.len() != before
    }

    /// Items in insertion order (the persisted order).
    pub fn items(&self) -> &[ScheduleItem] {
        &self.items
    }

    /// Items ordered by time of day; equal times keep insertion order.
    pub fn sorted(&self) -> Vec<&ScheduleItem> {
        let mut sorted: Vec<&ScheduleItem> = self.items.iter().collect();
        sorted.sort_by_key(|i| i.sort_minutes());
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_clock_times() {
        assert_eq!("07:30".parse::<ClockTime>().unwrap().minutes_since_midnight(), 450);
        assert_eq!(" 09:05 ".parse::<ClockTime>().unwrap().to_string(), "09:05");
        assert!(matches!("24:00".parse::<ClockTime>(), Err(ClockTimeError::Range(_))));
        assert!(matches!("noon".parse::<ClockTime>(), Err(ClockTimeError::Format(_))));
    }

    #[test]
    fn clock_times_need_two_digits_each_side() {
        for bad in ["9:05", "09:5", "+9:+5", "009:05", "09:-5", "0٩:05", ":"] {
            assert!(
                matches!(bad.parse::<ClockTime>(), Err(ClockTimeError::Format(_))),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn empty_store_uses_seed_day() {
        let board = ScheduleBoard::from_items(Vec::new(), 1);
        assert_eq!(board.items().len(), SEED_DAY.len());
        assert!(board.items().iter().all(|i| !i.done));
    }

    #[test]
    fn stored_items_are_kept() {
        let stored = vec![ScheduleItem {
            id: "x".into(),
            time: "09:00".into(),
            title: "Zadaća".into(),
            done: true,
        }];
        let board = ScheduleBoard::from_items(stored.clone(), 1);
        assert_eq!(board.items(), stored.as_slice());
    }

    #[test]
    fn add_trims_and_sorts() {
        let mut board = ScheduleBoard::seeded(3);
        board.add("09:00", "  Zadaća ").unwrap();
        let titles: Vec<&str> = board.sorted().iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles[2], "Zadaća");
        assert_eq!(board.items().last().unwrap().title, "Zadaća");
    }

    #[test]
    fn add_rejects_blank_title_and_bad_time() {
        let mut board = ScheduleBoard::seeded(3);
        assert_eq!(board.add("09:00", "   "), Err(ScheduleError::EmptyTitle));
        assert!(matches!(board.add("9h", "Zadaća"), Err(ScheduleError::Time(_))));
        assert_eq!(board.items().len(), SEED_DAY.len());
    }

    #[test]
    fn toggle_and_remove() {
        let mut board = ScheduleBoard::seeded(5);
        let id = board.items()[0].id.clone();
        assert!(board.toggle_done(&id));
        assert!(board.items()[0].done);
        assert!(board.toggle_done(&id));
        assert!(!board.items()[0].done);
        assert!(board.remove(&id));
        assert!(!board.remove(&id));
        assert!(!board.toggle_done(&id));
    }

    #[test]
    fn persisted_schedule_survives_reload() {
        let mut store = Store::in_memory();
        let mut board = ScheduleBoard::load(&store, 11);
        let id = board.add("18:15", "Čitanje").unwrap();
        board.toggle_done(&id);
        board.save(&mut store);

        let reloaded = ScheduleBoard::load(&store, 12);
        assert_eq!(reloaded.items(), board.items());
        assert!(reloaded.items().iter().any(|i| i.id == id && i.done));
    }

    #[test]
    fn corrupt_or_empty_record_reseeds() {
        let mut store = Store::in_memory();
        store.write_raw(&SCHEDULE_KEY, "not json");
        assert_eq!(ScheduleBoard::load(&store, 1).items().len(), SEED_DAY.len());
        store.write(&SCHEDULE_KEY, &Vec::<ScheduleItem>::new());
        assert_eq!(ScheduleBoard::load(&store, 1).items().len(), SEED_DAY.len());
    }

    #[test]
    fn reset_saved_drops_record() {
        let mut store = Store::in_memory();
        let mut board = ScheduleBoard::load(&store, 2);
        let first = board.items()[0].id.clone();
        board.remove(&first);
        board.save(&mut store);
        board.reset_saved(&mut store);
        assert_eq!(board.items().len(), SEED_DAY.len());
        assert!(store.try_read::<Vec<ScheduleItem>>(&SCHEDULE_KEY).unwrap().is_none());
    }

    #[test]
    fn items_round_trip_as_json() {
        let board = ScheduleBoard::seeded(9);
        let json = serde_json::to_string(board.items()).unwrap();
        assert!(json.contains(r#""time":"07:30""#));
        let back: Vec<ScheduleItem> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board.items());
    }
}
