//! Low-stimulation comfort settings for the autism activities.

use serde::{Deserialize, Serialize};

use crate::api::voice::VoicePolicy;
use crate::core::store::{RecordKey, Store};

pub const SETTINGS_KEY: RecordKey = RecordKey::new("autism", "settings", 1);

/// Every field falls back to its default when missing from stored data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComfortSettings {
    pub large_text: bool,
    pub reduced_motion: bool,
    pub high_contrast: bool,
    /// Voice AAC cards and timer announcements.
    pub enable_speech: bool,
    /// Play a cue when the transition timer runs out.
    pub enable_beep: bool,
}

impl Default for ComfortSettings {
    fn default() -> Self {
        Self {
            large_text: false,
            reduced_motion: true,
            high_contrast: false,
            enable_speech: false,
            enable_beep: false,
        }
    }
}

/// Individually toggleable settings, numbered for the host bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComfortToggle {
    LargeText,
    ReducedMotion,
    HighContrast,
    Speech,
    Beep,
}

impl ComfortToggle {
    pub fn from_index(index: u32) -> Option<Self> {
        match index {
            0 => Some(Self::LargeText),
            1 => Some(Self::ReducedMotion),
            2 => Some(Self::HighContrast),
            3 => Some(Self::Speech),
            4 => Some(Self::Beep),
            _ => None,
        }
    }
}

impl ComfortSettings {
    pub fn load(store: &Store) -> Self {
        store.read(&SETTINGS_KEY, Self::default())
    }

    pub fn save(&self, store: &mut Store) {
        store.write(&SETTINGS_KEY, self);
    }

    pub fn set(&mut self, toggle: ComfortToggle, on: bool) {
        let field = match toggle {
            ComfortToggle::LargeText => &mut self.large_text,
            ComfortToggle::ReducedMotion => &mut self.reduced_motion,
            ComfortToggle::HighContrast => &mut self.high_contrast,
            ComfortToggle::Speech => &mut self.enable_speech,
            ComfortToggle::Beep => &mut self.enable_beep,
        };
        *field = on;
    }

    /// Which collaborators may be used.
    pub fn voice_policy(&self) -> VoicePolicy {
        VoicePolicy {
            speech: self.enable_speech,
            cues: self.enable_beep,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_low_stim() {
        let s = ComfortSettings::default();
        assert!(s.reduced_motion);
        assert!(!s.enable_speech && !s.enable_beep);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let s: ComfortSettings = serde_json::from_str(r#"{ "enableSpeech": true }"#).unwrap();
        assert!(s.enable_speech);
        assert!(s.reduced_motion);
        assert!(!s.large_text);
    }

    #[test]
    fn persists_under_versioned_key() {
        let mut store = Store::in_memory();
        let mut s = ComfortSettings::load(&store);
        s.set(ComfortToggle::Beep, true);
        s.save(&mut store);
        assert_eq!(SETTINGS_KEY.to_string(), "assistive:autism:settings:v1");
        assert!(ComfortSettings::load(&store).enable_beep);
    }

    #[test]
    fn corrupt_record_falls_back() {
        let mut store = Store::in_memory();
        store.write_raw(&SETTINGS_KEY, "[1,2");
        assert_eq!(ComfortSettings::load(&store), ComfortSettings::default());
    }

    #[test]
    fn voice_policy_follows_toggles() {
        let mut s = ComfortSettings::default();
        s.set(ComfortToggle::from_index(3).unwrap(), true);
        let policy = s.voice_policy();
        assert!(policy.speech);
        assert!(!policy.cues);
        assert!(ComfortToggle::from_index(5).is_none());
    }
}
