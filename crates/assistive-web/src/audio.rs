use std::collections::HashMap;

use assistive_engine::{CollaboratorError, CueId, CuePlayer, SpeechOutput};
use wasm_bindgen::JsValue;
use web_sys::{HtmlAudioElement, SpeechSynthesisUtterance};

/// Placeholder end-of-timer cue (a silent WAV). Hosts `register` a real one.
pub const DEFAULT_CUE_SRC: &str =
    "data:audio/wav;base64,UklGRiQAAABXQVZFZm10IBAAAAABAAEAQB8AAIA+AAACABAAZGF0YQAAAAA=";

fn failed(value: JsValue) -> CollaboratorError {
    CollaboratorError::Failed(format!("{:?}", value))
}

/// `window.speechSynthesis`. A new phrase interrupts the previous one.
#[derive(Debug, Default)]
pub struct BrowserSpeech;

impl BrowserSpeech {
    pub fn new() -> Self {
        Self
    }
}

impl SpeechOutput for BrowserSpeech {
    fn speak(&mut self, text: &str, lang: &str) -> Result<(), CollaboratorError> {
        let window = web_sys::window().ok_or(CollaboratorError::Unsupported)?;
        let synth = window
            .speech_synthesis()
            .map_err(|_| CollaboratorError::Unsupported)?;
        synth.cancel();
        let utterance = SpeechSynthesisUtterance::new_with_text(text).map_err(failed)?;
        utterance.set_lang(lang);
        synth.speak(&utterance);
        Ok(())
    }
}

/// Plays cues through lazily created `<audio>` elements, one per cue.
#[derive(Debug)]
pub struct AudioCue {
    sources: HashMap<CueId, String>,
    elements: HashMap<CueId, HtmlAudioElement>,
}

impl AudioCue {
    pub fn new() -> Self {
        let mut sources = HashMap::new();
        sources.insert(CueId::TIMER_DONE, DEFAULT_CUE_SRC.to_owned());
        Self {
            sources,
            elements: HashMap::new(),
        }
    }

    /// Map a cue to an audio URL, replacing any previous mapping.
    pub fn register(&mut self, cue: CueId, src: impl Into<String>) {
        self.sources.insert(cue, src.into());
        self.elements.remove(&cue);
    }

    fn element(&mut self, cue: CueId) -> Result<&HtmlAudioElement, CollaboratorError> {
        if !self.elements.contains_key(&cue) {
            let src = self.sources.get(&cue).ok_or(CollaboratorError::Unsupported)?;
            let element = HtmlAudioElement::new_with_src(src).map_err(failed)?;
            self.elements.insert(cue, element);
        }
        self.elements.get(&cue).ok_or(CollaboratorError::Unsupported)
    }
}

impl Default for AudioCue {
    fn default() -> Self {
        Self::new()
    }
}

impl CuePlayer for AudioCue {
    fn play(&mut self, cue: CueId) -> Result<(), CollaboratorError> {
        let element = self.element(cue)?;
        element.set_current_time(0.0);
        // Autoplay rejections surface asynchronously on the promise and are ignored.
        element.play().map(|_| ()).map_err(failed)
    }
}
