//! Speech and audio-cue collaborators.
//!
//! Activities never talk to these directly. They queue requests on a
//! `VoiceQueue`, which drops anything the user has switched off; the host
//! flushes the queue once per frame and ignores collaborator failures.

use thiserror::Error;

use super::types::CueId;

/// Default cap on queued requests of each kind.
pub const DEFAULT_MAX_PENDING: usize = 8;

#[derive(Debug, Error)]
pub enum CollaboratorError {
    /// The environment has no such capability.
    #[error("not supported in this environment")]
    Unsupported,

    /// The collaborator exists but refused or failed.
    #[error("collaborator failed: {0}")]
    Failed(String),
}

/// Text-to-speech output.
pub trait SpeechOutput {
    fn speak(&mut self, text: &str, lang: &str) -> Result<(), CollaboratorError>;
}

/// Short audio cue playback.
pub trait CuePlayer {
    fn play(&mut self, cue: CueId) -> Result<(), CollaboratorError>;
}

/// Collaborator for hosts without audio. Accepts and discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl SpeechOutput for Silent {
    fn speak(&mut self, _text: &str, _lang: &str) -> Result<(), CollaboratorError> {
        Ok(())
    }
}

impl CuePlayer for Silent {
    fn play(&mut self, _cue: CueId) -> Result<(), CollaboratorError> {
        Ok(())
    }
}

/// Which collaborators the user allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VoicePolicy {
    pub speech: bool,
    pub cues: bool,
}

/// Pending speech and cue requests for the current frame.
#[derive(Debug, Clone)]
pub struct VoiceQueue {
    policy: VoicePolicy,
    speech: Vec<String>,
    cues: Vec<CueId>,
    /// Cap on queued requests of each kind; oldest are dropped first.
    max_pending: usize,
}

impl VoiceQueue {
    pub fn new(max_pending: usize) -> Self {
        Self {
            policy: VoicePolicy::default(),
            speech: Vec::new(),
            cues: Vec::new(),
            max_pending: max_pending.max(1),
        }
    }

    pub fn set_policy(&mut self, policy: VoicePolicy) {
        self.policy = policy;
        if !policy.speech {
            self.speech.clear();
        }
        if !policy.cues {
            self.cues.clear();
        }
    }

    pub fn policy(&self) -> VoicePolicy {
        self.policy
    }

    /// Queue a phrase if speech is enabled.
    pub fn speak(&mut self, text: impl Into<String>) {
        if !self.policy.speech {
            return;
        }
        if self.speech.len() >= self.max_pending {
            self.speech.remove(0);
        }
        self.speech.push(text.into());
    }

    /// Queue a cue if cues are enabled.
    pub fn cue(&mut self, cue: CueId) {
        if !self.policy.cues {
            return;
        }
        if self.cues.len() >= self.max_pending {
            self.cues.remove(0);
        }
        self.cues.push(cue);
    }

    pub fn pending_speech(&self) -> &[String] {
        &self.speech
    }

    pub fn pending_cues(&self) -> &[CueId] {
        &self.cues
    }

    pub fn is_empty(&self) -> bool {
        self.speech.is_empty() && self.cues.is_empty()
    }

    /// Hand everything queued to the collaborators. Failures are logged and
    /// dropped; the queue is empty afterwards either way.
    pub fn flush(&mut self, lang: &str, speech: &mut dyn SpeechOutput, cues: &mut dyn CuePlayer) {
        for cue in self.cues.drain(..) {
            if let Err(e) = cues.play(cue) {
                log::debug!("voice: cue {:?} not played: {}", cue, e);
            }
        }
        for text in self.speech.drain(..) {
            if let Err(e) = speech.speak(&text, lang) {
                log::debug!("voice: could not speak {:?}: {}", text, e);
            }
        }
    }
}

impl Default for VoiceQueue {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PENDING)
    }
}
