//! Sound cues and the audio collaborator contract.

use serde::{Deserialize, Serialize};

/// Discrete sound effect triggered at a phase transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundCue {
    /// Incremental reveal (a term, a tile, a digit).
    Pop,
    /// Visual sweep (a curve drawing, a hop, a rotation).
    Whoosh,
    /// Run completion. Emitted by the engine only.
    Success,
}

impl SoundCue {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pop => "pop",
            Self::Whoosh => "whoosh",
            Self::Success => "success",
        }
    }
}

/// Host audio provider. Calls are fire-and-forget: nothing is awaited or retried.
pub trait SoundEffects {
    fn play_pop(&mut self);
    fn play_whoosh(&mut self);
    fn play_success(&mut self);

    fn play(&mut self, cue: SoundCue) {
        match cue {
            SoundCue::Pop => self.play_pop(),
            SoundCue::Whoosh => self.play_whoosh(),
            SoundCue::Success => self.play_success(),
        }
    }
}

/// Silent provider for hosts without audio (and for muted sessions).
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSound;

impl SoundEffects for NullSound {
    fn play_pop(&mut self) {}
    fn play_whoosh(&mut self) {}
    fn play_success(&mut self) {}
}
