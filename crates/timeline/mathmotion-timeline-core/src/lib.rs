//! mathmotion timeline core (renderer-agnostic)
//!
//! Step-by-step math animations are sequences of named phases advanced by a
//! fixed-interval tick driver. This crate holds the generic machinery:
//!
//! - [`Timeline`]: ordered phases with tick durations and entry cues
//! - [`reduce`]: the single transition function over [`RunState`]
//! - [`PhaseRunner`]: host-driven tick driver with pause gate and sinks
//! - [`AnimationPlayer`]: the play/pause/loop shell with reduced-motion fallback
//!
//! Hosts (wasm, tests) feed time and signals in and read [`Outputs`] back.

pub mod clock;
pub mod config;
pub mod cue;
pub mod error;
pub mod gate;
pub mod outputs;
pub mod phase;
pub mod player;
pub mod reducer;
pub mod runner;

pub use clock::TickClock;
pub use config::Config;
pub use cue::{NullSound, SoundCue, SoundEffects};
pub use error::{PlayerError, TimelineError};
pub use gate::{PauseGate, PauseHandle, PauseSource};
pub use outputs::{Outputs, TimelineEvent};
pub use phase::{PhaseSpec, Timeline};
pub use player::{
    AnimationPlayer, MotionPreference, PlayerContext, PlayerEvent, PlayerOptions, PlayerState,
    RenderMode,
};
pub use reducer::{reduce, RunState, Signal, Transition};
pub use runner::{CompletionSink, PhaseRunner};
