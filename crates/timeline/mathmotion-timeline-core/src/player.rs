//! Generic player shell: play/pause controls, progress, looping and the
//! reduced-motion fallback.
//!
//! The shell has its own clock, independent of any lesson's phases. Lessons
//! nested under it receive a [`PlayerContext`] and treat its pause level as a
//! pure input; they never own play state of their own.

use std::cell::Cell;
use std::rc::Rc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::PlayerError;
use crate::gate::{PauseGate, PauseHandle, PauseSource};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerState {
    Idle,
    Playing,
    Paused,
    Complete,
}

impl PlayerState {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::Complete => "complete",
        }
    }
}

/// Host accessibility setting, queried once when the player is mounted.
pub trait MotionPreference {
    fn prefers_reduced_motion(&self) -> bool;
}

impl MotionPreference for bool {
    fn prefers_reduced_motion(&self) -> bool {
        *self
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    Animated,
    /// Static picture of the finished explanation; no timer runs.
    StaticFallback,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerOptions {
    pub duration_ticks: u64,
    pub auto_play: bool,
    pub looping: bool,
}

impl Default for PlayerOptions {
    fn default() -> Self {
        Self {
            duration_ticks: 100,
            auto_play: false,
            looping: false,
        }
    }
}

impl PlayerOptions {
    pub fn new(duration_ticks: u64) -> Self {
        Self {
            duration_ticks,
            ..Self::default()
        }
    }

    #[inline]
    pub fn with_auto_play(mut self) -> Self {
        self.auto_play = true;
        self
    }

    #[inline]
    pub fn with_loop(mut self) -> Self {
        self.looping = true;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlayerEvent {
    StateChanged { from: PlayerState, to: PlayerState },
    Looped { count: u32 },
    Completed,
}

/// Read-only view of the shell handed to nested lessons.
#[derive(Clone, Debug)]
pub struct PlayerContext {
    state: Rc<Cell<PlayerState>>,
    restarts: Rc<Cell<u32>>,
    render_mode: RenderMode,
    pause: PauseHandle,
}

impl PlayerContext {
    #[inline]
    pub fn state(&self) -> PlayerState {
        self.state.get()
    }

    /// Fixed at mount; children of a static player never start a timer.
    #[inline]
    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    /// Bumped on every replay, loop and reset. Children restart their run
    /// when they see it change.
    #[inline]
    pub fn restarts(&self) -> u32 {
        self.restarts.get()
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.state.get() == PlayerState::Playing
    }

    #[inline]
    pub fn pause_handle(&self) -> PauseHandle {
        self.pause.clone()
    }
}

impl PauseSource for PlayerContext {
    fn is_paused(&self) -> bool {
        self.pause.is_paused()
    }
}

#[derive(Debug)]
pub struct AnimationPlayer {
    options: PlayerOptions,
    state: Rc<Cell<PlayerState>>,
    restarts: Rc<Cell<u32>>,
    gate: PauseGate,
    elapsed: u64,
    loops: u32,
    render_mode: RenderMode,
    events: Vec<PlayerEvent>,
}

impl AnimationPlayer {
    pub fn new(
        options: PlayerOptions,
        motion: &dyn MotionPreference,
    ) -> Result<Self, PlayerError> {
        if options.duration_ticks == 0 {
            return Err(PlayerError::ZeroDuration);
        }
        let render_mode = if motion.prefers_reduced_motion() {
            RenderMode::StaticFallback
        } else {
            RenderMode::Animated
        };
        let initial = if options.auto_play && render_mode == RenderMode::Animated {
            PlayerState::Playing
        } else {
            PlayerState::Idle
        };
        debug!("player mounted in {:?}, state {}", render_mode, initial.name());
        Ok(Self {
            options,
            state: Rc::new(Cell::new(initial)),
            restarts: Rc::new(Cell::new(0)),
            gate: PauseGate::new(initial != PlayerState::Playing),
            elapsed: 0,
            loops: 0,
            render_mode,
            events: Vec::new(),
        })
    }

    #[inline]
    pub fn state(&self) -> PlayerState {
        self.state.get()
    }

    #[inline]
    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    #[inline]
    pub fn options(&self) -> &PlayerOptions {
        &self.options
    }

    #[inline]
    pub fn elapsed_ticks(&self) -> u64 {
        self.elapsed
    }

    #[inline]
    pub fn loops_completed(&self) -> u32 {
        self.loops
    }

    /// The timer only exists while playing an animated render.
    #[inline]
    pub fn timer_running(&self) -> bool {
        self.render_mode == RenderMode::Animated && self.state() == PlayerState::Playing
    }

    pub fn context(&self) -> PlayerContext {
        PlayerContext {
            state: Rc::clone(&self.state),
            restarts: Rc::clone(&self.restarts),
            render_mode: self.render_mode,
            pause: self.gate.handle(),
        }
    }

    pub fn progress(&self) -> f32 {
        match self.state() {
            PlayerState::Complete => 1.0,
            _ => (self.elapsed as f64 / self.options.duration_ticks as f64).clamp(0.0, 1.0) as f32,
        }
    }

    pub fn play(&mut self) -> Result<(), PlayerError> {
        if self.is_static() {
            return Ok(());
        }
        match self.state() {
            PlayerState::Idle | PlayerState::Paused => {
                self.transition(PlayerState::Playing);
                Ok(())
            }
            PlayerState::Playing => Ok(()),
            PlayerState::Complete => Err(PlayerError::InvalidTransition {
                from: PlayerState::Complete,
                to: PlayerState::Playing,
            }),
        }
    }

    pub fn pause(&mut self) -> Result<(), PlayerError> {
        if self.is_static() {
            return Ok(());
        }
        match self.state() {
            PlayerState::Playing => {
                self.transition(PlayerState::Paused);
                Ok(())
            }
            PlayerState::Paused => Ok(()),
            from => Err(PlayerError::InvalidTransition {
                from,
                to: PlayerState::Paused,
            }),
        }
    }

    /// Play/pause button.
    pub fn toggle(&mut self) -> Result<(), PlayerError> {
        if self.state() == PlayerState::Playing {
            self.pause()
        } else {
            self.play()
        }
    }

    /// Start over from the beginning, from any state.
    pub fn replay(&mut self) {
        if self.is_static() {
            return;
        }
        self.restart();
        self.transition(PlayerState::Playing);
    }

    /// Back to idle at the beginning.
    pub fn reset(&mut self) {
        self.restart();
        self.transition(PlayerState::Idle);
    }

    /// One timer callback of the shell's own clock.
    pub fn tick(&mut self) {
        if !self.timer_running() {
            return;
        }
        self.elapsed += 1;
        if self.elapsed < self.options.duration_ticks {
            return;
        }
        if self.options.looping {
            self.restart();
            self.loops += 1;
            self.events.push(PlayerEvent::Looped { count: self.loops });
        } else {
            self.transition(PlayerState::Complete);
            self.events.push(PlayerEvent::Completed);
        }
    }

    pub fn take_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.events)
    }

    fn restart(&mut self) {
        self.elapsed = 0;
        self.restarts.set(self.restarts.get().wrapping_add(1));
    }

    #[inline]
    fn is_static(&self) -> bool {
        self.render_mode == RenderMode::StaticFallback
    }

    fn transition(&mut self, to: PlayerState) {
        let from = self.state();
        if from == to {
            return;
        }
        self.state.set(to);
        self.gate.set(to != PlayerState::Playing);
        self.events.push(PlayerEvent::StateChanged { from, to });
    }
}
