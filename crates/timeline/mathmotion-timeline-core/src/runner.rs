//! PhaseRunner: the reusable tick driver around [`reduce`].
//!
//! A lesson supplies a [`Timeline`]; the runner owns the run state, polls the
//! pause handle on every tick, turns host time into ticks, and dispatches cues
//! and completion to its collaborators. Events accumulate in [`Outputs`]
//! until the host takes them.

use log::{debug, trace};

use crate::clock::TickClock;
use crate::config::Config;
use crate::cue::{NullSound, SoundEffects};
use crate::gate::{PauseHandle, PauseSource};
use crate::outputs::{Outputs, TimelineEvent};
use crate::phase::Timeline;
use crate::reducer::{reduce, RunState, Signal};

/// Callback invoked once when a run reaches its terminal phase.
pub type CompletionSink = Box<dyn FnMut()>;

pub struct PhaseRunner {
    timeline: Timeline,
    state: RunState,
    clock: TickClock,
    pause: Box<dyn PauseSource>,
    sound: Box<dyn SoundEffects>,
    on_complete: Option<CompletionSink>,
    outputs: Outputs,
    max_events: usize,
}

impl std::fmt::Debug for PhaseRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhaseRunner")
            .field("timeline", &self.timeline)
            .field("state", &self.state)
            .field("clock", &self.clock)
            .field("events", &self.outputs.events.len())
            .finish()
    }
}

impl PhaseRunner {
    /// Runner with a detached pause handle and silent audio.
    pub fn new(timeline: Timeline, cfg: &Config) -> Self {
        Self {
            timeline,
            state: RunState::default(),
            clock: TickClock::new(cfg.tick_interval_ms),
            pause: Box::new(PauseHandle::detached()),
            sound: Box::new(NullSound),
            on_complete: None,
            outputs: Outputs::default(),
            max_events: cfg.max_events_per_tick,
        }
    }

    pub fn with_pause(mut self, pause: impl PauseSource + 'static) -> Self {
        self.pause = Box::new(pause);
        self
    }

    pub fn with_sound(self, sound: impl SoundEffects + 'static) -> Self {
        self.with_boxed_sound(Box::new(sound))
    }

    pub fn with_boxed_sound(mut self, sound: Box<dyn SoundEffects>) -> Self {
        self.sound = sound;
        self
    }

    pub fn on_complete(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    pub fn set_completion_sink(&mut self, sink: Option<CompletionSink>) {
        self.on_complete = sink;
    }

    #[inline]
    pub fn state(&self) -> &RunState {
        &self.state
    }

    #[inline]
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    #[inline]
    pub fn phase_index(&self) -> usize {
        self.state.phase
    }

    pub fn phase_name(&self) -> &str {
        self.timeline.name(self.state.phase).unwrap_or_default()
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.state.completed
    }

    /// Fraction of the run elapsed, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.state.completed {
            return 1.0;
        }
        let end = self.timeline.completion_tick();
        if end == 0 {
            return 0.0;
        }
        (self.state.tick as f64 / end as f64).clamp(0.0, 1.0) as f32
    }

    /// Host "show solution" level. A false→true edge starts a fresh run at
    /// tick 0; a true→false edge cancels the timer and rewinds.
    pub fn set_active(&mut self, active: bool) {
        self.sync_pause();
        self.clock.reset();
        self.apply(Signal::SetActive(active));
    }

    /// One timer callback.
    pub fn tick(&mut self) {
        self.sync_pause();
        self.apply(Signal::Tick);
    }

    /// Feed host wall time; returns how many timer callbacks fired. While the
    /// timer is stopped the clock does not accumulate; while paused it holds
    /// its carry and fires nothing.
    pub fn update(&mut self, dt_ms: f64) -> u32 {
        self.sync_pause();
        if !self.state.timer_running() {
            self.clock.reset();
            return 0;
        }
        if self.state.paused {
            return 0;
        }
        let ticks = self.clock.advance(dt_ms);
        let mut fired = 0;
        for _ in 0..ticks {
            self.tick();
            fired += 1;
            if !self.state.timer_running() {
                self.clock.reset();
                break;
            }
        }
        fired
    }

    /// Pull the latest pause level from the handle into the run state.
    pub fn sync_pause(&mut self) {
        let paused = self.pause.is_paused();
        if paused != self.state.paused {
            self.apply(Signal::SetPaused(paused));
        }
    }

    #[inline]
    pub fn outputs(&self) -> &Outputs {
        &self.outputs
    }

    pub fn take_outputs(&mut self) -> Outputs {
        std::mem::take(&mut self.outputs)
    }

    fn apply(&mut self, signal: Signal) {
        let transition = reduce(&self.timeline, &self.state, signal);
        self.state = transition.state;
        if transition.events.is_empty() {
            trace!("signal {:?} at tick {} had no effect", signal, self.state.tick);
        }
        for event in transition.events {
            self.dispatch(&event);
            self.outputs.push_event(event, self.max_events);
        }
    }

    fn dispatch(&mut self, event: &TimelineEvent) {
        match event {
            TimelineEvent::Cue { cue } => self.sound.play(*cue),
            TimelineEvent::Completed { tick } => {
                debug!("run completed at tick {tick}");
                if let Some(cb) = self.on_complete.as_mut() {
                    cb();
                }
            }
            TimelineEvent::PhaseEntered { index, name, tick } => {
                debug!("entered phase {index} '{name}' at tick {tick}");
            }
            TimelineEvent::TimerStarted => debug!("timer started"),
            TimelineEvent::TimerStopped => debug!("timer stopped"),
            TimelineEvent::Paused { .. } | TimelineEvent::Resumed { .. } => {}
        }
    }
}
