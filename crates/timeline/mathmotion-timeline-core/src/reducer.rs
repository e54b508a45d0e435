//! Run state and its single transition function.
//!
//! Every change to a run goes through [`reduce`]: the caller passes the
//! current state and a signal, and gets back the next state plus the events
//! that the transition produced. Nothing is captured between calls, so the
//! pause flag seen by a tick is always the one carried in the state.

use serde::{Deserialize, Serialize};

use crate::cue::SoundCue;
use crate::outputs::TimelineEvent;
use crate::phase::Timeline;

/// Explicit state of one run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    pub tick: u64,
    pub phase: usize,
    pub paused: bool,
    /// Mirrors the host "show solution" signal.
    pub active: bool,
    pub completed: bool,
}

impl RunState {
    /// The timer exists only between activation and completion.
    #[inline]
    pub fn timer_running(&self) -> bool {
        self.active && !self.completed
    }

    /// Whether the next tick would move the counter.
    #[inline]
    pub fn is_advancing(&self) -> bool {
        self.timer_running() && !self.paused
    }
}

/// Inputs to the reducer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Signal {
    /// "Show solution" level; only edges have an effect.
    SetActive(bool),
    SetPaused(bool),
    Tick,
}

/// Result of one reduction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub state: RunState,
    pub events: Vec<TimelineEvent>,
}

impl Transition {
    fn unchanged(state: &RunState) -> Self {
        Self {
            state: *state,
            events: Vec::new(),
        }
    }
}

pub fn reduce(timeline: &Timeline, state: &RunState, signal: Signal) -> Transition {
    match signal {
        Signal::SetActive(true) => {
            if state.active {
                return Transition::unchanged(state);
            }
            let mut next = RunState {
                paused: state.paused,
                active: true,
                ..RunState::default()
            };
            let mut events = vec![TimelineEvent::TimerStarted];
            enter_phase(timeline, &mut next, 0, &mut events);
            Transition {
                state: next,
                events,
            }
        }
        Signal::SetActive(false) => {
            if !state.active {
                return Transition::unchanged(state);
            }
            let mut events = Vec::new();
            if state.timer_running() {
                events.push(TimelineEvent::TimerStopped);
            }
            Transition {
                state: RunState {
                    paused: state.paused,
                    ..RunState::default()
                },
                events,
            }
        }
        Signal::SetPaused(paused) => {
            if state.paused == paused {
                return Transition::unchanged(state);
            }
            let event = if paused {
                TimelineEvent::Paused { tick: state.tick }
            } else {
                TimelineEvent::Resumed { tick: state.tick }
            };
            Transition {
                state: RunState { paused, ..*state },
                events: vec![event],
            }
        }
        Signal::Tick => {
            if !state.is_advancing() {
                return Transition::unchanged(state);
            }
            let mut next = RunState {
                tick: state.tick + 1,
                ..*state
            };
            let mut events = Vec::new();
            let target = timeline.phase_at(next.tick);
            for index in (state.phase + 1)..=target {
                enter_phase(timeline, &mut next, index, &mut events);
            }
            Transition {
                state: next,
                events,
            }
        }
    }
}

fn enter_phase(
    timeline: &Timeline,
    state: &mut RunState,
    index: usize,
    events: &mut Vec<TimelineEvent>,
) {
    state.phase = index;
    if let Some(spec) = timeline.phase(index) {
        events.push(TimelineEvent::PhaseEntered {
            index,
            name: spec.name.clone(),
            tick: state.tick,
        });
        if let Some(cue) = spec.cue {
            events.push(TimelineEvent::Cue { cue });
        }
    }
    if index == timeline.terminal_index() && !state.completed {
        state.completed = true;
        events.push(TimelineEvent::Completed { tick: state.tick });
        events.push(TimelineEvent::Cue {
            cue: SoundCue::Success,
        });
        events.push(TimelineEvent::TimerStopped);
    }
}
