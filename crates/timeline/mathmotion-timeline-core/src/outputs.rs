//! Output contracts from the phase runner.
//!
//! Outputs carry the semantic events produced by the signals applied since
//! the last `clear`. Adapters (wasm, tests) read them after each step; the
//! runner has already dispatched cues and completion to its sinks.

use serde::{Deserialize, Serialize};

use crate::cue::SoundCue;

/// Discrete signals emitted by the timeline reducer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[non_exhaustive]
pub enum TimelineEvent {
    TimerStarted,
    TimerStopped,
    PhaseEntered { index: usize, name: String, tick: u64 },
    Cue { cue: SoundCue },
    Paused { tick: u64 },
    Resumed { tick: u64 },
    Completed { tick: u64 },
}

impl TimelineEvent {
    #[inline]
    pub fn is_cue(&self, cue: SoundCue) -> bool {
        matches!(self, Self::Cue { cue: c } if *c == cue)
    }
}

/// Events collected for one host step.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub events: Vec<TimelineEvent>,
    /// Events dropped because `max_events_per_tick` was reached.
    #[serde(default)]
    pub dropped: usize,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.events.clear();
        self.dropped = 0;
    }

    #[inline]
    pub fn push_event(&mut self, event: TimelineEvent, cap: usize) {
        if self.events.len() < cap {
            self.events.push(event);
        } else {
            self.dropped += 1;
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn count_cue(&self, cue: SoundCue) -> usize {
        self.events.iter().filter(|e| e.is_cue(cue)).count()
    }

    /// Names of phases entered, in order.
    pub fn entered_phases(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                TimelineEvent::PhaseEntered { name, .. } => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cap_drops_and_counts() {
        let mut out = Outputs::default();
        for _ in 0..3 {
            out.push_event(TimelineEvent::TimerStarted, 2);
        }
        assert_eq!(out.events.len(), 2);
        assert_eq!(out.dropped, 1);
        out.clear();
        assert!(out.is_empty());
        assert_eq!(out.dropped, 0);
    }

    #[test]
    fn events_serialize_tagged() {
        let v = serde_json::to_value(TimelineEvent::Cue {
            cue: SoundCue::Pop,
        })
        .unwrap();
        assert_eq!(v, serde_json::json!({ "type": "cue", "cue": "pop" }));
    }
}
