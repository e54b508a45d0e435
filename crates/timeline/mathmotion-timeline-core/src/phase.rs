//! Phase timeline: ordered named phases mapped onto tick ranges.
//!
//! Phase `i` occupies ticks `[start(i), start(i + 1))`. With a uniform
//! duration `D` this is exactly `floor(tick / D)`, clamped to the last phase.
//! The last phase is terminal: reaching it completes the run.

use serde::{Deserialize, Serialize};

use crate::cue::SoundCue;
use crate::error::TimelineError;

/// One named step in an explanation sequence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseSpec {
    pub name: String,
    /// Duration override in ticks; `None` uses the timeline's uniform duration.
    #[serde(default)]
    pub ticks: Option<u32>,
    /// Cue fired when the phase is entered.
    #[serde(default)]
    pub cue: Option<SoundCue>,
}

impl PhaseSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ticks: None,
            cue: None,
        }
    }

    #[inline]
    pub fn with_ticks(mut self, ticks: u32) -> Self {
        self.ticks = Some(ticks);
        self
    }

    #[inline]
    pub fn with_cue(mut self, cue: SoundCue) -> Self {
        self.cue = Some(cue);
        self
    }
}

/// Validated, immutable phase list with precomputed start ticks.
#[derive(Clone, Debug, PartialEq)]
pub struct Timeline {
    phases: Vec<PhaseSpec>,
    starts: Vec<u64>,
    ticks_per_phase: u32,
}

impl Timeline {
    /// Build a timeline. Fails on an empty list, duplicate names, zero
    /// durations, or a phase carrying the reserved success cue.
    pub fn new(phases: Vec<PhaseSpec>, ticks_per_phase: u32) -> Result<Self, TimelineError> {
        if phases.is_empty() {
            return Err(TimelineError::EmptyTimeline);
        }
        let mut starts = Vec::with_capacity(phases.len());
        let mut at = 0u64;
        for (i, phase) in phases.iter().enumerate() {
            if phases[..i].iter().any(|p| p.name == phase.name) {
                return Err(TimelineError::DuplicatePhase {
                    name: phase.name.clone(),
                });
            }
            let ticks = phase.ticks.unwrap_or(ticks_per_phase);
            if ticks == 0 {
                return Err(TimelineError::ZeroDuration {
                    name: phase.name.clone(),
                });
            }
            if phase.cue == Some(SoundCue::Success) {
                return Err(TimelineError::ReservedCue {
                    name: phase.name.clone(),
                });
            }
            starts.push(at);
            at += ticks as u64;
        }
        Ok(Self {
            phases,
            starts,
            ticks_per_phase,
        })
    }

    /// Uniform timeline from bare names (no cues, no overrides).
    pub fn uniform(names: &[&str], ticks_per_phase: u32) -> Result<Self, TimelineError> {
        Self::new(
            names.iter().map(|n| PhaseSpec::new(*n)).collect(),
            ticks_per_phase,
        )
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    /// Always false for a constructed timeline; kept for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    #[inline]
    pub fn terminal_index(&self) -> usize {
        self.phases.len() - 1
    }

    #[inline]
    pub fn ticks_per_phase(&self) -> u32 {
        self.ticks_per_phase
    }

    /// Phase index for an elapsed tick count, clamped to `[0, len - 1]`.
    pub fn phase_at(&self, tick: u64) -> usize {
        // starts[0] == 0, so the partition point is at least 1.
        let idx = self.starts.partition_point(|&s| s <= tick) - 1;
        idx.min(self.terminal_index())
    }

    #[inline]
    pub fn start_tick(&self, index: usize) -> Option<u64> {
        self.starts.get(index).copied()
    }

    /// Tick at which the terminal phase is entered.
    #[inline]
    pub fn completion_tick(&self) -> u64 {
        self.starts[self.terminal_index()]
    }

    pub fn duration(&self, index: usize) -> Option<u32> {
        self.phases
            .get(index)
            .map(|p| p.ticks.unwrap_or(self.ticks_per_phase))
    }

    #[inline]
    pub fn phase(&self, index: usize) -> Option<&PhaseSpec> {
        self.phases.get(index)
    }

    #[inline]
    pub fn phases(&self) -> &[PhaseSpec] {
        &self.phases
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.phases.get(index).map(|p| p.name.as_str())
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.phases.iter().position(|p| p.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.phases.iter().map(|p| p.name.as_str())
    }
}
