//! Error types for timelines and the player shell.

use serde::{Deserialize, Serialize};

use crate::player::PlayerState;

/// Errors raised while building a timeline or a config.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum TimelineError {
    #[error("timeline must declare at least one phase")]
    EmptyTimeline,

    #[error("phase '{name}' is declared more than once")]
    DuplicatePhase { name: String },

    #[error("phase '{name}' has a zero tick duration")]
    ZeroDuration { name: String },

    /// `success` belongs to run completion, not to an individual phase.
    #[error("phase '{name}' cannot carry the success cue")]
    ReservedCue { name: String },

    #[error("invalid config: {reason}")]
    InvalidConfig { reason: String },
}

impl TimelineError {
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::EmptyTimeline
            | Self::DuplicatePhase { .. }
            | Self::ZeroDuration { .. }
            | Self::ReservedCue { .. } => "timeline",
            Self::InvalidConfig { .. } => "config",
        }
    }
}

/// Errors raised by [`crate::player::AnimationPlayer`] commands.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PlayerError {
    #[error("invalid player transition: {from:?} -> {to:?}")]
    InvalidTransition { from: PlayerState, to: PlayerState },

    #[error("player duration must be greater than 0 ticks")]
    ZeroDuration,
}

impl PlayerError {
    /// Transition errors leave the player untouched and can be ignored by UI controls.
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::InvalidTransition { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories() {
        assert_eq!(TimelineError::EmptyTimeline.category(), "timeline");
        let cfg = TimelineError::InvalidConfig {
            reason: "x".into(),
        };
        assert_eq!(cfg.category(), "config");
    }

    #[test]
    fn serialization_round_trip() {
        let err = PlayerError::InvalidTransition {
            from: PlayerState::Complete,
            to: PlayerState::Paused,
        };
        let s = serde_json::to_string(&err).unwrap();
        let back: PlayerError = serde_json::from_str(&s).unwrap();
        assert_eq!(err, back);
        assert!(back.is_recoverable());
        assert!(!PlayerError::ZeroDuration.is_recoverable());
    }
}
