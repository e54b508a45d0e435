//! Core configuration for mathmotion-timeline-core.

use serde::{Deserialize, Serialize};

use crate::error::TimelineError;

/// Timer cadence and default phase sizing.
///
/// Hosts usually pass this as JSON; missing fields fall back to [`Config::default`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Fixed interval of the tick driver in milliseconds.
    pub tick_interval_ms: u32,
    /// Uniform phase duration (in ticks) for phases that do not override it.
    pub ticks_per_phase: u32,
    /// Maximum events retained in one `Outputs`; later ones are counted as dropped.
    pub max_events_per_tick: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_interval_ms: 100,
            ticks_per_phase: 15,
            max_events_per_tick: 256,
        }
    }
}

impl Config {
    /// Slower pacing for younger learners (2.5 s per phase).
    pub fn relaxed() -> Self {
        Self {
            ticks_per_phase: 25,
            ..Self::default()
        }
    }

    /// Faster pacing for review sessions (1 s per phase).
    pub fn brisk() -> Self {
        Self {
            ticks_per_phase: 10,
            ..Self::default()
        }
    }

    /// Parse a JSON config, then validate it.
    pub fn from_json(s: &str) -> Result<Self, TimelineError> {
        let cfg: Config = serde_json::from_str(s).map_err(|e| TimelineError::InvalidConfig {
            reason: e.to_string(),
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), TimelineError> {
        if self.tick_interval_ms == 0 {
            return Err(TimelineError::InvalidConfig {
                reason: "tick_interval_ms must be greater than 0".to_string(),
            });
        }
        if self.ticks_per_phase == 0 {
            return Err(TimelineError::InvalidConfig {
                reason: "ticks_per_phase must be greater than 0".to_string(),
            });
        }
        if self.max_events_per_tick == 0 {
            return Err(TimelineError::InvalidConfig {
                reason: "max_events_per_tick must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Wall-clock length of one default phase.
    #[inline]
    pub fn phase_duration_ms(&self) -> u64 {
        self.tick_interval_ms as u64 * self.ticks_per_phase as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let cfg = Config::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.phase_duration_ms(), 1500);
    }

    #[test]
    fn presets_are_valid() {
        assert!(Config::relaxed().validate().is_ok());
        assert!(Config::brisk().validate().is_ok());
        assert!(Config::relaxed().ticks_per_phase > Config::brisk().ticks_per_phase);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg = Config::from_json(r#"{ "ticks_per_phase": 4 }"#).unwrap();
        assert_eq!(cfg.ticks_per_phase, 4);
        assert_eq!(cfg.tick_interval_ms, 100);
    }

    #[test]
    fn zero_interval_rejected() {
        let err = Config::from_json(r#"{ "tick_interval_ms": 0 }"#).unwrap_err();
        assert!(matches!(err, TimelineError::InvalidConfig { .. }));
    }
}
