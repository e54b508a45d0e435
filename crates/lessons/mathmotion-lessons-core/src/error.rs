//! Lesson validation errors, the panel they render as, and stage errors.

use mathmotion_timeline_core::TimelineError;
use serde::{Deserialize, Serialize};

use crate::ids::LessonId;

/// Parameters that would make a lesson's math undefined. Detected before
/// the timeline is built; the lesson then shows an [`ErrorPanel`] instead.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum LessonError {
    #[error("cannot divide {dividend} by zero")]
    ZeroDivisor { dividend: i64 },

    #[error("logarithm base {base} is invalid")]
    InvalidLogBase { base: f64 },

    #[error("logarithm of non-positive value {argument}")]
    NonPositiveLogArgument { argument: f64 },

    #[error("period multiplier is zero")]
    ZeroPeriodMultiplier,

    #[error("sides {a}, {b}, {c} do not form a triangle")]
    DegenerateTriangle { a: f64, b: f64, c: f64 },

    #[error("perimeter {perimeter} must be positive")]
    NonPositivePerimeter { perimeter: f64 },
}

impl LessonError {
    pub fn panel(&self) -> ErrorPanel {
        let (title, constraint, explanation) = match self {
            Self::ZeroDivisor { dividend } => (
                "We can't divide by zero",
                "The divisor must not be 0.".to_string(),
                format!(
                    "Dividing {dividend} by 0 asks how many groups of 0 make {dividend}. \
                     No number of empty groups ever adds up, so there is no answer."
                ),
            ),
            Self::InvalidLogBase { base } => (
                "That base doesn't work",
                "A logarithm base must be positive and not equal to 1.".to_string(),
                format!(
                    "Powers of {base} never reach every positive number, \
                     so log base {base} is not defined."
                ),
            ),
            Self::NonPositiveLogArgument { argument } => (
                "Logarithms need positive numbers",
                "The value inside a logarithm must be greater than 0.".to_string(),
                format!("No power of a positive base equals {argument}."),
            ),
            Self::ZeroPeriodMultiplier => (
                "The wave can't repeat",
                "The number multiplying x must not be 0.".to_string(),
                "sin(0·x) is the same at every x, so the graph is flat and has no period."
                    .to_string(),
            ),
            Self::DegenerateTriangle { a, b, c } => (
                "Those sides don't make a triangle",
                "Every side must be positive and shorter than the other two together."
                    .to_string(),
                format!("Sides {a}, {b} and {c} cannot close up into a triangle."),
            ),
            Self::NonPositivePerimeter { perimeter } => (
                "A shape needs a real border",
                "The perimeter must be greater than 0.".to_string(),
                format!("A square with perimeter {perimeter} would have no length of side."),
            ),
        };
        ErrorPanel {
            title: title.to_string(),
            constraint,
            explanation,
        }
    }
}

/// Fixed educational panel shown instead of an animation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPanel {
    pub title: String,
    pub constraint: String,
    pub explanation: String,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum StageError {
    #[error("unknown lesson kind '{name}'")]
    UnknownLesson { name: String },

    #[error("lesson {0:?} is not mounted")]
    NotMounted(LessonId),

    #[error("lesson {0:?} has no running timeline (error panel or static render)")]
    NotRunnable(LessonId),

    #[error(transparent)]
    Timeline(#[from] TimelineError),
}

impl StageError {
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::UnknownLesson { .. } => "registry",
            Self::NotMounted(_) | Self::NotRunnable(_) => "stage",
            Self::Timeline(e) => e.category(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_mentions_constraint() {
        let panel = LessonError::ZeroDivisor { dividend: 12 }.panel();
        assert!(panel.constraint.contains("must not be 0"));
        assert!(panel.explanation.contains("12"));
    }

    #[test]
    fn stage_error_categories() {
        assert_eq!(
            StageError::UnknownLesson { name: "x".into() }.category(),
            "registry"
        );
        assert_eq!(StageError::NotMounted(LessonId(3)).category(), "stage");
        assert_eq!(
            StageError::from(TimelineError::EmptyTimeline).category(),
            "timeline"
        );
    }
}
