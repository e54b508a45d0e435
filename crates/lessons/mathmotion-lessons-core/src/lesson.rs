//! The contract every lesson implements, and the built-in lesson kinds.

use std::fmt;
use std::str::FromStr;

use mathmotion_timeline_core::{Config, PhaseSpec, Timeline, TimelineError};
use serde::{Deserialize, Serialize};

use crate::error::StageError;
use crate::view::LessonView;

/// A lesson is a phase list plus a pure view function. Derived numbers are
/// computed once at construction, so `view` is cheap and idempotent.
pub trait Lesson {
    /// Registry name, e.g. `"long_division"`.
    fn kind(&self) -> &'static str;

    /// Ordered phases; the last one is terminal.
    fn phases(&self) -> Vec<PhaseSpec>;

    /// View for phase `index`; indices past the end render the terminal phase.
    fn view(&self, index: usize) -> LessonView;

    fn timeline(&self, cfg: &Config) -> Result<Timeline, TimelineError> {
        Timeline::new(self.phases(), cfg.ticks_per_phase)
    }

    /// Picture of the finished explanation, used as the reduced-motion fallback.
    fn final_view(&self) -> LessonView {
        self.view(self.phases().len().saturating_sub(1))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LessonKind {
    Sequence,
    LongDivision,
    Foil,
    UnitCircle,
    Derivative,
    Logarithm,
    TrigPeriod,
    Triangle,
    SquarePerimeter,
    NumberLine,
    AlgebraTiles,
}

impl LessonKind {
    pub const ALL: [LessonKind; 11] = [
        Self::Sequence,
        Self::LongDivision,
        Self::Foil,
        Self::UnitCircle,
        Self::Derivative,
        Self::Logarithm,
        Self::TrigPeriod,
        Self::Triangle,
        Self::SquarePerimeter,
        Self::NumberLine,
        Self::AlgebraTiles,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sequence => "sequence",
            Self::LongDivision => "long_division",
            Self::Foil => "foil",
            Self::UnitCircle => "unit_circle",
            Self::Derivative => "derivative",
            Self::Logarithm => "logarithm",
            Self::TrigPeriod => "trig_period",
            Self::Triangle => "triangle",
            Self::SquarePerimeter => "square_perimeter",
            Self::NumberLine => "number_line",
            Self::AlgebraTiles => "algebra_tiles",
        }
    }
}

impl fmt::Display for LessonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LessonKind {
    type Err = StageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.name() == s)
            .ok_or_else(|| StageError::UnknownLesson {
                name: s.to_string(),
            })
    }
}
