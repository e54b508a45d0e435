//! Lesson registry: kind name → constructor.

use hashbrown::HashMap;

use crate::error::{LessonError, StageError};
use crate::lesson::{Lesson, LessonKind};
use crate::lessons::{
    AlgebraTilesLesson, DerivativeLesson, FoilLesson, LogarithmLesson, LongDivisionLesson,
    NumberLineLesson, SequenceLesson, SquarePerimeterLesson, TriangleLesson, TrigPeriodLesson,
    UnitCircleLesson,
};
use crate::problem::ProblemData;

/// Builds a lesson from problem data, or reports why its parameters are unusable.
pub type LessonFactory = fn(&ProblemData) -> Result<Box<dyn Lesson>, LessonError>;

fn boxed<L: Lesson + 'static>(lesson: L) -> Box<dyn Lesson> {
    Box::new(lesson)
}

fn factory_for(kind: LessonKind) -> LessonFactory {
    match kind {
        LessonKind::Sequence => |p| Ok(boxed(SequenceLesson::new(p))),
        LessonKind::LongDivision => |p| LongDivisionLesson::new(p).map(boxed),
        LessonKind::Foil => |p| Ok(boxed(FoilLesson::new(p))),
        LessonKind::UnitCircle => |p| Ok(boxed(UnitCircleLesson::new(p))),
        LessonKind::Derivative => |p| Ok(boxed(DerivativeLesson::new(p))),
        LessonKind::Logarithm => |p| LogarithmLesson::new(p).map(boxed),
        LessonKind::TrigPeriod => |p| TrigPeriodLesson::new(p).map(boxed),
        LessonKind::Triangle => |p| TriangleLesson::new(p).map(boxed),
        LessonKind::SquarePerimeter => |p| SquarePerimeterLesson::new(p).map(boxed),
        LessonKind::NumberLine => |p| Ok(boxed(NumberLineLesson::new(p))),
        LessonKind::AlgebraTiles => |p| Ok(boxed(AlgebraTilesLesson::new(p))),
    }
}

#[derive(Clone, Debug, Default)]
pub struct LessonRegistry {
    factories: HashMap<String, LessonFactory>,
}

impl LessonRegistry {
    /// Empty registry; see [`LessonRegistry::with_defaults`] for the built-ins.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut reg = Self::new();
        for kind in LessonKind::ALL {
            reg.register(kind.name(), factory_for(kind));
        }
        reg
    }

    /// Add or replace a lesson kind.
    pub fn register(&mut self, kind: &str, factory: LessonFactory) {
        self.factories.insert(kind.to_string(), factory);
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.factories.contains_key(kind)
    }

    pub fn factory(&self, kind: &str) -> Result<LessonFactory, StageError> {
        self.factories
            .get(kind)
            .copied()
            .ok_or_else(|| StageError::UnknownLesson {
                name: kind.to_string(),
            })
    }

    /// Registered kinds, sorted.
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_kind() {
        let reg = LessonRegistry::with_defaults();
        assert_eq!(reg.kinds().len(), LessonKind::ALL.len());
        for kind in LessonKind::ALL {
            let lesson = reg.factory(kind.name()).unwrap()(&ProblemData::default()).unwrap();
            assert_eq!(lesson.kind(), kind.name());
        }
    }

    #[test]
    fn unknown_kind() {
        let reg = LessonRegistry::with_defaults();
        assert!(matches!(
            reg.factory("pie_chart"),
            Err(StageError::UnknownLesson { .. })
        ));
    }

    #[test]
    fn register_custom_kind() {
        let mut reg = LessonRegistry::new();
        reg.register("custom", |p| Ok(boxed(SequenceLesson::new(p))));
        assert!(reg.contains("custom"));
        assert_eq!(reg.kinds(), vec!["custom"]);
    }
}
