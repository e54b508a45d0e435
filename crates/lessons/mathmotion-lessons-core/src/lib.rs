//! mathmotion lessons
//!
//! Concrete step-by-step math lessons on top of `mathmotion-timeline-core`.
//! A lesson turns [`ProblemData`] into a phase list and a pure view function;
//! the [`Stage`] mounts lessons, drives their runners from host time, and
//! renders either the current phase, a reduced-motion final picture, or an
//! educational error panel for unusable parameters.

#[macro_use]
mod macros;

pub mod error;
pub mod format;
pub mod ids;
pub mod lesson;
pub mod lessons;
pub mod problem;
pub mod registry;
pub mod stage;
pub mod view;

pub use error::{ErrorPanel, LessonError, StageError};
pub use ids::{IdAllocator, LessonId};
pub use lesson::{Lesson, LessonKind};
pub use problem::{Answer, OperandReader, Operation, ProblemData};
pub use registry::{LessonFactory, LessonRegistry};
pub use stage::{Stage, StageEvent, StageOutputs};
pub use view::{LessonView, Rendered};
