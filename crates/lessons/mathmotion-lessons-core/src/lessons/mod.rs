//! Built-in lessons. Each module exposes `KIND`, `DEFAULT_OPERANDS`, its
//! phase set, and a lesson type implementing [`crate::Lesson`].

pub mod algebra_tiles;
pub mod derivative;
pub mod foil;
pub mod logarithm;
pub mod long_division;
pub mod number_line;
pub mod sequence;
pub mod square_perimeter;
pub mod triangle;
pub mod trig_period;
pub mod unit_circle;

pub use algebra_tiles::AlgebraTilesLesson;
pub use derivative::DerivativeLesson;
pub use foil::FoilLesson;
pub use logarithm::LogarithmLesson;
pub use long_division::LongDivisionLesson;
pub use number_line::NumberLineLesson;
pub use sequence::SequenceLesson;
pub use square_perimeter::SquarePerimeterLesson;
pub use triangle::TriangleLesson;
pub use trig_period::TrigPeriodLesson;
pub use unit_circle::UnitCircleLesson;
