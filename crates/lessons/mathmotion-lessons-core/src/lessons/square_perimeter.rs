//! From a square's perimeter to its side and area.

use mathmotion_timeline_core::PhaseSpec;

use crate::error::LessonError;
use crate::format::num;
use crate::lesson::Lesson;
use crate::problem::ProblemData;
use crate::view::LessonView;

pub const KIND: &str = "square_perimeter";

/// `[perimeter]`
pub const DEFAULT_OPERANDS: [f64; 1] = [20.0];

lesson_phases! {
    pub enum SquarePhase {
        Setup => "setup",
        Perimeter => "perimeter": Whoosh,
        Divide => "divide": Pop,
        Side => "side": Pop,
        Area => "area": Pop,
        Complete => "complete",
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SquarePerimeterLesson {
    perimeter: f64,
    side: f64,
    area: f64,
    check: Option<bool>,
}

impl SquarePerimeterLesson {
    pub fn new(problem: &ProblemData) -> Result<Self, LessonError> {
        let perimeter = problem.reader(KIND).checked(0, DEFAULT_OPERANDS[0]);
        if perimeter <= 0.0 {
            return Err(LessonError::NonPositivePerimeter { perimeter });
        }
        let side = perimeter / 4.0;
        Ok(Self {
            perimeter,
            side,
            area: side * side,
            check: problem.answer_matches(side),
        })
    }

    #[inline]
    pub fn side(&self) -> f64 {
        self.side
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.area
    }
}

impl Lesson for SquarePerimeterLesson {
    fn kind(&self) -> &'static str {
        KIND
    }

    fn phases(&self) -> Vec<PhaseSpec> {
        SquarePhase::specs()
    }

    fn view(&self, index: usize) -> LessonView {
        let phase = SquarePhase::from_index(index);
        let reached = |p: SquarePhase| phase.index() >= p.index();
        let mut v = LessonView::new(KIND, phase.tag(), phase.index())
            .show(&["square"])
            .value("perimeter", self.perimeter);

        if reached(SquarePhase::Perimeter) {
            v = v.show(&["border"]).label("perimeter", num(self.perimeter));
        }
        if reached(SquarePhase::Divide) {
            v = v
                .show(&["four-sides"])
                .work_line(format!("{} ÷ 4 = {}", num(self.perimeter), num(self.side)));
        }
        if reached(SquarePhase::Side) {
            v = v
                .show(&["side-labels"])
                .label("side", num(self.side))
                .value("side", self.side);
        }
        if reached(SquarePhase::Area) {
            v = v
                .show(&["area-fill"])
                .label("area", num(self.area))
                .value("area", self.area)
                .work_line(format!("{} × {} = {}", num(self.side), num(self.side), num(self.area)));
        }

        match phase {
            SquarePhase::Setup => v.narrate("A square has four equal sides."),
            SquarePhase::Perimeter => v.highlight(&["border"]).narrate(format!(
                "The distance all the way around is {}.",
                num(self.perimeter)
            )),
            SquarePhase::Divide => v
                .highlight(&["four-sides"])
                .narrate("Share the perimeter equally between the four sides."),
            SquarePhase::Side => v
                .highlight(&["side-labels"])
                .narrate(format!("Each side is {}.", num(self.side))),
            SquarePhase::Area => v.highlight(&["area-fill"]).narrate(format!(
                "Side times side gives an area of {}.",
                num(self.area)
            )),
            SquarePhase::Complete => {
                let v = match self.check {
                    Some(ok) => v.label("check", if ok { "correct" } else { "different" }),
                    None => v,
                };
                v.narrate(format!(
                    "Perimeter {} means side {} and area {}.",
                    num(self.perimeter),
                    num(self.side),
                    num(self.area)
                ))
            }
        }
    }
}
