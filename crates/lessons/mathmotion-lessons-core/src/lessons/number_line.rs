//! Addition and subtraction as a hop along a number line.

use mathmotion_timeline_core::PhaseSpec;

use crate::format::num;
use crate::lesson::Lesson;
use crate::problem::{Operation, ProblemData};
use crate::view::LessonView;

pub const KIND: &str = "number_line";

/// `[start, delta]`
pub const DEFAULT_OPERANDS: [f64; 2] = [3.0, 4.0];

const MAX_HOP: f64 = 20.0;
/// Ticks shown either side of the hop.
const MARGIN: f64 = 2.0;

lesson_phases! {
    pub enum NumberLinePhase {
        Setup => "setup",
        Start => "start": Pop,
        Hop => "hop": Whoosh,
        Land => "land": Pop,
        Equation => "equation": Pop,
        Complete => "complete",
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NumberLineLesson {
    start: f64,
    /// Signed hop; subtraction problems arrive as a positive operand.
    delta: f64,
    end: f64,
    check: Option<bool>,
}

impl NumberLineLesson {
    pub fn new(problem: &ProblemData) -> Self {
        let r = problem.reader(KIND);
        let start = r.number(0, DEFAULT_OPERANDS[0], |s| s.abs() <= 1000.0);
        let raw = r.number(1, DEFAULT_OPERANDS[1], |d| d.abs() <= MAX_HOP);
        let delta = match problem.operation {
            Some(Operation::Subtract) => -raw,
            _ => raw,
        };
        let end = start + delta;
        Self {
            start,
            delta,
            end,
            check: problem.answer_matches(end),
        }
    }

    #[inline]
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Visible range of the line, padded around both endpoints.
    pub fn range(&self) -> (f64, f64) {
        let lo = self.start.min(self.end) - MARGIN;
        let hi = self.start.max(self.end) + MARGIN;
        (lo.floor(), hi.ceil())
    }

    fn equation(&self) -> String {
        if self.delta < 0.0 {
            format!("{} − {} = {}", num(self.start), num(-self.delta), num(self.end))
        } else {
            format!("{} + {} = {}", num(self.start), num(self.delta), num(self.end))
        }
    }

    fn direction(&self) -> &'static str {
        if self.delta < 0.0 {
            "left"
        } else {
            "right"
        }
    }
}

impl Lesson for NumberLineLesson {
    fn kind(&self) -> &'static str {
        KIND
    }

    fn phases(&self) -> Vec<PhaseSpec> {
        NumberLinePhase::specs()
    }

    fn view(&self, index: usize) -> LessonView {
        let phase = NumberLinePhase::from_index(index);
        let reached = |p: NumberLinePhase| phase.index() >= p.index();
        let (lo, hi) = self.range();
        let mut v = LessonView::new(KIND, phase.tag(), phase.index())
            .show(&["line", "ticks"])
            .value("range_min", lo)
            .value("range_max", hi);

        if reached(NumberLinePhase::Start) {
            v = v
                .show(&["start-marker"])
                .label("start", num(self.start))
                .value("start", self.start);
        }
        if reached(NumberLinePhase::Hop) {
            v = v
                .show(&["hop-arc"])
                .label("hop", format!("{}{}", if self.delta < 0.0 { "-" } else { "+" }, num(self.delta.abs())))
                .value("delta", self.delta);
        }
        if reached(NumberLinePhase::Land) {
            v = v
                .show(&["end-marker"])
                .label("end", num(self.end))
                .value("end", self.end);
        }
        if reached(NumberLinePhase::Equation) {
            v = v.show(&["equation"]).label("equation", self.equation());
        }

        match phase {
            NumberLinePhase::Setup => v.narrate("Here is a number line."),
            NumberLinePhase::Start => v
                .highlight(&["start-marker"])
                .narrate(format!("We start at {}.", num(self.start))),
            NumberLinePhase::Hop => v.highlight(&["hop-arc"]).narrate(format!(
                "Hop {} spaces to the {}.",
                num(self.delta.abs()),
                self.direction()
            )),
            NumberLinePhase::Land => v
                .highlight(&["end-marker"])
                .narrate(format!("We land on {}!", num(self.end))),
            NumberLinePhase::Equation => v
                .highlight(&["equation"])
                .narrate(format!("So {}.", self.equation())),
            NumberLinePhase::Complete => {
                let v = match self.check {
                    Some(ok) => v.label("check", if ok { "correct" } else { "different" }),
                    None => v,
                };
                v.narrate(self.equation())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtract_hops_left() {
        let p = ProblemData::from_operands(&[10.0, 4.0]).with_operation(Operation::Subtract);
        let l = NumberLineLesson::new(&p);
        assert_eq!(l.end(), 6.0);
        assert_eq!(l.range(), (4.0, 12.0));
        let v = l.view(NumberLinePhase::Equation.index());
        assert_eq!(v.labels["equation"], "10 − 4 = 6");
        assert_eq!(v.labels["hop"], "-4");
    }

    #[test]
    fn oversized_hop_defaults() {
        let l = NumberLineLesson::new(&ProblemData::from_operands(&[0.0, 500.0]));
        assert_eq!(l.end(), 4.0);
    }
}
