//! Power rule: d/dx (a·xⁿ) = n·a·xⁿ⁻¹.

use mathmotion_timeline_core::PhaseSpec;

use crate::format::{num, term};
use crate::lesson::Lesson;
use crate::problem::ProblemData;
use crate::view::LessonView;

pub const KIND: &str = "derivative";

/// `[coefficient, exponent]`
pub const DEFAULT_OPERANDS: [f64; 2] = [3.0, 2.0];

lesson_phases! {
    pub enum DerivativePhase {
        Setup => "setup",
        Identify => "identify": Pop,
        Rule => "rule": Pop,
        Apply => "apply": Whoosh,
        Result => "result": Pop,
        Complete => "complete",
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DerivativeLesson {
    coefficient: f64,
    exponent: i64,
    new_coefficient: f64,
    new_exponent: i64,
    check: Option<bool>,
}

impl DerivativeLesson {
    pub fn new(problem: &ProblemData) -> Self {
        let r = problem.reader(KIND);
        let coefficient = r.number(0, DEFAULT_OPERANDS[0], |c| c != 0.0);
        let exponent = r.integer(1, DEFAULT_OPERANDS[1] as i64, -9, 9);
        let new_coefficient = coefficient * exponent as f64;
        Self {
            coefficient,
            exponent,
            new_coefficient,
            new_exponent: exponent - 1,
            check: problem.answer_matches(new_coefficient),
        }
    }

    pub fn function(&self) -> String {
        term(self.coefficient, self.exponent, "x")
    }

    pub fn derivative(&self) -> String {
        if self.new_coefficient == 0.0 {
            return "0".to_string();
        }
        term(self.new_coefficient, self.new_exponent, "x")
    }

    #[inline]
    pub fn new_coefficient(&self) -> f64 {
        self.new_coefficient
    }

    #[inline]
    pub fn new_exponent(&self) -> i64 {
        self.new_exponent
    }
}

impl Lesson for DerivativeLesson {
    fn kind(&self) -> &'static str {
        KIND
    }

    fn phases(&self) -> Vec<PhaseSpec> {
        DerivativePhase::specs()
    }

    fn view(&self, index: usize) -> LessonView {
        let phase = DerivativePhase::from_index(index);
        let reached = |p: DerivativePhase| phase.index() >= p.index();
        let mut v = LessonView::new(KIND, phase.tag(), phase.index())
            .show(&["function"])
            .label("function", format!("f(x) = {}", self.function()));

        if reached(DerivativePhase::Identify) {
            v = v
                .show(&["coefficient", "exponent"])
                .label("coefficient", num(self.coefficient))
                .label("exponent", self.exponent.to_string())
                .value("coefficient", self.coefficient)
                .value("exponent", self.exponent as f64);
        }
        if reached(DerivativePhase::Rule) {
            v = v.show(&["rule"]).label("rule", "d/dx(a·xⁿ) = n·a·xⁿ⁻¹");
        }
        if reached(DerivativePhase::Apply) {
            v = v.show(&["work"]).work_lines([
                format!(
                    "{} × {} = {}",
                    self.exponent,
                    num(self.coefficient),
                    num(self.new_coefficient)
                ),
                format!("{} − 1 = {}", self.exponent, self.new_exponent),
            ]);
        }
        if reached(DerivativePhase::Result) {
            v = v
                .show(&["derivative"])
                .label("derivative", format!("f'(x) = {}", self.derivative()))
                .value("new_coefficient", self.new_coefficient)
                .value("new_exponent", self.new_exponent as f64);
        }

        match phase {
            DerivativePhase::Setup => v.narrate(format!(
                "Let's find how fast f(x) = {} changes.",
                self.function()
            )),
            DerivativePhase::Identify => v.highlight(&["coefficient", "exponent"]).narrate(format!(
                "The number in front is {} and the power is {}.",
                num(self.coefficient),
                self.exponent
            )),
            DerivativePhase::Rule => v
                .highlight(&["rule"])
                .narrate("Power rule: bring the power down in front, then lower the power by one."),
            DerivativePhase::Apply => v.highlight(&["work"]).narrate(format!(
                "{} times {} is {}, and the new power is {}.",
                self.exponent,
                num(self.coefficient),
                num(self.new_coefficient),
                self.new_exponent
            )),
            DerivativePhase::Result => v
                .highlight(&["derivative"])
                .narrate(format!("So f'(x) = {}.", self.derivative())),
            DerivativePhase::Complete => {
                let v = match self.check {
                    Some(ok) => v.label("check", if ok { "correct" } else { "different" }),
                    None => v,
                };
                v.narrate(format!(
                    "The derivative of {} is {}.",
                    self.function(),
                    self.derivative()
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_rule_default() {
        let l = DerivativeLesson::new(&ProblemData::default());
        assert_eq!(l.function(), "3x²");
        assert_eq!(l.derivative(), "6x");
    }

    #[test]
    fn constant_and_negative_powers() {
        let c = DerivativeLesson::new(&ProblemData::from_operands(&[5.0, 0.0]));
        assert_eq!(c.derivative(), "0");
        let n = DerivativeLesson::new(&ProblemData::from_operands(&[2.0, -1.0]));
        assert_eq!(n.derivative(), "-2x⁻²");
        let fallback = DerivativeLesson::new(&ProblemData::from_operands(&[2.0, 1.5]));
        assert_eq!(fallback.new_exponent(), 1);
    }
}
