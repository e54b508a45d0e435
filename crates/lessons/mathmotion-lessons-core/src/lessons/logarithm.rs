//! log_b(x) = y read as "b to what power gives x?"

use mathmotion_timeline_core::PhaseSpec;

use crate::error::LessonError;
use crate::format::{num, superscript};
use crate::lesson::Lesson;
use crate::problem::ProblemData;
use crate::view::LessonView;

pub const KIND: &str = "logarithm";

/// `[base, argument]`
pub const DEFAULT_OPERANDS: [f64; 2] = [2.0, 8.0];

lesson_phases! {
    pub enum LogarithmPhase {
        Setup => "setup",
        Rewrite => "rewrite": Pop,
        Evaluate => "evaluate": Whoosh,
        Result => "result": Pop,
        Complete => "complete",
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LogarithmLesson {
    base: f64,
    argument: f64,
    result: f64,
    check: Option<bool>,
}

impl LogarithmLesson {
    pub fn new(problem: &ProblemData) -> Result<Self, LessonError> {
        let r = problem.reader(KIND);
        let base = r.checked(0, DEFAULT_OPERANDS[0]);
        let argument = r.checked(1, DEFAULT_OPERANDS[1]);
        if base <= 0.0 || base == 1.0 {
            return Err(LessonError::InvalidLogBase { base });
        }
        if argument <= 0.0 {
            return Err(LessonError::NonPositiveLogArgument { argument });
        }
        let result = argument.ln() / base.ln();
        // snap 2.9999999 to 3 so whole powers read as whole numbers
        let result = if (result - result.round()).abs() < 1e-9 {
            result.round()
        } else {
            result
        };
        Ok(Self {
            base,
            argument,
            result,
            check: problem.answer_matches(result),
        })
    }

    #[inline]
    pub fn result(&self) -> f64 {
        self.result
    }

    pub fn is_whole(&self) -> bool {
        self.result.fract() == 0.0 && self.result.abs() < 1e6
    }

    fn expression(&self) -> String {
        format!("log_{}({})", num(self.base), num(self.argument))
    }

    fn power_form(&self, exponent: &str) -> String {
        format!("{}^{} = {}", num(self.base), exponent, num(self.argument))
    }

    /// `2 × 2 × 2 = 8` for small whole powers.
    fn repeated_product(&self) -> Option<String> {
        if !self.is_whole() || self.result < 1.0 || self.result > 6.0 {
            return None;
        }
        let factors = vec![num(self.base); self.result as usize];
        Some(format!("{} = {}", factors.join(" × "), num(self.argument)))
    }
}

impl Lesson for LogarithmLesson {
    fn kind(&self) -> &'static str {
        KIND
    }

    fn phases(&self) -> Vec<PhaseSpec> {
        LogarithmPhase::specs()
    }

    fn view(&self, index: usize) -> LessonView {
        let phase = LogarithmPhase::from_index(index);
        let reached = |p: LogarithmPhase| phase.index() >= p.index();
        let mut v = LessonView::new(KIND, phase.tag(), phase.index())
            .show(&["expression"])
            .label("expression", self.expression())
            .value("base", self.base)
            .value("argument", self.argument);

        if reached(LogarithmPhase::Rewrite) {
            v = v.show(&["power-form"]).label("power_form", self.power_form("?"));
        }
        if reached(LogarithmPhase::Evaluate) {
            v = v.show(&["work"]);
            if let Some(line) = self.repeated_product() {
                v = v.work_line(line);
            }
        }
        if reached(LogarithmPhase::Result) {
            let shown = if self.is_whole() {
                superscript(self.result as i64)
            } else {
                num(self.result)
            };
            v = v
                .show(&["answer"])
                .label("answer", format!("{} = {}", self.expression(), num(self.result)))
                .label("power_form", format!("{}{} = {}", num(self.base), shown, num(self.argument)))
                .value("result", self.result);
        }

        match phase {
            LogarithmPhase::Setup => v.narrate(format!(
                "What does {} mean?",
                self.expression()
            )),
            LogarithmPhase::Rewrite => v.highlight(&["power-form"]).narrate(format!(
                "It asks: {} to what power gives {}?",
                num(self.base),
                num(self.argument)
            )),
            LogarithmPhase::Evaluate => {
                let v = v.highlight(&["work"]);
                match self.repeated_product() {
                    Some(line) => v.narrate(format!("Multiply it out: {line}.")),
                    None => v.narrate(format!(
                        "The power is between whole numbers, about {}.",
                        num(self.result)
                    )),
                }
            }
            LogarithmPhase::Result => v
                .highlight(&["answer"])
                .narrate(format!("So {} = {}.", self.expression(), num(self.result))),
            LogarithmPhase::Complete => {
                let v = match self.check {
                    Some(ok) => v.label("check", if ok { "correct" } else { "different" }),
                    None => v,
                };
                v.narrate("Logarithms undo powers!")
            }
        }
    }
}
