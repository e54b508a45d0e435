//! Long division, one phase per dividend digit.
//!
//! Each step depends on the previous step's remainder, so the steps are
//! produced by a fold that threads the running remainder through the digits.

use log::warn;
use mathmotion_timeline_core::{PhaseSpec, SoundCue};
use serde::{Deserialize, Serialize};

use crate::error::LessonError;
use crate::lesson::Lesson;
use crate::problem::ProblemData;
use crate::view::LessonView;

pub const KIND: &str = "long_division";

/// `[dividend, divisor]`
pub const DEFAULT_OPERANDS: [f64; 2] = [156.0, 12.0];

const MAX_DIVIDEND: i64 = 999_999_999;
const MAX_DIVISOR: f64 = 1_000_000.0;

/// One "divide, multiply, subtract" round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DivisionStep {
    /// Dividend digit brought into play by this step.
    pub digit: u32,
    /// Running value being divided (previous remainder × 10 + digit).
    pub current: u64,
    pub quotient_digit: u64,
    pub product: u64,
    pub remainder: u64,
}

/// Fold the dividend's digits into division steps; returns the steps and the
/// final remainder.
pub fn division_steps(dividend: u64, divisor: u64) -> (Vec<DivisionStep>, u64) {
    dividend
        .to_string()
        .bytes()
        .map(|b| u32::from(b - b'0'))
        .fold((Vec::new(), 0u64), |(mut steps, carry), digit| {
            let current = carry * 10 + u64::from(digit);
            let quotient_digit = current / divisor;
            let product = quotient_digit * divisor;
            let remainder = current - product;
            steps.push(DivisionStep {
                digit,
                current,
                quotient_digit,
                product,
                remainder,
            });
            (steps, remainder)
        })
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DivisionPhase {
    Setup,
    /// Zero-based digit step.
    Step(usize),
    Result,
    Complete,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LongDivisionLesson {
    dividend: u64,
    divisor: u64,
    steps: Vec<DivisionStep>,
    quotient: u64,
    remainder: u64,
    check: Option<bool>,
}

impl LongDivisionLesson {
    pub fn new(problem: &ProblemData) -> Result<Self, LessonError> {
        let r = problem.reader(KIND);
        let dividend = r.integer(0, DEFAULT_OPERANDS[0] as i64, 0, MAX_DIVIDEND);
        let raw_divisor = r.checked(1, DEFAULT_OPERANDS[1]);
        if raw_divisor == 0.0 {
            return Err(LessonError::ZeroDivisor { dividend });
        }
        let divisor = if raw_divisor.fract() == 0.0 && raw_divisor > 0.0 && raw_divisor <= MAX_DIVISOR {
            raw_divisor as u64
        } else {
            warn!(
                "{KIND}: divisor {raw_divisor} out of range, using default {}",
                DEFAULT_OPERANDS[1]
            );
            DEFAULT_OPERANDS[1] as u64
        };
        let dividend = dividend as u64;
        let (steps, remainder) = division_steps(dividend, divisor);
        let quotient = dividend / divisor;
        Ok(Self {
            dividend,
            divisor,
            steps,
            quotient,
            remainder,
            check: problem.answer_matches(quotient as f64),
        })
    }

    #[inline]
    pub fn steps(&self) -> &[DivisionStep] {
        &self.steps
    }

    #[inline]
    pub fn quotient(&self) -> u64 {
        self.quotient
    }

    #[inline]
    pub fn remainder(&self) -> u64 {
        self.remainder
    }

    pub fn phase_at(&self, index: usize) -> DivisionPhase {
        let n = self.steps.len();
        match index {
            0 => DivisionPhase::Setup,
            i if i <= n => DivisionPhase::Step(i - 1),
            i if i == n + 1 => DivisionPhase::Result,
            _ => DivisionPhase::Complete,
        }
    }

    fn phase_tag(&self, phase: DivisionPhase) -> String {
        match phase {
            DivisionPhase::Setup => "setup".to_string(),
            DivisionPhase::Step(i) => format!("step-{}", i + 1),
            DivisionPhase::Result => "result".to_string(),
            DivisionPhase::Complete => "complete".to_string(),
        }
    }

    /// Quotient digits written so far, without leading zeros.
    fn partial_quotient(&self, through: usize) -> String {
        let digits: String = self.steps[..=through]
            .iter()
            .map(|s| s.quotient_digit.to_string())
            .collect();
        let trimmed = digits.trim_start_matches('0');
        if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    }

    fn step_lines(&self, i: usize) -> Vec<String> {
        let s = &self.steps[i];
        let mut lines = vec![
            format!("{} ÷ {} = {}", s.current, self.divisor, s.quotient_digit),
            format!("{} × {} = {}", s.quotient_digit, self.divisor, s.product),
            format!("{} − {} = {}", s.current, s.product, s.remainder),
        ];
        if let Some(next) = self.steps.get(i + 1) {
            lines.push(format!("Bring down {} → {}", next.digit, next.current));
        }
        lines
    }

    fn equation(&self) -> String {
        if self.remainder == 0 {
            format!("{} ÷ {} = {}", self.dividend, self.divisor, self.quotient)
        } else {
            format!(
                "{} ÷ {} = {} R {}",
                self.dividend, self.divisor, self.quotient, self.remainder
            )
        }
    }
}

impl Lesson for LongDivisionLesson {
    fn kind(&self) -> &'static str {
        KIND
    }

    fn phases(&self) -> Vec<PhaseSpec> {
        let mut phases = vec![PhaseSpec::new("setup")];
        phases.extend(
            (1..=self.steps.len()).map(|i| PhaseSpec::new(format!("step-{i}")).with_cue(SoundCue::Pop)),
        );
        phases.push(PhaseSpec::new("result").with_cue(SoundCue::Whoosh));
        phases.push(PhaseSpec::new("complete"));
        phases
    }

    fn view(&self, index: usize) -> LessonView {
        let phase = self.phase_at(index);
        let n = self.steps.len();
        let tag = self.phase_tag(phase);
        let phase_index = match phase {
            DivisionPhase::Setup => 0,
            DivisionPhase::Step(i) => i + 1,
            DivisionPhase::Result => n + 1,
            DivisionPhase::Complete => n + 2,
        };
        let v = LessonView::new(KIND, &tag, phase_index)
            .show(&["bracket", "dividend", "divisor"])
            .label("dividend", self.dividend.to_string())
            .label("divisor", self.divisor.to_string());

        // steps revealed so far (all of them once past the last digit)
        let through = match phase {
            DivisionPhase::Setup => None,
            DivisionPhase::Step(i) => Some(i),
            DivisionPhase::Result | DivisionPhase::Complete => n.checked_sub(1),
        };
        let v = match through {
            Some(i) => {
                let mut v = v
                    .show(&["quotient", "work"])
                    .label("quotient", self.partial_quotient(i))
                    .value("remainder_so_far", self.steps[i].remainder as f64);
                for step in 0..=i {
                    v = v.show_owned(format!("step-{}", step + 1)).work_lines(self.step_lines(step));
                }
                v
            }
            None => v,
        };

        match phase {
            DivisionPhase::Setup => v.narrate(format!(
                "Let's divide {} by {}, one digit at a time.",
                self.dividend, self.divisor
            )),
            DivisionPhase::Step(i) => {
                let s = &self.steps[i];
                let id = format!("step-{}", i + 1);
                let v = v.highlight(&[id.as_str()]);
                if s.quotient_digit == 0 && i + 1 < n {
                    v.narrate(format!(
                        "{} is smaller than {}, so we write 0 and bring down the next digit.",
                        s.current, self.divisor
                    ))
                } else {
                    v.narrate(format!(
                        "{} goes into {} {} times, with {} left over.",
                        self.divisor, s.current, s.quotient_digit, s.remainder
                    ))
                }
            }
            DivisionPhase::Result => v
                .show(&["answer"])
                .highlight(&["answer"])
                .label("answer", self.equation())
                .value("quotient", self.quotient as f64)
                .value("remainder", self.remainder as f64)
                .narrate(format!("So {}.", self.equation())),
            DivisionPhase::Complete => {
                let v = v
                    .show(&["answer"])
                    .label("answer", self.equation())
                    .value("quotient", self.quotient as f64)
                    .value("remainder", self.remainder as f64);
                let v = match self.check {
                    Some(ok) => v.label("check", if ok { "correct" } else { "different" }),
                    None => v,
                };
                v.narrate("Great dividing!")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_thread_remainder() {
        let (steps, rem) = division_steps(156, 12);
        assert_eq!(rem, 0);
        let currents: Vec<u64> = steps.iter().map(|s| s.current).collect();
        assert_eq!(currents, vec![1, 15, 36]);
        let digits: Vec<u64> = steps.iter().map(|s| s.quotient_digit).collect();
        assert_eq!(digits, vec![0, 1, 3]);
    }

    #[test]
    fn steps_agree_with_integer_division() {
        for (a, b) in [(0u64, 7u64), (7, 7), (1234, 7), (1000, 3), (99, 100)] {
            let (steps, rem) = division_steps(a, b);
            assert_eq!(rem, a % b);
            let q: String = steps.iter().map(|s| s.quotient_digit.to_string()).collect();
            assert_eq!(q.parse::<u64>().unwrap(), a / b);
        }
    }

    #[test]
    fn phase_layout() {
        let l = LongDivisionLesson::new(&ProblemData::from_operands(&[156.0, 12.0])).unwrap();
        let names: Vec<String> = l.phases().into_iter().map(|p| p.name).collect();
        assert_eq!(
            names,
            vec!["setup", "step-1", "step-2", "step-3", "result", "complete"]
        );
        assert_eq!(l.phase_at(99), DivisionPhase::Complete);
    }

    #[test]
    fn zero_divisor_is_an_error() {
        let err = LongDivisionLesson::new(&ProblemData::from_operands(&[45.0, 0.0])).unwrap_err();
        assert_eq!(err, LessonError::ZeroDivisor { dividend: 45 });
    }

    #[test]
    fn bad_divisor_defaults() {
        let l = LongDivisionLesson::new(&ProblemData::from_operands(&[144.0, -3.0])).unwrap();
        assert_eq!(l.quotient(), 12);
    }
}
