//! Arithmetic sequence: show a few terms, find the common difference, reveal the next term.

use mathmotion_timeline_core::PhaseSpec;

use crate::format::{list, num};
use crate::lesson::Lesson;
use crate::problem::ProblemData;
use crate::view::LessonView;

pub const KIND: &str = "sequence";

/// `[start, count]`
pub const DEFAULT_OPERANDS: [f64; 2] = [2.0, 3.0];

lesson_phases! {
    pub enum SequencePhase {
        Setup => "setup",
        Terms => "terms": Pop,
        Pattern => "pattern": Pop,
        Extend => "extend": Whoosh,
        Answer => "answer": Pop,
        Complete => "complete",
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SequenceLesson {
    step: f64,
    terms: Vec<f64>,
    next: f64,
    check: Option<bool>,
}

impl SequenceLesson {
    pub fn new(problem: &ProblemData) -> Self {
        let r = problem.reader(KIND);
        let start = r.number(0, DEFAULT_OPERANDS[0], |_| true);
        let count = r.integer(1, DEFAULT_OPERANDS[1] as i64, 2, 10) as usize;
        // common difference comes from context; the plain lesson counts up by one
        let step = problem.context_f64("step").unwrap_or(1.0);
        let terms: Vec<f64> = (0..count).map(|i| start + step * i as f64).collect();
        let next = start + step * count as f64;
        Self {
            step,
            terms,
            next,
            check: problem.answer_matches(next),
        }
    }

    #[inline]
    pub fn terms(&self) -> &[f64] {
        &self.terms
    }

    #[inline]
    pub fn next_term(&self) -> f64 {
        self.next
    }

    fn difference_label(&self) -> String {
        if self.step < 0.0 {
            format!("-{}", num(-self.step))
        } else {
            format!("+{}", num(self.step))
        }
    }

    fn last_term(&self) -> f64 {
        self.terms.last().copied().unwrap_or(self.next - self.step)
    }
}

impl Lesson for SequenceLesson {
    fn kind(&self) -> &'static str {
        KIND
    }

    fn phases(&self) -> Vec<PhaseSpec> {
        SequencePhase::specs()
    }

    fn view(&self, index: usize) -> LessonView {
        let phase = SequencePhase::from_index(index);
        let reached = |p: SequencePhase| phase.index() >= p.index();
        let mut v = LessonView::new(KIND, phase.tag(), phase.index()).show(&["number-row"]);

        if reached(SequencePhase::Terms) {
            v = v
                .show(&["terms"])
                .label("sequence", list(&self.terms))
                .value("term_count", self.terms.len() as f64);
        }
        if reached(SequencePhase::Pattern) {
            v = v
                .show(&["difference-arrows"])
                .label("difference", self.difference_label())
                .value("difference", self.step);
        }
        if reached(SequencePhase::Extend) {
            v = v.show(&["next-slot"]);
        }
        if reached(SequencePhase::Answer) {
            v = v
                .show(&["answer"])
                .label("answer", num(self.next))
                .value("answer", self.next);
        }

        let more_or_less = if self.step < 0.0 { "less" } else { "more" };
        v = match phase {
            SequencePhase::Setup => v.narrate("Let's look at these numbers and find the pattern."),
            SequencePhase::Terms => v
                .highlight(&["terms"])
                .narrate(format!("Here is the sequence: {}.", list(&self.terms))),
            SequencePhase::Pattern => v.highlight(&["difference-arrows"]).narrate(format!(
                "Each number is {} {} than the one before.",
                num(self.step.abs()),
                more_or_less
            )),
            SequencePhase::Extend => v.highlight(&["next-slot"]).narrate(format!(
                "So the next number is {} {} {}.",
                num(self.last_term()),
                if self.step < 0.0 { "minus" } else { "plus" },
                num(self.step.abs())
            )),
            SequencePhase::Answer => v
                .highlight(&["answer"])
                .narrate(format!("The next number is {}!", num(self.next))),
            SequencePhase::Complete => {
                let mut full = self.terms.clone();
                full.push(self.next);
                let v = v.label("sequence_full", list(&full));
                let v = match self.check {
                    Some(ok) => v.label("check", if ok { "correct" } else { "different" }),
                    None => v,
                };
                v.narrate(format!("{} comes next.", num(self.next)))
            }
        };
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_up_by_default() {
        let l = SequenceLesson::new(&ProblemData::from_operands(&[95.0, 3.0]));
        assert_eq!(l.terms(), &[95.0, 96.0, 97.0]);
        assert_eq!(l.next_term(), 98.0);
    }

    #[test]
    fn context_step_and_defaults() {
        let p = ProblemData::from_operands(&[10.0]).with_context("step", serde_json::json!(-3));
        let l = SequenceLesson::new(&p);
        assert_eq!(l.terms(), &[10.0, 7.0, 4.0]);
        let v = l.view(SequencePhase::Pattern.index());
        assert_eq!(v.labels["difference"], "-3");
        assert!(v.narration.contains("less"));
    }
}
