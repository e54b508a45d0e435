//! FOIL expansion of `(ax + b)(cx + d)`.

use mathmotion_timeline_core::PhaseSpec;

use crate::format::{polynomial, term};
use crate::lesson::Lesson;
use crate::problem::ProblemData;
use crate::view::LessonView;

pub const KIND: &str = "foil";

/// `[a, b, c, d]` for `(ax + b)(cx + d)`
pub const DEFAULT_OPERANDS: [f64; 4] = [1.0, 2.0, 1.0, 3.0];

lesson_phases! {
    pub enum FoilPhase {
        Setup => "setup",
        First => "first": Pop,
        Outer => "outer": Pop,
        Inner => "inner": Pop,
        Last => "last": Pop,
        Combine => "combine": Whoosh,
        Complete => "complete",
    }
}

/// The four partial products and their sum, as coefficients.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FoilProducts {
    pub first: f64,
    pub outer: f64,
    pub inner: f64,
    pub last: f64,
}

impl FoilProducts {
    pub fn of(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self {
            first: a * c,
            outer: a * d,
            inner: b * c,
            last: b * d,
        }
    }

    #[inline]
    pub fn middle(&self) -> f64 {
        self.outer + self.inner
    }

    pub fn labels(&self) -> [String; 4] {
        [
            term(self.first, 2, "x"),
            term(self.outer, 1, "x"),
            term(self.inner, 1, "x"),
            term(self.last, 0, "x"),
        ]
    }

    pub fn combined(&self) -> String {
        polynomial(&[(self.first, 2), (self.middle(), 1), (self.last, 0)], "x")
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FoilLesson {
    operands: [f64; 4],
    products: FoilProducts,
}

impl FoilLesson {
    pub fn new(problem: &ProblemData) -> Self {
        let r = problem.reader(KIND);
        let mut operands = DEFAULT_OPERANDS;
        for (i, slot) in operands.iter_mut().enumerate() {
            *slot = r.number(i, DEFAULT_OPERANDS[i], |_| true);
        }
        let [a, b, c, d] = operands;
        Self {
            operands,
            products: FoilProducts::of(a, b, c, d),
        }
    }

    #[inline]
    pub fn products(&self) -> &FoilProducts {
        &self.products
    }

    fn expression(&self) -> String {
        let [a, b, c, d] = self.operands;
        format!(
            "({})({})",
            polynomial(&[(a, 1), (b, 0)], "x"),
            polynomial(&[(c, 1), (d, 0)], "x")
        )
    }
}

impl Lesson for FoilLesson {
    fn kind(&self) -> &'static str {
        KIND
    }

    fn phases(&self) -> Vec<PhaseSpec> {
        FoilPhase::specs()
    }

    fn view(&self, index: usize) -> LessonView {
        let phase = FoilPhase::from_index(index);
        let reached = |p: FoilPhase| phase.index() >= p.index();
        let [first, outer, inner, last] = self.products.labels();
        let mut v = LessonView::new(KIND, phase.tag(), phase.index())
            .show(&["expression"])
            .label("expression", self.expression());

        if reached(FoilPhase::First) {
            v = v.show(&["first"]).label("first", first.clone());
        }
        if reached(FoilPhase::Outer) {
            v = v.show(&["outer"]).label("outer", outer.clone());
        }
        if reached(FoilPhase::Inner) {
            v = v.show(&["inner"]).label("inner", inner.clone());
        }
        if reached(FoilPhase::Last) {
            v = v.show(&["last"]).label("last", last.clone());
        }
        if reached(FoilPhase::Combine) {
            v = v
                .show(&["result"])
                .label("result", self.products.combined())
                .value("x2", self.products.first)
                .value("x1", self.products.middle())
                .value("x0", self.products.last);
        }

        let [a, b, c, d] = self.operands;
        match phase {
            FoilPhase::Setup => v.narrate("FOIL means First, Outer, Inner, Last."),
            FoilPhase::First => v.highlight(&["a", "c", "first"]).narrate(format!(
                "First: {} times {} is {first}.",
                term(a, 1, "x"),
                term(c, 1, "x")
            )),
            FoilPhase::Outer => v.highlight(&["a", "d", "outer"]).narrate(format!(
                "Outer: {} times {} is {outer}.",
                term(a, 1, "x"),
                term(d, 0, "x")
            )),
            FoilPhase::Inner => v.highlight(&["b", "c", "inner"]).narrate(format!(
                "Inner: {} times {} is {inner}.",
                term(b, 0, "x"),
                term(c, 1, "x")
            )),
            FoilPhase::Last => v.highlight(&["b", "d", "last"]).narrate(format!(
                "Last: {} times {} is {last}.",
                term(b, 0, "x"),
                term(d, 0, "x")
            )),
            FoilPhase::Combine => v.highlight(&["outer", "inner", "result"]).narrate(format!(
                "Add the like terms {outer} and {inner} to get {}.",
                term(self.products.middle(), 1, "x")
            )),
            FoilPhase::Complete => v.narrate(format!(
                "{} = {}",
                self.expression(),
                self.products.combined()
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_terms() {
        let p = FoilProducts::of(1.0, -3.0, 1.0, 2.0);
        assert_eq!(p.labels(), ["x²", "2x", "-3x", "-6"].map(String::from));
        assert_eq!(p.combined(), "x² - x - 6");
    }

    #[test]
    fn partial_operands_default_per_field() {
        let l = FoilLesson::new(&ProblemData::from_operands(&[2.0]));
        assert_eq!(l.products().first, 2.0);
        assert_eq!(l.products().last, 6.0);
        assert_eq!(l.expression(), "(2x + 2)(x + 3)");
    }
}
