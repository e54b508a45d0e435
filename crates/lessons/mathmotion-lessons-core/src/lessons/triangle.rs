//! Triangle perimeter and Heron's area.

use mathmotion_timeline_core::PhaseSpec;

use crate::error::LessonError;
use crate::format::num;
use crate::lesson::Lesson;
use crate::problem::ProblemData;
use crate::view::LessonView;

pub const KIND: &str = "triangle";

/// `[a, b, c]`
pub const DEFAULT_OPERANDS: [f64; 3] = [3.0, 4.0, 5.0];

lesson_phases! {
    pub enum TrianglePhase {
        Setup => "setup",
        Sides => "sides": Pop,
        Perimeter => "perimeter": Whoosh,
        SemiPerimeter => "semi_perimeter": Pop,
        Area => "area": Pop,
        Complete => "complete",
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TriangleLesson {
    sides: [f64; 3],
    perimeter: f64,
    semi: f64,
    area: f64,
    right_angle: bool,
}

fn is_right(sides: [f64; 3]) -> bool {
    let mut s = sides;
    s.sort_by(|x, y| x.total_cmp(y));
    let [a, b, c] = s;
    (a * a + b * b - c * c).abs() < 1e-9 * c * c
}

impl TriangleLesson {
    pub fn new(problem: &ProblemData) -> Result<Self, LessonError> {
        let r = problem.reader(KIND);
        let [a, b, c] = [0, 1, 2].map(|i| r.checked(i, DEFAULT_OPERANDS[i]));
        let degenerate = a <= 0.0 || b <= 0.0 || c <= 0.0 || a + b <= c || a + c <= b || b + c <= a;
        if degenerate {
            return Err(LessonError::DegenerateTriangle { a, b, c });
        }
        let perimeter = a + b + c;
        let semi = perimeter / 2.0;
        let area = (semi * (semi - a) * (semi - b) * (semi - c)).sqrt();
        Ok(Self {
            sides: [a, b, c],
            perimeter,
            semi,
            area,
            right_angle: is_right([a, b, c]),
        })
    }

    #[inline]
    pub fn perimeter(&self) -> f64 {
        self.perimeter
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.area
    }

    #[inline]
    pub fn is_right(&self) -> bool {
        self.right_angle
    }
}

impl Lesson for TriangleLesson {
    fn kind(&self) -> &'static str {
        KIND
    }

    fn phases(&self) -> Vec<PhaseSpec> {
        TrianglePhase::specs()
    }

    fn view(&self, index: usize) -> LessonView {
        let phase = TrianglePhase::from_index(index);
        let reached = |p: TrianglePhase| phase.index() >= p.index();
        let [a, b, c] = self.sides;
        let s = self.semi;
        let mut v = LessonView::new(KIND, phase.tag(), phase.index()).show(&["triangle"]);

        if reached(TrianglePhase::Sides) {
            v = v
                .show(&["side-a", "side-b", "side-c"])
                .label("a", num(a))
                .label("b", num(b))
                .label("c", num(c));
        }
        if reached(TrianglePhase::Perimeter) {
            v = v
                .show(&["perimeter"])
                .label("perimeter", num(self.perimeter))
                .value("perimeter", self.perimeter)
                .work_line(format!("{} + {} + {} = {}", num(a), num(b), num(c), num(self.perimeter)));
        }
        if reached(TrianglePhase::SemiPerimeter) {
            v = v
                .show(&["semi-perimeter"])
                .label("semi_perimeter", num(s))
                .value("semi_perimeter", s)
                .work_line(format!("s = {} ÷ 2 = {}", num(self.perimeter), num(s)));
        }
        if reached(TrianglePhase::Area) {
            v = v
                .show(&["area"])
                .label("area", num(self.area))
                .value("area", self.area)
                .work_line(format!(
                    "√({} × {} × {} × {}) = {}",
                    num(s),
                    num(s - a),
                    num(s - b),
                    num(s - c),
                    num(self.area)
                ));
            if self.right_angle {
                v = v.show(&["right-angle"]);
            }
        }

        match phase {
            TrianglePhase::Setup => v.narrate("Let's measure around this triangle and inside it."),
            TrianglePhase::Sides => v.highlight(&["side-a", "side-b", "side-c"]).narrate(format!(
                "The sides are {}, {} and {}.",
                num(a),
                num(b),
                num(c)
            )),
            TrianglePhase::Perimeter => v.highlight(&["perimeter"]).narrate(format!(
                "Walk all the way around: the perimeter is {}.",
                num(self.perimeter)
            )),
            TrianglePhase::SemiPerimeter => v.highlight(&["semi-perimeter"]).narrate(format!(
                "Half of the perimeter is {}. We call it s.",
                num(s)
            )),
            TrianglePhase::Area => {
                let v = v.highlight(&["area"]);
                if self.right_angle {
                    v.narrate(format!(
                        "Heron's formula gives {}. It's a right triangle, so half of base times height agrees!",
                        num(self.area)
                    ))
                } else {
                    v.narrate(format!("Heron's formula gives an area of {}.", num(self.area)))
                }
            }
            TrianglePhase::Complete => v.narrate(format!(
                "Perimeter {}, area {}.",
                num(self.perimeter),
                num(self.area)
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_four_five() {
        let t = TriangleLesson::new(&ProblemData::default()).unwrap();
        assert_eq!(t.perimeter(), 12.0);
        assert!((t.area() - 6.0).abs() < 1e-12);
        assert!(t.is_right());
    }

    #[test]
    fn degenerate_and_non_positive() {
        for sides in [[1.0, 2.0, 3.0], [0.0, 4.0, 5.0], [-3.0, 4.0, 5.0], [1.0, 1.0, 10.0]] {
            let err = TriangleLesson::new(&ProblemData::from_operands(&sides)).unwrap_err();
            assert!(matches!(err, LessonError::DegenerateTriangle { .. }));
        }
    }

    #[test]
    fn equilateral_is_not_right() {
        let t = TriangleLesson::new(&ProblemData::from_operands(&[2.0, 2.0, 2.0])).unwrap();
        assert!(!t.is_right());
        assert!((t.area() - 3f64.sqrt()).abs() < 1e-12);
    }
}
