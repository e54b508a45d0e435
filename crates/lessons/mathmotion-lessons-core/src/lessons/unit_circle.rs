//! Unit circle: sweep an angle, drop the reference triangle, read off cos and sin.

use mathmotion_timeline_core::PhaseSpec;

use crate::format::{fixed, num};
use crate::lesson::Lesson;
use crate::problem::ProblemData;
use crate::view::LessonView;

pub const KIND: &str = "unit_circle";

/// `[degrees]`
pub const DEFAULT_OPERANDS: [f64; 1] = [30.0];

lesson_phases! {
    pub enum UnitCirclePhase {
        Setup => "setup",
        Angle => "angle": Whoosh,
        Triangle => "triangle": Pop,
        Values => "values": Pop,
        Identity => "identity": Pop,
        Complete => "complete",
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct UnitCircleLesson {
    degrees: f64,
    radians: f64,
    cos: f64,
    sin: f64,
    quadrant: u8,
}

/// Quadrant 1-4; angles on an axis report 0.
fn quadrant(normalized: f64) -> u8 {
    match normalized {
        d if d % 90.0 == 0.0 => 0,
        d if d < 90.0 => 1,
        d if d < 180.0 => 2,
        d if d < 270.0 => 3,
        _ => 4,
    }
}

impl UnitCircleLesson {
    pub fn new(problem: &ProblemData) -> Self {
        let degrees = problem
            .reader(KIND)
            .number(0, DEFAULT_OPERANDS[0], |d| d.abs() <= 3600.0);
        let radians = degrees.to_radians();
        let normalized = degrees.rem_euclid(360.0);
        Self {
            degrees,
            radians,
            cos: radians.cos(),
            sin: radians.sin(),
            quadrant: quadrant(normalized),
        }
    }

    #[inline]
    pub fn cos(&self) -> f64 {
        self.cos
    }

    #[inline]
    pub fn sin(&self) -> f64 {
        self.sin
    }

    #[inline]
    pub fn identity(&self) -> f64 {
        self.sin * self.sin + self.cos * self.cos
    }

    /// Point on the circle as SVG-ish coordinates (y up).
    pub fn point(&self) -> (f64, f64) {
        (self.cos, self.sin)
    }
}

impl Lesson for UnitCircleLesson {
    fn kind(&self) -> &'static str {
        KIND
    }

    fn phases(&self) -> Vec<PhaseSpec> {
        UnitCirclePhase::specs()
    }

    fn view(&self, index: usize) -> LessonView {
        let phase = UnitCirclePhase::from_index(index);
        let reached = |p: UnitCirclePhase| phase.index() >= p.index();
        let mut v = LessonView::new(KIND, phase.tag(), phase.index())
            .show(&["circle", "axes"])
            .label("angle", format!("{}°", num(self.degrees)));

        if reached(UnitCirclePhase::Angle) {
            let (x, y) = self.point();
            v = v
                .show(&["ray", "arc", "point"])
                .value("degrees", self.degrees)
                .value("radians", self.radians)
                .value("point_x", x)
                .value("point_y", y)
                .label("radians", num(self.radians))
                .value("quadrant", self.quadrant as f64);
        }
        if reached(UnitCirclePhase::Triangle) {
            v = v.show(&["triangle", "adjacent", "opposite"]);
        }
        if reached(UnitCirclePhase::Values) {
            v = v
                .show(&["cos-label", "sin-label"])
                .label("cos", fixed(self.cos, 3))
                .label("sin", fixed(self.sin, 3))
                .value("cos", self.cos)
                .value("sin", self.sin);
        }
        if reached(UnitCirclePhase::Identity) {
            v = v
                .show(&["identity"])
                .label("identity", "sin²θ + cos²θ = 1")
                .value("identity", self.identity());
        }

        match phase {
            UnitCirclePhase::Setup => {
                v.narrate("This circle has radius 1. Its center is at (0, 0).")
            }
            UnitCirclePhase::Angle => v.highlight(&["arc"]).narrate(format!(
                "Turn {}° counter-clockwise from the positive x-axis.",
                num(self.degrees)
            )),
            UnitCirclePhase::Triangle => v
                .highlight(&["triangle"])
                .narrate("Drop a line straight down to the x-axis to make a right triangle."),
            UnitCirclePhase::Values => v.highlight(&["cos-label", "sin-label"]).narrate(format!(
                "The point is ({}, {}): cos is the x value and sin is the y value.",
                fixed(self.cos, 3),
                fixed(self.sin, 3)
            )),
            UnitCirclePhase::Identity => v.highlight(&["identity"]).narrate(format!(
                "{}² + {}² = 1, because the radius is 1.",
                fixed(self.sin, 3),
                fixed(self.cos, 3)
            )),
            UnitCirclePhase::Complete => v.narrate(format!(
                "cos {}° = {} and sin {}° = {}.",
                num(self.degrees),
                fixed(self.cos, 3),
                num(self.degrees),
                fixed(self.sin, 3)
            )),
        }
    }
}
