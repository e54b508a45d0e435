//! Period and amplitude of `A·sin(bx)`.

use std::f64::consts::TAU;

use mathmotion_timeline_core::PhaseSpec;

use crate::error::LessonError;
use crate::format::{num, pi_multiple};
use crate::lesson::Lesson;
use crate::problem::ProblemData;
use crate::view::LessonView;

pub const KIND: &str = "trig_period";

/// `[amplitude, b]` for `A·sin(bx)`
pub const DEFAULT_OPERANDS: [f64; 2] = [1.0, 2.0];

/// Samples per curve for renderers that plot from the view.
const CURVE_SAMPLES: usize = 8;

lesson_phases! {
    pub enum TrigPeriodPhase {
        Setup => "setup",
        BaseCurve => "base_curve": Whoosh,
        Stretch => "stretch": Whoosh,
        Period => "period": Pop,
        Amplitude => "amplitude": Pop,
        Complete => "complete",
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TrigPeriodLesson {
    amplitude: f64,
    b: f64,
    period: f64,
}

impl TrigPeriodLesson {
    pub fn new(problem: &ProblemData) -> Result<Self, LessonError> {
        let r = problem.reader(KIND);
        let amplitude = r.number(0, DEFAULT_OPERANDS[0], |a| a != 0.0);
        let b = r.checked(1, DEFAULT_OPERANDS[1]);
        if b == 0.0 {
            return Err(LessonError::ZeroPeriodMultiplier);
        }
        Ok(Self {
            amplitude,
            b,
            period: TAU / b.abs(),
        })
    }

    #[inline]
    pub fn period(&self) -> f64 {
        self.period
    }

    #[inline]
    pub fn amplitude(&self) -> f64 {
        self.amplitude.abs()
    }

    pub fn formula(&self) -> String {
        let a = match num(self.amplitude).as_str() {
            "1" => String::new(),
            "-1" => "-".to_string(),
            other => format!("{other}·"),
        };
        let b = match num(self.b).as_str() {
            "1" => String::new(),
            "-1" => "-".to_string(),
            other => other.to_string(),
        };
        format!("y = {a}sin({b}x)")
    }

    /// `y` at evenly spaced points across one period.
    pub fn samples(&self) -> Vec<f64> {
        (0..=CURVE_SAMPLES)
            .map(|i| {
                let x = self.period * i as f64 / CURVE_SAMPLES as f64;
                self.amplitude * (self.b * x).sin()
            })
            .collect()
    }
}

impl Lesson for TrigPeriodLesson {
    fn kind(&self) -> &'static str {
        KIND
    }

    fn phases(&self) -> Vec<PhaseSpec> {
        TrigPeriodPhase::specs()
    }

    fn view(&self, index: usize) -> LessonView {
        let phase = TrigPeriodPhase::from_index(index);
        let reached = |p: TrigPeriodPhase| phase.index() >= p.index();
        let mut v = LessonView::new(KIND, phase.tag(), phase.index())
            .show(&["axes", "formula"])
            .label("formula", self.formula());

        if reached(TrigPeriodPhase::BaseCurve) {
            v = v.show(&["base-curve"]).label("base_period", "2π");
        }
        if reached(TrigPeriodPhase::Stretch) {
            v = v.show(&["curve"]).value("b", self.b);
            for (i, y) in self.samples().into_iter().enumerate() {
                v = v.value(&format!("sample_{i}"), y);
            }
        }
        if reached(TrigPeriodPhase::Period) {
            v = v
                .show(&["period-bracket"])
                .label("period", pi_multiple(self.period))
                .value("period", self.period);
        }
        if reached(TrigPeriodPhase::Amplitude) {
            v = v
                .show(&["amplitude-bracket"])
                .label("amplitude", num(self.amplitude()))
                .value("amplitude", self.amplitude());
        }

        match phase {
            TrigPeriodPhase::Setup => {
                v.narrate(format!("Let's see how {} repeats.", self.formula()))
            }
            TrigPeriodPhase::BaseCurve => v
                .highlight(&["base-curve"])
                .narrate("Plain sin(x) repeats every 2π."),
            TrigPeriodPhase::Stretch => {
                let how = if self.b.abs() > 1.0 {
                    "squeezes the wave so it repeats faster"
                } else if self.b.abs() < 1.0 {
                    "stretches the wave so it repeats slower"
                } else {
                    "keeps the same spacing"
                };
                v.highlight(&["curve"])
                    .narrate(format!("Multiplying x by {} {how}.", num(self.b)))
            }
            TrigPeriodPhase::Period => v.highlight(&["period-bracket"]).narrate(format!(
                "Period = 2π ÷ {} = {}.",
                num(self.b.abs()),
                pi_multiple(self.period)
            )),
            TrigPeriodPhase::Amplitude => v.highlight(&["amplitude-bracket"]).narrate(format!(
                "The wave goes up to {} and down to -{}.",
                num(self.amplitude()),
                num(self.amplitude())
            )),
            TrigPeriodPhase::Complete => v.narrate(format!(
                "{} has period {} and amplitude {}.",
                self.formula(),
                pi_multiple(self.period),
                num(self.amplitude())
            )),
        }
    }
}
