//! Integer addition with unit tiles: a +1 and a -1 tile cancel as a zero pair.
//!
//! Every cancellation depends on what is left on the mat, so the pairs are
//! produced by a fold over the mat state and each phase shows the mat after
//! that many pairs.

use mathmotion_timeline_core::{PhaseSpec, SoundCue};
use serde::{Deserialize, Serialize};

use crate::format::num;
use crate::lesson::Lesson;
use crate::problem::ProblemData;
use crate::view::LessonView;

pub const KIND: &str = "algebra_tiles";

/// `[positive, negative]` tile counts
pub const DEFAULT_OPERANDS: [f64; 2] = [5.0, 3.0];

const MAX_TILES: i64 = 20;

/// Tiles on the mat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mat {
    pub positive: u32,
    pub negative: u32,
}

impl Mat {
    #[inline]
    pub fn value(&self) -> i64 {
        i64::from(self.positive) - i64::from(self.negative)
    }

    #[inline]
    pub fn can_pair(&self) -> bool {
        self.positive > 0 && self.negative > 0
    }
}

/// One zero-pair removal and the mat it leaves behind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZeroPair {
    /// 1-based pair number.
    pub pair: u32,
    pub after: Mat,
}

/// Remove zero pairs until one color is gone.
pub fn cancel_pairs(start: Mat) -> Vec<ZeroPair> {
    let pairs = start.positive.min(start.negative);
    (1..=pairs)
        .fold((Vec::new(), start), |(mut log, mat), pair| {
            let after = Mat {
                positive: mat.positive - 1,
                negative: mat.negative - 1,
            };
            log.push(ZeroPair { pair, after });
            (log, after)
        })
        .0
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TilesPhase {
    Setup,
    PlacePositive,
    PlaceNegative,
    /// Zero-based pair.
    Pair(usize),
    Result,
    Complete,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AlgebraTilesLesson {
    start: Mat,
    log: Vec<ZeroPair>,
    check: Option<bool>,
}

impl AlgebraTilesLesson {
    pub fn new(problem: &ProblemData) -> Self {
        let r = problem.reader(KIND);
        let positive = r.integer(0, DEFAULT_OPERANDS[0] as i64, 0, MAX_TILES) as u32;
        let negative = r.integer(1, DEFAULT_OPERANDS[1] as i64, 0, MAX_TILES) as u32;
        let start = Mat { positive, negative };
        let log = cancel_pairs(start);
        Self {
            start,
            log,
            check: problem.answer_matches(start.value() as f64),
        }
    }

    #[inline]
    pub fn pairs(&self) -> &[ZeroPair] {
        &self.log
    }

    #[inline]
    pub fn result(&self) -> i64 {
        self.start.value()
    }

    pub fn phase_at(&self, index: usize) -> TilesPhase {
        let k = self.log.len();
        match index {
            0 => TilesPhase::Setup,
            1 => TilesPhase::PlacePositive,
            2 => TilesPhase::PlaceNegative,
            i if i < 3 + k => TilesPhase::Pair(i - 3),
            i if i == 3 + k => TilesPhase::Result,
            _ => TilesPhase::Complete,
        }
    }

    /// Mat after the first `removed` pairs.
    fn mat_after(&self, removed: usize) -> Mat {
        match removed {
            0 => self.start,
            n => self.log[n - 1].after,
        }
    }

    fn equation(&self) -> String {
        format!(
            "{} + ({}) = {}",
            self.start.positive,
            -i64::from(self.start.negative),
            self.result()
        )
    }
}

impl Lesson for AlgebraTilesLesson {
    fn kind(&self) -> &'static str {
        KIND
    }

    fn phases(&self) -> Vec<PhaseSpec> {
        let mut phases = vec![
            PhaseSpec::new("setup"),
            PhaseSpec::new("place_positive").with_cue(SoundCue::Pop),
            PhaseSpec::new("place_negative").with_cue(SoundCue::Pop),
        ];
        phases.extend(
            self.log
                .iter()
                .map(|p| PhaseSpec::new(format!("pair-{}", p.pair)).with_cue(SoundCue::Pop)),
        );
        phases.push(PhaseSpec::new("result").with_cue(SoundCue::Whoosh));
        phases.push(PhaseSpec::new("complete"));
        phases
    }

    fn view(&self, index: usize) -> LessonView {
        let phase = self.phase_at(index);
        let k = self.log.len();
        let (tag, phase_index) = match phase {
            TilesPhase::Setup => ("setup".to_string(), 0),
            TilesPhase::PlacePositive => ("place_positive".to_string(), 1),
            TilesPhase::PlaceNegative => ("place_negative".to_string(), 2),
            TilesPhase::Pair(i) => (format!("pair-{}", i + 1), i + 3),
            TilesPhase::Result => ("result".to_string(), k + 3),
            TilesPhase::Complete => ("complete".to_string(), k + 4),
        };
        let removed = match phase {
            TilesPhase::Pair(i) => i + 1,
            TilesPhase::Result | TilesPhase::Complete => k,
            _ => 0,
        };
        let mat = self.mat_after(removed);
        let mut v = LessonView::new(KIND, &tag, phase_index).show(&["mat"]);

        if phase_index >= 1 {
            v = v
                .show(&["positive-tiles"])
                .value("positive", f64::from(mat.positive));
        }
        if phase_index >= 2 {
            v = v
                .show(&["negative-tiles"])
                .value("negative", f64::from(mat.negative));
        }
        if removed > 0 {
            v = v
                .show(&["zero-pairs"])
                .value("pairs_removed", removed as f64)
                .work_lines(self.log[..removed].iter().map(|p| {
                    format!(
                        "pair {}: +1 and -1 make 0 ({} left)",
                        p.pair,
                        p.after.value()
                    )
                }));
        }

        match phase {
            TilesPhase::Setup => v.narrate("Yellow tiles are +1. Red tiles are -1."),
            TilesPhase::PlacePositive => v.highlight(&["positive-tiles"]).narrate(format!(
                "Put down {} yellow tiles.",
                self.start.positive
            )),
            TilesPhase::PlaceNegative => v.highlight(&["negative-tiles"]).narrate(format!(
                "Put down {} red tiles.",
                self.start.negative
            )),
            TilesPhase::Pair(i) => {
                let id = format!("pair-{}", i + 1);
                v.show_owned(id.clone())
                    .highlight(&[id.as_str()])
                    .narrate("A yellow and a red tile make zero. Take them away!")
            }
            TilesPhase::Result => {
                let v = v
                    .show(&["answer"])
                    .highlight(&["answer"])
                    .label("answer", num(self.result() as f64))
                    .value("answer", self.result() as f64);
                if mat.positive == 0 && mat.negative == 0 {
                    v.narrate("Everything cancelled, so the answer is 0.")
                } else if mat.positive > 0 {
                    v.narrate(format!("{} yellow tiles are left: +{}.", mat.positive, mat.positive))
                } else {
                    v.narrate(format!("{} red tiles are left: -{}.", mat.negative, mat.negative))
                }
            }
            TilesPhase::Complete => {
                let v = v
                    .show(&["answer"])
                    .label("answer", num(self.result() as f64))
                    .label("equation", self.equation())
                    .value("answer", self.result() as f64);
                let v = match self.check {
                    Some(ok) => v.label("check", if ok { "correct" } else { "different" }),
                    None => v,
                };
                v.narrate(self.equation())
            }
        }
    }
}
