//! Declarative view descriptions produced by lessons.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ErrorPanel;

/// What the renderer should show for one phase. Element ids are lesson
/// specific (`"terms"`, `"curve"`, `"tile-3"`); labels and values keep
/// insertion order so renderers can list them as-is.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LessonView {
    pub lesson: String,
    pub phase: String,
    pub phase_index: usize,
    pub narration: String,
    #[serde(default)]
    pub visible: Vec<String>,
    #[serde(default)]
    pub highlighted: Vec<String>,
    #[serde(default)]
    pub labels: IndexMap<String, String>,
    #[serde(default)]
    pub values: IndexMap<String, f64>,
    #[serde(default)]
    pub work: Vec<String>,
}

impl LessonView {
    pub fn new(lesson: &str, phase: &str, phase_index: usize) -> Self {
        Self {
            lesson: lesson.to_string(),
            phase: phase.to_string(),
            phase_index,
            narration: String::new(),
            visible: Vec::new(),
            highlighted: Vec::new(),
            labels: IndexMap::new(),
            values: IndexMap::new(),
            work: Vec::new(),
        }
    }

    pub fn narrate(mut self, text: impl Into<String>) -> Self {
        self.narration = text.into();
        self
    }

    pub fn show(mut self, ids: &[&str]) -> Self {
        for id in ids {
            if !self.visible.iter().any(|v| v == id) {
                self.visible.push((*id).to_string());
            }
        }
        self
    }

    pub fn show_owned(mut self, id: String) -> Self {
        if !self.visible.contains(&id) {
            self.visible.push(id);
        }
        self
    }

    pub fn highlight(mut self, ids: &[&str]) -> Self {
        for id in ids {
            self.highlighted.push((*id).to_string());
        }
        self
    }

    pub fn label(mut self, key: &str, text: impl Into<String>) -> Self {
        self.labels.insert(key.to_string(), text.into());
        self
    }

    pub fn value(mut self, key: &str, v: f64) -> Self {
        self.values.insert(key.to_string(), v);
        self
    }

    pub fn work_line(mut self, line: impl Into<String>) -> Self {
        self.work.push(line.into());
        self
    }

    pub fn work_lines(mut self, lines: impl IntoIterator<Item = String>) -> Self {
        self.work.extend(lines);
        self
    }

    #[inline]
    pub fn is_visible(&self, id: &str) -> bool {
        self.visible.iter().any(|v| v == id)
    }

    #[inline]
    pub fn is_highlighted(&self, id: &str) -> bool {
        self.highlighted.iter().any(|v| v == id)
    }
}

/// What a mounted lesson currently renders.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "view", rename_all = "snake_case")]
pub enum Rendered {
    /// Animated view for the current phase.
    Lesson(LessonView),
    /// Reduced-motion picture of the finished explanation.
    Static(LessonView),
    Error(ErrorPanel),
}

impl Rendered {
    pub fn lesson_view(&self) -> Option<&LessonView> {
        match self {
            Self::Lesson(v) | Self::Static(v) => Some(v),
            Self::Error(_) => None,
        }
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}
