//! ProblemData: the numeric input a lesson illustrates.
//!
//! Operand arrays come from external problem selection and are often
//! partial. Deserialization is lenient: numbers and numeric strings are
//! kept, anything else becomes a hole that the lesson fills with its own
//! default for that field.

use log::warn;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value as JsonValue};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    Root,
}

/// Expected answer as supplied by the problem source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Number(f64),
    Text(String),
}

impl Answer {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemData {
    #[serde(default, deserialize_with = "lenient_operands")]
    pub operands: Vec<Option<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<Answer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Map<String, JsonValue>>,
}

fn lenient_operands<'de, D>(de: D) -> Result<Vec<Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<JsonValue>>::deserialize(de)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .map(|v| match v {
            JsonValue::Number(n) => n.as_f64(),
            JsonValue::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        })
        .collect())
}

impl ProblemData {
    pub fn from_operands(values: &[f64]) -> Self {
        Self {
            operands: values.iter().copied().map(Some).collect(),
            ..Self::default()
        }
    }

    #[inline]
    pub fn with_operation(mut self, op: Operation) -> Self {
        self.operation = Some(op);
        self
    }

    #[inline]
    pub fn with_answer(mut self, answer: Answer) -> Self {
        self.correct_answer = Some(answer);
        self
    }

    pub fn with_context(mut self, key: &str, value: JsonValue) -> Self {
        self.context
            .get_or_insert_with(Map::new)
            .insert(key.to_string(), value);
        self
    }

    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Finite value at `index`, if present.
    pub fn operand(&self, index: usize) -> Option<f64> {
        self.operands
            .get(index)
            .copied()
            .flatten()
            .filter(|v| v.is_finite())
    }

    pub fn context_f64(&self, key: &str) -> Option<f64> {
        self.context
            .as_ref()?
            .get(key)?
            .as_f64()
            .filter(|v| v.is_finite())
    }

    /// Compare a computed result with the supplied answer, if any.
    pub fn answer_matches(&self, computed: f64) -> Option<bool> {
        let expected = self.correct_answer.as_ref()?.as_f64()?;
        Some((expected - computed).abs() < 1e-6)
    }

    pub fn reader(&self, lesson: &'static str) -> OperandReader<'_> {
        OperandReader {
            problem: self,
            lesson,
        }
    }
}

/// Per-field operand access with default substitution.
#[derive(Clone, Copy, Debug)]
pub struct OperandReader<'a> {
    problem: &'a ProblemData,
    lesson: &'static str,
}

impl<'a> OperandReader<'a> {
    /// Operand `index` if present and accepted by `valid`, else `default`.
    pub fn number(&self, index: usize, default: f64, valid: impl Fn(f64) -> bool) -> f64 {
        match self.problem.operand(index) {
            Some(v) if valid(v) => v,
            Some(v) => {
                warn!(
                    "{}: operand {} = {} out of range, using default {}",
                    self.lesson, index, v, default
                );
                default
            }
            None => default,
        }
    }

    /// Integer operand in `[min, max]`; non-integers count as out of range.
    pub fn integer(&self, index: usize, default: i64, min: i64, max: i64) -> i64 {
        self.number(index, default as f64, |v| {
            v.fract() == 0.0 && v >= min as f64 && v <= max as f64
        }) as i64
    }

    /// Operand `index` for fields whose bad values are reported, not defaulted.
    /// Only a missing value falls back to `default`.
    pub fn checked(&self, index: usize, default: f64) -> f64 {
        self.problem.operand(index).unwrap_or(default)
    }

    #[inline]
    pub fn problem(&self) -> &'a ProblemData {
        self.problem
    }
}
