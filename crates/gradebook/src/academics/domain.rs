use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub const MIN_GRADE: f64 = 0.0;
pub const MAX_GRADE: f64 = 20.0;
pub const MIN_COEFFICIENT: f64 = 0.5;
pub const DEFAULT_COEFFICIENT: f64 = 1.0;
pub const DEFAULT_SUBJECT_NAME: &str = "New subject";

pub const MIN_TARGET_AVERAGE: f64 = 10.0;
pub const MAX_TARGET_AVERAGE: f64 = 20.0;
pub const DEFAULT_TARGET_AVERAGE: f64 = 15.0;

/// Grading period within an academic year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Term {
    #[default]
    First,
    Second,
}

impl Term {
    pub const fn ordered() -> [Self; 2] {
        [Self::First, Self::Second]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::First => "First term",
            Self::Second => "Second term",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "first" | "1" | "s1" => Some(Self::First),
            "second" | "2" | "s2" => Some(Self::Second),
            _ => None,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Opaque identifier, stable for the lifetime of a subject record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(pub String);

impl SubjectId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named, weighted, optionally graded unit of coursework.
///
/// `coefficient >= 0.5` and, when set, `0 <= grade <= 20` hold after every
/// mutation made through this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectRecord {
    pub id: SubjectId,
    pub name: String,
    pub coefficient: f64,
    pub grade: Option<f64>,
}

impl SubjectRecord {
    pub fn new(name: impl Into<String>, coefficient: f64) -> Self {
        Self {
            id: SubjectId::generate(),
            name: name.into(),
            coefficient: normalize_coefficient(coefficient),
            grade: None,
        }
    }

    /// Record created by an explicit user addition.
    pub fn blank() -> Self {
        Self::new(DEFAULT_SUBJECT_NAME, DEFAULT_COEFFICIENT)
    }

    pub fn with_grade(mut self, grade: f64) -> Self {
        self.set_grade_value(Some(grade));
        self
    }

    pub fn is_graded(&self) -> bool {
        self.grade.is_some()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_coefficient(&mut self, raw: &str) {
        self.coefficient = parse_coefficient(raw);
    }

    pub fn set_coefficient_value(&mut self, value: f64) {
        self.coefficient = normalize_coefficient(value);
    }

    pub fn set_grade(&mut self, raw: &str) {
        self.grade = parse_grade(raw);
    }

    pub fn set_grade_value(&mut self, value: Option<f64>) {
        self.grade = value.and_then(clamp_grade);
    }

    /// Re-applies the record invariants, e.g. after deserializing a snapshot.
    pub fn sanitize(&mut self) {
        self.coefficient = normalize_coefficient(self.coefficient);
        self.grade = self.grade.and_then(clamp_grade);
    }
}

/// Clamps a grade into `[0, 20]`. NaN has no meaningful position on the
/// scale and resolves to unset.
pub fn clamp_grade(value: f64) -> Option<f64> {
    if value.is_nan() {
        None
    } else {
        Some(value.clamp(MIN_GRADE, MAX_GRADE))
    }
}

/// Empty input clears the grade; anything else is parsed then clamped.
///
/// The whole trimmed text must be a number. Partial numeric text such as
/// `"12,5"` or `"14abc"` is rejected and leaves the grade unset.
pub fn parse_grade(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().and_then(clamp_grade)
}

pub fn normalize_coefficient(value: f64) -> f64 {
    if value.is_finite() {
        value.max(MIN_COEFFICIENT)
    } else {
        DEFAULT_COEFFICIENT
    }
}

/// Unparseable input, including partial numeric text like `"2,5"`, falls
/// back to the default weight of 1.
pub fn parse_coefficient(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .map(normalize_coefficient)
        .unwrap_or(DEFAULT_COEFFICIENT)
}

pub fn clamp_target_average(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(MIN_TARGET_AVERAGE, MAX_TARGET_AVERAGE)
    } else {
        DEFAULT_TARGET_AVERAGE
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GradebookError {
    #[error("education level '{0}' not found in catalog")]
    LevelNotFound(String),
    #[error("year '{year_id}' not found for level '{level_id}'")]
    YearNotFound { level_id: String, year_id: String },
    #[error("subject {id} not found in {term}")]
    SubjectNotFound { term: Term, id: SubjectId },
}
