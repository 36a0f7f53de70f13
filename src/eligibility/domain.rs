use std::fmt;

use serde::{Deserialize, Serialize};

use super::EligibilityError;

/// Normalized subject names used when matching course requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CanonicalSubject {
    Mathematics,
    English,
    #[serde(rename = "Physical Sciences")]
    PhysicalSciences,
    #[serde(rename = "Life Sciences")]
    LifeSciences,
}

impl CanonicalSubject {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Mathematics => "Mathematics",
            Self::English => "English",
            Self::PhysicalSciences => "Physical Sciences",
            Self::LifeSciences => "Life Sciences",
        }
    }
}

impl fmt::Display for CanonicalSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw mark as captured from a transcript or form.
///
/// Forms submit marks as strings while API clients tend to send numbers, so
/// both are accepted and converted on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MarkValue {
    Integer(i64),
    Decimal(f64),
    Text(String),
}

impl MarkValue {
    /// Numeric zero and the empty string count as "no mark"; the string `"0"` does not.
    fn resolve(&self, subject: &str) -> Result<Option<i64>, EligibilityError> {
        match self {
            MarkValue::Integer(0) => Ok(None),
            MarkValue::Integer(value) => Ok(Some(*value)),
            MarkValue::Decimal(value) if *value == 0.0 => Ok(None),
            MarkValue::Decimal(value) if value.is_finite() => Ok(Some(value.trunc() as i64)),
            MarkValue::Decimal(value) => Err(EligibilityError::ValueConversion {
                subject: subject.to_string(),
                value: value.to_string(),
            }),
            MarkValue::Text(raw) if raw.is_empty() => Ok(None),
            MarkValue::Text(raw) => {
                raw.trim()
                    .parse::<i64>()
                    .map(Some)
                    .map_err(|_| EligibilityError::ValueConversion {
                        subject: subject.to_string(),
                        value: raw.clone(),
                    })
            }
        }
    }
}

impl From<i64> for MarkValue {
    fn from(value: i64) -> Self {
        MarkValue::Integer(value)
    }
}

impl From<&str> for MarkValue {
    fn from(value: &str) -> Self {
        MarkValue::Text(value.to_string())
    }
}

/// One subject result on a student's transcript.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Qualification {
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub mark: Option<MarkValue>,
}

impl Qualification {
    pub fn new(subject: impl Into<String>, mark: impl Into<MarkValue>) -> Self {
        Self {
            subject: Some(subject.into()),
            mark: Some(mark.into()),
        }
    }

    /// Subject label, empty when the record carries none.
    pub fn subject_label(&self) -> &str {
        self.subject.as_deref().unwrap_or_default()
    }

    pub fn has_subject(&self) -> bool {
        !self.subject_label().is_empty()
    }

    /// Integer mark, `None` when the record has no mark.
    pub fn mark(&self) -> Result<Option<i64>, EligibilityError> {
        match &self.mark {
            Some(value) => value.resolve(self.subject_label()),
            None => Ok(None),
        }
    }
}

/// Study preferences captured by the career questionnaire.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub career_field: Option<String>,
    #[serde(default)]
    pub location_preference: Option<String>,
    #[serde(default)]
    pub study_mode: Option<String>,
    /// Carried through from the questionnaire; not used for scoring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub financial_aid: Option<serde_json::Value>,
}

impl Preferences {
    /// Number of scored preferences that hold a non-empty answer.
    pub fn answered_count(&self) -> u32 {
        [
            &self.career_field,
            &self.location_preference,
            &self.study_mode,
        ]
        .into_iter()
        .filter(|answer| is_answered(answer))
        .count() as u32
    }

    pub fn career_field(&self) -> Option<&str> {
        self.career_field
            .as_deref()
            .filter(|value| !value.is_empty())
    }
}

fn is_answered(answer: &Option<String>) -> bool {
    answer.as_deref().is_some_and(|value| !value.is_empty())
}
