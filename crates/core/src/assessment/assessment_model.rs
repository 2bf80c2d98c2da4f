//! Assessment domain models.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{Error, Result, ValidationError};

/// The kind of person a record or questionnaire is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectType {
    Mother,
    Child,
}

impl SubjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubjectType::Mother => "mother",
            SubjectType::Child => "child",
        }
    }
}

impl fmt::Display for SubjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubjectType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "mother" => Ok(SubjectType::Mother),
            "child" => Ok(SubjectType::Child),
            other => Err(Error::invalid_input(format!(
                "Unknown subject type '{}'",
                other
            ))),
        }
    }
}

/// BMI band. Thresholds differ between mothers and children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    /// Used when no BMI could be computed.
    #[default]
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Underweight and obese bands count as a risk factor.
    pub fn is_risk(&self) -> bool {
        matches!(self, BmiCategory::Underweight | BmiCategory::Obese)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "underweight",
            BmiCategory::Normal => "normal",
            BmiCategory::Overweight => "overweight",
            BmiCategory::Obese => "obese",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BmiCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "underweight" => Ok(BmiCategory::Underweight),
            "normal" => Ok(BmiCategory::Normal),
            "overweight" => Ok(BmiCategory::Overweight),
            "obese" => Ok(BmiCategory::Obese),
            other => Err(Error::invalid_input(format!(
                "Unknown BMI category '{}'",
                other
            ))),
        }
    }
}

/// A computed BMI and its band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BmiResult {
    /// Rounded to two decimal places.
    pub bmi: Decimal,
    pub category: BmiCategory,
}

/// Overall health classification derived from counted risk factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    #[default]
    Healthy,
    NeedsAttention,
    Critical,
}

impl HealthStatus {
    /// 0 factors is healthy, 1-2 needs attention, 3 or more is critical.
    pub fn from_risk_factors(risk_factors: usize) -> Self {
        match risk_factors {
            0 => HealthStatus::Healthy,
            1 | 2 => HealthStatus::NeedsAttention,
            _ => HealthStatus::Critical,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "healthy",
            HealthStatus::NeedsAttention => "needs_attention",
            HealthStatus::Critical => "critical",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HealthStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "healthy" => Ok(HealthStatus::Healthy),
            "needs_attention" => Ok(HealthStatus::NeedsAttention),
            "critical" => Ok(HealthStatus::Critical),
            other => Err(Error::invalid_input(format!(
                "Unknown health status '{}'",
                other
            ))),
        }
    }
}

/// Questionnaire answers keyed by question id.
///
/// Radio answers are strings; measurements may arrive either as JSON
/// numbers or as numeric strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Answers(BTreeMap<String, Value>);

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, question_id: impl Into<String>, answer: impl Into<Value>) {
        self.0.insert(question_id.into(), answer.into());
    }

    /// Builder-style insert, handy when assembling answers in one expression.
    pub fn with(mut self, question_id: impl Into<String>, answer: impl Into<Value>) -> Self {
        self.insert(question_id, answer);
        self
    }

    pub fn get(&self, question_id: &str) -> Option<&Value> {
        self.0.get(question_id)
    }

    /// The answer as text, if it is a JSON string.
    pub fn text(&self, question_id: &str) -> Option<&str> {
        self.0.get(question_id).and_then(Value::as_str)
    }

    /// True when the question has a non-null, non-blank answer.
    pub fn is_answered(&self, question_id: &str) -> bool {
        match self.0.get(question_id) {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.trim().is_empty(),
            Some(_) => true,
        }
    }

    /// Parses a numeric answer. Blank or missing answers yield `None`.
    pub fn measurement(&self, question_id: &str) -> Result<Option<Decimal>> {
        let raw = match self.0.get(question_id) {
            None | Some(Value::Null) => return Ok(None),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
            Some(Value::String(s)) => s.trim().to_string(),
            Some(other) => {
                return Err(Error::Validation(ValidationError::InvalidInput(format!(
                    "Answer '{}' must be a number, got {}",
                    question_id, other
                ))))
            }
        };

        Decimal::from_str(&raw)
            .or_else(|_| Decimal::from_scientific(&raw))
            .map(Some)
            .map_err(|_| {
                Error::Validation(ValidationError::InvalidInput(format!(
                    "Answer '{}' is not a number: {}",
                    question_id, raw
                )))
            })
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Answers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Answers(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Outcome of assessing one questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub bmi: Option<BmiResult>,
    pub risk_factors: usize,
    pub health_status: HealthStatus,
}
