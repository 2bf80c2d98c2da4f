//! Screening domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::analysis_model::{MedicalReadings, PostureAnalysis, SkinAssessment};
use crate::assessment::SubjectType;
use crate::errors::{Error, Result, ValidationError};
use crate::mothers::RiskLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisType {
    Skin,
    Posture,
    General,
    Combined,
}

impl AnalysisType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisType::Skin => "skin",
            AnalysisType::Posture => "posture",
            AnalysisType::General => "general",
            AnalysisType::Combined => "combined",
        }
    }
}

impl fmt::Display for AnalysisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "skin" => Ok(AnalysisType::Skin),
            "posture" => Ok(AnalysisType::Posture),
            "general" => Ok(AnalysisType::General),
            "combined" => Ok(AnalysisType::Combined),
            other => Err(Error::invalid_input(format!(
                "Unknown analysis type '{}'",
                other
            ))),
        }
    }
}

/// A stored screening result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Screening {
    pub id: String,
    pub person_id: String,
    pub person_type: SubjectType,
    pub image_url: Option<String>,
    /// Raw analysis payloads keyed by analysis (`skin`, `posture`, `medicalReadings`).
    pub analysis_results: Value,
    pub analysis_type: AnalysisType,
    pub condition: Option<String>,
    pub notes: Option<String>,
    pub risk_level: RiskLevel,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewScreening {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub person_id: String,
    pub person_type: SubjectType,
    pub image_url: Option<String>,
    #[serde(default)]
    pub analysis_results: Value,
    pub analysis_type: AnalysisType,
    pub condition: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub risk_level: RiskLevel,
}

impl NewScreening {
    pub fn validate(&self) -> Result<()> {
        if self.person_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "personId".to_string(),
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreeningUpdate {
    pub id: Option<String>,
    pub image_url: Option<String>,
    pub analysis_results: Value,
    pub analysis_type: AnalysisType,
    pub condition: Option<String>,
    pub notes: Option<String>,
    pub risk_level: RiskLevel,
}

impl ScreeningUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.id.is_none() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Screening ID is required for updates".to_string(),
            )));
        }
        Ok(())
    }
}

/// Child fields written together with a child screening's records.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildConditionsUpdate {
    pub child_id: String,
    /// `None` keeps the stored value.
    pub skin_condition: Option<String>,
    pub posture_condition: Option<String>,
    pub screened_on: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreeningStats {
    pub total: usize,
    /// Screenings created within the last seven days.
    pub recent: usize,
}

/// Result of screening a child: both analyses and every record written.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChildScreeningOutcome {
    pub skin: SkinAssessment,
    pub posture: PostureAnalysis,
    pub screenings: Vec<Screening>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MotherScreeningOutcome {
    pub medical_readings: MedicalReadings,
    pub screenings: Vec<Screening>,
}
