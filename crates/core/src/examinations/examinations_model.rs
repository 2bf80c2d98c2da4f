//! Examination domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::assessment::{Answers, BmiCategory, HealthStatus, SubjectType};
use crate::errors::{Error, Result, ValidationError};

/// A completed questionnaire run with its assessment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Examination {
    pub id: String,
    pub person_id: String,
    pub person_type: SubjectType,
    pub answers: Answers,
    pub bmi: Option<Decimal>,
    pub bmi_category: Option<BmiCategory>,
    pub health_status: HealthStatus,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExamination {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub person_id: String,
    pub person_type: SubjectType,
    pub answers: Answers,
    pub bmi: Option<Decimal>,
    pub bmi_category: Option<BmiCategory>,
    pub health_status: HealthStatus,
    pub notes: Option<String>,
}

impl NewExamination {
    pub fn validate(&self) -> Result<()> {
        if self.person_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "personId".to_string(),
            )));
        }
        if self.bmi.is_some() != self.bmi_category.is_some() {
            return Err(Error::invalid_input(
                "BMI and BMI category must be given together",
            ));
        }
        Ok(())
    }
}

/// Corrections to a stored examination. Person and timestamp are fixed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExaminationUpdate {
    pub id: Option<String>,
    pub answers: Answers,
    pub bmi: Option<Decimal>,
    pub bmi_category: Option<BmiCategory>,
    pub health_status: HealthStatus,
    pub notes: Option<String>,
}

impl ExaminationUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.id.is_none() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Examination ID is required for updates".to_string(),
            )));
        }
        if self.bmi.is_some() != self.bmi_category.is_some() {
            return Err(Error::invalid_input(
                "BMI and BMI category must be given together",
            ));
        }
        Ok(())
    }
}
