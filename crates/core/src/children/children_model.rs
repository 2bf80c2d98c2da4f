//! Child domain models.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::assessment::HealthStatus;
use crate::constants::DEFAULT_TOTAL_VACCINES;
use crate::errors::{Error, Result, ValidationError};

/// Domain model representing a child under follow-up.
///
/// `health_status`, the vaccination counters and the skin/posture
/// conditions are snapshots refreshed by examinations, vaccination updates
/// and screenings respectively.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Child {
    pub id: String,
    pub name: String,
    pub age_in_months: i32,
    pub mother_id: String,
    pub health_status: HealthStatus,
    pub last_screening: Option<NaiveDate>,
    pub vaccinations_completed: i32,
    pub vaccinations_total: i32,
    pub has_photo: bool,
    pub skin_condition: Option<String>,
    pub posture_condition: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

fn default_vaccinations_total() -> i32 {
    DEFAULT_TOTAL_VACCINES
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewChild {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub age_in_months: i32,
    pub mother_id: String,
    #[serde(default)]
    pub health_status: HealthStatus,
    #[serde(default)]
    pub vaccinations_completed: i32,
    #[serde(default = "default_vaccinations_total")]
    pub vaccinations_total: i32,
    #[serde(default)]
    pub has_photo: bool,
}

impl NewChild {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Child name cannot be empty".to_string(),
            )));
        }
        if self.mother_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "motherId".to_string(),
            )));
        }
        validate_counters(
            self.age_in_months,
            self.vaccinations_completed,
            self.vaccinations_total,
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildUpdate {
    pub id: Option<String>,
    pub name: String,
    pub age_in_months: i32,
    pub health_status: HealthStatus,
    pub last_screening: Option<NaiveDate>,
    pub vaccinations_completed: i32,
    pub vaccinations_total: i32,
    pub has_photo: bool,
    pub skin_condition: Option<String>,
    pub posture_condition: Option<String>,
}

impl ChildUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.id.is_none() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Child ID is required for updates".to_string(),
            )));
        }
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Child name cannot be empty".to_string(),
            )));
        }
        validate_counters(
            self.age_in_months,
            self.vaccinations_completed,
            self.vaccinations_total,
        )
    }
}

fn validate_counters(age_in_months: i32, completed: i32, total: i32) -> Result<()> {
    if age_in_months < 0 {
        return Err(Error::invalid_input("Age in months cannot be negative"));
    }
    if completed < 0 || total < 0 {
        return Err(Error::invalid_input("Vaccination counts cannot be negative"));
    }
    Ok(())
}
