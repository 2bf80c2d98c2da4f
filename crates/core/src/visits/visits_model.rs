//! Visit domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};
use crate::mothers::Mother;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitType {
    Prenatal,
    Postnatal,
    Screening,
    Vaccination,
}

impl VisitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VisitType::Prenatal => "prenatal",
            VisitType::Postnatal => "postnatal",
            VisitType::Screening => "screening",
            VisitType::Vaccination => "vaccination",
        }
    }
}

impl fmt::Display for VisitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VisitType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "prenatal" => Ok(VisitType::Prenatal),
            "postnatal" => Ok(VisitType::Postnatal),
            "screening" => Ok(VisitType::Screening),
            "vaccination" => Ok(VisitType::Vaccination),
            other => Err(Error::invalid_input(format!(
                "Unknown visit type '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VisitStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
    NoShow,
}

impl VisitStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VisitStatus::Scheduled => "scheduled",
            VisitStatus::Completed => "completed",
            VisitStatus::Cancelled => "cancelled",
            VisitStatus::NoShow => "no_show",
        }
    }
}

impl fmt::Display for VisitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VisitStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "scheduled" => Ok(VisitStatus::Scheduled),
            "completed" => Ok(VisitStatus::Completed),
            "cancelled" => Ok(VisitStatus::Cancelled),
            "no_show" => Ok(VisitStatus::NoShow),
            other => Err(Error::invalid_input(format!(
                "Unknown visit status '{}'",
                other
            ))),
        }
    }
}

/// A home visit to a mother.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    pub id: String,
    pub mother_id: String,
    pub visit_date: NaiveDate,
    pub visit_type: VisitType,
    pub status: VisitStatus,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVisit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub mother_id: String,
    pub visit_date: NaiveDate,
    pub visit_type: VisitType,
    #[serde(default)]
    pub status: VisitStatus,
    pub notes: Option<String>,
}

impl NewVisit {
    pub fn validate(&self) -> Result<()> {
        if self.mother_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "motherId".to_string(),
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitUpdate {
    pub id: Option<String>,
    pub visit_date: NaiveDate,
    pub visit_type: VisitType,
    pub status: VisitStatus,
    pub notes: Option<String>,
}

impl VisitUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.id.is_none() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Visit ID is required for updates".to_string(),
            )));
        }
        Ok(())
    }
}

/// The scheduled visit whose mother lives closest to a query point.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NearestVisit {
    pub visit: Visit,
    pub mother: Mother,
    /// Planar distance in degrees.
    pub distance: f64,
}
