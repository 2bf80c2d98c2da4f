//! Mother domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};
use crate::visits::GeoPoint;

/// Risk level shared by mother records and screenings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            other => Err(Error::invalid_input(format!(
                "Unknown risk level '{}'",
                other
            ))),
        }
    }
}

/// Domain model representing a registered mother.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Mother {
    pub id: String,
    pub name: String,
    pub age: Option<i32>,
    pub mobile: Option<String>,
    pub address: Option<String>,
    pub risk_level: RiskLevel,
    pub pregnancy_week: Option<i32>,
    pub last_visit: Option<NaiveDate>,
    pub children_count: i32,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Mother {
    /// True when the record carries a usable age, which gates the height estimate.
    pub fn has_age(&self) -> bool {
        self.age.is_some_and(|age| age > 0)
    }

    pub fn location(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(GeoPoint::new(latitude, longitude)),
            _ => None,
        }
    }
}

/// Input model for registering a mother.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMother {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub age: Option<i32>,
    pub mobile: Option<String>,
    pub address: Option<String>,
    #[serde(default)]
    pub risk_level: RiskLevel,
    pub pregnancy_week: Option<i32>,
    pub last_visit: Option<NaiveDate>,
    #[serde(default)]
    pub children_count: i32,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl NewMother {
    pub fn validate(&self) -> Result<()> {
        validate_fields(
            &self.name,
            self.age,
            self.pregnancy_week,
            self.children_count,
            self.latitude,
            self.longitude,
        )
    }
}

/// Input model for updating an existing mother.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotherUpdate {
    pub id: Option<String>,
    pub name: String,
    pub age: Option<i32>,
    pub mobile: Option<String>,
    pub address: Option<String>,
    pub risk_level: RiskLevel,
    pub pregnancy_week: Option<i32>,
    pub last_visit: Option<NaiveDate>,
    pub children_count: i32,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl MotherUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.id.is_none() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Mother ID is required for updates".to_string(),
            )));
        }
        validate_fields(
            &self.name,
            self.age,
            self.pregnancy_week,
            self.children_count,
            self.latitude,
            self.longitude,
        )
    }
}

fn validate_fields(
    name: &str,
    age: Option<i32>,
    pregnancy_week: Option<i32>,
    children_count: i32,
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Mother name cannot be empty".to_string(),
        )));
    }
    if let Some(age) = age {
        if age <= 0 {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Age must be positive, got {}",
                age
            ))));
        }
    }
    if pregnancy_week.is_some_and(|week| week < 0) {
        return Err(Error::invalid_input("Pregnancy week cannot be negative"));
    }
    if children_count < 0 {
        return Err(Error::invalid_input("Children count cannot be negative"));
    }
    if latitude.is_some_and(|lat| !(-90.0..=90.0).contains(&lat)) {
        return Err(Error::invalid_input("Latitude must be within [-90, 90]"));
    }
    if longitude.is_some_and(|lng| !(-180.0..=180.0).contains(&lng)) {
        return Err(Error::invalid_input("Longitude must be within [-180, 180]"));
    }
    Ok(())
}
