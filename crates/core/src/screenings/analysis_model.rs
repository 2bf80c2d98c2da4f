//! Payloads exchanged with the image-analysis service.
//!
//! Responses are decoded leniently: every field is optional and unknown
//! fields are kept in `extra`, so the stored JSON matches what the service
//! returned.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::mothers::RiskLevel;

/// An uploaded image, forwarded as the multipart `file` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, content_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            bytes,
        }
    }
}

/// Response of `/assess-skin`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkinAssessment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub recommendations: Vec<String>,
    /// mild, moderate or severe
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SkinAssessment {
    /// The reported condition, if non-blank.
    pub fn reported_condition(&self) -> Option<&str> {
        non_blank(self.condition.as_deref())
    }

    pub fn risk_level(&self) -> RiskLevel {
        self.severity
            .as_deref()
            .map(severity_to_risk)
            .unwrap_or_default()
    }
}

/// Response of `/analyze-posture`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostureAnalysis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posture_condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    pub abnormalities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub recommendations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    pub risk_factors: Vec<String>,
    pub body_regions: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PostureAnalysis {
    pub fn reported_condition(&self) -> Option<&str> {
        non_blank(self.posture_condition.as_deref())
    }
}

/// Response of `/extract-medical-readings`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MedicalReadings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,
    pub extracted_values: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub recommendations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading_quality: Option<String>,
    pub units: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_normal_range: Option<bool>,
    /// normal, elevated, high, critical or low
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_level: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MedicalReadings {
    pub fn reported_device(&self) -> Option<&str> {
        non_blank(self.device_type.as_deref())
    }

    pub fn risk_level(&self) -> RiskLevel {
        self.alert_level
            .as_deref()
            .map(alert_level_to_risk)
            .unwrap_or_default()
    }
}

/// mild -> low, moderate -> medium, severe/critical -> high. Anything else is low.
pub fn severity_to_risk(severity: &str) -> RiskLevel {
    match severity.trim().to_ascii_lowercase().as_str() {
        "moderate" | "medium" => RiskLevel::Medium,
        "severe" | "critical" | "high" => RiskLevel::High,
        _ => RiskLevel::Low,
    }
}

/// elevated -> medium, high/critical -> high. Anything else is low.
pub fn alert_level_to_risk(alert_level: &str) -> RiskLevel {
    match alert_level.trim().to_ascii_lowercase().as_str() {
        "elevated" | "medium" => RiskLevel::Medium,
        "high" | "critical" => RiskLevel::High,
        _ => RiskLevel::Low,
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
