//! BabyAssist Core - Domain entities, services, and traits.
//!
//! This crate contains the health-assessment rules and the business logic
//! for mothers, children, visits, examinations, vaccinations and
//! screenings. It is database-agnostic and defines repository traits that
//! are implemented by the `storage-sqlite` crate; the image-analysis
//! service is reached through [`screenings::ImageAnalyzerTrait`].

pub mod assessment;
pub mod auth;
pub mod children;
pub mod constants;
pub mod dashboard;
pub mod errors;
pub mod examinations;
pub mod mothers;
pub mod screenings;
pub mod vaccinations;
pub mod visits;

#[cfg(test)]
mod test_fixtures;

// Re-export the assessment vocabulary used across every module
pub use assessment::{BmiCategory, HealthStatus, SubjectType};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
