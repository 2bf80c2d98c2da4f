//! Client for the external image-analysis service.
//!
//! The service exposes three multipart endpoints, each taking a single
//! `file` field and answering with JSON:
//! - `POST /assess-skin`
//! - `POST /analyze-posture`
//! - `POST /extract-medical-readings`
//!
//! [`AnalysisClient`] implements [`babyassist_core::screenings::ImageAnalyzerTrait`]
//! so the screening service never sees HTTP details.

mod client;
pub mod errors;

pub use client::{AnalysisClient, Endpoint, DEFAULT_TIMEOUT};
pub use errors::AnalysisError;
