//! Screenings module - image-based screening workflow and stored results.

mod analysis_model;
mod screenings_model;
mod screenings_service;
mod screenings_traits;


pub use analysis_model::{
    alert_level_to_risk, severity_to_risk, ImageUpload, MedicalReadings, PostureAnalysis,
    SkinAssessment,
};
pub use screenings_model::{
    AnalysisType, ChildConditionsUpdate, ChildScreeningOutcome, MotherScreeningOutcome, NewScreening, Screening,
    ScreeningStats, ScreeningUpdate,
};
pub use screenings_service::ScreeningService;
pub use screenings_traits::{ImageAnalyzerTrait, ScreeningRepositoryTrait, ScreeningServiceTrait};
