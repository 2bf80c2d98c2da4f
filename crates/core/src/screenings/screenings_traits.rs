use async_trait::async_trait;
use chrono::NaiveDateTime;

use super::analysis_model::{ImageUpload, MedicalReadings, PostureAnalysis, SkinAssessment};
use super::screenings_model::{
    ChildConditionsUpdate, ChildScreeningOutcome, MotherScreeningOutcome, NewScreening, Screening, ScreeningStats,
    ScreeningUpdate,
};
use crate::assessment::SubjectType;
use crate::errors::Result;

/// The external image-analysis service.
///
/// Implementations forward the image and decode the JSON reply. Failures
/// surface as `Error::Analysis`.
#[async_trait]
pub trait ImageAnalyzerTrait: Send + Sync {
    async fn assess_skin(&self, image: &ImageUpload) -> Result<SkinAssessment>;
    async fn analyze_posture(&self, image: &ImageUpload) -> Result<PostureAnalysis>;
    async fn extract_medical_readings(&self, image: &ImageUpload) -> Result<MedicalReadings>;
}

/// Persistence contract for screenings.
#[async_trait]
pub trait ScreeningRepositoryTrait: Send + Sync {
    async fn create(&self, new_screening: NewScreening) -> Result<Screening>;

    /// Saves every record, and the child snapshot when given, in one
    /// transaction. Nothing is saved when any part fails.
    async fn create_batch(
        &self,
        records: Vec<NewScreening>,
        child_conditions: Option<ChildConditionsUpdate>,
    ) -> Result<Vec<Screening>>;

    async fn update(&self, screening_update: ScreeningUpdate) -> Result<Screening>;
    async fn delete(&self, screening_id: &str) -> Result<usize>;
    fn get_by_id(&self, screening_id: &str) -> Result<Screening>;

    /// All screenings, newest first.
    fn list(&self) -> Result<Vec<Screening>>;

    fn list_by_person(&self, person_id: &str, person_type: SubjectType) -> Result<Vec<Screening>>;

    fn count(&self) -> Result<usize>;

    fn count_created_since(&self, since: NaiveDateTime) -> Result<usize>;
}

#[async_trait]
pub trait ScreeningServiceTrait: Send + Sync {
    /// Runs skin and posture analysis together, then stores the results.
    async fn screen_child(
        &self,
        child_id: &str,
        image: ImageUpload,
        notes: Option<String>,
    ) -> Result<ChildScreeningOutcome>;

    /// Extracts device readings from the image, then stores the results.
    async fn screen_mother(
        &self,
        mother_id: &str,
        image: ImageUpload,
        notes: Option<String>,
    ) -> Result<MotherScreeningOutcome>;

    async fn create_screening(&self, new_screening: NewScreening) -> Result<Screening>;
    async fn update_screening(&self, screening_update: ScreeningUpdate) -> Result<Screening>;
    async fn delete_screening(&self, screening_id: &str) -> Result<()>;
    fn get_screening(&self, screening_id: &str) -> Result<Screening>;
    fn get_screenings(&self) -> Result<Vec<Screening>>;
    fn get_screenings_for(
        &self,
        person_type: SubjectType,
        person_id: &str,
    ) -> Result<Vec<Screening>>;
    fn get_stats(&self) -> Result<ScreeningStats>;
}
