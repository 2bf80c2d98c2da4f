use async_trait::async_trait;

use super::examinations_model::{Examination, ExaminationUpdate, NewExamination};
use crate::assessment::{Answers, SubjectType};
use crate::errors::Result;

/// Persistence contract for examinations.
#[async_trait]
pub trait ExaminationRepositoryTrait: Send + Sync {
    async fn create(&self, new_examination: NewExamination) -> Result<Examination>;

    /// Saves a submitted examination. For a child it also stores the
    /// examination's health status on the child, in the same transaction.
    async fn create_submission(&self, new_examination: NewExamination) -> Result<Examination>;

    async fn update(&self, examination_update: ExaminationUpdate) -> Result<Examination>;
    async fn delete(&self, examination_id: &str) -> Result<usize>;
    fn get_by_id(&self, examination_id: &str) -> Result<Examination>;

    /// All examinations, newest first.
    fn list(&self) -> Result<Vec<Examination>>;

    /// Examinations for one person, newest first.
    fn list_by_person(&self, person_id: &str, person_type: SubjectType)
        -> Result<Vec<Examination>>;
}

#[async_trait]
pub trait ExaminationServiceTrait: Send + Sync {
    /// Validates a full questionnaire, assesses it and stores the examination.
    ///
    /// Child submissions also refresh the child's health status.
    async fn submit_examination(
        &self,
        person_type: SubjectType,
        person_id: &str,
        answers: Answers,
    ) -> Result<Examination>;

    async fn create_examination(&self, new_examination: NewExamination) -> Result<Examination>;
    async fn update_examination(&self, examination_update: ExaminationUpdate)
        -> Result<Examination>;
    async fn delete_examination(&self, examination_id: &str) -> Result<()>;
    fn get_examination(&self, examination_id: &str) -> Result<Examination>;
    fn get_examinations(&self) -> Result<Vec<Examination>>;
    fn get_examinations_for(
        &self,
        person_type: SubjectType,
        person_id: &str,
    ) -> Result<Vec<Examination>>;
}
