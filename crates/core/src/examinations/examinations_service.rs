use chrono::Utc;
use log::{debug, info};
use rust_decimal::Decimal;
use std::sync::Arc;

use super::examinations_model::{Examination, ExaminationUpdate, NewExamination};
use super::examinations_traits::{ExaminationRepositoryTrait, ExaminationServiceTrait};
use crate::assessment::{assess, ensure_complete, Answers, SubjectType};
use crate::children::ChildRepositoryTrait;
use crate::constants::MOTHER_HEIGHT_ESTIMATE_CM;
use crate::errors::{Error, Result};
use crate::mothers::MotherRepositoryTrait;

/// Service composing the assessment rules with examination persistence
pub struct ExaminationService {
    repository: Arc<dyn ExaminationRepositoryTrait>,
    mother_repository: Arc<dyn MotherRepositoryTrait>,
    child_repository: Arc<dyn ChildRepositoryTrait>,
}

impl ExaminationService {
    pub fn new(
        repository: Arc<dyn ExaminationRepositoryTrait>,
        mother_repository: Arc<dyn MotherRepositoryTrait>,
        child_repository: Arc<dyn ChildRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            mother_repository,
            child_repository,
        }
    }

    /// Height used for the BMI, or `None` when BMI should be skipped.
    ///
    /// Children report their height in the questionnaire. Mothers get the
    /// fixed estimate, and only when their record has an age.
    fn height_for(
        &self,
        person_type: SubjectType,
        person_id: &str,
        answers: &Answers,
    ) -> Result<Option<Decimal>> {
        match person_type {
            SubjectType::Child => {
                self.child_repository.get_by_id(person_id)?;
                answers.measurement("height")
            }
            SubjectType::Mother => {
                let mother = self.mother_repository.get_by_id(person_id)?;
                Ok(mother
                    .has_age()
                    .then(|| Decimal::from(MOTHER_HEIGHT_ESTIMATE_CM)))
            }
        }
    }
}

#[async_trait::async_trait]
impl ExaminationServiceTrait for ExaminationService {
    async fn submit_examination(
        &self,
        person_type: SubjectType,
        person_id: &str,
        answers: Answers,
    ) -> Result<Examination> {
        ensure_complete(person_type, &answers)?;

        let height = self.height_for(person_type, person_id, &answers)?;
        let assessment = assess(&answers, person_type, height)?;
        debug!(
            "Assessed {} {}: {} risk factor(s), status {}",
            person_type, person_id, assessment.risk_factors, assessment.health_status
        );

        let new_examination = NewExamination {
            id: None,
            person_id: person_id.to_string(),
            person_type,
            answers,
            bmi: assessment.bmi.map(|b| b.bmi),
            bmi_category: assessment.bmi.map(|b| b.category),
            health_status: assessment.health_status,
            notes: Some(format!(
                "Examination completed on {}",
                Utc::now().date_naive().format("%Y-%m-%d")
            )),
        };
        let examination = self.repository.create_submission(new_examination).await?;

        info!(
            "Examination {} saved for {} {}",
            examination.id, person_type, person_id
        );
        Ok(examination)
    }

    async fn create_examination(&self, new_examination: NewExamination) -> Result<Examination> {
        new_examination.validate()?;
        self.repository.create(new_examination).await
    }

    async fn update_examination(
        &self,
        examination_update: ExaminationUpdate,
    ) -> Result<Examination> {
        examination_update.validate()?;
        self.repository.update(examination_update).await
    }

    async fn delete_examination(&self, examination_id: &str) -> Result<()> {
        if self.repository.delete(examination_id).await? == 0 {
            return Err(Error::not_found("Examination", examination_id));
        }
        Ok(())
    }

    fn get_examination(&self, examination_id: &str) -> Result<Examination> {
        self.repository.get_by_id(examination_id)
    }

    fn get_examinations(&self) -> Result<Vec<Examination>> {
        self.repository.list()
    }

    fn get_examinations_for(
        &self,
        person_type: SubjectType,
        person_id: &str,
    ) -> Result<Vec<Examination>> {
        self.repository.list_by_person(person_id, person_type)
    }
}
