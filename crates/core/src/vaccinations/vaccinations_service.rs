use chrono::Utc;
use log::{debug, info};
use std::sync::Arc;

use super::vaccinations_model::{NewVaccination, Vaccination, VaccineChecklist};
use super::vaccinations_traits::{VaccinationRepositoryTrait, VaccinationServiceTrait};
use crate::children::ChildRepositoryTrait;
use crate::errors::{Error, Result};

/// Service for vaccination checklists and their progress
pub struct VaccinationService {
    repository: Arc<dyn VaccinationRepositoryTrait>,
    child_repository: Arc<dyn ChildRepositoryTrait>,
}

impl VaccinationService {
    pub fn new(
        repository: Arc<dyn VaccinationRepositoryTrait>,
        child_repository: Arc<dyn ChildRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            child_repository,
        }
    }

    async fn save_and_mirror(&self, mut vaccination: Vaccination) -> Result<Vaccination> {
        vaccination.refresh_progress(Utc::now().naive_utc());
        let saved = self.repository.update(vaccination).await?;
        self.child_repository
            .set_vaccination_summary(
                &saved.child_id,
                saved.completed_vaccines,
                saved.total_vaccines,
            )
            .await?;
        info!(
            "Vaccination progress for child {}: {}/{} ({}%)",
            saved.child_id, saved.completed_vaccines, saved.total_vaccines, saved.progress_percentage
        );
        Ok(saved)
    }
}

#[async_trait::async_trait]
impl VaccinationServiceTrait for VaccinationService {
    fn get_vaccination(&self, vaccination_id: &str) -> Result<Vaccination> {
        self.repository.get_by_id(vaccination_id)
    }

    fn get_for_child(&self, child_id: &str) -> Result<Option<Vaccination>> {
        self.repository.get_by_child(child_id)
    }

    async fn get_or_create_for_child(&self, child_id: &str) -> Result<Vaccination> {
        if let Some(existing) = self.repository.get_by_child(child_id)? {
            return Ok(existing);
        }
        self.child_repository.get_by_id(child_id)?;
        debug!("No vaccination record for child {}, creating one", child_id);
        self.repository
            .create(NewVaccination::for_child(child_id))
            .await
    }

    async fn create_vaccination(&self, new_vaccination: NewVaccination) -> Result<Vaccination> {
        new_vaccination.validate()?;
        self.child_repository.get_by_id(&new_vaccination.child_id)?;
        self.repository.create(new_vaccination).await
    }

    async fn update_vaccination(&self, vaccination: Vaccination) -> Result<Vaccination> {
        if vaccination.total_vaccines < 0 {
            return Err(Error::invalid_input("Total vaccines cannot be negative"));
        }
        self.save_and_mirror(vaccination).await
    }

    async fn update_progress(
        &self,
        child_id: &str,
        checklist: VaccineChecklist,
    ) -> Result<Vaccination> {
        let mut vaccination = self.get_or_create_for_child(child_id).await?;
        vaccination.checklist = checklist;
        self.save_and_mirror(vaccination).await
    }

    async fn delete_vaccination(&self, vaccination_id: &str) -> Result<()> {
        if self.repository.delete(vaccination_id).await? == 0 {
            return Err(Error::not_found("Vaccination", vaccination_id));
        }
        Ok(())
    }
}
