use async_trait::async_trait;

use super::vaccinations_model::{NewVaccination, Vaccination, VaccineChecklist};
use crate::errors::Result;

/// Persistence contract for vaccination records.
#[async_trait]
pub trait VaccinationRepositoryTrait: Send + Sync {
    /// Inserts a record. Counters are derived from the checklist.
    async fn create(&self, new_vaccination: NewVaccination) -> Result<Vaccination>;

    /// Saves the record as given, derived counters included.
    async fn update(&self, vaccination: Vaccination) -> Result<Vaccination>;

    async fn delete(&self, vaccination_id: &str) -> Result<usize>;

    fn get_by_id(&self, vaccination_id: &str) -> Result<Vaccination>;

    fn get_by_child(&self, child_id: &str) -> Result<Option<Vaccination>>;
}

#[async_trait]
pub trait VaccinationServiceTrait: Send + Sync {
    fn get_vaccination(&self, vaccination_id: &str) -> Result<Vaccination>;

    fn get_for_child(&self, child_id: &str) -> Result<Option<Vaccination>>;

    /// Returns the child's record, creating an empty checklist if none exists.
    async fn get_or_create_for_child(&self, child_id: &str) -> Result<Vaccination>;

    async fn create_vaccination(&self, new_vaccination: NewVaccination) -> Result<Vaccination>;

    /// Saves a record after recomputing its progress.
    async fn update_vaccination(&self, vaccination: Vaccination) -> Result<Vaccination>;

    /// Replaces the child's checklist, recomputes progress and mirrors the
    /// counters onto the child record.
    async fn update_progress(
        &self,
        child_id: &str,
        checklist: VaccineChecklist,
    ) -> Result<Vaccination>;

    async fn delete_vaccination(&self, vaccination_id: &str) -> Result<()>;
}
