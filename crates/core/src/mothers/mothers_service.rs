use log::debug;
use std::sync::Arc;

use super::mothers_model::{Mother, MotherUpdate, NewMother, RiskLevel};
use super::mothers_traits::{MotherRepositoryTrait, MotherServiceTrait};
use crate::errors::{Error, Result};

/// Service for managing mother records
pub struct MotherService {
    repository: Arc<dyn MotherRepositoryTrait>,
}

impl MotherService {
    pub fn new(repository: Arc<dyn MotherRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl MotherServiceTrait for MotherService {
    async fn create_mother(&self, new_mother: NewMother) -> Result<Mother> {
        new_mother.validate()?;
        debug!("Creating mother record: {}", new_mother.name);
        self.repository.create(new_mother).await
    }

    async fn update_mother(&self, mother_update: MotherUpdate) -> Result<Mother> {
        mother_update.validate()?;
        self.repository.update(mother_update).await
    }

    async fn delete_mother(&self, mother_id: &str) -> Result<()> {
        let deleted = self.repository.delete(mother_id).await?;
        if deleted == 0 {
            return Err(Error::not_found("Mother", mother_id));
        }
        debug!("Deleted mother {}", mother_id);
        Ok(())
    }

    fn get_mother(&self, mother_id: &str) -> Result<Mother> {
        self.repository.get_by_id(mother_id)
    }

    fn get_mothers(&self) -> Result<Vec<Mother>> {
        self.repository.list()
    }

    fn get_mothers_by_risk_level(&self, risk_level: RiskLevel) -> Result<Vec<Mother>> {
        self.repository.list_by_risk_level(risk_level)
    }
}
