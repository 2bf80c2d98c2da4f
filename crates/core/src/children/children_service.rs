use log::debug;
use std::sync::Arc;

use super::children_model::{Child, ChildUpdate, NewChild};
use super::children_traits::{ChildRepositoryTrait, ChildServiceTrait};
use crate::errors::{Error, Result};
use crate::mothers::MotherRepositoryTrait;

/// Service for managing child records
pub struct ChildService {
    repository: Arc<dyn ChildRepositoryTrait>,
    mother_repository: Arc<dyn MotherRepositoryTrait>,
}

impl ChildService {
    pub fn new(
        repository: Arc<dyn ChildRepositoryTrait>,
        mother_repository: Arc<dyn MotherRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            mother_repository,
        }
    }
}

#[async_trait::async_trait]
impl ChildServiceTrait for ChildService {
    async fn create_child(&self, new_child: NewChild) -> Result<Child> {
        new_child.validate()?;
        self.mother_repository.get_by_id(&new_child.mother_id)?;
        debug!(
            "Registering child {} for mother {}",
            new_child.name, new_child.mother_id
        );
        self.repository.create(new_child).await
    }

    async fn update_child(&self, child_update: ChildUpdate) -> Result<Child> {
        child_update.validate()?;
        self.repository.update(child_update).await
    }

    async fn delete_child(&self, child_id: &str) -> Result<()> {
        if self.repository.delete(child_id).await? == 0 {
            return Err(Error::not_found("Child", child_id));
        }
        Ok(())
    }

    fn get_child(&self, child_id: &str) -> Result<Child> {
        self.repository.get_by_id(child_id)
    }

    fn get_children(&self) -> Result<Vec<Child>> {
        self.repository.list()
    }

    fn get_children_for_mother(&self, mother_id: &str) -> Result<Vec<Child>> {
        self.repository.list_by_mother(mother_id)
    }

    fn get_children_by_age_range(&self, min_months: i32, max_months: i32) -> Result<Vec<Child>> {
        if min_months > max_months {
            return Err(Error::invalid_input(format!(
                "Invalid age range: {} > {}",
                min_months, max_months
            )));
        }
        self.repository.list_by_age_range(min_months, max_months)
    }
}
