//! Child repository and service traits.

use async_trait::async_trait;

use super::children_model::{Child, ChildUpdate, NewChild};
use crate::assessment::HealthStatus;
use crate::errors::Result;

/// Persistence contract for child records.
///
/// Besides plain CRUD, `set_vaccination_summary` refreshes the vaccination
/// snapshot columns without round-tripping the whole record.
#[async_trait]
pub trait ChildRepositoryTrait: Send + Sync {
    async fn create(&self, new_child: NewChild) -> Result<Child>;
    async fn update(&self, child_update: ChildUpdate) -> Result<Child>;
    async fn delete(&self, child_id: &str) -> Result<usize>;

    async fn set_vaccination_summary(
        &self,
        child_id: &str,
        completed: i32,
        total: i32,
    ) -> Result<Child>;

    fn get_by_id(&self, child_id: &str) -> Result<Child>;

    /// All children, newest first.
    fn list(&self) -> Result<Vec<Child>>;

    fn list_by_mother(&self, mother_id: &str) -> Result<Vec<Child>>;

    /// Children whose age in months lies in `[min_months, max_months]`, youngest first.
    fn list_by_age_range(&self, min_months: i32, max_months: i32) -> Result<Vec<Child>>;

    fn list_by_health_status(&self, status: HealthStatus) -> Result<Vec<Child>>;
}

#[async_trait]
pub trait ChildServiceTrait: Send + Sync {
    async fn create_child(&self, new_child: NewChild) -> Result<Child>;
    async fn update_child(&self, child_update: ChildUpdate) -> Result<Child>;
    async fn delete_child(&self, child_id: &str) -> Result<()>;
    fn get_child(&self, child_id: &str) -> Result<Child>;
    fn get_children(&self) -> Result<Vec<Child>>;
    fn get_children_for_mother(&self, mother_id: &str) -> Result<Vec<Child>>;
    fn get_children_by_age_range(&self, min_months: i32, max_months: i32) -> Result<Vec<Child>>;
}
