//! Mother repository and service traits.

use async_trait::async_trait;

use super::mothers_model::{Mother, MotherUpdate, NewMother, RiskLevel};
use crate::errors::Result;

/// Persistence contract for mother records.
#[async_trait]
pub trait MotherRepositoryTrait: Send + Sync {
    async fn create(&self, new_mother: NewMother) -> Result<Mother>;

    async fn update(&self, mother_update: MotherUpdate) -> Result<Mother>;

    /// Returns the number of deleted records.
    async fn delete(&self, mother_id: &str) -> Result<usize>;

    fn get_by_id(&self, mother_id: &str) -> Result<Mother>;

    /// All mothers, newest first.
    fn list(&self) -> Result<Vec<Mother>>;

    /// Mothers at the given risk level, newest first.
    fn list_by_risk_level(&self, risk_level: RiskLevel) -> Result<Vec<Mother>>;
}

#[async_trait]
pub trait MotherServiceTrait: Send + Sync {
    async fn create_mother(&self, new_mother: NewMother) -> Result<Mother>;
    async fn update_mother(&self, mother_update: MotherUpdate) -> Result<Mother>;
    async fn delete_mother(&self, mother_id: &str) -> Result<()>;
    fn get_mother(&self, mother_id: &str) -> Result<Mother>;
    fn get_mothers(&self) -> Result<Vec<Mother>>;
    fn get_mothers_by_risk_level(&self, risk_level: RiskLevel) -> Result<Vec<Mother>>;
}
