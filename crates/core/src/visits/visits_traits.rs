use async_trait::async_trait;
use chrono::NaiveDate;

use super::nearest::GeoPoint;
use super::visits_model::{NearestVisit, NewVisit, Visit, VisitStatus, VisitUpdate};
use crate::errors::Result;

/// Persistence contract for visits.
#[async_trait]
pub trait VisitRepositoryTrait: Send + Sync {
    async fn create(&self, new_visit: NewVisit) -> Result<Visit>;
    async fn update(&self, visit_update: VisitUpdate) -> Result<Visit>;
    async fn delete(&self, visit_id: &str) -> Result<usize>;
    fn get_by_id(&self, visit_id: &str) -> Result<Visit>;

    /// All visits, most recent visit date first.
    fn list(&self) -> Result<Vec<Visit>>;

    /// Visits on one calendar day.
    fn list_by_date(&self, date: NaiveDate) -> Result<Vec<Visit>>;

    /// Visits for one mother, most recent first.
    fn list_by_mother(&self, mother_id: &str) -> Result<Vec<Visit>>;

    fn list_by_status(&self, status: VisitStatus) -> Result<Vec<Visit>>;
}

#[async_trait]
pub trait VisitServiceTrait: Send + Sync {
    async fn create_visit(&self, new_visit: NewVisit) -> Result<Visit>;
    async fn update_visit(&self, visit_update: VisitUpdate) -> Result<Visit>;
    async fn delete_visit(&self, visit_id: &str) -> Result<()>;
    fn get_visit(&self, visit_id: &str) -> Result<Visit>;
    fn get_visits(&self) -> Result<Vec<Visit>>;
    fn get_todays_visits(&self) -> Result<Vec<Visit>>;
    fn get_visits_on(&self, date: NaiveDate) -> Result<Vec<Visit>>;
    fn get_visits_for_mother(&self, mother_id: &str) -> Result<Vec<Visit>>;

    /// Among scheduled visits, the one whose mother is nearest to `origin`.
    fn find_nearest_scheduled_visit(&self, origin: GeoPoint) -> Result<Option<NearestVisit>>;
}
