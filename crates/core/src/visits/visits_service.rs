use chrono::{NaiveDate, Utc};
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

use super::nearest::{find_nearest, GeoPoint};
use super::visits_model::{NearestVisit, NewVisit, Visit, VisitStatus, VisitUpdate};
use super::visits_traits::{VisitRepositoryTrait, VisitServiceTrait};
use crate::errors::{Error, Result};
use crate::mothers::{Mother, MotherRepositoryTrait};

/// Service for scheduling visits and planning the day's round
pub struct VisitService {
    repository: Arc<dyn VisitRepositoryTrait>,
    mother_repository: Arc<dyn MotherRepositoryTrait>,
}

impl VisitService {
    pub fn new(
        repository: Arc<dyn VisitRepositoryTrait>,
        mother_repository: Arc<dyn MotherRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            mother_repository,
        }
    }
}

#[async_trait::async_trait]
impl VisitServiceTrait for VisitService {
    async fn create_visit(&self, new_visit: NewVisit) -> Result<Visit> {
        new_visit.validate()?;
        // Fails with NotFound for an unknown mother.
        self.mother_repository.get_by_id(&new_visit.mother_id)?;
        debug!(
            "Scheduling {} visit for mother {} on {}",
            new_visit.visit_type, new_visit.mother_id, new_visit.visit_date
        );
        self.repository.create(new_visit).await
    }

    async fn update_visit(&self, visit_update: VisitUpdate) -> Result<Visit> {
        visit_update.validate()?;
        self.repository.update(visit_update).await
    }

    async fn delete_visit(&self, visit_id: &str) -> Result<()> {
        if self.repository.delete(visit_id).await? == 0 {
            return Err(Error::not_found("Visit", visit_id));
        }
        Ok(())
    }

    fn get_visit(&self, visit_id: &str) -> Result<Visit> {
        self.repository.get_by_id(visit_id)
    }

    fn get_visits(&self) -> Result<Vec<Visit>> {
        self.repository.list()
    }

    fn get_todays_visits(&self) -> Result<Vec<Visit>> {
        self.get_visits_on(Utc::now().date_naive())
    }

    fn get_visits_on(&self, date: NaiveDate) -> Result<Vec<Visit>> {
        self.repository.list_by_date(date)
    }

    fn get_visits_for_mother(&self, mother_id: &str) -> Result<Vec<Visit>> {
        self.repository.list_by_mother(mother_id)
    }

    fn find_nearest_scheduled_visit(&self, origin: GeoPoint) -> Result<Option<NearestVisit>> {
        let scheduled = self.repository.list_by_status(VisitStatus::Scheduled)?;
        if scheduled.is_empty() {
            return Ok(None);
        }

        let mothers: HashMap<String, Mother> = self
            .mother_repository
            .list()?
            .into_iter()
            .map(|m| (m.id.clone(), m))
            .collect();

        let candidates = scheduled.into_iter().filter_map(|visit| {
            let mother = mothers.get(&visit.mother_id)?.clone();
            Some((visit, mother))
        });

        let nearest = find_nearest(origin, candidates, |(_, mother)| mother.location()).map(
            |((visit, mother), distance)| NearestVisit {
                visit,
                mother,
                distance,
            },
        );

        if let Some(found) = &nearest {
            debug!(
                "Nearest scheduled visit {} (mother {}) at distance {:.5}",
                found.visit.id, found.mother.id, found.distance
            );
        }
        Ok(nearest)
    }
}
