use chrono::{NaiveDate, Utc};
use log::debug;
use std::sync::Arc;

use super::dashboard_model::DashboardStats;
use crate::assessment::HealthStatus;
use crate::children::ChildRepositoryTrait;
use crate::errors::Result;
use crate::mothers::{MotherRepositoryTrait, RiskLevel};
use crate::visits::VisitRepositoryTrait;

pub trait DashboardServiceTrait: Send + Sync {
    fn get_stats(&self) -> Result<DashboardStats>;
    fn get_stats_on(&self, date: NaiveDate) -> Result<DashboardStats>;
}

pub struct DashboardService {
    mother_repository: Arc<dyn MotherRepositoryTrait>,
    child_repository: Arc<dyn ChildRepositoryTrait>,
    visit_repository: Arc<dyn VisitRepositoryTrait>,
}

impl DashboardService {
    pub fn new(
        mother_repository: Arc<dyn MotherRepositoryTrait>,
        child_repository: Arc<dyn ChildRepositoryTrait>,
        visit_repository: Arc<dyn VisitRepositoryTrait>,
    ) -> Self {
        Self {
            mother_repository,
            child_repository,
            visit_repository,
        }
    }
}

impl DashboardServiceTrait for DashboardService {
    fn get_stats(&self) -> Result<DashboardStats> {
        self.get_stats_on(Utc::now().date_naive())
    }

    /// Stats with "today" pinned to `date`.
    fn get_stats_on(&self, date: NaiveDate) -> Result<DashboardStats> {
        let stats = DashboardStats {
            total_mothers: self.mother_repository.list()?.len(),
            total_children: self.child_repository.list()?.len(),
            total_visits: self.visit_repository.list()?.len(),
            today_visits: self.visit_repository.list_by_date(date)?.len(),
            high_risk_mothers: self
                .mother_repository
                .list_by_risk_level(RiskLevel::High)?
                .len(),
            children_needing_attention: self
                .child_repository
                .list_by_health_status(HealthStatus::NeedsAttention)?
                .len(),
        };
        debug!("Dashboard stats: {:?}", stats);
        Ok(stats)
    }
}
