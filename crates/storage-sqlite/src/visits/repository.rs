use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use diesel::SqliteConnection;
use log::debug;
use std::sync::Arc;
use uuid::Uuid;

use babyassist_core::visits::{NewVisit, Visit, VisitRepositoryTrait, VisitStatus, VisitUpdate};
use babyassist_core::{Error, Result};

use super::model::VisitDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::visits;
use crate::schema::visits::dsl::*;

pub struct VisitRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl VisitRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    fn load(&self, query: visits::BoxedQuery<'_, Sqlite>) -> Result<Vec<Visit>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = query
            .select(VisitDB::as_select())
            .order((visit_date.desc(), created_at.desc()))
            .load::<VisitDB>(&mut conn)
            .into_core()?;
        rows.into_iter().map(Visit::try_from).collect()
    }
}

#[async_trait]
impl VisitRepositoryTrait for VisitRepository {
    async fn create(&self, new_visit: NewVisit) -> Result<Visit> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Visit> {
                let mut visit_db: VisitDB = new_visit.into();
                if visit_db.id.is_empty() {
                    visit_db.id = Uuid::new_v4().to_string();
                }
                debug!(
                    "[DB] Creating visit {} for mother {}",
                    visit_db.id, visit_db.mother_id
                );

                let saved = diesel::insert_into(visits::table)
                    .values(&visit_db)
                    .returning(VisitDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Visit::try_from(saved)
            })
            .await
    }

    async fn update(&self, visit_update: VisitUpdate) -> Result<Visit> {
        let visit_id = visit_update.id.clone().unwrap_or_default();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Visit> {
                debug!("[DB] Updating visit {}", visit_id);
                let mut existing = visits
                    .find(&visit_id)
                    .select(VisitDB::as_select())
                    .first::<VisitDB>(conn)
                    .optional()
                    .into_core()?
                    .ok_or_else(|| Error::not_found("Visit", visit_id.clone()))?;

                existing.apply(visit_update, chrono::Utc::now().naive_utc());
                diesel::update(visits.find(&visit_id))
                    .set(&existing)
                    .execute(conn)
                    .into_core()?;
                Visit::try_from(existing)
            })
            .await
    }

    async fn delete(&self, visit_id: &str) -> Result<usize> {
        let visit_id = visit_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                debug!("[DB] Deleting visit {}", visit_id);
                diesel::delete(visits.find(visit_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }

    fn get_by_id(&self, visit_id: &str) -> Result<Visit> {
        let mut conn = get_connection(&self.pool)?;
        let row = visits
            .find(visit_id)
            .select(VisitDB::as_select())
            .first::<VisitDB>(&mut conn)
            .optional()
            .into_core()?
            .ok_or_else(|| Error::not_found("Visit", visit_id))?;
        Visit::try_from(row)
    }

    fn list(&self) -> Result<Vec<Visit>> {
        debug!("[DB] Fetching visits");
        self.load(visits::table.into_boxed())
    }

    fn list_by_date(&self, date: NaiveDate) -> Result<Vec<Visit>> {
        debug!("[DB] Fetching visits on {}", date);
        self.load(visits::table.filter(visit_date.eq(date)).into_boxed())
    }

    fn list_by_mother(&self, parent_id: &str) -> Result<Vec<Visit>> {
        self.load(
            visits::table
                .filter(mother_id.eq(parent_id.to_string()))
                .into_boxed(),
        )
    }

    fn list_by_status(&self, visit_status: VisitStatus) -> Result<Vec<Visit>> {
        self.load(
            visits::table
                .filter(status.eq(visit_status.as_str()))
                .into_boxed(),
        )
    }
}
