use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use diesel::SqliteConnection;
use log::debug;
use std::sync::Arc;
use uuid::Uuid;

use babyassist_core::screenings::{
    ChildConditionsUpdate, NewScreening, Screening, ScreeningRepositoryTrait, ScreeningUpdate,
};
use babyassist_core::{Error, Result, SubjectType};

use super::model::ScreeningDB;
use crate::children::modify_child;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::screenings;
use crate::schema::screenings::dsl::*;

pub struct ScreeningRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ScreeningRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    fn load(&self, query: screenings::BoxedQuery<'_, Sqlite>) -> Result<Vec<Screening>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = query
            .select(ScreeningDB::as_select())
            .order(created_at.desc())
            .load::<ScreeningDB>(&mut conn)
            .into_core()?;
        rows.into_iter().map(Screening::try_from).collect()
    }

    fn prepare(new_screening: NewScreening) -> Result<ScreeningDB> {
        let mut screening_db = ScreeningDB::from_new(new_screening)?;
        if screening_db.id.is_empty() {
            screening_db.id = Uuid::new_v4().to_string();
        }
        Ok(screening_db)
    }
}

fn insert_screening(conn: &mut SqliteConnection, screening_db: &ScreeningDB) -> Result<ScreeningDB> {
    debug!(
        "[DB] Creating {} screening for {} {}",
        screening_db.analysis_type, screening_db.person_type, screening_db.person_id
    );
    diesel::insert_into(screenings::table)
        .values(screening_db)
        .returning(ScreeningDB::as_returning())
        .get_result(conn)
        .into_core()
}

#[async_trait]
impl ScreeningRepositoryTrait for ScreeningRepository {
    async fn create(&self, new_screening: NewScreening) -> Result<Screening> {
        let screening_db = Self::prepare(new_screening)?;
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Screening> {
                Screening::try_from(insert_screening(conn, &screening_db)?)
            })
            .await
    }

    async fn create_batch(
        &self,
        records: Vec<NewScreening>,
        child_conditions: Option<ChildConditionsUpdate>,
    ) -> Result<Vec<Screening>> {
        let rows = records
            .into_iter()
            .map(Self::prepare)
            .collect::<Result<Vec<_>>>()?;
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Vec<Screening>> {
                if let Some(update) = child_conditions {
                    debug!("[DB] Recording screening conditions for child {}", update.child_id);
                    modify_child(conn, &update.child_id, |row| {
                        if update.skin_condition.is_some() {
                            row.skin_condition = update.skin_condition;
                        }
                        if update.posture_condition.is_some() {
                            row.posture_condition = update.posture_condition;
                        }
                        row.last_screening = Some(update.screened_on);
                    })?;
                }
                rows.iter()
                    .map(|row| Screening::try_from(insert_screening(conn, row)?))
                    .collect()
            })
            .await
    }

    async fn update(&self, screening_update: ScreeningUpdate) -> Result<Screening> {
        let screening_id = screening_update.id.clone().unwrap_or_default();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Screening> {
                debug!("[DB] Updating screening {}", screening_id);
                let mut existing = screenings
                    .find(&screening_id)
                    .select(ScreeningDB::as_select())
                    .first::<ScreeningDB>(conn)
                    .optional()
                    .into_core()?
                    .ok_or_else(|| Error::not_found("Screening", screening_id.clone()))?;

                existing.apply(screening_update, chrono::Utc::now().naive_utc())?;
                diesel::update(screenings.find(&screening_id))
                    .set(&existing)
                    .execute(conn)
                    .into_core()?;
                Screening::try_from(existing)
            })
            .await
    }

    async fn delete(&self, screening_id: &str) -> Result<usize> {
        let screening_id = screening_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                debug!("[DB] Deleting screening {}", screening_id);
                diesel::delete(screenings.find(screening_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }

    fn get_by_id(&self, screening_id: &str) -> Result<Screening> {
        let mut conn = get_connection(&self.pool)?;
        let row = screenings
            .find(screening_id)
            .select(ScreeningDB::as_select())
            .first::<ScreeningDB>(&mut conn)
            .optional()
            .into_core()?
            .ok_or_else(|| Error::not_found("Screening", screening_id))?;
        Screening::try_from(row)
    }

    fn list(&self) -> Result<Vec<Screening>> {
        debug!("[DB] Fetching screenings");
        self.load(screenings::table.into_boxed())
    }

    fn list_by_person(&self, subject_id: &str, subject_type: SubjectType) -> Result<Vec<Screening>> {
        debug!("[DB] Fetching screenings for {} {}", subject_type, subject_id);
        self.load(
            screenings::table
                .filter(person_id.eq(subject_id.to_string()))
                .filter(person_type.eq(subject_type.as_str()))
                .into_boxed(),
        )
    }

    fn count(&self) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;
        let total: i64 = screenings
            .select(count_star())
            .first(&mut conn)
            .into_core()?;
        Ok(total as usize)
    }

    fn count_created_since(&self, since: NaiveDateTime) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;
        let recent: i64 = screenings
            .filter(created_at.ge(since))
            .select(count_star())
            .first(&mut conn)
            .into_core()?;
        Ok(recent as usize)
    }
}
