use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use std::sync::Arc;
use uuid::Uuid;

use babyassist_core::mothers::{
    Mother, MotherRepositoryTrait, MotherUpdate, NewMother, RiskLevel,
};
use babyassist_core::{Error, Result};

use super::model::MotherDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::mothers;
use crate::schema::mothers::dsl::*;

pub struct MotherRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl MotherRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    fn load(&self, query: mothers::BoxedQuery<'_, diesel::sqlite::Sqlite>) -> Result<Vec<Mother>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = query
            .select(MotherDB::as_select())
            .order(created_at.desc())
            .load::<MotherDB>(&mut conn)
            .into_core()?;
        rows.into_iter().map(Mother::try_from).collect()
    }
}

#[async_trait]
impl MotherRepositoryTrait for MotherRepository {
    async fn create(&self, new_mother: NewMother) -> Result<Mother> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Mother> {
                let mut mother_db: MotherDB = new_mother.into();
                if mother_db.id.is_empty() {
                    mother_db.id = Uuid::new_v4().to_string();
                }
                debug!("[DB] Creating mother {}", mother_db.id);

                let saved = diesel::insert_into(mothers::table)
                    .values(&mother_db)
                    .returning(MotherDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Mother::try_from(saved)
            })
            .await
    }

    async fn update(&self, mother_update: MotherUpdate) -> Result<Mother> {
        let mother_id = mother_update.id.clone().unwrap_or_default();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Mother> {
                debug!("[DB] Updating mother {}", mother_id);
                let mut existing = mothers
                    .find(&mother_id)
                    .select(MotherDB::as_select())
                    .first::<MotherDB>(conn)
                    .optional()
                    .into_core()?
                    .ok_or_else(|| Error::not_found("Mother", mother_id.clone()))?;

                existing.apply(mother_update, chrono::Utc::now().naive_utc());
                diesel::update(mothers.find(&mother_id))
                    .set(&existing)
                    .execute(conn)
                    .into_core()?;
                Mother::try_from(existing)
            })
            .await
    }

    async fn delete(&self, mother_id: &str) -> Result<usize> {
        let mother_id = mother_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                debug!("[DB] Deleting mother {}", mother_id);
                diesel::delete(mothers.find(mother_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }

    fn get_by_id(&self, mother_id: &str) -> Result<Mother> {
        let mut conn = get_connection(&self.pool)?;
        let row = mothers
            .find(mother_id)
            .select(MotherDB::as_select())
            .first::<MotherDB>(&mut conn)
            .optional()
            .into_core()?
            .ok_or_else(|| Error::not_found("Mother", mother_id))?;
        Mother::try_from(row)
    }

    fn list(&self) -> Result<Vec<Mother>> {
        debug!("[DB] Fetching mothers");
        self.load(mothers::table.into_boxed())
    }

    fn list_by_risk_level(&self, level: RiskLevel) -> Result<Vec<Mother>> {
        debug!("[DB] Fetching mothers with risk level {}", level);
        self.load(
            mothers::table
                .filter(risk_level.eq(level.as_str()))
                .into_boxed(),
        )
    }
}
