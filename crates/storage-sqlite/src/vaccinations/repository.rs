use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use std::sync::Arc;
use uuid::Uuid;

use babyassist_core::vaccinations::{NewVaccination, Vaccination, VaccinationRepositoryTrait};
use babyassist_core::{Error, Result};

use super::model::VaccinationDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::vaccinations;
use crate::schema::vaccinations::dsl::*;

pub struct VaccinationRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl VaccinationRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl VaccinationRepositoryTrait for VaccinationRepository {
    async fn create(&self, new_vaccination: NewVaccination) -> Result<Vaccination> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Vaccination> {
                let mut vaccination_db: VaccinationDB = new_vaccination.into();
                if vaccination_db.id.is_empty() {
                    vaccination_db.id = Uuid::new_v4().to_string();
                }
                debug!(
                    "[DB] Creating vaccination record for child {}",
                    vaccination_db.child_id
                );

                let saved = diesel::insert_into(vaccinations::table)
                    .values(&vaccination_db)
                    .returning(VaccinationDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(Vaccination::from(saved))
            })
            .await
    }

    async fn update(&self, vaccination: Vaccination) -> Result<Vaccination> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Vaccination> {
                debug!("[DB] Updating vaccination record {}", vaccination.id);
                let mut vaccination_db: VaccinationDB = vaccination.into();
                vaccination_db.updated_at = chrono::Utc::now().naive_utc();

                let affected = diesel::update(vaccinations.find(&vaccination_db.id))
                    .set(&vaccination_db)
                    .execute(conn)
                    .into_core()?;
                if affected == 0 {
                    return Err(Error::not_found("Vaccination", vaccination_db.id));
                }
                Ok(Vaccination::from(vaccination_db))
            })
            .await
    }

    async fn delete(&self, vaccination_id: &str) -> Result<usize> {
        let vaccination_id = vaccination_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                debug!("[DB] Deleting vaccination record {}", vaccination_id);
                diesel::delete(vaccinations.find(vaccination_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }

    fn get_by_id(&self, vaccination_id: &str) -> Result<Vaccination> {
        let mut conn = get_connection(&self.pool)?;
        vaccinations
            .find(vaccination_id)
            .select(VaccinationDB::as_select())
            .first::<VaccinationDB>(&mut conn)
            .optional()
            .into_core()?
            .map(Vaccination::from)
            .ok_or_else(|| Error::not_found("Vaccination", vaccination_id))
    }

    fn get_by_child(&self, target_child_id: &str) -> Result<Option<Vaccination>> {
        debug!("[DB] Fetching vaccination record for child {}", target_child_id);
        let mut conn = get_connection(&self.pool)?;
        let row = vaccinations
            .filter(child_id.eq(target_child_id.to_string()))
            .select(VaccinationDB::as_select())
            .first::<VaccinationDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(Vaccination::from))
    }
}
