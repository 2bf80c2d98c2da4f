use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use diesel::SqliteConnection;
use log::debug;
use std::sync::Arc;
use uuid::Uuid;

use babyassist_core::examinations::{
    Examination, ExaminationRepositoryTrait, ExaminationUpdate, NewExamination,
};
use babyassist_core::{Error, Result, SubjectType};

use super::model::ExaminationDB;
use crate::children::modify_child;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::examinations;
use crate::schema::examinations::dsl::*;

pub struct ExaminationRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ExaminationRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    fn load(&self, query: examinations::BoxedQuery<'_, Sqlite>) -> Result<Vec<Examination>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = query
            .select(ExaminationDB::as_select())
            .order(created_at.desc())
            .load::<ExaminationDB>(&mut conn)
            .into_core()?;
        rows.into_iter().map(Examination::try_from).collect()
    }

    fn prepare(new_examination: NewExamination) -> Result<ExaminationDB> {
        let mut examination_db = ExaminationDB::from_new(new_examination)?;
        if examination_db.id.is_empty() {
            examination_db.id = Uuid::new_v4().to_string();
        }
        Ok(examination_db)
    }
}

fn insert_examination(
    conn: &mut SqliteConnection,
    examination_db: &ExaminationDB,
) -> Result<ExaminationDB> {
    debug!(
        "[DB] Creating examination {} for {} {}",
        examination_db.id, examination_db.person_type, examination_db.person_id
    );
    diesel::insert_into(examinations::table)
        .values(examination_db)
        .returning(ExaminationDB::as_returning())
        .get_result(conn)
        .into_core()
}

#[async_trait]
impl ExaminationRepositoryTrait for ExaminationRepository {
    async fn create(&self, new_examination: NewExamination) -> Result<Examination> {
        let examination_db = Self::prepare(new_examination)?;
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Examination> {
                Examination::try_from(insert_examination(conn, &examination_db)?)
            })
            .await
    }

    async fn create_submission(&self, new_examination: NewExamination) -> Result<Examination> {
        let child_status = (new_examination.person_type == SubjectType::Child)
            .then(|| (new_examination.person_id.clone(), new_examination.health_status));
        let examination_db = Self::prepare(new_examination)?;
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Examination> {
                let saved = insert_examination(conn, &examination_db)?;
                if let Some((child_id, status)) = child_status {
                    debug!("[DB] Setting health status of child {} to {}", child_id, status);
                    modify_child(conn, &child_id, |row| {
                        row.health_status = status.as_str().to_string();
                    })?;
                }
                Examination::try_from(saved)
            })
            .await
    }

    async fn update(&self, examination_update: ExaminationUpdate) -> Result<Examination> {
        let examination_id = examination_update.id.clone().unwrap_or_default();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Examination> {
                debug!("[DB] Updating examination {}", examination_id);
                let mut existing = examinations
                    .find(&examination_id)
                    .select(ExaminationDB::as_select())
                    .first::<ExaminationDB>(conn)
                    .optional()
                    .into_core()?
                    .ok_or_else(|| Error::not_found("Examination", examination_id.clone()))?;

                existing.apply(examination_update)?;
                diesel::update(examinations.find(&examination_id))
                    .set(&existing)
                    .execute(conn)
                    .into_core()?;
                Examination::try_from(existing)
            })
            .await
    }

    async fn delete(&self, examination_id: &str) -> Result<usize> {
        let examination_id = examination_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                debug!("[DB] Deleting examination {}", examination_id);
                diesel::delete(examinations.find(examination_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }

    fn get_by_id(&self, examination_id: &str) -> Result<Examination> {
        let mut conn = get_connection(&self.pool)?;
        let row = examinations
            .find(examination_id)
            .select(ExaminationDB::as_select())
            .first::<ExaminationDB>(&mut conn)
            .optional()
            .into_core()?
            .ok_or_else(|| Error::not_found("Examination", examination_id))?;
        Examination::try_from(row)
    }

    fn list(&self) -> Result<Vec<Examination>> {
        debug!("[DB] Fetching examinations");
        self.load(examinations::table.into_boxed())
    }

    fn list_by_person(
        &self,
        subject_id: &str,
        subject_type: SubjectType,
    ) -> Result<Vec<Examination>> {
        debug!("[DB] Fetching examinations for {} {}", subject_type, subject_id);
        self.load(
            examinations::table
                .filter(person_id.eq(subject_id.to_string()))
                .filter(person_type.eq(subject_type.as_str()))
                .into_boxed(),
        )
    }
}
