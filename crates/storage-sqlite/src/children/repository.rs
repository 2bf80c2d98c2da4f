use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use diesel::SqliteConnection;
use log::debug;
use std::sync::Arc;
use uuid::Uuid;

use babyassist_core::assessment::HealthStatus;
use babyassist_core::children::{Child, ChildRepositoryTrait, ChildUpdate, NewChild};
use babyassist_core::{Error, Result};

use super::model::ChildDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::children;
use crate::schema::children::dsl::*;

pub struct ChildRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ChildRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    fn load(&self, query: children::BoxedQuery<'_, Sqlite>) -> Result<Vec<Child>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = query
            .select(ChildDB::as_select())
            .load::<ChildDB>(&mut conn)
            .into_core()?;
        rows.into_iter().map(Child::try_from).collect()
    }

    async fn modify<F>(&self, child_id: &str, change: F) -> Result<Child>
    where
        F: FnOnce(&mut ChildDB) + Send + 'static,
    {
        let child_id = child_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Child> {
                Child::try_from(modify_child(conn, &child_id, change)?)
            })
            .await
    }
}

/// Runs `change` against a stored child inside a write job and saves it with
/// a fresh `updated_at`. Fails with not-found when the child is missing.
pub(crate) fn modify_child<F>(
    conn: &mut SqliteConnection,
    child_id: &str,
    change: F,
) -> Result<ChildDB>
where
    F: FnOnce(&mut ChildDB),
{
    let mut row = children
        .find(child_id)
        .select(ChildDB::as_select())
        .first::<ChildDB>(conn)
        .optional()
        .into_core()?
        .ok_or_else(|| Error::not_found("Child", child_id))?;
    change(&mut row);
    row.updated_at = chrono::Utc::now().naive_utc();
    diesel::update(children.find(child_id))
        .set(&row)
        .execute(conn)
        .into_core()?;
    Ok(row)
}

#[async_trait]
impl ChildRepositoryTrait for ChildRepository {
    async fn create(&self, new_child: NewChild) -> Result<Child> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Child> {
                let mut child_db: ChildDB = new_child.into();
                if child_db.id.is_empty() {
                    child_db.id = Uuid::new_v4().to_string();
                }
                debug!("[DB] Creating child {}", child_db.id);

                let saved = diesel::insert_into(children::table)
                    .values(&child_db)
                    .returning(ChildDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Child::try_from(saved)
            })
            .await
    }

    async fn update(&self, child_update: ChildUpdate) -> Result<Child> {
        let child_id = child_update.id.clone().unwrap_or_default();
        debug!("[DB] Updating child {}", child_id);
        let now = chrono::Utc::now().naive_utc();
        self.modify(&child_id, move |row| row.apply(child_update, now))
            .await
    }

    async fn delete(&self, child_id: &str) -> Result<usize> {
        let child_id = child_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                debug!("[DB] Deleting child {}", child_id);
                diesel::delete(children.find(child_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }

    async fn set_vaccination_summary(
        &self,
        child_id: &str,
        completed: i32,
        total: i32,
    ) -> Result<Child> {
        self.modify(child_id, move |row| {
            row.vaccinations_completed = completed;
            row.vaccinations_total = total;
        })
        .await
    }

    fn get_by_id(&self, child_id: &str) -> Result<Child> {
        let mut conn = get_connection(&self.pool)?;
        let row = children
            .find(child_id)
            .select(ChildDB::as_select())
            .first::<ChildDB>(&mut conn)
            .optional()
            .into_core()?
            .ok_or_else(|| Error::not_found("Child", child_id))?;
        Child::try_from(row)
    }

    fn list(&self) -> Result<Vec<Child>> {
        debug!("[DB] Fetching children");
        self.load(children::table.order(created_at.desc()).into_boxed())
    }

    fn list_by_mother(&self, parent_id: &str) -> Result<Vec<Child>> {
        self.load(
            children::table
                .filter(mother_id.eq(parent_id.to_string()))
                .order(created_at.desc())
                .into_boxed(),
        )
    }

    fn list_by_age_range(&self, min_months: i32, max_months: i32) -> Result<Vec<Child>> {
        debug!(
            "[DB] Fetching children aged {} to {} months",
            min_months, max_months
        );
        self.load(
            children::table
                .filter(age_in_months.between(min_months, max_months))
                .order((age_in_months.asc(), created_at.asc()))
                .into_boxed(),
        )
    }

    fn list_by_health_status(&self, status: HealthStatus) -> Result<Vec<Child>> {
        self.load(
            children::table
                .filter(health_status.eq(status.as_str()))
                .order(created_at.desc())
                .into_boxed(),
        )
    }
}
