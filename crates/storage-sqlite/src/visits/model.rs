//! Database model for visits.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use babyassist_core::visits::{NewVisit, Visit, VisitUpdate};
use babyassist_core::Result;

use crate::utils::parse_column;

#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::visits)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct VisitDB {
    pub id: String,
    pub mother_id: String,
    pub visit_date: NaiveDate,
    pub visit_type: String,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl VisitDB {
    pub fn apply(&mut self, update: VisitUpdate, now: NaiveDateTime) {
        self.visit_date = update.visit_date;
        self.visit_type = update.visit_type.as_str().to_string();
        self.status = update.status.as_str().to_string();
        self.notes = update.notes;
        self.updated_at = now;
    }
}

impl TryFrom<VisitDB> for Visit {
    type Error = babyassist_core::Error;

    fn try_from(db: VisitDB) -> Result<Self> {
        Ok(Self {
            visit_type: parse_column("visit_type", &db.visit_type)?,
            status: parse_column("status", &db.status)?,
            id: db.id,
            mother_id: db.mother_id,
            visit_date: db.visit_date,
            notes: db.notes,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<NewVisit> for VisitDB {
    fn from(domain: NewVisit) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: domain.id.unwrap_or_default(),
            mother_id: domain.mother_id,
            visit_date: domain.visit_date,
            visit_type: domain.visit_type.as_str().to_string(),
            status: domain.status.as_str().to_string(),
            notes: domain.notes,
            created_at: now,
            updated_at: now,
        }
    }
}
