//! Database model for children.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use babyassist_core::children::{Child, ChildUpdate, NewChild};
use babyassist_core::Result;

use crate::utils::parse_column;

#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::children)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct ChildDB {
    pub id: String,
    pub name: String,
    pub age_in_months: i32,
    pub mother_id: String,
    pub health_status: String,
    pub last_screening: Option<NaiveDate>,
    pub vaccinations_completed: i32,
    pub vaccinations_total: i32,
    pub has_photo: bool,
    pub skin_condition: Option<String>,
    pub posture_condition: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl ChildDB {
    /// Applies an update on top of the stored row. The mother link is fixed.
    pub fn apply(&mut self, update: ChildUpdate, now: NaiveDateTime) {
        self.name = update.name;
        self.age_in_months = update.age_in_months;
        self.health_status = update.health_status.as_str().to_string();
        self.last_screening = update.last_screening;
        self.vaccinations_completed = update.vaccinations_completed;
        self.vaccinations_total = update.vaccinations_total;
        self.has_photo = update.has_photo;
        self.skin_condition = update.skin_condition;
        self.posture_condition = update.posture_condition;
        self.updated_at = now;
    }
}

impl TryFrom<ChildDB> for Child {
    type Error = babyassist_core::Error;

    fn try_from(db: ChildDB) -> Result<Self> {
        Ok(Self {
            health_status: parse_column("health_status", &db.health_status)?,
            id: db.id,
            name: db.name,
            age_in_months: db.age_in_months,
            mother_id: db.mother_id,
            last_screening: db.last_screening,
            vaccinations_completed: db.vaccinations_completed,
            vaccinations_total: db.vaccinations_total,
            has_photo: db.has_photo,
            skin_condition: db.skin_condition,
            posture_condition: db.posture_condition,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<NewChild> for ChildDB {
    fn from(domain: NewChild) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: domain.id.unwrap_or_default(),
            name: domain.name,
            age_in_months: domain.age_in_months,
            mother_id: domain.mother_id,
            health_status: domain.health_status.as_str().to_string(),
            last_screening: None,
            vaccinations_completed: domain.vaccinations_completed,
            vaccinations_total: domain.vaccinations_total,
            has_photo: domain.has_photo,
            skin_condition: None,
            posture_condition: None,
            created_at: now,
            updated_at: now,
        }
    }
}
