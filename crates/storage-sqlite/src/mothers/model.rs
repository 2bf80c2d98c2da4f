//! Database model for mothers.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use babyassist_core::mothers::{Mother, MotherUpdate, NewMother};
use babyassist_core::Result;

use crate::utils::parse_column;

#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::mothers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct MotherDB {
    pub id: String,
    pub name: String,
    pub age: Option<i32>,
    pub mobile: Option<String>,
    pub address: Option<String>,
    pub risk_level: String,
    pub pregnancy_week: Option<i32>,
    pub last_visit: Option<NaiveDate>,
    pub children_count: i32,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl MotherDB {
    /// Applies an update on top of the stored row, keeping id and creation time.
    pub fn apply(&mut self, update: MotherUpdate, now: NaiveDateTime) {
        self.name = update.name;
        self.age = update.age;
        self.mobile = update.mobile;
        self.address = update.address;
        self.risk_level = update.risk_level.as_str().to_string();
        self.pregnancy_week = update.pregnancy_week;
        self.last_visit = update.last_visit;
        self.children_count = update.children_count;
        self.latitude = update.latitude;
        self.longitude = update.longitude;
        self.updated_at = now;
    }
}

impl TryFrom<MotherDB> for Mother {
    type Error = babyassist_core::Error;

    fn try_from(db: MotherDB) -> Result<Self> {
        Ok(Self {
            risk_level: parse_column("risk_level", &db.risk_level)?,
            id: db.id,
            name: db.name,
            age: db.age,
            mobile: db.mobile,
            address: db.address,
            pregnancy_week: db.pregnancy_week,
            last_visit: db.last_visit,
            children_count: db.children_count,
            latitude: db.latitude,
            longitude: db.longitude,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<NewMother> for MotherDB {
    fn from(domain: NewMother) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: domain.id.unwrap_or_default(),
            name: domain.name,
            age: domain.age,
            mobile: domain.mobile,
            address: domain.address,
            risk_level: domain.risk_level.as_str().to_string(),
            pregnancy_week: domain.pregnancy_week,
            last_visit: domain.last_visit,
            children_count: domain.children_count,
            latitude: domain.latitude,
            longitude: domain.longitude,
            created_at: now,
            updated_at: now,
        }
    }
}
