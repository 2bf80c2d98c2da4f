//! Database model for screenings.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use babyassist_core::screenings::{NewScreening, Screening, ScreeningUpdate};
use babyassist_core::Result;

use crate::errors::IntoCore;
use crate::utils::parse_column;

#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::screenings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct ScreeningDB {
    pub id: String,
    pub person_id: String,
    pub person_type: String,
    pub image_url: Option<String>,
    pub analysis_results: String,
    pub analysis_type: String,
    pub condition: Option<String>,
    pub notes: Option<String>,
    pub risk_level: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl ScreeningDB {
    pub fn from_new(domain: NewScreening) -> Result<Self> {
        let now = chrono::Utc::now().naive_utc();
        Ok(Self {
            id: domain.id.unwrap_or_default(),
            person_id: domain.person_id,
            person_type: domain.person_type.as_str().to_string(),
            image_url: domain.image_url,
            analysis_results: serde_json::to_string(&domain.analysis_results).into_core()?,
            analysis_type: domain.analysis_type.as_str().to_string(),
            condition: domain.condition,
            notes: domain.notes,
            risk_level: domain.risk_level.as_str().to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn apply(&mut self, update: ScreeningUpdate, now: NaiveDateTime) -> Result<()> {
        self.image_url = update.image_url;
        self.analysis_results = serde_json::to_string(&update.analysis_results).into_core()?;
        self.analysis_type = update.analysis_type.as_str().to_string();
        self.condition = update.condition;
        self.notes = update.notes;
        self.risk_level = update.risk_level.as_str().to_string();
        self.updated_at = now;
        Ok(())
    }
}

impl TryFrom<ScreeningDB> for Screening {
    type Error = babyassist_core::Error;

    fn try_from(db: ScreeningDB) -> Result<Self> {
        Ok(Self {
            person_type: parse_column("person_type", &db.person_type)?,
            analysis_results: serde_json::from_str(&db.analysis_results).into_core()?,
            analysis_type: parse_column("analysis_type", &db.analysis_type)?,
            risk_level: parse_column("risk_level", &db.risk_level)?,
            id: db.id,
            person_id: db.person_id,
            image_url: db.image_url,
            condition: db.condition,
            notes: db.notes,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}
