//! Database model for examinations.
//!
//! Answers are stored as a JSON object and the BMI as its decimal string.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use babyassist_core::examinations::{Examination, ExaminationUpdate, NewExamination};
use babyassist_core::Result;

use crate::errors::IntoCore;
use crate::utils::{parse_column, parse_decimal_column, parse_optional_column};

#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::examinations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct ExaminationDB {
    pub id: String,
    pub person_id: String,
    pub person_type: String,
    pub answers: String,
    pub bmi: Option<String>,
    pub bmi_category: Option<String>,
    pub health_status: String,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

impl ExaminationDB {
    pub fn from_new(domain: NewExamination) -> Result<Self> {
        Ok(Self {
            id: domain.id.unwrap_or_default(),
            person_id: domain.person_id,
            person_type: domain.person_type.as_str().to_string(),
            answers: serde_json::to_string(&domain.answers).into_core()?,
            bmi: domain.bmi.map(|value| value.to_string()),
            bmi_category: domain.bmi_category.map(|c| c.as_str().to_string()),
            health_status: domain.health_status.as_str().to_string(),
            notes: domain.notes,
            created_at: chrono::Utc::now().naive_utc(),
        })
    }

    pub fn apply(&mut self, update: ExaminationUpdate) -> Result<()> {
        self.answers = serde_json::to_string(&update.answers).into_core()?;
        self.bmi = update.bmi.map(|value| value.to_string());
        self.bmi_category = update.bmi_category.map(|c| c.as_str().to_string());
        self.health_status = update.health_status.as_str().to_string();
        self.notes = update.notes;
        Ok(())
    }
}

impl TryFrom<ExaminationDB> for Examination {
    type Error = babyassist_core::Error;

    fn try_from(db: ExaminationDB) -> Result<Self> {
        Ok(Self {
            person_type: parse_column("person_type", &db.person_type)?,
            answers: serde_json::from_str(&db.answers).into_core()?,
            bmi: parse_decimal_column("bmi", db.bmi.as_deref())?,
            bmi_category: parse_optional_column("bmi_category", db.bmi_category.as_deref())?,
            health_status: parse_column("health_status", &db.health_status)?,
            id: db.id,
            person_id: db.person_id,
            notes: db.notes,
            created_at: db.created_at,
        })
    }
}
