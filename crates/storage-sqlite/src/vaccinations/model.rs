//! Database model for vaccination records.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use babyassist_core::vaccinations::{NewVaccination, Vaccination, VaccineChecklist};

#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::vaccinations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct VaccinationDB {
    pub id: String,
    pub child_id: String,
    pub bcg: bool,
    pub opv_0: bool,
    pub hepatitis_b: bool,
    pub pentavalent_1: bool,
    pub rotavirus_1: bool,
    pub measles_rubella_1: bool,
    pub total_vaccines: i32,
    pub completed_vaccines: i32,
    pub progress_percentage: i32,
    pub last_updated: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<VaccinationDB> for Vaccination {
    fn from(db: VaccinationDB) -> Self {
        Self {
            id: db.id,
            child_id: db.child_id,
            checklist: VaccineChecklist {
                bcg: db.bcg,
                opv_0: db.opv_0,
                hepatitis_b: db.hepatitis_b,
                pentavalent_1: db.pentavalent_1,
                rotavirus_1: db.rotavirus_1,
                measles_rubella_1: db.measles_rubella_1,
            },
            total_vaccines: db.total_vaccines,
            completed_vaccines: db.completed_vaccines,
            progress_percentage: db.progress_percentage,
            last_updated: db.last_updated,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<Vaccination> for VaccinationDB {
    fn from(domain: Vaccination) -> Self {
        let checklist = domain.checklist;
        Self {
            id: domain.id,
            child_id: domain.child_id,
            bcg: checklist.bcg,
            opv_0: checklist.opv_0,
            hepatitis_b: checklist.hepatitis_b,
            pentavalent_1: checklist.pentavalent_1,
            rotavirus_1: checklist.rotavirus_1,
            measles_rubella_1: checklist.measles_rubella_1,
            total_vaccines: domain.total_vaccines,
            completed_vaccines: domain.completed_vaccines,
            progress_percentage: domain.progress_percentage,
            last_updated: domain.last_updated,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}

impl From<NewVaccination> for VaccinationDB {
    fn from(domain: NewVaccination) -> Self {
        let now = chrono::Utc::now().naive_utc();
        let progress = domain.progress();
        Vaccination {
            id: domain.id.unwrap_or_default(),
            child_id: domain.child_id,
            checklist: domain.checklist,
            total_vaccines: domain.total_vaccines,
            completed_vaccines: progress.completed,
            progress_percentage: progress.percentage,
            last_updated: now,
            created_at: now,
            updated_at: now,
        }
        .into()
    }
}
