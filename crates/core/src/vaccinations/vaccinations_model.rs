//! Vaccination domain models and progress calculation.

use chrono::NaiveDateTime;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_TOTAL_VACCINES;
use crate::errors::{Error, Result};

/// The tracked vaccines. `true` means administered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct VaccineChecklist {
    pub bcg: bool,
    pub opv_0: bool,
    pub hepatitis_b: bool,
    pub pentavalent_1: bool,
    pub rotavirus_1: bool,
    pub measles_rubella_1: bool,
}

impl VaccineChecklist {
    pub fn flags(&self) -> [bool; 6] {
        [
            self.bcg,
            self.opv_0,
            self.hepatitis_b,
            self.pentavalent_1,
            self.rotavirus_1,
            self.measles_rubella_1,
        ]
    }

    pub fn completed_count(&self) -> i32 {
        self.flags().iter().filter(|given| **given).count() as i32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaccinationProgress {
    pub completed: i32,
    pub percentage: i32,
}

/// `round(completed / total * 100)`, half away from zero.
///
/// The total is used as stored and is not clamped; a total of zero or less
/// yields 0 %.
pub fn calculate_progress(checklist: &VaccineChecklist, total_vaccines: i32) -> VaccinationProgress {
    let completed = checklist.completed_count();
    let percentage = if total_vaccines <= 0 {
        0
    } else {
        (Decimal::from(completed) * Decimal::ONE_HUNDRED / Decimal::from(total_vaccines))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i32()
            .unwrap_or(0)
    };
    VaccinationProgress {
        completed,
        percentage,
    }
}

/// A child's vaccination record. One per child.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vaccination {
    pub id: String,
    pub child_id: String,
    #[serde(flatten)]
    pub checklist: VaccineChecklist,
    pub total_vaccines: i32,
    pub completed_vaccines: i32,
    pub progress_percentage: i32,
    pub last_updated: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Vaccination {
    /// Recomputes the derived counters from the checklist.
    pub fn refresh_progress(&mut self, now: NaiveDateTime) {
        let progress = calculate_progress(&self.checklist, self.total_vaccines);
        self.completed_vaccines = progress.completed;
        self.progress_percentage = progress.percentage;
        self.last_updated = now;
    }
}

fn default_total_vaccines() -> i32 {
    DEFAULT_TOTAL_VACCINES
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVaccination {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub child_id: String,
    #[serde(flatten)]
    pub checklist: VaccineChecklist,
    #[serde(default = "default_total_vaccines")]
    pub total_vaccines: i32,
}

impl NewVaccination {
    /// An empty checklist for a child.
    pub fn for_child(child_id: impl Into<String>) -> Self {
        Self {
            id: None,
            child_id: child_id.into(),
            checklist: VaccineChecklist::default(),
            total_vaccines: DEFAULT_TOTAL_VACCINES,
        }
    }

    pub fn progress(&self) -> VaccinationProgress {
        calculate_progress(&self.checklist, self.total_vaccines)
    }

    pub fn validate(&self) -> Result<()> {
        if self.child_id.trim().is_empty() {
            return Err(Error::invalid_input("Child ID cannot be empty"));
        }
        if self.total_vaccines < 0 {
            return Err(Error::invalid_input("Total vaccines cannot be negative"));
        }
        Ok(())
    }
}
