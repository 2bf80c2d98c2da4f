//! Examinations module - questionnaire submissions and their assessments.

mod examinations_model;
mod examinations_service;
mod examinations_traits;

#[cfg(test)]
mod examinations_service_tests;

pub use examinations_model::{Examination, ExaminationUpdate, NewExamination};
pub use examinations_service::ExaminationService;
pub use examinations_traits::{ExaminationRepositoryTrait, ExaminationServiceTrait};
