//! Health assessment - BMI, risk-factor counting and the examination questionnaires.
//!
//! Everything here is pure: no I/O, no shared state. The examination service
//! composes these functions with persistence.

mod assessment_model;
mod bmi;
mod health_status;
mod questionnaire;


pub use assessment_model::{
    Answers, Assessment, BmiCategory, BmiResult, HealthStatus, SubjectType,
};
pub use bmi::{calculate_bmi, classify_bmi, BmiThresholds};
pub use health_status::{
    assess, count_risk_factors, determine_health_status, CHILD_RISK_ANSWERS, MOTHER_RISK_ANSWERS,
};
pub use questionnaire::{
    ensure_complete, missing_answers, questions_for, Question, QuestionKind, CHILD_QUESTIONS,
    MOTHER_QUESTIONS,
};
