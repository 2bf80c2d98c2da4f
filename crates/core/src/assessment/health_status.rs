use rust_decimal::Decimal;

use super::assessment_model::{Answers, Assessment, BmiCategory, HealthStatus, SubjectType};
use super::bmi::calculate_bmi;
use crate::errors::Result;

/// Answer values that count as a risk factor for children.
pub const CHILD_RISK_ANSWERS: &[(&str, &str)] =
    &[("feeding", "No"), ("vaccination", "No"), ("fever", "Yes")];

/// Answer values that count as a risk factor for mothers.
pub const MOTHER_RISK_ANSWERS: &[(&str, &str)] = &[
    ("chronic_conditions", "Yes"),
    ("complications", "Yes"),
    ("vitamins", "No"),
    ("symptoms", "Yes"),
];

fn risk_answers(subject: SubjectType) -> &'static [(&'static str, &'static str)] {
    match subject {
        SubjectType::Mother => MOTHER_RISK_ANSWERS,
        SubjectType::Child => CHILD_RISK_ANSWERS,
    }
}

/// Counts risk factors for a questionnaire.
///
/// Matching is exact: "Sometimes", "Not sure", "Minor issues" and any
/// non-string answer do not count.
pub fn count_risk_factors(answers: &Answers, category: BmiCategory, subject: SubjectType) -> usize {
    let bmi_risk = usize::from(category.is_risk());
    let answer_risks = risk_answers(subject)
        .iter()
        .filter(|(question_id, risky)| answers.text(question_id) == Some(*risky))
        .count();
    bmi_risk + answer_risks
}

pub fn determine_health_status(
    answers: &Answers,
    category: BmiCategory,
    subject: SubjectType,
) -> HealthStatus {
    HealthStatus::from_risk_factors(count_risk_factors(answers, category, subject))
}

/// Runs BMI and classification together.
///
/// BMI is computed only when the `weight` answer and `height_cm` are both
/// present; otherwise the category defaults to normal.
pub fn assess(
    answers: &Answers,
    subject: SubjectType,
    height_cm: Option<Decimal>,
) -> Result<Assessment> {
    let weight = answers.measurement("weight")?;
    let bmi = match (weight, height_cm) {
        (Some(weight), Some(height)) => Some(calculate_bmi(weight, height, subject)?),
        _ => None,
    };

    let category = bmi.map(|b| b.category).unwrap_or_default();
    let risk_factors = count_risk_factors(answers, category, subject);

    Ok(Assessment {
        bmi,
        risk_factors,
        health_status: HealthStatus::from_risk_factors(risk_factors),
    })
}
