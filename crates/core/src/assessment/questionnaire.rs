//! Fixed examination questionnaires, one per subject type.

use serde::Serialize;

use super::assessment_model::{Answers, SubjectType};
use crate::errors::{Error, Result, ValidationError};

/// How a question is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum QuestionKind {
    Number { unit: &'static str },
    Radio { options: &'static [&'static str] },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: &'static str,
    pub question: &'static str,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

pub const CHILD_QUESTIONS: &[Question] = &[
    Question {
        id: "height",
        question: "What is the child's height?",
        kind: QuestionKind::Number { unit: "cm" },
    },
    Question {
        id: "weight",
        question: "What is the child's weight?",
        kind: QuestionKind::Number { unit: "kg" },
    },
    Question {
        id: "feeding",
        question: "Is the child fed properly?",
        kind: QuestionKind::Radio {
            options: &["Yes", "No", "Sometimes"],
        },
    },
    Question {
        id: "vaccination",
        question: "Has the child been vaccinated on schedule?",
        kind: QuestionKind::Radio {
            options: &["Yes", "No", "Partially"],
        },
    },
    Question {
        id: "fever",
        question: "Has the child had frequent fevers in the last month?",
        kind: QuestionKind::Radio {
            options: &["Yes", "No", "Occasionally"],
        },
    },
];

pub const MOTHER_QUESTIONS: &[Question] = &[
    Question {
        id: "weight",
        question: "What is your current weight?",
        kind: QuestionKind::Number { unit: "kg" },
    },
    Question {
        id: "chronic_conditions",
        question: "Do you have any chronic health conditions?",
        kind: QuestionKind::Radio {
            options: &["Yes", "No", "Not sure"],
        },
    },
    Question {
        id: "complications",
        question: "Are you experiencing any pregnancy complications?",
        kind: QuestionKind::Radio {
            options: &["Yes", "No", "Minor issues"],
        },
    },
    Question {
        id: "vitamins",
        question: "Have you been taking prenatal vitamins regularly?",
        kind: QuestionKind::Radio {
            options: &["Yes", "No", "Sometimes"],
        },
    },
    Question {
        id: "symptoms",
        question: "Are you experiencing any unusual symptoms?",
        kind: QuestionKind::Radio {
            options: &["Yes", "No", "Mild symptoms"],
        },
    },
];

pub fn questions_for(subject: SubjectType) -> &'static [Question] {
    match subject {
        SubjectType::Mother => MOTHER_QUESTIONS,
        SubjectType::Child => CHILD_QUESTIONS,
    }
}

/// Ids of catalogue questions without an answer, in catalogue order.
pub fn missing_answers(subject: SubjectType, answers: &Answers) -> Vec<String> {
    questions_for(subject)
        .iter()
        .filter(|q| !answers.is_answered(q.id))
        .map(|q| q.id.to_string())
        .collect()
}

/// Rejects a questionnaire unless every question has been answered.
pub fn ensure_complete(subject: SubjectType, answers: &Answers) -> Result<()> {
    let missing = missing_answers(subject, answers);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation(ValidationError::MissingAnswers(missing)))
    }
}
