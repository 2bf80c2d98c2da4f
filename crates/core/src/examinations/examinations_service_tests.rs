#[cfg(test)]
mod tests {
    use crate::assessment::{Answers, BmiCategory, HealthStatus, SubjectType};
    use crate::errors::{Error, ValidationError};
    use crate::examinations::*;
    use crate::test_fixtures::{
        child, mother, MockChildRepository, MockExaminationRepository, MockMotherRepository,
    };
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    struct Fixture {
        service: ExaminationService,
        children: MockChildRepository,
        examinations: MockExaminationRepository,
    }

    fn fixture() -> Fixture {
        let mothers = MockMotherRepository::with(vec![
            mother("m-aged", Some(26), None),
            mother("m-no-age", None, None),
        ]);
        let children = MockChildRepository::with(vec![child("c1", "m-aged", 10)]);
        let examinations = MockExaminationRepository::linked(children.clone());
        let service = ExaminationService::new(
            Arc::new(examinations.clone()),
            Arc::new(mothers),
            Arc::new(children.clone()),
        );
        Fixture {
            service,
            children,
            examinations,
        }
    }

    fn mother_answers(weight: &str) -> Answers {
        Answers::new()
            .with("weight", weight)
            .with("chronic_conditions", "Yes")
            .with("complications", "No")
            .with("vitamins", "No")
            .with("symptoms", "No")
    }

    #[tokio::test]
    async fn test_mother_submission_uses_height_estimate() {
        let f = fixture();
        // 80 / 1.6^2 = 31.25, obese, plus two risky answers
        let exam = f
            .service
            .submit_examination(SubjectType::Mother, "m-aged", mother_answers("80"))
            .await
            .unwrap();

        assert_eq!(exam.bmi, Some(dec!(31.25)));
        assert_eq!(exam.bmi_category, Some(BmiCategory::Obese));
        assert_eq!(exam.health_status, HealthStatus::Critical);
        assert!(exam
            .notes
            .as_deref()
            .unwrap()
            .starts_with("Examination completed on "));
        assert_eq!(f.examinations.list().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_mother_without_age_gets_no_bmi() {
        let f = fixture();
        let exam = f
            .service
            .submit_examination(SubjectType::Mother, "m-no-age", mother_answers("80"))
            .await
            .unwrap();

        assert_eq!(exam.bmi, None);
        assert_eq!(exam.bmi_category, None);
        // Category defaults to normal, leaving the two answer risks.
        assert_eq!(exam.health_status, HealthStatus::NeedsAttention);
    }

    #[tokio::test]
    async fn test_child_submission_refreshes_child_status() {
        let f = fixture();
        let answers = Answers::new()
            .with("height", "75")
            .with("weight", "8")
            .with("feeding", "No")
            .with("vaccination", "Partially")
            .with("fever", "Yes");

        let exam = f
            .service
            .submit_examination(SubjectType::Child, "c1", answers)
            .await
            .unwrap();

        // 8 / 0.75^2 = 14.22, underweight for a child
        assert_eq!(exam.bmi, Some(dec!(14.22)));
        assert_eq!(exam.bmi_category, Some(BmiCategory::Underweight));
        assert_eq!(exam.health_status, HealthStatus::Critical);
        assert_eq!(
            f.children.snapshot("c1").health_status,
            HealthStatus::Critical
        );
    }

    #[tokio::test]
    async fn test_incomplete_questionnaire_is_rejected() {
        let f = fixture();
        let answers = Answers::new().with("weight", "60");

        let err = f
            .service
            .submit_examination(SubjectType::Mother, "m-aged", answers)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::MissingAnswers(_))
        ));
        assert!(f.examinations.list().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_person_is_not_found() {
        let f = fixture();
        let result = f
            .service
            .submit_examination(SubjectType::Mother, "ghost", mother_answers("60"))
            .await;
        assert!(matches!(result, Err(Error::NotFound { entity: "Mother", .. })));
    }

    #[tokio::test]
    async fn test_examinations_listed_per_person() {
        let f = fixture();
        f.service
            .submit_examination(SubjectType::Mother, "m-aged", mother_answers("55"))
            .await
            .unwrap();
        f.service
            .submit_examination(SubjectType::Mother, "m-no-age", mother_answers("55"))
            .await
            .unwrap();

        let found = f
            .service
            .get_examinations_for(SubjectType::Mother, "m-aged")
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].person_id, "m-aged");
        assert!(f
            .service
            .get_examinations_for(SubjectType::Child, "m-aged")
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_create_requires_bmi_and_category_together() {
        let f = fixture();
        let result = f
            .service
            .create_examination(NewExamination {
                id: None,
                person_id: "m-aged".to_string(),
                person_type: SubjectType::Mother,
                answers: Answers::new(),
                bmi: Some(dec!(22.5)),
                bmi_category: None,
                health_status: HealthStatus::Healthy,
                notes: None,
            })
            .await;
        assert!(result.is_err());
    }
}
