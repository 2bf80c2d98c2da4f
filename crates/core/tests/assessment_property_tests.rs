//! Property-based tests for the assessment rules, vaccination progress and
//! nearest-point search.

use babyassist_core::assessment::{
    assess, calculate_bmi, ensure_complete, questions_for, Answers, BmiCategory, HealthStatus,
    QuestionKind, SubjectType, CHILD_RISK_ANSWERS, MOTHER_RISK_ANSWERS,
};
use babyassist_core::vaccinations::{calculate_progress, VaccineChecklist};
use babyassist_core::visits::{find_nearest, planar_distance, GeoPoint};
use proptest::prelude::*;
use rust_decimal::Decimal;

// =============================================================================
// Generators
// =============================================================================

fn arb_subject() -> impl Strategy<Value = SubjectType> {
    prop_oneof![Just(SubjectType::Mother), Just(SubjectType::Child)]
}

/// Weight in tenths of a kilogram, 1.0 to 150.0 kg.
fn arb_weight() -> impl Strategy<Value = Decimal> {
    (10i64..=1500).prop_map(|tenths| Decimal::new(tenths, 1))
}

/// Height in whole centimetres, 40 to 200 cm.
fn arb_height() -> impl Strategy<Value = Decimal> {
    (40i64..=200).prop_map(Decimal::from)
}

/// A full questionnaire with radio answers picked from each question's options.
fn arb_answers(subject: SubjectType) -> impl Strategy<Value = Answers> {
    let choices: Vec<_> = questions_for(subject)
        .iter()
        .map(|q| match q.kind {
            QuestionKind::Radio { options } => {
                proptest::sample::select(options.to_vec())
                    .prop_map(move |answer| (q.id, answer.to_string()))
                    .boxed()
            }
            QuestionKind::Number { .. } => (1u32..=150)
                .prop_map(move |value| (q.id, value.to_string()))
                .boxed(),
        })
        .collect();
    choices.prop_map(|pairs| pairs.into_iter().collect::<Answers>())
}

fn arb_checklist() -> impl Strategy<Value = VaccineChecklist> {
    proptest::array::uniform6(any::<bool>()).prop_map(|flags| VaccineChecklist {
        bcg: flags[0],
        opv_0: flags[1],
        hepatitis_b: flags[2],
        pentavalent_1: flags[3],
        rotavirus_1: flags[4],
        measles_rubella_1: flags[5],
    })
}

fn arb_location() -> impl Strategy<Value = Option<GeoPoint>> {
    proptest::option::of(
        (-90.0f64..90.0, -180.0f64..180.0).prop_map(|(lat, lng)| GeoPoint::new(lat, lng)),
    )
}

fn risk_answer_count(subject: SubjectType, answers: &Answers) -> usize {
    let table = match subject {
        SubjectType::Mother => MOTHER_RISK_ANSWERS,
        SubjectType::Child => CHILD_RISK_ANSWERS,
    };
    table
        .iter()
        .filter(|(id, risky)| answers.text(id) == Some(*risky))
        .count()
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The reported BMI is the formula value rounded to two places.
    #[test]
    fn prop_bmi_matches_formula(
        weight in arb_weight(),
        height in arb_height(),
        subject in arb_subject(),
    ) {
        let result = calculate_bmi(weight, height, subject).unwrap();
        let metres = height / Decimal::ONE_HUNDRED;
        let exact = weight / (metres * metres);

        prop_assert!(result.bmi.scale() <= 2);
        prop_assert!((result.bmi - exact).abs() <= Decimal::new(5, 3));
    }

    /// For a fixed height, a heavier subject never lands in a lighter band.
    #[test]
    fn prop_bmi_category_is_monotonic_in_weight(
        w1 in arb_weight(),
        w2 in arb_weight(),
        height in arb_height(),
        subject in arb_subject(),
    ) {
        let (light, heavy) = if w1 <= w2 { (w1, w2) } else { (w2, w1) };
        let rank = |c: BmiCategory| match c {
            BmiCategory::Underweight => 0,
            BmiCategory::Normal => 1,
            BmiCategory::Overweight => 2,
            BmiCategory::Obese => 3,
        };
        let light = calculate_bmi(light, height, subject).unwrap().category;
        let heavy = calculate_bmi(heavy, height, subject).unwrap().category;
        prop_assert!(rank(light) <= rank(heavy));
    }

    /// Non-positive measurements are always rejected.
    #[test]
    fn prop_non_positive_height_is_rejected(
        weight in arb_weight(),
        height in -200i64..=0,
        subject in arb_subject(),
    ) {
        prop_assert!(calculate_bmi(weight, Decimal::from(height), subject).is_err());
    }

    /// Health status follows the counted factors: 0, 1-2, 3+.
    #[test]
    fn prop_health_status_follows_risk_factors(
        (subject, answers) in arb_subject().prop_flat_map(|s| (Just(s), arb_answers(s))),
        height in proptest::option::of(arb_height()),
    ) {
        let assessment = assess(&answers, subject, height).unwrap();
        let category = assessment.bmi.map(|b| b.category).unwrap_or_default();

        let expected = risk_answer_count(subject, &answers) + usize::from(category.is_risk());
        prop_assert_eq!(assessment.risk_factors, expected);

        let status = match expected {
            0 => HealthStatus::Healthy,
            1 | 2 => HealthStatus::NeedsAttention,
            _ => HealthStatus::Critical,
        };
        prop_assert_eq!(assessment.health_status, status);
    }

    /// Every generated questionnaire is complete; dropping any answer is not.
    #[test]
    fn prop_questionnaire_completeness(
        (subject, answers) in arb_subject().prop_flat_map(|s| (Just(s), arb_answers(s))),
        skip in 0usize..5,
    ) {
        prop_assert!(ensure_complete(subject, &answers).is_ok());

        let skipped = questions_for(subject)[skip].id;
        let partial: Answers = answers
            .iter()
            .filter(|(id, _)| id.as_str() != skipped)
            .map(|(id, value)| (id.clone(), value.clone()))
            .collect();
        let err = ensure_complete(subject, &partial).unwrap_err();
        prop_assert!(err.to_string().contains(skipped));
    }

    /// With the standard six vaccines the percentage stays within 0-100 and
    /// the completed count equals the number of ticked flags.
    #[test]
    fn prop_vaccination_progress_bounds(checklist in arb_checklist()) {
        let progress = calculate_progress(&checklist, 6);
        let ticked = checklist.flags().iter().filter(|f| **f).count() as i32;

        prop_assert_eq!(progress.completed, ticked);
        prop_assert!((0..=100).contains(&progress.percentage));
        prop_assert_eq!(progress.percentage == 100, ticked == 6);
    }

    /// The nearest candidate is no farther than any other located candidate.
    #[test]
    fn prop_nearest_is_minimal(
        origin in (-90.0f64..90.0, -180.0f64..180.0),
        candidates in proptest::collection::vec(arb_location(), 0..30),
    ) {
        let origin = GeoPoint::new(origin.0, origin.1);
        let indexed: Vec<(usize, Option<GeoPoint>)> =
            candidates.iter().copied().enumerate().collect();
        let nearest = find_nearest(origin, indexed.clone(), |(_, point)| *point);

        let located: Vec<GeoPoint> = candidates.iter().flatten().copied().collect();
        match nearest {
            None => prop_assert!(located.is_empty()),
            Some(((index, point), distance)) => {
                prop_assert!(point.is_some());
                prop_assert_eq!(indexed[index].1, point);
                for other in located {
                    prop_assert!(distance <= planar_distance(origin, other));
                }
            }
        }
    }
}
