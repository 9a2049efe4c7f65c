use proptest::prelude::*;

use super::common::*;
use crate::workflows::underwriting::domain::{
    ApplicantId, ApplicationInput, DecisionStatus, EvidenceFlags, ProjectType, RegistrySource,
};
use crate::workflows::underwriting::evaluation::{
    gap_ratio, greenwashing_score, required_credits, SignalSet, MAX_SCORE,
};

fn arb_registry() -> impl Strategy<Value = RegistrySource> {
    prop_oneof![
        Just(RegistrySource::GoldStandard),
        Just(RegistrySource::Verra),
        Just(RegistrySource::Other),
        Just(RegistrySource::None),
        "[A-Za-z ]{1,12}".prop_map(RegistrySource::Unrecognized),
    ]
}

fn arb_project() -> impl Strategy<Value = ProjectType> {
    prop_oneof![
        Just(ProjectType::Reforestation),
        Just(ProjectType::Renewable),
        Just(ProjectType::Cookstove),
        Just(ProjectType::Other),
        Just(ProjectType::None),
        "[A-Za-z ]{1,12}".prop_map(ProjectType::Unrecognized),
    ]
}

fn arb_flag() -> impl Strategy<Value = Option<bool>> {
    prop_oneof![Just(None), Just(Some(true)), Just(Some(false))]
}

prop_compose! {
    fn arb_input()(
        loan_amount in 0.0f64..5_000_000.0,
        reported_credits in 0.0f64..100_000.0,
        verified_credits in 0.0f64..100_000.0,
        registry in arb_registry(),
        project_type in arb_project(),
        remote_sensing in arb_flag(),
        soil_tests_passed in arb_flag(),
    ) -> ApplicationInput {
        ApplicationInput {
            applicant_id: ApplicantId("prop".to_string()),
            loan_amount,
            reported_credits,
            verified_credits,
            registry,
            project_type,
            evidence: EvidenceFlags { remote_sensing, soil_tests_passed },
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Requirement grows with loan size.
    #[test]
    fn prop_required_credits_are_monotone(a in 0.0f64..1e9, b in 0.0f64..1e9) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let required_low = required_credits(low, 10.0);
        let required_high = required_credits(high, 10.0);
        prop_assert!(required_low >= 0.0);
        prop_assert!(required_low <= required_high);
        prop_assert!((required_high - high / 1000.0 * 10.0).abs() <= 0.005 + 1e-6);
    }

    /// The score stays in bounds for extreme signal combinations.
    #[test]
    fn prop_score_is_bounded(
        gap in 0.0f64..1e12,
        registry_quality in 0.0f64..=1.0,
        project_quality in 0.0f64..=1.0,
        biology_confidence in 0.0f64..=1.0,
        tolerance in 1e-6f64..10.0,
    ) {
        let signals = SignalSet { gap_ratio: gap, registry_quality, project_quality, biology_confidence };
        let score = greenwashing_score(&signals, tolerance);
        prop_assert!((0.0..=MAX_SCORE).contains(&score));
    }

    #[test]
    fn prop_gap_is_never_negative(reported in 0.0f64..1e9, verified in 0.0f64..1e9) {
        prop_assert!(gap_ratio(reported, verified) >= 0.0);
    }

    /// Rejections never carry a rate; approvals never price below the base rate.
    #[test]
    fn prop_rejected_pairs_with_zero_rate(input in arb_input()) {
        let assessment = engine().assess(&input);
        match assessment.status {
            DecisionStatus::Rejected => prop_assert_eq!(assessment.interest_rate, 0.0),
            DecisionStatus::Approved | DecisionStatus::ApprovedWithPenalty => {
                prop_assert!(assessment.interest_rate >= 0.06)
            }
        }
        prop_assert!((0.0..=MAX_SCORE).contains(&assessment.greenwashing_score));
        prop_assert!((0.0..=1.0).contains(&assessment.signals.biology_confidence));
    }

    /// More verified credits never make the outcome less favorable.
    #[test]
    fn prop_more_verified_credits_never_hurt(input in arb_input(), extra in 0.0f64..100_000.0) {
        let engine = engine();
        let before = engine.assess(&input);
        let improved = ApplicationInput {
            verified_credits: input.verified_credits + extra,
            ..input.clone()
        };
        let after = engine.assess(&improved);
        prop_assert!(
            after.status.favorability() >= before.status.favorability(),
            "{:?} -> {:?}", before.status, after.status
        );
    }

    /// Assessment is a pure function of its input.
    #[test]
    fn prop_assessment_is_idempotent(input in arb_input()) {
        let engine = engine();
        prop_assert_eq!(engine.assess(&input), engine.assess(&input));
    }
}
