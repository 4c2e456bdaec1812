// crates/check-gate-core/src/tests.rs
// ============================================================================
// Module: Core Test Lint Configuration
// Description: Shared test-only lint relaxations for core unit tests.
// Purpose: Allow panic-based assertions and debug output in tests.
// Dependencies: check-gate-core
// ============================================================================

//! ## Overview
//! Provides test-only lint relaxations for core unit tests.

// ============================================================================
// SECTION: Lint Configuration
// ============================================================================

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Unit Tests
// ============================================================================

use crate::core::CheckDefinition;
use crate::core::CountComparator;
use crate::core::Predicate;
use crate::core::PredicateError;
use crate::core::SuitePolicy;
use crate::core::SuccessCriterion;
use crate::core::VerdictPolicy;
use crate::core::check::compile_pattern;
use crate::core::policy::PolicyError;

#[test]
fn compile_pattern_applies_flags() {
    let regex = compile_pattern("start.*end", true, true).unwrap();
    assert!(regex.is_match("START\nmiddle\nEND"));
    let regex = compile_pattern("start.*end", false, false).unwrap();
    assert!(!regex.is_match("start\nend"));
}

#[test]
fn predicate_validate_rejects_bad_regex() {
    let err = Predicate::regex("bot", "(unclosed").validate().unwrap_err();
    assert!(matches!(err, PredicateError::InvalidPattern { .. }));
}

#[test]
fn predicate_validate_rejects_empty_needle_and_composites() {
    assert_eq!(Predicate::contains("bot", "").validate(), Err(PredicateError::EmptyNeedle));
    assert_eq!(Predicate::all(Vec::new()).validate(), Err(PredicateError::EmptyComposite));
    let at_least = Predicate::AtLeast {
        min: 3,
        predicates: vec![Predicate::contains("bot", "a"), Predicate::contains("bot", "b")],
    };
    assert_eq!(
        at_least.validate(),
        Err(PredicateError::UnreachableMinimum {
            min: 3,
            available: 2
        })
    );
}

#[test]
fn predicate_validate_limits_depth() {
    let mut predicate = Predicate::contains("bot", "x");
    for _ in 0 ..= crate::core::check::MAX_PREDICATE_DEPTH {
        predicate = Predicate::negate(predicate);
    }
    assert!(matches!(predicate.validate(), Err(PredicateError::TooDeep { .. })));
}

#[test]
fn predicate_sources_are_collected_from_nested_predicates() {
    let predicate = Predicate::all(vec![
        Predicate::contains("bot", "a"),
        Predicate::negate(Predicate::count("manager", "b", CountComparator::Gte, 2)),
    ]);
    let names: Vec<String> = predicate.sources().iter().map(ToString::to_string).collect();
    assert_eq!(names, vec!["bot".to_string(), "manager".to_string()]);
}

#[test]
fn count_comparators_follow_their_names() {
    assert!(CountComparator::Eq.compare(0, 0));
    assert!(CountComparator::Ne.compare(1, 0));
    assert!(CountComparator::Gt.compare(5, 4));
    assert!(CountComparator::Gte.compare(4, 4));
    assert!(CountComparator::Lt.compare(3, 4));
    assert!(CountComparator::Lte.compare(4, 4));
    assert!(!CountComparator::Gte.compare(3, 4));
}

#[test]
fn verdict_policy_validate_rejects_inverted_bands() {
    let tolerance = VerdictPolicy::Tolerance {
        pass_max_failures: 3,
        warn_max_failures: 1,
    };
    assert!(matches!(tolerance.validate(), Err(PolicyError::InvertedBand(_))));
    let ratio = VerdictPolicy::Ratio {
        pass_min_percent: 120,
        warn_min_percent: 50,
    };
    assert!(matches!(ratio.validate(), Err(PolicyError::PercentOutOfRange { .. })));
    assert!(VerdictPolicy::warn_up_to(2).validate().is_ok());
}

#[test]
fn suite_policy_validate_orders_degraded_band() {
    let policy = SuitePolicy {
        success: SuccessCriterion::MinSuccessRate {
            percent: 60,
        },
        degraded_min_success_rate: Some(80),
        ..SuitePolicy::default()
    };
    assert!(matches!(policy.validate(), Err(PolicyError::InvertedBand(_))));
}

#[test]
fn check_definition_defaults_weight_to_one() {
    let check = CheckDefinition::new("menu", Predicate::contains("bot", "showAirdropMenu"));
    assert_eq!(check.weight, 1);
    assert_eq!(check.with_weight(3).weight, 3);
}

#[test]
fn check_definition_deserializes_flattened_predicate() {
    let check: CheckDefinition = serde_json::from_value(serde_json::json!({
        "name": "no dalle",
        "kind": "count",
        "source": "bot",
        "needle": "dall-e",
        "case_insensitive": true,
        "comparator": "eq",
        "threshold": 0
    }))
    .unwrap();
    assert_eq!(
        check.predicate,
        Predicate::Count {
            source: "bot".into(),
            needle: "dall-e".to_string(),
            case_insensitive: true,
            comparator: CountComparator::Eq,
            threshold: 0,
        }
    );
}
