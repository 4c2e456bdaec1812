// crates/check-gate-core/src/runtime/evaluator.rs
// ============================================================================
// Module: Check Table Evaluator
// Description: Evaluates named predicates against loaded source text.
// Purpose: Produce ordered per-check results with explicit unavailability.
// Dependencies: crate::core, jsonpath_lib, regex, serde_json, serde_yaml
// ============================================================================

//! ## Overview
//! Evaluation is pure: the same checks over the same [`SourceSet`] always
//! yield the same results. A check that references an unavailable source is
//! never evaluated; it is recorded as [`CheckOutcome::SourceUnavailable`] and
//! counts as failed, even under `not`.
//!
//! Malformed inputs that make a predicate meaningless (bad regex, bad
//! `JSONPath`, unparsable JSON or YAML) are reported as [`EvaluationError`]
//! rather than silently treated as false.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use thiserror::Error;

use crate::core::CheckDefinition;
use crate::core::CheckName;
use crate::core::CheckOutcome;
use crate::core::CheckResult;
use crate::core::DocumentFormat;
use crate::core::Predicate;
use crate::core::SourceName;
use crate::core::SourceSet;
use crate::core::check::compile_pattern;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors that prevent a check from being evaluated at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    /// Regex failed to compile.
    #[error("check {check}: invalid regex: {error}")]
    InvalidPattern {
        /// Offending check.
        check: String,
        /// Compiler message.
        error: String,
    },
    /// `JSONPath` failed to parse.
    #[error("check {check}: invalid jsonpath {path:?}")]
    InvalidJsonPath {
        /// Offending check.
        check: String,
        /// Offending path.
        path: String,
    },
    /// Source text is not a valid JSON or YAML document.
    #[error("check {check}: malformed {format} in source {source_name}: {error}")]
    MalformedDocument {
        /// Offending check.
        check: String,
        /// Source that failed to parse.
        source_name: String,
        /// Expected document format.
        format: &'static str,
        /// Parser message.
        error: String,
    },
}

// ============================================================================
// SECTION: Evaluation
// ============================================================================

/// Evaluates every check in definition order.
///
/// # Errors
///
/// Returns [`EvaluationError`] for the first check whose predicate cannot be
/// evaluated on available sources.
pub fn evaluate_checks(
    checks: &[CheckDefinition],
    sources: &SourceSet,
) -> Result<Vec<CheckResult>, EvaluationError> {
    checks.iter().map(|check| evaluate_check(check, sources)).collect()
}

/// Evaluates a single check.
///
/// # Errors
///
/// Returns [`EvaluationError`] when the predicate cannot be evaluated.
pub fn evaluate_check(
    check: &CheckDefinition,
    sources: &SourceSet,
) -> Result<CheckResult, EvaluationError> {
    let missing: Vec<SourceName> = check
        .predicate
        .sources()
        .into_iter()
        .filter(|name| !sources.is_available(name))
        .collect();
    if !missing.is_empty() {
        return Ok(CheckResult::new(
            check.name.clone(),
            CheckOutcome::SourceUnavailable {
                sources: missing,
            },
            check.weight,
        ));
    }
    let satisfied = evaluate_predicate(&check.name, &check.predicate, sources)?;
    let outcome = if satisfied { CheckOutcome::Satisfied } else { CheckOutcome::Unsatisfied };
    Ok(CheckResult::new(check.name.clone(), outcome, check.weight))
}

/// Evaluates a predicate whose sources are all available.
///
/// Composite predicates evaluate every child so that evaluation errors do not
/// depend on child order.
fn evaluate_predicate(
    check: &CheckName,
    predicate: &Predicate,
    sources: &SourceSet,
) -> Result<bool, EvaluationError> {
    match predicate {
        Predicate::Contains {
            source,
            needle,
            case_insensitive,
        } => {
            let text = source_text(sources, source);
            Ok(if *case_insensitive {
                text.to_lowercase().contains(&needle.to_lowercase())
            } else {
                text.contains(needle.as_str())
            })
        }
        Predicate::Regex {
            source,
            pattern,
            case_insensitive,
            dot_matches_newline,
        } => {
            let regex = compile_pattern(pattern, *case_insensitive, *dot_matches_newline)
                .map_err(|err| EvaluationError::InvalidPattern {
                    check: check.to_string(),
                    error: err.to_string(),
                })?;
            Ok(regex.is_match(source_text(sources, source)))
        }
        Predicate::Count {
            source,
            needle,
            case_insensitive,
            comparator,
            threshold,
        } => {
            let count = count_occurrences(source_text(sources, source), needle, *case_insensitive);
            Ok(comparator.compare(count, *threshold))
        }
        Predicate::JsonPath {
            source,
            path,
            format,
            equals,
        } => {
            let document = parse_document(check, source, source_text(sources, source), *format)?;
            let selected = jsonpath_lib::select(&document, path).map_err(|_| {
                EvaluationError::InvalidJsonPath {
                    check: check.to_string(),
                    path: path.clone(),
                }
            })?;
            Ok(match equals {
                None => !selected.is_empty(),
                Some(expected) => selected.iter().any(|value| *value == expected),
            })
        }
        Predicate::Present {
            source,
        } => Ok(sources.is_available(source)),
        Predicate::All {
            predicates,
        } => {
            let results = evaluate_all(check, predicates, sources)?;
            Ok(results.iter().all(|value| *value))
        }
        Predicate::Any {
            predicates,
        } => {
            let results = evaluate_all(check, predicates, sources)?;
            Ok(results.iter().any(|value| *value))
        }
        Predicate::Not {
            predicate,
        } => Ok(!evaluate_predicate(check, predicate, sources)?),
        Predicate::AtLeast {
            min,
            predicates,
        } => {
            let results = evaluate_all(check, predicates, sources)?;
            Ok(results.iter().filter(|value| **value).count() >= *min)
        }
    }
}

/// Evaluates each child predicate in order.
fn evaluate_all(
    check: &CheckName,
    predicates: &[Predicate],
    sources: &SourceSet,
) -> Result<Vec<bool>, EvaluationError> {
    predicates.iter().map(|predicate| evaluate_predicate(check, predicate, sources)).collect()
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Counts non-overlapping, left-to-right literal occurrences of `needle`.
///
/// Case-insensitive counting lower-cases both sides first. An empty needle
/// counts zero occurrences.
#[must_use]
pub fn count_occurrences(text: &str, needle: &str, case_insensitive: bool) -> usize {
    if needle.is_empty() {
        return 0;
    }
    if case_insensitive {
        text.to_lowercase().matches(needle.to_lowercase().as_str()).count()
    } else {
        text.matches(needle).count()
    }
}

/// Returns loaded text for a source; callers check availability first.
fn source_text<'a>(sources: &'a SourceSet, name: &SourceName) -> &'a str {
    sources.blob(name).map_or("", |blob| blob.text.as_str())
}

/// Parses source text as a JSON or YAML document.
fn parse_document(
    check: &CheckName,
    source: &SourceName,
    text: &str,
    format: DocumentFormat,
) -> Result<Value, EvaluationError> {
    let malformed = |format: &'static str, error: String| EvaluationError::MalformedDocument {
        check: check.to_string(),
        source_name: source.to_string(),
        format,
        error,
    };
    match format {
        DocumentFormat::Json => {
            serde_json::from_str(text).map_err(|err| malformed("json", err.to_string()))
        }
        DocumentFormat::Yaml => {
            serde_yaml::from_str(text).map_err(|err| malformed("yaml", err.to_string()))
        }
    }
}
