// crates/check-gate-core/src/core/suite.rs
// ============================================================================
// Module: Suite Specification
// Description: Ordered tests, their check tables, and shared source declarations.
// Purpose: Provide one validated value the runner executes end to end.
// Dependencies: crate::core::{check, identifiers, policy, source}, serde
// ============================================================================

//! ## Overview
//! A [`SuiteSpec`] is the in-memory form of a suite file. Tests run in
//! declaration order and are fully independent: each one names its own
//! verdict policy and loads only the sources its checks reference.
//! [`SuiteSpec::validate`] checks structural invariants before a run starts.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::check::CheckDefinition;
use crate::core::check::PredicateError;
use crate::core::identifiers::SourceName;
use crate::core::identifiers::SuiteName;
use crate::core::identifiers::TestName;
use crate::core::policy::MissingSourcePolicy;
use crate::core::policy::PolicyError;
use crate::core::policy::SuitePolicy;
use crate::core::policy::VerdictMessages;
use crate::core::policy::VerdictPolicy;
use crate::core::source::SourceDefinition;

// ============================================================================
// SECTION: Specifications
// ============================================================================

/// Suite specification executed by [`SuiteRunner`](crate::runtime::SuiteRunner).
///
/// # Invariants
/// - Source, test and per-test check names are unique and non-empty.
/// - Every source referenced by a check is declared in `sources`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteSpec {
    /// Suite name.
    pub name: SuiteName,
    /// Suite-level outcome policy.
    #[serde(default)]
    pub policy: SuitePolicy,
    /// Declared sources.
    #[serde(default)]
    pub sources: Vec<SourceDefinition>,
    /// Ordered tests.
    #[serde(default)]
    pub tests: Vec<TestDefinition>,
}

impl SuiteSpec {
    /// Looks up a source declaration by name.
    #[must_use]
    pub fn source(&self, name: &SourceName) -> Option<&SourceDefinition> {
        self.sources.iter().find(|source| &source.name == name)
    }

    /// Validates names, source references, predicates and policies.
    ///
    /// # Errors
    ///
    /// Returns the first [`SpecError`] found, in declaration order.
    pub fn validate(&self) -> Result<(), SpecError> {
        if self.name.as_str().trim().is_empty() {
            return Err(SpecError::EmptyName("suite".to_string()));
        }
        self.policy.validate().map_err(|source| SpecError::Policy {
            scope: "suite".to_string(),
            source,
        })?;

        let mut declared = BTreeSet::new();
        for source in &self.sources {
            if source.name.as_str().trim().is_empty() {
                return Err(SpecError::EmptyName("source".to_string()));
            }
            if !declared.insert(source.name.clone()) {
                return Err(SpecError::Duplicate(format!("source {}", source.name)));
            }
        }

        let mut tests = BTreeSet::new();
        for test in &self.tests {
            if !tests.insert(test.name.clone()) {
                return Err(SpecError::Duplicate(format!("test {}", test.name)));
            }
            test.validate(&declared)?;
        }
        Ok(())
    }
}

/// One named test: a check table plus its verdict policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestDefinition {
    /// Test name, unique within the suite.
    pub name: TestName,
    /// Optional free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Verdict policy; required per test.
    pub policy: VerdictPolicy,
    /// Handling of unavailable sources.
    #[serde(default)]
    pub on_missing_source: MissingSourcePolicy,
    /// Optional message templates.
    #[serde(default)]
    pub messages: VerdictMessages,
    /// Ordered check table.
    #[serde(default)]
    pub checks: Vec<CheckDefinition>,
}

impl TestDefinition {
    /// Creates a test with default missing-source handling and messages.
    #[must_use]
    pub fn new(
        name: impl Into<TestName>,
        policy: VerdictPolicy,
        checks: Vec<CheckDefinition>,
    ) -> Self {
        Self {
            name: name.into(),
            description: None,
            policy,
            on_missing_source: MissingSourcePolicy::Evaluate,
            messages: VerdictMessages::default(),
            checks,
        }
    }

    /// Returns every source referenced by this test's checks.
    #[must_use]
    pub fn sources(&self) -> BTreeSet<SourceName> {
        self.checks.iter().flat_map(|check| check.predicate.sources()).collect()
    }

    /// Rejects a score policy whose PASS threshold exceeds the total check weight.
    fn validate_score_reachable(&self) -> Result<(), SpecError> {
        let VerdictPolicy::Score {
            pass_min_score,
            ..
        } = self.policy
        else {
            return Ok(());
        };
        if self.checks.is_empty() {
            return Ok(());
        }
        let max_score: u64 = self.checks.iter().map(|check| u64::from(check.weight)).sum();
        if u64::from(pass_min_score) > max_score {
            return Err(SpecError::Policy {
                scope: format!("test {}", self.name),
                source: PolicyError::Unreachable(format!(
                    "pass_min_score {pass_min_score} exceeds total check weight {max_score}"
                )),
            });
        }
        Ok(())
    }

    /// Validates this test against the declared source names.
    fn validate(&self, declared: &BTreeSet<SourceName>) -> Result<(), SpecError> {
        if self.name.as_str().trim().is_empty() {
            return Err(SpecError::EmptyName("test".to_string()));
        }
        self.policy.validate().map_err(|source| SpecError::Policy {
            scope: format!("test {}", self.name),
            source,
        })?;
        self.validate_score_reachable()?;
        let mut checks = BTreeSet::new();
        for check in &self.checks {
            if check.name.as_str().trim().is_empty() {
                return Err(SpecError::EmptyName(format!("check in test {}", self.name)));
            }
            if !checks.insert(check.name.clone()) {
                return Err(SpecError::Duplicate(format!(
                    "check {} in test {}",
                    check.name, self.name
                )));
            }
            check.predicate.validate().map_err(|source| SpecError::Predicate {
                test: self.name.to_string(),
                check: check.name.to_string(),
                source,
            })?;
            for source in check.predicate.sources() {
                if !declared.contains(&source) {
                    return Err(SpecError::UndeclaredSource {
                        test: self.name.to_string(),
                        check: check.name.to_string(),
                        source_name: source.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Structural errors in a suite specification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    /// A name is empty or whitespace.
    #[error("{0} name must be non-empty")]
    EmptyName(String),
    /// A name is declared twice.
    #[error("duplicate {0}")]
    Duplicate(String),
    /// A check references a source that is not declared.
    #[error("check {check} in test {test} references undeclared source {source_name}")]
    UndeclaredSource {
        /// Owning test.
        test: String,
        /// Offending check.
        check: String,
        /// Missing source name.
        source_name: String,
    },
    /// A predicate failed validation.
    #[error("check {check} in test {test}: {source}")]
    Predicate {
        /// Owning test.
        test: String,
        /// Offending check.
        check: String,
        /// Underlying predicate error.
        source: PredicateError,
    },
    /// A policy failed validation.
    #[error("{scope} policy: {source}")]
    Policy {
        /// Suite or test scope.
        scope: String,
        /// Underlying policy error.
        source: PolicyError,
    },
}
