// crates/check-gate-core/src/core/check.rs
// ============================================================================
// Module: Check Definitions
// Description: Named boolean predicates evaluated against loaded source text.
// Purpose: Describe check tables as data rather than code.
// Dependencies: crate::core::identifiers, regex, serde, serde_json
// ============================================================================

//! ## Overview
//! A check pairs a stable name with a [`Predicate`]. Leaf predicates inspect a
//! single named source (substring, regex, occurrence count, JSON path,
//! presence); composite predicates combine leaves with `all`, `any`, `not`,
//! and `at_least`. Definitions are immutable once built and are validated
//! before any evaluation happens.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use regex::Regex;
use regex::RegexBuilder;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::core::identifiers::CheckName;
use crate::core::identifiers::SourceName;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum compiled size for a single check regex, in bytes.
pub const MAX_REGEX_SIZE_BYTES: usize = 1024 * 1024;
/// Maximum nesting depth of composite predicates.
pub const MAX_PREDICATE_DEPTH: usize = 16;

// ============================================================================
// SECTION: Check Definition
// ============================================================================

/// Named predicate evaluated as one row of a check table.
///
/// # Invariants
/// - `name` is unique within its owning test (enforced by config validation).
/// - `weight` only affects score-based verdict policies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckDefinition {
    /// Check name shown in diagnostics.
    pub name: CheckName,
    /// Predicate evaluated for this check.
    #[serde(flatten)]
    pub predicate: Predicate,
    /// Score contributed when the check passes.
    #[serde(default = "default_weight")]
    pub weight: u32,
}

impl CheckDefinition {
    /// Creates a check with the default weight of 1.
    #[must_use]
    pub fn new(name: impl Into<CheckName>, predicate: Predicate) -> Self {
        Self {
            name: name.into(),
            predicate,
            weight: default_weight(),
        }
    }

    /// Returns the check with an explicit score weight.
    #[must_use]
    pub const fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }
}

/// Default score weight for a check.
const fn default_weight() -> u32 {
    1
}

// ============================================================================
// SECTION: Predicates
// ============================================================================

/// Boolean predicate over one or more named source blobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Predicate {
    /// Literal substring containment.
    Contains {
        /// Source inspected by the predicate.
        source: SourceName,
        /// Literal text that must occur.
        needle: String,
        /// Compare lower-cased text and needle.
        #[serde(default)]
        case_insensitive: bool,
    },
    /// Regular-expression search (a match anywhere in the text).
    Regex {
        /// Source inspected by the predicate.
        source: SourceName,
        /// Pattern in `regex` crate syntax.
        pattern: String,
        /// Case-insensitive matching.
        #[serde(default)]
        case_insensitive: bool,
        /// Allow `.` to match newlines.
        #[serde(default)]
        dot_matches_newline: bool,
    },
    /// Non-overlapping literal occurrence count compared against a threshold.
    Count {
        /// Source inspected by the predicate.
        source: SourceName,
        /// Literal text to count.
        needle: String,
        /// Compare lower-cased text and needle.
        #[serde(default)]
        case_insensitive: bool,
        /// Comparison applied as `count <comparator> threshold`.
        comparator: CountComparator,
        /// Threshold compared against the count.
        threshold: usize,
    },
    /// `JSONPath` selection over a JSON or YAML document.
    JsonPath {
        /// Source inspected by the predicate.
        source: SourceName,
        /// `JSONPath` expression.
        path: String,
        /// Document format of the source text.
        #[serde(default)]
        format: DocumentFormat,
        /// Optional expected value for the selection.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        equals: Option<Value>,
    },
    /// True when the source loaded successfully.
    Present {
        /// Source whose availability is checked.
        source: SourceName,
    },
    /// True when every nested predicate is true.
    All {
        /// Nested predicates.
        predicates: Vec<Self>,
    },
    /// True when any nested predicate is true.
    Any {
        /// Nested predicates.
        predicates: Vec<Self>,
    },
    /// Logical negation.
    Not {
        /// Negated predicate.
        predicate: Box<Self>,
    },
    /// True when at least `min` nested predicates are true.
    AtLeast {
        /// Minimum number of true predicates.
        min: usize,
        /// Nested predicates.
        predicates: Vec<Self>,
    },
}

impl Predicate {
    /// Builds a case-sensitive substring predicate.
    #[must_use]
    pub fn contains(source: impl Into<SourceName>, needle: impl Into<String>) -> Self {
        Self::Contains {
            source: source.into(),
            needle: needle.into(),
            case_insensitive: false,
        }
    }

    /// Builds a case-insensitive substring predicate.
    #[must_use]
    pub fn contains_ignore_case(source: impl Into<SourceName>, needle: impl Into<String>) -> Self {
        Self::Contains {
            source: source.into(),
            needle: needle.into(),
            case_insensitive: true,
        }
    }

    /// Builds a case-sensitive regex search predicate.
    #[must_use]
    pub fn regex(source: impl Into<SourceName>, pattern: impl Into<String>) -> Self {
        Self::Regex {
            source: source.into(),
            pattern: pattern.into(),
            case_insensitive: false,
            dot_matches_newline: false,
        }
    }

    /// Builds an occurrence-count predicate.
    #[must_use]
    pub fn count(
        source: impl Into<SourceName>,
        needle: impl Into<String>,
        comparator: CountComparator,
        threshold: usize,
    ) -> Self {
        Self::Count {
            source: source.into(),
            needle: needle.into(),
            case_insensitive: false,
            comparator,
            threshold,
        }
    }

    /// Builds a conjunction.
    #[must_use]
    pub const fn all(predicates: Vec<Self>) -> Self {
        Self::All {
            predicates,
        }
    }

    /// Builds a disjunction.
    #[must_use]
    pub const fn any(predicates: Vec<Self>) -> Self {
        Self::Any {
            predicates,
        }
    }

    /// Builds a negation.
    #[must_use]
    pub fn negate(predicate: Self) -> Self {
        Self::Not {
            predicate: Box::new(predicate),
        }
    }

    /// Returns every source referenced by this predicate, in sorted order.
    #[must_use]
    pub fn sources(&self) -> BTreeSet<SourceName> {
        let mut out = BTreeSet::new();
        self.collect_sources(&mut out);
        out
    }

    /// Accumulates referenced sources into `out`.
    fn collect_sources(&self, out: &mut BTreeSet<SourceName>) {
        match self {
            Self::Contains {
                source, ..
            }
            | Self::Regex {
                source, ..
            }
            | Self::Count {
                source, ..
            }
            | Self::JsonPath {
                source, ..
            }
            | Self::Present {
                source,
            } => {
                out.insert(source.clone());
            }
            Self::All {
                predicates,
            }
            | Self::Any {
                predicates,
            }
            | Self::AtLeast {
                predicates, ..
            } => {
                for predicate in predicates {
                    predicate.collect_sources(out);
                }
            }
            Self::Not {
                predicate,
            } => predicate.collect_sources(out),
        }
    }

    /// Validates patterns, paths, and structure without evaluating.
    ///
    /// # Errors
    ///
    /// Returns [`PredicateError`] when a regex or `JSONPath` does not compile,
    /// a needle or composite is empty, or nesting is too deep.
    pub fn validate(&self) -> Result<(), PredicateError> {
        self.validate_at_depth(0)
    }

    /// Recursive validation with depth tracking.
    fn validate_at_depth(&self, depth: usize) -> Result<(), PredicateError> {
        if depth > MAX_PREDICATE_DEPTH {
            return Err(PredicateError::TooDeep {
                limit: MAX_PREDICATE_DEPTH,
            });
        }
        match self {
            Self::Contains {
                needle, ..
            }
            | Self::Count {
                needle, ..
            } => {
                if needle.is_empty() {
                    return Err(PredicateError::EmptyNeedle);
                }
                Ok(())
            }
            Self::Present {
                ..
            } => Ok(()),
            Self::Regex {
                pattern,
                case_insensitive,
                dot_matches_newline,
                ..
            } => compile_pattern(pattern, *case_insensitive, *dot_matches_newline)
                .map(|_| ())
                .map_err(|err| PredicateError::InvalidPattern {
                    pattern: pattern.clone(),
                    error: err.to_string(),
                }),
            Self::JsonPath {
                path, ..
            } => validate_json_path(path),
            Self::All {
                predicates,
            }
            | Self::Any {
                predicates,
            } => {
                if predicates.is_empty() {
                    return Err(PredicateError::EmptyComposite);
                }
                for predicate in predicates {
                    predicate.validate_at_depth(depth + 1)?;
                }
                Ok(())
            }
            Self::AtLeast {
                min,
                predicates,
            } => {
                if predicates.is_empty() {
                    return Err(PredicateError::EmptyComposite);
                }
                if *min > predicates.len() {
                    return Err(PredicateError::UnreachableMinimum {
                        min: *min,
                        available: predicates.len(),
                    });
                }
                for predicate in predicates {
                    predicate.validate_at_depth(depth + 1)?;
                }
                Ok(())
            }
            Self::Not {
                predicate,
            } => predicate.validate_at_depth(depth + 1),
        }
    }
}

// ============================================================================
// SECTION: Comparators and Formats
// ============================================================================

/// Comparator applied to occurrence counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountComparator {
    /// `count == threshold`
    Eq,
    /// `count != threshold`
    Ne,
    /// `count > threshold`
    Gt,
    /// `count >= threshold`
    Gte,
    /// `count < threshold`
    Lt,
    /// `count <= threshold`
    Lte,
}

impl CountComparator {
    /// Applies the comparator as `count <op> threshold`.
    #[must_use]
    pub const fn compare(self, count: usize, threshold: usize) -> bool {
        match self {
            Self::Eq => count == threshold,
            Self::Ne => count != threshold,
            Self::Gt => count > threshold,
            Self::Gte => count >= threshold,
            Self::Lt => count < threshold,
            Self::Lte => count <= threshold,
        }
    }
}

/// Structured document formats understood by `json_path` predicates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    /// JSON document.
    #[default]
    Json,
    /// YAML document.
    Yaml,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Structural errors detected while validating a predicate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredicateError {
    /// Regex failed to compile.
    #[error("invalid regex {pattern:?}: {error}")]
    InvalidPattern {
        /// Offending pattern.
        pattern: String,
        /// Compiler message.
        error: String,
    },
    /// `JSONPath` failed to parse.
    #[error("invalid jsonpath {path:?}")]
    InvalidJsonPath {
        /// Offending path.
        path: String,
    },
    /// Literal needle is empty.
    #[error("needle must be non-empty")]
    EmptyNeedle,
    /// Composite predicate has no children.
    #[error("composite predicate must contain at least one predicate")]
    EmptyComposite,
    /// `at_least` minimum exceeds the number of children.
    #[error("at_least min {min} exceeds {available} predicates")]
    UnreachableMinimum {
        /// Requested minimum.
        min: usize,
        /// Number of nested predicates.
        available: usize,
    },
    /// Nesting exceeds [`MAX_PREDICATE_DEPTH`].
    #[error("predicate nesting exceeds depth {limit}")]
    TooDeep {
        /// Depth limit.
        limit: usize,
    },
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Compiles a check regex with the configured flags and size limit.
pub(crate) fn compile_pattern(
    pattern: &str,
    case_insensitive: bool,
    dot_matches_newline: bool,
) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .dot_matches_new_line(dot_matches_newline)
        .size_limit(MAX_REGEX_SIZE_BYTES)
        .build()
}

/// Rejects `JSONPath` expressions that do not parse.
fn validate_json_path(path: &str) -> Result<(), PredicateError> {
    jsonpath_lib::select(&Value::Null, path).map(|_| ()).map_err(|_| {
        PredicateError::InvalidJsonPath {
            path: path.to_string(),
        }
    })
}
