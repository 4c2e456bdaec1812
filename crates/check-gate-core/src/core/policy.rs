// crates/check-gate-core/src/core/policy.rs
// ============================================================================
// Module: Verdict and Suite Policies
// Description: Explicit per-test verdict thresholds and per-suite exit rules.
// Purpose: Make every PASS/WARN/FAIL boundary configuration data.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Verdict policies map per-check outcomes to a ternary test status; suite
//! policies map test statuses to a suite outcome and exit code. Neither has a
//! universal default threshold: each test names its verdict policy and each
//! suite names its success criterion.
//!
//! Percentages are whole numbers in `0..=100` and are compared with exact
//! integer arithmetic so boundary cases never depend on float rounding.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Verdict Policy
// ============================================================================

/// Maps per-check outcomes to a test status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum VerdictPolicy {
    /// Zero failures pass; any failure fails.
    Strict,
    /// Failure-count bands.
    Tolerance {
        /// Maximum failures still reported as PASS.
        pass_max_failures: usize,
        /// Maximum failures reported as WARN; above this is FAIL.
        warn_max_failures: usize,
    },
    /// Percentage of passing checks.
    Ratio {
        /// Minimum passing percentage for PASS.
        pass_min_percent: u8,
        /// Minimum passing percentage for WARN.
        warn_min_percent: u8,
    },
    /// Weighted score of passing checks.
    Score {
        /// Minimum score for PASS.
        pass_min_score: u32,
        /// Minimum score for WARN.
        warn_min_score: u32,
    },
}

impl VerdictPolicy {
    /// Builds the common "0 pass, up to `warn_max` warn" tolerance policy.
    #[must_use]
    pub const fn warn_up_to(warn_max_failures: usize) -> Self {
        Self::Tolerance {
            pass_max_failures: 0,
            warn_max_failures,
        }
    }

    /// Validates threshold ordering and ranges.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError`] when thresholds are inverted or out of range.
    pub fn validate(&self) -> Result<(), PolicyError> {
        match *self {
            Self::Strict => Ok(()),
            Self::Tolerance {
                pass_max_failures,
                warn_max_failures,
            } => {
                if warn_max_failures < pass_max_failures {
                    return Err(PolicyError::InvertedBand(format!(
                        "warn_max_failures {warn_max_failures} is below pass_max_failures \
                         {pass_max_failures}"
                    )));
                }
                Ok(())
            }
            Self::Ratio {
                pass_min_percent,
                warn_min_percent,
            } => {
                ensure_percent("pass_min_percent", pass_min_percent)?;
                ensure_percent("warn_min_percent", warn_min_percent)?;
                if warn_min_percent > pass_min_percent {
                    return Err(PolicyError::InvertedBand(format!(
                        "warn_min_percent {warn_min_percent} exceeds pass_min_percent \
                         {pass_min_percent}"
                    )));
                }
                Ok(())
            }
            Self::Score {
                pass_min_score,
                warn_min_score,
            } => {
                if warn_min_score > pass_min_score {
                    return Err(PolicyError::InvertedBand(format!(
                        "warn_min_score {warn_min_score} exceeds pass_min_score {pass_min_score}"
                    )));
                }
                Ok(())
            }
        }
    }
}

/// Optional message templates overriding the default verdict summary.
///
/// Placeholders: `{failed}`, `{passed}`, `{total}`, `{score}`, `{max_score}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictMessages {
    /// Template used for PASS.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pass: Option<String>,
    /// Template used for WARN.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warn: Option<String>,
    /// Template used for FAIL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail: Option<String>,
}

/// Handling of unavailable sources for one test.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingSourcePolicy {
    /// Evaluate anyway; dependent checks fail.
    #[default]
    Evaluate,
    /// Skip evaluation and report WARN naming the missing sources.
    Warn,
}

// ============================================================================
// SECTION: Suite Policy
// ============================================================================

/// Maps test statuses to a suite outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuitePolicy {
    /// Criterion for a fully successful run.
    #[serde(default)]
    pub success: SuccessCriterion,
    /// Minimum success rate for a degraded (rather than failed) run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degraded_min_success_rate: Option<u8>,
    /// How WARN tests enter the success rate.
    #[serde(default)]
    pub warn_accounting: WarnAccounting,
}

impl SuitePolicy {
    /// Validates percentage ranges and band ordering.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError`] when a percentage exceeds 100 or the degraded band
    /// sits above the success threshold.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if let SuccessCriterion::MinSuccessRate {
            percent,
        } = self.success
        {
            ensure_percent("success.percent", percent)?;
        }
        if let Some(degraded) = self.degraded_min_success_rate {
            ensure_percent("degraded_min_success_rate", degraded)?;
            if let SuccessCriterion::MinSuccessRate {
                percent,
            } = self.success
                && degraded > percent
            {
                return Err(PolicyError::InvertedBand(format!(
                    "degraded_min_success_rate {degraded} exceeds success percent {percent}"
                )));
            }
        }
        Ok(())
    }
}

/// Criterion for a fully successful suite run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SuccessCriterion {
    /// Success iff no test failed.
    #[default]
    NoFailures,
    /// Success iff the success rate reaches `percent`.
    MinSuccessRate {
        /// Minimum success rate, in percent.
        percent: u8,
    },
}

/// How WARN tests enter the suite success rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnAccounting {
    /// WARN tests count as passed.
    #[default]
    CountsAsPass,
    /// WARN tests count neither as passed nor failed.
    Separate,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Policy validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    /// Percentage outside `0..=100`.
    #[error("{field} must be between 0 and 100, got {value}")]
    PercentOutOfRange {
        /// Offending field.
        field: &'static str,
        /// Offending value.
        value: u8,
    },
    /// Thresholds are ordered the wrong way round.
    #[error("inverted policy band: {0}")]
    InvertedBand(String),
    /// A PASS threshold no outcome of the check table can reach.
    #[error("unreachable threshold: {0}")]
    Unreachable(String),
}

/// Rejects percentages above 100.
const fn ensure_percent(field: &'static str, value: u8) -> Result<(), PolicyError> {
    if value > 100 {
        return Err(PolicyError::PercentOutOfRange {
            field,
            value,
        });
    }
    Ok(())
}
