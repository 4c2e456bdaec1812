// crates/check-gate-core/src/core/mod.rs
// ============================================================================
// Module: Check Gate Core Model
// Description: Data model for suites, checks, sources, policies and records.
// Purpose: Group the pure, serializable types the runtime operates on.
// Dependencies: serde, serde_json, sha2, time
// ============================================================================

//! ## Overview
//! The core model is pure data. Nothing in this module performs I/O or reads
//! the clock; runtime components and host crates supply both.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod check;
pub mod hashing;
pub mod identifiers;
pub mod policy;
pub mod record;
pub mod source;
pub mod suite;
pub mod time;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use check::CheckDefinition;
pub use check::CountComparator;
pub use check::DocumentFormat;
pub use check::Predicate;
pub use check::PredicateError;
pub use hashing::HashAlgorithm;
pub use hashing::HashDigest;
pub use identifiers::CheckName;
pub use identifiers::SourceName;
pub use identifiers::SuiteName;
pub use identifiers::TestName;
pub use policy::MissingSourcePolicy;
pub use policy::PolicyError;
pub use policy::SuccessCriterion;
pub use policy::SuitePolicy;
pub use policy::VerdictMessages;
pub use policy::VerdictPolicy;
pub use policy::WarnAccounting;
pub use record::CheckOutcome;
pub use record::CheckResult;
pub use record::RUN_ERROR_EXIT_CODE;
pub use record::SuiteOutcome;
pub use record::SuiteSummary;
pub use record::TestEntry;
pub use record::TestRunRecord;
pub use record::TestStatus;
pub use record::TestVerdict;
pub use source::HttpMethod;
pub use source::SecretRef;
pub use source::SourceBlob;
pub use source::SourceDefinition;
pub use source::SourceSet;
pub use source::SourceSpec;
pub use source::SourceUnavailable;
pub use source::UnavailableReason;
pub use suite::SpecError;
pub use suite::SuiteSpec;
pub use suite::TestDefinition;
pub use time::Timestamp;
