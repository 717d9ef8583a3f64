/*!
 * Scopes, failures and outcomes of validation passes.
 *
 * A scope describes which properties a pass is permitted to affect; an
 * outcome is the immutable result of one pass. Both are created per call
 * and discarded once the error mapping has been synchronized.
 */

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Scope of one validation pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationScope {
    /// Judge every property of the target
    Full,

    /// Judge only the properties governed by the named rule set
    RuleSet(String),

    /// Judge exactly the listed properties
    Properties(Vec<String>),
}

/// One failed rule from a validation pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFailure {
    /// Property the failure belongs to
    pub property: String,

    /// Human-readable message for display surfaces
    pub message: String,
}

impl ValidationFailure {
    /// Create a new failure record
    pub fn new(property: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            message: message.into(),
        }
    }
}

/// Immutable result of one validation pass
///
/// Produced fresh by the evaluation backend on every call; the aggregate
/// flag and the failure list never change after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    /// Whether every evaluated rule passed
    is_valid: bool,

    /// Failures in the order the backend reported them
    failures: Vec<ValidationFailure>,
}

impl ValidationOutcome {
    /// Create a passing outcome with no failures
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            failures: Vec::new(),
        }
    }

    /// Create an outcome from a list of failures
    ///
    /// The outcome is valid exactly when the list is empty.
    pub fn from_failures(failures: Vec<ValidationFailure>) -> Self {
        Self {
            is_valid: failures.is_empty(),
            failures,
        }
    }

    /// Whether every evaluated rule passed
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Failures in the order the backend reported them
    pub fn failures(&self) -> &[ValidationFailure] {
        &self.failures
    }

    /// Names of the failing properties, deduplicated
    pub fn failed_properties(&self) -> BTreeSet<&str> {
        self.failures
            .iter()
            .map(|failure| failure.property.as_str())
            .collect()
    }
}
