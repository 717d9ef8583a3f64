/*!
 * Error-mapping reconciliation for scoped validation passes.
 *
 * A pass is only allowed to rewrite the entries of the properties it was
 * scoped to. Reconciliation removes those entries, then records the
 * failures the pass reported, leaving everything outside the scope as
 * earlier passes left it.
 */

use std::collections::BTreeSet;

use crate::error_map::ErrorMap;
use crate::outcome::ValidationOutcome;

/// Properties a validation pass was allowed to affect
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AffectedProperties {
    /// The pass judged the whole object
    All,

    /// The pass judged exactly these properties
    Named(BTreeSet<String>),
}

impl AffectedProperties {
    /// Build from a resolved property set.
    ///
    /// An empty set collapses to `All`: a pass that names no properties
    /// clears the whole mapping, matching an unscoped pass.
    pub(crate) fn from_resolved(properties: BTreeSet<String>) -> Self {
        if properties.is_empty() {
            Self::All
        } else {
            Self::Named(properties)
        }
    }
}

/// Reconcile one pass outcome into the live error mapping.
///
/// Entries outside the affected set survive untouched. Within the set,
/// stale entries are removed first and the outcome's failures are then
/// recorded, last write winning on duplicate properties.
pub(crate) fn synchronize(
    affected: &AffectedProperties,
    outcome: &ValidationOutcome,
    errors: &mut ErrorMap,
) {
    match affected {
        AffectedProperties::All => errors.clear_all(),
        AffectedProperties::Named(properties) => {
            for property in properties {
                errors.remove(property);
            }
        }
    }

    for failure in outcome.failures() {
        errors.set(failure.property.clone(), failure.message.clone());
    }
}
