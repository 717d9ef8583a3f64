/*!
 * Rule-set membership lookup.
 *
 * The catalog is built once from a backend's descriptors and resolves a
 * rule-set name to the set of properties whose rules carry that tag. It
 * runs no rules and has no side effects.
 */

use std::collections::BTreeSet;

use crate::descriptors::RuleDescriptor;
use crate::errors::EngineError;

/// Lookup of rule-set membership, derived from a backend's descriptors
#[derive(Debug, Clone, Default)]
pub struct RuleCatalog {
    /// Descriptors, one per property carrying rules
    descriptors: Vec<RuleDescriptor>,
}

impl RuleCatalog {
    /// Create a catalog from descriptor metadata
    pub fn new(descriptors: Vec<RuleDescriptor>) -> Self {
        Self { descriptors }
    }

    /// Resolve a rule-set name to the properties it governs.
    ///
    /// A property is included when at least one of its rules declares
    /// membership in the named rule set. The result is empty when no
    /// property qualifies.
    pub fn properties_in_rule_set(&self, rule_set: &str) -> Result<BTreeSet<String>, EngineError> {
        if rule_set.trim().is_empty() {
            return Err(EngineError::InvalidArgument(
                "rule set name must not be blank".to_string(),
            ));
        }

        let properties = self
            .descriptors
            .iter()
            .filter(|descriptor| descriptor.in_rule_set(rule_set))
            .map(|descriptor| descriptor.property.clone())
            .collect();
        Ok(properties)
    }

    /// Names of every rule set declared across the descriptors
    pub fn rule_set_names(&self) -> BTreeSet<&str> {
        self.descriptors
            .iter()
            .flat_map(|descriptor| descriptor.rules.iter())
            .flat_map(|tag| tag.rule_sets.iter())
            .map(String::as_str)
            .collect()
    }

    /// The descriptor metadata the catalog was built from
    pub fn descriptors(&self) -> &[RuleDescriptor] {
        &self.descriptors
    }
}
