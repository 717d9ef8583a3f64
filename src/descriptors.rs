/*!
 * Per-property rule metadata.
 *
 * Descriptors are derived from a rule evaluation backend's configuration
 * when the backend is constructed and stay fixed afterwards. The rule
 * catalog uses them to answer rule-set membership queries without running
 * any rules.
 */

use serde::{Deserialize, Serialize};

/// Rule-set memberships of a single rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTag {
    /// Name of the rule, e.g. "required" or "email"
    pub rule: String,

    /// Rule sets the rule belongs to; empty means the rule only runs in
    /// full passes
    #[serde(default)]
    pub rule_sets: Vec<String>,
}

impl RuleTag {
    /// Create a tag for a rule with no rule-set memberships
    pub fn new(rule: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            rule_sets: Vec::new(),
        }
    }

    /// Add a rule-set membership
    pub fn in_rule_set(mut self, rule_set: impl Into<String>) -> Self {
        self.rule_sets.push(rule_set.into());
        self
    }
}

/// Metadata describing the rules attached to one property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDescriptor {
    /// Property the rules apply to
    pub property: String,

    /// Rules attached to the property
    #[serde(default)]
    pub rules: Vec<RuleTag>,
}

impl RuleDescriptor {
    /// Create a descriptor for a property with no rules yet
    pub fn new(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            rules: Vec::new(),
        }
    }

    /// Attach a rule to the property
    pub fn with_rule(mut self, tag: RuleTag) -> Self {
        self.rules.push(tag);
        self
    }

    /// True if any rule on this property belongs to the named rule set
    pub fn in_rule_set(&self, rule_set: &str) -> bool {
        self.rules
            .iter()
            .any(|tag| tag.rule_sets.iter().any(|name| name == rule_set))
    }
}
