/*!
 * Live error mapping owned by a validatable object.
 *
 * Every view-model that wants engine-driven validation owns one `ErrorMap`
 * for its whole lifetime. The engine clears and repopulates the map on
 * every pass but never replaces it, so bound surfaces can keep observing
 * the same instance. Consumers read; only the engine writes.
 */

use std::collections::BTreeMap;

/// Contract between the validation engine and the objects it validates.
///
/// The error mapping is owned by the object but rewritten exclusively by
/// the engine: a property has an entry exactly when the most recent pass
/// that covered it found a failure.
pub trait Validatable {
    /// Read access to the live error mapping
    fn errors(&self) -> &ErrorMap;

    /// Write access to the live error mapping, reserved for the engine
    fn errors_mut(&mut self) -> &mut ErrorMap;
}

/// Property-name-to-message table kept in sync by the validation engine
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMap {
    /// Current failures, keyed by property name
    entries: BTreeMap<String, String>,
}

impl ErrorMap {
    /// Create an empty error mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// True if no property currently has a failure
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of properties currently failing
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Current message for a property, if the property is failing
    pub fn message(&self, property: &str) -> Option<&str> {
        self.entries.get(property).map(String::as_str)
    }

    /// True if the property currently has a failure recorded
    pub fn contains(&self, property: &str) -> bool {
        self.entries.contains_key(property)
    }

    /// Names of the properties currently failing, in sorted order
    pub fn properties(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterate over (property, message) pairs in sorted order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(property, message)| (property.as_str(), message.as_str()))
    }

    /// Detached copy of the current state, for display or diffing
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.entries.clone()
    }

    /// Render the current failures as a multi-line report
    pub fn summary(&self) -> String {
        self.entries
            .iter()
            .map(|(property, message)| format!("{}: {}", property, message))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Record a failure, overwriting any prior message for the property
    pub(crate) fn set(&mut self, property: impl Into<String>, message: impl Into<String>) {
        self.entries.insert(property.into(), message.into());
    }

    /// Drop the entry for a property, if present
    pub(crate) fn remove(&mut self, property: &str) {
        self.entries.remove(property);
    }

    /// Drop every entry
    pub(crate) fn clear_all(&mut self) {
        self.entries.clear();
    }
}
