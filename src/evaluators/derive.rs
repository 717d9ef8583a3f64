/*!
 * Rule evaluation backed by the `validator` crate.
 *
 * The derive-generated rules of `validator` know nothing about rule sets
 * or partial passes, so this adapter runs the full rule pass and narrows
 * the reported failures afterwards. Rule-set membership is declared up
 * front, through the builder or a JSON manifest, and becomes the
 * descriptor metadata the engine's rule catalog is built from.
 */

use std::collections::BTreeSet;
use std::marker::PhantomData;
use std::path::Path;

use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::descriptors::{RuleDescriptor, RuleTag};
use crate::errors::EvaluationError;
use crate::evaluators::RuleEvaluator;
use crate::outcome::{ValidationFailure, ValidationOutcome};

/// Declared rule metadata, loadable from configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleManifest {
    /// Descriptors, one per property carrying rules
    #[serde(default)]
    pub rules: Vec<RuleDescriptor>,
}

impl RuleManifest {
    /// Parse a manifest from a JSON document
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("Failed to parse rule manifest")
    }

    /// Load a manifest from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref()).with_context(|| {
            format!("Failed to read rule manifest: {}", path.as_ref().display())
        })?;
        Self::from_json(&raw)
    }
}

/// Evaluation backend over `#[derive(Validate)]` rules
///
/// Works with any target implementing `validator::Validate`. Failures are
/// reported flat, per field; nested struct validation is outside this
/// adapter's contract.
pub struct DeriveEvaluator<T> {
    /// Declared rule metadata, fixed at construction
    descriptors: Vec<RuleDescriptor>,

    _target: PhantomData<fn(&T)>,
}

impl<T> std::fmt::Debug for DeriveEvaluator<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeriveEvaluator")
            .field("descriptors", &self.descriptors)
            .finish()
    }
}

impl<T> DeriveEvaluator<T> {
    /// Create a backend with no rule-set metadata
    pub fn new() -> Self {
        Self {
            descriptors: Vec::new(),
            _target: PhantomData,
        }
    }

    /// Create a backend from a rule manifest
    pub fn from_manifest(manifest: RuleManifest) -> Self {
        Self {
            descriptors: manifest.rules,
            _target: PhantomData,
        }
    }

    /// Declare a rule on a property, with the rule sets it belongs to
    pub fn with_rule(
        mut self,
        property: impl Into<String>,
        rule: impl Into<String>,
        rule_sets: &[&str],
    ) -> Self {
        let property = property.into();
        let mut tag = RuleTag::new(rule);
        for rule_set in rule_sets {
            tag = tag.in_rule_set(*rule_set);
        }

        match self
            .descriptors
            .iter_mut()
            .find(|descriptor| descriptor.property == property)
        {
            Some(descriptor) => descriptor.rules.push(tag),
            None => self
                .descriptors
                .push(RuleDescriptor::new(property).with_rule(tag)),
        }
        self
    }

    /// Properties whose declared rules carry the named rule-set tag
    fn properties_tagged(&self, rule_set: &str) -> BTreeSet<&str> {
        self.descriptors
            .iter()
            .filter(|descriptor| descriptor.in_rule_set(rule_set))
            .map(|descriptor| descriptor.property.as_str())
            .collect()
    }
}

impl<T> Default for DeriveEvaluator<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Flatten `validator` field errors into an ordered failure list
///
/// `field_errors` iterates a hash map, so the result is sorted by
/// (property, message) to keep outcomes deterministic across runs.
fn collect_failures(errors: &validator::ValidationErrors) -> Vec<ValidationFailure> {
    let mut failures: Vec<ValidationFailure> = errors
        .field_errors()
        .iter()
        .flat_map(|(property, field_errors)| {
            field_errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| format!("Validation failed on rule: {}", error.code));
                ValidationFailure::new(*property, message)
            })
        })
        .collect();
    failures.sort_by(|a, b| {
        a.property
            .cmp(&b.property)
            .then_with(|| a.message.cmp(&b.message))
    });
    failures
}

#[async_trait]
impl<T> RuleEvaluator<T> for DeriveEvaluator<T>
where
    T: Validate + Sync,
{
    fn evaluate(&self, target: &T) -> Result<ValidationOutcome, EvaluationError> {
        match target.validate() {
            Ok(()) => Ok(ValidationOutcome::valid()),
            Err(errors) => Ok(ValidationOutcome::from_failures(collect_failures(&errors))),
        }
    }

    fn evaluate_rule_set(
        &self,
        target: &T,
        rule_set: &str,
    ) -> Result<ValidationOutcome, EvaluationError> {
        let scoped = self.properties_tagged(rule_set);
        let outcome = self.evaluate(target)?;
        let failures = outcome
            .failures()
            .iter()
            .filter(|failure| scoped.contains(failure.property.as_str()))
            .cloned()
            .collect();
        Ok(ValidationOutcome::from_failures(failures))
    }

    fn evaluate_properties(
        &self,
        target: &T,
        properties: &[String],
    ) -> Result<ValidationOutcome, EvaluationError> {
        let outcome = self.evaluate(target)?;
        let failures = outcome
            .failures()
            .iter()
            .filter(|failure| properties.contains(&failure.property))
            .cloned()
            .collect();
        Ok(ValidationOutcome::from_failures(failures))
    }

    fn descriptors(&self) -> Vec<RuleDescriptor> {
        self.descriptors.clone()
    }
}
