/*!
 * Rule evaluation backends for the validation engine.
 *
 * This module contains the backend contract and its implementations:
 * - `derive`: adapter over the `validator` crate's derive-based rules
 * - `mock`: scriptable in-memory evaluator for tests
 */

use std::fmt::Debug;

use async_trait::async_trait;

use crate::descriptors::RuleDescriptor;
use crate::errors::EvaluationError;
use crate::outcome::ValidationOutcome;

/// Common trait for all rule evaluation backends
///
/// This trait defines the interface the validation engine drives,
/// allowing backends to be used interchangeably. A backend is configured
/// once at construction; its descriptor metadata must not change
/// afterwards.
///
/// The async forms default to delegating to the sync forms, so backends
/// that only do CPU work implement three methods. Backends that suspend
/// (network or database checks) override the async forms.
#[async_trait]
pub trait RuleEvaluator<T: Sync + ?Sized>: Send + Sync + Debug {
    /// Evaluate every rule against the target
    ///
    /// # Arguments
    /// * `target` - The object to judge
    ///
    /// # Returns
    /// * `Result<ValidationOutcome, EvaluationError>` - The pass outcome or a backend fault
    fn evaluate(&self, target: &T) -> Result<ValidationOutcome, EvaluationError>;

    /// Evaluate only the rules belonging to the named rule set
    fn evaluate_rule_set(
        &self,
        target: &T,
        rule_set: &str,
    ) -> Result<ValidationOutcome, EvaluationError>;

    /// Evaluate only the rules attached to the listed properties
    fn evaluate_properties(
        &self,
        target: &T,
        properties: &[String],
    ) -> Result<ValidationOutcome, EvaluationError>;

    /// Describe the rules the backend was configured with, per property
    fn descriptors(&self) -> Vec<RuleDescriptor>;

    /// Async form of `evaluate`
    async fn evaluate_async(&self, target: &T) -> Result<ValidationOutcome, EvaluationError> {
        self.evaluate(target)
    }

    /// Async form of `evaluate_rule_set`
    async fn evaluate_rule_set_async(
        &self,
        target: &T,
        rule_set: &str,
    ) -> Result<ValidationOutcome, EvaluationError> {
        self.evaluate_rule_set(target, rule_set)
    }

    /// Async form of `evaluate_properties`
    async fn evaluate_properties_async(
        &self,
        target: &T,
        properties: &[String],
    ) -> Result<ValidationOutcome, EvaluationError> {
        self.evaluate_properties(target, properties)
    }
}

pub mod derive;
pub mod mock;
