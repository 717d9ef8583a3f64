/*!
 * Core validation engine implementation.
 *
 * This module contains the main ModelValidator struct and its
 * implementation, which is responsible for driving scoped validation
 * passes over a view-model and keeping its error mapping synchronized.
 */

use std::sync::Arc;

use log::{debug, trace};
use tokio_util::sync::CancellationToken;

use super::synchronizer::{AffectedProperties, synchronize};
use crate::error_map::Validatable;
use crate::errors::EngineError;
use crate::evaluators::RuleEvaluator;
use crate::outcome::{ValidationOutcome, ValidationScope};
use crate::rule_catalog::RuleCatalog;

/// Validation engine for one view-model type
///
/// Wraps a rule evaluation backend chosen at construction and immutable
/// thereafter. Every pass evaluates through the backend, then reconciles
/// the outcome into the target's live error mapping; the aggregate
/// validity flag is the return value.
///
/// The engine performs no locking of its own. One engine may be shared
/// across view-models (it is cheap to clone), but concurrent passes over
/// the same error mapping are out of contract.
pub struct ModelValidator<T: Sync> {
    /// Rule evaluation backend
    evaluator: Arc<dyn RuleEvaluator<T>>,

    /// Rule-set membership lookup, derived from the backend once
    catalog: RuleCatalog,
}

impl<T: Sync> Clone for ModelValidator<T> {
    fn clone(&self) -> Self {
        Self {
            evaluator: Arc::clone(&self.evaluator),
            catalog: self.catalog.clone(),
        }
    }
}

impl<T: Validatable + Sync> ModelValidator<T> {
    /// Create a new validator around an evaluation backend
    pub fn new(evaluator: Arc<dyn RuleEvaluator<T>>) -> Self {
        let catalog = RuleCatalog::new(evaluator.descriptors());
        Self { evaluator, catalog }
    }

    /// Rule-set membership lookup derived from the backend
    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    /// Validate every property of the target
    ///
    /// # Returns
    /// * `Result<bool, EngineError>` - Whether the whole target is valid
    pub fn validate(&self, target: &mut T) -> Result<bool, EngineError> {
        self.run(target, ValidationScope::Full)
    }

    /// Validate the properties governed by the named rule set
    ///
    /// Fails with `EngineError::InvalidArgument` on a blank name, before
    /// any rule is evaluated.
    pub fn validate_rule_set(&self, target: &mut T, rule_set: &str) -> Result<bool, EngineError> {
        self.run(target, ValidationScope::RuleSet(rule_set.to_string()))
    }

    /// Validate exactly the listed properties
    ///
    /// An empty list behaves like a full pass over a passing target: the
    /// whole error mapping is cleared.
    pub fn validate_properties(
        &self,
        target: &mut T,
        properties: &[String],
    ) -> Result<bool, EngineError> {
        self.run(target, ValidationScope::Properties(properties.to_vec()))
    }

    /// Async form of `validate`, cancellable through the token
    pub async fn validate_async(
        &self,
        target: &mut T,
        cancel: &CancellationToken,
    ) -> Result<bool, EngineError> {
        self.run_async(target, ValidationScope::Full, cancel).await
    }

    /// Async form of `validate_rule_set`, cancellable through the token
    pub async fn validate_rule_set_async(
        &self,
        target: &mut T,
        rule_set: &str,
        cancel: &CancellationToken,
    ) -> Result<bool, EngineError> {
        self.run_async(target, ValidationScope::RuleSet(rule_set.to_string()), cancel)
            .await
    }

    /// Async form of `validate_properties`, cancellable through the token
    pub async fn validate_properties_async(
        &self,
        target: &mut T,
        properties: &[String],
        cancel: &CancellationToken,
    ) -> Result<bool, EngineError> {
        self.run_async(
            target,
            ValidationScope::Properties(properties.to_vec()),
            cancel,
        )
        .await
    }

    /// Resolve the properties a scope is allowed to affect
    ///
    /// Runs before any evaluation so precondition violations never reach
    /// the backend.
    fn affected_properties(
        &self,
        scope: &ValidationScope,
    ) -> Result<AffectedProperties, EngineError> {
        let affected = match scope {
            ValidationScope::Full => AffectedProperties::All,
            ValidationScope::RuleSet(name) => {
                let properties = self.catalog.properties_in_rule_set(name)?;
                trace!("Rule set {} resolved to {} properties", name, properties.len());
                AffectedProperties::from_resolved(properties)
            }
            ValidationScope::Properties(names) => {
                AffectedProperties::from_resolved(names.iter().cloned().collect())
            }
        };
        Ok(affected)
    }

    /// Run the backend evaluation for a scope
    fn evaluate(
        &self,
        target: &T,
        scope: &ValidationScope,
    ) -> Result<ValidationOutcome, EngineError> {
        let outcome = match scope {
            ValidationScope::Full => self.evaluator.evaluate(target)?,
            ValidationScope::RuleSet(name) => self.evaluator.evaluate_rule_set(target, name)?,
            ValidationScope::Properties(names) => {
                self.evaluator.evaluate_properties(target, names)?
            }
        };
        Ok(outcome)
    }

    /// Drive one synchronous pass
    fn run(&self, target: &mut T, scope: ValidationScope) -> Result<bool, EngineError> {
        let affected = self.affected_properties(&scope)?;
        let outcome = self.evaluate(target, &scope)?;
        synchronize(&affected, &outcome, target.errors_mut());
        debug!(
            "Validation pass finished: scope={:?}, valid={}, failures={}",
            scope,
            outcome.is_valid(),
            outcome.failures().len()
        );
        Ok(outcome.is_valid())
    }

    /// Drive one asynchronous pass
    ///
    /// Suspends only while the backend evaluation is pending. If the
    /// token fires before the evaluation resolves, the pass returns
    /// `EngineError::Cancelled` and the error mapping keeps the exact
    /// state the previous passes left it in.
    async fn run_async(
        &self,
        target: &mut T,
        scope: ValidationScope,
        cancel: &CancellationToken,
    ) -> Result<bool, EngineError> {
        let affected = self.affected_properties(&scope)?;

        let outcome = {
            let evaluation = async {
                match &scope {
                    ValidationScope::Full => self.evaluator.evaluate_async(target).await,
                    ValidationScope::RuleSet(name) => {
                        self.evaluator.evaluate_rule_set_async(target, name).await
                    }
                    ValidationScope::Properties(names) => {
                        self.evaluator.evaluate_properties_async(target, names).await
                    }
                }
            };
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(EngineError::Cancelled),
                result = evaluation => result?,
            }
        };

        // The token may also fire between the evaluation resolving and
        // this point; the mapping must stay untouched then as well.
        if cancel.is_cancelled() {
            return Err(EngineError::Cancelled);
        }

        synchronize(&affected, &outcome, target.errors_mut());
        debug!(
            "Validation pass finished: scope={:?}, valid={}, failures={}",
            scope,
            outcome.is_valid(),
            outcome.failures().len()
        );
        Ok(outcome.is_valid())
    }
}
