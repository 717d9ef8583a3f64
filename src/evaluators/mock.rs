/*!
 * Mock evaluator for testing engine behavior.
 *
 * This module provides a scriptable in-memory backend that simulates
 * different behaviors:
 * - `MockEvaluator::passing()` - resolves immediately with the scripted failures
 * - `MockEvaluator::failing()` - every pass errors
 * - `MockEvaluator::slow(delay_ms)` - async passes resolve after a delay,
 *   for cancellation testing
 */

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::descriptors::{RuleDescriptor, RuleTag};
use crate::errors::EvaluationError;
use crate::evaluators::RuleEvaluator;
use crate::outcome::{ValidationFailure, ValidationOutcome};

/// Behavior mode for the mock evaluator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Resolve immediately with the scripted failures
    Immediate,

    /// Resolve after a delay on the async paths (sync paths ignore it)
    Slow { delay_ms: u64 },

    /// Always fail with a backend error
    Failing,
}

/// Scriptable in-memory rule evaluator
///
/// Failures are scripted per property and narrowed by scoped passes the
/// way a real backend narrows its rule pass. The failure table sits
/// behind a mutex so tests can re-script outcomes between passes through
/// a shared `Arc` handle.
#[derive(Debug)]
pub struct MockEvaluator {
    /// Behavior mode
    behavior: MockBehavior,

    /// Declared rule metadata
    descriptors: Vec<RuleDescriptor>,

    /// Scripted failures the next pass will report
    failures: Mutex<Vec<ValidationFailure>>,

    /// Number of evaluation calls that reached the backend
    evaluations: AtomicUsize,
}

impl MockEvaluator {
    /// Create a new mock evaluator with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            descriptors: Vec::new(),
            failures: Mutex::new(Vec::new()),
            evaluations: AtomicUsize::new(0),
        }
    }

    /// Create a mock evaluator with no scripted failures
    pub fn passing() -> Self {
        Self::new(MockBehavior::Immediate)
    }

    /// Create a mock evaluator that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock evaluator whose async passes resolve after a delay
    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Declare a rule on a property, with the rule sets it belongs to
    pub fn with_rule(mut self, property: &str, rule: &str, rule_sets: &[&str]) -> Self {
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

    /// Script a failure the next passes will report
    pub fn with_failure(self, property: &str, message: &str) -> Self {
        self.failures
            .lock()
            .push(ValidationFailure::new(property, message));
        self
    }

    /// Replace every scripted failure
    pub fn script_failures(&self, failures: Vec<ValidationFailure>) {
        *self.failures.lock() = failures;
    }

    /// Drop the scripted failures for one property
    pub fn clear_failure(&self, property: &str) {
        self.failures
            .lock()
            .retain(|failure| failure.property != property);
    }

    /// Number of evaluation calls that reached the backend
    pub fn evaluation_count(&self) -> usize {
        self.evaluations.load(Ordering::SeqCst)
    }

    /// Properties whose declared rules carry the named rule-set tag
    fn properties_tagged(&self, rule_set: &str) -> Vec<String> {
        self.descriptors
            .iter()
            .filter(|descriptor| descriptor.in_rule_set(rule_set))
            .map(|descriptor| descriptor.property.clone())
            .collect()
    }

    /// Run one scripted pass, keeping the failures the filter accepts
    fn outcome_for(
        &self,
        keep: impl Fn(&ValidationFailure) -> bool,
    ) -> Result<ValidationOutcome, EvaluationError> {
        self.evaluations.fetch_add(1, Ordering::SeqCst);
        if matches!(self.behavior, MockBehavior::Failing) {
            return Err(EvaluationError::Backend(
                "mock evaluator is scripted to fail".to_string(),
            ));
        }

        let failures = self
            .failures
            .lock()
            .iter()
            .filter(|failure| keep(failure))
            .cloned()
            .collect();
        Ok(ValidationOutcome::from_failures(failures))
    }

    /// Sleep out the configured delay, if any
    async fn pause(&self) {
        if let MockBehavior::Slow { delay_ms } = self.behavior {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }
    }
}

#[async_trait]
impl<T: Sync> RuleEvaluator<T> for MockEvaluator {
    fn evaluate(&self, _target: &T) -> Result<ValidationOutcome, EvaluationError> {
        self.outcome_for(|_| true)
    }

    fn evaluate_rule_set(
        &self,
        _target: &T,
        rule_set: &str,
    ) -> Result<ValidationOutcome, EvaluationError> {
        let scoped = self.properties_tagged(rule_set);
        self.outcome_for(|failure| scoped.contains(&failure.property))
    }

    fn evaluate_properties(
        &self,
        _target: &T,
        properties: &[String],
    ) -> Result<ValidationOutcome, EvaluationError> {
        self.outcome_for(|failure| properties.contains(&failure.property))
    }

    fn descriptors(&self) -> Vec<RuleDescriptor> {
        self.descriptors.clone()
    }

    async fn evaluate_async(&self, target: &T) -> Result<ValidationOutcome, EvaluationError> {
        self.pause().await;
        self.evaluate(target)
    }

    async fn evaluate_rule_set_async(
        &self,
        target: &T,
        rule_set: &str,
    ) -> Result<ValidationOutcome, EvaluationError> {
        self.pause().await;
        self.evaluate_rule_set(target, rule_set)
    }

    async fn evaluate_properties_async(
        &self,
        target: &T,
        properties: &[String],
    ) -> Result<ValidationOutcome, EvaluationError> {
        self.pause().await;
        self.evaluate_properties(target, properties)
    }
}
