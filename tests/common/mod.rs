/*!
 * Common test utilities for the rulegate test suite
 */

use rulegate::error_map::{ErrorMap, Validatable};
use rulegate::evaluators::mock::MockEvaluator;

/// Minimal view-model used across the test suite
#[derive(Debug, Default)]
pub struct ProfileForm {
    pub first_name: String,
    pub email: String,
    errors: ErrorMap,
}

impl Validatable for ProfileForm {
    fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    fn errors_mut(&mut self) -> &mut ErrorMap {
        &mut self.errors
    }
}

/// Mock evaluator preconfigured with the standard profile rules
///
/// Rule sets: "identity" covers first_name and email, "contact" covers
/// email only, and age carries a rule outside every rule set.
pub fn profile_evaluator() -> MockEvaluator {
    MockEvaluator::passing()
        .with_rule("first_name", "required", &["identity"])
        .with_rule("email", "email", &["identity", "contact"])
        .with_rule("age", "range", &[])
}

/// Initialize test logging, once per process
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
