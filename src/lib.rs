/*!
 * # rulegate - view-model validation engine
 *
 * A Rust library for rule-based validation of view-models in MVVM-style
 * applications.
 *
 * ## Features
 *
 * - Full, rule-set-scoped and property-scoped validation passes
 * - Live error mapping kept in sync across partial passes
 * - Synchronous and cancellable asynchronous execution
 * - Pluggable rule evaluation backends:
 *   - `validator` crate adapter (derive-based rules)
 *   - Scriptable in-memory mock for tests
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `error_map`: the live error mapping and the `Validatable` contract
 * - `outcome`: validation scopes, failures and pass outcomes
 * - `descriptors`: per-property rule metadata
 * - `rule_catalog`: rule-set membership lookup
 * - `engine`: the validation engine and error-map synchronization:
 *   - `engine::core`: the `ModelValidator` engine
 *   - `engine::synchronizer`: outcome reconciliation
 * - `evaluators`: rule evaluation backends:
 *   - `evaluators::derive`: `validator` crate adapter
 *   - `evaluators::mock`: scriptable test backend
 * - `errors`: custom error types for the engine
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod descriptors;
pub mod engine;
pub mod error_map;
pub mod errors;
pub mod evaluators;
pub mod outcome;
pub mod rule_catalog;

// Re-export main types for easier usage
pub use descriptors::{RuleDescriptor, RuleTag};
pub use engine::ModelValidator;
pub use error_map::{ErrorMap, Validatable};
pub use errors::{EngineError, EvaluationError};
pub use evaluators::RuleEvaluator;
pub use outcome::{ValidationFailure, ValidationOutcome, ValidationScope};
pub use rule_catalog::RuleCatalog;
