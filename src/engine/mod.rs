/*!
 * Validation engine: scoped passes and error-mapping synchronization.
 *
 * This module contains the engine driving validation passes over a
 * view-model. It is split into two submodules:
 *
 * - `core`: the `ModelValidator` engine and its entry points
 * - `synchronizer`: reconciliation of pass outcomes into the error mapping
 */

// Re-export main types for easier usage
pub use self::core::ModelValidator;

pub mod core;
pub(crate) mod synchronizer;
