/*!
 * Tests for the rule evaluation backends
 */

use anyhow::Result;
use validator::Validate;

use rulegate::descriptors::RuleDescriptor;
use rulegate::errors::EvaluationError;
use rulegate::evaluators::RuleEvaluator;
use rulegate::evaluators::derive::{DeriveEvaluator, RuleManifest};
use rulegate::evaluators::mock::MockEvaluator;

use crate::common;

/// Plain model for exercising the derive backend
#[derive(Debug, Default, Validate)]
struct Registration {
    #[validate(length(min = 1, message = "First name is required"))]
    first_name: String,

    #[validate(email(message = "Email address is not valid"))]
    email: String,
}

fn registration_evaluator() -> DeriveEvaluator<Registration> {
    DeriveEvaluator::new()
        .with_rule("first_name", "required", &["identity"])
        .with_rule("email", "email", &["identity", "contact"])
}

#[test]
fn test_mockEvaluator_fullPass_shouldReportEveryScriptedFailure() -> Result<()> {
    let evaluator = common::profile_evaluator()
        .with_failure("first_name", "First name is required")
        .with_failure("email", "Email address is not valid");
    let form = common::ProfileForm::default();

    let outcome = evaluator.evaluate(&form)?;

    assert!(!outcome.is_valid());
    assert_eq!(outcome.failures().len(), 2);
    assert_eq!(evaluator.evaluation_count(), 1);
    Ok(())
}

#[test]
fn test_mockEvaluator_ruleSetPass_shouldNarrowToTaggedProperties() -> Result<()> {
    let evaluator = common::profile_evaluator()
        .with_failure("first_name", "First name is required")
        .with_failure("age", "Age is out of range");
    let form = common::ProfileForm::default();

    let outcome = evaluator.evaluate_rule_set(&form, "identity")?;

    assert!(!outcome.is_valid());
    let failing: Vec<&str> = outcome.failed_properties().into_iter().collect();
    assert_eq!(failing, vec!["first_name"]);
    Ok(())
}

#[test]
fn test_mockEvaluator_propertyPass_shouldNarrowToListedProperties() -> Result<()> {
    let evaluator = common::profile_evaluator()
        .with_failure("first_name", "First name is required")
        .with_failure("email", "Email address is not valid");
    let form = common::ProfileForm::default();

    let outcome = evaluator.evaluate_properties(&form, &["email".to_string()])?;

    let failing: Vec<&str> = outcome.failed_properties().into_iter().collect();
    assert_eq!(failing, vec!["email"]);
    Ok(())
}

#[test]
fn test_mockEvaluator_failingBehavior_shouldReturnBackendError() {
    let evaluator = MockEvaluator::failing();
    let form = common::ProfileForm::default();

    let result = evaluator.evaluate(&form);

    assert!(matches!(result, Err(EvaluationError::Backend(_))));
    assert_eq!(evaluator.evaluation_count(), 1);
}

#[test]
fn test_deriveEvaluator_fullPass_shouldCollectFieldFailuresInOrder() -> Result<()> {
    let evaluator = registration_evaluator();
    let target = Registration {
        first_name: String::new(),
        email: "not-an-email".to_string(),
    };

    let outcome = evaluator.evaluate(&target)?;

    assert!(!outcome.is_valid());
    let failures: Vec<(&str, &str)> = outcome
        .failures()
        .iter()
        .map(|failure| (failure.property.as_str(), failure.message.as_str()))
        .collect();
    assert_eq!(
        failures,
        vec![
            ("email", "Email address is not valid"),
            ("first_name", "First name is required"),
        ]
    );
    Ok(())
}

#[test]
fn test_deriveEvaluator_fullPass_withValidTarget_shouldBeValid() -> Result<()> {
    let evaluator = registration_evaluator();
    let target = Registration {
        first_name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
    };

    let outcome = evaluator.evaluate(&target)?;

    assert!(outcome.is_valid());
    assert!(outcome.failures().is_empty());
    Ok(())
}

#[test]
fn test_deriveEvaluator_ruleSetPass_shouldNarrowByDeclaredTags() -> Result<()> {
    let evaluator = registration_evaluator();
    let target = Registration {
        first_name: String::new(),
        email: "not-an-email".to_string(),
    };

    let outcome = evaluator.evaluate_rule_set(&target, "contact")?;

    let failing: Vec<&str> = outcome.failed_properties().into_iter().collect();
    assert_eq!(failing, vec!["email"]);
    Ok(())
}

#[test]
fn test_deriveEvaluator_propertyPass_withEmptyList_shouldBeValid() -> Result<()> {
    let evaluator = registration_evaluator();
    let target = Registration::default();

    let outcome = evaluator.evaluate_properties(&target, &[])?;

    assert!(outcome.is_valid());
    Ok(())
}

#[test]
fn test_deriveEvaluator_descriptors_shouldMatchDeclaredRules() {
    let evaluator = registration_evaluator();

    let descriptors: Vec<RuleDescriptor> = evaluator.descriptors();

    assert_eq!(descriptors.len(), 2);
    assert!(descriptors[0].in_rule_set("identity"));
    assert!(descriptors[1].in_rule_set("contact"));
}

#[test]
fn test_ruleManifest_fromJson_shouldDeclareDescriptors() -> Result<()> {
    let manifest = RuleManifest::from_json(
        r#"{
            "rules": [
                {
                    "property": "email",
                    "rules": [{"rule": "email", "rule_sets": ["contact"]}]
                },
                {
                    "property": "age",
                    "rules": [{"rule": "range"}]
                }
            ]
        }"#,
    )?;

    let evaluator: DeriveEvaluator<Registration> = DeriveEvaluator::from_manifest(manifest);
    let descriptors = evaluator.descriptors();

    assert_eq!(descriptors.len(), 2);
    assert_eq!(descriptors[0].property, "email");
    assert!(descriptors[0].in_rule_set("contact"));
    assert_eq!(descriptors[1].property, "age");
    assert!(descriptors[1].rules[0].rule_sets.is_empty());
    Ok(())
}

#[test]
fn test_ruleManifest_fromJson_withMalformedDocument_shouldFail() {
    let result = RuleManifest::from_json("{ not json");
    assert!(result.is_err());
}
