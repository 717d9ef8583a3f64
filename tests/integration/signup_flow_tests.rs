/*!
 * End-to-end validation flows over a signup form, driving the engine
 * through the derive-based backend the way a view-model would.
 */

use std::sync::Arc;

use anyhow::Result;
use tokio_util::sync::CancellationToken;
use validator::Validate;

use rulegate::engine::ModelValidator;
use rulegate::error_map::{ErrorMap, Validatable};
use rulegate::evaluators::derive::{DeriveEvaluator, RuleManifest};

use crate::common;

/// Signup view-model: derive-based rules plus the live error mapping
#[derive(Debug, Default, Validate)]
struct SignupForm {
    #[validate(length(min = 1, message = "First name is required"))]
    first_name: String,

    #[validate(email(message = "Email address is not valid"))]
    email: String,

    errors: ErrorMap,
}

impl Validatable for SignupForm {
    fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    fn errors_mut(&mut self) -> &mut ErrorMap {
        &mut self.errors
    }
}

fn signup_validator() -> ModelValidator<SignupForm> {
    let evaluator = DeriveEvaluator::new()
        .with_rule("first_name", "required", &["identity"])
        .with_rule("email", "email", &["identity", "contact"]);
    ModelValidator::new(Arc::new(evaluator))
}

#[test]
fn test_signupFlow_fullPassThenPropertyFix_shouldRetainUnrelatedError() -> Result<()> {
    common::init_logging();
    let validator = signup_validator();
    let mut form = SignupForm {
        first_name: String::new(),
        email: "not-an-email".to_string(),
        ..Default::default()
    };

    // Full pass: both properties fail
    let valid = validator.validate(&mut form)?;
    assert!(!valid);
    assert_eq!(form.errors().len(), 2);
    assert_eq!(
        form.errors().message("first_name"),
        Some("First name is required")
    );
    assert_eq!(
        form.errors().message("email"),
        Some("Email address is not valid")
    );

    // The user fills in the first name; only that property is revalidated
    form.first_name = "Ada".to_string();
    let valid = validator.validate_properties(&mut form, &["first_name".to_string()])?;

    assert!(valid);
    assert_eq!(form.errors().len(), 1);
    assert_eq!(
        form.errors().message("email"),
        Some("Email address is not valid")
    );
    Ok(())
}

#[test]
fn test_signupFlow_ruleSetPass_shouldOnlyJudgeRuleSetProperties() -> Result<()> {
    let validator = signup_validator();
    let mut form = SignupForm {
        first_name: String::new(),
        email: "ada@example.com".to_string(),
        ..Default::default()
    };

    // "contact" covers only the email, which is valid here
    let valid = validator.validate_rule_set(&mut form, "contact")?;
    assert!(valid);
    assert!(form.errors().is_empty());

    // "identity" also covers the missing first name
    let valid = validator.validate_rule_set(&mut form, "identity")?;
    assert!(!valid);
    assert_eq!(form.errors().len(), 1);
    assert!(form.errors().contains("first_name"));
    Ok(())
}

#[test]
fn test_signupFlow_catalogIntrospection_shouldExposeRuleSetMembership() -> Result<()> {
    let validator = signup_validator();

    let identity = validator.catalog().properties_in_rule_set("identity")?;
    let names: Vec<&str> = identity.iter().map(String::as_str).collect();
    assert_eq!(names, vec!["email", "first_name"]);
    Ok(())
}

#[test]
fn test_signupFlow_manifestDrivenRules_shouldMatchBuilderDeclaration() -> Result<()> {
    let manifest = RuleManifest::from_json(
        r#"{
            "rules": [
                {
                    "property": "first_name",
                    "rules": [{"rule": "required", "rule_sets": ["identity"]}]
                },
                {
                    "property": "email",
                    "rules": [{"rule": "email", "rule_sets": ["identity", "contact"]}]
                }
            ]
        }"#,
    )?;
    let validator: ModelValidator<SignupForm> =
        ModelValidator::new(Arc::new(DeriveEvaluator::from_manifest(manifest)));

    let mut form = SignupForm {
        first_name: "Ada".to_string(),
        email: "not-an-email".to_string(),
        ..Default::default()
    };

    let valid = validator.validate_rule_set(&mut form, "contact")?;
    assert!(!valid);
    assert_eq!(
        form.errors().summary(),
        "email: Email address is not valid"
    );
    Ok(())
}

#[tokio::test]
async fn test_signupFlow_asyncPass_shouldSynchronizeLikeSync() -> Result<()> {
    let validator = signup_validator();
    let mut form = SignupForm {
        first_name: String::new(),
        email: "ada@example.com".to_string(),
        ..Default::default()
    };
    let cancel = CancellationToken::new();

    let valid = validator.validate_async(&mut form, &cancel).await?;

    assert!(!valid);
    assert_eq!(form.errors().len(), 1);
    assert!(form.errors().contains("first_name"));
    Ok(())
}
