//! Tests for the accounts module
//!
//! These tests verify account form schemas:
//! - password confirmation via the fields-match rule
//! - password strength and username shape checks
//! - the deferred username availability check

#[cfg(test)]
mod tests {
    use crate::accounts::{change_password_validator, registration_validator};
    use crate::common::{Record, ValidationContext};
    use crate::rules::AsyncCheck;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn record(pairs: &[(&str, Value)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn mismatched_confirmation_fails_on_confirm_field() {
        let validator = change_password_validator();
        let result = validator.validate(
            &record(&[
                ("new_password", json!("Abcd123!")),
                ("confirm_password", json!("Abcd124!")),
            ]),
            &ValidationContext::create(),
        );
        assert!(!result.is_valid());
        let message = result.error("confirm_password").unwrap();
        assert!(message.contains("must match"), "message: {message}");
    }

    #[test]
    fn matching_passwords_pass() {
        let validator = change_password_validator();
        let result = validator.validate(
            &record(&[
                ("new_password", json!("Abcd123!")),
                ("confirm_password", json!("Abcd123!")),
            ]),
            &ValidationContext::create(),
        );
        assert!(result.is_valid(), "errors: {:?}", result.errors());
    }

    #[test]
    fn weak_passwords_are_rejected_before_the_match_rule() {
        let validator = change_password_validator();
        let result = validator.validate(
            &record(&[
                ("new_password", json!("lettersonly")),
                ("confirm_password", json!("different")),
            ]),
            &ValidationContext::create(),
        );
        assert_eq!(
            result.error("new_password"),
            Some("Password must contain at least one letter and one digit")
        );
        assert!(!result.has_error("confirm_password"));
    }

    struct UsernameTaken(bool);

    #[async_trait]
    impl AsyncCheck for UsernameTaken {
        async fn check(
            &self,
            _value: &Value,
            _field: &str,
            _record: &Record,
            _ctx: &ValidationContext,
        ) -> anyhow::Result<bool> {
            Ok(!self.0)
        }
    }

    #[tokio::test]
    async fn taken_username_fails_registration() {
        let validator = registration_validator(Arc::new(UsernameTaken(true)));
        let base = record(&[
            ("username", json!("kap_tolentino")),
            ("email", json!("kap@barangay.gov.ph")),
            ("new_password", json!("Abcd123!")),
            ("confirm_password", json!("Abcd123!")),
        ]);
        let result = validator.validate_async(&base, &ValidationContext::create()).await;
        assert_eq!(result.error("username"), Some("Username is already taken"));

        let validator = registration_validator(Arc::new(UsernameTaken(false)));
        let result = validator.validate_async(&base, &ValidationContext::create()).await;
        assert!(result.is_valid(), "errors: {:?}", result.errors());
    }

    #[tokio::test]
    async fn malformed_username_skips_the_availability_check() {
        let validator = registration_validator(Arc::new(UsernameTaken(true)));
        let result = validator
            .validate_async(
                &record(&[
                    ("username", json!("Kap Tolentino")),
                    ("email", json!("kap@barangay.gov.ph")),
                    ("new_password", json!("Abcd123!")),
                    ("confirm_password", json!("Abcd123!")),
                ]),
                &ValidationContext::create(),
            )
            .await;
        assert_eq!(
            result.error("username"),
            Some("Username may only use lowercase letters, digits and underscores")
        );
    }
}
