// src/accounts/schema.rs

use std::sync::Arc;

use regex::Regex;

use crate::form::FormValidator;
use crate::rules::{
    email, fields_match, length, pattern, required, AsyncCheck, AsyncRule, FieldRule,
};
use crate::sanitize::sanitize_email;

/// Validator for the change-password form.
pub fn change_password_validator() -> FormValidator {
    FormValidator::builder()
        .field(
            "new_password",
            vec![required(), length(8, 128), password_strength()],
        )
        .field("confirm_password", vec![required()])
        .rule(fields_match("new_password", "confirm_password", None))
        .build()
}

/// Validator for staff account registration. The username check probes the
/// account store for availability.
pub fn registration_validator(username_available: Arc<dyn AsyncCheck>) -> FormValidator {
    FormValidator::builder()
        .field(
            "username",
            vec![
                required(),
                length(3, 32),
                pattern(
                    Regex::new(r"^[a-z0-9_]+$").unwrap(),
                    "Username may only use lowercase letters, digits and underscores",
                ),
            ],
        )
        .async_field(
            "username",
            AsyncRule::new(
                "username_available",
                "Username is already taken",
                username_available,
            ),
        )
        .sanitized_field("email", sanitize_email, vec![required(), email()])
        .field(
            "new_password",
            vec![required(), length(8, 128), password_strength()],
        )
        .field("confirm_password", vec![required()])
        .rule(fields_match("new_password", "confirm_password", None))
        .build()
}

// Passwords need at least one letter and one digit; length is checked
// separately so the messages stay specific.
fn password_strength() -> FieldRule {
    FieldRule::new("password_strength", |value, _, _, _| {
        let Some(s) = value.as_str() else {
            return None;
        };
        if s.trim().is_empty() {
            return None;
        }
        let has_letter = s.chars().any(|c| c.is_ascii_alphabetic());
        let has_digit = s.chars().any(|c| c.is_ascii_digit());
        if has_letter && has_digit {
            None
        } else {
            Some("Password must contain at least one letter and one digit".to_string())
        }
    })
}
