// src/residents/schema.rs

use std::sync::Arc;

use regex::Regex;
use serde_json::Value;

use crate::common::{ValidationContext, ValidationResult};
use crate::form::{FormValidator, FormValidatorBuilder};
use crate::rules::{
    age, conditional_required, date, email, mobile_number, one_of, pattern, person_name,
    philsys_number, record_id, required, AsyncCheck, AsyncRule, CrossRule,
};
use crate::sanitize::{
    sanitize_email, sanitize_name, sanitize_philsys_number, sanitize_phone, sanitize_text,
    SanitizeOptions,
};
use crate::schema::choices;

/// Validator for the resident intake and edit forms.
pub fn resident_validator() -> FormValidator {
    base_builder().build()
}

/// Same schema, with a uniqueness probe on the PhilSys number for
/// [`validate_async`](FormValidator::validate_async) callers.
pub fn resident_validator_with_unique_check(
    philsys_unique: Arc<dyn AsyncCheck>,
) -> FormValidator {
    base_builder()
        .async_field(
            "philsys_number",
            AsyncRule::new(
                "philsys_unique",
                "PhilSys number is already registered",
                philsys_unique,
            ),
        )
        .build()
}

fn base_builder() -> FormValidatorBuilder {
    let occupation_sanitizer =
        |s: &str| sanitize_text(s, &SanitizeOptions::default());

    FormValidator::builder()
        .sanitized_field("first_name", sanitize_name, vec![required(), person_name()])
        .sanitized_field("middle_name", sanitize_name, vec![person_name()])
        .sanitized_field("last_name", sanitize_name, vec![required(), person_name()])
        .sanitized_field("suffix", sanitize_name, vec![person_name()])
        .field("sex", vec![required(), one_of(choices::SEX, "sex")])
        .field("civil_status", vec![one_of(choices::CIVIL_STATUS, "civil status")])
        .field("birthdate", vec![required(), date()])
        .field("age", vec![age()])
        .sanitized_field("mobile_number", sanitize_phone, vec![mobile_number()])
        .sanitized_field("email", sanitize_email, vec![email()])
        .sanitized_field(
            "philsys_number",
            sanitize_philsys_number,
            vec![philsys_number()],
        )
        .field("blood_type", vec![one_of(choices::BLOOD_TYPE, "blood type")])
        .field("citizenship", vec![one_of(choices::CITIZENSHIP, "citizenship")])
        .field("religion", vec![one_of(choices::RELIGION, "religion")])
        .field("ethnicity", vec![one_of(choices::ETHNICITY, "ethnicity")])
        .field(
            "education_level",
            vec![one_of(choices::EDUCATION_LEVEL, "education level")],
        )
        .field(
            "employment_status",
            vec![one_of(choices::EMPLOYMENT_STATUS, "employment status")],
        )
        .sanitized_field("occupation", occupation_sanitizer, vec![])
        .field(
            "psoc_code",
            vec![pattern(
                Regex::new(r"^\d{1,5}$").unwrap(),
                "Occupation code must be 1 to 5 digits",
            )],
        )
        .field("status", vec![one_of(choices::RESIDENT_STATUS, "resident status")])
        .field(
            "household_role",
            vec![one_of(choices::HOUSEHOLD_ROLE, "household role")],
        )
        .field("household_id", vec![record_id()])
        .rule(conditional_required("occupation", "employment_status", None))
        .rule(age_matches_birthdate())
}

/// Warns (never fails) when a stated age is more than a year off the age
/// implied by the birthdate.
fn age_matches_birthdate() -> CrossRule {
    CrossRule::new("age_matches_birthdate", |record, ctx| {
        let mut result = ValidationResult::new();
        let stated = match record.get("age") {
            Some(Value::Number(n)) => n.as_i64(),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        };
        let birthdate = record
            .get("birthdate")
            .and_then(Value::as_str)
            .and_then(|s| chrono::NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok());
        if let (Some(stated), Some(birthdate)) = (stated, birthdate) {
            if let Some(implied) = ctx.timestamp.date_naive().years_since(birthdate) {
                if (stated - i64::from(implied)).abs() > 1 {
                    result.add_warning("age", "Age does not match the given birthdate");
                }
            }
        }
        result
    })
}

/// On-blur context helper used by intake UIs: validates and cleans one name
/// part without running the whole schema.
pub fn check_name_field(
    value: &Value,
    field: &str,
    record: &crate::common::Record,
    ctx: &ValidationContext,
) -> crate::common::FieldValidationResult {
    crate::form::validate_field(
        value,
        field,
        record,
        ctx,
        Some(&sanitize_name),
        &[required(), person_name()],
    )
}
