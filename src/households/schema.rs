// src/households/schema.rs

use regex::Regex;

use crate::form::FormValidator;
use crate::rules::{
    at_least_one_required, date, email, length, mobile_number, numeric_range, one_of, pattern,
    person_name, required, valid_date_range,
};
use crate::sanitize::{sanitize_email, sanitize_name, sanitize_phone, sanitize_text, SanitizeOptions};
use crate::schema::choices;

/// Validator for the household registration and edit forms.
pub fn household_validator() -> FormValidator {
    let address_sanitizer = |s: &str| sanitize_text(s, &SanitizeOptions::default());

    FormValidator::builder()
        .field(
            "household_number",
            vec![
                required(),
                pattern(
                    Regex::new(r"^\d{4}-\d{4}$").unwrap(),
                    "Household number must follow the 0000-0000 format",
                ),
            ],
        )
        .sanitized_field(
            "head_of_household",
            sanitize_name,
            vec![required(), person_name()],
        )
        .field("purok", vec![required(), length(1, 50)])
        .sanitized_field("street", address_sanitizer, vec![length(0, 120)])
        .sanitized_field("landmark", address_sanitizer, vec![length(0, 120)])
        .field("member_count", vec![numeric_range(1.0, 50.0)])
        .field("monthly_income", vec![numeric_range(0.0, 10_000_000.0)])
        .field("income_class", vec![one_of(choices::INCOME_CLASS, "income class")])
        .sanitized_field("contact_number", sanitize_phone, vec![mobile_number()])
        .sanitized_field("email", sanitize_email, vec![email()])
        .field("residency_start", vec![date()])
        .field("residency_end", vec![date()])
        .warn_field(
            "zip_code",
            vec![pattern(
                Regex::new(r"^\d{4}$").unwrap(),
                "ZIP code is usually 4 digits",
            )],
        )
        .rule(at_least_one_required(&["contact_number", "email"], None))
        .rule(valid_date_range("residency_start", "residency_end", None))
        .build()
}
