// src/rules/mod.rs

pub mod combine;
pub mod cross;
pub mod field;

// Re-export commonly used items
pub use combine::{compose, when, AsyncCheck, AsyncRule, CHECK_FAILED_MESSAGE};
pub use cross::{
    at_least_one_required, conditional_required, fields_match, valid_date_range, CrossRule,
};
pub use field::{
    age, date, email, is_empty_value, length, mobile_number, numeric_range, one_of, pattern,
    person_name, philsys_number, record_id, required, url, FieldRule, REQUIRED_MESSAGE,
};
