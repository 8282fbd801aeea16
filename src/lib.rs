// Field and form validation for Records of Barangay Inhabitants registries.
//
// Invalid input is data, never an error: every validator reports through
// `ValidationResult`. See `form::FormValidator` for whole-record schemas and
// `rules` for the individual checks they are built from.

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod accounts;
pub mod common;
pub mod form;
pub mod households;
pub mod residents;
pub mod results;
pub mod rules;
pub mod sanitize;
pub mod schema;

// ============================================================================
// COMMON RE-EXPORTS
// ============================================================================

pub use common::{
    FieldIssue, FieldValidationResult, Mode, Record, ValidationContext, ValidationFault,
    ValidationResult, FORM_FIELD, PIPELINE_FIELD,
};
pub use form::{validate_field, FormValidator, FormValidatorBuilder};
