// Common validation types shared across all modules

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// A form record under validation: field name -> submitted value.
pub type Record = serde_json::Map<String, Value>;

/// Error key for failures that cannot be attributed to a single field.
pub const FORM_FIELD: &str = "_form";

/// Error key for a fault raised inside a validation pipeline stage.
pub const PIPELINE_FIELD: &str = "_pipeline";

/// Outcome of validating a whole record.
///
/// This is the one canonical result shape: an error map keyed by field name
/// (keys unique, first write wins per validation phase), a warning map that
/// never affects validity, and the sanitized record on success. Validity is
/// always derived from the error map, never stored.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationResult {
    errors: BTreeMap<String, String>,
    warnings: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Record>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-error constructor, for rules that fail one field outright.
    pub fn invalid(field: &str, message: &str) -> Self {
        let mut result = Self::new();
        result.add_error(field, message);
        result
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: &str, message: &str) {
        self.errors.insert(field.to_string(), message.to_string());
    }

    pub fn add_warning(&mut self, field: &str, message: &str) {
        self.warnings.insert(field.to_string(), message.to_string());
    }

    /// Union of error and warning maps; `other`'s data shallow-overrides ours.
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        match (&mut self.data, other.data) {
            (Some(ours), Some(theirs)) => {
                for (field, value) in theirs {
                    ours.insert(field, value);
                }
            }
            (ours @ None, Some(theirs)) => *ours = Some(theirs),
            _ => {}
        }
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn has_error(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn error_fields(&self) -> Vec<&str> {
        self.errors.keys().map(String::as_str).collect()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    pub fn warnings(&self) -> &BTreeMap<String, String> {
        &self.warnings
    }

    pub fn set_data(&mut self, data: Record) {
        self.data = Some(data);
    }

    pub fn data(&self) -> Option<&Record> {
        self.data.as_ref()
    }

    pub fn into_data(self) -> Option<Record> {
        self.data
    }
}

/// Outcome of validating a single field, used by per-field (on-blur) checks.
///
/// A warning may coexist with a valid outcome. The sanitized value, when
/// present, is a cleaned replacement of the same JSON type as the input.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FieldValidationResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sanitized: Option<Value>,
}

impl FieldValidationResult {
    pub fn valid() -> Self {
        Self::default()
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

/// Flat error record for API responses and logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
    pub code: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn validity_follows_error_map() {
        let mut result = ValidationResult::new();
        assert!(result.is_valid());

        result.add_warning("email", "Unusual domain");
        assert!(result.is_valid());
        assert!(result.has_warnings());

        result.add_error("email", "Email address must be valid");
        assert!(!result.is_valid());
        assert_eq!(result.error("email"), Some("Email address must be valid"));
    }

    #[test]
    fn merge_unions_errors_and_overrides_data() {
        let mut first = ValidationResult::new();
        first.add_error("first_name", "This field is required");
        let mut data = Record::new();
        data.insert("last_name".to_string(), json!("Cruz"));
        first.set_data(data);

        let mut second = ValidationResult::new();
        second.add_error("birthdate", "Date must be in YYYY-MM-DD format");
        let mut data = Record::new();
        data.insert("last_name".to_string(), json!("Dela Cruz"));
        second.set_data(data);

        first.merge(second);
        assert_eq!(first.error_count(), 2);
        assert_eq!(first.data().unwrap()["last_name"], json!("Dela Cruz"));
    }

    #[test]
    fn field_result_defaults_to_valid() {
        let result = FieldValidationResult::valid();
        assert!(result.is_valid());
        assert!(result.sanitized.is_none());

        let result = FieldValidationResult::invalid("Name contains invalid characters");
        assert!(!result.is_valid());
    }
}
