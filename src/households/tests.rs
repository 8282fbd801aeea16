//! Tests for the households module
//!
//! These tests verify the household form schema:
//! - household number and address shape checks
//! - the at-least-one-contact and residency date range rules
//! - the ordering guarantee between field and cross-field phases

#[cfg(test)]
mod tests {
    use crate::common::{Record, ValidationContext};
    use crate::households::household_validator;
    use serde_json::{json, Value};

    fn record(pairs: &[(&str, Value)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn minimal() -> Vec<(&'static str, Value)> {
        vec![
            ("household_number", json!("2024-0117")),
            ("head_of_household", json!("maria clara")),
            ("purok", json!("Purok 7")),
            ("contact_number", json!("09171234567")),
        ]
    }

    #[test]
    fn minimal_household_passes() {
        let validator = household_validator();
        let result = validator.validate(&record(&minimal()), &ValidationContext::create());
        assert!(result.is_valid(), "errors: {:?}", result.errors());
        assert_eq!(
            result.data().unwrap()["head_of_household"],
            json!("Maria Clara")
        );
    }

    #[test]
    fn household_number_shape_is_enforced() {
        let validator = household_validator();
        let mut fields = minimal();
        fields[0] = ("household_number", json!("20240117"));
        let result = validator.validate(&record(&fields), &ValidationContext::create());
        assert_eq!(
            result.error("household_number"),
            Some("Household number must follow the 0000-0000 format")
        );
    }

    #[test]
    fn some_contact_channel_is_required() {
        let validator = household_validator();
        let fields = vec![
            ("household_number", json!("2024-0117")),
            ("head_of_household", json!("Maria Clara")),
            ("purok", json!("Purok 7")),
        ];
        let result = validator.validate(&record(&fields), &ValidationContext::create());
        assert!(result.has_error("contact_number"));
        assert!(result.has_error("email"));
    }

    #[test]
    fn backwards_residency_range_is_rejected() {
        let validator = household_validator();
        let mut fields = minimal();
        fields.push(("residency_start", json!("2020-05-01")));
        fields.push(("residency_end", json!("2019-01-01")));
        let result = validator.validate(&record(&fields), &ValidationContext::create());
        assert_eq!(
            result.error("residency_end"),
            Some("End date must be after start date")
        );
    }

    #[test]
    fn cross_rules_wait_for_field_phase() {
        let validator = household_validator();
        // purok missing (field error) and both contacts missing (cross error):
        // only the field error may appear
        let fields = vec![
            ("household_number", json!("2024-0117")),
            ("head_of_household", json!("Maria Clara")),
        ];
        let result = validator.validate(&record(&fields), &ValidationContext::create());
        assert!(result.has_error("purok"));
        assert!(!result.has_error("contact_number"));
        assert!(!result.has_error("email"));
    }

    #[test]
    fn odd_zip_code_warns_without_failing() {
        let validator = household_validator();
        let mut fields = minimal();
        fields.push(("zip_code", json!("410")));
        let result = validator.validate(&record(&fields), &ValidationContext::create());
        assert!(result.is_valid());
        assert_eq!(
            result.warnings().get("zip_code").map(String::as_str),
            Some("ZIP code is usually 4 digits")
        );
    }
}
