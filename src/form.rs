// Whole-record validation built from per-field rules and cross-field rules
//
// Validation runs in two phases: every declared field is checked on its own
// (first failing rule wins for that field, fields are independent of each
// other), then cross-field rules run in declaration order, and only when the
// field phase produced no errors. Cross rules may therefore assume
// individually valid values.

use serde_json::Value;

use crate::common::{FieldValidationResult, Record, ValidationContext, ValidationResult};
use crate::rules::{AsyncRule, CrossRule, FieldRule};

type Sanitizer = Box<dyn Fn(&str) -> String + Send + Sync>;

struct FieldSpec {
    name: String,
    sanitizer: Option<Sanitizer>,
    rules: Vec<FieldRule>,
    warn_rules: Vec<FieldRule>,
    async_rules: Vec<AsyncRule>,
}

impl FieldSpec {
    fn new(name: String) -> Self {
        Self {
            name,
            sanitizer: None,
            rules: Vec::new(),
            warn_rules: Vec::new(),
            async_rules: Vec::new(),
        }
    }
}

/// Validates whole records against a declared field schema plus cross-field
/// rules. Built once at startup, stateless, reusable across calls.
pub struct FormValidator {
    fields: Vec<FieldSpec>,
    cross_rules: Vec<CrossRule>,
}

impl FormValidator {
    pub fn builder() -> FormValidatorBuilder {
        FormValidatorBuilder {
            fields: Vec::new(),
            cross_rules: Vec::new(),
        }
    }

    /// Synchronous validation: field phase, then cross-field phase. Any
    /// deferred async rules in the schema are not run here.
    pub fn validate(&self, record: &Record, ctx: &ValidationContext) -> ValidationResult {
        let (mut result, working) = self.run_field_phase(record, ctx);
        if result.is_valid() {
            self.run_cross_phase(&working, ctx, &mut result);
        }
        if result.is_valid() {
            result.set_data(working);
        }
        result
    }

    /// Like [`validate`](Self::validate), but additionally awaits each
    /// field's async rules (skipped for fields that already failed a
    /// synchronous rule) before the cross-field phase.
    pub async fn validate_async(
        &self,
        record: &Record,
        ctx: &ValidationContext,
    ) -> ValidationResult {
        let (mut result, working) = self.run_field_phase(record, ctx);
        for spec in &self.fields {
            if result.has_error(&spec.name) {
                continue;
            }
            let value = working.get(&spec.name).cloned().unwrap_or(Value::Null);
            for rule in &spec.async_rules {
                if let Some(message) = rule.run(&value, &spec.name, record, ctx).await {
                    result.add_error(&spec.name, &message);
                    break;
                }
            }
        }
        if result.is_valid() {
            self.run_cross_phase(&working, ctx, &mut result);
        }
        if result.is_valid() {
            result.set_data(working);
        }
        result
    }

    fn run_field_phase(
        &self,
        record: &Record,
        ctx: &ValidationContext,
    ) -> (ValidationResult, Record) {
        let mut result = ValidationResult::new();
        let mut working = record.clone();
        for spec in &self.fields {
            let raw = record.get(&spec.name);
            let mut value = raw.cloned().unwrap_or(Value::Null);
            if let Some(sanitizer) = &spec.sanitizer {
                if let Value::String(s) = &value {
                    value = Value::String(sanitizer(s));
                }
            }
            if raw.is_some() {
                working.insert(spec.name.clone(), value.clone());
            }
            for rule in &spec.rules {
                if let Some(message) = rule.check(&value, &spec.name, record, ctx) {
                    result.add_error(&spec.name, &message);
                    break;
                }
            }
            if !result.has_error(&spec.name) {
                for rule in &spec.warn_rules {
                    if let Some(message) = rule.check(&value, &spec.name, record, ctx) {
                        result.add_warning(&spec.name, &message);
                        break;
                    }
                }
            }
        }
        (result, working)
    }

    fn run_cross_phase(
        &self,
        record: &Record,
        ctx: &ValidationContext,
        result: &mut ValidationResult,
    ) {
        for rule in &self.cross_rules {
            result.merge(rule.apply(record, ctx));
        }
    }
}

pub struct FormValidatorBuilder {
    fields: Vec<FieldSpec>,
    cross_rules: Vec<CrossRule>,
}

impl FormValidatorBuilder {
    fn spec_mut(&mut self, name: &str) -> &mut FieldSpec {
        if let Some(index) = self.fields.iter().position(|spec| spec.name == name) {
            &mut self.fields[index]
        } else {
            self.fields.push(FieldSpec::new(name.to_string()));
            self.fields.last_mut().unwrap()
        }
    }

    /// Declares a field with its rules, run in the given order.
    pub fn field(mut self, name: &str, rules: Vec<FieldRule>) -> Self {
        self.spec_mut(name).rules.extend(rules);
        self
    }

    /// Declares a field whose string value is sanitized before any rule
    /// runs; the sanitized value is what the success payload carries.
    pub fn sanitized_field(
        mut self,
        name: &str,
        sanitizer: impl Fn(&str) -> String + Send + Sync + 'static,
        rules: Vec<FieldRule>,
    ) -> Self {
        let spec = self.spec_mut(name);
        spec.sanitizer = Some(Box::new(sanitizer));
        spec.rules.extend(rules);
        self
    }

    /// Declares rules whose failures are recorded as warnings; they never
    /// affect validity.
    pub fn warn_field(mut self, name: &str, rules: Vec<FieldRule>) -> Self {
        self.spec_mut(name).warn_rules.extend(rules);
        self
    }

    /// Attaches a deferred external check to a field, run only by
    /// [`FormValidator::validate_async`].
    pub fn async_field(mut self, name: &str, rule: AsyncRule) -> Self {
        self.spec_mut(name).async_rules.push(rule);
        self
    }

    /// Appends a cross-field rule; rules run in the order added.
    pub fn rule(mut self, rule: CrossRule) -> Self {
        self.cross_rules.push(rule);
        self
    }

    pub fn build(self) -> FormValidator {
        FormValidator {
            fields: self.fields,
            cross_rules: self.cross_rules,
        }
    }
}

/// Validates one field on its own, for per-field (on-blur) UI checks.
pub fn validate_field(
    value: &Value,
    field: &str,
    record: &Record,
    ctx: &ValidationContext,
    sanitizer: Option<&(dyn Fn(&str) -> String + Send + Sync)>,
    rules: &[FieldRule],
) -> FieldValidationResult {
    let mut checked = value.clone();
    let mut sanitized = None;
    if let (Some(sanitizer), Value::String(s)) = (sanitizer, value) {
        let cleaned = sanitizer(s);
        if cleaned != *s {
            sanitized = Some(Value::String(cleaned.clone()));
        }
        checked = Value::String(cleaned);
    }
    for rule in rules {
        if let Some(message) = rule.check(&checked, field, record, ctx) {
            let mut result = FieldValidationResult::invalid(message);
            result.sanitized = sanitized;
            return result;
        }
    }
    FieldValidationResult {
        error: None,
        warning: None,
        sanitized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{
        date, email, fields_match, length, mobile_number, person_name, required, CrossRule,
        REQUIRED_MESSAGE,
    };
    use crate::sanitize::sanitize_name;
    use serde_json::json;

    fn record(pairs: &[(&str, Value)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn registry_form() -> FormValidator {
        FormValidator::builder()
            .sanitized_field("first_name", sanitize_name, vec![required(), person_name()])
            .sanitized_field("last_name", sanitize_name, vec![required(), person_name()])
            .field("birthdate", vec![date()])
            .field("email", vec![email()])
            .build()
    }

    #[test]
    fn validity_tracks_error_map() {
        let validator = registry_form();
        let ctx = ValidationContext::create();

        let bad = record(&[("first_name", json!("")), ("last_name", json!("Cruz"))]);
        let result = validator.validate(&bad, &ctx);
        assert_eq!(result.is_valid(), result.error_count() == 0);
        assert!(!result.is_valid());

        let good = record(&[("first_name", json!("Juan")), ("last_name", json!("Cruz"))]);
        let result = validator.validate(&good, &ctx);
        assert_eq!(result.is_valid(), result.error_count() == 0);
        assert!(result.is_valid());
    }

    #[test]
    fn first_failing_rule_wins_per_field() {
        let validator = registry_form();
        let result = validator.validate(
            &record(&[("last_name", json!("Cruz"))]),
            &ValidationContext::create(),
        );
        assert_eq!(result.error("first_name"), Some(REQUIRED_MESSAGE));
        assert_eq!(result.error_count(), 1);
    }

    #[test]
    fn success_payload_carries_sanitized_values() {
        let validator = registry_form();
        let result = validator.validate(
            &record(&[
                ("first_name", json!("  juan  ")),
                ("last_name", json!("dela cruz")),
                ("birthdate", json!("1990-01-01")),
            ]),
            &ValidationContext::create(),
        );
        assert!(result.is_valid());
        let data = result.data().unwrap();
        assert_eq!(data["first_name"], json!("Juan"));
        assert_eq!(data["last_name"], json!("Dela Cruz"));
        assert_eq!(data["birthdate"], json!("1990-01-01"));
    }

    #[test]
    fn cross_rules_run_only_after_field_phase_passes() {
        let validator = FormValidator::builder()
            .field("first_name", vec![required()])
            .field("new_password", vec![length(8, 128)])
            .rule(fields_match("new_password", "confirm_password", None))
            .build();
        let ctx = ValidationContext::create();

        // failing field phase suppresses the (also failing) cross rule
        let both_bad = record(&[
            ("new_password", json!("Abcd123!")),
            ("confirm_password", json!("different")),
        ]);
        let result = validator.validate(&both_bad, &ctx);
        assert!(result.has_error("first_name"));
        assert!(!result.has_error("confirm_password"));

        let field_phase_ok = record(&[
            ("first_name", json!("Juan")),
            ("new_password", json!("Abcd123!")),
            ("confirm_password", json!("different")),
        ]);
        let result = validator.validate(&field_phase_ok, &ctx);
        assert!(result.has_error("confirm_password"));
    }

    #[test]
    fn cross_rules_may_target_undeclared_fields() {
        let validator = FormValidator::builder()
            .field("head_of_household", vec![required()])
            .rule(CrossRule::new("household_sanity", |_, _| {
                ValidationResult::invalid("_form", "Household cannot be registered yet")
            }))
            .build();
        let result = validator.validate(
            &record(&[("head_of_household", json!("Juan Cruz"))]),
            &ValidationContext::create(),
        );
        assert_eq!(
            result.error(crate::common::FORM_FIELD),
            Some("Household cannot be registered yet")
        );
    }

    #[test]
    fn warnings_never_affect_validity() {
        let validator = FormValidator::builder()
            .field("mobile_number", vec![mobile_number()])
            .warn_field("middle_name", vec![required()])
            .build();
        let result = validator.validate(
            &record(&[("mobile_number", json!("09171234567"))]),
            &ValidationContext::create(),
        );
        assert!(result.is_valid());
        assert!(result.has_warnings());
        assert_eq!(result.warnings()["middle_name"], REQUIRED_MESSAGE);
    }

    #[test]
    fn input_record_is_never_mutated() {
        let validator = registry_form();
        let original = record(&[("first_name", json!("  juan  "))]);
        let snapshot = original.clone();
        let _ = validator.validate(&original, &ValidationContext::create());
        assert_eq!(original, snapshot);
    }

    #[test]
    fn single_field_check_reports_sanitized_value() {
        let result = validate_field(
            &json!("  juan   dela  cruz  "),
            "first_name",
            &Record::new(),
            &ValidationContext::create(),
            Some(&sanitize_name),
            &[required(), person_name()],
        );
        assert!(result.is_valid());
        assert_eq!(result.sanitized, Some(json!("Juan Dela Cruz")));
    }
}
