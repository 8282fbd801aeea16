// Cross-field rules
//
// Evaluated against the whole record, and only after every per-field rule
// has passed, so they can assume individually well-formed values.

use std::fmt;

use chrono::NaiveDate;

use crate::common::{Record, ValidationContext, ValidationResult};
use crate::results::humanize_field;
use crate::rules::field::is_empty_value;

type ApplyFn = dyn Fn(&Record, &ValidationContext) -> ValidationResult + Send + Sync;

/// A named whole-record rule producing its own result to merge.
pub struct CrossRule {
    name: &'static str,
    apply: Box<ApplyFn>,
}

impl CrossRule {
    pub fn new(
        name: &'static str,
        apply: impl Fn(&Record, &ValidationContext) -> ValidationResult + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            apply: Box::new(apply),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn apply(&self, record: &Record, ctx: &ValidationContext) -> ValidationResult {
        (self.apply)(record, ctx)
    }
}

impl fmt::Debug for CrossRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrossRule").field("name", &self.name).finish()
    }
}

fn field_value<'a>(record: &'a Record, field: &str) -> &'a serde_json::Value {
    record.get(field).unwrap_or(&serde_json::Value::Null)
}

/// Fails on `field_b` when the two values differ (password confirmation and
/// the like). Two absent values match.
pub fn fields_match(field_a: &str, field_b: &str, message: Option<&str>) -> CrossRule {
    let field_a = field_a.to_string();
    let field_b = field_b.to_string();
    let message = message.map(str::to_string).unwrap_or_else(|| {
        format!(
            "{} must match {}",
            humanize_field(&field_b),
            humanize_field(&field_a)
        )
    });
    CrossRule::new("fields_match", move |record, _| {
        if field_value(record, &field_a) == field_value(record, &field_b) {
            ValidationResult::new()
        } else {
            ValidationResult::invalid(&field_b, &message)
        }
    })
}

/// Fails every listed field when all of them are empty.
pub fn at_least_one_required(fields: &[&str], message: Option<&str>) -> CrossRule {
    let fields: Vec<String> = fields.iter().map(|f| f.to_string()).collect();
    let message = message
        .map(str::to_string)
        .unwrap_or_else(|| "At least one of these fields is required".to_string());
    CrossRule::new("at_least_one_required", move |record, _| {
        let mut result = ValidationResult::new();
        if fields.iter().all(|f| is_empty_value(field_value(record, f))) {
            for field in &fields {
                result.add_error(field, &message);
            }
        }
        result
    })
}

/// Fails on the end field when both dates parse and the start is later.
/// Unparseable values are the per-field date rule's concern, not this one's.
pub fn valid_date_range(start_field: &str, end_field: &str, message: Option<&str>) -> CrossRule {
    let start_field = start_field.to_string();
    let end_field = end_field.to_string();
    let message = message
        .map(str::to_string)
        .unwrap_or_else(|| "End date must be after start date".to_string());
    CrossRule::new("valid_date_range", move |record, _| {
        let parse = |field: &str| {
            field_value(record, field)
                .as_str()
                .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
        };
        match (parse(&start_field), parse(&end_field)) {
            (Some(start), Some(end)) if start > end => {
                ValidationResult::invalid(&end_field, &message)
            }
            _ => ValidationResult::new(),
        }
    })
}

/// Fails on `required_field` when `trigger_field` holds a value but the
/// required field does not.
pub fn conditional_required(
    trigger_field: &str,
    required_field: &str,
    message: Option<&str>,
) -> CrossRule {
    let trigger_field = trigger_field.to_string();
    let required_field = required_field.to_string();
    let message = message
        .map(str::to_string)
        .unwrap_or_else(|| format!("{} is required", humanize_field(required_field.as_str())));
    CrossRule::new("conditional_required", move |record, _| {
        let triggered = !is_empty_value(field_value(record, &trigger_field));
        if triggered && is_empty_value(field_value(record, &required_field)) {
            ValidationResult::invalid(&required_field, &message)
        } else {
            ValidationResult::new()
        }
    })
}
