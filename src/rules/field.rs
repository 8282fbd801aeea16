// Single-field validation rules
//
// Every rule is a named, stateless check with the same signature:
// (value, field name, whole record, context) -> error message or None.
// Except for `required`, an empty or absent value passes — presence is the
// `required` rule's concern, format is everyone else's.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::common::{Record, ValidationContext};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap());
static MOBILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(09\d{9}|\+?639\d{9})$").unwrap());
static PHILSYS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4}-\d{4}-\d{4}|\d{12})$").unwrap());
static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://[^\s/$.?#][^\s]*$").unwrap());

pub const REQUIRED_MESSAGE: &str = "This field is required";

type CheckFn = dyn Fn(&Value, &str, &Record, &ValidationContext) -> Option<String> + Send + Sync;

/// A named validation rule over one field value. Rules hold no state and are
/// freely shared and composed.
pub struct FieldRule {
    name: &'static str,
    check: Box<CheckFn>,
}

impl FieldRule {
    pub fn new(
        name: &'static str,
        check: impl Fn(&Value, &str, &Record, &ValidationContext) -> Option<String>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        Self {
            name,
            check: Box::new(check),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn check(
        &self,
        value: &Value,
        field: &str,
        record: &Record,
        ctx: &ValidationContext,
    ) -> Option<String> {
        (self.check)(value, field, record, ctx)
    }
}

impl fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRule").field("name", &self.name).finish()
    }
}

/// Null, missing, and blank strings count as empty. Everything else (numbers,
/// booleans, arrays, objects) counts as present.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub fn required() -> FieldRule {
    FieldRule::new("required", |value, _, _, _| {
        if is_empty_value(value) {
            Some(REQUIRED_MESSAGE.to_string())
        } else {
            None
        }
    })
}

pub fn email() -> FieldRule {
    FieldRule::new("email", |value, _, _, _| {
        if is_empty_value(value) {
            return None;
        }
        match value.as_str() {
            Some(s) if EMAIL_RE.is_match(s.trim()) => None,
            _ => Some("Email address must be valid".to_string()),
        }
    })
}

/// Philippine mobile number: `09` plus nine digits, or the `639` country
/// form with or without a leading plus. Separators are tolerated.
pub fn mobile_number() -> FieldRule {
    FieldRule::new("mobile_number", |value, _, _, _| {
        if is_empty_value(value) {
            return None;
        }
        let compact = value.as_str().map(|s| {
            s.chars()
                .filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '.'))
                .collect::<String>()
        });
        match compact {
            Some(s) if MOBILE_RE.is_match(&s) => None,
            _ => Some("Mobile number must be a valid Philippine mobile number".to_string()),
        }
    })
}

/// PhilSys number: twelve digits, bare or grouped as 1234-5678-9012.
pub fn philsys_number() -> FieldRule {
    FieldRule::new("philsys_number", |value, _, _, _| {
        if is_empty_value(value) {
            return None;
        }
        match value.as_str() {
            Some(s) if PHILSYS_RE.is_match(s.trim()) => None,
            _ => Some("PhilSys number must follow the 1234-5678-9012 format".to_string()),
        }
    })
}

pub fn person_name() -> FieldRule {
    FieldRule::new("person_name", |value, _, _, _| {
        if is_empty_value(value) {
            return None;
        }
        let Some(s) = value.as_str() else {
            return Some("Name contains invalid characters".to_string());
        };
        let allowed = s
            .chars()
            .all(|c| c.is_alphabetic() || matches!(c, ' ' | '-' | '\'' | '.'));
        if !allowed {
            Some("Name contains invalid characters".to_string())
        } else if s.chars().count() > 100 {
            Some("Name must be 100 characters or fewer".to_string())
        } else {
            None
        }
    })
}

pub fn age() -> FieldRule {
    FieldRule::new("age", |value, _, _, _| {
        if is_empty_value(value) {
            return None;
        }
        match as_integer(value) {
            Some(n) if (0..=150).contains(&n) => None,
            Some(_) => Some("Age must be between 0 and 150".to_string()),
            None => Some("Age must be a whole number".to_string()),
        }
    })
}

pub fn length(min: usize, max: usize) -> FieldRule {
    FieldRule::new("length", move |value, _, _, _| {
        if is_empty_value(value) {
            return None;
        }
        let Some(s) = value.as_str() else {
            return Some(format!("Must be between {min} and {max} characters"));
        };
        let count = s.chars().count();
        if count < min {
            Some(format!("Must be at least {min} characters"))
        } else if count > max {
            Some(format!("Must be at most {max} characters"))
        } else {
            None
        }
    })
}

pub fn pattern(re: Regex, message: impl Into<String>) -> FieldRule {
    let message = message.into();
    FieldRule::new("pattern", move |value, _, _, _| {
        if is_empty_value(value) {
            return None;
        }
        match value.as_str() {
            Some(s) if re.is_match(s.trim()) => None,
            _ => Some(message.clone()),
        }
    })
}

pub fn numeric_range(min: f64, max: f64) -> FieldRule {
    FieldRule::new("numeric_range", move |value, _, _, _| {
        if is_empty_value(value) {
            return None;
        }
        match as_number(value) {
            Some(n) if n >= min && n <= max => None,
            Some(_) => Some(format!("Must be between {min} and {max}")),
            None => Some("Must be a number".to_string()),
        }
    })
}

/// Calendar date in YYYY-MM-DD form. Future dates are rejected unless the
/// context allows them (view mode does, create and update do not).
pub fn date() -> FieldRule {
    FieldRule::new("date", |value, _, _, ctx| {
        if is_empty_value(value) {
            return None;
        }
        let parsed = value
            .as_str()
            .and_then(|s| chrono::NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok());
        let Some(d) = parsed else {
            return Some("Date must be in YYYY-MM-DD format".to_string());
        };
        if !ctx.allows_future_dates() && d > ctx.timestamp.date_naive() {
            return Some("Date cannot be in the future".to_string());
        }
        None
    })
}

pub fn url() -> FieldRule {
    FieldRule::new("url", |value, _, _, _| {
        if is_empty_value(value) {
            return None;
        }
        match value.as_str() {
            Some(s) if URL_RE.is_match(s.trim()) => None,
            _ => Some("Must be a valid URL starting with http:// or https://".to_string()),
        }
    })
}

/// Membership in one of the generated registry choice lists.
pub fn one_of(allowed: &'static [&'static str], label: &'static str) -> FieldRule {
    FieldRule::new("one_of", move |value, _, _, _| {
        if is_empty_value(value) {
            return None;
        }
        match value.as_str() {
            Some(s) if allowed.iter().any(|choice| *choice == s) => None,
            _ => Some(format!("Invalid {label}")),
        }
    })
}

pub fn record_id() -> FieldRule {
    FieldRule::new("record_id", |value, _, _, _| {
        if is_empty_value(value) {
            return None;
        }
        match value.as_str() {
            Some(s) if uuid::Uuid::parse_str(s.trim()).is_ok() => None,
            _ => Some("Must be a valid UUID".to_string()),
        }
    })
}
