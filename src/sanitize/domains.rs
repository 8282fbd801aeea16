// Destination-specific sanitizers
//
// Each function applies a character allow-list, a length cap, and removal of
// the patterns dangerous for its destination. Callers pick the variant that
// matches where the value goes; see also `text::sanitize_text` for the
// configurable general cleaner. Every function here is idempotent.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::common::Record;
use crate::sanitize::text::strip_html;

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

const NAME_MAX: usize = 100;
const PHONE_MAX: usize = 16;
const EMAIL_MAX: usize = 254;
const URL_MAX: usize = 2048;
const SEARCH_MAX: usize = 200;
const FILENAME_MAX: usize = 255;
const DB_INPUT_MAX: usize = 1024;

/// Cleans a person-name field: keeps letters, spaces, hyphens, apostrophes
/// and periods, collapses runs of whitespace, trims edge punctuation, and
/// title-cases each word.
pub fn sanitize_name(input: &str) -> String {
    let filtered: String = input
        .chars()
        .filter(|c| c.is_alphabetic() || matches!(c, ' ' | '-' | '\'' | '.'))
        .collect();
    let collapsed = WHITESPACE_RE.replace_all(filtered.trim(), " ");
    let trimmed =
        collapsed.trim_matches(|c: char| c.is_whitespace() || matches!(c, '-' | '\'' | '.'));
    title_case(trimmed).chars().take(NAME_MAX).collect()
}

// Capitalizes each letter that starts the string or follows a non-letter,
// so hyphenated and apostrophized name parts are cased too.
fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut boundary = true;
    for ch in input.chars() {
        if ch.is_alphabetic() {
            if boundary {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            boundary = false;
        } else {
            out.push(ch);
            boundary = true;
        }
    }
    out
}

/// Strips a PhilSys number down to digits and regroups it as 1234-5678-9012
/// when exactly twelve digits remain; otherwise returns the bare digits.
pub fn sanitize_philsys_number(input: &str) -> String {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() == 12 {
        format!("{}-{}-{}", &digits[..4], &digits[4..8], &digits[8..12])
    } else {
        digits
    }
}

/// Keeps digits and one leading plus sign.
pub fn sanitize_phone(input: &str) -> String {
    let mut out = String::new();
    for ch in input.trim().chars() {
        if ch.is_ascii_digit() {
            out.push(ch);
        } else if ch == '+' && out.is_empty() {
            out.push('+');
        }
    }
    out.chars().take(PHONE_MAX).collect()
}

/// Lowercases and keeps only characters valid in an email address.
pub fn sanitize_email(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '@' | '.' | '_' | '%' | '+' | '-'))
        .flat_map(char::to_lowercase)
        .take(EMAIL_MAX)
        .collect()
}

/// Removes whitespace and control characters and rejects scriptable schemes
/// outright (returns the empty string for them).
pub fn sanitize_url(input: &str) -> String {
    let cleaned: String = input
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .take(URL_MAX)
        .collect();
    let lowered = cleaned.to_lowercase();
    for scheme in ["javascript:", "data:", "vbscript:"] {
        if lowered.starts_with(scheme) {
            return String::new();
        }
    }
    cleaned
}

/// Cleans free-text search input: no tags, no quote/metacharacters,
/// collapsed whitespace.
pub fn sanitize_search_query(input: &str) -> String {
    let stripped = strip_html(input);
    let filtered: String = stripped
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | '"' | '\'' | ';' | '\\' | '%'))
        .collect();
    let collapsed = WHITESPACE_RE.replace_all(filtered.trim(), " ");
    collapsed.chars().take(SEARCH_MAX).collect()
}

/// Sanitize filename to prevent path traversal and other unsafe names.
pub fn sanitize_filename(filename: &str) -> String {
    let cleaned: String = filename
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .take(FILENAME_MAX)
        .collect();
    cleaned.trim_matches('.').to_string()
}

/// Strips SQL metacharacters and comment sequences from a value headed for
/// the database layer. Removal loops until stable so removed characters
/// cannot splice new dangerous sequences together.
pub fn sanitize_db_input(input: &str) -> String {
    let mut out: String = input
        .trim()
        .chars()
        .filter(|c| !matches!(c, '\0' | '\'' | '"' | '`' | '\\' | ';'))
        .take(DB_INPUT_MAX)
        .collect();
    loop {
        let next = out.replace("--", "").replace("/*", "").replace("*/", "");
        if next == out {
            break;
        }
        out = next;
    }
    out
}

/// Applies a string sanitizer to every string leaf of a record, recursing
/// through nested objects and arrays. Non-string values pass through.
pub fn sanitize_record(record: &Record, sanitize: &dyn Fn(&str) -> String) -> Record {
    record
        .iter()
        .map(|(field, value)| (field.clone(), sanitize_value(value, sanitize)))
        .collect()
}

fn sanitize_value(value: &Value, sanitize: &dyn Fn(&str) -> String) -> Value {
    match value {
        Value::String(s) => Value::String(sanitize(s)),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), sanitize_value(v, sanitize)))
                .collect(),
        ),
        Value::Array(items) => {
            Value::Array(items.iter().map(|v| sanitize_value(v, sanitize)).collect())
        }
        other => other.clone(),
    }
}
