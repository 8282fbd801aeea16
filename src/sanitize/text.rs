// General text sanitation with per-step toggles

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Which cleanup steps `sanitize_text` applies, in order: unicode
/// normalization, whitespace trim, HTML tag stripping, HTML entity escaping,
/// allowed-character filtering, max-length truncation.
#[derive(Debug, Clone)]
pub struct SanitizeOptions {
    pub normalize_unicode: bool,
    pub trim_whitespace: bool,
    pub strip_html: bool,
    pub escape_html: bool,
    /// When set, only characters in this set survive.
    pub allowed_chars: Option<String>,
    /// When set, output is truncated to this many characters.
    pub max_length: Option<usize>,
}

impl Default for SanitizeOptions {
    fn default() -> Self {
        Self {
            normalize_unicode: true,
            trim_whitespace: true,
            strip_html: true,
            escape_html: false,
            allowed_chars: None,
            max_length: None,
        }
    }
}

/// Cleans a raw string for display or storage. Total: never fails, worst
/// case is the empty string. Re-running on its own output is a no-op.
pub fn sanitize_text(input: &str, options: &SanitizeOptions) -> String {
    let mut out = if options.normalize_unicode {
        normalize_unicode(input)
    } else {
        input.to_string()
    };
    if options.trim_whitespace {
        out = out.trim().to_string();
    }
    if options.strip_html {
        out = strip_html(&out);
    }
    if options.escape_html {
        out = escape_html(&out);
    }
    if let Some(allowed) = &options.allowed_chars {
        out.retain(|c| allowed.contains(c));
    }
    if let Some(max) = options.max_length {
        if out.chars().count() > max {
            out = out.chars().take(max).collect();
        }
    }
    if options.trim_whitespace {
        // tag stripping and filtering can expose new edge whitespace;
        // re-trim so the result is stable under re-sanitation
        out = out.trim().to_string();
    }
    out
}

/// NFC normalization plus removal of control and zero-width characters
/// (newlines and tabs survive).
pub fn normalize_unicode(input: &str) -> String {
    input
        .nfc()
        .filter(|c| {
            !matches!(c, '\u{200B}'..='\u{200D}' | '\u{FEFF}')
                && (!c.is_control() || matches!(c, '\n' | '\t'))
        })
        .collect()
}

/// Removes `<...>` tag spans. Unpaired angle brackets are left alone.
pub fn strip_html(input: &str) -> String {
    TAG_RE.replace_all(input, "").into_owned()
}

const ENTITIES: [&str; 5] = ["&amp;", "&lt;", "&gt;", "&quot;", "&#x27;"];

/// Escapes HTML-significant characters. Ampersands that already begin one of
/// the escape entities are kept, so escaping is idempotent.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for (index, ch) in input.char_indices() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '&' => {
                let rest = &input[index..];
                if ENTITIES.iter().any(|entity| rest.starts_with(entity)) {
                    out.push('&');
                } else {
                    out.push_str("&amp;");
                }
            }
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_clean_tags_and_whitespace() {
        let options = SanitizeOptions::default();
        assert_eq!(
            sanitize_text("  <b>Juan</b> dela Cruz \u{200B} ", &options),
            "Juan dela Cruz"
        );
    }

    #[test]
    fn steps_are_individually_toggleable() {
        let options = SanitizeOptions {
            strip_html: false,
            trim_whitespace: false,
            ..SanitizeOptions::default()
        };
        assert_eq!(sanitize_text(" <i>x</i> ", &options), " <i>x</i> ");

        let options = SanitizeOptions {
            allowed_chars: Some("0123456789".to_string()),
            ..SanitizeOptions::default()
        };
        assert_eq!(sanitize_text("Purok 7, Zone 12", &options), "712");
    }

    #[test]
    fn max_length_truncates_by_characters() {
        let options = SanitizeOptions {
            max_length: Some(5),
            ..SanitizeOptions::default()
        };
        assert_eq!(sanitize_text("Poblacion", &options), "Pobla");
        assert_eq!(sanitize_text("ñañañañá", &options), "ñañañ");
    }

    #[test]
    fn escape_html_is_idempotent() {
        let once = escape_html("<script>alert('x') & more</script>");
        let twice = escape_html(&once);
        assert_eq!(once, twice);
        assert_eq!(
            once,
            "&lt;script&gt;alert(&#x27;x&#x27;) &amp; more&lt;/script&gt;"
        );
    }

    #[test]
    fn sanitize_text_is_idempotent() {
        let options = SanitizeOptions {
            escape_html: true,
            ..SanitizeOptions::default()
        };
        for raw in ["  <b> hi ", "a < b & c > d", "plain", ""] {
            let once = sanitize_text(raw, &options);
            assert_eq!(sanitize_text(&once, &options), once, "input: {raw:?}");
        }
    }
}
