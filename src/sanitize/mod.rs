// src/sanitize/mod.rs

pub mod domains;
pub mod text;

// Re-export commonly used items
pub use domains::{
    sanitize_db_input, sanitize_email, sanitize_filename, sanitize_name, sanitize_philsys_number,
    sanitize_phone, sanitize_record, sanitize_search_query, sanitize_url,
};
pub use text::{escape_html, normalize_unicode, sanitize_text, strip_html, SanitizeOptions};
