//! Denylist-style string sanitizers.
//!
//! These are pattern-based transforms, not parsers. Nested or malformed markup
//! can get through, so treat them as defense in depth on top of output
//! encoding at render time and parameterized queries.

use std::sync::LazyLock;

use regex::Regex;

static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

static SCRIPT_BLOCK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script>").unwrap());

static EVENT_HANDLER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\s*on\w+\s*=\s*(?:"[^"]*"|'[^']*')"#).unwrap()
});

static JAVASCRIPT_SCHEME_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)javascript:").unwrap());

static DATA_HTML_SCHEME_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)data:text/html").unwrap());

static DANGEROUS_SCHEME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)javascript:|data:text/html").unwrap());

/// Removes every `<...>` tag, keeping the text between tags.
///
/// # Examples
///
/// ```
/// use seo_guard::sanitize::strip_html_tags;
///
/// assert_eq!(strip_html_tags("<p>Hello <b>world</b></p>"), "Hello world");
/// ```
pub fn strip_html_tags(input: &str) -> String {
    TAG_REGEX.replace_all(input, "").into_owned()
}

/// Removes script blocks, inline event handlers and script-capable schemes
/// from HTML while keeping all other markup.
///
/// Scheme removal drops the scheme name only, so `javascript:alert(1)`
/// becomes `:alert(1)`. Use [`strip_dangerous_schemes`] to remove the whole
/// prefix.
///
/// # Examples
///
/// ```
/// use seo_guard::sanitize::sanitize_html;
///
/// assert_eq!(sanitize_html(r#"<script>alert("xss")</script>Hello"#), "Hello");
/// assert_eq!(
///     sanitize_html(r#"<div onclick="alert(1)">Click me</div>"#),
///     "<div>Click me</div>"
/// );
/// ```
pub fn sanitize_html(input: &str) -> String {
    let without_scripts = SCRIPT_BLOCK_REGEX.replace_all(input, "");
    let without_handlers = EVENT_HANDLER_REGEX.replace_all(&without_scripts, "");
    let without_js = JAVASCRIPT_SCHEME_NAME_REGEX.replace_all(&without_handlers, ":");
    DATA_HTML_SCHEME_NAME_REGEX
        .replace_all(&without_js, ":text/html")
        .into_owned()
}

/// Removes the literal substrings `javascript:` and `data:text/html`,
/// case-insensitively, wherever they occur.
pub fn strip_dangerous_schemes(input: &str) -> String {
    DANGEROUS_SCHEME_REGEX.replace_all(input, "").into_owned()
}

/// Escapes text for embedding in a quoted SQL literal.
///
/// Not a substitute for bound parameters. Each character is escaped once,
/// so backslashes introduced here are never escaped again.
pub fn escape_sql(input: &str) -> String {
    let mut out = String::with_capacity(input.len());

    for ch in input.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            '\x1a' => out.push_str("\\Z"),
            other => out.push(other),
        }
    }

    out
}

/// Removes every `..` sequence, then any leading `/`.
///
/// Does not resolve `.` segments, backslashes or percent-encoded traversal;
/// the result is not guaranteed to stay inside a base directory.
pub fn sanitize_file_path(input: &str) -> String {
    input.replace("..", "").trim_start_matches('/').to_string()
}

/// Checks a request origin against an allow-list.
///
/// An entry matches when it equals the origin. An entry with a `*` matches
/// any origin that starts with the text before the `*` and ends with the
/// text after it, so a trailing `*` is a prefix match. An absent origin
/// never matches.
pub fn validate_request_origin<S: AsRef<str>>(origin: Option<&str>, allowed: &[S]) -> bool {
    let Some(origin) = origin else {
        return false;
    };

    allowed.iter().any(|entry| {
        let entry = entry.as_ref();
        match entry.split_once('*') {
            Some((prefix, suffix)) => {
                origin.len() >= prefix.len() + suffix.len()
                    && origin.starts_with(prefix)
                    && origin.ends_with(suffix)
            }
            None => origin == entry,
        }
    })
}
