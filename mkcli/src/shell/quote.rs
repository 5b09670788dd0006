//! Quoting helpers for text embedded in generated shell code.
//!
//! Handles:
//! - bash and zsh single-quoted words: `'` -> `'\''`
//! - zsh `_arguments` descriptions, where `[` and `]` delimit the text
//! - double-quoted `die` messages, where `"`, `$`, `` ` `` and `\` are live

/// Quotes `text` as a single shell word.
///
/// # Examples
///
/// ```
/// use mkcli::shell::quote::single;
///
/// assert_eq!(single("plain"), "'plain'");
/// assert_eq!(single("it's"), "'it'\\''s'");
/// assert_eq!(single(""), "''");
/// ```
#[must_use]
pub fn single(text: &str) -> String {
    format!("'{}'", text.replace('\'', r"'\''"))
}

/// Escapes the contents of a double-quoted shell string.
///
/// # Examples
///
/// ```
/// use mkcli::shell::quote::double_inner;
///
/// assert_eq!(double_inner("a \"b\" $c"), "a \\\"b\\\" \\$c");
/// ```
#[must_use]
pub fn double_inner(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '"' | '$' | '`' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Formats a zsh `_arguments` description as a single-quoted `[...]` word.
///
/// # Examples
///
/// ```
/// use mkcli::shell::quote::zsh_description;
///
/// assert_eq!(zsh_description("Output file"), "'[Output file]'");
/// assert_eq!(zsh_description("list [a]"), "'[list \\[a\\]]'");
/// ```
#[must_use]
pub fn zsh_description(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    escaped.push('[');
    for ch in text.chars() {
        match ch {
            '[' | ']' => {
                escaped.push('\\');
                escaped.push(ch);
            }
            _ => escaped.push(ch),
        }
    }
    escaped.push(']');
    single(&escaped)
}
