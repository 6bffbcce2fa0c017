//! Pure predicates over raw template text.

/// Whitespace as far as tag detection is concerned: a single space, tab or
/// newline (or nothing at all).
pub(crate) fn is_char_whitespace(c: Option<char>) -> bool {
    matches!(c, None | Some(' ' | '\t' | '\n'))
}

/// `true` if `value` is an HTML comment (`<!-- ... -->`).
pub fn is_html_comment(value: &str) -> bool {
    value.starts_with("<!--") && value.ends_with("-->")
}

/// `true` if `value` looks like a real tag: `<`, a non-whitespace character,
/// anything, `>`. Comments are not tags.
///
/// ```
/// use tagtree_parser::is_html_tag;
///
/// assert!(is_html_tag("<random:value>"));
/// assert!(!is_html_tag("< div>"));
/// ```
pub fn is_html_tag(value: &str) -> bool {
    if value.len() < 3 || is_html_comment(value) {
        return false;
    }
    match value.strip_prefix('<') {
        Some(rest) => value.ends_with('>') && !is_char_whitespace(rest.chars().next()),
        None => false,
    }
}

/// `true` for the empty string and for strings made only of whitespace.
pub fn is_whitespace(value: &str) -> bool {
    match value.as_bytes() {
        [] | [b' ' | b'\t' | b'\n'] => true,
        _ => value.chars().all(char::is_whitespace),
    }
}

/// `true` for interpolation placeholders: `$[name]` or `$![name]`.
pub fn is_interpolation_value(value: &str) -> bool {
    (value.starts_with("$[") || value.starts_with("$![")) && value.ends_with(']')
}

/// `true` if `value` is a closing tag (`</name>` or anything starting with `</`).
pub(crate) fn is_closing_tag(value: &str) -> bool {
    value.starts_with("</")
}

/// Name of an opening or closing tag: the run after `<` (or `</`) up to the
/// first whitespace, `/` or `>`. Text that carries no name comes back whole.
pub(crate) fn tag_name(tag: &str) -> &str {
    let Some(rest) = tag.strip_prefix('<') else {
        return tag;
    };
    let rest = rest.strip_prefix('/').unwrap_or(rest);
    let end = rest
        .find(|c: char| c.is_whitespace() || c == '/' || c == '>')
        .unwrap_or(rest.len());
    if end == 0 { tag } else { &rest[..end] }
}

/// Escapes `<`, `>` and `&` so `text` displays as plain text.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            _ => out.push(ch),
        }
    }
    out
}
