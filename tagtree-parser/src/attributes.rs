use crate::error::ParseError;
use crate::node::{AttributeMap, HtmlNode};

/// Splits an opening tag into its name and attributes.
///
/// Boolean attributes map to `None`; quoted values lose their surrounding
/// quotes and may contain spaces, `=` and escaped quotes.
///
/// ```
/// use tagtree_parser::parse_tag;
///
/// let node = parse_tag(r#"<input value="2 + 2 = 4" disabled>"#).unwrap();
/// assert_eq!(node.name, "input");
/// let attrs = node.attributes.unwrap();
/// assert_eq!(attrs["value"].as_deref(), Some("2 + 2 = 4"));
/// assert_eq!(attrs["disabled"], None);
/// ```
pub fn parse_tag(html: &str) -> Result<HtmlNode, ParseError> {
    if html.len() < 2 {
        return Err(ParseError::MissingAttributeValue);
    }
    let end = if html.ends_with("/>") { html.len() - 2 } else { html.len() - 1 };
    let stripped = html.get(1..end.max(1)).unwrap_or("");
    let fragments = split_fragments(&collapse_whitespace(stripped));

    let mut fragments = fragments.into_iter();
    let name = fragments.next().ok_or(ParseError::MissingAttributeValue)?;
    let rest: Vec<String> = fragments.collect();
    if rest.is_empty() {
        return Ok(HtmlNode::new(name));
    }

    let mut attributes = AttributeMap::new();
    for fragment in rest.iter().rev() {
        let parts: Vec<&str> = fragment.split('=').collect();
        let value = attribute_value(&parts)?;
        let name = parts[0];
        if attributes.contains_key(name) {
            tracing::debug!(attribute = name, "duplicate attribute in {html:?}");
            return Err(ParseError::DuplicateAttribute { name: name.to_string() });
        }
        attributes.insert(name.to_string(), value);
    }

    Ok(HtmlNode { name, attributes: Some(attributes), children: None })
}

/// Value part of a split `name=value` fragment. A lone name is a boolean
/// attribute; values holding `=` are joined back together.
fn attribute_value(parts: &[&str]) -> Result<Option<String>, ParseError> {
    match parts {
        [] => Err(ParseError::MissingAttributeValue),
        [_] => Ok(None),
        [_, value @ ..] => {
            let value = value.join("=");
            if !value.starts_with('"') {
                return Ok(Some(value));
            }
            let mut inner = value[1..].chars();
            inner.next_back();
            Ok(Some(unescape(inner.as_str())))
        }
    }
}

/// Resolves `\"` and `\\` inside a quoted value; other backslashes stay.
fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some(next @ ('"' | '\\')) => out.push(next),
            Some(next) => {
                out.push('\\');
                out.push(next);
            }
            None => out.push('\\'),
        }
    }
    out
}

fn collapse_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_run = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !in_run {
                out.push(' ');
            }
            in_run = true;
        } else {
            out.push(ch);
            in_run = false;
        }
    }
    out
}

/// Splits on spaces that sit outside a quoted value; empty pieces vanish.
fn split_fragments(reduced: &str) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut current = String::new();
    let mut in_value = false;
    let mut escaped = false;

    for ch in reduced.chars() {
        if ch == ' ' && !in_value {
            if !current.is_empty() {
                fragments.push(std::mem::take(&mut current));
            }
        } else {
            match ch {
                '\\' if in_value && !escaped => {
                    escaped = true;
                    current.push(ch);
                    continue;
                }
                '"' if !escaped => in_value = !in_value,
                _ => {}
            }
            current.push(ch);
        }
        escaped = false;
    }
    if !current.is_empty() {
        fragments.push(current);
    }
    fragments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(collapse_whitespace("div\n\t\tclass=\"a\"  id"), "div class=\"a\" id");
    }

    #[test]
    fn fragments_respect_quotes() {
        assert_eq!(
            split_fragments(r#"input value="a b" disabled"#),
            vec!["input", r#"value="a b""#, "disabled"]
        );
        assert_eq!(split_fragments("input "), vec!["input"]);
    }

    #[test]
    fn escaped_quotes_stay_in_one_fragment() {
        assert_eq!(
            split_fragments(r#"a title="say \"hi\" > now" id"#),
            vec!["a", r#"title="say \"hi\" > now""#, "id"]
        );
        assert_eq!(
            split_fragments(r#"a title="ends in \\" id"#),
            vec!["a", r#"title="ends in \\""#, "id"]
        );
    }

    #[test]
    fn unescapes_quotes_and_backslashes() {
        assert_eq!(unescape(r#"say \"hi\""#), r#"say "hi""#);
        assert_eq!(unescape(r#"C:\\dir\n"#), r#"C:\dir\n"#);
        assert_eq!(unescape("trailing \\"), "trailing \\");
    }

    #[test]
    fn values() {
        assert_eq!(attribute_value(&["disabled"]), Ok(None));
        assert_eq!(attribute_value(&["value", "\"2 + 2 ", " 4\""]), Ok(Some("2 + 2 = 4".into())));
        assert_eq!(attribute_value(&["id", "plain"]), Ok(Some("plain".into())));
        assert_eq!(attribute_value(&["x", "\""]), Ok(Some(String::new())));
        assert_eq!(attribute_value(&[]), Err(ParseError::MissingAttributeValue));
    }
}
