use crate::attributes::parse_tag;
use crate::classify::is_whitespace;
use crate::error::{ParseError, ROOT_MUST_BE_ELEMENT};
use crate::nest::Nested;
use crate::node::{Child, HtmlNode};
use crate::stream::Token;

/// Turns one nested group into a node. The group must start with an opening
/// tag; the rest become its children, minus whitespace-only text.
pub fn assemble(parts: Vec<Nested>) -> Result<HtmlNode, ParseError> {
    let mut parts = parts.into_iter();
    let mut root = match parts.next() {
        Some(Nested::Token(Token::OpenTag(tag))) => parse_tag(&tag)?,
        first => {
            tracing::debug!(?first, "template root is not an element");
            return Err(ParseError::MalformedRoot { reason: ROOT_MUST_BE_ELEMENT });
        }
    };

    let mut children = Vec::new();
    for part in parts {
        let child = match part {
            Nested::Group(group) => Child::Node(assemble(group)?),
            Nested::Token(Token::OpenTag(tag)) => Child::Node(parse_tag(&tag)?),
            Nested::Token(Token::Value(value)) => Child::Value(value),
            Nested::Token(
                Token::Text(text) | Token::Comment(text) | Token::CloseTag(text),
            ) => {
                if is_whitespace(&text) {
                    continue;
                }
                Child::Text(text)
            }
        };
        children.push(child);
    }

    if !children.is_empty() {
        root.children = Some(children);
    }
    Ok(root)
}
