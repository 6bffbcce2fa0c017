use std::collections::VecDeque;

use crate::classify::tag_name;
use crate::error::{MUST_END_WITH_CLOSING_TAG, ParseError};
use crate::stream::Token;

/// A token, or a run of tokens that belongs to one element. The first item of
/// a group is the element's opening tag.
#[derive(Debug, Clone, PartialEq)]
pub enum Nested {
    Token(Token),
    Group(Vec<Nested>),
}

/// Rebuilds element nesting from the flat token list.
///
/// Tokens are walked from last to first. Each closing tag opens a new level
/// that is folded into its parent once the opening tag with the same name is
/// reached. An opening tag that no closing tag is waiting for is taken to be
/// void and stays a leaf; comments and text never close anything.
pub fn nest(mut tokens: Vec<Token>) -> Result<Vec<Nested>, ParseError> {
    let mut current: VecDeque<Nested> = VecDeque::new();
    let mut closing: Option<String> = None;
    // Enclosing levels with the closing tag name each one is waiting for.
    let mut parents: Vec<(VecDeque<Nested>, Option<String>)> = Vec::new();

    if tokens.len() > 1 {
        match tokens.pop() {
            Some(Token::CloseTag(tag)) => closing = Some(tag_name(&tag).to_string()),
            last => {
                tracing::debug!(?last, "template does not end with a closing tag");
                return Err(ParseError::MalformedRoot { reason: MUST_END_WITH_CLOSING_TAG });
            }
        }
    }

    while let Some(token) = tokens.pop() {
        match token {
            Token::CloseTag(tag) => {
                let name = tag_name(&tag).to_string();
                tracing::trace!(depth = parents.len() + 1, tag = %name, "open level");
                let enclosing = std::mem::take(&mut current);
                parents.push((enclosing, closing.replace(name)));
            }
            Token::OpenTag(tag) if closing.as_deref() == Some(tag_name(&tag)) => {
                current.push_front(Nested::Token(Token::OpenTag(tag)));
                if let Some((mut parent, parent_closing)) = parents.pop() {
                    tracing::trace!(depth = parents.len(), "close level");
                    parent.push_front(Nested::Group(std::mem::take(&mut current).into()));
                    current = parent;
                    closing = parent_closing;
                }
            }
            other => current.push_front(Nested::Token(other)),
        }
    }

    // Levels still open belong to closing tags that never found their opener;
    // only the outermost level is returned.
    let root = if parents.is_empty() { current } else { parents.swap_remove(0).0 };
    Ok(root.into())
}
