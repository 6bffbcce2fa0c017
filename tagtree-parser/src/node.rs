use std::collections::BTreeMap;

use crate::value::TypedValue;

/// Attribute name to value; `None` marks a boolean attribute (`disabled`).
pub type AttributeMap = BTreeMap<String, Option<String>>;

/// One element of the parsed tree.
///
/// `attributes` is `None` when the tag had no attributes and `children` is
/// `None` when nothing was kept inside the element, so "no children" and
/// "empty children" never both occur.
#[derive(Debug, Clone, PartialEq)]
pub struct HtmlNode {
    pub name: String,
    pub attributes: Option<AttributeMap>,
    pub children: Option<Vec<Child>>,
}

impl HtmlNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), attributes: None, children: None }
    }

    pub fn attribute(&self, name: &str) -> Option<&Option<String>> {
        self.attributes.as_ref()?.get(name)
    }

    pub fn children(&self) -> &[Child] {
        self.children.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    Node(HtmlNode),
    /// Text or an HTML comment, verbatim.
    Text(String),
    Value(TypedValue),
}

impl Child {
    pub fn as_node(&self) -> Option<&HtmlNode> {
        match self {
            Child::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Child::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<HtmlNode> for Child {
    fn from(node: HtmlNode) -> Self {
        Child::Node(node)
    }
}
impl From<&str> for Child {
    fn from(text: &str) -> Self {
        Child::Text(text.to_string())
    }
}
impl From<String> for Child {
    fn from(text: String) -> Self {
        Child::Text(text)
    }
}
impl From<TypedValue> for Child {
    fn from(value: TypedValue) -> Self {
        Child::Value(value)
    }
}
