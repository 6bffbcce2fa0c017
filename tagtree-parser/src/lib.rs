//! Tagged-template parser.
//!
//! Turns literal fragments and the values interpolated between them into a
//! tree of [`HtmlNode`]s without building any DOM. Parsing runs in three
//! passes: [`convert`] produces a flat token list, [`nest`] rebuilds element
//! nesting by scanning that list backwards, and [`assemble`] turns the nested
//! groups into nodes.
//!
//! ```
//! use tagtree_parser::{Child, parse_node_tree};
//!
//! let root = parse_node_tree(&["<p class=\"lead\">", "</p>"], vec!["Bill Evans".into()]).unwrap();
//! assert_eq!(root.name, "p");
//! assert_eq!(root.children(), &[Child::Text("Bill Evans".into())]);
//! ```

mod assemble;
mod attributes;
mod classify;
mod error;
mod nest;
mod node;
mod stream;
mod value;

pub use assemble::assemble;
pub use attributes::parse_tag;
pub use classify::{escape_html, is_html_comment, is_html_tag, is_interpolation_value, is_whitespace};
pub use error::ParseError;
pub use nest::{Nested, nest};
pub use node::{AttributeMap, Child, HtmlNode};
pub use stream::{Token, convert};
pub use value::{Classified, Function, Symbol, TypedValue, Value, ValueKind, classify_value};

/// Literal fragments and the values interpolated between them.
#[derive(Debug, Clone, PartialEq)]
pub struct Template<'a> {
    literals: Vec<&'a str>,
    values: Vec<Value>,
}

impl<'a> Template<'a> {
    /// Fails unless there is exactly one more literal than there are values.
    pub fn new(literals: Vec<&'a str>, values: Vec<Value>) -> Result<Self, ParseError> {
        check_arity(literals.len(), values.len())?;
        Ok(Self { literals, values })
    }

    #[doc(hidden)]
    pub fn from_parts_unchecked(literals: Vec<&'a str>, values: Vec<Value>) -> Self {
        Self { literals, values }
    }

    pub fn literals(&self) -> &[&'a str] {
        &self.literals
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn into_parts(self) -> (Vec<&'a str>, Vec<Value>) {
        (self.literals, self.values)
    }
}

/// Builds a [`Template`] from alternating literals and `{expr}` values.
///
/// ```
/// use tagtree_parser::{Parser, template};
///
/// let count = 42;
/// let root = Parser::new().parse_template(template!("<div>" {count} "</div>")).unwrap();
/// assert_eq!(root.children().len(), 1);
/// ```
#[macro_export]
macro_rules! template {
    ($first:literal $( { $value:expr } $rest:literal )*) => {
        $crate::Template::from_parts_unchecked(
            vec![$first $(, $rest)*],
            vec![$($crate::Value::from($value)),*],
        )
    };
}

fn check_arity(literals: usize, values: usize) -> Result<(), ParseError> {
    if literals != values + 1 {
        return Err(ParseError::FragmentCount { literals, values });
    }
    Ok(())
}

fn identity(node: HtmlNode) -> HtmlNode {
    node
}

/// Template parser with an optional transform applied to the finished tree.
#[derive(Debug, Clone, Copy)]
pub struct Parser<F = fn(HtmlNode) -> HtmlNode> {
    transform: F,
}

impl Parser {
    pub fn new() -> Self {
        Self { transform: identity }
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl<F, T> Parser<F>
where
    F: Fn(HtmlNode) -> T,
{
    /// The parser hands each finished root to `transform` and returns what it
    /// produces.
    pub fn with_transform(transform: F) -> Self {
        Self { transform }
    }

    pub fn parse(&self, literals: &[&str], values: Vec<Value>) -> Result<T, ParseError> {
        check_arity(literals.len(), values.len())?;
        tracing::debug!(literals = literals.len(), values = values.len(), "parsing template");

        let tokens = convert(literals, values);
        tracing::debug!(tokens = tokens.len(), "converted template");
        let root = assemble(nest(tokens)?)?;

        Ok((self.transform)(root))
    }

    pub fn parse_template(&self, template: Template<'_>) -> Result<T, ParseError> {
        let (literals, values) = template.into_parts();
        self.parse(&literals, values)
    }
}

/// Parses a template into its root node.
pub fn parse_node_tree(literals: &[&str], values: Vec<Value>) -> Result<HtmlNode, ParseError> {
    Parser::new().parse(literals, values)
}
