use tagtree_parser::{
    Child, HtmlNode, ParseError, Parser, Template, TypedValue, Value, is_interpolation_value,
};

use crate::events::EventContext;
use crate::{Props, VNode, h, text};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("no handler named \"{name}\" exists on the context")]
    UnboundEventHandler { name: String },

    #[error("the \"{attribute}\" attribute cannot hold an element")]
    ElementInAttribute { attribute: String },
}

/// What an interpolation mapper produces for a typed value.
#[derive(Debug, Clone, PartialEq)]
pub enum Mapped {
    Text(String),
    Node(VNode),
}

impl Mapped {
    fn into_vnode(self) -> VNode {
        match self {
            Mapped::Text(t) => text(t),
            Mapped::Node(node) => node,
        }
    }

    fn into_attribute(self, attribute: &str) -> Result<String, BuildError> {
        match self {
            Mapped::Text(t) | Mapped::Node(VNode::Text(t)) => Ok(t),
            Mapped::Node(VNode::Element { .. }) => {
                Err(BuildError::ElementInAttribute { attribute: attribute.to_string() })
            }
        }
    }
}

impl From<String> for Mapped {
    fn from(t: String) -> Self {
        Mapped::Text(t)
    }
}
impl From<&str> for Mapped {
    fn from(t: &str) -> Self {
        Mapped::Text(t.to_string())
    }
}
impl From<VNode> for Mapped {
    fn from(node: VNode) -> Self {
        Mapped::Node(node)
    }
}

/// Renders the value's text form; undefined renders as nothing.
pub fn default_mapper(value: &TypedValue) -> Mapped {
    match value.value() {
        Value::Undefined => Mapped::Text(String::new()),
        other => Mapped::Text(other.to_text()),
    }
}

/// Builds the virtual node for `node` and everything below it.
///
/// Classes fold into the tag selector, `on*` attributes bind to handlers on
/// `context`, and interpolation placeholders and typed values are resolved
/// through `mapper`.
pub fn build_vnode<C, M>(node: &HtmlNode, context: &C, mapper: &M) -> Result<VNode, BuildError>
where
    C: EventContext + ?Sized,
    M: Fn(&TypedValue) -> Mapped,
{
    let selector = match node.attribute("class") {
        Some(Some(class)) if !class.is_empty() => {
            format!("{}.{}", node.name, class.replace(char::is_whitespace, "."))
        }
        _ => node.name.clone(),
    };

    let props = build_props(node, context, mapper)?;
    let children = node
        .children()
        .iter()
        .map(|child| build_child(child, context, mapper))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(h(selector, props, children))
}

fn build_props<C, M>(node: &HtmlNode, context: &C, mapper: &M) -> Result<Props, BuildError>
where
    C: EventContext + ?Sized,
    M: Fn(&TypedValue) -> Mapped,
{
    let mut props = Props::new();
    let Some(attributes) = &node.attributes else {
        return Ok(props);
    };

    for (key, value) in attributes {
        if key.starts_with("on") {
            let name = value.as_deref().unwrap_or_default();
            let Some(listener) = context.listener(name) else {
                tracing::debug!(attribute = %key, handler = name, "unbound event handler");
                return Err(BuildError::UnboundEventHandler { name: name.to_string() });
            };
            props.listeners.insert(key.clone(), listener);
        } else if let Some(raw) = value.as_deref().filter(|v| is_interpolation_value(v)) {
            let mapped = mapper(&TypedValue::Interpolation(raw.to_string()));
            props.attrs.insert(key.clone(), mapped.into_attribute(key)?);
        } else if key != "class" {
            // Boolean attributes carry their own name.
            let value = value.clone().unwrap_or_else(|| key.clone());
            props.attrs.insert(key.clone(), value);
        }
    }
    Ok(props)
}

fn build_child<C, M>(child: &Child, context: &C, mapper: &M) -> Result<VNode, BuildError>
where
    C: EventContext + ?Sized,
    M: Fn(&TypedValue) -> Mapped,
{
    Ok(match child {
        Child::Text(t) if is_interpolation_value(t) => {
            mapper(&TypedValue::Interpolation(t.clone())).into_vnode()
        }
        Child::Text(t) => text(t.as_str()),
        Child::Value(value) => mapper(value).into_vnode(),
        Child::Node(node) => build_vnode(node, context, mapper)?,
    })
}

/// Parses templates straight into virtual nodes bound to `context`.
pub struct VdomParser<'c, C: ?Sized, M = fn(&TypedValue) -> Mapped> {
    context: &'c C,
    mapper: M,
}

impl<'c, C: EventContext + ?Sized> VdomParser<'c, C> {
    pub fn new(context: &'c C) -> Self {
        Self { context, mapper: default_mapper }
    }
}

impl<'c, C, M> VdomParser<'c, C, M>
where
    C: EventContext + ?Sized,
    M: Fn(&TypedValue) -> Mapped,
{
    pub fn with_mapper(context: &'c C, mapper: M) -> Self {
        Self { context, mapper }
    }

    pub fn parse(&self, literals: &[&str], values: Vec<Value>) -> Result<VNode, BuildError> {
        let parser =
            Parser::with_transform(|root: HtmlNode| build_vnode(&root, self.context, &self.mapper));
        parser.parse(literals, values)?
    }

    pub fn parse_template(&self, template: Template<'_>) -> Result<VNode, BuildError> {
        let (literals, values) = template.into_parts();
        self.parse(&literals, values)
    }
}
