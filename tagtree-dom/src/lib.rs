//! Virtual nodes and the builder that turns parsed templates into them.

use std::collections::HashMap;

pub mod builder;
pub mod events;

pub use builder::{BuildError, Mapped, VdomParser, build_vnode, default_mapper};
pub use events::{EventContext, HandlerMap, Listener, dispatch};

#[derive(Debug, Clone, PartialEq)]
pub enum VNode {
    Element {
        tag: String,
        props: Props,
        children: Vec<VNode>,
    },
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Props {
    pub attrs: HashMap<String, String>,
    /// Event attributes (`onclick`, ...) bound to their handlers.
    pub listeners: HashMap<String, Listener>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, k: impl Into<String>, v: impl Into<String>) -> Self {
        self.attrs.insert(k.into(), v.into());
        self
    }

    pub fn listen(mut self, k: impl Into<String>, listener: Listener) -> Self {
        self.listeners.insert(k.into(), listener);
        self
    }
}

/// `tag` may carry classes as a dotted selector (`div.card.card--wide`).
pub fn h(tag: impl Into<String>, props: Props, children: Vec<VNode>) -> VNode {
    VNode::Element {
        tag: tag.into(),
        props,
        children,
    }
}

pub fn text(t: impl Into<String>) -> VNode {
    VNode::Text(t.into())
}
