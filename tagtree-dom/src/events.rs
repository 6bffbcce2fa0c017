use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::VNode;

/// A handler bound to its owner. Listeners are equal only if they share the
/// same closure.
#[derive(Clone)]
pub struct Listener(Rc<dyn Fn()>);

impl Listener {
    pub fn new(f: impl Fn() + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self) {
        (self.0)()
    }
}

impl PartialEq for Listener {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Listener({:p})", Rc::as_ptr(&self.0))
    }
}

/// Whatever owns the event handlers a template refers to by name.
pub trait EventContext {
    fn listener(&self, name: &str) -> Option<Listener>;
}

/// Handlers registered by name.
#[derive(Default)]
pub struct HandlerMap {
    handlers: HashMap<String, Listener>,
}

impl HandlerMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on<F: Fn() + 'static>(&mut self, name: impl Into<String>, f: F) -> &mut Self {
        self.handlers.insert(name.into(), Listener::new(f));
        self
    }
}

impl EventContext for HandlerMap {
    fn listener(&self, name: &str) -> Option<Listener> {
        self.handlers.get(name).cloned()
    }
}

/// Invokes every listener bound to `on<event>` in the tree and returns how
/// many ran.
pub fn dispatch(event: &str, root: &VNode) -> usize {
    fn walk(node: &VNode, key: &str, out: &mut Vec<Listener>) {
        if let VNode::Element { props, children, .. } = node {
            if let Some(listener) = props.listeners.get(key) {
                out.push(listener.clone());
            }
            for c in children {
                walk(c, key, out);
            }
        }
    }

    let key = format!("on{event}");
    let mut targets = Vec::new();
    walk(root, &key, &mut targets);
    for listener in &targets {
        listener.call();
    }
    targets.len()
}
