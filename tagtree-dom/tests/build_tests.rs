use std::cell::Cell;
use std::rc::Rc;

use tagtree_dom::{
    BuildError, EventContext, HandlerMap, Mapped, Props, VNode, VdomParser, dispatch, h, text,
};
use tagtree_parser::{ParseError, TypedValue, Value, ValueKind, template};

fn widget() -> HandlerMap {
    let mut handlers = HandlerMap::new();
    handlers.on("eventCallback", || {});
    handlers
}

fn listener(ctx: &HandlerMap) -> tagtree_dom::Listener {
    ctx.listener("eventCallback").expect("handler registered")
}

#[test]
fn single_node_without_attributes() {
    let ctx = widget();
    let result = VdomParser::new(&ctx).parse(&["<div></div>"], vec![]).unwrap();
    assert_eq!(result, h("div", Props::new(), vec![]));
}

#[test]
fn classes_fold_into_the_selector() {
    let ctx = widget();
    let result = VdomParser::new(&ctx)
        .parse(&[r#"<input class="class1 class2" disabled>"#], vec![])
        .unwrap();
    assert_eq!(result, h("input.class1.class2", Props::new().set("disabled", "disabled"), vec![]));
}

#[test]
fn interpolated_attribute_values() {
    let ctx = widget();
    let parser = VdomParser::with_mapper(&ctx, |_: &TypedValue| Mapped::from("random input value"));
    for src in [r#"<input value="$[value]">"#, r#"<input value="$![value]">"#] {
        let result = parser.parse(&[src], vec![]).unwrap();
        assert_eq!(result, h("input", Props::new().set("value", "random input value"), vec![]));
    }
}

#[test]
fn event_listeners_bind_to_the_context() {
    let ctx = widget();
    let result = VdomParser::new(&ctx)
        .parse(&[r#"<button onclick="eventCallback">"#], vec![])
        .unwrap();
    assert_eq!(result, h("button", Props::new().listen("onclick", listener(&ctx)), vec![]));
}

#[test]
fn children() {
    let ctx = widget();
    let result = VdomParser::new(&ctx)
        .parse(
            &[r#"<div class="class1 class2">
                <p>Child node with text.</p>
                <a onmouseover="eventCallback">Child node with event handler.</a>
            </div>"#],
            vec![],
        )
        .unwrap();
    assert_eq!(
        result,
        h(
            "div.class1.class2",
            Props::new(),
            vec![
                h("p", Props::new(), vec![text("Child node with text.")]),
                h(
                    "a",
                    Props::new().listen("onmouseover", listener(&ctx)),
                    vec![text("Child node with event handler.")]
                ),
            ]
        )
    );
}

#[test]
fn interpolated_children() {
    let ctx = widget();
    let parser = VdomParser::with_mapper(&ctx, |_: &TypedValue| Mapped::from("random text"));
    for src in ["<div>$[value]</div>", "<div>$![value]</div>"] {
        let result = parser.parse(&[src], vec![]).unwrap();
        assert_eq!(result, h("div", Props::new(), vec![text("random text")]));
    }
}

#[test]
fn default_mapper_renders_text() {
    let ctx = widget();
    let parser = VdomParser::new(&ctx);

    let result = parser
        .parse_template(template!("<div>" {vec![Value::from(1), Value::from(2)]} "</div>"))
        .unwrap();
    assert_eq!(result, h("div", Props::new(), vec![text("1,2")]));

    let missing: Option<&str> = None;
    let result = parser.parse_template(template!("<div>" {missing} "</div>")).unwrap();
    assert_eq!(result, h("div", Props::new(), vec![text("")]));
}

#[test]
fn custom_mapper_sees_typed_values() {
    let ctx = widget();
    let seen = Rc::new(Cell::new(None));
    let parser = VdomParser::with_mapper(&ctx, {
        let seen = seen.clone();
        move |value: &TypedValue| {
            seen.set(Some(value.kind()));
            Mapped::from(h("em", Props::new(), vec![text("mapped")]))
        }
    });

    let result = parser.parse(&["<div>", "</div>"], vec![Value::Array(Vec::new())]).unwrap();
    assert_eq!(
        result,
        h("div", Props::new(), vec![h("em", Props::new(), vec![text("mapped")])])
    );
    assert_eq!(seen.get(), Some(ValueKind::Array));
}

#[test]
fn element_in_attribute_is_rejected() {
    let ctx = widget();
    let parser = VdomParser::with_mapper(&ctx, |_: &TypedValue| {
        Mapped::from(h("span", Props::new(), vec![]))
    });
    let err = parser.parse(&[r#"<input value="$[value]">"#], vec![]).unwrap_err();
    assert_eq!(err, BuildError::ElementInAttribute { attribute: "value".into() });
}

#[test]
fn unbound_event_handler() {
    let ctx = widget();
    let err = VdomParser::new(&ctx)
        .parse(&[r#"<button onclick="missing">"#], vec![])
        .unwrap_err();
    assert_eq!(err, BuildError::UnboundEventHandler { name: "missing".into() });
    assert_eq!(err.to_string(), r#"no handler named "missing" exists on the context"#);
}

#[test]
fn parse_errors_surface() {
    let ctx = widget();
    let err = VdomParser::new(&ctx).parse(&["", ""], vec![Value::from("text")]).unwrap_err();
    assert!(matches!(err, BuildError::Parse(ParseError::MalformedRoot { .. })));
}

#[test]
fn dispatch_invokes_bound_listeners() {
    let count = Rc::new(Cell::new(0));
    let mut ctx = HandlerMap::new();
    {
        let count = count.clone();
        ctx.on("inc", move || count.set(count.get() + 1));
    }

    let tree = VdomParser::new(&ctx)
        .parse(&[r#"<div><button onclick="inc">+1</button><button onclick="inc"></button></div>"#], vec![])
        .unwrap();

    assert_eq!(dispatch("click", &tree), 2);
    assert_eq!(count.get(), 2);
    assert_eq!(dispatch("mouseover", &tree), 0);
}

#[test]
fn interpolated_text_cannot_bind_handlers() {
    let count = Rc::new(Cell::new(0));
    let mut ctx = HandlerMap::new();
    {
        let count = count.clone();
        ctx.on("steal", move || count.set(count.get() + 1));
    }

    let tree = VdomParser::new(&ctx)
        .parse(&[r#"<button title=""#, r#"">go</button>"#], vec![r#"x" onclick="steal"#.into()])
        .unwrap();

    assert_eq!(
        tree,
        h("button", Props::new().set("title", r#"x" onclick="steal"#), vec![text("go")])
    );
    assert_eq!(dispatch("click", &tree), 0);
    assert_eq!(count.get(), 0);
}

#[test]
fn text_nodes_are_plain() {
    let ctx = widget();
    let result = VdomParser::new(&ctx).parse(&["<p>hi <!-- note --></p>"], vec![]).unwrap();
    let VNode::Element { children, .. } = result else {
        panic!("expected element");
    };
    assert_eq!(children, vec![text("hi"), text("<!-- note -->")]);
}
