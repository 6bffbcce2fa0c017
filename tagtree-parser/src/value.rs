use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::classify::is_interpolation_value;

/// A dynamic value embedded in a template.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Number(f64),
    Symbol(Symbol),
    Array(Vec<Value>),
    Function(Function),
    Object(BTreeMap<String, Value>),
    Undefined,
}

impl Value {
    /// Renders the value the way a script engine converts it to a string.
    pub fn to_text(&self) -> String {
        match self {
            Value::Str(s) => s.clone(),
            Value::Number(n) => number_to_text(*n),
            Value::Symbol(sym) => sym.to_string(),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::Undefined => String::new(),
                    other => other.to_text(),
                })
                .collect::<Vec<_>>()
                .join(","),
            Value::Function(_) => "[function]".to_string(),
            Value::Object(_) => "[object Object]".to_string(),
            Value::Undefined => "undefined".to_string(),
        }
    }
}

fn number_to_text(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let sign = if n < 0.0 { "-" } else { "" };
        format!("{sign}Infinity")
    } else if n == 0.0 {
        // covers -0.0
        "0".to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        let formatted = format!("{n:e}");
        match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => formatted,
        }
    } else {
        n.to_string()
    }
}

/// A symbol-like value; only its description survives into the tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Symbol {
    description: Option<String>,
}

impl Symbol {
    pub fn new(description: impl Into<String>) -> Self {
        Self { description: Some(description.into()) }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description.as_deref().unwrap_or(""))
    }
}

/// A callable value. Two functions are equal only if they are the same
/// allocation.
#[derive(Clone)]
pub struct Function(Rc<dyn Fn(&[Value]) -> Value>);

impl Function {
    pub fn new(f: impl Fn(&[Value]) -> Value + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, args: &[Value]) -> Value {
        (self.0)(args)
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Function({:p})", Rc::as_ptr(&self.0))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}
impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}
impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}
impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n.into())
    }
}
impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(n.into())
    }
}
impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}
impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(n as f64)
    }
}
impl From<Symbol> for Value {
    fn from(sym: Symbol) -> Self {
        Value::Symbol(sym)
    }
}
impl From<Function> for Value {
    fn from(f: Function) -> Self {
        Value::Function(f)
    }
}
impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}
impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Value::Object(map)
    }
}
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Undefined, Into::into)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Object,
    Array,
    Function,
    Interpolation,
    Undefined,
}

/// An interpolated value that a renderer has to resolve itself.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    Object(BTreeMap<String, Value>),
    Array(Vec<Value>),
    Function(Function),
    Undefined,
    /// A `$[name]` / `$![name]` placeholder, kept verbatim.
    Interpolation(String),
}

impl TypedValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            TypedValue::Object(_) => ValueKind::Object,
            TypedValue::Array(_) => ValueKind::Array,
            TypedValue::Function(_) => ValueKind::Function,
            TypedValue::Undefined => ValueKind::Undefined,
            TypedValue::Interpolation(_) => ValueKind::Interpolation,
        }
    }

    /// The value as it was interpolated.
    pub fn value(&self) -> Value {
        match self {
            TypedValue::Object(map) => Value::Object(map.clone()),
            TypedValue::Array(items) => Value::Array(items.clone()),
            TypedValue::Function(f) => Value::Function(f.clone()),
            TypedValue::Undefined => Value::Undefined,
            TypedValue::Interpolation(raw) => Value::Str(raw.clone()),
        }
    }
}

/// Result of classifying one interpolated value.
#[derive(Debug, Clone, PartialEq)]
pub enum Classified {
    Text(String),
    Typed(TypedValue),
}

/// Strings, numbers and symbols become text; everything else is wrapped in
/// a [`TypedValue`] marker.
pub fn classify_value(value: Value) -> Classified {
    match value {
        Value::Str(s) if is_interpolation_value(&s) => {
            Classified::Typed(TypedValue::Interpolation(s))
        }
        Value::Str(s) => Classified::Text(s),
        Value::Number(_) | Value::Symbol(_) => Classified::Text(value.to_text()),
        Value::Array(items) => Classified::Typed(TypedValue::Array(items)),
        Value::Function(f) => Classified::Typed(TypedValue::Function(f)),
        Value::Undefined => Classified::Typed(TypedValue::Undefined),
        Value::Object(map) => Classified::Typed(TypedValue::Object(map)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_render_like_a_script_engine() {
        assert_eq!(number_to_text(42.0), "42");
        assert_eq!(number_to_text(1.5), "1.5");
        assert_eq!(number_to_text(-0.0), "0");
        assert_eq!(number_to_text(f64::NAN), "NaN");
        assert_eq!(number_to_text(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn large_and_tiny_numbers_use_exponents() {
        assert_eq!(number_to_text(1e20), "100000000000000000000");
        assert_eq!(number_to_text(1e21), "1e+21");
        assert_eq!(number_to_text(-2.5e30), "-2.5e+30");
        assert_eq!(number_to_text(0.000001), "0.000001");
        assert_eq!(number_to_text(1e-7), "1e-7");
        assert_eq!(number_to_text(1.5e-7), "1.5e-7");
    }
}
