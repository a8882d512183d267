//! Values produced by grammar actions.
//!
//! The engine itself never builds tree shape: terminals produce their token
//! text, holes produce their index, repetitions produce lists, and actions
//! turn those into [`Node`]s. A node is the tagged list `[kind, ...fields]`
//! interpreters dispatch on.

use std::fmt;
use std::sync::Arc;

/// An action result: a tagged node, a list, or plain data.
///
/// Lists and nodes are shared, so cloning a value never copies a tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// JSON `null`. Also the value of a matched `EOF`.
    Null,
    Bool(bool),
    Number(f64),
    /// Token text of a matched literal or terminal, or decoded string data.
    String(String),
    /// A hole in the parsed program, by index.
    Hole(usize),
    List(Arc<[Value]>),
    Node(Arc<Node>),
}

/// Tagged list `[kind, ...fields]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub kind: String,
    pub fields: Vec<Value>,
}

impl Node {
    pub fn new<I>(kind: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        Node {
            kind: kind.into(),
            fields: fields.into_iter().collect(),
        }
    }

    #[inline]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Field `i`, not counting the kind tag.
    #[inline]
    pub fn field(&self, i: usize) -> Option<&Value> {
        self.fields.get(i)
    }
}

impl Value {
    /// Shorthand for `Value::from(Node::new(kind, fields))`.
    pub fn node<I>(kind: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        Value::Node(Arc::new(Node::new(kind, fields)))
    }

    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        Value::List(items.into_iter().collect())
    }

    /// Decode the text of a JSON data token.
    ///
    /// Accepts `null`, `true`, `false`, numbers and double-quoted strings.
    /// Returns `None` for anything else, including arrays and objects.
    pub fn from_json_literal(text: &str) -> Option<Value> {
        match serde_json::from_str::<serde_json::Value>(text).ok()? {
            serde_json::Value::Null => Some(Value::Null),
            serde_json::Value::Bool(b) => Some(Value::Bool(b)),
            serde_json::Value::Number(n) => n.as_f64().map(Value::Number),
            serde_json::Value::String(s) => Some(Value::String(s)),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(&**items),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Value::Node(node) => Some(&**node),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_hole(&self) -> Option<usize> {
        match self {
            Value::Hole(i) => Some(*i),
            _ => None,
        }
    }

    /// Consume a list value, returning its items.
    pub fn into_list(self) -> Option<Vec<Value>> {
        match self {
            Value::List(items) => Some(items.to_vec()),
            _ => None,
        }
    }

    /// True for everything that is neither a list nor a node.
    pub fn is_data(&self) -> bool {
        !matches!(self, Value::List(_) | Value::Node(_))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items.into())
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        Value::Node(Arc::new(node))
    }
}

/// Renders in JSON-like notation: nodes as `["kind",field,...]`, holes as
/// `${i}`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => fmt_number(*n, f),
            Value::String(s) => fmt_string(s, f),
            Value::Hole(i) => write!(f, "${{{i}}}"),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Node(node) => write!(f, "{node}"),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        fmt_string(&self.kind, f)?;
        for field in &self.fields {
            write!(f, ",{field}")?;
        }
        f.write_str("]")
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "guarded by the integral and range checks"
)]
fn fmt_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        write!(f, "{}", n as i64)
    } else {
        write!(f, "{n}")
    }
}

fn fmt_string(s: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match serde_json::to_string(s) {
        Ok(quoted) => f.write_str(&quoted),
        Err(_) => write!(f, "{s:?}"),
    }
}
