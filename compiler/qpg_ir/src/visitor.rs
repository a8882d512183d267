//! Visitor surface over produced trees.
//!
//! # Dispatch
//!
//! [`visit`] sends nodes to [`Visitor::visit_node`], lists to
//! [`Visitor::visit_list`] and everything else to [`Visitor::visit_data`].
//! Implementations match on [`Node::kind`] inside `visit_node` and send
//! unhandled kinds to [`Visitor::visit_ast`], the explicit default arm. Every
//! default raises a [`Panic`]: reaching one means the tree and the visitor
//! disagree about the language, which is a defect rather than bad input.
//!
//! # Example
//!
//! ```text
//! impl Visitor for Interp {
//!     type Output = Json;
//!     fn visit_node(&mut self, node: &Node) -> Result<Json, Panic> {
//!         match node.kind() {
//!             "data" => ...,
//!             "array" => ...,
//!             _ => self.visit_ast(node),
//!         }
//!     }
//! }
//! ```

use crate::{Node, Value};

/// Always-fatal engine or grammar-authoring defect.
///
/// Never produced by ordinary backtracking, and never caught by it.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("panic: {message}")]
pub struct Panic {
    message: String,
}

impl Panic {
    #[cold]
    pub fn new(message: impl Into<String>) -> Self {
        Panic {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Fail with a [`Panic`] carrying `message()` unless `flag` holds.
#[inline]
pub fn ensure(flag: bool, message: impl FnOnce() -> String) -> Result<(), Panic> {
    if flag {
        Ok(())
    } else {
        Err(Panic::new(message()))
    }
}

/// Tree visitor. Override the methods for the shapes you handle.
pub trait Visitor {
    type Output;

    /// Visit a tagged node. Dispatch on `node.kind()` here.
    fn visit_node(&mut self, node: &Node) -> Result<Self::Output, Panic> {
        self.visit_ast(node)
    }

    /// Default arm for node kinds the visitor does not name.
    fn visit_ast(&mut self, node: &Node) -> Result<Self::Output, Panic> {
        Err(Panic::new(format!("unrecognized ast kind {}", node.kind())))
    }

    /// Visit a list that appears where a tree was expected.
    fn visit_list(&mut self, items: &[Value]) -> Result<Self::Output, Panic> {
        Err(Panic::new(format!(
            "ast list of {} items mistaken for ast",
            items.len()
        )))
    }

    /// Visit plain data.
    fn visit_data(&mut self, data: &Value) -> Result<Self::Output, Panic> {
        Err(Panic::new(format!("unrecognized: data {data}")))
    }
}

/// Dispatch `value` to the matching visitor method.
pub fn visit<V>(value: &Value, visitor: &mut V) -> Result<V::Output, Panic>
where
    V: Visitor + ?Sized,
{
    match value {
        Value::Node(node) => visitor.visit_node(node),
        Value::List(items) => visitor.visit_list(items),
        data => visitor.visit_data(data),
    }
}

/// Rebuild a node, visiting each field.
pub fn walk_node<V>(visitor: &mut V, node: &Node) -> Result<Value, Panic>
where
    V: Visitor<Output = Value> + ?Sized,
{
    let fields = node
        .fields
        .iter()
        .map(|field| visit(field, visitor))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Value::node(node.kind.clone(), fields))
}

/// Rebuild a list, visiting each item.
pub fn walk_list<V>(visitor: &mut V, items: &[Value]) -> Result<Value, Panic>
where
    V: Visitor<Output = Value> + ?Sized,
{
    items
        .iter()
        .map(|item| visit(item, visitor))
        .collect::<Result<Vec<_>, _>>()
        .map(Value::list)
}

/// Identity rewrite: rebuilds every node and list, copies data.
///
/// Wrap it, or reuse [`walk_node`] and [`walk_list`], to rewrite only the
/// kinds you care about.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReplaceVisitor;

impl Visitor for ReplaceVisitor {
    type Output = Value;

    fn visit_ast(&mut self, node: &Node) -> Result<Value, Panic> {
        walk_node(self, node)
    }

    fn visit_list(&mut self, items: &[Value]) -> Result<Value, Panic> {
        walk_list(self, items)
    }

    fn visit_data(&mut self, data: &Value) -> Result<Value, Panic> {
        Ok(data.clone())
    }
}

/// Fold `left` and `[[op, right], ...]` into left-associated
/// `[op, left, right]` nodes.
///
/// This is the usual action for `expr ::= term (op term)*`.
pub fn fold_binary(left: Value, rights: Vec<Value>) -> Result<Value, Panic> {
    rights.into_iter().try_fold(left, |prev, pair| {
        let Value::List(pair) = pair else {
            return Err(Panic::new(format!("binary operand pair expected, got {pair}")));
        };
        let [op, right] = &*pair else {
            return Err(Panic::new(format!("binary pair of {} items", pair.len())));
        };
        let Value::String(op) = op else {
            return Err(Panic::new(format!("binary operator expected, got {op}")));
        };
        Ok(Value::node(op.clone(), [prev, right.clone()]))
    })
}
