//! Shared data types for the qpg grammar engine.
//!
//! This crate holds the types every other qpg crate agrees on:
//!
//! - [`Template`]: literal text interleaved with numbered holes. Grammar text
//!   and program text both use it.
//! - [`Value`] and [`Node`]: the values produced by grammar actions. A node is
//!   a tagged list `[kind, ...fields]`; everything else is plain data.
//! - [`Visitor`], [`visit`], [`ReplaceVisitor`] and [`fold_binary`]: the
//!   surface interpreters use to walk produced trees.
//! - [`Panic`]: the always-fatal error for malformed trees and engine defects.

mod template;
mod value;
mod visitor;

pub use template::{Template, HOLE_MARKER};
pub use value::{Node, Value};
pub use visitor::{
    ensure, fold_binary, visit, walk_list, walk_node, Panic, ReplaceVisitor, Visitor,
};
