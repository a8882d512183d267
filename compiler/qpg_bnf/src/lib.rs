//! PEG grammars in BNF notation.
//!
//! A grammar is literal-plus-hole text: productions written in the notation
//! below, with a semantic [`Action`] in each hole. [`Grammar::compile`] turns
//! it into a rule table; [`Grammar::extend`] layers another table over an
//! existing grammar.
//!
//! # Notation
//!
//! | Form | Meaning | Value |
//! |------|---------|-------|
//! | `name ::= a / b ;` | ordered choice, first success wins | the alternative's |
//! | `x y z` | sequence | one factor: its value; otherwise the list |
//! | `x y ${action}` | sequence with an action | `action(values)` |
//! | `"lit"` | token text equal to `lit` | the text |
//! | `NUMBER` `STRING` `IDENT` | token classes | the text |
//! | `HOLE` | a hole in the program | `Value::Hole(i)` |
//! | `EOF` | end of input, consumes nothing | `Null` |
//! | `FAIL` | never matches | |
//! | `x?` `x*` `x+` | optional, zero or more, one or more | list |
//! | `x ** sep` `x ++ sep` | separated lists, zero or one minimum | list, separators dropped |
//! | `( ... )` | grouping | the choice's |
//! | `super.name` | the parent's `name` rule | its value |
//!
//! Literals also feed the program scanner: identifier-shaped ones become
//! reserved words, the rest become operator tokens.
//!
//! # Parsing
//!
//! Failure to match is `None` inside the engine and costs nothing beyond a
//! cursor rewind. Each parse owns a packrat memo keyed by rule and token
//! position, so layered grammars that probe the same production from many
//! places stay linear. A compiled [`Grammar`] is immutable and can be shared
//! across threads; every parse gets its own state.

mod action;
mod compile;
mod error;
mod grammar;
mod meta;
mod stack;
mod state;
mod syntax;

pub use action::Action;
pub use error::{GrammarError, ParseError};
pub use grammar::{Grammar, Parse, Rule};
pub use state::{ParseOptions, ParseStats};
pub use syntax::Terminal;
