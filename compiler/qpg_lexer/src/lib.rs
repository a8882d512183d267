//! Scanner and token cursor for literal-plus-hole text.
//!
//! [`Scanner::scan`] turns a [`Template`](qpg_ir::Template) into one flat
//! [`TokenList`]: the tokens of every literal segment, with exactly one
//! [`Entry::Hole`] between the tokens of consecutive segments. Whitespace and
//! `#` line comments are matched but dropped.
//!
//! # Token classes
//!
//! Tried in this order at each position; the first class that matches wins,
//! regardless of whether a later class would match more text:
//!
//! 1. whitespace
//! 2. decimal number, optional fraction and exponent
//! 3. double-quoted string with JSON escapes
//! 4. identifier
//! 5. operator tokens supplied to [`Scanner::new`], longest first
//! 6. single-character punctuation `[ ] ( ) { } , ;`
//! 7. runs of operator symbols
//! 8. `#` line comment
//!
//! Identifier-shaped strings given to [`Scanner::new`] become reserved words
//! instead: they still scan as identifiers but [`Cursor::eat_ident`] refuses
//! them.
//!
//! # Cursor
//!
//! [`Cursor`] is the whole surface the grammar engine builds on:
//! `try_alternative` for transactional backtracking, and the `eat_*` family,
//! each of which either consumes one entry or returns `None` (the FAIL signal)
//! without moving.

mod classes;
mod cursor;
mod error;
mod scanner;
mod token;

pub use classes::{FullMatch, IDENT, LINE_COMMENT, MULTI_OP, NUMBER, SINGLE_OP, SPACE, STRING};
pub use cursor::{Cursor, Expect};
pub use error::LexError;
pub use scanner::{Scanner, TokenList};
pub use token::{Entry, Pos, Token};
