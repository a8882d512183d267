//! Context-tracking regex composer.
//!
//! Builds one pattern from literal regex source interleaved with
//! interpolated values, such that a value can never escape the lexical
//! context the surrounding literal text puts it in:
//!
//! | Context before the hole | Substitution |
//! |-------------------------|--------------|
//! | [`Context::Block`] | pattern source, or escaped text, inside `(?:...)` |
//! | [`Context::Backslash`] | a non-negative integer (default `0`) |
//! | [`Context::Count`] | a non-negative integer (default `0`) |
//! | [`Context::Charset`] | members of a bracketed class pattern, or escaped text |
//!
//! ```text
//! let word = Regex::new(r"\w+")?;
//! let re = compose(&[r"\A", r"[", r"]*\z"], &[Interp::Pattern(&word), Interp::Text("]")])?;
//! // source: \A(?:\w+)[\]]*\z
//! ```
//!
//! The contexts of a template are computed once per distinct `'static`
//! parts slice and cached by its address, since one authoring site is
//! reused with many different values.
//!
//! # Known limitations
//!
//! - Capturing groups inside an interpolated pattern stay capturing, so they
//!   shift the group numbering of the composed pattern.
//! - A charset pattern interpolated into a charset keeps its members as
//!   written; a case-insensitive class spliced into a case-sensitive
//!   pattern is not expanded to both cases.

mod context;
mod error;
mod template;

pub use context::Context;
pub use error::ComposeError;
pub use template::{compose, Interp, RegexTemplate};
