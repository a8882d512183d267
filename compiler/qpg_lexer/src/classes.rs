//! Token class patterns.

use qpg_regex::{ComposeError, RegexTemplate};
use regex::Regex;

pub const SPACE: &str = r"\s+";
pub const NUMBER: &str = r"[0-9]+(?:\.[0-9]+)?(?:[eE]-?[0-9]+)?";
pub const STRING: &str = r#""(?:[^"\\]|\\"|\\\\|\\/|\\b|\\f|\\n|\\r|\\t|\\u[0-9a-fA-F]{4})*""#;
pub const IDENT: &str = r"[a-zA-Z_$][0-9a-zA-Z_$]*";
pub const SINGLE_OP: &str = r"[\[\](){},;]";
pub const MULTI_OP: &str = r"[~@%&+=*<>.?|:\\\-^/]+";
pub const LINE_COMMENT: &str = r"#[^\n]*(?:\n|\z)";

static WHOLE: &[&str] = &[r"\A", r"\z"];

/// A pattern that must match an entire string.
#[derive(Clone, Debug)]
pub struct FullMatch(Regex);

impl FullMatch {
    pub fn new(pattern: &Regex) -> Result<Self, ComposeError> {
        RegexTemplate::new(WHOLE)?.make(&[pattern.into()]).map(FullMatch)
    }

    pub fn from_source(source: &str) -> Result<Self, ComposeError> {
        Self::new(&Regex::new(source)?)
    }

    #[inline]
    pub fn is_match(&self, text: &str) -> bool {
        self.0.is_match(text)
    }

    #[inline]
    pub fn as_regex(&self) -> &Regex {
        &self.0
    }
}
