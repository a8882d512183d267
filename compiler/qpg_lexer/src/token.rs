//! Tokens and their positions.

use std::fmt;

/// Where a token sits: which literal segment, and the byte range in it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Pos {
    pub segment: usize,
    pub start: usize,
    /// Exclusive end offset.
    pub after: usize,
}

impl Pos {
    #[inline]
    pub const fn new(segment: usize, start: usize, after: usize) -> Self {
        Pos {
            segment,
            start,
            after,
        }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}@{}:{}", self.segment, self.start, self.after)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    pub text: String,
    pub pos: Pos,
}

impl Token {
    pub fn new(text: impl Into<String>, pos: Pos) -> Self {
        Token {
            text: text.into(),
            pos,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} at {}", self.text, self.pos)
    }
}

/// One entry of a token list.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Entry {
    Token(Token),
    /// The hole between segment `i` and segment `i + 1`.
    Hole(usize),
}

impl Entry {
    pub fn as_token(&self) -> Option<&Token> {
        match self {
            Entry::Token(token) => Some(token),
            Entry::Hole(_) => None,
        }
    }

    pub fn as_hole(&self) -> Option<usize> {
        match self {
            Entry::Hole(index) => Some(*index),
            Entry::Token(_) => None,
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Token(token) => write!(f, "{token}"),
            Entry::Hole(index) => write!(f, "hole ${{{index}}}"),
        }
    }
}
