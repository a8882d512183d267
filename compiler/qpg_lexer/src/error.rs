use qpg_regex::ComposeError;

use crate::{Pos, Token};

/// Scanner errors.
///
/// Only [`LexError::Lexical`] describes bad input. The other variants are
/// internal faults: the token classes themselves are broken.
#[derive(Debug, thiserror::Error)]
pub enum LexError {
    /// No token class matches at `pos`.
    #[error("unexpected {remainder:?} at {pos}")]
    Lexical { remainder: String, pos: Pos },

    /// A match did not start where the previous one ended.
    #[error("internal: {token} expected at {expected}")]
    Misaligned { token: Token, expected: usize },

    /// A class matched the empty string, which would never advance.
    #[error("internal: empty token at {pos}")]
    EmptyToken { pos: Pos },

    /// A token class failed to build.
    #[error("internal: token pattern: {0}")]
    Pattern(#[from] ComposeError),
}

impl LexError {
    /// True for faults of the scanner rather than of the scanned text.
    pub fn is_internal(&self) -> bool {
        !matches!(self, LexError::Lexical { .. })
    }
}
