//! Backtracking cursor over a token list.

use crate::scanner::Lexicon;
use crate::{Entry, FullMatch, Token};

/// What [`Cursor::eat`] accepts.
#[derive(Clone, Copy, Debug)]
pub enum Expect<'p> {
    /// Token text equal to this.
    Literal(&'p str),
    /// Token text fully matched by this.
    Pattern(&'p FullMatch),
}

/// Position in a [`TokenList`](crate::TokenList).
///
/// Every `eat_*` either consumes exactly one entry and returns `Some`, or
/// returns `None` and leaves the position alone.
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    entries: &'a [Entry],
    lexicon: &'a Lexicon,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(entries: &'a [Entry], lexicon: &'a Lexicon) -> Self {
        Cursor {
            entries,
            lexicon,
            pos: 0,
        }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Rewind (or advance) to a position previously read from
    /// [`position`](Self::position).
    #[inline]
    pub fn set_position(&mut self, pos: usize) {
        debug_assert!(pos <= self.entries.len());
        self.pos = pos;
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.entries.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn current(&self) -> Option<&'a Entry> {
        self.entries.get(self.pos)
    }

    /// Run `f`; if it fails, restore the position it started from.
    pub fn try_alternative<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let start = self.pos;
        let result = f(self);
        if result.is_none() {
            self.pos = start;
        }
        result
    }

    pub fn eat(&mut self, expect: Expect<'_>) -> Option<&'a Token> {
        match expect {
            Expect::Literal(text) => self.eat_if(|token| token.text == text),
            Expect::Pattern(pattern) => self.eat_if(|token| pattern.is_match(&token.text)),
        }
    }

    #[inline]
    pub fn eat_literal(&mut self, text: &str) -> Option<&'a Token> {
        self.eat(Expect::Literal(text))
    }

    #[inline]
    pub fn eat_pattern(&mut self, pattern: &FullMatch) -> Option<&'a Token> {
        self.eat(Expect::Pattern(pattern))
    }

    pub fn eat_number(&mut self) -> Option<&'a Token> {
        let lexicon = self.lexicon;
        self.eat_if(|token| lexicon.number.is_match(&token.text))
    }

    pub fn eat_string(&mut self) -> Option<&'a Token> {
        let lexicon = self.lexicon;
        self.eat_if(|token| lexicon.string.is_match(&token.text))
    }

    /// An identifier that is not a reserved word.
    pub fn eat_ident(&mut self) -> Option<&'a Token> {
        let lexicon = self.lexicon;
        self.eat_if(|token| lexicon.ident.is_match(&token.text) && !lexicon.keywords.contains(&token.text))
    }

    /// The hole index, if the current entry is a hole.
    pub fn eat_hole(&mut self) -> Option<usize> {
        let index = self.current()?.as_hole()?;
        self.pos += 1;
        Some(index)
    }

    /// Succeeds without consuming, only at the end.
    pub fn eat_eof(&mut self) -> Option<()> {
        self.is_at_end().then_some(())
    }

    fn eat_if(&mut self, accept: impl FnOnce(&Token) -> bool) -> Option<&'a Token> {
        let token = self.current()?.as_token()?;
        if !accept(token) {
            return None;
        }
        self.pos += 1;
        Some(token)
    }
}
