//! Per-parse mutable state: cursor, packrat memo, counters.

use qpg_ir::Value;
use qpg_lexer::Cursor;
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::grammar::{Rule, RuleId};
use crate::stack::ensure_sufficient_stack;
use crate::Grammar;

/// Parse configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Cache each rule's outcome per token position. Turning this off never
    /// changes a result, only how long it takes.
    pub memoize: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions { memoize: true }
    }
}

impl ParseOptions {
    #[must_use]
    pub fn without_memo() -> Self {
        ParseOptions { memoize: false }
    }
}

/// Counters from one parse.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Rule invocations, including those answered from the memo.
    pub rule_calls: usize,
    pub memo_hits: usize,
}

#[derive(Clone, Debug)]
enum Memo {
    Fail,
    Hit { value: Value, end: usize },
}

pub(crate) struct ParseState<'a> {
    grammar: &'a Grammar,
    cursor: Cursor<'a>,
    memo: FxHashMap<(RuleId, usize), Memo>,
    options: ParseOptions,
    stats: ParseStats,
    furthest: usize,
}

impl<'a> ParseState<'a> {
    pub(crate) fn new(grammar: &'a Grammar, cursor: Cursor<'a>, options: ParseOptions) -> Self {
        ParseState {
            grammar,
            cursor,
            memo: FxHashMap::default(),
            options,
            stats: ParseStats::default(),
            furthest: 0,
        }
    }

    #[inline]
    pub(crate) fn position(&self) -> usize {
        self.cursor.position()
    }

    #[inline]
    pub(crate) fn stats(&self) -> ParseStats {
        self.stats
    }

    /// Furthest position any terminal reached.
    #[inline]
    pub(crate) fn furthest(&self) -> usize {
        self.furthest
    }

    /// Run `f`; on failure, rewind to where it started.
    pub(crate) fn try_alternative<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let start = self.cursor.position();
        let result = f(self);
        if result.is_none() {
            self.cursor.set_position(start);
        }
        result
    }

    /// Run a terminal matcher against the cursor.
    pub(crate) fn eat<T>(&mut self, f: impl FnOnce(&mut Cursor<'a>) -> Option<T>) -> Option<T> {
        let result = f(&mut self.cursor);
        if result.is_some() {
            self.furthest = self.furthest.max(self.cursor.position());
        }
        result
    }

    /// Invoke the rule currently bound to `name` in the grammar being parsed.
    pub(crate) fn call(&mut self, name: &str) -> Option<Value> {
        let grammar = self.grammar;
        let rule = grammar.lookup(name)?;
        self.invoke(rule)
    }

    /// Invoke `rule` at the current position, through the memo.
    pub(crate) fn invoke(&mut self, rule: &Rule) -> Option<Value> {
        let start = self.cursor.position();
        self.stats.rule_calls += 1;
        let key = (rule.id(), start);

        if self.options.memoize {
            if let Some(memo) = self.memo.get(&key).cloned() {
                self.stats.memo_hits += 1;
                trace!(rule = rule.name(), pos = start, "memo hit");
                return match memo {
                    Memo::Fail => None,
                    Memo::Hit { value, end } => {
                        self.cursor.set_position(end);
                        Some(value)
                    }
                };
            }
        }

        trace!(rule = rule.name(), pos = start, "rule");
        let result = ensure_sufficient_stack(|| rule.run(self));
        if result.is_none() {
            self.cursor.set_position(start);
        }

        if self.options.memoize {
            let memo = match &result {
                Some(value) => Memo::Hit {
                    value: value.clone(),
                    end: self.cursor.position(),
                },
                None => Memo::Fail,
            };
            self.memo.insert(key, memo);
        }
        result
    }
}
