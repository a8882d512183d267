//! Compiled grammars and the parse entry points.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use qpg_ir::{Template, Value};
use qpg_lexer::Scanner;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

use crate::compile::{Compiler, Parser};
use crate::meta::parse_rules;
use crate::state::{ParseOptions, ParseState, ParseStats};
use crate::syntax::Terminal;
use crate::{Action, GrammarError, ParseError};

/// Identity of a compiled rule, unique per process.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct RuleId(u64);

impl RuleId {
    fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        RuleId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// One compiled production.
pub struct Rule {
    id: RuleId,
    name: String,
    body: Parser,
}

impl Rule {
    fn new(name: String, body: Parser) -> Self {
        Rule {
            id: RuleId::fresh(),
            name,
            body,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub(crate) fn id(&self) -> RuleId {
        self.id
    }

    #[inline]
    pub(crate) fn run(&self, state: &mut ParseState<'_>) -> Option<Value> {
        (self.body)(state)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A successful parse.
#[derive(Clone, Debug, PartialEq)]
pub struct Parse {
    /// Value of the entry rule.
    pub value: Value,
    /// The program's hole values; `Value::Hole(i)` in `value` refers to `holes[i]`.
    pub holes: Vec<Value>,
    /// Token-list entries consumed by the entry rule.
    pub consumed: usize,
    /// Token-list entries in the program.
    pub total: usize,
    pub stats: ParseStats,
}

impl Parse {
    /// True when the entry rule consumed the whole program.
    pub fn is_complete(&self) -> bool {
        self.consumed == self.total
    }

    pub fn hole(&self, index: usize) -> Option<&Value> {
        self.holes.get(index)
    }
}

/// A rule table, optionally layered over a parent grammar.
///
/// Immutable once built. Rule names are looked up when a rule is called,
/// always in the grammar being parsed, so a rule of the parent that calls
/// `expr` runs the derived grammar's `expr` when parsing with the derived
/// grammar. `super.name` is bound when the derived grammar is compiled.
pub struct Grammar {
    rules: FxHashMap<String, Arc<Rule>>,
    order: Vec<String>,
    parent: Option<Arc<Grammar>>,
    literals: Vec<String>,
    scanner: Scanner,
}

impl Grammar {
    /// Compile grammar text; `actions[i]` fills hole `i`.
    pub fn compile(text: &Template, actions: Vec<Action>) -> Result<Arc<Grammar>, GrammarError> {
        Self::build(text, &actions, None)
    }

    /// Compile grammar text over `self`. Rules it defines replace this
    /// grammar's rules of the same name; all others are inherited.
    pub fn extend(self: &Arc<Self>, text: &Template, actions: Vec<Action>) -> Result<Arc<Grammar>, GrammarError> {
        Self::build(text, &actions, Some(Arc::clone(self)))
    }

    fn build(text: &Template, actions: &[Action], parent: Option<Arc<Grammar>>) -> Result<Arc<Grammar>, GrammarError> {
        if text.hole_count() != actions.len() {
            return Err(GrammarError::ActionCount {
                holes: text.hole_count(),
                actions: actions.len(),
            });
        }

        let defs = parse_rules(text)?;
        let mut own = FxHashSet::default();
        for def in &defs {
            if Terminal::from_name(&def.name).is_some() {
                return Err(GrammarError::TerminalRule(def.name.clone()));
            }
            if !own.insert(def.name.clone()) {
                return Err(GrammarError::DuplicateRule(def.name.clone()));
            }
        }

        let mut literals = parent.as_ref().map(|p| p.literals.clone()).unwrap_or_default();
        for def in &defs {
            def.body.collect_literals(&mut literals);
        }
        literals.sort_unstable();
        literals.dedup();

        let compiler = Compiler {
            actions,
            own: &own,
            parent: parent.as_deref(),
        };
        let mut rules = FxHashMap::default();
        let mut order = Vec::with_capacity(defs.len());
        for def in &defs {
            let body = compiler.choice(&def.name, &def.body)?;
            rules.insert(def.name.clone(), Arc::new(Rule::new(def.name.clone(), body)));
            order.push(def.name.clone());
        }

        let scanner = Scanner::new(&literals)?;
        debug!(
            rules = order.len(),
            literals = literals.len(),
            extends = parent.is_some(),
            "grammar compiled"
        );

        Ok(Arc::new(Grammar {
            rules,
            order,
            parent,
            literals,
            scanner,
        }))
    }

    pub fn parent(&self) -> Option<&Arc<Grammar>> {
        self.parent.as_ref()
    }

    /// The rule `name` resolves to: this grammar's own, else the parent's.
    pub fn lookup(&self, name: &str) -> Option<&Arc<Rule>> {
        match self.rules.get(name) {
            Some(rule) => Some(rule),
            None => self.parent.as_deref()?.lookup(name),
        }
    }

    pub fn has_rule(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Rules this grammar defines itself, in definition order.
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Every quoted literal of this grammar and its ancestors, sorted.
    pub fn literals(&self) -> &[String] {
        &self.literals
    }

    /// The scanner used for program text.
    pub fn scanner(&self) -> &Scanner {
        &self.scanner
    }

    /// Parse `program` from the `start` rule.
    pub fn parse(&self, program: &Template, holes: Vec<Value>) -> Result<Parse, ParseError> {
        self.parse_with(&ParseOptions::default(), "start", program, holes)
    }

    pub fn parse_rule(&self, rule: &str, program: &Template, holes: Vec<Value>) -> Result<Parse, ParseError> {
        self.parse_with(&ParseOptions::default(), rule, program, holes)
    }

    pub fn parse_with(
        &self,
        options: &ParseOptions,
        rule: &str,
        program: &Template,
        holes: Vec<Value>,
    ) -> Result<Parse, ParseError> {
        let entry = self
            .lookup(rule)
            .ok_or_else(|| ParseError::UnknownRule(rule.to_owned()))?;
        if program.hole_count() != holes.len() {
            return Err(ParseError::HoleCount {
                expected: program.hole_count(),
                found: holes.len(),
            });
        }

        let tokens = self.scanner.scan(program)?;
        let mut state = ParseState::new(self, tokens.cursor(), *options);
        let value = state.invoke(entry);
        let (consumed, furthest, stats) = (state.position(), state.furthest(), state.stats());
        trace!(
            rule,
            calls = stats.rule_calls,
            memo_hits = stats.memo_hits,
            consumed,
            total = tokens.len(),
            "parse finished"
        );

        match value {
            Some(value) => Ok(Parse {
                value,
                holes,
                consumed,
                total: tokens.len(),
                stats,
            }),
            None => Err(ParseError::NoMatch {
                rule: rule.to_owned(),
                at: match tokens.entries().get(furthest) {
                    Some(entry) => entry.to_string(),
                    None => "end of input".to_owned(),
                },
            }),
        }
    }
}

impl fmt::Debug for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grammar")
            .field("rules", &self.order)
            .field("parent", &self.parent)
            .finish_non_exhaustive()
    }
}
