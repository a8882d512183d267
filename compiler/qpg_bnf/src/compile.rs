//! Rule definitions to parse closures.

use std::sync::Arc;

use qpg_ir::Value;
use qpg_lexer::Cursor;
use rustc_hash::FxHashSet;

use crate::state::ParseState;
use crate::syntax::{Atom, Choice, Factor, Repeat, Sequence, Terminal};
use crate::{Action, Grammar, GrammarError};

/// A compiled parsing expression. `None` is FAIL.
pub(crate) type Parser = Arc<dyn Fn(&mut ParseState<'_>) -> Option<Value> + Send + Sync>;

fn parser<F>(f: F) -> Parser
where
    F: Fn(&mut ParseState<'_>) -> Option<Value> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// What rule bodies of one grammar compile against.
pub(crate) struct Compiler<'g> {
    pub actions: &'g [Action],
    pub own: &'g FxHashSet<String>,
    pub parent: Option<&'g Grammar>,
}

impl Compiler<'_> {
    pub(crate) fn choice(&self, rule: &str, choice: &Choice) -> Result<Parser, GrammarError> {
        let alternatives = choice
            .alternatives
            .iter()
            .map(|sequence| self.sequence(rule, sequence))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(parser(move |state| {
            alternatives
                .iter()
                .find_map(|alternative| state.try_alternative(|s| alternative(s)))
        }))
    }

    fn sequence(&self, rule: &str, sequence: &Sequence) -> Result<Parser, GrammarError> {
        let factors = sequence
            .factors
            .iter()
            .map(|factor| self.factor(rule, factor))
            .collect::<Result<Vec<_>, _>>()?;
        let action = sequence.action.map(|index| self.action(index)).transpose()?;
        Ok(parser(move |state| {
            let mut values = Vec::with_capacity(factors.len());
            for factor in &factors {
                values.push(factor(state)?);
            }
            match &action {
                Some(action) => action.call(values),
                None => Some(default_value(values)),
            }
        }))
    }

    fn factor(&self, rule: &str, factor: &Factor) -> Result<Parser, GrammarError> {
        let item = self.atom(rule, &factor.atom)?;
        Ok(match &factor.repeat {
            Repeat::Once => item,
            Repeat::Optional => parser(move |state| {
                let found = state.try_alternative(|s| item(s));
                Some(Value::list(found))
            }),
            Repeat::Many => parser(move |state| Some(Value::list(many(state, &item)))),
            Repeat::Many1 => parser(move |state| {
                let items = many(state, &item);
                (!items.is_empty()).then(|| Value::list(items))
            }),
            Repeat::SepBy(sep) => {
                let sep = self.atom(rule, sep)?;
                parser(move |state| Some(Value::list(sep_by(state, &item, &sep))))
            }
            Repeat::SepBy1(sep) => {
                let sep = self.atom(rule, sep)?;
                parser(move |state| {
                    let items = sep_by(state, &item, &sep);
                    (!items.is_empty()).then(|| Value::list(items))
                })
            }
        })
    }

    fn atom(&self, rule: &str, atom: &Atom) -> Result<Parser, GrammarError> {
        Ok(match atom {
            Atom::Literal(text) => {
                let text = text.clone();
                parser(move |state| state.eat(|c| c.eat_literal(&text)).map(token_text))
            }
            Atom::Terminal(terminal) => self::terminal(*terminal),
            Atom::Rule(name) => {
                self.check_name(rule, name)?;
                let name = name.clone();
                parser(move |state| state.call(&name))
            }
            Atom::Super(name) => {
                let parent = self.parent.ok_or_else(|| GrammarError::NoParent(name.clone()))?;
                let target = parent
                    .lookup(name)
                    .cloned()
                    .ok_or_else(|| GrammarError::UndefinedSuper(name.clone()))?;
                parser(move |state| state.invoke(&target))
            }
            Atom::Group(choice) => self.choice(rule, choice)?,
        })
    }

    fn action(&self, index: usize) -> Result<Action, GrammarError> {
        self.actions
            .get(index)
            .cloned()
            .ok_or(GrammarError::ActionCount {
                holes: index + 1,
                actions: self.actions.len(),
            })
    }

    fn check_name(&self, rule: &str, name: &str) -> Result<(), GrammarError> {
        if self.own.contains(name) || self.parent.is_some_and(|parent| parent.has_rule(name)) {
            return Ok(());
        }
        let (rule, name) = (rule.to_owned(), name.to_owned());
        if looks_like_terminal(&name) {
            Err(GrammarError::UnknownTerminal { rule, name })
        } else {
            Err(GrammarError::UndefinedRule { rule, name })
        }
    }
}

fn terminal(terminal: Terminal) -> Parser {
    match terminal {
        Terminal::Number => parser(|state| state.eat(Cursor::eat_number).map(token_text)),
        Terminal::String => parser(|state| state.eat(Cursor::eat_string).map(token_text)),
        Terminal::Ident => parser(|state| state.eat(Cursor::eat_ident).map(token_text)),
        Terminal::Hole => parser(|state| state.eat(Cursor::eat_hole).map(Value::Hole)),
        Terminal::Eof => parser(|state| state.eat(Cursor::eat_eof).map(|()| Value::Null)),
        Terminal::Fail => parser(|_| None),
    }
}

fn token_text(token: &qpg_lexer::Token) -> Value {
    Value::String(token.text.clone())
}

/// One factor's value as is; otherwise the list of all of them.
fn default_value(values: Vec<Value>) -> Value {
    match <[Value; 1]>::try_from(values) {
        Ok([value]) => value,
        Err(values) => Value::list(values),
    }
}

/// Zero or more `item`s. Stops after an item that consumed nothing.
fn many(state: &mut ParseState<'_>, item: &Parser) -> Vec<Value> {
    let mut items = Vec::new();
    loop {
        let start = state.position();
        let Some(value) = state.try_alternative(|s| item(s)) else {
            break;
        };
        items.push(value);
        if state.position() == start {
            break;
        }
    }
    items
}

/// Zero or more `item`s separated by `sep`; separator values are dropped.
/// A trailing separator is not consumed.
fn sep_by(state: &mut ParseState<'_>, item: &Parser, sep: &Parser) -> Vec<Value> {
    let Some(first) = state.try_alternative(|s| item(s)) else {
        return Vec::new();
    };
    let mut items = vec![first];
    loop {
        let start = state.position();
        let next = state.try_alternative(|s| {
            sep(s)?;
            item(s)
        });
        let Some(value) = next else {
            break;
        };
        items.push(value);
        if state.position() == start {
            break;
        }
    }
    items
}

/// All-caps names are reserved for terminals.
fn looks_like_terminal(name: &str) -> bool {
    name.chars().any(|c| c.is_ascii_uppercase())
        && name
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}
