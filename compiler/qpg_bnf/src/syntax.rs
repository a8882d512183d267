//! Parsed grammar notation, before compilation.

use std::fmt;

/// Built-in terminal matchers, named in all caps in grammar text.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Terminal {
    Number,
    String,
    Ident,
    Hole,
    Eof,
    Fail,
}

impl Terminal {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "NUMBER" => Terminal::Number,
            "STRING" => Terminal::String,
            "IDENT" => Terminal::Ident,
            "HOLE" => Terminal::Hole,
            "EOF" => Terminal::Eof,
            "FAIL" => Terminal::Fail,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Terminal::Number => "NUMBER",
            Terminal::String => "STRING",
            Terminal::Ident => "IDENT",
            Terminal::Hole => "HOLE",
            Terminal::Eof => "EOF",
            Terminal::Fail => "FAIL",
        }
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `name ::= body ;`
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct RuleDef {
    pub name: String,
    pub body: Choice,
}

/// Alternatives separated by `/`, tried in order.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Choice {
    pub alternatives: Vec<Sequence>,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Sequence {
    pub factors: Vec<Factor>,
    /// Index of the grammar hole holding this sequence's action.
    pub action: Option<usize>,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Factor {
    pub atom: Atom,
    pub repeat: Repeat,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Repeat {
    Once,
    /// `?`
    Optional,
    /// `*`
    Many,
    /// `+`
    Many1,
    /// `** sep`
    SepBy(Atom),
    /// `++ sep`
    SepBy1(Atom),
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Atom {
    /// A quoted literal, already decoded.
    Literal(String),
    Terminal(Terminal),
    /// A rule resolved by name when called.
    Rule(String),
    /// `super.name`, resolved against the parent when compiled.
    Super(String),
    /// `( choice )`
    Group(Choice),
}

impl Choice {
    /// Every literal mentioned anywhere below this choice.
    pub fn collect_literals(&self, out: &mut Vec<String>) {
        for sequence in &self.alternatives {
            for factor in &sequence.factors {
                factor.atom.collect_literals(out);
                if let Repeat::SepBy(sep) | Repeat::SepBy1(sep) = &factor.repeat {
                    sep.collect_literals(out);
                }
            }
        }
    }
}

impl Atom {
    fn collect_literals(&self, out: &mut Vec<String>) {
        match self {
            Atom::Literal(text) => out.push(text.clone()),
            Atom::Group(choice) => choice.collect_literals(out),
            Atom::Terminal(_) | Atom::Rule(_) | Atom::Super(_) => {}
        }
    }
}
