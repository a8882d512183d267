//! Grammar definition and parse errors.

use qpg_lexer::LexError;

/// A grammar that cannot be compiled. Raised before any parse is attempted.
#[derive(Debug, thiserror::Error)]
pub enum GrammarError {
    #[error("grammar text: {0}")]
    Lex(#[from] LexError),

    #[error("expected {expected}, found {found}")]
    Syntax { expected: &'static str, found: String },

    #[error("bad literal {text}: {message}")]
    BadLiteral { text: String, message: String },

    #[error("rule `{0}` is defined twice")]
    DuplicateRule(String),

    #[error("`{0}` is a built-in terminal and cannot be redefined")]
    TerminalRule(String),

    #[error("rule `{rule}` refers to undefined rule `{name}`")]
    UndefinedRule { rule: String, name: String },

    #[error("rule `{rule}` refers to unknown terminal `{name}`")]
    UnknownTerminal { rule: String, name: String },

    #[error("`super.{0}` in a grammar that extends nothing")]
    NoParent(String),

    #[error("`super.{0}`: the parent grammar has no such rule")]
    UndefinedSuper(String),

    #[error("grammar text has {holes} action holes but {actions} actions were given")]
    ActionCount { holes: usize, actions: usize },
}

/// A parse that produced no value.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("no rule named `{0}`")]
    UnknownRule(String),

    #[error("program has {expected} holes but {found} values were given")]
    HoleCount { expected: usize, found: usize },

    /// The entry rule failed. `at` describes the furthest entry reached.
    #[error("no alternative of `{rule}` matched at {at}")]
    NoMatch { rule: String, at: String },
}
