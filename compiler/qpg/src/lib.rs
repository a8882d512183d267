//! Composable PEG grammars over literal-plus-hole text.
//!
//! Three engines, one per crate, re-exported here:
//!
//! - [`qpg_regex`]: builds regexes from literal parts and interpolated values,
//!   escaping each value for the regex context it lands in.
//! - [`qpg_lexer`]: scans literal-plus-hole text into one token list with
//!   hole markers, and walks it with a backtracking cursor.
//! - [`qpg_bnf`]: compiles BNF-notation grammars with semantic actions into
//!   packrat parsers, and extends them with overriding rules and `super.rule`.
//!
//! ```text
//! let json = qpg::grammar(r#"
//!     start ::= value EOF ${};
//!     value ::= NUMBER ${} / "[" value ** "," "]" ${};
//! "#, actions)?;
//! let ast = json.parse(&qpg::program("[1, ${}]"), vec![hole_value])?;
//! ```

use std::sync::{Arc, Once};

pub use qpg_bnf::{Action, Grammar, GrammarError, Parse, ParseError, ParseOptions, ParseStats, Rule, Terminal};
pub use qpg_ir::{ensure, fold_binary, visit, Node, Panic, ReplaceVisitor, Template, Value, Visitor, HOLE_MARKER};
pub use qpg_lexer::{
    Cursor, Entry, Expect, FullMatch, LexError, Pos, Scanner, Token, TokenList, IDENT, LINE_COMMENT, MULTI_OP, NUMBER,
    SINGLE_OP, SPACE, STRING,
};
pub use qpg_regex::{compose, ComposeError, Context, Interp, RegexTemplate};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call more than once. Enable with `RUST_LOG=qpg_bnf=debug` or
/// `RUST_LOG=qpg_bnf=trace` (per-rule invocations).
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

/// Text with `${}` marking each hole.
pub fn program(text: &str) -> Template {
    Template::split(text, HOLE_MARKER)
}

/// Compile grammar text with `${}` marking each action hole.
pub fn grammar(text: &str, actions: Vec<Action>) -> Result<Arc<Grammar>, GrammarError> {
    Grammar::compile(&program(text), actions)
}

/// Extend `parent` with grammar text with `${}` marking each action hole.
pub fn extend(parent: &Arc<Grammar>, text: &str, actions: Vec<Action>) -> Result<Arc<Grammar>, GrammarError> {
    parent.extend(&program(text), actions)
}
