//! The four-state context automaton.
//!
//! Each literal part is consumed token by token with the matcher of the
//! current context. A matcher takes either the longest run of characters
//! that are ordinary in that context, or exactly one transition character:
//!
//! - `Block`: `\` enters `Backslash`, `[` enters `Charset`, `{` enters `Count`.
//!   Complete escapes such as `\d` inside a run stay in `Block`.
//! - `Backslash`: any single character returns to `Block`.
//! - `Charset`: `]` returns to `Block`; escapes such as `\]` stay inside.
//! - `Count`: `}` returns to `Block`.

use std::sync::LazyLock;

use regex::Regex;

use crate::ComposeError;

/// Lexical context in effect at an interpolation point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Context {
    /// Ordinary pattern body.
    Block,
    /// Just after an unpaired `\`.
    Backslash,
    /// Inside `[...]`.
    Charset,
    /// Inside `{...}`.
    Count,
}

// Group 1 matches the token that leaves the context.
static BLOCK_TOKEN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\A(?s:([\\{\[])|(?:[^\\{\[]|\\.)+)").ok());
static BACKSLASH_TOKEN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\A(?s:(.))").ok());
static CHARSET_TOKEN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\A(?s:(\])|(?:[^\]\\]|\\.)+)").ok());
static COUNT_TOKEN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\A(?s:(\})|[^}]+)").ok());

impl Context {
    fn matcher(self) -> Option<&'static Regex> {
        let token = match self {
            Context::Block => &BLOCK_TOKEN,
            Context::Backslash => &BACKSLASH_TOKEN,
            Context::Charset => &CHARSET_TOKEN,
            Context::Count => &COUNT_TOKEN,
        };
        token.as_ref()
    }

    /// Context after consuming a transition character from `self`.
    fn exit(self, transition: &str) -> Context {
        match self {
            Context::Block => match transition {
                "\\" => Context::Backslash,
                "[" => Context::Charset,
                _ => Context::Count,
            },
            Context::Backslash | Context::Charset | Context::Count => Context::Block,
        }
    }
}

/// Scan `parts` and return the context in effect before each hole.
///
/// The result has `parts.len() - 1` entries; the context after the final
/// part is not needed since nothing is interpolated there.
pub(crate) fn compute_contexts(parts: &[&str]) -> Result<Vec<Context>, ComposeError> {
    let mut contexts = Vec::with_capacity(parts.len().saturating_sub(1));
    let mut context = Context::Block;

    for (index, part) in parts.iter().enumerate() {
        let mut offset = 0;
        while offset < part.len() {
            let rest = &part[offset..];
            let unscannable = move || ComposeError::Unscannable {
                part: index,
                offset,
                context,
            };
            let caps = context
                .matcher()
                .and_then(|re| re.captures(rest))
                .ok_or_else(unscannable)?;
            let whole = caps.get(0).ok_or_else(unscannable)?;
            if whole.is_empty() {
                return Err(unscannable());
            }
            if let Some(transition) = caps.get(1) {
                context = context.exit(transition.as_str());
            }
            offset += whole.end();
        }
        if index + 1 < parts.len() {
            contexts.push(context);
        }
    }

    Ok(contexts)
}
