//! Templates and substitution.

use std::sync::{Arc, LazyLock};

use parking_lot::Mutex;
use regex::{Regex, RegexBuilder};
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::context::compute_contexts;
use crate::{ComposeError, Context};

/// Address and length of a `'static` parts slice.
type TemplateKey = (usize, usize);

static CONTEXT_CACHE: LazyLock<Mutex<FxHashMap<TemplateKey, Arc<[Context]>>>> =
    LazyLock::new(Mutex::default);

/// A value spliced into a template hole.
#[derive(Clone, Copy, Debug)]
pub enum Interp<'a> {
    /// Plain text, matched literally.
    Text(&'a str),
    /// An already-built pattern.
    Pattern(&'a Regex),
}

impl<'a> From<&'a str> for Interp<'a> {
    fn from(text: &'a str) -> Self {
        Interp::Text(text)
    }
}

impl<'a> From<&'a String> for Interp<'a> {
    fn from(text: &'a String) -> Self {
        Interp::Text(text)
    }
}

impl<'a> From<&'a Regex> for Interp<'a> {
    fn from(re: &'a Regex) -> Self {
        Interp::Pattern(re)
    }
}

/// Literal regex source parts with the context before each hole.
#[derive(Clone, Debug)]
pub struct RegexTemplate {
    parts: &'static [&'static str],
    contexts: Arc<[Context]>,
}

impl RegexTemplate {
    /// Analyse `parts`, or reuse the analysis of this exact slice.
    pub fn new(parts: &'static [&'static str]) -> Result<Self, ComposeError> {
        let key = (parts.as_ptr() as usize, parts.len());
        if let Some(contexts) = CONTEXT_CACHE.lock().get(&key) {
            return Ok(RegexTemplate {
                parts,
                contexts: Arc::clone(contexts),
            });
        }

        let contexts: Arc<[Context]> = compute_contexts(parts)?.into();
        trace!(parts = parts.len(), contexts = ?contexts, "regex template analysed");
        CONTEXT_CACHE.lock().insert(key, Arc::clone(&contexts));
        Ok(RegexTemplate { parts, contexts })
    }

    /// Context in effect before each hole.
    #[inline]
    pub fn contexts(&self) -> &[Context] {
        &self.contexts
    }

    #[inline]
    pub fn hole_count(&self) -> usize {
        self.contexts.len()
    }

    /// Composed pattern source.
    pub fn source(&self, values: &[Interp<'_>]) -> Result<String, ComposeError> {
        if values.len() != self.hole_count() {
            return Err(ComposeError::ValueCount {
                expected: self.hole_count(),
                found: values.len(),
            });
        }

        let mut pattern = String::new();
        let mut parts = self.parts.iter();
        if let Some(first) = parts.next() {
            pattern.push_str(first);
        }
        for ((context, value), part) in self.contexts.iter().zip(values).zip(parts) {
            substitute(&mut pattern, *context, *value);
            pattern.push_str(part);
        }
        Ok(pattern)
    }

    pub fn make(&self, values: &[Interp<'_>]) -> Result<Regex, ComposeError> {
        Ok(Regex::new(&self.source(values)?)?)
    }

    /// Like [`make`](Self::make), with flags from `i`, `m`, `s`, `x`, `u`.
    pub fn make_with_flags(&self, flags: &str, values: &[Interp<'_>]) -> Result<Regex, ComposeError> {
        let source = self.source(values)?;
        let mut builder = RegexBuilder::new(&source);
        for flag in flags.chars() {
            match flag {
                'i' => builder.case_insensitive(true),
                'm' => builder.multi_line(true),
                's' => builder.dot_matches_new_line(true),
                'x' => builder.ignore_whitespace(true),
                'u' => builder.unicode(true),
                other => return Err(ComposeError::UnknownFlag(other)),
            };
        }
        Ok(builder.build()?)
    }
}

/// Compose `parts` and `values` into one pattern.
pub fn compose(parts: &'static [&'static str], values: &[Interp<'_>]) -> Result<Regex, ComposeError> {
    RegexTemplate::new(parts)?.make(values)
}

fn substitute(out: &mut String, context: Context, value: Interp<'_>) {
    match context {
        Context::Block => {
            out.push_str("(?:");
            match value {
                Interp::Pattern(re) => out.push_str(re.as_str()),
                Interp::Text(text) => out.push_str(&regex::escape(text)),
            }
            out.push(')');
        }
        Context::Backslash | Context::Count => {
            let n = match value {
                Interp::Text(text) => text.trim().parse::<u32>().unwrap_or(0),
                Interp::Pattern(_) => 0,
            };
            out.push_str(&n.to_string());
        }
        Context::Charset => match value {
            Interp::Pattern(re) => match class_members(re.as_str()) {
                Some(members) => out.push_str(&members),
                None => escape_charset_into(out, re.as_str()),
            },
            Interp::Text(text) => escape_charset_into(out, text),
        },
    }
}

/// Characters with meaning inside a class in `regex` syntax.
fn is_charset_special(c: char) -> bool {
    matches!(c, '\\' | ']' | '[' | '-' | '^' | '&' | '~')
}

fn escape_charset_into(out: &mut String, text: &str) {
    for c in text.chars() {
        if is_charset_special(c) {
            out.push('\\');
        }
        out.push(c);
    }
}

/// Interior of a bracketed class source, re-escaped so that it cannot
/// close the class it is spliced into.
///
/// A `]` that opens the class as its first member is escaped. Returns `None`
/// unless the class closes exactly at the end of `source`, so `[a]|[b]` and
/// `[a][b]` are not classes.
fn class_members(source: &str) -> Option<String> {
    let interior = source.strip_prefix('[')?;
    let mut out = String::with_capacity(interior.len() + 2);
    let mut escaped = false;
    let mut depth = 0usize;
    for (i, c) in interior.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '[' {
            depth += 1;
        } else if c == ']' && depth > 0 {
            depth -= 1;
        } else if c == ']' && (out.is_empty() || out == "^") {
            out.push('\\');
        } else if c == ']' {
            return (i + 1 == interior.len()).then_some(out);
        }
        out.push(c);
    }
    None
}
