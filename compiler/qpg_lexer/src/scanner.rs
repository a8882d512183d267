//! The scanner.

use std::sync::Arc;

use qpg_ir::Template;
use qpg_regex::{ComposeError, Interp, RegexTemplate};
use regex::Regex;
use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use crate::classes::{FullMatch, IDENT, LINE_COMMENT, MULTI_OP, NUMBER, SINGLE_OP, SPACE, STRING};
use crate::{Cursor, Entry, LexError, Pos, Token};

/// Token pattern with the built-in classes only. Matches in the `space` and
/// `comment` groups are dropped.
static TOKEN: &[&str] = &[r"\A(?:(?P<space>", ")|", "|", "|", "|", "|", "|(?P<comment>", "))"];

/// Token pattern with an operator alternation ahead of the punctuation classes.
static TOKEN_WITH_OPERATORS: &[&str] = &[
    r"\A(?:(?P<space>",
    ")|",
    "|",
    "|",
    "|",
    "|",
    "|",
    "|(?P<comment>",
    "))",
];

/// What a cursor needs to classify tokens.
#[derive(Debug)]
pub(crate) struct Lexicon {
    pub(crate) keywords: FxHashSet<String>,
    pub(crate) number: FullMatch,
    pub(crate) string: FullMatch,
    pub(crate) ident: FullMatch,
}

/// Turns templates into token lists.
///
/// Build once per token set; a scanner is immutable and can be shared.
#[derive(Clone, Debug)]
pub struct Scanner {
    token: Regex,
    operators: Vec<String>,
    lexicon: Arc<Lexicon>,
}

impl Scanner {
    /// Scanner for the built-in classes plus `tokens`.
    ///
    /// Identifier-shaped tokens become reserved words; the rest are operators
    /// matched longest first. Empty strings are ignored.
    pub fn new<I, S>(tokens: I) -> Result<Self, LexError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ident = FullMatch::from_source(IDENT)?;

        let mut keywords = FxHashSet::default();
        let mut operators = Vec::new();
        for token in tokens {
            let token = token.as_ref();
            if token.is_empty() {
                continue;
            }
            if ident.is_match(token) {
                keywords.insert(token.to_owned());
            } else if !operators.iter().any(|op| op == token) {
                operators.push(token.to_owned());
            }
        }
        operators.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        let space = class(SPACE)?;
        let number = class(NUMBER)?;
        let string = class(STRING)?;
        let ident_re = class(IDENT)?;
        let single = class(SINGLE_OP)?;
        let multi = class(MULTI_OP)?;
        let comment = class(LINE_COMMENT)?;

        let token = if operators.is_empty() {
            RegexTemplate::new(TOKEN)?.make(&[
                (&space).into(),
                (&number).into(),
                (&string).into(),
                (&ident_re).into(),
                (&single).into(),
                (&multi).into(),
                (&comment).into(),
            ])?
        } else {
            let alternation: Vec<String> = operators.iter().map(|op| regex::escape(op)).collect();
            let ops = class(&alternation.join("|"))?;
            RegexTemplate::new(TOKEN_WITH_OPERATORS)?.make(&[
                (&space).into(),
                (&number).into(),
                (&string).into(),
                (&ident_re).into(),
                Interp::Pattern(&ops),
                (&single).into(),
                (&multi).into(),
                (&comment).into(),
            ])?
        };

        debug!(
            keywords = keywords.len(),
            operators = operators.len(),
            "scanner built"
        );

        Ok(Scanner {
            token,
            operators,
            lexicon: Arc::new(Lexicon {
                keywords,
                number: FullMatch::new(&number)?,
                string: FullMatch::new(&string)?,
                ident,
            }),
        })
    }

    /// Reserved words, in no particular order.
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.lexicon.keywords.iter().map(String::as_str)
    }

    /// Operator tokens, longest first.
    pub fn operators(&self) -> &[String] {
        &self.operators
    }

    /// The composed token pattern.
    pub fn token_pattern(&self) -> &Regex {
        &self.token
    }

    /// Scan every segment of `template`, with one hole between consecutive
    /// segments.
    pub fn scan(&self, template: &Template) -> Result<TokenList, LexError> {
        let mut entries = Vec::new();
        for (index, segment) in template.segments().iter().enumerate() {
            if index > 0 {
                entries.push(Entry::Hole(index - 1));
            }
            self.scan_segment(index, segment, &mut entries)?;
        }
        Ok(TokenList {
            entries,
            lexicon: Arc::clone(&self.lexicon),
        })
    }

    /// Scan a single piece of text with no holes.
    pub fn scan_str(&self, text: &str) -> Result<TokenList, LexError> {
        self.scan(&Template::literal(text))
    }

    fn scan_segment(&self, segment_num: usize, segment: &str, out: &mut Vec<Entry>) -> Result<(), LexError> {
        let first = out.len();
        let mut expected = 0;
        while expected < segment.len() {
            let rest = &segment[expected..];
            let matched = self.token.captures(rest).and_then(|caps| {
                let skipped = caps.name("space").is_some() || caps.name("comment").is_some();
                Some((caps.get(0)?, skipped))
            });
            let Some((found, skipped)) = matched else {
                return Err(LexError::Lexical {
                    remainder: rest.to_owned(),
                    pos: Pos::new(segment_num, expected, segment.len()),
                });
            };

            let pos = Pos::new(segment_num, expected + found.start(), expected + found.end());
            if found.start() != 0 {
                return Err(LexError::Misaligned {
                    token: Token::new(found.as_str(), pos),
                    expected,
                });
            }
            if found.is_empty() {
                return Err(LexError::EmptyToken { pos });
            }
            if !skipped {
                out.push(Entry::Token(Token::new(found.as_str(), pos)));
            }
            expected = pos.after;
        }
        trace!(segment = segment_num, tokens = out.len() - first, "segment scanned");
        Ok(())
    }
}

fn class(source: &str) -> Result<Regex, ComposeError> {
    Ok(Regex::new(source)?)
}

/// Scanned entries of one template.
#[derive(Clone, Debug)]
pub struct TokenList {
    entries: Vec<Entry>,
    lexicon: Arc<Lexicon>,
}

impl TokenList {
    #[inline]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Token texts, with holes rendered as `${i}`.
    pub fn texts(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| match entry {
                Entry::Token(token) => token.text.clone(),
                Entry::Hole(index) => format!("${{{index}}}"),
            })
            .collect()
    }

    /// A cursor at the first entry.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(&self.entries, &self.lexicon)
    }
}
