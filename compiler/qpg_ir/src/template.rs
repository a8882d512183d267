//! Literal text interleaved with holes.
//!
//! A template with `n` holes has exactly `n + 1` literal segments. Hole `i`
//! sits between segment `i` and segment `i + 1`. Grammar authors put action
//! closures in the holes; program authors put runtime values there.

use std::fmt;

/// Conventional hole marker for [`Template::split`].
pub const HOLE_MARKER: &str = "${}";

/// Literal segments separated by holes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Template {
    segments: Vec<String>,
}

impl Template {
    /// Build a template from its literal segments.
    ///
    /// An empty iterator yields a template with one empty segment, so the
    /// "segments = holes + 1" invariant always holds.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            segments.push(String::new());
        }
        Template { segments }
    }

    /// A template with no holes.
    pub fn literal(text: impl Into<String>) -> Self {
        Template {
            segments: vec![text.into()],
        }
    }

    /// Cut `text` at every occurrence of `marker`.
    ///
    /// ```text
    /// Template::split("a ${} b ${}", "${}")  =>  ["a ", " b ", ""]
    /// ```
    pub fn split(text: &str, marker: &str) -> Self {
        if marker.is_empty() {
            return Template::literal(text);
        }
        Template::new(text.split(marker))
    }

    /// The literal segments, in order.
    #[inline]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of holes between the segments.
    #[inline]
    pub fn hole_count(&self) -> usize {
        self.segments.len() - 1
    }
}

impl From<&str> for Template {
    fn from(text: &str) -> Self {
        Template::literal(text)
    }
}

impl From<String> for Template {
    fn from(text: String) -> Self {
        Template::literal(text)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "${{{}}}", i - 1)?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}
