use crate::Context;

/// Errors from analysing a template or building the composed pattern.
#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
    /// No context token matches at this point of a literal part, e.g. a
    /// dangling `\` at the end of a part inside `[...]`.
    #[error("cannot scan template part {part} at offset {offset} in {context:?} context")]
    Unscannable {
        part: usize,
        offset: usize,
        context: Context,
    },

    #[error("template has {expected} holes but {found} values were supplied")]
    ValueCount { expected: usize, found: usize },

    #[error("unsupported regex flag `{0}`")]
    UnknownFlag(char),

    #[error(transparent)]
    Regex(#[from] regex::Error),
}
