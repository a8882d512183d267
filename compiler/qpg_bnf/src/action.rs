//! Semantic actions placed in grammar holes.

use std::fmt;
use std::sync::Arc;

use qpg_ir::Value;

type ActionFn = dyn Fn(Vec<Value>) -> Option<Value> + Send + Sync;

/// Builds a sequence's value from the values of its factors.
///
/// Returning `None` makes the sequence fail as if a factor had not matched.
#[derive(Clone)]
pub struct Action(Arc<ActionFn>);

impl Action {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Vec<Value>) -> Value + Send + Sync + 'static,
    {
        Action(Arc::new(move |values| Some(f(values))))
    }

    pub fn fallible<F>(f: F) -> Self
    where
        F: Fn(Vec<Value>) -> Option<Value> + Send + Sync + 'static,
    {
        Action(Arc::new(f))
    }

    /// An action that always fails.
    pub fn fail() -> Self {
        Action(Arc::new(|_| None))
    }

    #[inline]
    pub fn call(&self, values: Vec<Value>) -> Option<Value> {
        (self.0)(values)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action").finish_non_exhaustive()
    }
}
