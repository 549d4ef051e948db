//! Compensation engine for multi-store operations.
//!
//! Stores are mutated one at a time with no cross-store transaction, so every
//! manager operation that touches more than one store records the inverse of
//! each committed step. On a later failure the recorded inverses run in
//! reverse order before the original error is returned. A failing inverse is
//! logged and counted but never replaces the primary error.

use std::future::Future;
use std::pin::Pin;

use tracing::warn;

use crate::error::OpResult;

type UndoFuture = Pin<Box<dyn Future<Output = OpResult<()>> + Send>>;
type UndoFn = Box<dyn FnOnce() -> UndoFuture + Send>;

/// Undo log for one in-flight operation.
pub struct Saga {
    operation: &'static str,
    undo: Vec<(&'static str, UndoFn)>,
}

impl Saga {
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            undo: Vec::new(),
        }
    }

    /// Record the inverse of a step that just committed. `step` names the
    /// forward action for the log line emitted if the inverse later fails.
    pub fn push_undo<F, Fut>(&mut self, step: &'static str, undo: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = OpResult<()>> + Send + 'static,
    {
        self.undo.push((step, Box::new(move || Box::pin(undo()))));
    }

    /// Gate the next step: on failure, unwind everything recorded so far and
    /// propagate the step's own error.
    pub async fn step<T>(&mut self, result: OpResult<T>) -> OpResult<T> {
        match result {
            Ok(value) => Ok(value),
            Err(err) => {
                self.unwind().await;
                Err(err)
            }
        }
    }

    /// Run all recorded inverses, most recent first. Failures are logged and
    /// counted; the unwind always runs to completion.
    pub async fn unwind(&mut self) {
        while let Some((step, undo)) = self.undo.pop() {
            if let Err(err) = undo().await {
                metrics::counter!("catalog_saga_unwind_failures_total").increment(1);
                warn!(
                    operation = self.operation,
                    step,
                    error = %err,
                    "compensation failed; stores may be inconsistent"
                );
            }
        }
    }

    /// The operation succeeded; drop the undo log without running it.
    pub fn commit(mut self) {
        self.undo.clear();
    }
}

impl Drop for Saga {
    fn drop(&mut self) {
        // An unwind cannot run here (no async in drop); a non-empty log at
        // drop means a code path returned without commit() or step().
        if !self.undo.is_empty() {
            warn!(
                operation = self.operation,
                pending = self.undo.len(),
                "saga dropped with pending compensation steps"
            );
        }
    }
}
