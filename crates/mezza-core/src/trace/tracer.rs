use crate::trace::TraceSink;
use std::{cell::Cell, sync::Arc};

///
/// Tracer
///
/// Sectioned trace front end for one operation. The sink is shared and
/// thread-safe; the section depth is operation-local state, so a tracer
/// stays on the thread it was created on.
///

pub struct Tracer {
    sink: Arc<dyn TraceSink>,
    depth: Cell<usize>,
}

impl Tracer {
    #[must_use]
    pub fn new(sink: Arc<dyn TraceSink>) -> Self {
        Self {
            sink,
            depth: Cell::new(0),
        }
    }

    /// Writes one line, indented two spaces per open section.
    pub fn line(&self, text: &str) {
        let indent = "  ".repeat(self.depth.get());
        self.sink.line(&format!("{indent}{text}"));
    }

    /// Logs the label and opens a section.
    pub fn enter(&self, label: &str) {
        self.line(label);
        self.depth.set(self.depth.get() + 1);
    }

    /// Closes the innermost section. Saturating; an unbalanced leave is
    /// ignored rather than underflowing.
    pub fn leave(&self) {
        self.depth.set(self.depth.get().saturating_sub(1));
    }

    /// Section scoped to the guard's lifetime.
    #[must_use]
    pub fn span(&self, label: &str) -> TraceSpan<'_> {
        self.enter(label);
        TraceSpan { tracer: self }
    }
}

///
/// TraceSpan
///

pub struct TraceSpan<'a> {
    tracer: &'a Tracer,
}

impl Drop for TraceSpan<'_> {
    fn drop(&mut self) {
        self.tracer.leave();
    }
}

///
/// TESTS
///
