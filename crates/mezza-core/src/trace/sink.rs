use std::sync::{Mutex, MutexGuard, PoisonError};

///
/// TraceSink
///
/// Where trace lines go. Hosts adapt their platform tracing service
/// behind this; indentation and section framing happen before the text
/// reaches the sink.
///

pub trait TraceSink: Send + Sync {
    fn line(&self, text: &str);
}

///
/// NullSink
///

#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl TraceSink for NullSink {
    fn line(&self, _: &str) {}
}

///
/// MemorySink
///
/// Collects lines for tests and for hosts that flush a whole operation's
/// trace at once.
///

#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lock().clone()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TraceSink for MemorySink {
    fn line(&self, text: &str) {
        self.lock().push(text.to_string());
    }
}
