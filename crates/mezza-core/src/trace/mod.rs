mod sink;
mod tracer;

pub use sink::{MemorySink, NullSink, TraceSink};
pub use tracer::{TraceSpan, Tracer};
