//! Test kit for host handler code: a scripted service and a ready-made
//! execution context, so operation handlers can be unit-tested without a
//! platform.

mod context;
mod service;

pub use context::{BoundaryContext, ContextBuilder};
pub use service::{Call, ScriptedService};
