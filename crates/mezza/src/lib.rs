//! Mezza — execution-context resolution and relationship queries over a
//! record-oriented remote data service.
//!
//! This is the crate handler code depends on. It re-exports the runtime
//! from `mezza-core` and adds:
//!   - `ExecutionContainer` — one operation's context views, service,
//!     schema cache, and tracer in a single working set
//!   - `testkit` — scripted service and context builder for handler tests
#![warn(unreachable_pub)]

mod config;
mod container;

pub mod testkit;

pub use config::ContainerConfig;
pub use container::ExecutionContainer;
pub use mezza_core as core;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{ContainerConfig, ExecutionContainer};
    pub use mezza_core::prelude::*;
}
