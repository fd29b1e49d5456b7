//! Leveled logging engines the facade forwards to
mod sink;
pub use sink::*;

mod composite;
pub use composite::*;

pub mod in_memory;
pub use in_memory::InMemoryBackend;

pub mod log_interop;
pub use log_interop::LogCrateBackend;
