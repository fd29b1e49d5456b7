//! Structured logging facade with lazily evaluated arguments
//!
//! `funclog` sits between application code and a leveled logging backend. Each call names a
//! level, a message template and its arguments in one of a few shapes: structured values,
//! labeled computations, mappings or key/value pairs. Nothing about the arguments is evaluated
//! unless the backend has the level enabled, so expensive diagnostics can be left in hot paths.
//!
//! Arguments are normalized into an ordered list of structured fields ([`argument::StructuredArgument`])
//! before reaching the backend:
//! - types implementing [`loggable::Loggable`] render themselves as a set of properties, by
//!   default every declared field (`#[derive(LogFields)]`), or a custom selection;
//! - sequences become one array field;
//! - mappings become one field holding all of their entries;
//! - anything else becomes a `label=value` field.
//!
//! # Examples
//! ```
//! use funclog::prelude::*;
//!
//! #[derive(LogFields)]
//! struct Book {
//!     title: String,
//!     authors: Vec<String>,
//!     published_year: u16,
//! }
//!
//! impl Loggable for Book {
//!     fn log_format(&self) -> Option<Builder> {
//!         Some(
//!             Builder::new()
//!                 .with("title", &self.title)
//!                 .with("year", self.published_year),
//!         )
//!     }
//! }
//!
//! // without an installed factory, loggers forward to the `log` crate
//! let logger = get_logger("library");
//! let book = Book {
//!     title: String::from("Dune"),
//!     authors: vec![String::from("Frank Herbert")],
//!     published_year: 1965,
//! };
//!
//! logger.info().loggable("Checked out {}", &book);
//! logger.debug().with("Shelf {}", "count", || 42);
//! logger.warn().pairs(
//!     "Late return",
//!     vec![kvp("days", 3), kfp("fine", || 0.75), kvp("ignored", &book)],
//! );
//! ```

// crate-specific lint exceptions:
#![allow(clippy::missing_errors_doc)]

extern crate self as funclog;

#[macro_use]
extern crate lazy_static;

pub mod arg;
pub mod argument;
pub mod backend;
pub mod errors;
pub mod kv;
pub mod levels;
pub mod loggable;
pub mod logger;
pub mod normalize;
pub mod registry;
pub mod test_utils;
pub mod value;

#[macro_use]
mod macros;

pub mod prelude {
    pub use crate::arg::{Arg, IntoArg};
    pub use crate::argument::StructuredArgument;
    pub use crate::kv::{KeyValuePair, kfp, kfp1, kfp2, kvp};
    pub use crate::levels::*;
    pub use crate::loggable::{Builder, LogFields, Loggable};
    pub use crate::logger::{LevelLogger, Logger};
    pub use crate::registry::{get_logger, get_logger_for};
    pub use crate::value::Value;
    pub use crate::kv_pairs;
    pub use funclog_proc_macros::*;
}
