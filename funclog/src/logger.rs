//! Level-gated logging entry point
//!
//! Every call first asks the backend whether its level is enabled. When it is not, the call
//! returns before any argument is looked at: deferred computations are not called and structured
//! values are not asked for their representation. When it is, the arguments are normalized into
//! fields and handed to the backend in a single `log` call.
//!
//! ```
//! use funclog::prelude::*;
//! use funclog::backend::InMemoryBackend;
//! use std::sync::Arc;
//!
//! let backend = Arc::new(InMemoryBackend::new(LevelFilter::Info));
//! let logger = Logger::new("shipping", backend.clone());
//!
//! logger.debug().with("Skipped", "cost", || -> u64 { unreachable!() });
//! logger
//!     .info()
//!     .apply("Greeting {}", "greeting", |name: &str| format!("Hello {name}"), "World");
//!
//! let record = backend.last_record().unwrap();
//! assert_eq!(backend.len(), 1);
//! assert_eq!(record.formatted_message(), "Greeting greeting=Hello World");
//! ```
use crate::{
    arg::IntoArg,
    argument::StructuredArgument,
    backend::SharedBackend,
    kv::KeyValuePair,
    levels::{Level, STATIC_MAX_LEVEL},
    loggable::Loggable,
    normalize::{structure, structure_loggables, structure_map, structure_pairs},
};
use std::{fmt, sync::Arc};

/// Named handle forwarding to a backend.
///
/// Cheap to clone; clones share the backend.
#[derive(Clone)]
pub struct Logger {
    name: Arc<str>,
    backend: SharedBackend,
}

impl Logger {
    pub fn new(name: impl AsRef<str>, backend: SharedBackend) -> Self {
        Self {
            name: Arc::from(name.as_ref()),
            backend,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn backend(&self) -> &SharedBackend {
        &self.backend
    }

    #[inline]
    pub fn is_enabled(&self, level: Level) -> bool {
        level <= STATIC_MAX_LEVEL && self.backend.is_enabled(level)
    }

    pub fn at(&self, level: Level) -> LevelLogger<'_> {
        LevelLogger {
            logger: self,
            level,
        }
    }

    pub fn trace(&self) -> LevelLogger<'_> {
        self.at(Level::Trace)
    }

    pub fn debug(&self) -> LevelLogger<'_> {
        self.at(Level::Debug)
    }

    pub fn info(&self) -> LevelLogger<'_> {
        self.at(Level::Info)
    }

    pub fn warn(&self) -> LevelLogger<'_> {
        self.at(Level::Warn)
    }

    pub fn error(&self) -> LevelLogger<'_> {
        self.at(Level::Error)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger").field("name", &self.name).finish()
    }
}

/// Call shapes of a [`Logger`] bound to one level.
///
/// The template is forwarded verbatim; its `{}` placeholders are filled by the backend.
#[derive(Clone, Copy)]
pub struct LevelLogger<'l> {
    logger: &'l Logger,
    level: Level,
}

impl LevelLogger<'_> {
    pub fn level(&self) -> Level {
        self.level
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.logger.is_enabled(self.level)
    }

    fn forward(&self, template: &str, args: &[StructuredArgument]) {
        self.logger.backend.log(self.level, template, args);
    }

    /// Message without fields.
    pub fn message(&self, template: &str) {
        if self.is_enabled() {
            self.forward(template, &[]);
        }
    }

    /// Fields that are already structured, forwarded as they are.
    pub fn arguments(&self, template: &str, args: &[StructuredArgument]) {
        if self.is_enabled() {
            self.forward(template, args);
        }
    }

    /// One structured value.
    pub fn loggable<L: Loggable>(&self, template: &str, value: L) {
        if self.is_enabled() {
            self.forward(template, &[value.log()]);
        }
    }

    /// Two structured values, possibly of different types.
    pub fn loggable2<A: Loggable, B: Loggable>(&self, template: &str, first: A, second: B) {
        if self.is_enabled() {
            self.forward(template, &[first.log(), second.log()]);
        }
    }

    /// Any number of structured values, one field each, in order.
    ///
    /// Values of different types can be passed as `&[&dyn Loggable]`.
    pub fn loggables<L: Loggable>(&self, template: &str, values: &[L]) {
        if self.is_enabled() {
            self.forward(template, &structure_loggables(values));
        }
    }

    /// One labeled computation, called only if the level is enabled.
    pub fn with<'a, F, R>(&self, template: &str, label: &str, func: F)
    where
        F: FnOnce() -> R,
        R: IntoArg<'a>,
    {
        if self.is_enabled() {
            self.forward(template, &[structure(label, func().into_arg())]);
        }
    }

    /// Two labeled computations, called in order only if the level is enabled.
    pub fn with2<'a, F, R, G, S>(
        &self,
        template: &str,
        first_label: &str,
        first: F,
        second_label: &str,
        second: G,
    ) where
        F: FnOnce() -> R,
        R: IntoArg<'a>,
        G: FnOnce() -> S,
        S: IntoArg<'a>,
    {
        if self.is_enabled() {
            let first = structure(first_label, first().into_arg());
            let second = structure(second_label, second().into_arg());
            self.forward(template, &[first, second]);
        }
    }

    /// A labeled one-argument function, applied to `param` only if the level is enabled.
    pub fn apply<'a, F, T, R>(&self, template: &str, label: &str, func: F, param: T)
    where
        F: FnOnce(T) -> R,
        R: IntoArg<'a>,
    {
        if self.is_enabled() {
            self.forward(template, &[structure(label, func(param).into_arg())]);
        }
    }

    /// A labeled two-argument function, applied only if the level is enabled.
    pub fn apply2<'a, F, T, U, R>(&self, template: &str, label: &str, func: F, first: T, second: U)
    where
        F: FnOnce(T, U) -> R,
        R: IntoArg<'a>,
    {
        if self.is_enabled() {
            self.forward(template, &[structure(label, func(first, second).into_arg())]);
        }
    }

    /// One field per entry, labeled by its key, in the iteration order of `entries`.
    pub fn map<'a, I, K, V>(&self, template: &str, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: IntoArg<'a>,
    {
        if self.is_enabled() {
            self.forward(template, &structure_map(entries));
        }
    }

    /// One field per pair, in order.
    ///
    /// A pair whose value is a structured value or a mapping yields that value's own fields
    /// and its key is not used.
    pub fn pairs<'a, I>(&self, template: &str, pairs: I)
    where
        I: IntoIterator<Item = KeyValuePair<'a>>,
    {
        if self.is_enabled() {
            self.forward(template, &structure_pairs(pairs));
        }
    }
}

impl fmt::Debug for LevelLogger<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LevelLogger")
            .field("logger", &self.logger.name())
            .field("level", &self.level)
            .finish()
    }
}
