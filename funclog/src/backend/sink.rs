use crate::{argument::StructuredArgument, levels::Level, levels::LevelFilter};
use std::sync::Arc;

pub type BoxedBackend = Box<dyn LogBackend>;
pub type SharedBackend = Arc<dyn LogBackend>;

/// interface needed by the facade to emit log events
///
/// Implementations are shared between threads and called concurrently.
pub trait LogBackend: Send + Sync {
    /// Consulted before any argument of a call is evaluated.
    fn is_enabled(&self, level: Level) -> bool;

    /// Receives the template verbatim; placeholder substitution is up to the backend and the
    /// number of fields does not have to match the number of placeholders.
    fn log(&self, level: Level, template: &str, args: &[StructuredArgument]);
}

impl<T: LogBackend + ?Sized> LogBackend for Arc<T> {
    fn is_enabled(&self, level: Level) -> bool {
        (**self).is_enabled(level)
    }

    fn log(&self, level: Level, template: &str, args: &[StructuredArgument]) {
        (**self).log(level, template, args);
    }
}

impl<T: LogBackend + ?Sized> LogBackend for Box<T> {
    fn is_enabled(&self, level: Level) -> bool {
        (**self).is_enabled(level)
    }

    fn log(&self, level: Level, template: &str, args: &[StructuredArgument]) {
        (**self).log(level, template, args);
    }
}

/// for tests where the data can be dropped
pub struct NullBackend {}

impl LogBackend for NullBackend {
    fn is_enabled(&self, _level: Level) -> bool {
        false
    }

    fn log(&self, _level: Level, _template: &str, _args: &[StructuredArgument]) {}
}

/// Caps the verbosity of another backend.
pub struct FilteredBackend {
    max_level: LevelFilter,
    inner: SharedBackend,
}

impl FilteredBackend {
    pub fn new(max_level: LevelFilter, inner: SharedBackend) -> Self {
        Self { max_level, inner }
    }

    pub fn max_level(&self) -> LevelFilter {
        self.max_level
    }
}

impl LogBackend for FilteredBackend {
    fn is_enabled(&self, level: Level) -> bool {
        level <= self.max_level && self.inner.is_enabled(level)
    }

    fn log(&self, level: Level, template: &str, args: &[StructuredArgument]) {
        if level <= self.max_level {
            self.inner.log(level, template, args);
        }
    }
}
