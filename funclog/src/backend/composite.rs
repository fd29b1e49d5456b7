use super::{LogBackend, SharedBackend};
use crate::{
    argument::StructuredArgument,
    levels::{Level, LevelFilter},
};

/// Forwards each event to every backend whose own max level accepts it.
pub struct CompositeBackend {
    backends: Vec<(LevelFilter, SharedBackend)>,
}

impl CompositeBackend {
    pub fn new(backends: Vec<(LevelFilter, SharedBackend)>) -> Self {
        Self { backends }
    }

    /// Most verbose level any of the backends can accept.
    pub fn max_level(&self) -> LevelFilter {
        self.backends
            .iter()
            .map(|(max_level, _)| *max_level)
            .max()
            .unwrap_or(LevelFilter::Off)
    }
}

impl LogBackend for CompositeBackend {
    fn is_enabled(&self, level: Level) -> bool {
        // an empty composite is never enabled
        self.backends
            .iter()
            .any(|(max_level, backend)| level <= *max_level && backend.is_enabled(level))
    }

    fn log(&self, level: Level, template: &str, args: &[StructuredArgument]) {
        self.backends.iter().for_each(|(max_level, backend)| {
            if level <= *max_level && backend.is_enabled(level) {
                backend.log(level, template, args);
            }
        });
    }
}
