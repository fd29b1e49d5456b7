//! Process-wide logger cache
//!
//! Loggers are created on first request and cached by name. Their backend comes from the
//! installed [`BackendFactory`], or bridges to the `log` crate when none is installed.
//! Code that wants to stay independent of global state can build a [`Logger`] directly with
//! [`Logger::new`].
pub use crate::errors::{Error, Result};
use crate::{
    backend::{CompositeBackend, FilteredBackend, LogBackend, LogCrateBackend, SharedBackend},
    levels::LevelFilter,
    logger::Logger,
};
use std::{
    collections::HashMap,
    str::FromStr,
    sync::{Arc, Mutex},
};

/// Environment variable read by [`LoggerFactoryBuilder`] when no max level override is given.
pub const MAX_LEVEL_ENV_VAR: &str = "FUNCLOG_MAX_LEVEL";

/// Creates the backend of a newly requested logger.
///
/// Called outside the registry lock, so a factory may request other loggers.
pub trait BackendFactory: Send + Sync {
    fn backend(&self, logger_name: &str) -> SharedBackend;
}

impl<F> BackendFactory for F
where
    F: Fn(&str) -> SharedBackend + Send + Sync,
{
    fn backend(&self, logger_name: &str) -> SharedBackend {
        self(logger_name)
    }
}

struct Registry {
    factory: Option<Arc<dyn BackendFactory>>,
    loggers: HashMap<String, Logger>,
}

lazy_static! {
    static ref G_REGISTRY: Mutex<Registry> = Mutex::new(Registry {
        factory: None,
        loggers: HashMap::new(),
    });
}

/// Installs the factory used for every logger requested from now on.
///
/// Loggers handed out before the call keep their backend.
pub fn init_backend_factory(factory: Arc<dyn BackendFactory>) -> Result<()> {
    let mut registry = G_REGISTRY.lock().unwrap();
    if registry.factory.is_some() {
        log::warn!("logger factory already initialized");
        return Err(Error::AlreadyInitialized());
    }
    registry.factory = Some(factory);
    registry.loggers.clear();
    Ok(())
}

pub fn is_initialized() -> bool {
    G_REGISTRY.lock().unwrap().factory.is_some()
}

/// Removes the installed factory and forgets every cached logger. Meant for tests.
pub fn force_uninit() {
    let mut registry = G_REGISTRY.lock().unwrap();
    registry.factory = None;
    registry.loggers.clear();
}

/// Logger named `name`, created on first request.
///
/// The backend is built without holding the registry lock. When two threads race on a new
/// name, the first logger stored wins.
pub fn get_logger(name: &str) -> Logger {
    let factory = {
        let registry = G_REGISTRY.lock().unwrap();
        if let Some(logger) = registry.loggers.get(name) {
            return logger.clone();
        }
        registry.factory.clone()
    };
    let backend: SharedBackend = match factory {
        Some(factory) => factory.backend(name),
        None => {
            log::debug!("no logger factory installed, {name} forwards to the log crate");
            Arc::new(LogCrateBackend::new(name))
        }
    };
    let mut registry = G_REGISTRY.lock().unwrap();
    registry
        .loggers
        .entry(name.to_owned())
        .or_insert_with(|| Logger::new(name, backend))
        .clone()
}

/// Logger named after the type `T`.
pub fn get_logger_for<T: ?Sized>() -> Logger {
    get_logger(std::any::type_name::<T>())
}

/// Assembles the backend factory of the process.
///
/// ```
/// use funclog::backend::{InMemoryBackend, LogBackend};
/// use funclog::prelude::*;
/// use funclog::registry::{BackendFactory, LoggerFactoryBuilder};
///
/// let factory = LoggerFactoryBuilder::default()
///     .add_backend(LevelFilter::Debug, InMemoryBackend::default())
///     .with_target_max_level("noisy::", LevelFilter::Warn)
///     .build_factory();
/// assert!(factory.backend("app").is_enabled(Level::Debug));
/// assert!(!factory.backend("noisy::parser").is_enabled(Level::Info));
/// ```
#[derive(Default)]
pub struct LoggerFactoryBuilder {
    factory: Option<Arc<dyn BackendFactory>>,
    backends: Vec<(LevelFilter, SharedBackend)>,
    target_max_levels: Vec<(String, LevelFilter)>,
    max_level_override: Option<LevelFilter>,
}

impl LoggerFactoryBuilder {
    /// Backend created per logger name. Defaults to the `log` crate bridge when no backend is
    /// added either.
    #[must_use]
    pub fn with_backend_factory<F>(mut self, factory: F) -> Self
    where
        F: BackendFactory + 'static,
    {
        self.factory = Some(Arc::new(factory));
        self
    }

    /// Backend shared by every logger, receiving events up to `max_level`.
    #[must_use]
    pub fn add_backend<B>(mut self, max_level: LevelFilter, backend: B) -> Self
    where
        B: LogBackend + 'static,
    {
        let backend: SharedBackend = Arc::new(backend);
        self.backends.push((max_level, backend));
        self
    }

    /// Caps loggers whose name starts with `prefix`. The longest matching prefix wins and
    /// replaces the global cap.
    #[must_use]
    pub fn with_target_max_level(mut self, prefix: impl Into<String>, filter: LevelFilter) -> Self {
        self.target_max_levels.push((prefix.into(), filter));
        self
    }

    /// Programmatic override
    #[must_use]
    pub fn with_max_level_override(mut self, filter: LevelFilter) -> Self {
        self.max_level_override = Some(filter);
        self
    }

    pub fn build_factory(self) -> Arc<dyn BackendFactory> {
        let max_level = self.max_level_override.or_else(max_level_from_env);
        let mut target_max_levels = self.target_max_levels;
        target_max_levels.sort_by_key(|(prefix, _)| prefix.len().wrapping_neg());
        let factory = match self.factory {
            Some(factory) => Some(factory),
            None if self.backends.is_empty() => Some(Arc::new(|name: &str| -> SharedBackend {
                Arc::new(LogCrateBackend::new(name))
            }) as Arc<dyn BackendFactory>),
            None => None,
        };
        Arc::new(ConfiguredFactory {
            factory,
            shared: self.backends,
            target_max_levels,
            max_level,
        })
    }

    /// Installs the factory in the process-wide registry.
    pub fn build(self) -> Result<()> {
        init_backend_factory(self.build_factory())
    }
}

fn max_level_from_env() -> Option<LevelFilter> {
    let value = std::env::var(MAX_LEVEL_ENV_VAR).ok()?;
    match LevelFilter::from_str(&value) {
        Ok(filter) => Some(filter),
        Err(e) => {
            log::warn!("ignoring {MAX_LEVEL_ENV_VAR}: {e}");
            None
        }
    }
}

struct ConfiguredFactory {
    factory: Option<Arc<dyn BackendFactory>>,
    shared: Vec<(LevelFilter, SharedBackend)>,
    target_max_levels: Vec<(String, LevelFilter)>,
    max_level: Option<LevelFilter>,
}

impl ConfiguredFactory {
    fn find_max_match(&self, logger_name: &str) -> Option<LevelFilter> {
        self.target_max_levels
            .iter()
            .find(|(prefix, _)| logger_name.starts_with(prefix.as_str()))
            .map(|(_, filter)| *filter)
    }
}

impl BackendFactory for ConfiguredFactory {
    fn backend(&self, logger_name: &str) -> SharedBackend {
        let mut backends = self.shared.clone();
        if let Some(factory) = &self.factory {
            backends.insert(0, (LevelFilter::Trace, factory.backend(logger_name)));
        }
        let backend: SharedBackend = if backends.len() == 1 && backends[0].0 == LevelFilter::Trace
        {
            backends.remove(0).1
        } else {
            Arc::new(CompositeBackend::new(backends))
        };
        match self.find_max_match(logger_name).or(self.max_level) {
            Some(max_level) => Arc::new(FilteredBackend::new(max_level, backend)),
            None => backend,
        }
    }
}
