use funclog::backend::{InMemoryBackend, LogBackend, SharedBackend};
use funclog::errors::Error;
use funclog::prelude::*;
use funclog::registry::{
    LoggerFactoryBuilder, MAX_LEVEL_ENV_VAR, force_uninit, init_backend_factory, is_initialized,
};
use funclog::test_utils::init_in_memory_logging;
use serial_test::serial;
use std::sync::Arc;

mod utils;
use utils::{Book, assert_book};

#[test]
#[serial]
fn test_loggers_share_installed_backend() {
    let guard = init_in_memory_logging();
    assert!(is_initialized());
    let library = get_logger("library");
    library.info().message("opened");
    get_logger("library")
        .warn()
        .loggable("late", &Book::new("Tea", &[], 1902));
    get_logger("shop").error().message("closed");

    let records = guard.backend.records();
    assert_eq!(records.len(), 3);
    assert_book(&records[1].args[0], "Tea", 1902);
    assert_eq!(get_logger("library").name(), library.name());
    drop(guard);
    assert!(!is_initialized());
}

#[test]
#[serial]
fn test_second_install_fails() {
    let _guard = init_in_memory_logging();
    let result = init_backend_factory(Arc::new(|_name: &str| -> funclog::backend::SharedBackend {
        Arc::new(InMemoryBackend::default())
    }));
    assert_eq!(result, Err(Error::AlreadyInitialized()));
}

#[test]
#[serial]
fn test_factory_may_request_loggers() {
    force_uninit();
    let shared = Arc::new(InMemoryBackend::default());
    let audit = shared.clone();
    init_backend_factory(Arc::new(move |name: &str| -> SharedBackend {
        if name != "audit" {
            get_logger("audit").info().message(name);
        }
        audit.clone()
    }))
    .unwrap();

    get_logger("library").info().message("opened");
    assert_eq!(get_logger("audit").name(), "audit");
    let templates: Vec<String> = shared
        .records()
        .into_iter()
        .map(|record| record.template)
        .collect();
    assert_eq!(templates, ["library", "opened"]);
    force_uninit();
}

#[test]
#[serial]
fn test_logger_for_type() {
    let guard = init_in_memory_logging();
    let logger = get_logger_for::<Book>();
    assert!(logger.name().ends_with("Book"));
    logger.debug().with("Test", "pages", || 12);
    assert_eq!(guard.backend.len(), 1);
}

#[test]
#[serial]
fn test_builder_installs_factory() -> anyhow::Result<()> {
    force_uninit();
    let backend = Arc::new(InMemoryBackend::default());
    LoggerFactoryBuilder::default()
        .add_backend(LevelFilter::Info, backend.clone())
        .with_target_max_level("noisy", LevelFilter::Error)
        .build()?;

    let noisy = get_logger("noisy::parser");
    assert!(!noisy.warn().is_enabled());
    noisy.warn().with("Test", "boom", || -> u8 { panic!("evaluated") });
    noisy.error().message("kept");

    let app = get_logger("app");
    assert!(app.info().is_enabled());
    assert!(!app.debug().is_enabled());
    app.info().map("Test", [("k", 1)]);

    assert_eq!(backend.len(), 2);
    assert!(matches!(
        LoggerFactoryBuilder::default().build(),
        Err(Error::AlreadyInitialized())
    ));
    force_uninit();
    Ok(())
}

#[test]
#[serial]
fn test_max_level_from_env() {
    force_uninit();
    // SAFETY: serial tests, no other thread reads the environment concurrently
    unsafe { std::env::set_var(MAX_LEVEL_ENV_VAR, "warn") };
    let backend = Arc::new(InMemoryBackend::default());
    let factory = LoggerFactoryBuilder::default()
        .add_backend(LevelFilter::Trace, backend.clone())
        .build_factory();
    let from_env = factory.backend("app");
    assert!(from_env.is_enabled(Level::Warn));
    assert!(!from_env.is_enabled(Level::Info));

    let overridden = LoggerFactoryBuilder::default()
        .add_backend(LevelFilter::Trace, backend)
        .with_max_level_override(LevelFilter::Debug)
        .build_factory();
    assert!(overridden.backend("app").is_enabled(Level::Debug));

    unsafe { std::env::set_var(MAX_LEVEL_ENV_VAR, "chatty") };
    let ignored = LoggerFactoryBuilder::default()
        .add_backend(LevelFilter::Trace, InMemoryBackend::default())
        .build_factory();
    assert!(ignored.backend("app").is_enabled(Level::Trace));
    unsafe { std::env::remove_var(MAX_LEVEL_ENV_VAR) };
}
