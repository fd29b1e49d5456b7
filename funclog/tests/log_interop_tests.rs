use funclog::backend::LogCrateBackend;
use funclog::prelude::*;
use funclog::registry::force_uninit;
use serial_test::serial;
use std::sync::{Arc, Mutex, Once};

mod utils;
use utils::sample_books;

#[derive(Debug, Clone)]
struct Captured {
    level: log::Level,
    target: String,
    message: String,
    kvs: Vec<(String, String)>,
}

struct CaptureLogger {
    records: Mutex<Vec<Captured>>,
}

struct KvCollector(Vec<(String, String)>);

impl<'kvs> log::kv::VisitSource<'kvs> for KvCollector {
    fn visit_pair(
        &mut self,
        key: log::kv::Key<'kvs>,
        value: log::kv::Value<'kvs>,
    ) -> Result<(), log::kv::Error> {
        self.0.push((key.to_string(), value.to_string()));
        Ok(())
    }
}

impl log::Log for CaptureLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.target() != "muted"
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut kvs = KvCollector(Vec::new());
        record.key_values().visit(&mut kvs).unwrap();
        self.records.lock().unwrap().push(Captured {
            level: record.level(),
            target: record.target().to_owned(),
            message: record.args().to_string(),
            kvs: kvs.0,
        });
    }

    fn flush(&self) {}
}

static CAPTURE: CaptureLogger = CaptureLogger {
    records: Mutex::new(Vec::new()),
};

fn install_capture() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        log::set_logger(&CAPTURE).unwrap();
        log::set_max_level(log::LevelFilter::Debug);
    });
    CAPTURE.records.lock().unwrap().clear();
}

fn captured() -> Vec<Captured> {
    CAPTURE.records.lock().unwrap().clone()
}

fn make_logger(target: &str) -> Logger {
    Logger::new(target, Arc::new(LogCrateBackend::new(target)))
}

#[test]
#[serial]
fn test_message_and_key_values() {
    install_capture();
    let logger = make_logger("funclog::interop");
    logger.info().with("Test: {}", "destination", || "Unknown");

    let records = captured();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.level, log::Level::Info);
    assert_eq!(record.target, "funclog::interop");
    assert_eq!(record.message, "Test: destination=Unknown");
    assert_eq!(
        record.kvs,
        vec![(String::from("destination"), String::from("Unknown"))]
    );
}

#[test]
#[serial]
fn test_entries_become_key_values() {
    install_capture();
    let logger = make_logger("funclog::interop");
    let (one, two, _) = sample_books();
    logger.warn().loggable2("Test {}", &one, &two);

    let record = &captured()[0];
    assert_eq!(record.message, "Test {title=one, year=1999}");
    assert_eq!(record.kvs.len(), 4);
    assert_eq!(record.kvs[3], (String::from("year"), String::from("2000")));
}

#[test]
#[serial]
fn test_log_crate_filters_apply() {
    install_capture();
    let logger = make_logger("funclog::interop");
    assert!(logger.debug().is_enabled());
    assert!(!logger.trace().is_enabled());
    logger
        .trace()
        .with("Test", "boom", || -> i32 { panic!("evaluated") });

    let muted = make_logger("muted");
    assert!(!muted.error().is_enabled());
    muted.error().message("dropped");
    assert!(captured().is_empty());
}

#[test]
#[serial]
fn test_registry_defaults_to_log_crate() {
    install_capture();
    force_uninit();
    get_logger("funclog::default")
        .error()
        .pairs("Capitals", vec![kvp("Idaho", "Boise")]);

    // drop the registry's own funclog::registry debug record about the fallback
    let records: Vec<Captured> = captured()
        .into_iter()
        .filter(|record| record.target == "funclog::default")
        .collect();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.level, log::Level::Error);
    assert_eq!(record.target, "funclog::default");
    assert_eq!(record.message, "Capitals");
    assert_eq!(
        record.kvs,
        vec![(String::from("Idaho"), String::from("Boise"))]
    );
}
