use super::LogBackend;
use crate::{
    argument::StructuredArgument,
    levels::{Level, LevelFilter},
};
use chrono::{DateTime, Utc};
use std::sync::{
    Mutex,
    atomic::{AtomicU32, AtomicUsize, Ordering},
};

/// A log call as it reached the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub time: DateTime<Utc>,
    pub level: Level,
    pub template: String,
    pub args: Vec<StructuredArgument>,
}

impl LogRecord {
    /// Template with its `{}` placeholders replaced by the fields, in order.
    pub fn formatted_message(&self) -> String {
        super::log_interop::format_template(&self.template, &self.args)
    }
}

pub struct MemBackendState {
    pub records: Vec<LogRecord>,
}

/// for tests where we want to inspect the collected data
pub struct InMemoryBackend {
    pub state: Mutex<MemBackendState>,
    max_level: AtomicU32,
    enabled_checks: AtomicUsize,
}

impl InMemoryBackend {
    pub fn new(max_level: LevelFilter) -> Self {
        let state = MemBackendState {
            records: Vec::new(),
        };
        Self {
            state: Mutex::new(state),
            max_level: AtomicU32::new(max_level as u32),
            enabled_checks: AtomicUsize::new(0),
        }
    }

    pub fn max_level(&self) -> LevelFilter {
        LevelFilter::from_u32(self.max_level.load(Ordering::Relaxed)).unwrap_or(LevelFilter::Off)
    }

    pub fn set_max_level(&self, max_level: LevelFilter) {
        self.max_level.store(max_level as u32, Ordering::Relaxed);
    }

    /// Number of times the facade asked whether a level was enabled.
    pub fn enabled_checks(&self) -> usize {
        self.enabled_checks.load(Ordering::Relaxed)
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.state.lock().unwrap().records.clone()
    }

    pub fn last_record(&self) -> Option<LogRecord> {
        self.state.lock().unwrap().records.last().cloned()
    }

    pub fn len(&self) -> usize {
        self.state.lock().unwrap().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.state.lock().unwrap().records.clear();
        self.enabled_checks.store(0, Ordering::Relaxed);
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new(LevelFilter::Trace)
    }
}

impl LogBackend for InMemoryBackend {
    fn is_enabled(&self, level: Level) -> bool {
        self.enabled_checks.fetch_add(1, Ordering::Relaxed);
        level <= self.max_level()
    }

    fn log(&self, level: Level, template: &str, args: &[StructuredArgument]) {
        let record = LogRecord {
            time: Utc::now(),
            level,
            template: template.to_owned(),
            args: args.to_vec(),
        };
        self.state.lock().unwrap().records.push(record);
    }
}
