use crate::backend::{InMemoryBackend, SharedBackend};
use crate::registry::{force_uninit, init_backend_factory};
use std::sync::Arc;

/// RAII guard for in-memory logging that handles cleanup
///
/// Every logger requested through the registry while the guard is alive records into
/// `backend`. Dropping the guard calls force_uninit().
///
/// # Important
/// Tests using this guard MUST be marked with #[serial] since they
/// share global state through the logger registry.
pub struct InMemoryLoggingGuard {
    pub backend: Arc<InMemoryBackend>,
}

impl Default for InMemoryLoggingGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryLoggingGuard {
    pub fn new() -> Self {
        let backend = Arc::new(InMemoryBackend::default());
        let shared = backend.clone();
        init_backend_factory(Arc::new(move |_name: &str| shared.clone() as SharedBackend))
            .expect("Failed to initialize logger factory");
        Self { backend }
    }
}

impl Drop for InMemoryLoggingGuard {
    fn drop(&mut self) {
        force_uninit();
    }
}

/// Initialize in-memory logging for unit tests
///
/// # Important
/// Tests using this function MUST be marked with #[serial] since they
/// share global state through the logger registry.
///
/// # Example
/// ```rust
/// use funclog::test_utils::init_in_memory_logging;
/// use funclog::registry::get_logger;
///
/// // In your test file:
/// // #[test]
/// // #[serial]
/// fn test_example() {
///     let guard = init_in_memory_logging();
///     get_logger("example").info().message("hello");
///     assert_eq!(guard.backend.len(), 1);
///     // Automatic cleanup when guard is dropped
/// }
/// # test_example();
/// ```
pub fn init_in_memory_logging() -> InMemoryLoggingGuard {
    InMemoryLoggingGuard::new()
}
