use pctune::core::telemetry::{
    sample_once, TelemetryCategory, TelemetryRuntime, TelemetrySource, TelemetryStore,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[test]
fn test_sample_once_fills_store() {
    let store = TelemetryStore::new();
    sample_once(&store);

    assert!(store.memory().total_bytes > 0);
    assert!(!store.cpu().per_core_usage.is_empty());
    assert!(!store.processes().is_empty());
    assert!(store.updated_at(TelemetryCategory::Cpu).is_some());
}

#[test]
fn test_runtime_samples_and_shuts_down() {
    let store = Arc::new(TelemetryStore::new());
    let runtime = TelemetryRuntime::start(store.clone(), 10).unwrap();
    assert_eq!(runtime.polling_interval(), Duration::from_millis(100));

    let deadline = Instant::now() + Duration::from_secs(5);
    while store.updated_at(TelemetryCategory::Memory).is_none() && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(20));
    }
    assert!(store.updated_at(TelemetryCategory::Memory).is_some());

    assert_eq!(runtime.set_polling_interval(9000), Duration::from_millis(5000));
    runtime.shutdown();
}
