use pctune::core::analyzer::{
    ProcessClassifier, RecommendationKind, SystemAnalyzer,
};
use pctune::core::profiles::ProfileType;
use pctune::core::telemetry::{CpuMetrics, MemoryMetrics, ProcessMetrics, TelemetryStore};
use std::sync::Arc;

fn store(cores: &[f32], ram: f32, processes: &[&str]) -> Arc<TelemetryStore> {
    let store = Arc::new(TelemetryStore::new());
    store.publish_cpu(CpuMetrics {
        per_core_usage: cores.to_vec(),
        core_count: cores.len(),
        ..Default::default()
    });
    store.publish_memory(MemoryMetrics {
        usage_percent: ram,
        ..Default::default()
    });
    store.publish_processes(
        processes
            .iter()
            .enumerate()
            .map(|(i, name)| ProcessMetrics {
                pid: 1000 + i as u32,
                name: name.to_string(),
                ..Default::default()
            })
            .collect(),
    );
    store
}

fn analyzer(store: Arc<TelemetryStore>) -> SystemAnalyzer {
    SystemAnalyzer::new(store, ProcessClassifier::default())
}

#[test]
fn test_gaming_and_streaming_under_load() {
    let result = analyzer(store(
        &[90.0, 80.0, 70.0, 60.0],
        85.0,
        &["explorer.exe", "FortniteClient-Win64-Shipping.exe", "obs64.exe"],
    ))
    .analyze_system();

    assert!(result.has_gaming_process);
    assert!(result.has_streaming_process);
    assert_eq!(result.process_count, 3);

    let kinds: Vec<_> = result.recommendations.iter().map(|r| r.kind).collect();
    assert_eq!(
        kinds,
        vec![
            RecommendationKind::GamingOpt,
            RecommendationKind::StreamingOpt,
            RecommendationKind::MemoryOpt,
            RecommendationKind::PowerOpt,
        ]
    );
    assert!(result.recommendations[2].description.contains("85%"));
    assert!(result.recommendations[3].description.contains("75%"));
    assert_eq!(
        result.recommendations[0].suggested_profile(),
        Some(ProfileType::Gaming)
    );
}

#[test]
fn test_idle_desktop_suggests_workstation() {
    let recommendations =
        analyzer(store(&[5.0, 3.0], 40.0, &["explorer.exe", "svchost.exe"])).generate_recommendations();

    assert_eq!(recommendations.len(), 1);
    assert_eq!(recommendations[0].kind, RecommendationKind::WorkstationOpt);
    assert_eq!(recommendations[0].priority, 3);
    assert!(!recommendations[0].can_auto_apply);
}

#[test]
fn test_no_telemetry_yet() {
    let result = analyzer(Arc::new(TelemetryStore::new())).analyze_system();
    assert_eq!(result.cpu_usage_percent, 0.0);
    assert_eq!(result.process_count, 0);
    assert_eq!(result.recommendations.len(), 1);
    assert_eq!(result.recommendations[0].kind, RecommendationKind::WorkstationOpt);
}

#[test]
fn test_custom_keywords_from_configuration() {
    let classifier = ProcessClassifier::new(["factorio"], ["vmix"]);
    let analyzer = SystemAnalyzer::new(
        store(&[50.0], 50.0, &["Factorio.exe", "steam.exe"]),
        classifier,
    );

    let result = analyzer.analyze_system();
    assert!(result.has_gaming_process);
    assert!(!result.has_streaming_process);
    assert!(!analyzer.is_gaming_process("steam.exe"));
    assert!(analyzer.is_streaming_process("vMix64.exe"));
}
