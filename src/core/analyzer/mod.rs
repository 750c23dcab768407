//! Rule-based system analysis.
//!
//! Reads telemetry, flags gaming and streaming workloads by process name and turns
//! resource pressure into prioritized recommendations.

mod classifier;
mod recommendation;

pub use classifier::{
    default_gaming_keywords, default_streaming_keywords, ProcessClassifier,
    DEFAULT_GAMING_KEYWORDS, DEFAULT_STREAMING_KEYWORDS,
};
pub use recommendation::{build_recommendations, Recommendation, RecommendationKind};

use serde::Serialize;
use std::sync::Arc;

use crate::core::telemetry::TelemetrySource;

/// Outcome of one analysis cycle. Never persisted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SystemAnalysisResult {
    pub cpu_usage_percent: f32,
    pub ram_usage_percent: f32,
    pub process_count: usize,
    pub has_gaming_process: bool,
    pub has_streaming_process: bool,
    /// Sorted by priority, highest first.
    pub recommendations: Vec<Recommendation>,
}

pub struct SystemAnalyzer {
    telemetry: Arc<dyn TelemetrySource>,
    classifier: ProcessClassifier,
}

impl SystemAnalyzer {
    pub fn new(telemetry: Arc<dyn TelemetrySource>, classifier: ProcessClassifier) -> Self {
        Self {
            telemetry,
            classifier,
        }
    }

    pub fn is_gaming_process(&self, process_name: &str) -> bool {
        self.classifier.is_gaming_process(process_name)
    }

    pub fn is_streaming_process(&self, process_name: &str) -> bool {
        self.classifier.is_streaming_process(process_name)
    }

    /// Analyze the current telemetry. Reads only; no side effects besides logging.
    pub fn analyze_system(&self) -> SystemAnalysisResult {
        log::info!("Starting system analysis");

        let mut result = SystemAnalysisResult::default();
        self.analyze_processes(&mut result);
        self.analyze_resources(&mut result);
        result.recommendations = build_recommendations(&result);

        log::info!(
            "Analysis complete: {} recommendation(s)",
            result.recommendations.len()
        );
        result
    }

    /// Only the recommendations of [`analyze_system`](Self::analyze_system).
    pub fn generate_recommendations(&self) -> Vec<Recommendation> {
        self.analyze_system().recommendations
    }

    fn analyze_processes(&self, result: &mut SystemAnalysisResult) {
        let processes = self.telemetry.processes();
        result.process_count = processes.len();

        for process in &processes {
            let (gaming, streaming) = self.classifier.classify(&process.name);
            if gaming {
                result.has_gaming_process = true;
                log::debug!("Detected gaming process: {}", process.name);
            }
            if streaming {
                result.has_streaming_process = true;
                log::debug!("Detected streaming process: {}", process.name);
            }
        }
    }

    fn analyze_resources(&self, result: &mut SystemAnalysisResult) {
        result.cpu_usage_percent = self.telemetry.cpu().mean_usage();
        result.ram_usage_percent = self.telemetry.memory().usage_percent;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::telemetry::{CpuMetrics, MemoryMetrics, ProcessMetrics, TelemetryStore};

    fn store_with(cores: Vec<f32>, ram: f32, names: &[&str]) -> Arc<TelemetryStore> {
        let store = TelemetryStore::new();
        store.publish_cpu(CpuMetrics {
            core_count: cores.len(),
            per_core_usage: cores,
            ..Default::default()
        });
        store.publish_memory(MemoryMetrics {
            usage_percent: ram,
            ..Default::default()
        });
        store.publish_processes(
            names
                .iter()
                .enumerate()
                .map(|(i, name)| ProcessMetrics {
                    pid: i as u32 + 100,
                    name: name.to_string(),
                    ..Default::default()
                })
                .collect(),
        );
        Arc::new(store)
    }

    fn analyzer(store: Arc<TelemetryStore>) -> SystemAnalyzer {
        SystemAnalyzer::new(store, ProcessClassifier::default())
    }

    #[test]
    fn test_idle_system_recommends_workstation_only() {
        let store = store_with(vec![5.0, 5.0], 40.0, &["explorer.exe", "notepad.exe"]);
        let result = analyzer(store).analyze_system();

        assert_eq!(result.cpu_usage_percent, 5.0);
        assert_eq!(result.process_count, 2);
        let kinds: Vec<_> = result.recommendations.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, vec![RecommendationKind::WorkstationOpt]);
    }

    #[test]
    fn test_saturated_gaming_scenario() {
        let store = store_with(
            vec![80.0, 90.0],
            50.0,
            &["explorer.exe", "VALORANT-Win64-Shipping.exe"],
        );
        let result = analyzer(store).analyze_system();

        assert!(result.has_gaming_process);
        assert!(!result.has_streaming_process);
        let ranked: Vec<_> = result
            .recommendations
            .iter()
            .map(|r| (r.kind, r.priority))
            .collect();
        assert_eq!(
            ranked,
            vec![
                (RecommendationKind::GamingOpt, 10),
                (RecommendationKind::PowerOpt, 6)
            ]
        );
    }

    #[test]
    fn test_empty_telemetry_is_idle() {
        let result = analyzer(Arc::new(TelemetryStore::new())).analyze_system();
        assert_eq!(result.cpu_usage_percent, 0.0);
        assert_eq!(result.process_count, 0);
        assert_eq!(result.recommendations.len(), 1);
        assert_eq!(
            result.recommendations[0].kind,
            RecommendationKind::WorkstationOpt
        );
    }

    #[test]
    fn test_generate_recommendations_matches_analysis() {
        let store = store_with(vec![75.0], 85.0, &["obs64.exe"]);
        let analyzer = analyzer(store);
        let full = analyzer.analyze_system().recommendations;
        let only = analyzer.generate_recommendations();
        assert_eq!(full, only);
        assert_eq!(only[0].kind, RecommendationKind::StreamingOpt);
    }

    #[test]
    fn test_injected_keywords_drive_detection() {
        let store = store_with(vec![10.0], 10.0, &["factorio.exe"]);
        let analyzer = SystemAnalyzer::new(
            store,
            ProcessClassifier::new(["factorio"], Vec::<String>::new()),
        );
        assert!(analyzer.analyze_system().has_gaming_process);
        assert!(!analyzer.is_gaming_process("steam.exe"));
    }
}
