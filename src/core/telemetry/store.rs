use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use super::metrics::*;

/// What the analyzer needs from telemetry.
///
/// Implementations must hand out whole values per category: a reader never sees
/// a partially written snapshot.
pub trait TelemetrySource: Send + Sync {
    fn cpu(&self) -> CpuMetrics;
    fn memory(&self) -> MemoryMetrics;
    fn processes(&self) -> Vec<ProcessMetrics>;
    fn disks(&self) -> Vec<DiskMetrics>;
    fn network(&self) -> Vec<NetworkMetrics>;
    fn gpu(&self) -> Option<GpuMetrics>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelemetryCategory {
    Cpu,
    Memory,
    Gpu,
    Disks,
    Network,
    Processes,
}

#[derive(Debug, Default)]
struct Slot<T> {
    value: T,
    updated_at: Option<DateTime<Utc>>,
}

impl<T: Clone> Slot<T> {
    fn publish(&mut self, value: T) {
        self.value = value;
        self.updated_at = Some(Utc::now());
    }
}

/// Last-known-good telemetry, one lock per category.
///
/// A slow writer on one category never blocks readers of another.
#[derive(Debug, Default)]
pub struct TelemetryStore {
    cpu: RwLock<Slot<CpuMetrics>>,
    memory: RwLock<Slot<MemoryMetrics>>,
    gpu: RwLock<Slot<Option<GpuMetrics>>>,
    disks: RwLock<Slot<Vec<DiskMetrics>>>,
    network: RwLock<Slot<Vec<NetworkMetrics>>>,
    processes: RwLock<Slot<Vec<ProcessMetrics>>>,
}

impl TelemetryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish_cpu(&self, cpu: CpuMetrics) {
        self.cpu.write().publish(cpu);
    }

    pub fn publish_memory(&self, memory: MemoryMetrics) {
        self.memory.write().publish(memory);
    }

    pub fn publish_gpu(&self, gpu: Option<GpuMetrics>) {
        self.gpu.write().publish(gpu);
    }

    pub fn publish_disks(&self, disks: Vec<DiskMetrics>) {
        self.disks.write().publish(disks);
    }

    pub fn publish_network(&self, network: Vec<NetworkMetrics>) {
        self.network.write().publish(network);
    }

    pub fn publish_processes(&self, processes: Vec<ProcessMetrics>) {
        self.processes.write().publish(processes);
    }

    /// When a category was last published, `None` if never.
    pub fn updated_at(&self, category: TelemetryCategory) -> Option<DateTime<Utc>> {
        match category {
            TelemetryCategory::Cpu => self.cpu.read().updated_at,
            TelemetryCategory::Memory => self.memory.read().updated_at,
            TelemetryCategory::Gpu => self.gpu.read().updated_at,
            TelemetryCategory::Disks => self.disks.read().updated_at,
            TelemetryCategory::Network => self.network.read().updated_at,
            TelemetryCategory::Processes => self.processes.read().updated_at,
        }
    }

    /// Read every category in turn. There is no cross-category atomicity.
    pub fn snapshot(&self) -> SystemMetrics {
        SystemMetrics {
            timestamp: Utc::now().timestamp(),
            cpu: self.cpu(),
            memory: self.memory(),
            gpu: self.gpu(),
            disks: self.disks(),
            network: self.network(),
            processes: self.processes(),
        }
    }
}

impl TelemetrySource for TelemetryStore {
    fn cpu(&self) -> CpuMetrics {
        self.cpu.read().value.clone()
    }

    fn memory(&self) -> MemoryMetrics {
        self.memory.read().value.clone()
    }

    fn processes(&self) -> Vec<ProcessMetrics> {
        self.processes.read().value.clone()
    }

    fn disks(&self) -> Vec<DiskMetrics> {
        self.disks.read().value.clone()
    }

    fn network(&self) -> Vec<NetworkMetrics> {
        self.network.read().value.clone()
    }

    fn gpu(&self) -> Option<GpuMetrics> {
        self.gpu.read().value.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_empty_store_returns_defaults() {
        let store = TelemetryStore::new();
        assert!(store.cpu().per_core_usage.is_empty());
        assert_eq!(store.memory().usage_percent, 0.0);
        assert!(store.processes().is_empty());
        assert!(store.gpu().is_none());
        assert!(store.updated_at(TelemetryCategory::Cpu).is_none());
    }

    #[test]
    fn test_categories_publish_independently() {
        let store = TelemetryStore::new();
        store.publish_memory(MemoryMetrics {
            usage_percent: 42.0,
            ..Default::default()
        });

        assert!(store.updated_at(TelemetryCategory::Memory).is_some());
        assert!(store.updated_at(TelemetryCategory::Cpu).is_none());
        assert_eq!(store.snapshot().memory.usage_percent, 42.0);
    }

    #[test]
    fn test_concurrent_readers_never_see_torn_cpu_values() {
        let store = Arc::new(TelemetryStore::new());
        store.publish_cpu(CpuMetrics {
            per_core_usage: vec![0.0; 8],
            core_count: 8,
            ..Default::default()
        });

        let writer = {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for i in 0..500 {
                    let v = (i % 100) as f32;
                    store.publish_cpu(CpuMetrics {
                        per_core_usage: vec![v; 8],
                        core_count: 8,
                        ..Default::default()
                    });
                }
            })
        };

        for _ in 0..500 {
            let cpu = store.cpu();
            let first = cpu.per_core_usage[0];
            assert!(cpu.per_core_usage.iter().all(|&v| v == first));
            assert_eq!(cpu.core_count, 8);
        }

        writer.join().unwrap();
    }
}
