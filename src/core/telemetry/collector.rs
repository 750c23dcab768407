use sysinfo::{
    CpuRefreshKind, Disks, MemoryRefreshKind, ProcessRefreshKind, ProcessesToUpdate, RefreshKind,
    System,
};

use super::metrics::*;
use super::store::TelemetryStore;

/// Samples CPU, memory, process and disk telemetry through `sysinfo`.
///
/// GPU and network categories are not sampled; they stay at their defaults.
pub struct MetricsCollector {
    system: System,
    disks: Disks,
}

impl MetricsCollector {
    pub fn new() -> Self {
        let refresh_kind = RefreshKind::nothing()
            .with_cpu(CpuRefreshKind::everything())
            .with_memory(MemoryRefreshKind::everything())
            .with_processes(ProcessRefreshKind::nothing().with_cpu().with_memory());

        Self {
            system: System::new_with_specifics(refresh_kind),
            disks: Disks::new_with_refreshed_list(),
        }
    }

    /// Refresh every category and publish each one independently.
    ///
    /// A category that cannot be read publishes its zeroed default.
    pub fn sample_into(&mut self, store: &TelemetryStore) {
        store.publish_cpu(self.collect_cpu());
        store.publish_memory(self.collect_memory());
        store.publish_processes(self.collect_processes());
        store.publish_disks(self.collect_disks());
    }

    pub fn collect_cpu(&mut self) -> CpuMetrics {
        self.system.refresh_cpu_usage();
        let cpus = self.system.cpus();

        if cpus.is_empty() {
            log::warn!("CPU telemetry unavailable, publishing empty snapshot");
            return CpuMetrics::default();
        }

        CpuMetrics {
            global_usage: self.system.global_cpu_usage(),
            per_core_usage: cpus.iter().map(|cpu| cpu.cpu_usage()).collect(),
            core_count: cpus.len(),
            brand: cpus
                .first()
                .map(|c| c.brand().to_string())
                .unwrap_or_default(),
        }
    }

    pub fn collect_memory(&mut self) -> MemoryMetrics {
        self.system.refresh_memory();
        let total = self.system.total_memory();

        if total == 0 {
            log::warn!("Memory telemetry unavailable, publishing empty snapshot");
            return MemoryMetrics::default();
        }

        let used = self.system.used_memory();
        MemoryMetrics {
            total_bytes: total,
            used_bytes: used,
            available_bytes: self.system.available_memory(),
            usage_percent: (used as f32 / total as f32) * 100.0,
        }
    }

    pub fn collect_processes(&mut self) -> Vec<ProcessMetrics> {
        self.system.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing().with_cpu().with_memory(),
        );

        self.system
            .processes()
            .values()
            .map(|proc| ProcessMetrics {
                pid: proc.pid().as_u32(),
                name: proc.name().to_string_lossy().to_string(),
                cpu_usage_percent: proc.cpu_usage(),
                memory_bytes: proc.memory(),
            })
            .collect()
    }

    pub fn collect_disks(&mut self) -> Vec<DiskMetrics> {
        self.disks.refresh(true);

        self.disks
            .iter()
            .map(|disk| {
                let total = disk.total_space();
                let available = disk.available_space();
                let used = total.saturating_sub(available);

                DiskMetrics {
                    name: disk.name().to_string_lossy().to_string(),
                    mount_point: disk.mount_point().to_string_lossy().to_string(),
                    fs_type: disk.file_system().to_string_lossy().to_string(),
                    total_bytes: total,
                    available_bytes: available,
                    usage_percent: if total > 0 {
                        (used as f32 / total as f32) * 100.0
                    } else {
                        0.0
                    },
                }
            })
            .collect()
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Take one fully primed sample synchronously.
///
/// CPU usage needs two refreshes separated by sysinfo's minimum interval.
pub fn sample_once(store: &TelemetryStore) {
    let mut collector = MetricsCollector::new();
    collector.collect_cpu();
    collector.collect_processes();
    std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
    collector.sample_into(store);
}
