//! System telemetry.
//!
//! Sampling of CPU, memory, process and disk state, published per category into
//! a shared [`TelemetryStore`] that the analyzer reads through [`TelemetrySource`].

mod collector;
mod metrics;
mod runtime;
mod store;

pub use collector::{sample_once, MetricsCollector};
pub use metrics::{
    CpuMetrics, DiskMetrics, GpuMetrics, MemoryMetrics, NetworkMetrics, ProcessMetrics,
    SystemMetrics,
};
pub use runtime::{
    clamp_interval, TelemetryRuntime, DEFAULT_POLLING_INTERVAL_MS, MAX_POLLING_INTERVAL_MS,
    MIN_POLLING_INTERVAL_MS,
};
pub use store::{TelemetryCategory, TelemetrySource, TelemetryStore};
