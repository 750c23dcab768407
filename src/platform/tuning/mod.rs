//! OS adapters for [`TuningBackend`].
//!
//! [`default_backend`] picks the adapter for the current platform. Only Windows
//! has a real one; elsewhere every setter reports `Unsupported`.

pub mod network;
pub mod powercfg;

#[cfg(windows)]
mod windows;

#[cfg(windows)]
pub use windows::WindowsBackend;

use std::sync::Arc;

use crate::core::tuning::*;

pub fn default_backend() -> Arc<dyn TuningBackend> {
    #[cfg(windows)]
    {
        Arc::new(WindowsBackend::new())
    }
    #[cfg(not(windows))]
    {
        Arc::new(UnsupportedBackend::new())
    }
}

/// Fold per-device results: success when at least one device was updated,
/// otherwise the last error.
#[cfg_attr(not(windows), allow(dead_code))]
pub(crate) fn any_device_updated<I>(results: I) -> TuningResult<()>
where
    I: IntoIterator<Item = TuningResult<()>>,
{
    let mut updated = 0usize;
    let mut last_error = None;
    for result in results {
        match result {
            Ok(()) => updated += 1,
            Err(e) => last_error = Some(e),
        }
    }
    match last_error {
        Some(e) if updated == 0 => Err(e),
        Some(_) => {
            log::warn!("Interrupt routing applied to {} device(s), some failed", updated);
            Ok(())
        }
        None => Ok(()),
    }
}

/// Backend for platforms without tuning primitives.
#[derive(Debug)]
pub struct UnsupportedBackend {
    core_count: usize,
}

impl UnsupportedBackend {
    pub fn new() -> Self {
        Self {
            core_count: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
        }
    }

    fn unsupported<T>(&self, what: &str) -> TuningResult<T> {
        Err(TuningError::unsupported(format!(
            "{} requires Windows",
            what
        )))
    }
}

impl Default for UnsupportedBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl TuningBackend for UnsupportedBackend {
    fn name(&self) -> &str {
        "unsupported"
    }

    fn timer_capabilities(&self) -> TuningResult<TimerCapabilities> {
        self.unsupported("timer query")
    }

    fn set_timer_resolution(&self, _milliseconds: f64) -> TuningResult<()> {
        self.unsupported("timer resolution")
    }

    fn reset_timer_resolution(&self) -> TuningResult<()> {
        self.unsupported("timer resolution")
    }

    fn power_plans(&self) -> TuningResult<Vec<PowerPlan>> {
        self.unsupported("power plans")
    }

    fn set_active_power_plan(&self, _guid: &str) -> TuningResult<()> {
        self.unsupported("power plans")
    }

    fn set_core_parking(&self, _bounds: CoreParking) -> TuningResult<()> {
        self.unsupported("core parking")
    }

    fn disable_throttling(&self) -> TuningResult<()> {
        self.unsupported("throttling control")
    }

    fn optimize_network(&self, _mode: NetworkMode) -> TuningResult<()> {
        self.unsupported("network tuning")
    }

    fn set_foreground_boost(&self, _enable: bool) -> TuningResult<()> {
        self.unsupported("priority separation")
    }

    fn set_long_quantum(&self, _enable: bool) -> TuningResult<()> {
        self.unsupported("priority separation")
    }

    fn set_variable_quantum(&self, _enable: bool) -> TuningResult<()> {
        self.unsupported("priority separation")
    }

    fn set_process_priority(&self, _pid: u32, _class: PriorityClass) -> TuningResult<()> {
        self.unsupported("process priority")
    }

    fn set_process_affinity(&self, _pid: u32, _mask: AffinityMask) -> TuningResult<()> {
        self.unsupported("process affinity")
    }

    fn set_thread_priority(&self, _tid: u32, _priority: i32) -> TuningResult<()> {
        self.unsupported("thread priority")
    }

    fn set_thread_affinity(&self, _tid: u32, _mask: AffinityMask) -> TuningResult<()> {
        self.unsupported("thread affinity")
    }

    fn set_memory_priority(&self, _pid: u32, _priority: MemoryPriority) -> TuningResult<()> {
        self.unsupported("memory priority")
    }

    fn clear_standby_list(&self) -> TuningResult<()> {
        self.unsupported("standby list purge")
    }

    fn empty_working_set(&self, _pid: u32) -> TuningResult<()> {
        self.unsupported("working set trim")
    }

    fn route_interrupts(&self, _category: DeviceCategory, _core: u32) -> TuningResult<()> {
        self.unsupported("interrupt routing")
    }

    fn logical_core_count(&self) -> usize {
        self.core_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_backend_never_panics() {
        let backend = UnsupportedBackend::new();
        assert!(backend.logical_core_count() >= 1);
        assert!(matches!(
            backend.set_timer_resolution(1.0),
            Err(TuningError::Unsupported(_))
        ));
        assert!(matches!(
            backend.route_interrupts(DeviceCategory::Gpu, 0),
            Err(TuningError::Unsupported(_))
        ));
    }

    #[test]
    fn test_partial_device_update_succeeds() {
        let results = vec![
            Err(TuningError::registry("device busy")),
            Ok(()),
            Err(TuningError::registry("device gone")),
        ];
        assert!(any_device_updated(results).is_ok());
    }

    #[test]
    fn test_no_device_updated_returns_last_error() {
        let results = vec![
            Err(TuningError::permission_denied("first")),
            Err(TuningError::registry("second")),
        ];
        assert_eq!(
            any_device_updated(results),
            Err(TuningError::registry("second"))
        );
    }

    #[test]
    fn test_default_backend_reports_cores() {
        assert!(default_backend().logical_core_count() >= 1);
    }
}
