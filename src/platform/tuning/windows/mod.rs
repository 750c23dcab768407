//! Windows tuning backend.
//!
//! Every mutating call checks elevation first and reports `PermissionDenied`
//! without touching the system when the process is not elevated.

mod command;
mod devices;
mod ntdll;
mod power;
mod process;
mod registry;

use parking_lot::Mutex;

use super::any_device_updated;
use crate::core::tuning::*;
use crate::platform::is_elevated;

pub struct WindowsBackend {
    elevated: bool,
    core_count: usize,
    // Resolution this process currently holds, released on reset.
    requested_timer_ms: Mutex<Option<f64>>,
}

impl WindowsBackend {
    pub fn new() -> Self {
        let elevated = is_elevated();
        if !elevated {
            log::warn!("Not running elevated; system-wide tuning calls will be refused");
        }
        Self {
            elevated,
            core_count: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            requested_timer_ms: Mutex::new(None),
        }
    }

    fn require_elevation(&self, operation: &str) -> TuningResult<()> {
        if self.elevated {
            Ok(())
        } else {
            Err(TuningError::permission_denied(format!(
                "{} requires administrator rights",
                operation
            )))
        }
    }

    fn set_priority_flag(&self, name: &str, bit: u32, enable: bool) -> TuningResult<()> {
        self.require_elevation(name)?;
        let value = registry::set_priority_separation_flag(bit, enable)?;
        log::debug!("Win32PrioritySeparation is now 0x{:X}", value);
        Ok(())
    }
}

impl Default for WindowsBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl TuningBackend for WindowsBackend {
    fn name(&self) -> &str {
        "windows"
    }

    fn timer_capabilities(&self) -> TuningResult<TimerCapabilities> {
        ntdll::query_timer_resolution()
    }

    fn set_timer_resolution(&self, milliseconds: f64) -> TuningResult<()> {
        if !milliseconds.is_finite() || milliseconds <= 0.0 {
            return Err(TuningError::invalid_parameter(format!(
                "timer resolution {}ms",
                milliseconds
            )));
        }
        let actual = ntdll::set_timer_resolution(milliseconds, true)?;
        log::debug!(
            "Timer resolution requested {:.2}ms, now {:.2}ms",
            milliseconds,
            actual
        );
        *self.requested_timer_ms.lock() = Some(milliseconds);
        Ok(())
    }

    fn reset_timer_resolution(&self) -> TuningResult<()> {
        let mut requested = self.requested_timer_ms.lock();
        match requested.take() {
            Some(ms) => ntdll::set_timer_resolution(ms, false).map(|_| ()),
            None => ntdll::set_timer_resolution(DEFAULT_TIMER_RESOLUTION_MS, true).map(|_| ()),
        }
    }

    fn power_plans(&self) -> TuningResult<Vec<PowerPlan>> {
        power::list_plans()
    }

    fn set_active_power_plan(&self, guid: &str) -> TuningResult<()> {
        self.require_elevation("power plan change")?;
        power::set_active_plan(guid)
    }

    fn set_core_parking(&self, bounds: CoreParking) -> TuningResult<()> {
        self.require_elevation("core parking")?;
        power::set_core_parking(bounds)
    }

    fn disable_throttling(&self) -> TuningResult<()> {
        self.require_elevation("throttling control")?;
        power::disable_throttling()
    }

    fn optimize_network(&self, mode: NetworkMode) -> TuningResult<()> {
        self.require_elevation("network tuning")?;
        registry::apply_network_mode(mode)
    }

    fn set_foreground_boost(&self, enable: bool) -> TuningResult<()> {
        self.set_priority_flag("foreground boost", quantum::FOREGROUND_BOOST, enable)
    }

    fn set_long_quantum(&self, enable: bool) -> TuningResult<()> {
        self.set_priority_flag("long quantum", quantum::LONG_QUANTUM, enable)
    }

    fn set_variable_quantum(&self, enable: bool) -> TuningResult<()> {
        self.set_priority_flag("variable quantum", quantum::VARIABLE_QUANTUM, enable)
    }

    fn set_process_priority(&self, pid: u32, class: PriorityClass) -> TuningResult<()> {
        process::set_priority_class(pid, class)
    }

    fn set_process_affinity(&self, pid: u32, mask: AffinityMask) -> TuningResult<()> {
        process::set_process_affinity(pid, mask)
    }

    fn set_thread_priority(&self, tid: u32, priority: i32) -> TuningResult<()> {
        process::set_thread_priority(tid, priority)
    }

    fn set_thread_affinity(&self, tid: u32, mask: AffinityMask) -> TuningResult<()> {
        process::set_thread_affinity(tid, mask)
    }

    fn set_memory_priority(&self, pid: u32, priority: MemoryPriority) -> TuningResult<()> {
        process::set_memory_priority(pid, priority)
    }

    fn clear_standby_list(&self) -> TuningResult<()> {
        self.require_elevation("standby list purge")?;
        ntdll::purge_standby_list()
    }

    fn empty_working_set(&self, pid: u32) -> TuningResult<()> {
        process::empty_working_set(pid)
    }

    fn route_interrupts(&self, category: DeviceCategory, core: u32) -> TuningResult<()> {
        self.require_elevation("interrupt routing")?;
        let mask = AffinityMask::single_core(core)
            .filter(|_| (core as usize) < self.core_count)
            .ok_or_else(|| {
                TuningError::invalid_parameter(format!(
                    "core {} does not exist ({} logical cores)",
                    core, self.core_count
                ))
            })?;

        let devices = devices::devices_in(category)?;
        if devices.is_empty() {
            return Err(TuningError::invalid_parameter(format!(
                "no {} devices found",
                category
            )));
        }

        let results = devices.iter().map(|device| {
            let name = device.friendly_name.as_deref().unwrap_or("unknown device");
            let result = registry::set_interrupt_affinity(&device.instance_id, mask);
            match &result {
                Ok(()) => log::info!("Routed interrupts of {} to core {}", name, core),
                Err(e) => log::error!("Failed to route interrupts of {}: {}", name, e),
            }
            result
        });
        any_device_updated(results)
    }

    fn logical_core_count(&self) -> usize {
        self.core_count
    }
}
