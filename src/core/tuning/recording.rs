//! In-memory backend that records every call instead of touching the OS.
//!
//! Used for `--dry-run` and as the test double for the profile engine.

use parking_lot::Mutex;
use std::time::Duration;

use super::backend::{TuningBackend, TuningError, TuningResult};
use super::types::*;

/// A call received by [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Setting(Setting),
    ActivePowerPlan(String),
    ThreadPriority { tid: u32, priority: i32 },
    ThreadAffinity { tid: u32, mask: AffinityMask },
    ClearStandbyList,
    EmptyWorkingSet(u32),
}

type FailurePredicate = Box<dyn Fn(&Setting) -> bool + Send + Sync>;

pub struct RecordingBackend {
    calls: Mutex<Vec<RecordedCall>>,
    failures: Vec<FailurePredicate>,
    capabilities: TimerCapabilities,
    core_count: usize,
    call_delay: Option<Duration>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failures: Vec::new(),
            capabilities: TimerCapabilities::default(),
            core_count: 8,
            call_delay: None,
        }
    }

    /// Make every setting matching `predicate` report a permission failure.
    /// The call is still recorded.
    pub fn fail_when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Setting) -> bool + Send + Sync + 'static,
    {
        self.failures.push(Box::new(predicate));
        self
    }

    pub fn with_core_count(mut self, core_count: usize) -> Self {
        self.core_count = core_count;
        self
    }

    pub fn with_timer_capabilities(mut self, capabilities: TimerCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Sleep inside every call, to widen race windows in tests.
    pub fn with_call_delay(mut self, delay: Duration) -> Self {
        self.call_delay = Some(delay);
        self
    }

    /// Snapshot of all calls so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    /// Only the profile settings, in call order.
    pub fn settings(&self) -> Vec<Setting> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                RecordedCall::Setting(s) => Some(s.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.calls.lock().clear();
    }

    fn record(&self, setting: Setting) -> TuningResult<()> {
        if let Some(delay) = self.call_delay {
            std::thread::sleep(delay);
        }
        let failed = self.failures.iter().any(|fails| fails(&setting));
        let description = setting.to_string();
        self.calls.lock().push(RecordedCall::Setting(setting));
        if failed {
            Err(TuningError::permission_denied(description))
        } else {
            Ok(())
        }
    }

    fn record_other(&self, call: RecordedCall) -> TuningResult<()> {
        self.calls.lock().push(call);
        Ok(())
    }
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl TuningBackend for RecordingBackend {
    fn name(&self) -> &str {
        "dry-run"
    }

    fn timer_capabilities(&self) -> TuningResult<TimerCapabilities> {
        Ok(self.capabilities)
    }

    fn set_timer_resolution(&self, milliseconds: f64) -> TuningResult<()> {
        self.record(Setting::TimerResolution(milliseconds))
    }

    fn reset_timer_resolution(&self) -> TuningResult<()> {
        self.record(Setting::TimerReset)
    }

    fn power_plans(&self) -> TuningResult<Vec<PowerPlan>> {
        Ok(Vec::new())
    }

    fn set_active_power_plan(&self, guid: &str) -> TuningResult<()> {
        self.record_other(RecordedCall::ActivePowerPlan(guid.to_string()))
    }

    fn set_core_parking(&self, bounds: CoreParking) -> TuningResult<()> {
        self.record(Setting::CoreParking(bounds))
    }

    fn disable_throttling(&self) -> TuningResult<()> {
        self.record(Setting::DisableThrottling)
    }

    fn optimize_network(&self, mode: NetworkMode) -> TuningResult<()> {
        self.record(Setting::Network(mode))
    }

    fn set_foreground_boost(&self, enable: bool) -> TuningResult<()> {
        self.record(Setting::ForegroundBoost(enable))
    }

    fn set_long_quantum(&self, enable: bool) -> TuningResult<()> {
        self.record(Setting::LongQuantum(enable))
    }

    fn set_variable_quantum(&self, enable: bool) -> TuningResult<()> {
        self.record(Setting::VariableQuantum(enable))
    }

    fn set_process_priority(&self, pid: u32, class: PriorityClass) -> TuningResult<()> {
        self.record(Setting::ProcessPriority { pid, class })
    }

    fn set_process_affinity(&self, pid: u32, mask: AffinityMask) -> TuningResult<()> {
        self.record(Setting::ProcessAffinity { pid, mask })
    }

    fn set_thread_priority(&self, tid: u32, priority: i32) -> TuningResult<()> {
        self.record_other(RecordedCall::ThreadPriority { tid, priority })
    }

    fn set_thread_affinity(&self, tid: u32, mask: AffinityMask) -> TuningResult<()> {
        self.record_other(RecordedCall::ThreadAffinity { tid, mask })
    }

    fn set_memory_priority(&self, pid: u32, priority: MemoryPriority) -> TuningResult<()> {
        self.record(Setting::MemoryPriority { pid, priority })
    }

    fn clear_standby_list(&self) -> TuningResult<()> {
        self.record_other(RecordedCall::ClearStandbyList)
    }

    fn empty_working_set(&self, pid: u32) -> TuningResult<()> {
        self.record_other(RecordedCall::EmptyWorkingSet(pid))
    }

    fn route_interrupts(&self, category: DeviceCategory, core: u32) -> TuningResult<()> {
        self.record(Setting::Interrupts(InterruptRoute { category, core }))
    }

    fn logical_core_count(&self) -> usize {
        self.core_count
    }
}
