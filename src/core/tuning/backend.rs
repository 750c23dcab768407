use thiserror::Error;

use super::types::*;

/// Failure reported by a tuning backend setter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TuningError {
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("not supported on this system: {0}")]
    Unsupported(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("{operation} failed with OS status 0x{code:X}")]
    Os { operation: String, code: u32 },

    #[error("registry error: {0}")]
    Registry(String),

    #[error("command failed: {0}")]
    Command(String),
}

pub type TuningResult<T> = std::result::Result<T, TuningError>;

impl TuningError {
    pub fn permission_denied<S: Into<String>>(msg: S) -> Self {
        TuningError::PermissionDenied(msg.into())
    }

    pub fn unsupported<S: Into<String>>(msg: S) -> Self {
        TuningError::Unsupported(msg.into())
    }

    pub fn invalid_parameter<S: Into<String>>(msg: S) -> Self {
        TuningError::InvalidParameter(msg.into())
    }

    pub fn os<S: Into<String>>(operation: S, code: u32) -> Self {
        TuningError::Os {
            operation: operation.into(),
            code,
        }
    }

    pub fn registry<S: Into<String>>(msg: S) -> Self {
        TuningError::Registry(msg.into())
    }

    pub fn command<S: Into<String>>(msg: S) -> Self {
        TuningError::Command(msg.into())
    }
}

/// OS mutation primitives the profile engine drives.
///
/// Every setter is idempotent and reports failure through its return value; none
/// of them panic. Implementations are expected to return
/// [`TuningError::PermissionDenied`] when the process lacks elevation and
/// [`TuningError::Unsupported`] when the primitive does not exist on this OS.
/// Callers are responsible for serializing conflicting writes.
pub trait TuningBackend: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    fn timer_capabilities(&self) -> TuningResult<TimerCapabilities>;
    fn set_timer_resolution(&self, milliseconds: f64) -> TuningResult<()>;
    fn reset_timer_resolution(&self) -> TuningResult<()>;

    fn power_plans(&self) -> TuningResult<Vec<PowerPlan>>;
    fn set_active_power_plan(&self, guid: &str) -> TuningResult<()>;
    fn set_core_parking(&self, bounds: CoreParking) -> TuningResult<()>;
    fn disable_throttling(&self) -> TuningResult<()>;

    fn optimize_network(&self, mode: NetworkMode) -> TuningResult<()>;

    fn set_foreground_boost(&self, enable: bool) -> TuningResult<()>;
    fn set_long_quantum(&self, enable: bool) -> TuningResult<()>;
    fn set_variable_quantum(&self, enable: bool) -> TuningResult<()>;

    fn set_process_priority(&self, pid: u32, class: PriorityClass) -> TuningResult<()>;
    fn set_process_affinity(&self, pid: u32, mask: AffinityMask) -> TuningResult<()>;
    fn set_thread_priority(&self, tid: u32, priority: i32) -> TuningResult<()>;
    fn set_thread_affinity(&self, tid: u32, mask: AffinityMask) -> TuningResult<()>;

    fn set_memory_priority(&self, pid: u32, priority: MemoryPriority) -> TuningResult<()>;
    fn clear_standby_list(&self) -> TuningResult<()>;
    fn empty_working_set(&self, pid: u32) -> TuningResult<()>;

    /// Route interrupts of every device in `category` to one logical core.
    /// Succeeds when at least one matching device was updated.
    fn route_interrupts(&self, category: DeviceCategory, core: u32) -> TuningResult<()>;

    fn logical_core_count(&self) -> usize;
}
