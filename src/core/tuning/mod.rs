//! Tuning backend contract.
//!
//! The profile engine only talks to the OS through [`TuningBackend`]. Concrete
//! adapters live in `platform::tuning`; [`RecordingBackend`] is the dry-run
//! implementation.

mod backend;
pub mod quantum;
mod recording;
mod types;

pub use backend::{TuningBackend, TuningError, TuningResult};
pub use recording::{RecordedCall, RecordingBackend};
pub use types::{
    AffinityMask, CoreParking, DeviceCategory, InterruptRoute, MemoryPriority, NetworkMode,
    PowerPlan, PriorityClass, Setting, TimerCapabilities, DEFAULT_TIMER_RESOLUTION_MS,
    FALLBACK_MIN_TIMER_RESOLUTION_MS,
};
