use serde::{Deserialize, Serialize};
use std::fmt;

/// Windows' default timer resolution in milliseconds.
pub const DEFAULT_TIMER_RESOLUTION_MS: f64 = 15.6;

/// Finest resolution assumed when the hardware range cannot be queried.
pub const FALLBACK_MIN_TIMER_RESOLUTION_MS: f64 = 0.5;

/// Hardware timer range as reported by the backend.
///
/// `min_ms` is the finest achievable period, `max_ms` the coarsest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimerCapabilities {
    pub min_ms: f64,
    pub max_ms: f64,
    pub current_ms: f64,
}

impl Default for TimerCapabilities {
    fn default() -> Self {
        Self {
            min_ms: FALLBACK_MIN_TIMER_RESOLUTION_MS,
            max_ms: DEFAULT_TIMER_RESOLUTION_MS,
            current_ms: DEFAULT_TIMER_RESOLUTION_MS,
        }
    }
}

impl TimerCapabilities {
    /// Clamp a requested resolution into the hardware range.
    ///
    /// Non-finite requests fall back to the coarsest (default) period.
    pub fn clamp(&self, requested_ms: f64) -> f64 {
        if !requested_ms.is_finite() {
            return self.max_ms;
        }
        requested_ms.clamp(self.min_ms, self.max_ms)
    }
}

/// Core parking bounds, in percent of logical cores kept unparked.
///
/// Always normalized: both bounds in 0..=100 and `min_percent <= max_percent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawCoreParking")]
pub struct CoreParking {
    min_percent: u8,
    max_percent: u8,
}

impl CoreParking {
    /// Fully unparked: every core stays available.
    pub const UNPARKED: CoreParking = CoreParking {
        min_percent: 100,
        max_percent: 100,
    };

    /// Build normalized bounds. Values are clamped to 0..=100 and an inverted
    /// pair has its minimum lowered to the maximum.
    pub fn new(min_percent: i64, max_percent: i64) -> Self {
        let max = max_percent.clamp(0, 100) as u8;
        let min = (min_percent.clamp(0, 100) as u8).min(max);
        Self {
            min_percent: min,
            max_percent: max,
        }
    }

    pub fn min_percent(&self) -> u8 {
        self.min_percent
    }

    pub fn max_percent(&self) -> u8 {
        self.max_percent
    }

    pub fn is_unparked(&self) -> bool {
        self.min_percent == 100
    }
}

#[derive(Deserialize)]
struct RawCoreParking {
    min_percent: i64,
    max_percent: i64,
}

impl From<RawCoreParking> for CoreParking {
    fn from(raw: RawCoreParking) -> Self {
        CoreParking::new(raw.min_percent, raw.max_percent)
    }
}

impl fmt::Display for CoreParking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%-{}%", self.min_percent, self.max_percent)
    }
}

/// Network stack tuning bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkMode {
    /// Ack frequency 1, no-delay, nagling off, TCP tuning, RSS on.
    Gaming,
    /// Ack frequency 2, 64 KiB receive window, RSS on, TCP tuning.
    Streaming,
    /// Generic TCP parameter tuning only.
    General,
    /// Remove previously written tuning values.
    Default,
}

impl fmt::Display for NetworkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NetworkMode::Gaming => "gaming",
            NetworkMode::Streaming => "streaming",
            NetworkMode::General => "general",
            NetworkMode::Default => "default",
        };
        f.write_str(name)
    }
}

/// Win32 process priority class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriorityClass {
    Idle,
    BelowNormal,
    Normal,
    AboveNormal,
    High,
    Realtime,
}

impl PriorityClass {
    /// Raw `*_PRIORITY_CLASS` value.
    pub fn as_raw(self) -> u32 {
        match self {
            PriorityClass::Idle => 0x0000_0040,
            PriorityClass::BelowNormal => 0x0000_4000,
            PriorityClass::Normal => 0x0000_0020,
            PriorityClass::AboveNormal => 0x0000_8000,
            PriorityClass::High => 0x0000_0080,
            PriorityClass::Realtime => 0x0000_0100,
        }
    }

    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0x0000_0040 => Some(PriorityClass::Idle),
            0x0000_4000 => Some(PriorityClass::BelowNormal),
            0x0000_0020 => Some(PriorityClass::Normal),
            0x0000_8000 => Some(PriorityClass::AboveNormal),
            0x0000_0080 => Some(PriorityClass::High),
            0x0000_0100 => Some(PriorityClass::Realtime),
            _ => None,
        }
    }
}

/// Process memory priority (`MEMORY_PRIORITY_*`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemoryPriority {
    VeryLow,
    Low,
    Medium,
    BelowNormal,
    Normal,
}

impl MemoryPriority {
    pub fn as_raw(self) -> u32 {
        match self {
            MemoryPriority::VeryLow => 1,
            MemoryPriority::Low => 2,
            MemoryPriority::Medium => 3,
            MemoryPriority::BelowNormal => 4,
            MemoryPriority::Normal => 5,
        }
    }

    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            1 => Some(MemoryPriority::VeryLow),
            2 => Some(MemoryPriority::Low),
            3 => Some(MemoryPriority::Medium),
            4 => Some(MemoryPriority::BelowNormal),
            5 => Some(MemoryPriority::Normal),
            _ => None,
        }
    }
}

/// Bitset over logical cores. Zero means "leave affinity untouched".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AffinityMask(pub u64);

impl AffinityMask {
    pub const ALL: AffinityMask = AffinityMask(0);

    pub fn single_core(core: u32) -> Option<Self> {
        1u64.checked_shl(core).map(AffinityMask)
    }

    pub fn is_all(&self) -> bool {
        self.0 == 0
    }

    /// Mask of every core the system exposes.
    pub fn system(core_count: usize) -> Self {
        if core_count >= 64 {
            AffinityMask(u64::MAX)
        } else {
            AffinityMask((1u64 << core_count) - 1)
        }
    }

    /// Restrict to the cores that exist. `None` when no selected core exists.
    pub fn restricted_to(&self, core_count: usize) -> Option<Self> {
        let masked = self.0 & Self::system(core_count).0;
        (masked != 0).then_some(AffinityMask(masked))
    }
}

impl fmt::Display for AffinityMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.0)
    }
}

/// Device family whose interrupts can be routed to a core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceCategory {
    Gpu,
    Network,
    Usb,
}

impl DeviceCategory {
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            DeviceCategory::Gpu => &["nvidia", "amd", "radeon", "geforce", "display"],
            DeviceCategory::Network => &["network", "ethernet", "wi-fi", "wireless"],
            DeviceCategory::Usb => &["usb", "xhci", "ehci"],
        }
    }

    /// Case-insensitive substring match of a device description.
    pub fn matches(self, device_name: &str) -> bool {
        let lower = device_name.to_lowercase();
        self.keywords().iter().any(|k| lower.contains(k))
    }
}

impl fmt::Display for DeviceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeviceCategory::Gpu => "GPU",
            DeviceCategory::Network => "network",
            DeviceCategory::Usb => "USB",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for DeviceCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gpu" => Ok(DeviceCategory::Gpu),
            "network" | "net" => Ok(DeviceCategory::Network),
            "usb" => Ok(DeviceCategory::Usb),
            other => Err(format!("unknown device category '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterruptRoute {
    pub category: DeviceCategory,
    pub core: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerPlan {
    pub guid: String,
    pub name: String,
    pub active: bool,
}

/// One tuning operation issued by a profile apply, used for logging and reports.
#[derive(Debug, Clone, PartialEq)]
pub enum Setting {
    TimerResolution(f64),
    TimerReset,
    CoreParking(CoreParking),
    DisableThrottling,
    Network(NetworkMode),
    ForegroundBoost(bool),
    LongQuantum(bool),
    VariableQuantum(bool),
    ProcessPriority { pid: u32, class: PriorityClass },
    ProcessAffinity { pid: u32, mask: AffinityMask },
    MemoryPriority { pid: u32, priority: MemoryPriority },
    Interrupts(InterruptRoute),
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Setting::TimerResolution(ms) => write!(f, "timer resolution {:.2}ms", ms),
            Setting::TimerReset => write!(f, "timer resolution reset to default"),
            Setting::CoreParking(bounds) => write!(f, "core parking {}", bounds),
            Setting::DisableThrottling => write!(f, "disable CPU throttling"),
            Setting::Network(mode) => write!(f, "network tuning ({})", mode),
            Setting::ForegroundBoost(on) => write!(f, "foreground boost {}", on_off(*on)),
            Setting::LongQuantum(on) => write!(f, "long quantum {}", on_off(*on)),
            Setting::VariableQuantum(on) => write!(f, "variable quantum {}", on_off(*on)),
            Setting::ProcessPriority { pid, class } => {
                write!(f, "process {} priority {:?}", pid, class)
            }
            Setting::ProcessAffinity { pid, mask } => {
                write!(f, "process {} affinity {}", pid, mask)
            }
            Setting::MemoryPriority { pid, priority } => {
                write!(f, "process {} memory priority {:?}", pid, priority)
            }
            Setting::Interrupts(route) => {
                write!(f, "{} interrupts to core {}", route.category, route.core)
            }
        }
    }
}

fn on_off(on: bool) -> &'static str {
    if on {
        "on"
    } else {
        "off"
    }
}
