use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::core::tuning::{
    AffinityMask, CoreParking, InterruptRoute, MemoryPriority, NetworkMode, PriorityClass,
};

/// Identity of a tuning bundle.
///
/// The four built-ins are the states the engine can be in. `Custom` only tags
/// user profiles; a custom profile always derives from one of the built-ins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ProfileType {
    Gaming,
    Streaming,
    Workstation,
    Balanced,
    Custom,
}

impl ProfileType {
    pub const BUILT_IN: [ProfileType; 4] = [
        ProfileType::Gaming,
        ProfileType::Streaming,
        ProfileType::Workstation,
        ProfileType::Balanced,
    ];

    /// Persisted integer value.
    pub fn as_index(self) -> u8 {
        match self {
            ProfileType::Gaming => 0,
            ProfileType::Streaming => 1,
            ProfileType::Workstation => 2,
            ProfileType::Balanced => 3,
            ProfileType::Custom => 4,
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(ProfileType::Gaming),
            1 => Some(ProfileType::Streaming),
            2 => Some(ProfileType::Workstation),
            3 => Some(ProfileType::Balanced),
            4 => Some(ProfileType::Custom),
            _ => None,
        }
    }

    pub fn is_built_in(self) -> bool {
        self != ProfileType::Custom
    }

    pub fn name(self) -> &'static str {
        match self {
            ProfileType::Gaming => "Gaming",
            ProfileType::Streaming => "Streaming",
            ProfileType::Workstation => "Workstation",
            ProfileType::Balanced => "Balanced",
            ProfileType::Custom => "Custom",
        }
    }
}

impl fmt::Display for ProfileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProfileType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gaming" => Ok(ProfileType::Gaming),
            "streaming" => Ok(ProfileType::Streaming),
            "workstation" => Ok(ProfileType::Workstation),
            "balanced" => Ok(ProfileType::Balanced),
            "custom" => Ok(ProfileType::Custom),
            other => Err(format!("unknown profile type '{}'", other)),
        }
    }
}

/// Everything a profile sets. Numeric bounds are clamped before reaching a backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileParameters {
    /// Requested period; at or above the system default means "reset".
    pub timer_resolution_ms: f64,
    pub core_parking: CoreParking,
    pub disable_throttling: bool,
    pub network_mode: NetworkMode,
    pub priority_class: PriorityClass,
    pub affinity: AffinityMask,
    // None leaves the current value untouched
    pub foreground_boost: Option<bool>,
    pub long_quantum: Option<bool>,
    pub variable_quantum: Option<bool>,
    pub memory_priority: Option<MemoryPriority>,
    pub interrupt_routes: Vec<InterruptRoute>,
}

impl ProfileParameters {
    pub fn disables_core_parking(&self) -> bool {
        self.core_parking.is_unparked()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub name: String,
    /// Built-in type this profile is (or derives from).
    pub profile_type: ProfileType,
    pub parameters: ProfileParameters,
}
