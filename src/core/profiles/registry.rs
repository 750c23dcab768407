use super::types::{Profile, ProfileParameters, ProfileType};
use crate::core::tuning::{
    AffinityMask, CoreParking, NetworkMode, PriorityClass, DEFAULT_TIMER_RESOLUTION_MS,
};

/// Canonical parameter bundle for a built-in type.
///
/// `Custom` has no bundle of its own and yields the Balanced one.
pub fn default_parameters(profile_type: ProfileType) -> ProfileParameters {
    match profile_type {
        ProfileType::Gaming => ProfileParameters {
            timer_resolution_ms: 0.5,
            core_parking: CoreParking::UNPARKED,
            disable_throttling: true,
            network_mode: NetworkMode::Gaming,
            priority_class: PriorityClass::High,
            affinity: AffinityMask::ALL,
            foreground_boost: Some(true),
            long_quantum: Some(false),
            variable_quantum: Some(true),
            memory_priority: None,
            interrupt_routes: Vec::new(),
        },
        ProfileType::Streaming => ProfileParameters {
            timer_resolution_ms: 1.0,
            core_parking: CoreParking::new(75, 100),
            disable_throttling: false,
            network_mode: NetworkMode::Streaming,
            priority_class: PriorityClass::AboveNormal,
            affinity: AffinityMask::ALL,
            foreground_boost: Some(true),
            long_quantum: Some(true),
            variable_quantum: None,
            memory_priority: None,
            interrupt_routes: Vec::new(),
        },
        ProfileType::Workstation => ProfileParameters {
            timer_resolution_ms: 1.0,
            core_parking: CoreParking::new(50, 100),
            disable_throttling: false,
            network_mode: NetworkMode::General,
            priority_class: PriorityClass::Normal,
            affinity: AffinityMask::ALL,
            foreground_boost: None,
            long_quantum: Some(true),
            variable_quantum: Some(false),
            memory_priority: None,
            interrupt_routes: Vec::new(),
        },
        ProfileType::Balanced | ProfileType::Custom => ProfileParameters {
            timer_resolution_ms: DEFAULT_TIMER_RESOLUTION_MS,
            core_parking: CoreParking::new(50, 100),
            disable_throttling: false,
            network_mode: NetworkMode::Default,
            priority_class: PriorityClass::Normal,
            affinity: AffinityMask::ALL,
            foreground_boost: None,
            long_quantum: None,
            variable_quantum: None,
            memory_priority: None,
            interrupt_routes: Vec::new(),
        },
    }
}

/// Canonical profile for a type, used as the template for custom profiles.
pub fn default_profile(profile_type: ProfileType) -> Profile {
    let base = if profile_type.is_built_in() {
        profile_type
    } else {
        ProfileType::Balanced
    };

    Profile {
        name: profile_type.name().to_string(),
        profile_type: base,
        parameters: default_parameters(base),
    }
}

/// The built-in profiles, constructed once at start-up.
#[derive(Debug, Clone)]
pub struct ProfileRegistry {
    built_ins: Vec<Profile>,
}

impl ProfileRegistry {
    pub fn new() -> Self {
        Self {
            built_ins: ProfileType::BUILT_IN
                .iter()
                .map(|&t| default_profile(t))
                .collect(),
        }
    }

    pub fn built_ins(&self) -> &[Profile] {
        &self.built_ins
    }

    pub fn built_in(&self, profile_type: ProfileType) -> Option<&Profile> {
        self.built_ins
            .iter()
            .find(|p| p.profile_type == profile_type)
    }

    /// Case-insensitive lookup by name.
    pub fn find(&self, name: &str) -> Option<&Profile> {
        self.built_ins
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profiles_match_canonical_values() {
        let gaming = default_profile(ProfileType::Gaming);
        assert_eq!(gaming.parameters.timer_resolution_ms, 0.5);
        assert!(gaming.parameters.disables_core_parking());
        assert_eq!(gaming.parameters.priority_class, PriorityClass::High);

        let streaming = default_profile(ProfileType::Streaming);
        assert_eq!(streaming.parameters.timer_resolution_ms, 1.0);
        assert!(!streaming.parameters.disables_core_parking());
        assert_eq!(streaming.parameters.priority_class, PriorityClass::AboveNormal);

        let workstation = default_profile(ProfileType::Workstation);
        assert_eq!(workstation.parameters.priority_class, PriorityClass::Normal);

        let balanced = default_profile(ProfileType::Balanced);
        assert_eq!(balanced.parameters.timer_resolution_ms, 15.6);
        assert_eq!(balanced.parameters.network_mode, NetworkMode::Default);
    }

    #[test]
    fn test_custom_template_derives_from_balanced() {
        let custom = default_profile(ProfileType::Custom);
        assert_eq!(custom.name, "Custom");
        assert_eq!(custom.profile_type, ProfileType::Balanced);
        assert_eq!(custom.parameters, default_parameters(ProfileType::Balanced));
    }

    #[test]
    fn test_registry_lookup() {
        let registry = ProfileRegistry::new();
        assert_eq!(registry.built_ins().len(), 4);
        assert_eq!(
            registry.find("gaming").map(|p| p.profile_type),
            Some(ProfileType::Gaming)
        );
        assert!(registry.built_in(ProfileType::Custom).is_none());
    }
}
