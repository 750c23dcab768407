//! On-disk profile record.
//!
//! The first six fields are the original record layout; the rest are optional so
//! older records still load, falling back to the base type's defaults.

use serde::{Deserialize, Deserializer, Serialize};

use super::registry::default_parameters;
use super::types::{Profile, ProfileParameters, ProfileType};
use crate::core::tuning::{
    AffinityMask, CoreParking, InterruptRoute, MemoryPriority, NetworkMode, PriorityClass,
};
use crate::error::{Result, TuneError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub profile_type: i64,
    pub timer_resolution: f64,
    pub disable_core_parking: bool,
    pub process_priority: u32,
    pub process_affinity: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub core_parking_min: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub core_parking_max: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_throttling: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_mode: Option<NetworkMode>,
    // Outer None: field absent. Inner None: explicitly untouched.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub foreground_boost: Option<Option<bool>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub long_quantum: Option<Option<bool>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub variable_quantum: Option<Option<bool>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub memory_priority: Option<Option<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interrupt_routes: Option<Vec<InterruptRoute>>,
}

fn present<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl From<&Profile> for ProfileRecord {
    fn from(profile: &Profile) -> Self {
        let p = &profile.parameters;
        Self {
            name: profile.name.clone(),
            profile_type: i64::from(profile.profile_type.as_index()),
            timer_resolution: p.timer_resolution_ms,
            disable_core_parking: p.disables_core_parking(),
            process_priority: p.priority_class.as_raw(),
            process_affinity: p.affinity.0,
            core_parking_min: Some(i64::from(p.core_parking.min_percent())),
            core_parking_max: Some(i64::from(p.core_parking.max_percent())),
            disable_throttling: Some(p.disable_throttling),
            network_mode: Some(p.network_mode),
            foreground_boost: Some(p.foreground_boost),
            long_quantum: Some(p.long_quantum),
            variable_quantum: Some(p.variable_quantum),
            memory_priority: Some(p.memory_priority.map(MemoryPriority::as_raw)),
            interrupt_routes: Some(p.interrupt_routes.clone()),
        }
    }
}

impl ProfileRecord {
    /// Check the fields shared by save and load. Returns the built-in base type.
    pub fn validate(&self) -> Result<ProfileType> {
        if self.name.trim().is_empty() {
            return Err(TuneError::persistence("profile record has an empty name"));
        }

        let profile_type = u8::try_from(self.profile_type)
            .ok()
            .and_then(ProfileType::from_index)
            .filter(|t| t.is_built_in())
            .ok_or_else(|| {
                TuneError::persistence(format!(
                    "profile type {} out of range (expected 0-3)",
                    self.profile_type
                ))
            })?;

        if !self.timer_resolution.is_finite() || self.timer_resolution <= 0.0 {
            return Err(TuneError::persistence(format!(
                "invalid timer resolution {}",
                self.timer_resolution
            )));
        }

        Ok(profile_type)
    }
}

impl TryFrom<ProfileRecord> for Profile {
    type Error = TuneError;

    fn try_from(record: ProfileRecord) -> Result<Self> {
        let profile_type = record.validate()?;

        let priority_class = PriorityClass::from_raw(record.process_priority).ok_or_else(|| {
            TuneError::persistence(format!(
                "unknown process priority class 0x{:X}",
                record.process_priority
            ))
        })?;

        let memory_priority = match record.memory_priority {
            Some(Some(raw)) => Some(Some(MemoryPriority::from_raw(raw).ok_or_else(|| {
                TuneError::persistence(format!("unknown memory priority {}", raw))
            })?)),
            Some(None) => Some(None),
            None => None,
        };

        let base = default_parameters(profile_type);

        let core_parking = match (record.core_parking_min, record.core_parking_max) {
            (Some(min), Some(max)) => CoreParking::new(min, max),
            _ if record.disable_core_parking => CoreParking::UNPARKED,
            _ => base.core_parking,
        };

        let parameters = ProfileParameters {
            timer_resolution_ms: record.timer_resolution,
            core_parking,
            disable_throttling: record.disable_throttling.unwrap_or(base.disable_throttling),
            network_mode: record.network_mode.unwrap_or(base.network_mode),
            priority_class,
            affinity: AffinityMask(record.process_affinity),
            foreground_boost: record.foreground_boost.unwrap_or(base.foreground_boost),
            long_quantum: record.long_quantum.unwrap_or(base.long_quantum),
            variable_quantum: record.variable_quantum.unwrap_or(base.variable_quantum),
            memory_priority: memory_priority.unwrap_or(base.memory_priority),
            interrupt_routes: record.interrupt_routes.unwrap_or(base.interrupt_routes),
        };

        Ok(Profile {
            name: record.name,
            profile_type,
            parameters,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::profiles::registry::default_profile;

    fn parse(json: &str) -> Result<Profile> {
        let record: ProfileRecord = serde_json::from_str(json)?;
        Profile::try_from(record)
    }

    #[test]
    fn test_minimal_record_uses_base_defaults() {
        let profile = parse(
            r#"{"name":"Old","type":1,"timerResolution":1.0,"disableCoreParking":false,
                "processPriority":32768,"processAffinity":0}"#,
        )
        .unwrap();

        assert_eq!(profile.profile_type, ProfileType::Streaming);
        assert_eq!(profile.parameters.core_parking, CoreParking::new(75, 100));
        assert_eq!(profile.parameters.network_mode, NetworkMode::Streaming);
        assert_eq!(profile.parameters.priority_class, PriorityClass::AboveNormal);
        assert_eq!(profile.parameters.long_quantum, Some(true));
    }

    #[test]
    fn test_disable_core_parking_flag_without_bounds() {
        let profile = parse(
            r#"{"name":"Unparked","type":2,"timerResolution":1.0,"disableCoreParking":true,
                "processPriority":32,"processAffinity":3}"#,
        )
        .unwrap();
        assert_eq!(profile.parameters.core_parking, CoreParking::UNPARKED);
        assert_eq!(profile.parameters.affinity, AffinityMask(3));
    }

    #[test]
    fn test_explicit_null_means_untouched() {
        let profile = parse(
            r#"{"name":"G","type":0,"timerResolution":0.5,"disableCoreParking":true,
                "processPriority":128,"processAffinity":0,"foregroundBoost":null}"#,
        )
        .unwrap();
        assert_eq!(profile.parameters.foreground_boost, None);
        // absent field falls back to the Gaming default
        assert_eq!(profile.parameters.variable_quantum, Some(true));
    }

    #[test]
    fn test_out_of_range_type_rejected() {
        for t in ["4", "7", "-1"] {
            let json = format!(
                r#"{{"name":"X","type":{},"timerResolution":1.0,"disableCoreParking":false,
                    "processPriority":32,"processAffinity":0}}"#,
                t
            );
            assert!(matches!(parse(&json), Err(TuneError::Persistence(_))), "type {t}");
        }
    }

    #[test]
    fn test_unknown_priority_rejected() {
        let result = parse(
            r#"{"name":"X","type":0,"timerResolution":1.0,"disableCoreParking":false,
                "processPriority":12345,"processAffinity":0}"#,
        );
        assert!(matches!(result, Err(TuneError::Persistence(_))));
    }

    #[test]
    fn test_missing_required_field_is_json_error() {
        let result = parse(r#"{"name":"X","type":0}"#);
        assert!(matches!(result, Err(TuneError::Json(_))));
    }

    #[test]
    fn test_validate_matches_load_rules() {
        let mut profile = default_profile(ProfileType::Gaming);
        assert_eq!(
            ProfileRecord::from(&profile).validate().unwrap(),
            ProfileType::Gaming
        );

        profile.parameters.timer_resolution_ms = f64::NAN;
        assert!(matches!(
            ProfileRecord::from(&profile).validate(),
            Err(TuneError::Persistence(_))
        ));
    }

    #[test]
    fn test_record_round_trip() {
        let mut profile = default_profile(ProfileType::Workstation);
        profile.name = "Render box".to_string();
        profile.parameters.memory_priority = Some(MemoryPriority::Low);
        profile.parameters.affinity = AffinityMask(0xF0);

        let json = serde_json::to_string(&ProfileRecord::from(&profile)).unwrap();
        assert_eq!(parse(&json).unwrap(), profile);
    }
}
