use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use super::registry::{default_profile, ProfileRegistry};
use super::report::ApplyReport;
use super::store::ProfileStore;
use super::types::{Profile, ProfileParameters, ProfileType};
use crate::core::tuning::{
    Setting, TuningBackend, TuningError, DEFAULT_TIMER_RESOLUTION_MS,
};
use crate::error::{Result, TuneError};

/// When an apply updates the active profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivationPolicy {
    /// Record the profile as active whatever the individual outcomes were.
    #[default]
    Always,
    /// Record the profile only when every setting succeeded.
    OnSuccess,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyOptions {
    /// Process that receives priority, affinity and memory priority.
    pub target_pid: Option<u32>,
}

impl ApplyOptions {
    pub fn for_process(pid: u32) -> Self {
        Self {
            target_pid: Some(pid),
        }
    }
}

/// Applies profiles through a [`TuningBackend`] and tracks which one is active.
pub struct ProfileManager {
    backend: Arc<dyn TuningBackend>,
    registry: ProfileRegistry,
    store: ProfileStore,
    policy: ActivationPolicy,
    active: AtomicU8,
    active_name: RwLock<String>,
    // Held across state read, fan-out and state write.
    apply_lock: Mutex<()>,
}

impl ProfileManager {
    pub fn new(
        backend: Arc<dyn TuningBackend>,
        store: ProfileStore,
        policy: ActivationPolicy,
    ) -> Self {
        Self {
            backend,
            registry: ProfileRegistry::new(),
            store,
            policy,
            active: AtomicU8::new(ProfileType::Balanced.as_index()),
            active_name: RwLock::new(ProfileType::Balanced.name().to_string()),
            apply_lock: Mutex::new(()),
        }
    }

    pub fn registry(&self) -> &ProfileRegistry {
        &self.registry
    }

    pub fn store(&self) -> &ProfileStore {
        &self.store
    }

    pub fn policy(&self) -> ActivationPolicy {
        self.policy
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    pub fn apply_profile(&self, profile_type: ProfileType) -> Result<ApplyReport> {
        self.apply_profile_with(profile_type, &ApplyOptions::default())
    }

    pub fn apply_profile_with(
        &self,
        profile_type: ProfileType,
        options: &ApplyOptions,
    ) -> Result<ApplyReport> {
        let profile = self.registry.built_in(profile_type).ok_or_else(|| {
            TuneError::profile(format!(
                "{} is not a built-in profile; apply a saved profile by name",
                profile_type
            ))
        })?;
        Ok(self.apply(profile, options))
    }

    pub fn apply_custom_profile(&self, name: &str) -> Result<ApplyReport> {
        self.apply_custom_profile_with(name, &ApplyOptions::default())
    }

    /// Load a stored profile and apply its full parameter bundle.
    pub fn apply_custom_profile_with(
        &self,
        name: &str,
        options: &ApplyOptions,
    ) -> Result<ApplyReport> {
        let profile = self.load_profile(name)?;
        Ok(self.apply(&profile, options))
    }

    pub fn default_profile(&self, profile_type: ProfileType) -> Profile {
        default_profile(profile_type)
    }

    pub fn save_profile(&self, name: &str, profile: &Profile) -> Result<()> {
        match self.store.save(name, profile) {
            Ok(path) => {
                log::info!("Saved profile '{}' to {}", name, path.display());
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to save profile '{}': {}", name, e);
                Err(e)
            }
        }
    }

    pub fn load_profile(&self, name: &str) -> Result<Profile> {
        self.store.load(name).inspect_err(|e| {
            log::error!("Failed to load profile '{}': {}", name, e);
        })
    }

    pub fn saved_profiles(&self) -> Result<Vec<String>> {
        self.store.list()
    }

    pub fn current_profile_type(&self) -> ProfileType {
        ProfileType::from_index(self.active.load(Ordering::Acquire))
            .unwrap_or(ProfileType::Balanced)
    }

    pub fn current_profile_name(&self) -> String {
        self.active_name.read().clone()
    }

    fn apply(&self, profile: &Profile, options: &ApplyOptions) -> ApplyReport {
        let _guard = self.apply_lock.lock();

        let previous = self.current_profile_type();
        log::info!(
            "Applying profile '{}' ({}) via {} backend, previously {}",
            profile.name,
            profile.profile_type,
            self.backend.name(),
            previous
        );

        let mut report = ApplyReport::new(profile.profile_type, &profile.name);
        self.fan_out(&profile.parameters, options, &mut report);

        let activate = match self.policy {
            ActivationPolicy::Always => true,
            ActivationPolicy::OnSuccess => report.is_success(),
        };
        if activate {
            self.active
                .store(profile.profile_type.as_index(), Ordering::Release);
            *self.active_name.write() = profile.name.clone();
        } else {
            log::warn!(
                "Profile '{}' not activated: {} setting(s) failed, {} remains active",
                profile.name,
                report.failed(),
                previous
            );
        }

        if report.is_success() {
            log::info!("Profile '{}': {}", profile.name, report.summary());
        } else {
            log::warn!("Profile '{}': {}", profile.name, report.summary());
        }
        report
    }

    fn fan_out(&self, p: &ProfileParameters, options: &ApplyOptions, report: &mut ApplyReport) {
        let backend = self.backend.as_ref();

        if !p.timer_resolution_ms.is_finite()
            || p.timer_resolution_ms >= DEFAULT_TIMER_RESOLUTION_MS
        {
            report.record(Setting::TimerReset, backend.reset_timer_resolution());
        } else {
            let capabilities = backend.timer_capabilities().unwrap_or_else(|e| {
                log::warn!("Timer range unavailable ({}), assuming defaults", e);
                Default::default()
            });
            let ms = capabilities.clamp(p.timer_resolution_ms);
            report.record(Setting::TimerResolution(ms), backend.set_timer_resolution(ms));
        }

        report.record(
            Setting::CoreParking(p.core_parking),
            backend.set_core_parking(p.core_parking),
        );

        if p.disable_throttling {
            report.record(Setting::DisableThrottling, backend.disable_throttling());
        }

        report.record(
            Setting::Network(p.network_mode),
            backend.optimize_network(p.network_mode),
        );

        if let Some(on) = p.foreground_boost {
            report.record(Setting::ForegroundBoost(on), backend.set_foreground_boost(on));
        }
        if let Some(on) = p.long_quantum {
            report.record(Setting::LongQuantum(on), backend.set_long_quantum(on));
        }
        if let Some(on) = p.variable_quantum {
            report.record(Setting::VariableQuantum(on), backend.set_variable_quantum(on));
        }

        let core_count = backend.logical_core_count();

        if let Some(pid) = options.target_pid {
            report.record(
                Setting::ProcessPriority {
                    pid,
                    class: p.priority_class,
                },
                backend.set_process_priority(pid, p.priority_class),
            );

            if !p.affinity.is_all() {
                match p.affinity.restricted_to(core_count) {
                    Some(mask) => report.record(
                        Setting::ProcessAffinity { pid, mask },
                        backend.set_process_affinity(pid, mask),
                    ),
                    None => report.record(
                        Setting::ProcessAffinity {
                            pid,
                            mask: p.affinity,
                        },
                        Err(TuningError::invalid_parameter(format!(
                            "affinity {} selects none of the {} logical cores",
                            p.affinity, core_count
                        ))),
                    ),
                }
            }

            if let Some(priority) = p.memory_priority {
                report.record(
                    Setting::MemoryPriority { pid, priority },
                    backend.set_memory_priority(pid, priority),
                );
            }
        }

        for route in &p.interrupt_routes {
            let result = if (route.core as usize) < core_count {
                backend.route_interrupts(route.category, route.core)
            } else {
                Err(TuningError::invalid_parameter(format!(
                    "core {} does not exist ({} logical cores)",
                    route.core, core_count
                )))
            };
            report.record(Setting::Interrupts(*route), result);
        }
    }
}
