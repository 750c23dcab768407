use pctune::commands::AppContext;
use pctune::core::config::Config;
use pctune::core::profiles::{
    ActivationPolicy, ApplyOptions, ProfileManager, ProfileStore, ProfileType,
};
use pctune::core::tuning::{
    CoreParking, NetworkMode, PriorityClass, RecordingBackend, Setting, TuningBackend,
};
use std::sync::Arc;
use tempfile::TempDir;

fn manager(backend: Arc<RecordingBackend>, dir: &TempDir) -> ProfileManager {
    ProfileManager::new(backend, ProfileStore::new(dir.path()), ActivationPolicy::Always)
}

#[test]
fn test_switching_profiles_tracks_active_state() {
    let dir = TempDir::new().unwrap();
    let backend = Arc::new(RecordingBackend::new());
    let manager = manager(backend.clone(), &dir);

    for profile_type in [
        ProfileType::Gaming,
        ProfileType::Streaming,
        ProfileType::Workstation,
        ProfileType::Balanced,
    ] {
        let report = manager.apply_profile(profile_type).unwrap();
        assert!(report.is_success());
        assert_eq!(manager.current_profile_type(), profile_type);
    }
}

#[test]
fn test_balanced_restores_defaults_after_gaming() {
    let dir = TempDir::new().unwrap();
    let backend = Arc::new(RecordingBackend::new());
    let manager = manager(backend.clone(), &dir);

    manager.apply_profile(ProfileType::Gaming).unwrap();
    manager.apply_profile(ProfileType::Balanced).unwrap();

    let settings = backend.settings();
    let tail = &settings[settings.len() - 3..];
    assert_eq!(
        tail,
        [
            Setting::TimerReset,
            Setting::CoreParking(CoreParking::new(50, 100)),
            Setting::Network(NetworkMode::Default),
        ]
    );
}

#[test]
fn test_partial_failure_report() {
    let dir = TempDir::new().unwrap();
    let backend = Arc::new(
        RecordingBackend::new()
            .fail_when(|s| matches!(s, Setting::Network(_) | Setting::ForegroundBoost(_))),
    );
    let manager = manager(backend, &dir);

    let report = manager.apply_profile(ProfileType::Streaming).unwrap();
    assert_eq!(report.summary(), "3 of 5 settings applied");
    assert_eq!(report.failures().count(), 2);
    assert_eq!(manager.current_profile_type(), ProfileType::Streaming);
}

#[test]
fn test_saved_profile_applies_its_own_bundle() {
    let dir = TempDir::new().unwrap();
    let backend = Arc::new(RecordingBackend::new());
    let manager = manager(backend.clone(), &dir);

    let mut profile = manager.default_profile(ProfileType::Workstation);
    profile.name = "Compile".to_string();
    profile.parameters.priority_class = PriorityClass::High;
    profile.parameters.timer_resolution_ms = 0.75;
    manager.save_profile("Compile", &profile).unwrap();

    manager
        .apply_custom_profile_with("Compile", &ApplyOptions::for_process(99))
        .unwrap();

    let settings = backend.settings();
    assert_eq!(settings[0], Setting::TimerResolution(0.75));
    assert!(settings.contains(&Setting::ProcessPriority {
        pid: 99,
        class: PriorityClass::High
    }));
    assert_eq!(manager.current_profile_type(), ProfileType::Workstation);
    assert_eq!(manager.current_profile_name(), "Compile");
}

#[test]
fn test_dry_run_context_records_instead_of_tuning() {
    let dir = TempDir::new().unwrap();
    let config = Config {
        profiles_dir: Some(dir.path().to_path_buf()),
        ..Default::default()
    };
    let ctx = AppContext::new(config, true);
    assert!(ctx.is_dry_run());
    assert_eq!(ctx.backend().name(), "dry-run");

    let manager = ctx.profile_manager().unwrap();
    let report = manager.apply_profile(ProfileType::Gaming).unwrap();
    assert!(report.is_success());
    assert_eq!(report.total(), 7);
}
