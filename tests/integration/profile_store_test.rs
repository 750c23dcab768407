use pctune::core::profiles::{
    default_profile, ProfileStore, ProfileType,
};
use pctune::core::tuning::{AffinityMask, DeviceCategory, InterruptRoute, MemoryPriority};
use pctune::TuneError;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_saved_profile_round_trips_exactly() {
    let dir = TempDir::new().unwrap();
    let store = ProfileStore::new(dir.path());

    let mut profile = default_profile(ProfileType::Gaming);
    profile.name = "Ranked".to_string();
    profile.parameters.affinity = AffinityMask(0b1110);
    profile.parameters.memory_priority = Some(MemoryPriority::Normal);
    profile.parameters.interrupt_routes = vec![InterruptRoute {
        category: DeviceCategory::Network,
        core: 3,
    }];

    store.save("Ranked", &profile).unwrap();
    assert_eq!(store.load("Ranked").unwrap(), profile);
}

#[test]
fn test_record_uses_documented_field_names() {
    let dir = TempDir::new().unwrap();
    let store = ProfileStore::new(dir.path());

    let path = store
        .save("stream", &default_profile(ProfileType::Streaming))
        .unwrap();
    assert_eq!(path, dir.path().join("stream.json"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(json["name"], "Streaming");
    assert_eq!(json["type"], 1);
    assert_eq!(json["timerResolution"], 1.0);
    assert_eq!(json["disableCoreParking"], false);
    assert_eq!(json["processPriority"], 0x8000);
    assert_eq!(json["processAffinity"], 0);
}

#[test]
fn test_loads_record_with_only_core_fields() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("legacy.json"),
        r#"{
            "name": "legacy",
            "type": 0,
            "timerResolution": 0.5,
            "disableCoreParking": true,
            "processPriority": 128,
            "processAffinity": 0
        }"#,
    )
    .unwrap();

    let profile = ProfileStore::new(dir.path()).load("legacy").unwrap();
    assert_eq!(profile.profile_type, ProfileType::Gaming);
    assert_eq!(profile.parameters, default_profile(ProfileType::Gaming).parameters);
}

#[test]
fn test_out_of_range_type_is_rejected() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("bad.json"),
        r#"{"name":"bad","type":7,"timerResolution":1.0,"disableCoreParking":false,
            "processPriority":32,"processAffinity":0}"#,
    )
    .unwrap();

    assert!(matches!(
        ProfileStore::new(dir.path()).load("bad"),
        Err(TuneError::Persistence(_))
    ));
}

#[test]
fn test_names_cannot_escape_directory() {
    let dir = TempDir::new().unwrap();
    let store = ProfileStore::new(dir.path().join("profiles"));
    let profile = default_profile(ProfileType::Balanced);

    for name in ["../outside", "a/b", "C:evil", ""] {
        assert!(
            matches!(store.save(name, &profile), Err(TuneError::Profile(_))),
            "{name:?} should be rejected"
        );
    }
    assert!(!dir.path().join("outside.json").exists());
}
