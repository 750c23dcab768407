use pctune::core::config::Config;
use pctune::core::layout::DashboardLayout;
use pctune::core::profiles::ActivationPolicy;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.polling_interval_ms, 1000);
    assert_eq!(config.activation_policy, ActivationPolicy::Always);
    assert!(config.gaming_keywords.iter().any(|k| k == "steam"));
    assert!(config.streaming_keywords.iter().any(|k| k == "obs"));
}

#[test]
fn test_config_paths_follow_overrides() {
    let dir = TempDir::new().unwrap();
    let config = Config {
        profiles_dir: Some(dir.path().join("p")),
        layout_path: Some(dir.path().join("l.json")),
        ..Default::default()
    };
    assert_eq!(config.profiles_dir().unwrap(), dir.path().join("p"));
    assert_eq!(config.layout_path().unwrap(), dir.path().join("l.json"));
}

#[test]
fn test_layout_file_merges_over_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("layout.json");
    fs::write(
        &path,
        r#"{"version":"1.0","widgets":[{"id":"gpu_monitor","position":[5,6],"size":[300,200]}]}"#,
    )
    .unwrap();

    let layout = DashboardLayout::load_or_default(&path);
    let gpu = layout.widget("gpu_monitor").unwrap();
    assert_eq!(gpu.position, [5.0, 6.0]);
    assert_eq!(gpu.size, [300.0, 200.0]);
    assert!(gpu.visible);
    assert_eq!(layout.widget("cpu_monitor").unwrap().position, [20.0, 20.0]);
}

#[test]
fn test_corrupt_layout_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("layout.json");
    fs::write(&path, "not json").unwrap();
    assert_eq!(DashboardLayout::load_or_default(&path), DashboardLayout::default());
}
