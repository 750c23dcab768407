use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::record::ProfileRecord;
use super::types::Profile;
use crate::error::{Result, TuneError};

const MAX_NAME_LEN: usize = 64;
const FORBIDDEN_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Reject names that could escape the profiles directory or are not valid file names.
pub fn validate_profile_name(name: &str) -> Result<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(TuneError::profile("profile name cannot be empty"));
    }
    if trimmed.len() > MAX_NAME_LEN {
        return Err(TuneError::profile(format!(
            "profile name longer than {} characters",
            MAX_NAME_LEN
        )));
    }
    if trimmed != name {
        return Err(TuneError::profile(
            "profile name cannot start or end with whitespace",
        ));
    }
    if name.contains("..") || name.starts_with('.') {
        return Err(TuneError::profile(format!("invalid profile name '{}'", name)));
    }
    if name.chars().any(|c| FORBIDDEN_CHARS.contains(&c) || c.is_control()) {
        return Err(TuneError::profile(format!(
            "profile name '{}' contains a forbidden character",
            name
        )));
    }
    Ok(())
}

/// One JSON file per named profile.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    dir: PathBuf,
}

impl ProfileStore {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, name: &str) -> Result<PathBuf> {
        validate_profile_name(name)?;
        Ok(self.dir.join(format!("{}.json", name)))
    }

    /// Write `profile` under `name`. Anything [`ProfileStore::load`] would reject is
    /// refused here, before touching the disk.
    pub fn save(&self, name: &str, profile: &Profile) -> Result<PathBuf> {
        let path = self.path_for(name)?;
        fs::create_dir_all(&self.dir)?;

        let record = ProfileRecord::from(profile);
        record.validate()?;

        let json = serde_json::to_string_pretty(&record)?;
        fs::write(&path, json)?;
        Ok(path)
    }

    pub fn load(&self, name: &str) -> Result<Profile> {
        let path = self.path_for(name)?;
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(TuneError::profile_not_found(name));
            }
            Err(e) => return Err(e.into()),
        };

        let record: ProfileRecord = serde_json::from_str(&data)?;
        Profile::try_from(record)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name).map(|p| p.is_file()).unwrap_or(false)
    }

    pub fn delete(&self, name: &str) -> Result<()> {
        let path = self.path_for(name)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(TuneError::profile_not_found(name)),
            Err(e) => Err(e.into()),
        }
    }

    /// Names of all stored profiles, sorted. A missing directory is an empty list.
    pub fn list(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .filter_map(|path| {
                path.file_stem()
                    .map(|stem| stem.to_string_lossy().to_string())
            })
            .collect();
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::profiles::registry::default_profile;
    use crate::core::profiles::ProfileType;
    use tempfile::TempDir;

    #[test]
    fn test_validate_profile_name() {
        assert!(validate_profile_name("My Gaming").is_ok());
        assert!(validate_profile_name("co-op_v2.1").is_ok());
        assert!(validate_profile_name("").is_err());
        assert!(validate_profile_name("   ").is_err());
        assert!(validate_profile_name("../escape").is_err());
        assert!(validate_profile_name("a/b").is_err());
        assert!(validate_profile_name("a\\b").is_err());
        assert!(validate_profile_name(".hidden").is_err());
        assert!(validate_profile_name(&"x".repeat(65)).is_err());
    }

    #[test]
    fn test_load_missing_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = ProfileStore::new(dir.path());
        assert!(matches!(
            store.load("nope"),
            Err(TuneError::ProfileNotFound(_))
        ));
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = TempDir::new().unwrap();
        let store = ProfileStore::new(dir.path());
        fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
        assert!(matches!(store.load("broken"), Err(TuneError::Json(_))));
    }

    #[test]
    fn test_save_rejects_custom_type() {
        let dir = TempDir::new().unwrap();
        let store = ProfileStore::new(dir.path());
        let mut profile = default_profile(ProfileType::Gaming);
        profile.profile_type = ProfileType::Custom;

        assert!(matches!(
            store.save("custom_typed", &profile),
            Err(TuneError::Persistence(_))
        ));
        assert!(!store.exists("custom_typed"));
    }

    #[test]
    fn test_save_rejects_bad_timer_resolution() {
        let dir = TempDir::new().unwrap();
        let store = ProfileStore::new(dir.path());

        for ms in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let mut profile = default_profile(ProfileType::Workstation);
            profile.parameters.timer_resolution_ms = ms;
            assert!(
                matches!(store.save("timer", &profile), Err(TuneError::Persistence(_))),
                "timer {ms}"
            );
        }
        assert!(!store.exists("timer"));
    }

    #[test]
    fn test_save_rejects_empty_profile_name() {
        let dir = TempDir::new().unwrap();
        let store = ProfileStore::new(dir.path());
        let mut profile = default_profile(ProfileType::Streaming);
        profile.name = "  ".to_string();

        assert!(matches!(
            store.save("unnamed", &profile),
            Err(TuneError::Persistence(_))
        ));
        assert!(!store.exists("unnamed"));
    }

    #[test]
    fn test_list_and_delete() {
        let dir = TempDir::new().unwrap();
        let store = ProfileStore::new(dir.path().join("profiles"));
        assert!(store.list().unwrap().is_empty());

        let profile = default_profile(ProfileType::Gaming);
        store.save("zeta", &profile).unwrap();
        store.save("alpha", &profile).unwrap();
        fs::write(dir.path().join("profiles").join("notes.txt"), "x").unwrap();

        assert_eq!(store.list().unwrap(), vec!["alpha", "zeta"]);
        assert!(store.exists("alpha"));

        store.delete("alpha").unwrap();
        assert_eq!(store.list().unwrap(), vec!["zeta"]);
        assert!(matches!(
            store.delete("alpha"),
            Err(TuneError::ProfileNotFound(_))
        ));
    }
}
