use super::types::ProfileType;
use crate::core::tuning::{Setting, TuningError};

/// Result of one backend call issued during an apply.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingOutcome {
    pub setting: Setting,
    pub result: Result<(), TuningError>,
}

impl SettingOutcome {
    pub fn is_applied(&self) -> bool {
        self.result.is_ok()
    }
}

/// Per-setting outcome of applying a profile.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplyReport {
    pub profile_type: ProfileType,
    pub profile_name: String,
    pub outcomes: Vec<SettingOutcome>,
}

impl ApplyReport {
    pub fn new(profile_type: ProfileType, profile_name: &str) -> Self {
        Self {
            profile_type,
            profile_name: profile_name.to_string(),
            outcomes: Vec::new(),
        }
    }

    /// Append an outcome, logging it with the attempted value.
    pub fn record(&mut self, setting: Setting, result: Result<(), TuningError>) {
        match &result {
            Ok(()) => log::info!("Applied {}", setting),
            Err(e) => log::error!("Failed to apply {}: {}", setting, e),
        }
        self.outcomes.push(SettingOutcome { setting, result });
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn applied(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_applied()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.applied()
    }

    pub fn failures(&self) -> impl Iterator<Item = &SettingOutcome> {
        self.outcomes.iter().filter(|o| !o.is_applied())
    }

    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(SettingOutcome::is_applied)
    }

    /// e.g. "4 of 7 settings applied"
    pub fn summary(&self) -> String {
        format!("{} of {} settings applied", self.applied(), self.total())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts_partial_success() {
        let mut report = ApplyReport::new(ProfileType::Gaming, "Gaming");
        report.record(Setting::TimerResolution(0.5), Ok(()));
        report.record(
            Setting::DisableThrottling,
            Err(TuningError::permission_denied("not elevated")),
        );
        report.record(Setting::ForegroundBoost(true), Ok(()));

        assert_eq!(report.summary(), "2 of 3 settings applied");
        assert!(!report.is_success());
        assert_eq!(report.failed(), 1);
        assert_eq!(report.failures().count(), 1);
    }

    #[test]
    fn test_empty_report_is_success() {
        let report = ApplyReport::new(ProfileType::Balanced, "Balanced");
        assert!(report.is_success());
        assert_eq!(report.summary(), "0 of 0 settings applied");
    }
}
