//! Shared wiring for command handlers.

use anyhow::{Context, Result};
use colored::Colorize;
use std::sync::Arc;

use crate::core::analyzer::{ProcessClassifier, SystemAnalyzer};
use crate::core::config::Config;
use crate::core::profiles::{ProfileManager, ProfileStore};
use crate::core::telemetry::TelemetrySource;
use crate::core::tuning::{RecordedCall, RecordingBackend, TuningBackend};
use crate::platform::default_backend;

/// One instance of each component, built once in `main`.
pub struct AppContext {
    pub config: Config,
    backend: Arc<dyn TuningBackend>,
    recorder: Option<Arc<RecordingBackend>>,
}

impl AppContext {
    /// With `dry_run`, tuning calls are recorded instead of executed.
    pub fn new(config: Config, dry_run: bool) -> Self {
        let real = default_backend();
        if dry_run {
            let recorder =
                Arc::new(RecordingBackend::new().with_core_count(real.logical_core_count()));
            Self {
                config,
                backend: recorder.clone(),
                recorder: Some(recorder),
            }
        } else {
            Self {
                config,
                backend: real,
                recorder: None,
            }
        }
    }

    pub fn is_dry_run(&self) -> bool {
        self.recorder.is_some()
    }

    pub fn backend(&self) -> Arc<dyn TuningBackend> {
        Arc::clone(&self.backend)
    }

    pub fn profile_manager(&self) -> Result<ProfileManager> {
        let dir = self
            .config
            .profiles_dir()
            .context("Could not determine profiles directory")?;
        Ok(ProfileManager::new(
            self.backend(),
            ProfileStore::new(dir),
            self.config.activation_policy,
        ))
    }

    pub fn analyzer(&self, telemetry: Arc<dyn TelemetrySource>) -> SystemAnalyzer {
        let classifier = ProcessClassifier::new(
            self.config.gaming_keywords.iter(),
            self.config.streaming_keywords.iter(),
        );
        SystemAnalyzer::new(telemetry, classifier)
    }

    /// Print what a dry run would have done.
    pub fn print_recorded_calls(&self) {
        let Some(recorder) = &self.recorder else {
            return;
        };

        println!();
        println!("{}", "DRY RUN - no system settings were changed".yellow().bold());
        for call in recorder.calls() {
            let line = match call {
                RecordedCall::Setting(setting) => setting.to_string(),
                RecordedCall::ActivePowerPlan(guid) => format!("activate power plan {}", guid),
                RecordedCall::ThreadPriority { tid, priority } => {
                    format!("thread {} priority {}", tid, priority)
                }
                RecordedCall::ThreadAffinity { tid, mask } => {
                    format!("thread {} affinity {}", tid, mask)
                }
                RecordedCall::ClearStandbyList => "clear standby list".to_string(),
                RecordedCall::EmptyWorkingSet(pid) => format!("trim working set of {}", pid),
            };
            println!("  {} {}", "would".dimmed(), line);
        }
    }
}
