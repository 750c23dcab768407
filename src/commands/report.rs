use anyhow::{bail, Result};
use colored::Colorize;

use super::context::AppContext;
use crate::core::profiles::{ApplyReport, ProfileManager};
use crate::core::tuning::{Setting, TuningError};
use crate::platform::elevation_hint;

const TIMER_NOTE: &str =
    "Timer resolution is held only while pctune runs and returns to the system default when it exits.";

/// Which profile `manager` considers active after `report`, and whether the apply changed it.
fn active_profile_line(manager: &ProfileManager, report: &ApplyReport) -> String {
    let active = manager.current_profile_name();
    if active == report.profile_name {
        format!("Active profile: {}", active)
    } else {
        format!(
            "Active profile: {} ('{}' not activated under the {:?} policy)",
            active,
            report.profile_name,
            manager.policy()
        )
    }
}

fn timer_was_raised(report: &ApplyReport) -> bool {
    report
        .outcomes
        .iter()
        .any(|o| o.is_applied() && matches!(o.setting, Setting::TimerResolution(_)))
}

/// Print an apply report. Fails when any setting failed, so the process exits non-zero.
pub fn print_report(
    ctx: &AppContext,
    manager: &ProfileManager,
    report: &ApplyReport,
) -> Result<()> {
    println!(
        "{} {} ({})",
        "Applying profile".cyan().bold(),
        report.profile_name.bold(),
        report.profile_type
    );

    for outcome in &report.outcomes {
        match &outcome.result {
            Ok(()) => println!("  {} {}", "✓".green(), outcome.setting),
            Err(e) => println!(
                "  {} {} {}",
                "✗".red(),
                outcome.setting,
                format!("({})", e).dimmed()
            ),
        }
    }

    ctx.print_recorded_calls();
    println!();
    println!("{}", active_profile_line(manager, report).cyan());
    if timer_was_raised(report) && !ctx.is_dry_run() {
        println!("{} {}", "Note:".dimmed(), TIMER_NOTE.dimmed());
    }

    if report.is_success() {
        println!("{}", report.summary().green().bold());
        return Ok(());
    }

    println!("{}", report.summary().yellow().bold());
    let denied = report
        .failures()
        .any(|o| matches!(o.result, Err(TuningError::PermissionDenied(_))));
    if denied {
        println!("{} {}", "Hint:".yellow(), elevation_hint());
    }

    bail!(
        "{} of {} settings failed",
        report.failed(),
        report.total()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::profiles::{ActivationPolicy, ProfileStore, ProfileType};
    use crate::core::tuning::RecordingBackend;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn manager_with(
        backend: RecordingBackend,
        policy: ActivationPolicy,
    ) -> (ProfileManager, TempDir) {
        let dir = TempDir::new().unwrap();
        let manager =
            ProfileManager::new(Arc::new(backend), ProfileStore::new(dir.path()), policy);
        (manager, dir)
    }

    #[test]
    fn test_active_line_names_applied_profile() {
        let (manager, _dir) = manager_with(RecordingBackend::new(), ActivationPolicy::Always);
        let report = manager.apply_profile(ProfileType::Gaming).unwrap();
        assert_eq!(active_profile_line(&manager, &report), "Active profile: Gaming");
    }

    #[test]
    fn test_active_line_shows_policy_when_not_activated() {
        let backend = RecordingBackend::new().fail_when(|s| matches!(s, Setting::Network(_)));
        let (manager, _dir) = manager_with(backend, ActivationPolicy::OnSuccess);
        let report = manager.apply_profile(ProfileType::Streaming).unwrap();

        let line = active_profile_line(&manager, &report);
        assert!(line.starts_with("Active profile: Balanced"), "{line}");
        assert!(line.contains("'Streaming' not activated"), "{line}");
        assert!(line.contains("OnSuccess"), "{line}");
    }

    #[test]
    fn test_timer_note_only_when_resolution_was_raised() {
        let (manager, _dir) = manager_with(RecordingBackend::new(), ActivationPolicy::Always);
        let gaming = manager.apply_profile(ProfileType::Gaming).unwrap();
        assert!(timer_was_raised(&gaming));

        let balanced = manager.apply_profile(ProfileType::Balanced).unwrap();
        assert!(!timer_was_raised(&balanced));

        let (failing, _failing_dir) = manager_with(
            RecordingBackend::new().fail_when(|s| matches!(s, Setting::TimerResolution(_))),
            ActivationPolicy::Always,
        );
        let report = failing.apply_profile(ProfileType::Gaming).unwrap();
        assert!(!timer_was_raised(&report));
    }
}
