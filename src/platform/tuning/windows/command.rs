use serde::de::DeserializeOwned;
use std::os::windows::process::CommandExt;
use std::process::Command;

use crate::core::tuning::{TuningError, TuningResult};

const CREATE_NO_WINDOW: u32 = 0x08000000;

/// Run a console tool without a window and return its stdout.
pub fn run(program: &str, args: &[String]) -> TuningResult<String> {
    let output = Command::new(program)
        .args(args)
        .creation_flags(CREATE_NO_WINDOW)
        .output()
        .map_err(|e| TuningError::command(format!("{} could not be started: {}", program, e)))?;

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    if output.status.success() {
        return Ok(stdout);
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let message = if stderr.trim().is_empty() {
        stdout.trim().to_string()
    } else {
        stderr.trim().to_string()
    };
    if message.to_lowercase().contains("access is denied") {
        return Err(TuningError::permission_denied(format!("{}: {}", program, message)));
    }
    Err(TuningError::command(format!(
        "{} {} exited with {}: {}",
        program,
        args.join(" "),
        output.status,
        message
    )))
}

pub fn run_powershell_json<T: DeserializeOwned>(command: &str) -> TuningResult<T> {
    let stdout = run(
        "powershell",
        &["-NoProfile".to_string(), "-Command".to_string(), command.to_string()],
    )?;

    serde_json::from_str(&stdout)
        .map_err(|e| TuningError::command(format!("JSON parsing failed: {e}. Output: {stdout}")))
}
