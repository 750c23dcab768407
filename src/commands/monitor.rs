//! Live telemetry in the terminal until Ctrl+C.

use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;
use humansize::{format_size, BINARY};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::context::AppContext;
use crate::core::telemetry::{SystemMetrics, TelemetryRuntime, TelemetryStore};

const TOP_PROCESSES: usize = 5;

pub fn execute(ctx: &AppContext, matches: &ArgMatches) -> Result<()> {
    let interval_ms = matches
        .get_one::<u64>("interval")
        .copied()
        .unwrap_or(ctx.config.polling_interval_ms);
    let json = matches.get_flag("json");

    let stop = Arc::new(AtomicBool::new(false));
    let stop_clone = stop.clone();
    ctrlc::set_handler(move || {
        stop_clone.store(true, Ordering::Relaxed);
    })
    .map_err(|e| anyhow::anyhow!("Failed to set Ctrl+C handler: {}", e))?;

    let store = Arc::new(TelemetryStore::new());
    let runtime = TelemetryRuntime::start(store.clone(), interval_ms)
        .context("Failed to start telemetry sampling")?;
    let interval = runtime.polling_interval();

    if !json {
        println!(
            "{} {}",
            "Monitoring every".cyan().bold(),
            format!("{} ms, press Ctrl+C to stop", interval.as_millis()).dimmed()
        );
    }

    // Let the first CPU delta accumulate.
    wait(&stop, sysinfo::MINIMUM_CPU_UPDATE_INTERVAL.max(interval));

    while !stop.load(Ordering::Relaxed) {
        let snapshot = store.snapshot();
        if json {
            println!("{}", serde_json::to_string(&snapshot)?);
        } else {
            print_snapshot(&snapshot);
        }
        wait(&stop, interval);
    }

    runtime.shutdown();
    if !json {
        println!("{}", "Monitoring stopped".dimmed());
    }
    Ok(())
}

// Sleep in short slices so Ctrl+C is noticed promptly.
fn wait(stop: &AtomicBool, total: Duration) {
    let slice = Duration::from_millis(50);
    let mut waited = Duration::ZERO;
    while waited < total && !stop.load(Ordering::Relaxed) {
        std::thread::sleep(slice);
        waited += slice;
    }
}

fn local_time(timestamp: i64) -> String {
    chrono::DateTime::from_timestamp(timestamp, 0)
        .map(|t| t.with_timezone(&chrono::Local).format("%H:%M:%S").to_string())
        .unwrap_or_default()
}

fn print_snapshot(metrics: &SystemMetrics) {
    let memory = &metrics.memory;
    println!(
        "{}  CPU {:>5.1}%  RAM {:>5.1}% ({} / {})  {} processes",
        local_time(metrics.timestamp).dimmed(),
        metrics.cpu.mean_usage(),
        memory.usage_percent,
        format_size(memory.used_bytes, BINARY),
        format_size(memory.total_bytes, BINARY),
        metrics.processes.len()
    );

    let mut top: Vec<_> = metrics.processes.iter().collect();
    top.sort_by(|a, b| b.cpu_usage_percent.total_cmp(&a.cpu_usage_percent));
    for process in top.into_iter().take(TOP_PROCESSES) {
        println!(
            "    {:>7}  {:<28} {:>5.1}%  {}",
            process.pid,
            process.name,
            process.cpu_usage_percent,
            format_size(process.memory_bytes, BINARY)
        );
    }
}
