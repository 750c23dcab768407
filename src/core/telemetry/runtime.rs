//! Background sampling runtime.
//!
//! One task, owned by a dedicated Tokio runtime, is the only writer of the
//! [`TelemetryStore`]. Everything else reads the store from its own thread.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use super::collector::MetricsCollector;
use super::store::TelemetryStore;
use crate::error::Result;

pub const DEFAULT_POLLING_INTERVAL_MS: u64 = 1000;
pub const MIN_POLLING_INTERVAL_MS: u64 = 100;
pub const MAX_POLLING_INTERVAL_MS: u64 = 5000;

/// Clamp a polling period to [100, 5000] ms.
pub fn clamp_interval(ms: u64) -> Duration {
    Duration::from_millis(ms.clamp(MIN_POLLING_INTERVAL_MS, MAX_POLLING_INTERVAL_MS))
}

pub struct TelemetryRuntime {
    interval_tx: watch::Sender<Duration>,
    shutdown_tx: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
    runtime: tokio::runtime::Runtime,
}

impl TelemetryRuntime {
    /// Spawn the sampling task. The interval is clamped.
    pub fn start(store: Arc<TelemetryStore>, interval_ms: u64) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_time()
            .thread_name("telemetry-sampler")
            .build()?;

        let period = clamp_interval(interval_ms);
        let (interval_tx, interval_rx) = watch::channel(period);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let task = runtime.spawn(sampling_task(store, interval_rx, shutdown_rx));

        log::info!("Telemetry sampling started ({}ms)", period.as_millis());

        Ok(Self {
            interval_tx,
            shutdown_tx,
            task: Some(task),
            runtime,
        })
    }

    pub fn polling_interval(&self) -> Duration {
        *self.interval_tx.borrow()
    }

    /// Change the period of the running task. Returns the clamped value.
    pub fn set_polling_interval(&self, ms: u64) -> Duration {
        let period = clamp_interval(ms);
        self.interval_tx.send_replace(period);
        period
    }

    /// Signal the task and wait for it to finish.
    pub fn shutdown(mut self) {
        self.stop_and_join();
    }

    fn stop_and_join(&mut self) {
        self.shutdown_tx.send_replace(true);
        if let Some(task) = self.task.take() {
            if let Err(e) = self.runtime.block_on(task) {
                log::error!("Telemetry sampling task ended abnormally: {}", e);
            }
            log::info!("Telemetry sampling stopped");
        }
    }
}

impl Drop for TelemetryRuntime {
    fn drop(&mut self) {
        self.stop_and_join();
    }
}

async fn sampling_task(
    store: Arc<TelemetryStore>,
    mut interval_rx: watch::Receiver<Duration>,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    let mut collector = MetricsCollector::new();

    // CPU usage is only meaningful after a second refresh
    collector.collect_cpu();
    tokio::time::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL).await;

    let mut ticker = interval(*interval_rx.borrow_and_update());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if *shutdown_rx.borrow() {
                    break;
                }
                collector.sample_into(&store);
                log::trace!("Telemetry sample published");
            }
            changed = interval_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let period = *interval_rx.borrow_and_update();
                ticker = interval(period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
                log::debug!("Telemetry polling interval set to {}ms", period.as_millis());
            }
            _ = shutdown_rx.changed() => {
                break;
            }
        }
    }
}
