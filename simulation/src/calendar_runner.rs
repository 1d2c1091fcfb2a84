//! Calendar Runner - background thread that ticks the simulation at a fixed interval

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{info, warn};

use crate::store::PopulationStore;
use crate::world::TickSummary;

/// Owns the ticking thread. Dropping the runner stops it.
pub struct CalendarRunner {
    is_running: Arc<AtomicBool>,
    stop_tx: Option<Sender<()>>,
    thread_handle: Option<JoinHandle<()>>,
}

impl CalendarRunner {
    pub fn new() -> Self {
        Self {
            is_running: Arc::new(AtomicBool::new(false)),
            stop_tx: None,
            thread_handle: None,
        }
    }

    /// Start ticking `store` every `interval`.
    ///
    /// The first tick happens one interval after start. `callback` receives
    /// each year's summary on the runner thread.
    pub fn start<F>(&mut self, store: PopulationStore, interval: Duration, callback: F)
    where
        F: Fn(TickSummary) + Send + 'static,
    {
        if self.is_running.load(Ordering::Acquire) {
            warn!("calendar runner already running");
            return;
        }

        info!(interval_ms = interval.as_millis() as u64, "starting calendar runner");
        self.is_running.store(true, Ordering::Release);
        let running = Arc::clone(&self.is_running);
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || {
            loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {}
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
                let summary = store.tick();
                callback(summary);
            }
            running.store(false, Ordering::Release);
            info!("calendar runner thread stopped");
        });

        self.stop_tx = Some(stop_tx);
        self.thread_handle = Some(handle);
    }

    /// Stop ticking and wait for an in-flight tick to finish.
    pub fn stop(&mut self) {
        let Some(handle) = self.thread_handle.take() else {
            return;
        };

        info!("stopping calendar runner");
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if handle.join().is_err() {
            warn!("calendar runner thread panicked");
        }
        self.is_running.store(false, Ordering::Release);
    }

    pub fn is_running(&self) -> bool {
        self.is_running.load(Ordering::Acquire)
    }
}

impl Default for CalendarRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CalendarRunner {
    fn drop(&mut self) {
        self.stop();
    }
}
