use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use simulation::{CalendarRunner, PopulationStore};
use tokio::sync::watch;
use tracing::info;

/// Shared application state handed to every handler.
pub struct AppState {
    pub store: PopulationStore,
    pub calendar_runner: Mutex<Option<CalendarRunner>>,
    shutdown: watch::Sender<bool>,
}

impl AppState {
    pub fn new(store: PopulationStore) -> Self {
        let (shutdown, _) = watch::channel(false);
        Self {
            store,
            calendar_runner: Mutex::new(None),
            shutdown,
        }
    }

    fn runner(&self) -> MutexGuard<'_, Option<CalendarRunner>> {
        self.calendar_runner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Starts ticking the store. A running calendar is left alone.
    pub fn start_calendar(&self, interval: Duration) {
        let mut slot = self.runner();
        let runner = slot.get_or_insert_with(CalendarRunner::new);
        runner.start(self.store.clone(), interval, |summary| {
            info!(
                year = summary.year,
                version = summary.version,
                births = summary.births,
                deaths = summary.deaths,
                unions = summary.unions_formed,
                living = summary.living,
                "year simulated"
            );
        });
    }

    pub fn stop_calendar(&self) {
        if let Some(mut runner) = self.runner().take() {
            runner.stop();
        }
    }

    pub fn calendar_running(&self) -> bool {
        self.runner().as_ref().is_some_and(CalendarRunner::is_running)
    }

    /// Ends open change streams so the server can drain.
    pub fn shutdown(&self) {
        self.shutdown.send_replace(true);
    }

    /// Resolves once [`AppState::shutdown`] has been called.
    pub fn shutdown_signal(&self) -> impl std::future::Future<Output = ()> + Send + 'static {
        let mut rx = self.shutdown.subscribe();
        async move {
            let _ = rx.wait_for(|stopped| *stopped).await;
        }
    }
}
