//! Population Store
//!
//! Shared, thread-safe handle over one [`SimulationWorld`]. Every public
//! operation runs under a single lock, so readers never observe a half
//! applied year. Version changes are published on a watch channel after the
//! lock is released and never move backwards; subscribers that fall behind
//! only see the latest value.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tracing::warn;

use crate::components::IndividualId;
use crate::error::ValidationError;
use crate::records::{
    Family, Individual, NewFamily, NewIndividual, Snapshot, StateView, Status, STATE_PEOPLE_LIMIT,
};
use crate::svg;
use crate::world::{SimulationWorld, TickSummary};

#[derive(Clone)]
pub struct PopulationStore {
    world: Arc<Mutex<SimulationWorld>>,
    changes: Arc<watch::Sender<u64>>,
}

impl PopulationStore {
    pub fn new(world: SimulationWorld) -> Self {
        let (tx, _rx) = watch::channel(world.version());
        Self {
            world: Arc::new(Mutex::new(world)),
            changes: Arc::new(tx),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SimulationWorld> {
        self.world.lock().unwrap_or_else(|poisoned: PoisonError<_>| {
            warn!("population lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Runs `f` against the world under the lock.
    pub fn read<T>(&self, f: impl FnOnce(&SimulationWorld) -> T) -> T {
        f(&self.lock())
    }

    /// Runs a mutation batch and notifies subscribers if the version moved.
    pub fn mutate<T>(&self, f: impl FnOnce(&mut SimulationWorld) -> T) -> T {
        let (result, before, after) = {
            let mut world = self.lock();
            let before = world.version();
            let result = f(&mut world);
            (result, before, world.version())
        };
        if after != before {
            self.publish(after);
        }
        result
    }

    /// Publishes `version` unless a newer one already went out. Batches
    /// that release the lock in order can still publish out of order.
    fn publish(&self, version: u64) {
        self.changes.send_if_modified(|current| {
            if version > *current {
                *current = version;
                true
            } else {
                false
            }
        });
    }

    pub fn version(&self) -> u64 {
        self.read(SimulationWorld::version)
    }

    pub fn status(&self) -> Status {
        self.read(SimulationWorld::status)
    }

    pub fn snapshot(&self) -> Snapshot {
        self.read(SimulationWorld::snapshot)
    }

    /// Bounded view used by the dashboard.
    pub fn state(&self) -> StateView {
        self.state_view(STATE_PEOPLE_LIMIT)
    }

    pub fn state_view(&self, limit: usize) -> StateView {
        self.read(|world| world.state_view(limit))
    }

    pub fn individual(&self, id: &IndividualId) -> Option<Individual> {
        self.read(|world| world.individual(id))
    }

    pub fn levels(&self) -> HashMap<IndividualId, u32> {
        self.read(SimulationWorld::levels)
    }

    /// Snapshot and levels taken under one lock, rendered outside it.
    pub fn render_tree(&self) -> String {
        let (snapshot, levels) = self.read(|world| (world.snapshot(), world.levels()));
        svg::render_tree(&snapshot, &levels)
    }

    pub fn tick(&self) -> TickSummary {
        self.mutate(SimulationWorld::tick)
    }

    pub fn simulate_year(&self) -> TickSummary {
        self.mutate(SimulationWorld::simulate_year)
    }

    pub fn create_individual(&self, new: NewIndividual) -> Result<Individual, ValidationError> {
        self.mutate(|world| world.create_individual(new))
    }

    pub fn create_family(&self, new: NewFamily) -> Result<Family, ValidationError> {
        self.mutate(|world| world.create_family(new))
    }

    pub fn seed_population(&self, count: usize) {
        self.mutate(|world| world.seed_population(count))
    }

    pub fn reset(&self) {
        self.mutate(SimulationWorld::reset)
    }

    /// Raw version receiver.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }

    /// Change feed starting from the current version.
    pub fn changes(&self) -> ChangeFeed {
        ChangeFeed {
            store: self.clone(),
            rx: self.subscribe(),
            last: None,
        }
    }
}

impl Default for PopulationStore {
    fn default() -> Self {
        Self::new(SimulationWorld::new())
    }
}

/// Yields a [`Status`] each time the version differs from the last one
/// delivered. Bursts of changes collapse into one notification.
pub struct ChangeFeed {
    store: PopulationStore,
    rx: watch::Receiver<u64>,
    last: Option<u64>,
}

impl ChangeFeed {
    /// Waits for the next change. `None` once the store is gone.
    pub async fn next(&mut self) -> Option<Status> {
        loop {
            self.rx.changed().await.ok()?;
            let version = *self.rx.borrow_and_update();
            if self.last == Some(version) {
                continue;
            }
            let status = self.store.status();
            // the store may already be past `version`
            if self.last.is_some_and(|last| status.version <= last) {
                continue;
            }
            self.last = Some(status.version);
            return Some(status);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    fn store() -> PopulationStore {
        PopulationStore::new(SimulationWorld::with_seed(11))
    }

    #[test]
    fn test_clones_share_state() {
        let store = store();
        let other = store.clone();
        other.seed_population(5);
        assert_eq!(store.status().counts.people, 5);
        assert_eq!(store.version(), 1);
    }

    #[test]
    fn test_failed_validation_publishes_nothing() {
        let store = store();
        let rx = store.subscribe();
        assert!(store.create_family(NewFamily::default()).is_err());
        assert!(!rx.has_changed().unwrap());
        assert_eq!(store.version(), 0);
    }

    #[test]
    fn test_reads_do_not_bump_version() {
        let store = store();
        store.seed_population(3);
        let v = store.version();
        let _ = store.snapshot();
        let _ = store.state();
        let _ = store.render_tree();
        assert_eq!(store.version(), v);
    }

    #[tokio::test]
    async fn test_change_feed_reports_new_version() {
        let store = store();
        let mut feed = store.changes();

        let person = store.create_individual(NewIndividual::default()).unwrap();
        let status = timeout(Duration::from_secs(1), feed.next())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(status.version, 1);
        assert_eq!(status.counts.people, 1);
        assert!(store.individual(&person.id).is_some());
    }

    #[tokio::test]
    async fn test_change_feed_coalesces_bursts() {
        let store = store();
        let mut feed = store.changes();

        for _ in 0..5 {
            store.tick();
        }
        let status = timeout(Duration::from_secs(1), feed.next())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(status.version, 5);

        // nothing pending after the burst
        assert!(timeout(Duration::from_millis(50), feed.next()).await.is_err());
    }

    #[test]
    fn test_late_publish_does_not_rewind_version() {
        let store = store();
        let rx = store.subscribe();
        store.tick();
        store.tick();
        // a batch that finished earlier publishing after the newer one
        store.publish(1);
        assert_eq!(*rx.borrow(), 2);
        store.publish(2);
        assert_eq!(*rx.borrow(), 2);
    }

    #[tokio::test]
    async fn test_change_feed_skips_already_delivered_status() {
        let store = store();
        let mut feed = store.changes();

        store.tick();
        store.tick();
        let status = timeout(Duration::from_secs(1), feed.next())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(status.version, 2);

        // stale value on the channel while the store stays at 2
        store.changes.send_replace(1);
        assert!(timeout(Duration::from_millis(50), feed.next()).await.is_err());

        store.tick();
        let status = timeout(Duration::from_secs(1), feed.next())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(status.version, 3);
    }

    #[tokio::test]
    async fn test_concurrent_ticks_serialize() {
        let store = store();
        store.seed_population(40);
        let start = store.status();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let store = store.clone();
                tokio::task::spawn_blocking(move || store.tick())
            })
            .collect();
        let mut years = Vec::new();
        for handle in handles {
            years.push(handle.await.unwrap().year);
        }
        years.sort();

        assert_eq!(years, (1..=4).map(|n| start.year + n).collect::<Vec<_>>());
        assert_eq!(store.version(), start.version + 4);
    }
}
