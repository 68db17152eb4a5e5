//! Debounced write-behind persistence.
//!
//! Each mutation made through [`AutoSaver::update`] cancels any pending save
//! and schedules a new one `delay` later, so a burst of edits produces a
//! single write. [`AutoSaver::shutdown`] runs the pending save immediately.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::constants::DEFAULT_AUTOSAVE_DELAY_MS;
use crate::storage::KeyValueStorage;
use crate::store::{PersistOutcome, ScheduleStore};

pub struct AutoSaver<S> {
    store: Arc<Mutex<ScheduleStore<S>>>,
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl<S> AutoSaver<S>
where
    S: KeyValueStorage + Send + 'static,
{
    pub fn new(store: ScheduleStore<S>, delay: Duration) -> Self {
        AutoSaver {
            store: Arc::new(Mutex::new(store)),
            delay,
            pending: None,
        }
    }

    pub fn with_default_delay(store: ScheduleStore<S>) -> Self {
        Self::new(store, Duration::from_millis(DEFAULT_AUTOSAVE_DELAY_MS))
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Read from the store without scheduling a save.
    pub async fn read<R>(&self, f: impl FnOnce(&ScheduleStore<S>) -> R) -> R {
        let store = self.store.lock().await;
        f(&store)
    }

    /// Mutate the store; if that left it dirty, (re)start the save timer.
    pub async fn update<R>(&mut self, f: impl FnOnce(&mut ScheduleStore<S>) -> R) -> R {
        let (result, dirty) = {
            let mut store = self.store.lock().await;
            let result = f(&mut store);
            (result, store.is_dirty())
        };
        if dirty {
            self.schedule_save();
        }
        result
    }

    /// True while there are changes no save has picked up yet.
    pub async fn has_unsaved_changes(&self) -> bool {
        self.store.lock().await.is_dirty()
    }

    pub fn has_pending_save(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Cancel any pending save and persist right away.
    pub async fn save_now(&mut self) -> PersistOutcome {
        self.cancel_pending();
        self.store.lock().await.persist()
    }

    /// Teardown: flush pending work if the store is dirty and hand the store
    /// back. Returns the flush outcome when a save was needed.
    pub async fn shutdown(mut self) -> (Option<PersistOutcome>, Arc<Mutex<ScheduleStore<S>>>) {
        self.cancel_pending();
        let outcome = {
            let mut store = self.store.lock().await;
            if store.is_dirty() {
                debug!("flushing unsaved changes on shutdown");
                Some(store.persist())
            } else {
                None
            }
        };
        (outcome, Arc::clone(&self.store))
    }

    fn schedule_save(&mut self) {
        self.cancel_pending();
        let store = Arc::clone(&self.store);
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut store = store.lock().await;
            if store.is_dirty() {
                let outcome = store.persist();
                debug!(?outcome, "autosave ran");
            }
        }));
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl<S> Drop for AutoSaver<S> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SELECTED_DATES_KEY;
    use crate::date::ScheduleDate;
    use crate::storage::MemoryStorage;

    fn date(s: &str) -> ScheduleDate {
        ScheduleDate::parse(s).unwrap()
    }

    async fn saved(saver: &AutoSaver<MemoryStorage>) -> bool {
        saver
            .read(|s| s.storage().contains(SELECTED_DATES_KEY))
            .await
    }

    #[tokio::test(start_paused = true)]
    async fn test_save_is_debounced() {
        let store = ScheduleStore::new(MemoryStorage::new());
        let mut saver = AutoSaver::new(store, Duration::from_millis(1000));

        saver.update(|s| s.select_date(date("2025-06-01"))).await;
        assert!(saver.has_pending_save());
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(!saved(&saver).await);

        // A second edit restarts the timer
        saver.update(|s| s.select_date(date("2025-06-02"))).await;
        tokio::time::sleep(Duration::from_millis(700)).await;
        assert!(!saved(&saver).await);
        assert!(saver.has_unsaved_changes().await);

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert!(saved(&saver).await);
        assert!(!saver.has_unsaved_changes().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reads_do_not_schedule() {
        let store = ScheduleStore::new(MemoryStorage::new());
        let mut saver = AutoSaver::with_default_delay(store);
        let steps = saver.update(|s| s.can_advance_to(crate::wizard::WizardStep::AddEvents)).await;
        assert!(!steps);
        assert!(!saver.has_pending_save());
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_flushes_pending_work() {
        let store = ScheduleStore::new(MemoryStorage::new());
        let mut saver = AutoSaver::new(store, Duration::from_secs(60));
        saver.update(|s| s.select_date(date("2025-06-01"))).await;

        let (outcome, store) = saver.shutdown().await;
        assert_eq!(outcome, Some(PersistOutcome::Saved));
        let store = store.lock().await;
        assert!(store.storage().contains(SELECTED_DATES_KEY));
        assert!(!store.is_dirty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_without_changes_skips_save() {
        let store = ScheduleStore::new(MemoryStorage::new());
        let saver = AutoSaver::with_default_delay(store);
        let (outcome, store) = saver.shutdown().await;
        assert_eq!(outcome, None);
        assert!(store.lock().await.storage().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_save_now_cancels_timer() {
        let store = ScheduleStore::new(MemoryStorage::new());
        let mut saver = AutoSaver::with_default_delay(store);
        saver.update(|s| s.select_date(date("2025-06-01"))).await;
        assert_eq!(saver.save_now().await, PersistOutcome::Saved);
        assert!(!saver.has_pending_save());
        assert!(saved(&saver).await);
    }
}
