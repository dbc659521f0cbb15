//! TTL Sweep Task
//!
//! Background task that periodically removes expired entries from a TTL store.

use std::sync::Weak;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::TtlStore;

// == Sweep Task ==
/// Owns a running sweep task and aborts it when dropped.
#[derive(Debug)]
pub(crate) struct SweepTask {
    handle: JoinHandle<()>,
}

impl SweepTask {
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    #[cfg(test)]
    pub fn abort_handle(&self) -> tokio::task::AbortHandle {
        self.handle.abort_handle()
    }
}

impl Drop for SweepTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Spawns a task on `runtime` that sweeps `store` every `interval`.
///
/// The task holds only a weak reference: it exits on its own once the store
/// is gone, and is aborted earlier when the returned [`SweepTask`] is dropped.
/// The store's write lock is held only for the duration of one sweep and never
/// across an await point.
pub(crate) fn spawn_sweep_task<V>(
    store: Weak<TtlStore<V>>,
    interval: Duration,
    runtime: &Handle,
) -> SweepTask
where
    V: Send + Sync + 'static,
{
    let handle = runtime.spawn(async move {
        info!("Starting TTL sweep task with interval of {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let Some(live) = store.upgrade() else {
                debug!("TTL store dropped, stopping sweep task");
                break;
            };
            let removed = live.remove_expired();
            drop(live);

            if removed > 0 {
                info!("TTL sweep: removed {} expired entries", removed);
            } else {
                debug!("TTL sweep: no expired entries found");
            }
        }
    });

    SweepTask { handle }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::cache::{Cache, TtlCache};

    #[tokio::test]
    async fn test_sweep_task_exits_when_store_dropped() {
        let store = Arc::new(TtlStore::<String>::new());
        let task = spawn_sweep_task(
            Arc::downgrade(&store),
            Duration::from_millis(10),
            &Handle::current(),
        );
        assert!(!task.is_finished());

        drop(store);
        tokio::time::sleep(Duration::from_millis(60)).await;

        assert!(task.is_finished(), "Task should stop once the store is gone");
    }

    #[tokio::test]
    async fn test_sweep_task_preserves_valid_entries() {
        let cache = TtlCache::with_sweep_interval(Duration::from_millis(10)).unwrap();

        cache
            .set("long_lived", "value", Duration::from_secs(3600))
            .unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(cache.get("long_lived"), Some("value"));
        assert!(cache.stats().last_sweep_at.is_some());
    }

    #[tokio::test]
    async fn test_sweep_task_can_be_aborted() {
        let store = Arc::new(TtlStore::<u8>::new());
        let task = spawn_sweep_task(
            Arc::downgrade(&store),
            Duration::from_secs(3600),
            &Handle::current(),
        );
        let abort = task.abort_handle();

        drop(task);
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert!(abort.is_finished(), "Task should be finished after abort");
        assert_eq!(Arc::strong_count(&store), 1);
    }
}
