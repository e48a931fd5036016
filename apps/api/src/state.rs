use std::collections::HashMap;
use std::sync::Arc;

use sqlx::PgPool;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::config::Config;
use crate::render::typesetter::Typesetter;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    /// Pluggable typesetting backend. Default: PdfLatexTypesetter.
    /// Tests swap in a scripted fake.
    pub typesetter: Arc<dyn Typesetter>,
    /// Per-application compile serialization — two concurrent compiles for the
    /// same application would race on the same output PDF path.
    pub compile_locks: CompileLocks,
}

/// Lazily-populated map of per-application-id locks.
#[derive(Clone, Default)]
pub struct CompileLocks {
    inner: Arc<Mutex<HashMap<Uuid, Arc<Mutex<()>>>>>,
}

impl CompileLocks {
    /// Returns the lock guarding compiles for `application_id`, creating it on
    /// first use. The caller holds the returned lock for the whole compile.
    ///
    /// Idle entries (held by no compile, strong count 1) are evicted on each
    /// call so the map stays bounded by the number of in-flight compiles.
    pub async fn lock_for(&self, application_id: Uuid) -> Arc<Mutex<()>> {
        let mut map = self.inner.lock().await;
        map.retain(|_, lock| Arc::strong_count(lock) > 1);
        map.entry(application_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lock_for_returns_same_lock_for_same_id() {
        let locks = CompileLocks::default();
        let id = Uuid::new_v4();
        let a = locks.lock_for(id).await;
        let b = locks.lock_for(id).await;
        assert!(Arc::ptr_eq(&a, &b), "same application id must share a lock");
    }

    #[tokio::test]
    async fn test_lock_for_distinct_ids_are_independent() {
        let locks = CompileLocks::default();
        let a = locks.lock_for(Uuid::new_v4()).await;
        let b = locks.lock_for(Uuid::new_v4()).await;
        assert!(!Arc::ptr_eq(&a, &b));

        // Holding one must not block the other.
        let _guard_a = a.lock().await;
        assert!(b.try_lock().is_ok(), "distinct applications must not contend");
    }

    #[tokio::test]
    async fn test_released_locks_are_evicted() {
        let locks = CompileLocks::default();
        let stale_id = Uuid::new_v4();
        drop(locks.lock_for(stale_id).await);

        // The next lookup sweeps entries no compile is holding.
        let live_id = Uuid::new_v4();
        let _live = locks.lock_for(live_id).await;

        let map = locks.inner.lock().await;
        assert!(!map.contains_key(&stale_id), "idle entry must be swept");
        assert!(map.contains_key(&live_id));
        assert_eq!(map.len(), 1);
    }

    #[tokio::test]
    async fn test_held_locks_survive_eviction() {
        let locks = CompileLocks::default();
        let id = Uuid::new_v4();
        let held = locks.lock_for(id).await;
        let _guard = held.lock().await;

        // Sweeps triggered by other applications must not drop a held lock.
        let _other = locks.lock_for(Uuid::new_v4()).await;
        let again = locks.lock_for(id).await;
        assert!(Arc::ptr_eq(&held, &again), "in-flight compile keeps its lock");
    }
}
