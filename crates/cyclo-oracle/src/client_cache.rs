use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{OracleError, OracleResult};

/// Recover from poisoned mutex instead of panicking
fn safe_lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Per-chain cache of derived clients (quoters, RPC handles).
///
/// Owned by whoever orchestrates refreshes and passed down explicitly;
/// there is no process-wide instance. Clients are built at most once per
/// chain id and shared as `Arc<C>`.
pub struct ClientCache<C> {
    clients: Mutex<HashMap<u64, Arc<C>>>,
}

impl<C> Default for ClientCache<C> {
    fn default() -> Self {
        Self {
            clients: Mutex::new(HashMap::new()),
        }
    }
}

impl<C> ClientCache<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, chain_id: u64) -> Option<Arc<C>> {
        safe_lock(&self.clients).get(&chain_id).cloned()
    }

    /// Like [`get`](Self::get) but an unknown chain is an error.
    pub fn require(&self, chain_id: u64) -> OracleResult<Arc<C>> {
        self.get(chain_id).ok_or(OracleError::UnknownChain(chain_id))
    }

    pub fn insert(&self, chain_id: u64, client: C) -> Arc<C> {
        let client = Arc::new(client);
        safe_lock(&self.clients).insert(chain_id, Arc::clone(&client));
        client
    }

    pub fn get_or_insert_with<F: FnOnce() -> C>(&self, chain_id: u64, make: F) -> Arc<C> {
        let mut clients = safe_lock(&self.clients);
        Arc::clone(
            clients
                .entry(chain_id)
                .or_insert_with(|| {
                    log::debug!("building client for chain {}", chain_id);
                    Arc::new(make())
                }),
        )
    }

    /// Fallible construction; nothing is cached when `make` fails.
    pub fn get_or_try_insert_with<E, F>(&self, chain_id: u64, make: F) -> Result<Arc<C>, E>
    where
        F: FnOnce() -> Result<C, E>,
    {
        let mut clients = safe_lock(&self.clients);
        if let Some(client) = clients.get(&chain_id) {
            return Ok(Arc::clone(client));
        }
        let client = Arc::new(make()?);
        clients.insert(chain_id, Arc::clone(&client));
        Ok(client)
    }

    pub fn remove(&self, chain_id: u64) -> Option<Arc<C>> {
        safe_lock(&self.clients).remove(&chain_id)
    }

    pub fn len(&self) -> usize {
        safe_lock(&self.clients).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        safe_lock(&self.clients).clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_built_once_per_chain() {
        let cache: ClientCache<String> = ClientCache::new();
        let builds = AtomicUsize::new(0);
        let make = || {
            builds.fetch_add(1, Ordering::SeqCst);
            "client".to_string()
        };

        let a = cache.get_or_insert_with(14, make);
        let b = cache.get_or_insert_with(14, || unreachable!());
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(builds.load(Ordering::SeqCst), 1);

        cache.get_or_insert_with(42161, || "arb".to_string());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_failed_build_not_cached() {
        let cache: ClientCache<u32> = ClientCache::new();
        let err: Result<Arc<u32>, &str> = cache.get_or_try_insert_with(14, || Err("rpc down"));
        assert!(err.is_err());
        assert!(cache.is_empty());

        let ok: Result<Arc<u32>, &str> = cache.get_or_try_insert_with(14, || Ok(7));
        assert_eq!(*ok.unwrap(), 7);
        assert_eq!(cache.get(14).as_deref(), Some(&7));
    }

    #[test]
    fn test_require_unknown_chain() {
        let cache: ClientCache<u32> = ClientCache::new();
        assert!(matches!(cache.require(1), Err(OracleError::UnknownChain(1))));
        cache.insert(1, 5);
        assert_eq!(*cache.require(1).unwrap(), 5);
        assert!(cache.remove(1).is_some());
        cache.clear();
        assert!(cache.is_empty());
    }
}
