use std::collections::BTreeMap;
use std::fmt::Debug;
use std::io::Error;
use std::sync::Arc;
use std::sync::Mutex;

use partquorum::storage::CoordStore;
use partquorum::storage::Versioned;
use tracing::debug;

/// An in-memory coordination store implementing the [`CoordStore`] trait.
///
/// Every successful write bumps the per-path version by one, which is what
/// the compare-and-swap checks against. Clones share the same map, so two
/// clones behave like two replicas talking to the same store.
#[derive(Debug, Clone, Default)]
pub struct MemCoordStore {
    store: Arc<Mutex<BTreeMap<String, Versioned>>>,
}

impl CoordStore for MemCoordStore {
    async fn read(&mut self, path: &str) -> Result<Option<Versioned>, Error> {
        let store = self.store.lock().unwrap();
        let got = store.get(path).cloned();

        debug!("MemCoordStore::read: path={}, got={:?}", path, got);
        Ok(got)
    }

    async fn compare_and_swap(
        &mut self,
        path: &str,
        expected: Option<u64>,
        buf: &[u8],
    ) -> Result<bool, Error> {
        let mut store = self.store.lock().unwrap();

        let current = store.get(path).map(|v| v.version);
        if current != expected {
            debug!(
                "MemCoordStore::compare_and_swap: path={}, expected={:?}, current={:?}: conflict",
                path, expected, current
            );
            return Ok(false);
        }

        let version = current.map(|v| v + 1).unwrap_or(0);
        store.insert(path.to_string(), Versioned::new(version, buf));

        debug!(
            "MemCoordStore::compare_and_swap: path={}, new version={}",
            path, version
        );
        Ok(true)
    }
}
