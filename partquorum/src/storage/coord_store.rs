use std::io;

use openraft_macros::add_async_trait;

/// A value read from the coordination store, paired with the version a
/// subsequent compare-and-swap must match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Versioned {
    pub version: u64,
    pub data: Vec<u8>,
}

impl Versioned {
    pub fn new(version: u64, data: impl Into<Vec<u8>>) -> Self {
        Self {
            version,
            data: data.into(),
        }
    }
}

/// API for the distributed coordination store that persists the encoded
/// quorum state.
///
/// The store holds opaque byte strings at well-known paths and provides the
/// one primitive this crate's correctness rests on: an atomic
/// compare-and-swap keyed by the version observed at read time. Two replicas
/// confirming parts in different partitions concurrently must not clobber
/// each other's entries; the loser of a swap re-reads and retries.
///
/// Retry, backoff and session handling all live behind the implementation.
#[add_async_trait]
pub trait CoordStore: Clone + Send + Sync + 'static {
    /// Reads the value at `path`, with its current version. `None` means the
    /// path was never written.
    async fn read(
        &mut self,
        path: &str,
    ) -> Result<Option<Versioned>, io::Error>;

    /// Writes `buf` to `path` iff the stored version still equals
    /// `expected`; `expected` of `None` creates the path only if it is
    /// absent.
    ///
    /// Returns `false` on a version conflict. A conflict is not an error:
    /// it means another replica committed first and the caller must redo its
    /// cycle from a fresh read.
    async fn compare_and_swap(
        &mut self,
        path: &str,
        expected: Option<u64>,
        buf: &[u8],
    ) -> Result<bool, io::Error>;
}
