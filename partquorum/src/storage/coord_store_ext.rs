use std::collections::BTreeMap;
use std::io;

use openraft_macros::add_async_trait;
use tracing::debug;

use crate::part::FormatVersion;
use crate::quorum::apply_confirmation;
use crate::quorum::QuorumState;
use crate::storage::path_config::PathConfig;
use crate::storage::CoordStore;

/// Convenience cycles over a [`CoordStore`].
///
/// Decode failures surface as [`io::ErrorKind::InvalidData`]: they mean the
/// durable value is corrupted, and the caller must stop confirming or
/// reading the affected table rather than guess a fallback.
#[add_async_trait]
pub trait CoordStoreExt: CoordStore {
    /// Reads and decodes the current quorum state; an absent path is an
    /// empty state.
    async fn read_quorum_state(
        &mut self,
        format_version: FormatVersion,
    ) -> Result<QuorumState, io::Error> {
        let path = PathConfig::quorum_status();

        let Some(current) = self.read(&path).await? else {
            return Ok(QuorumState::new(format_version));
        };

        QuorumState::decode(format_version, &current.data)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Reads the state and derives the max confirmed block per partition,
    /// the view the read path uses to hide unconfirmed parts.
    async fn read_max_confirmed_blocks(
        &mut self,
        format_version: FormatVersion,
    ) -> Result<BTreeMap<String, i64>, io::Error> {
        let state = self.read_quorum_state(format_version).await?;

        state
            .max_confirmed_blocks()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// One confirmation cycle: read, apply `new_part_name`, compare-and-swap
    /// the full re-encoded map back.
    ///
    /// Returns `false` if the swap lost to a concurrent writer; the caller
    /// decides when to retry. The intermediate state never crosses a round
    /// trip, so no other partition's confirmation can be dropped.
    async fn try_confirm(
        &mut self,
        format_version: FormatVersion,
        new_part_name: &str,
    ) -> Result<bool, io::Error> {
        let path = PathConfig::quorum_status();

        let current = self.read(&path).await?;
        let (expected, buf) = match current {
            Some(v) => {
                let buf = apply_confirmation(
                    format_version,
                    &v.data,
                    new_part_name,
                )
                .map_err(|e| {
                    io::Error::new(io::ErrorKind::InvalidData, e)
                })?;
                (Some(v.version), buf)
            }
            None => {
                let mut state = QuorumState::new(format_version);
                state.record_confirmation(new_part_name).map_err(|e| {
                    io::Error::new(io::ErrorKind::InvalidData, e)
                })?;
                (None, state.encode())
            }
        };

        let applied =
            self.compare_and_swap(&path, expected, &buf).await?;
        debug!(
            "try_confirm: part={}, expected_version={:?}, applied={}",
            new_part_name, expected, applied
        );
        Ok(applied)
    }
}

impl<T> CoordStoreExt for T where T: CoordStore {}
