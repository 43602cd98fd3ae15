use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use crate::errors::DecodeError;
use crate::errors::MalformedPartName;
use crate::part::FormatVersion;
use crate::part::PartId;

/// Marker every multi-entry encoding starts with.
///
/// Its presence is what selects the multi-entry decoder; older producers
/// wrote a bare part name with no marker at all, and both generations are
/// still present in coordination stores in the wild.
const PARTS_COUNT_MARKER: &str = "parts_count\t";

/// The latest quorum-confirmed part per partition of one replicated table.
///
/// An instance lives for exactly one decode→merge→encode cycle: hydrate it
/// from the current coordination-store bytes, record the one newly confirmed
/// part, re-encode, and let the caller commit the result with a single
/// compare-and-swap. It is never shared or mutated concurrently.
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Deserialize, serde::Serialize)]
pub struct QuorumState {
    format_version: FormatVersion,

    /// partition id → full name of the latest quorum-confirmed part.
    ///
    /// At most one entry per partition; a new confirmation overwrites the
    /// prior one. `BTreeMap` keeps the encode order deterministic.
    confirmed_parts: BTreeMap<String, String>,
}

impl fmt::Display for QuorumState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (partition_id, name)) in self.confirmed_parts.iter().enumerate()
        {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}:{}", partition_id, name)?;
        }
        write!(f, "}}")
    }
}

impl QuorumState {
    /// Creates an empty state for a table using the given naming scheme.
    pub fn new(format_version: FormatVersion) -> Self {
        Self {
            format_version,
            confirmed_parts: BTreeMap::new(),
        }
    }

    pub fn format_version(&self) -> FormatVersion {
        self.format_version
    }

    /// The tracked partition → part-name map.
    pub fn confirmed_parts(&self) -> &BTreeMap<String, String> {
        &self.confirmed_parts
    }

    /// Decodes the durable byte string read from the coordination store.
    ///
    /// Dispatch is by self-describing prefix, not by a version field: input
    /// starting with `parts_count\t` is the multi-entry format, anything
    /// else is read as a bare part name written by an older producer.
    pub fn decode(
        format_version: FormatVersion,
        bytes: &[u8],
    ) -> Result<Self, DecodeError> {
        let input = std::str::from_utf8(bytes)
            .map_err(|_e| DecodeError::UnrecognizedFormat)?;

        if input.is_empty() {
            return Err(DecodeError::UnrecognizedFormat);
        }

        let mut state = Self::new(format_version);
        if let Some(rest) = input.strip_prefix(PARTS_COUNT_MARKER) {
            state.decode_multi(rest)?;
        } else {
            state.decode_single(input)?;
        }
        Ok(state)
    }

    /// Decodes `<N>\n` followed by `N` records of
    /// `<partition_id>\t<part_name>\n` (the marker is already consumed).
    ///
    /// Stored part names are not parsed here; they are validated when a new
    /// confirmation is merged or the max-block view is derived.
    fn decode_multi(&mut self, rest: &str) -> Result<(), DecodeError> {
        let Some((count, mut rest)) = rest.split_once('\n') else {
            return Err(DecodeError::malformed_record(
                0,
                "missing newline after parts_count",
            ));
        };

        let count = count.parse::<usize>().map_err(|_e| {
            DecodeError::malformed_record(
                0,
                format!("invalid parts_count: {:?}", count),
            )
        })?;

        // Count complete records up front: a short input is truncation, not
        // a malformed final record.
        let found = rest.bytes().filter(|b| *b == b'\n').count();
        if found < count {
            return Err(DecodeError::TruncatedInput {
                declared: count,
                found,
            });
        }

        for i in 1..=count {
            // Both unwraps are guarded by the newline count above.
            let (line, tail) = rest.split_once('\n').unwrap();
            rest = tail;

            let Some((partition_id, part_name)) = line.split_once('\t') else {
                return Err(DecodeError::malformed_record(
                    i,
                    "missing tab delimiter",
                ));
            };

            if partition_id.is_empty() || part_name.is_empty() {
                return Err(DecodeError::malformed_record(
                    i,
                    "empty partition id or part name",
                ));
            }

            self.confirmed_parts
                .insert(partition_id.to_string(), part_name.to_string());
        }

        Ok(())
    }

    /// Decodes the legacy single-entry format: the whole input is one part
    /// name, keyed by the partition it parses to.
    ///
    /// This generation stored only the most recent confirmation; other
    /// partitions' entries are reconciled by the caller, and the next encode
    /// upgrades the value to the multi-entry format.
    fn decode_single(&mut self, input: &str) -> Result<(), DecodeError> {
        let name = input.strip_suffix('\n').unwrap_or(input);
        if name.is_empty() {
            return Err(DecodeError::UnrecognizedFormat);
        }

        let part = PartId::parse(name, self.format_version)?;
        self.confirmed_parts.insert(part.partition_id, name.to_string());
        Ok(())
    }

    /// Records a newly quorum-confirmed part.
    ///
    /// Last-writer-wins per partition: only one part can be "latest
    /// confirmed" at a time, so a prior entry for the same partition is
    /// overwritten, never kept alongside.
    pub fn record_confirmation(
        &mut self,
        part_name: &str,
    ) -> Result<(), MalformedPartName> {
        let part = PartId::parse(part_name, self.format_version)?;

        let prev = self
            .confirmed_parts
            .insert(part.partition_id.clone(), part_name.to_string());

        debug!(
            "recorded quorum confirmation: {} in partition {}, superseding {:?}",
            part_name, part.partition_id, prev
        );
        Ok(())
    }

    /// Encodes the full map, always in the multi-entry format.
    ///
    /// Writes never use the legacy single-entry format: re-encoding the
    /// entire map is what lets the caller's compare-and-swap protect
    /// concurrent confirmations of other partitions. Entries are emitted in
    /// ascending partition-id order, so re-encoding the same state is
    /// byte-identical.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = String::new();

        out.push_str(PARTS_COUNT_MARKER);
        out.push_str(&self.confirmed_parts.len().to_string());
        out.push('\n');

        for (partition_id, part_name) in &self.confirmed_parts {
            out.push_str(partition_id);
            out.push('\t');
            out.push_str(part_name);
            out.push('\n');
        }

        out.into_bytes()
    }

    /// Derives the highest confirmed block number per partition.
    ///
    /// Recomputed from `confirmed_parts` on every call rather than cached,
    /// so it can never go stale after a merge. A stored name that no longer
    /// parses is corrupted durable state and surfaces as a hard error.
    pub fn max_confirmed_blocks(
        &self,
    ) -> Result<BTreeMap<String, i64>, MalformedPartName> {
        let mut blocks = BTreeMap::new();

        for (partition_id, part_name) in &self.confirmed_parts {
            let part = PartId::parse(part_name, self.format_version)?;
            blocks.insert(partition_id.clone(), part.max_block);
        }

        Ok(blocks)
    }
}

/// One full confirmation cycle: decode the current durable bytes, record
/// `new_part_name`, and re-encode.
///
/// This is the unit the coordination layer invokes once per quorum-confirmed
/// insert. The caller must commit the returned bytes with an atomic
/// compare-and-swap against the bytes it read; decoding and encoding across
/// separate round trips would lose concurrent confirmations from other
/// partitions.
pub fn apply_confirmation(
    format_version: FormatVersion,
    current_bytes: &[u8],
    new_part_name: &str,
) -> Result<Vec<u8>, DecodeError> {
    let mut state = QuorumState::decode(format_version, current_bytes)?;
    state.record_confirmation(new_part_name)?;
    Ok(state.encode())
}
