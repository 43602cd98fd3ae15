//! Identity of data parts, parsed from their on-disk names.

mod format_version;
mod part_id;

#[cfg(test)]
mod part_id_test;

pub use format_version::FormatVersion;
pub use part_id::PartId;
