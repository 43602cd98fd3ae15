//! Testing utilities for partquorum.

/// Builds a custom-partition part name, for testing purposes.
pub fn part_name(
    partition_id: &str,
    min_block: i64,
    max_block: i64,
    level: u32,
) -> String {
    format!("{}_{}_{}_{}", partition_id, min_block, max_block, level)
}

/// Builds a legacy date-partitioned part name from a `YYYYMMDD` date, for
/// testing purposes.
pub fn dated_part_name(
    date: &str,
    min_block: i64,
    max_block: i64,
    level: u32,
) -> String {
    format!("{}_{}_{}_{}", date, min_block, max_block, level)
}
