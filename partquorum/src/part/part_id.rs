use std::fmt;
use std::fmt::Formatter;

use chrono::NaiveDate;

use crate::errors::MalformedPartName;
use crate::part::FormatVersion;

/// The identity of a data part, parsed from its on-disk name.
///
/// A part covers the inclusive block range `min_block ..= max_block` within
/// one partition; `level` counts how many merges produced it. This tracker
/// only consumes `partition_id` and `max_block`, but the whole name must
/// parse for the part to be trusted at all.
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Deserialize, serde::Serialize)]
pub struct PartId {
    /// Groups parts that belong to the same logical partition.
    pub partition_id: String,
    pub min_block: i64,
    pub max_block: i64,
    pub level: u32,
}

impl fmt::Display for PartId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}-{},L{})",
            self.partition_id, self.min_block, self.max_block, self.level
        )
    }
}

impl PartId {
    /// Parses a part name under the grammar selected by `format_version`.
    ///
    /// Pure and deterministic; the grammar is never guessed from the string
    /// shape.
    pub fn parse(
        name: &str,
        format_version: FormatVersion,
    ) -> Result<Self, MalformedPartName> {
        let (prefix, min_block, max_block, level) = split_name(name)?;

        let partition_id = match format_version {
            FormatVersion::DatePartitioned => partition_of_date(name, prefix)?,
            FormatVersion::CustomPartitioned => {
                ensure_partition_id(name, prefix)?;
                prefix.to_string()
            }
        };

        if min_block > max_block {
            return Err(MalformedPartName::new(
                name,
                format!(
                    "min_block({}) must be <= max_block({})",
                    min_block, max_block
                ),
            ));
        }

        Ok(PartId {
            partition_id,
            min_block,
            max_block,
            level,
        })
    }
}

/// Splits `<prefix>_<min>_<max>_<level>` from the right, so the prefix may
/// itself contain underscores.
fn split_name(
    name: &str,
) -> Result<(&str, i64, i64, u32), MalformedPartName> {
    let mut rsplit = name.rsplitn(4, '_');

    let level = rsplit.next();
    let max = rsplit.next();
    let min = rsplit.next();
    let prefix = rsplit.next();

    let (Some(level), Some(max), Some(min), Some(prefix)) =
        (level, max, min, prefix)
    else {
        return Err(MalformedPartName::new(
            name,
            "expected <prefix>_<min>_<max>_<level>",
        ));
    };

    let min_block = parse_num::<i64>(name, "min_block", min)?;
    let max_block = parse_num::<i64>(name, "max_block", max)?;
    let level = parse_num::<u32>(name, "level", level)?;

    Ok((prefix, min_block, max_block, level))
}

fn parse_num<T: std::str::FromStr>(
    name: &str,
    field: &str,
    text: &str,
) -> Result<T, MalformedPartName> {
    text.parse::<T>().map_err(|_e| {
        MalformedPartName::new(name, format!("invalid {}: {:?}", field, text))
    })
}

/// Derives the `YYYY-MM` partition id from a legacy `YYYYMMDD` date prefix.
fn partition_of_date(
    name: &str,
    prefix: &str,
) -> Result<String, MalformedPartName> {
    if prefix.len() != 8 || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MalformedPartName::new(
            name,
            format!("date prefix {:?} is not 8 digits", prefix),
        ));
    }

    let date = NaiveDate::parse_from_str(prefix, "%Y%m%d").map_err(|_e| {
        MalformedPartName::new(
            name,
            format!("date prefix {:?} is not a valid date", prefix),
        )
    })?;

    Ok(date.format("%Y-%m").to_string())
}

fn ensure_partition_id(
    name: &str,
    prefix: &str,
) -> Result<(), MalformedPartName> {
    if prefix.is_empty() {
        return Err(MalformedPartName::new(name, "empty partition id"));
    }

    // Tab and newline would break the durable framing; any whitespace in a
    // partition id means the name did not come from this naming scheme.
    if prefix.chars().any(|c| c.is_whitespace()) {
        return Err(MalformedPartName::new(
            name,
            "partition id contains whitespace",
        ));
    }

    Ok(())
}
