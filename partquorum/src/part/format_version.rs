/// The part-naming scheme generation a replicated table uses.
///
/// It is fixed in the table's metadata and injected into every parse; a name
/// is never sniffed to guess which grammar produced it, because the two
/// grammars overlap (an 8-digit custom partition id looks like a date).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[derive(derive_more::Display)]
#[derive(serde::Deserialize, serde::Serialize)]
pub enum FormatVersion {
    /// Legacy scheme: `YYYYMMDD_<min>_<max>_<level>`.
    ///
    /// The partition id is derived from the date prefix as `YYYY-MM`, so all
    /// parts of one calendar month share a partition.
    #[display("date-partitioned")]
    DatePartitioned,

    /// Current scheme: `<partition_id>_<min>_<max>_<level>`.
    ///
    /// The partition id is stored verbatim and may itself contain
    /// underscores.
    #[display("custom-partitioned")]
    CustomPartitioned,
}
