use anyhow::Result;
use maplit::btreemap;
use memstore::MemCoordStore;
use partquorum::storage::PathConfig;
use partquorum::testing::part_name;
use partquorum::CoordStore;
use partquorum::CoordStoreExt;
use partquorum::FormatVersion;
use pretty_assertions::assert_eq;

/// Confirming against a table that has no quorum state yet creates it.
#[tokio::test]
async fn test_confirm_on_fresh_table() -> Result<()> {
    let fmt = FormatVersion::CustomPartitioned;
    let mut store = MemCoordStore::default();

    let applied = store.try_confirm(fmt, &part_name("2021-01", 1, 3, 0)).await?;
    assert!(applied);

    let blocks = store.read_max_confirmed_blocks(fmt).await?;
    assert_eq!(btreemap! {"2021-01".to_string() => 3}, blocks);

    Ok(())
}

/// Two handles confirming different partitions: the loser of the
/// compare-and-swap observes the conflict, retries from a fresh read, and
/// neither entry is lost.
#[tokio::test]
async fn test_concurrent_confirmations_do_not_clobber() -> Result<()> {
    let fmt = FormatVersion::CustomPartitioned;

    let store = MemCoordStore::default();
    let mut replica_a = store.clone();
    let mut replica_b = store.clone();

    let applied = replica_a.try_confirm(fmt, &part_name("p1", 1, 1, 0)).await?;
    assert!(applied);

    // Both replicas read version 0, then race their swaps.
    let seen_by_a = replica_a.read(&PathConfig::quorum_status()).await?.unwrap();
    let seen_by_b = replica_b.read(&PathConfig::quorum_status()).await?.unwrap();
    assert_eq!(seen_by_a.version, seen_by_b.version);

    let applied = replica_a.try_confirm(fmt, &part_name("p1", 2, 2, 0)).await?;
    assert!(applied);

    // b's swap must fail: its read is stale now.
    let stale = replica_b
        .compare_and_swap(
            &PathConfig::quorum_status(),
            Some(seen_by_b.version),
            b"parts_count\t1\np2\tp2_1_1_0\n",
        )
        .await?;
    assert!(!stale);

    // A full retry cycle picks up a's entry and adds b's.
    let applied = replica_b.try_confirm(fmt, &part_name("p2", 1, 1, 0)).await?;
    assert!(applied);

    let blocks = replica_a.read_max_confirmed_blocks(fmt).await?;
    assert_eq!(
        btreemap! {
            "p1".to_string() => 2,
            "p2".to_string() => 1,
        },
        blocks
    );

    Ok(())
}

/// A value persisted by an old producer (a bare part name) is readable, and
/// the first confirmation after it rewrites the path in the multi-entry
/// format.
#[tokio::test]
async fn test_legacy_value_is_upgraded_on_first_confirm() -> Result<()> {
    let fmt = FormatVersion::DatePartitioned;
    let mut store = MemCoordStore::default();

    let created = store
        .compare_and_swap(&PathConfig::quorum_status(), None, b"20210101_1_3_0")
        .await?;
    assert!(created);

    let state = store.read_quorum_state(fmt).await?;
    assert_eq!(
        &btreemap! {"2021-01".to_string() => "20210101_1_3_0".to_string()},
        state.confirmed_parts()
    );

    let applied = store.try_confirm(fmt, "20210101_4_4_0").await?;
    assert!(applied);

    let current = store.read(&PathConfig::quorum_status()).await?.unwrap();
    assert_eq!(
        b"parts_count\t1\n2021-01\t20210101_4_4_0\n".to_vec(),
        current.data
    );
    assert_eq!(
        btreemap! {"2021-01".to_string() => 4},
        store.read_max_confirmed_blocks(fmt).await?
    );

    Ok(())
}

/// Corrupted durable bytes are a hard error, not a default.
#[tokio::test]
async fn test_corrupted_value_is_fatal() -> Result<()> {
    let fmt = FormatVersion::CustomPartitioned;
    let mut store = MemCoordStore::default();

    let created = store
        .compare_and_swap(
            &PathConfig::quorum_status(),
            None,
            b"parts_count\t2\np1\tp1_1_1_0\n",
        )
        .await?;
    assert!(created);

    let err = store.read_quorum_state(fmt).await.unwrap_err();
    assert_eq!(std::io::ErrorKind::InvalidData, err.kind());

    let err = store.try_confirm(fmt, &part_name("p2", 1, 1, 0)).await.unwrap_err();
    assert_eq!(std::io::ErrorKind::InvalidData, err.kind());

    Ok(())
}
