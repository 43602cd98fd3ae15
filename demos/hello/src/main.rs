mod logging;

use memstore::MemCoordStore;
use partquorum::storage::PathConfig;
use partquorum::CoordStore;
use partquorum::CoordStoreExt;
use partquorum::FormatVersion;

use crate::logging::init_logging;

/// Walks through one table's quorum bookkeeping: read a value left by a
/// legacy producer, confirm a few parts, and derive the view the read path
/// consumes.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let g = init_logging("hello", "_log", "DEBUG");
    Box::leak(Box::new(g));

    let format_version = FormatVersion::DatePartitioned;
    let mut store = MemCoordStore::default();

    // Seed the store the way an old server left it: a bare part name with no
    // framing.
    store
        .compare_and_swap(&PathConfig::quorum_status(), None, b"20210101_1_3_0")
        .await?;

    let state = store.read_quorum_state(format_version).await?;
    println!("state left by the legacy producer: {}", state);

    // A quorum-confirmed insert into the same partition, then one into the
    // next month. Each cycle re-reads, merges and swaps the full map back.
    for part in ["20210102_4_4_0", "20210201_1_1_0"] {
        let applied = store.try_confirm(format_version, part).await?;
        println!("confirmed {}: applied={}", part, applied);
    }

    let blocks = store.read_max_confirmed_blocks(format_version).await?;
    println!(
        "max confirmed block per partition: {}",
        serde_json::to_string(&blocks)?
    );

    let current = store.read(&PathConfig::quorum_status()).await?.unwrap();
    println!(
        "durable bytes at {} (version {}):",
        PathConfig::quorum_status(),
        current.version
    );
    print!("{}", String::from_utf8_lossy(&current.data));

    Ok(())
}
