mod channel;
mod model;

use std::path::PathBuf;

use crossbeam_channel::Receiver;

pub use channel::{init_snapshot_channel, init_static_channel, FixtureSource, SnapshotChannel};
pub use model::{HolderCaps, HoldingsSnapshot, WalletHolding};

/// Configuration for spawning a holdings source.
#[derive(Clone, Debug)]
pub struct SourceConfig {
    pub fixture_path: PathBuf,
    pub caps: HolderCaps,
}

/// Interface for holder-list sources. A source runs on its own thread and
/// delivers complete snapshots; the scene swaps each one in atomically.
pub trait HoldingsSource: Send + 'static {
    fn spawn(config: SourceConfig) -> Receiver<HoldingsSnapshot>;
}
