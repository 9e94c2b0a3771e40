use std::path::Path;
use std::thread;

use crossbeam_channel::{Receiver, Sender};

use crate::data::model::HoldingsSnapshot;
use crate::data::{HoldingsSource, SourceConfig};

/// Bevy resource holding the channel from the holdings source thread.
/// The scene drains this in `ingest_snapshots`.
#[derive(bevy::prelude::Resource)]
pub struct SnapshotChannel(pub Receiver<HoldingsSnapshot>);

/// Create a snapshot channel and spawn the fixture source on a dedicated
/// thread.
pub fn init_snapshot_channel(config: SourceConfig) -> SnapshotChannel {
    SnapshotChannel(FixtureSource::spawn(config))
}

/// Loads holder lists from a JSON fixture file. The fixture carries three
/// arrays (`token_a`, `token_b`, `shared`), each ordered largest-first;
/// caps are applied here, so the layout engine never truncates.
pub struct FixtureSource;

impl HoldingsSource for FixtureSource {
    fn spawn(config: SourceConfig) -> Receiver<HoldingsSnapshot> {
        let (tx, rx) = crossbeam_channel::bounded(4);
        thread::spawn(move || load_and_send(&config, &tx));
        rx
    }
}

fn load_and_send(config: &SourceConfig, tx: &Sender<HoldingsSnapshot>) {
    let snapshot = match load_fixture(&config.fixture_path) {
        Ok(snapshot) => snapshot,
        Err(err) => {
            eprintln!(
                "orrery: failed to load holders fixture {}: {err}",
                config.fixture_path.display()
            );
            return;
        }
    };

    let loaded = snapshot.total_wallets();
    let snapshot = snapshot.capped(&config.caps);
    eprintln!(
        "orrery: loaded {} holders from {} ({} after caps: {}/{}/{} a/b/shared)",
        loaded,
        config.fixture_path.display(),
        snapshot.total_wallets(),
        snapshot.token_a.len(),
        snapshot.token_b.len(),
        snapshot.shared.len(),
    );

    // Receiver dropped means the app is shutting down.
    let _ = tx.send(snapshot);
}

fn load_fixture(path: &Path) -> Result<HoldingsSnapshot, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)?;
    let snapshot = serde_json::from_str(&json)?;
    Ok(snapshot)
}

/// Channel pre-loaded with an in-memory snapshot. Used by tests and demo
/// setups that bypass the filesystem.
pub fn init_static_channel(snapshot: HoldingsSnapshot) -> SnapshotChannel {
    let (tx, rx) = crossbeam_channel::bounded(1);
    let _ = tx.send(snapshot);
    SnapshotChannel(rx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::WalletHolding;
    use crate::data::HolderCaps;
    use std::time::Duration;

    fn sample_holder(address: &str, amount_a: f64, amount_b: f64) -> WalletHolding {
        WalletHolding {
            address: address.to_string(),
            amount_a,
            amount_b,
        }
    }

    fn temp_fixture(name: &str, json: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("orrery-test-{name}-{}.json", std::process::id()));
        std::fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn fixture_source_delivers_a_capped_snapshot() {
        let path = temp_fixture(
            "capped",
            r#"{
                "token_a": [
                    {"address": "a0", "amount_a": 900.0},
                    {"address": "a1", "amount_a": 500.0},
                    {"address": "a2", "amount_a": 100.0}
                ],
                "token_b": [{"address": "b0", "amount_b": 250.0}],
                "shared": []
            }"#,
        );

        let rx = FixtureSource::spawn(SourceConfig {
            fixture_path: path.clone(),
            caps: HolderCaps {
                token_a: 2,
                token_b: 500,
                shared: 100,
            },
        });
        let snapshot = rx
            .recv_timeout(Duration::from_secs(5))
            .expect("expected a snapshot from the fixture source");

        assert_eq!(snapshot.token_a.len(), 2);
        assert_eq!(snapshot.token_a[0].address, "a0");
        assert_eq!(snapshot.token_b.len(), 1);
        assert!(snapshot.shared.is_empty());

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn missing_fixture_closes_the_channel_without_a_snapshot() {
        let rx = FixtureSource::spawn(SourceConfig {
            fixture_path: std::path::PathBuf::from("/nonexistent/holders.json"),
            caps: HolderCaps::default(),
        });
        assert!(rx.recv_timeout(Duration::from_secs(5)).is_err());
    }

    #[test]
    fn static_channel_replays_the_given_snapshot() {
        let channel = init_static_channel(HoldingsSnapshot {
            token_a: vec![sample_holder("a", 1.0, 0.0)],
            ..Default::default()
        });
        let snapshot = channel.0.try_recv().unwrap();
        assert_eq!(snapshot.token_a[0].address, "a");
    }
}
