//! Fixture source integration: JSON file → channel → capped snapshot.

use std::path::PathBuf;
use std::time::Duration;

use wallet_cloud::data::HolderCaps;
use wallet_cloud::{FixtureSource, HoldingsSource, SourceConfig};

const RECV_TIMEOUT: Duration = Duration::from_secs(5);

fn write_fixture(name: &str, json: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "orrery-fixture-{name}-{}.json",
        std::process::id()
    ));
    std::fs::write(&path, json).unwrap();
    path
}

#[test]
fn fixture_round_trips_through_the_channel() {
    let path = write_fixture(
        "roundtrip",
        r#"{
            "token_a": [
                {"address": "a0", "amount_a": 1000000.0},
                {"address": "a1", "amount_a": 250000.0}
            ],
            "token_b": [
                {"address": "b0", "amount_b": 900000.0}
            ],
            "shared": [
                {"address": "s0", "amount_a": 10.0, "amount_b": 20.0}
            ]
        }"#,
    );

    let rx = FixtureSource::spawn(SourceConfig {
        fixture_path: path.clone(),
        caps: HolderCaps::default(),
    });
    let snapshot = rx
        .recv_timeout(RECV_TIMEOUT)
        .expect("expected a snapshot from the fixture source");

    assert_eq!(snapshot.token_a.len(), 2);
    assert_eq!(snapshot.token_a[0].address, "a0");
    assert_eq!(snapshot.token_a[0].amount_a, 1_000_000.0);
    assert_eq!(snapshot.token_b.len(), 1);
    assert_eq!(snapshot.shared.len(), 1);
    assert_eq!(snapshot.shared[0].amount_b, 20.0);

    let _ = std::fs::remove_file(path);
}

#[test]
fn caps_are_applied_before_delivery() {
    let entries: Vec<String> = (0..20)
        .map(|i| format!(r#"{{"address": "a{i}", "amount_a": {}.0}}"#, 1000 - i))
        .collect();
    let json = format!(r#"{{"token_a": [{}]}}"#, entries.join(","));
    let path = write_fixture("caps", &json);

    let rx = FixtureSource::spawn(SourceConfig {
        fixture_path: path.clone(),
        caps: HolderCaps {
            token_a: 5,
            token_b: 500,
            shared: 100,
        },
    });
    let snapshot = rx.recv_timeout(RECV_TIMEOUT).unwrap();

    // First-N truncation in list order.
    assert_eq!(snapshot.token_a.len(), 5);
    assert_eq!(snapshot.token_a[0].address, "a0");
    assert_eq!(snapshot.token_a[4].address, "a4");

    let _ = std::fs::remove_file(path);
}

#[test]
fn malformed_fixture_yields_no_snapshot() {
    let path = write_fixture("malformed", "{ not json");

    let rx = FixtureSource::spawn(SourceConfig {
        fixture_path: path.clone(),
        caps: HolderCaps::default(),
    });
    assert!(rx.recv_timeout(RECV_TIMEOUT).is_err());

    let _ = std::fs::remove_file(path);
}

#[test]
fn repo_sample_fixture_parses() {
    // The checked-in sample must stay loadable; it is the default dataset.
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../fixtures/holders.sample.json");
    let rx = FixtureSource::spawn(SourceConfig {
        fixture_path: path,
        caps: HolderCaps::default(),
    });
    let snapshot = rx.recv_timeout(RECV_TIMEOUT).unwrap();
    assert!(snapshot.token_a.len() >= 5);
    assert!(snapshot.token_b.len() >= 5);
    assert!(snapshot.shared.len() >= 3);
}
