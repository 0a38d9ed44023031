// Snapshot file tests: exact wire keys, per-file failure reporting.

use peermeter::snapshot_repo;
use tempfile::TempDir;

mod common;
use common::{peer, snapshot};

#[test]
fn snapshot_file_carries_the_wire_keys() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("run.json");

    let mut s = snapshot(
        64512,
        "2026-01-01T00:00:00Z",
        "2026-01-08T00:00:00Z",
        &[(64496, peer(1_000_000.0, 2_000_000.0))],
    );
    s.filter_asn.insert(65000, "IXP Route Servers".into());
    snapshot_repo::save(&path, &s).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(value["meta"]["asn"], 64512);
    assert!(value["meta"]["from"].is_string(), "timestamps are ISO-8601 text");
    assert_eq!(value["local_asn"]["64512"], "org-as64512");
    assert_eq!(value["filter_asn"]["65000"], "IXP Route Servers");
    let entry = &value["top_peers"]["64496"];
    for key in ["in_avg", "in_p95", "in_max", "out_avg", "out_p95", "out_max"] {
        assert!(entry[key].is_number(), "{key} must be a decimal number");
    }
}

#[test]
fn snapshot_save_load_preserves_the_record() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("run.json");

    let s = snapshot(
        64512,
        "2026-01-01T00:00:00Z",
        "2026-01-08T00:00:00Z",
        &[(64496, peer(1_000_000.0, 2_000_000.0))],
    );
    snapshot_repo::save(&path, &s).unwrap();
    let loaded = snapshot_repo::load(&path).unwrap();
    assert_eq!(loaded, s);
}

#[test]
fn snapshot_load_fails_on_missing_key_naming_the_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    // meta.to missing
    std::fs::write(
        &path,
        r#"{"meta": {"from": "2026-01-01T00:00:00Z", "asn": 64512},
            "local_asn": {}, "filter_asn": {}, "top_peers": {}}"#,
    )
    .unwrap();

    let err = snapshot_repo::load(&path).unwrap_err();
    assert!(format!("{err:#}").contains("broken.json"));
}

#[test]
fn snapshot_load_fails_on_non_iso_timestamp() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("badtime.json");
    std::fs::write(
        &path,
        r#"{"meta": {"from": "last tuesday", "to": "2026-01-08T00:00:00Z", "asn": 64512},
            "local_asn": {}, "filter_asn": {}, "top_peers": {}}"#,
    )
    .unwrap();
    assert!(snapshot_repo::load(&path).is_err());
}

#[test]
fn snapshot_load_fails_on_non_numeric_statistic() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("badstat.json");
    std::fs::write(
        &path,
        r#"{"meta": {"from": "2026-01-01T00:00:00Z", "to": "2026-01-08T00:00:00Z", "asn": 64512},
            "local_asn": {}, "filter_asn": {},
            "top_peers": {"64496": {"in_avg": "lots", "in_p95": 1.0, "in_max": 1.0,
                                     "out_avg": 1.0, "out_p95": 1.0, "out_max": 1.0}}}"#,
    )
    .unwrap();
    assert!(snapshot_repo::load(&path).is_err());
}

#[test]
fn snapshot_load_fails_on_inverted_range() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("inverted.json");
    std::fs::write(
        &path,
        r#"{"meta": {"from": "2026-01-08T00:00:00Z", "to": "2026-01-01T00:00:00Z", "asn": 64512},
            "local_asn": {}, "filter_asn": {}, "top_peers": {}}"#,
    )
    .unwrap();
    let err = snapshot_repo::load(&path).unwrap_err();
    assert!(format!("{err:#}").contains("meta.from"));
}

#[test]
fn snapshot_load_all_skips_malformed_files_only() {
    let dir = TempDir::new().unwrap();
    let good = dir.path().join("good.json");
    let bad = dir.path().join("bad.json");

    let s = snapshot(64512, "2026-01-01T00:00:00Z", "2026-01-08T00:00:00Z", &[]);
    snapshot_repo::save(&good, &s).unwrap();
    std::fs::write(&bad, "{").unwrap();

    let (snapshots, failed) = snapshot_repo::load_all(&[bad, good]);
    assert_eq!(snapshots.len(), 1);
    assert_eq!(failed, 1);
    assert_eq!(snapshots[0], s);
}

#[test]
fn snapshot_default_filename_is_stable() {
    let s = snapshot(64512, "2026-01-01T00:00:00Z", "2026-01-08T00:00:00Z", &[]);
    assert_eq!(
        snapshot_repo::default_filename(&s.meta),
        "peermeter-as64512-20260101T0000-20260108T0000.json"
    );
}
