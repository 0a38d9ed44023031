// Reducer and snapshot-builder tests: mean / interpolated p95 / max,
// empty-series zero policy, registry exclusion.

use std::collections::BTreeMap;

use peermeter::models::{Direction, RunMeta, SampleSeries, Snapshot};
use peermeter::stats::build::{PeerSamples, build_snapshot};
use peermeter::stats::{StatsError, reduce};

mod common;
use common::ts;

fn series(samples: &[f64]) -> SampleSeries {
    SampleSeries {
        direction: Direction::Inbound,
        samples: samples.to_vec(),
    }
}

#[test]
fn reduce_single_sample() {
    let out = reduce(&series(&[100.0])).unwrap();
    assert_eq!(out.avg, 100.0);
    assert_eq!(out.p95, 100.0);
    assert_eq!(out.max, 100.0);
}

#[test]
fn reduce_empty_series_is_zero_load() {
    let out = reduce(&SampleSeries::empty(Direction::Outbound)).unwrap();
    assert_eq!(out.avg, 0.0);
    assert_eq!(out.p95, 0.0);
    assert_eq!(out.max, 0.0);
}

#[test]
fn reduce_p95_uses_linear_interpolation() {
    // 10..=100 in tens: rank = 0.95 * 9 = 8.55, so p95 = 90 + 0.55 * 10 = 95.5
    // (nearest-rank would give 100).
    let samples: Vec<f64> = (1..=10).map(|i| (i * 10) as f64).collect();
    let out = reduce(&series(&samples)).unwrap();
    assert_eq!(out.avg, 55.0);
    assert!((out.p95 - 95.5).abs() < 1e-9, "p95 was {}", out.p95);
    assert_eq!(out.max, 100.0);
}

#[test]
fn reduce_is_order_independent() {
    let a = reduce(&series(&[30.0, 10.0, 50.0, 20.0, 40.0])).unwrap();
    let b = reduce(&series(&[10.0, 20.0, 30.0, 40.0, 50.0])).unwrap();
    assert_eq!(a, b);
}

#[test]
fn reduce_rejects_negative_sample() {
    let err = reduce(&series(&[10.0, -1.0])).unwrap_err();
    assert!(matches!(err, StatsError::NegativeSample(_)));
}

fn run_meta() -> RunMeta {
    RunMeta {
        from: ts("2026-01-01T00:00:00Z"),
        to: ts("2026-01-08T00:00:00Z"),
        asn: 64512,
        org: Some("Example Networks".into()),
    }
}

fn observed(asn: u32, inbound: &[f64], outbound: &[f64]) -> (u32, PeerSamples) {
    (
        asn,
        PeerSamples {
            org: None,
            inbound: SampleSeries {
                direction: Direction::Inbound,
                samples: inbound.to_vec(),
            },
            outbound: SampleSeries {
                direction: Direction::Outbound,
                samples: outbound.to_vec(),
            },
        },
    )
}

fn build(observed: Vec<(u32, PeerSamples)>) -> Snapshot {
    let local_asn = BTreeMap::from([(64512, "Example Networks".to_string())]);
    let filter_asn = BTreeMap::from([(65000, "IXP Route Servers".to_string())]);
    build_snapshot(run_meta(), &local_asn, &filter_asn, observed.into_iter().collect()).unwrap()
}

#[test]
fn build_excludes_local_and_filter_asns() {
    let snapshot = build(vec![
        observed(64512, &[100.0], &[100.0]),
        observed(65000, &[100.0], &[100.0]),
        observed(64496, &[100.0], &[100.0]),
    ]);
    assert_eq!(snapshot.top_peers.len(), 1);
    assert!(snapshot.top_peers.contains_key(&64496));
}

#[test]
fn build_handles_single_direction_traffic() {
    let snapshot = build(vec![observed(64496, &[10.0, 20.0], &[])]);
    let peer = &snapshot.top_peers[&64496];
    assert_eq!(peer.in_avg, 15.0);
    assert_eq!(peer.in_max, 20.0);
    assert_eq!(peer.out_avg, 0.0);
    assert_eq!(peer.out_p95, 0.0);
    assert_eq!(peer.out_max, 0.0);
}

#[test]
fn build_keeps_meta_and_registries() {
    let snapshot = build(vec![observed(64496, &[1.0], &[1.0])]);
    assert_eq!(snapshot.meta.asn, 64512);
    assert_eq!(snapshot.local_asn[&64512], "Example Networks");
    assert_eq!(snapshot.filter_asn[&65000], "IXP Route Servers");
}
