// Shared test helpers

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use peermeter::models::*;

pub fn ts(s: &str) -> DateTime<Utc> {
    s.parse().unwrap()
}

/// PeerStats with avg/max derived from the p95s, enough for merge assertions.
pub fn peer(in_p95: f64, out_p95: f64) -> PeerStats {
    PeerStats {
        org: None,
        in_avg: in_p95 / 2.0,
        in_p95,
        in_max: in_p95 * 2.0,
        out_avg: out_p95 / 2.0,
        out_p95,
        out_max: out_p95 * 2.0,
    }
}

/// Snapshot for vantage `asn` with its own ASN in the local registry.
pub fn snapshot(asn: u32, from: &str, to: &str, peers: &[(u32, PeerStats)]) -> Snapshot {
    Snapshot {
        meta: RunMeta {
            from: ts(from),
            to: ts(to),
            asn,
            org: Some(format!("org-as{asn}")),
        },
        local_asn: BTreeMap::from([(asn, format!("org-as{asn}"))]),
        filter_asn: BTreeMap::new(),
        top_peers: peers.iter().cloned().collect(),
    }
}
