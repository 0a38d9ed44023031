// Snapshot record: the unit of exchange between collection runs.
// Wire format is stable across runs; the merge step depends on it.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One collection run: observed window and local vantage point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMeta {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    /// ASN of the vantage network this run measured from.
    pub asn: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org: Option<String>,
}

/// Reduced per-direction statistics for one remote peer ASN (bits/s).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerStats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org: Option<String>,
    pub in_avg: f64,
    pub in_p95: f64,
    pub in_max: f64,
    pub out_avg: f64,
    pub out_p95: f64,
    pub out_max: f64,
}

impl PeerStats {
    /// Ranking key used for the top-peer cap and report ordering.
    pub fn p95_sum(&self) -> f64 {
        self.in_p95 + self.out_p95
    }
}

/// Immutable per-run summary. top_peers never contains an ASN listed in
/// local_asn or filter_asn; that exclusion is enforced at build time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub meta: RunMeta,
    /// Local vantage ASNs excluded from top_peers (ASN -> org name).
    pub local_asn: BTreeMap<u32, String>,
    /// Explicitly excluded ASNs (ASN -> org name).
    pub filter_asn: BTreeMap<u32, String>,
    pub top_peers: BTreeMap<u32, PeerStats>,
}
