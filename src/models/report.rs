// Merge result: one aggregate view over N snapshots.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One participating local network in the merged report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocalEntry {
    pub org: Option<String>,
    /// Share of the merged observed window this vantage actually measured,
    /// in percent with one fractional digit. None when unknown (registry-only
    /// entry, or a zero-duration run).
    pub coverage_pct: Option<f64>,
}

/// Merged statistics for one remote peer ASN. avg/p95/max are summed across
/// contributing snapshots, not averaged (see stats::merge).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedPeer {
    pub org: Option<String>,
    /// How many source snapshots contributed data for this ASN.
    pub local_peers: u32,
    pub in_avg: f64,
    pub in_p95: f64,
    pub in_max: f64,
    pub out_avg: f64,
    pub out_p95: f64,
    pub out_max: f64,
}

impl MergedPeer {
    /// Ranking key used for report ordering: in_p95 + out_p95.
    pub fn p95_sum(&self) -> f64 {
        self.in_p95 + self.out_p95
    }
}

/// The merged view. Built fresh per merge invocation; only the threshold
/// filter shrinks it afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregateReport {
    /// Latest start across snapshots: the point from which every input has data.
    pub observed_from: Option<DateTime<Utc>>,
    /// Earliest end across snapshots.
    pub observed_to: Option<DateTime<Utc>>,
    pub local: BTreeMap<u32, LocalEntry>,
    pub remote: BTreeMap<u32, MergedPeer>,
}
