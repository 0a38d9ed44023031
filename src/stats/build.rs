// Snapshot assembly: per-ASN reduction plus local/filter exclusion.

use std::collections::BTreeMap;

use crate::models::{PeerStats, RunMeta, SampleSeries, Snapshot};

use super::{StatsError, reduce};

/// Observed raw series for one ASN. A direction with no samples at all is an
/// empty series and reduces to zeros.
#[derive(Debug, Clone)]
pub struct PeerSamples {
    pub org: Option<String>,
    pub inbound: SampleSeries,
    pub outbound: SampleSeries,
}

/// Builds one immutable Snapshot from a run's observed series.
/// ASNs listed in either registry are dropped from top_peers here, before
/// persistence; they must not leak into cross-vantage merges as remote peers.
pub fn build_snapshot(
    meta: RunMeta,
    local_asn: &BTreeMap<u32, String>,
    filter_asn: &BTreeMap<u32, String>,
    observed: BTreeMap<u32, PeerSamples>,
) -> Result<Snapshot, StatsError> {
    let mut top_peers = BTreeMap::new();
    for (asn, samples) in observed {
        if local_asn.contains_key(&asn) || filter_asn.contains_key(&asn) {
            continue;
        }
        let inbound = reduce(&samples.inbound)?;
        let outbound = reduce(&samples.outbound)?;
        top_peers.insert(
            asn,
            PeerStats {
                org: samples.org,
                in_avg: inbound.avg,
                in_p95: inbound.p95,
                in_max: inbound.max,
                out_avg: outbound.avg,
                out_p95: outbound.p95,
                out_max: outbound.max,
            },
        );
    }

    Ok(Snapshot {
        meta,
        local_asn: local_asn.clone(),
        filter_asn: filter_asn.clone(),
        top_peers,
    })
}
