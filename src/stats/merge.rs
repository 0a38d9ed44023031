// Cross-run snapshot merge. Two policies here are deliberate oddities kept
// from the original report semantics and pinned by tests:
//
//  * The observed window is the INTERSECTION of the input windows (latest
//    start, earliest end), not the union. The merged report only claims the
//    period every contributing run measured.
//
//  * Remote statistics are SUMMED field-by-field across snapshots, not
//    averaged or weighted. The sum approximates the total traffic a peer
//    would move off transit by connecting once, across all vantage points.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use chrono::{DateTime, Utc};

use crate::models::{AggregateReport, LocalEntry, MergedPeer, Snapshot};

/// Merges N snapshots into one aggregate view. Commutative and associative:
/// the input order never affects the result. Zero snapshots yield an empty
/// report; one snapshot yields an identity reshape with local_peers = 1.
pub fn merge_snapshots(snapshots: &[Snapshot]) -> AggregateReport {
    let mut acc = MergeAcc::default();
    for snapshot in snapshots {
        acc.add(snapshot);
    }
    acc.finish()
}

/// Owned accumulator, scoped to one merge call. "First occurrence" of a
/// remote ASN is a key-presence check against `remote`, never an artifact of
/// input ordering.
#[derive(Default)]
struct MergeAcc {
    observed_from: Option<DateTime<Utc>>,
    observed_to: Option<DateTime<Utc>>,
    locals: BTreeMap<u32, LocalAcc>,
    remote: BTreeMap<u32, MergedPeer>,
}

#[derive(Default)]
struct LocalAcc {
    org: Option<String>,
    /// Shortest positive run duration seen for this vantage ASN; None for
    /// registry-only entries and zero-duration runs (coverage unknown).
    run_secs: Option<i64>,
}

impl MergeAcc {
    fn add(&mut self, snapshot: &Snapshot) {
        let meta = &snapshot.meta;

        self.observed_from = Some(match self.observed_from {
            Some(from) => from.max(meta.from),
            None => meta.from,
        });
        self.observed_to = Some(match self.observed_to {
            Some(to) => to.min(meta.to),
            None => meta.to,
        });

        let run_secs = (meta.to - meta.from).num_seconds();
        let vantage = self.locals.entry(meta.asn).or_default();
        fill_org(&mut vantage.org, meta.org.as_deref());
        if run_secs > 0 {
            vantage.run_secs = Some(match vantage.run_secs {
                Some(prev) => prev.min(run_secs),
                None => run_secs,
            });
        }

        for (&asn, name) in &snapshot.local_asn {
            let entry = self.locals.entry(asn).or_default();
            fill_org(&mut entry.org, Some(name));
        }

        for (&asn, stats) in &snapshot.top_peers {
            match self.remote.entry(asn) {
                Entry::Vacant(first) => {
                    first.insert(MergedPeer {
                        org: stats.org.clone(),
                        local_peers: 1,
                        in_avg: stats.in_avg,
                        in_p95: stats.in_p95,
                        in_max: stats.in_max,
                        out_avg: stats.out_avg,
                        out_p95: stats.out_p95,
                        out_max: stats.out_max,
                    });
                }
                Entry::Occupied(seen) => {
                    let merged = seen.into_mut();
                    merged.local_peers += 1;
                    merged.in_avg += stats.in_avg;
                    merged.in_p95 += stats.in_p95;
                    merged.in_max += stats.in_max;
                    merged.out_avg += stats.out_avg;
                    merged.out_p95 += stats.out_p95;
                    merged.out_max += stats.out_max;
                    fill_org(&mut merged.org, stats.org.as_deref());
                }
            }
        }
    }

    fn finish(self) -> AggregateReport {
        // Disjoint inputs produce an empty intersection; the window is then
        // zero, not negative.
        let window_secs = match (self.observed_from, self.observed_to) {
            (Some(from), Some(to)) => (to - from).num_seconds().max(0),
            _ => 0,
        };

        let local: BTreeMap<u32, LocalEntry> = self
            .locals
            .iter()
            .map(|(&asn, acc)| {
                let coverage_pct = acc
                    .run_secs
                    .map(|run| round1(100.0 * window_secs as f64 / run as f64));
                (
                    asn,
                    LocalEntry {
                        org: acc.org.clone(),
                        coverage_pct,
                    },
                )
            })
            .collect();

        // A peer that is itself a reporting vantage point (local ASN of ANY
        // snapshot) is never listed as an external peer.
        let mut remote = self.remote;
        remote.retain(|asn, _| !local.contains_key(asn));

        AggregateReport {
            observed_from: self.observed_from,
            observed_to: self.observed_to,
            local,
            remote,
        }
    }
}

/// Keeps the first known organization name; fills in a name where none was
/// accumulated yet.
fn fill_org(slot: &mut Option<String>, name: Option<&str>) {
    if slot.is_none()
        && let Some(name) = name
    {
        *slot = Some(name.to_string());
    }
}

/// Percentages carry one fractional digit.
fn round1(pct: f64) -> f64 {
    (pct * 10.0).round() / 10.0
}
