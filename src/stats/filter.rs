// Percentile cutoff over the merged remote peers.

use crate::models::AggregateReport;

/// Removes every remote entry whose inbound p95 OR outbound p95 is strictly
/// below the cutoff; one underperforming direction is enough to drop a peer.
/// ">= cutoff survives", so a cutoff of 0 retains everything. Local entries
/// are never touched.
pub fn apply_threshold(report: &mut AggregateReport, cutoff_bps: f64) {
    report
        .remote
        .retain(|_, peer| peer.in_p95 >= cutoff_bps && peer.out_p95 >= cutoff_bps);
}
