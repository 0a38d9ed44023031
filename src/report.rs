// Report run: load snapshot files, merge, apply the cutoff, and hand the
// result to the consumer — a terminal table and, on request, a JSON context
// for the external document renderer.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;
use tracing::{info, warn};

use crate::models::{AggregateReport, MergedPeer};
use crate::snapshot_repo;
use crate::stats::filter::apply_threshold;
use crate::stats::format::{format_document, format_table};
use crate::stats::merge::merge_snapshots;

/// Template-ready view of the merged report. Bitrates are pre-formatted with
/// the document preset (one decimal).
#[derive(Debug, Serialize)]
pub struct ReportContext {
    pub from: Option<String>,
    pub to: Option<String>,
    /// Ascending by ASN.
    pub local: Vec<LocalRow>,
    /// Descending by in_p95 + out_p95.
    pub remote: Vec<RemoteRow>,
    pub totals: Totals,
}

#[derive(Debug, Serialize)]
pub struct LocalRow {
    pub asn: u32,
    pub name: String,
    /// "97.3%", or "n/a" when coverage is unknown.
    pub coverage: String,
}

#[derive(Debug, Serialize)]
pub struct RemoteRow {
    pub asn: u32,
    pub name: String,
    pub local_peers: u32,
    pub in_avg: String,
    pub in_p95: String,
    pub in_max: String,
    pub out_avg: String,
    pub out_p95: String,
    pub out_max: String,
}

#[derive(Debug, Serialize)]
pub struct Totals {
    pub in_avg: String,
    pub in_p95: String,
    pub in_max: String,
    pub out_avg: String,
    pub out_p95: String,
    pub out_max: String,
}

/// Loads, merges, filters, prints; optionally writes the JSON context.
pub fn run_report(
    paths: &[PathBuf],
    cutoff_bps: f64,
    json_out: Option<&Path>,
) -> anyhow::Result<()> {
    let (snapshots, failed) = snapshot_repo::load_all(paths);
    if snapshots.is_empty() && failed > 0 {
        anyhow::bail!("no usable snapshot files ({failed} failed to load)");
    }
    if failed > 0 {
        warn!(failed, loaded = snapshots.len(), "some snapshot files were skipped");
    }

    let mut report = merge_snapshots(&snapshots);
    apply_threshold(&mut report, cutoff_bps);
    info!(
        local = report.local.len(),
        remote = report.remote.len(),
        cutoff_bps,
        "merged {} snapshots",
        snapshots.len()
    );

    print_table(&report);

    if let Some(path) = json_out {
        let context = build_context(&report);
        let json = serde_json::to_string_pretty(&context)?;
        std::fs::write(path, json)
            .with_context(|| format!("write report context {}", path.display()))?;
        info!(path = %path.display(), "report context written");
    }
    Ok(())
}

/// Remote entries ranked the way the report lists them.
fn ranked_remote(report: &AggregateReport) -> Vec<(u32, &MergedPeer)> {
    let mut entries: Vec<(u32, &MergedPeer)> =
        report.remote.iter().map(|(&asn, peer)| (asn, peer)).collect();
    entries.sort_by(|a, b| b.1.p95_sum().total_cmp(&a.1.p95_sum()));
    entries
}

pub fn build_context(report: &AggregateReport) -> ReportContext {
    let local = report
        .local
        .iter()
        .map(|(&asn, entry)| LocalRow {
            asn,
            name: entry.org.clone().unwrap_or_default(),
            coverage: match entry.coverage_pct {
                Some(pct) => format!("{pct:.1}%"),
                None => "n/a".into(),
            },
        })
        .collect();

    let remote: Vec<RemoteRow> = ranked_remote(report)
        .into_iter()
        .map(|(asn, peer)| RemoteRow {
            asn,
            name: peer.org.clone().unwrap_or_default(),
            local_peers: peer.local_peers,
            in_avg: format_document(peer.in_avg),
            in_p95: format_document(peer.in_p95),
            in_max: format_document(peer.in_max),
            out_avg: format_document(peer.out_avg),
            out_p95: format_document(peer.out_p95),
            out_max: format_document(peer.out_max),
        })
        .collect();

    let totals = column_totals(report);

    ReportContext {
        from: report.observed_from.map(|t| t.to_rfc3339()),
        to: report.observed_to.map(|t| t.to_rfc3339()),
        local,
        remote,
        totals,
    }
}

fn column_totals(report: &AggregateReport) -> Totals {
    let mut sums = [0.0f64; 6];
    for peer in report.remote.values() {
        sums[0] += peer.in_avg;
        sums[1] += peer.in_p95;
        sums[2] += peer.in_max;
        sums[3] += peer.out_avg;
        sums[4] += peer.out_p95;
        sums[5] += peer.out_max;
    }
    Totals {
        in_avg: format_document(sums[0]),
        in_p95: format_document(sums[1]),
        in_max: format_document(sums[2]),
        out_avg: format_document(sums[3]),
        out_p95: format_document(sums[4]),
        out_max: format_document(sums[5]),
    }
}

fn print_table(report: &AggregateReport) {
    match (report.observed_from, report.observed_to) {
        (Some(from), Some(to)) => println!("Observed window: {from} .. {to}"),
        _ => println!("Observed window: (no snapshots)"),
    }

    println!();
    println!("Local networks:");
    for (asn, entry) in &report.local {
        let coverage = match entry.coverage_pct {
            Some(pct) => format!("{pct:.1}%"),
            None => "n/a".into(),
        };
        println!(
            "  AS{:<10} {:<30} coverage {:>8}",
            asn,
            entry.org.as_deref().unwrap_or(""),
            coverage
        );
    }

    println!();
    println!(
        "  {:<10} {:<26} {:>5} {:>9} {:>9} {:>9} {:>9} {:>9} {:>9}",
        "ASN", "ORG", "PEERS", "IN AVG", "IN P95", "IN MAX", "OUT AVG", "OUT P95", "OUT MAX"
    );
    for (asn, peer) in ranked_remote(report) {
        println!(
            "  AS{:<8} {:<26} {:>5} {:>9} {:>9} {:>9} {:>9} {:>9} {:>9}",
            asn,
            peer.org.as_deref().unwrap_or(""),
            peer.local_peers,
            format_table(peer.in_avg),
            format_table(peer.in_p95),
            format_table(peer.in_max),
            format_table(peer.out_avg),
            format_table(peer.out_p95),
            format_table(peer.out_max),
        );
    }
}
