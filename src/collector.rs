// One collection run: query the flow store, reduce per ASN, build the
// snapshot, cap to the configured top peers, write the file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::flow_repo::FlowRepo;
use crate::models::{Direction, RunMeta, Snapshot};
use crate::snapshot_repo;
use crate::stats::build::{PeerSamples, build_snapshot};

/// Resolves the run window from CLI arguments: an explicit [from, to) pair,
/// or the last `hours` ending now.
pub fn resolve_window(
    hours: u32,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> anyhow::Result<(DateTime<Utc>, DateTime<Utc>)> {
    match (from, to) {
        (Some(from), Some(to)) => {
            anyhow::ensure!(from <= to, "--from must not be after --to");
            Ok((from, to))
        }
        (None, None) => {
            let to = Utc::now();
            Ok((to - Duration::hours(hours as i64), to))
        }
        _ => anyhow::bail!("--from and --to must be given together"),
    }
}

/// Runs one collection pass and writes the snapshot file. Returns its path.
pub async fn run_collect(
    config: &AppConfig,
    repo: &FlowRepo,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    out: Option<PathBuf>,
) -> anyhow::Result<PathBuf> {
    let (local_asn, filter_asn) = config.collector.registries();
    let meta = RunMeta {
        from,
        to,
        asn: config.collector.asn,
        org: config.collector.org.clone(),
    };

    let asns = repo.active_asns(from.timestamp(), to.timestamp()).await?;
    info!(asns = asns.len(), %from, %to, "collecting per-ASN series");

    let mut observed = BTreeMap::new();
    for asn in asns {
        let inbound = repo
            .series(asn, Direction::Inbound, from.timestamp(), to.timestamp())
            .await?;
        let outbound = repo
            .series(asn, Direction::Outbound, from.timestamp(), to.timestamp())
            .await?;
        let org = repo.org_name(asn).await?;
        debug!(
            asn,
            in_samples = inbound.samples.len(),
            out_samples = outbound.samples.len(),
            "series fetched"
        );
        observed.insert(
            asn,
            PeerSamples {
                org,
                inbound,
                outbound,
            },
        );
    }

    let mut snapshot = build_snapshot(meta, &local_asn, &filter_asn, observed)?;
    if let Some(cap) = config.collector.top_peers {
        truncate_top_peers(&mut snapshot, cap as usize);
    }

    let path = out.unwrap_or_else(|| {
        Path::new(&config.collector.snapshot_dir)
            .join(snapshot_repo::default_filename(&snapshot.meta))
    });
    snapshot_repo::save(&path, &snapshot)?;
    info!(
        peers = snapshot.top_peers.len(),
        path = %path.display(),
        "snapshot written"
    );
    Ok(path)
}

/// Keeps the `cap` highest-ranked peers by in_p95 + out_p95.
fn truncate_top_peers(snapshot: &mut Snapshot, cap: usize) {
    if snapshot.top_peers.len() <= cap {
        return;
    }
    let mut ranked: Vec<(u32, f64)> = snapshot
        .top_peers
        .iter()
        .map(|(&asn, stats)| (asn, stats.p95_sum()))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    let keep: std::collections::BTreeSet<u32> =
        ranked.iter().take(cap).map(|&(asn, _)| asn).collect();
    snapshot.top_peers.retain(|asn, _| keep.contains(asn));
}
