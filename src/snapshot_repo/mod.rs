// Snapshot files: one JSON record per collection run. The wire format is the
// cross-run contract; see models::snapshot.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::error;

use crate::models::{RunMeta, Snapshot};

/// Writes one snapshot record, creating the parent directory if needed.
pub fn save(path: &Path, snapshot: &Snapshot) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create snapshot dir {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(snapshot)?;
    std::fs::write(path, json).with_context(|| format!("write snapshot {}", path.display()))?;
    Ok(())
}

/// Reads one snapshot record. A structurally invalid file (missing key,
/// non-ISO timestamp, non-numeric statistic) is an error naming the file;
/// nothing is defaulted.
pub fn load(path: &Path) -> anyhow::Result<Snapshot> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read snapshot {}", path.display()))?;
    let snapshot: Snapshot = serde_json::from_str(&raw)
        .with_context(|| format!("snapshot {}: invalid record", path.display()))?;
    anyhow::ensure!(
        snapshot.meta.from <= snapshot.meta.to,
        "snapshot {}: meta.from is after meta.to",
        path.display()
    );
    Ok(snapshot)
}

/// Loads every readable snapshot. A malformed file aborts that file's
/// inclusion only: it is logged with its path and skipped, and the count of
/// failures is returned alongside the good records.
pub fn load_all(paths: &[PathBuf]) -> (Vec<Snapshot>, usize) {
    let mut snapshots = Vec::with_capacity(paths.len());
    let mut failed = 0;
    for path in paths {
        match load(path) {
            Ok(snapshot) => snapshots.push(snapshot),
            Err(e) => {
                error!(error = %format!("{e:#}"), "skipping snapshot file");
                failed += 1;
            }
        }
    }
    (snapshots, failed)
}

/// Default file name for a run: peermeter-as<asn>-<from>-<to>.json.
pub fn default_filename(meta: &RunMeta) -> String {
    format!(
        "peermeter-as{}-{}-{}.json",
        meta.asn,
        meta.from.format("%Y%m%dT%H%M"),
        meta.to.format("%Y%m%dT%H%M")
    )
}
