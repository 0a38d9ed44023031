use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub flows: FlowsConfig,
    pub collector: CollectorConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FlowsConfig {
    /// SQLite database maintained by the flow-accounting pipeline.
    pub database: String,
}

/// One ASN registry entry: `{ asn = 64512, name = "Example Net" }`.
#[derive(Debug, Clone, Deserialize)]
pub struct AsnEntry {
    pub asn: u32,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectorConfig {
    /// Vantage ASN for this collector; must appear in local_asn.
    pub asn: u32,
    pub org: Option<String>,
    #[serde(default = "default_snapshot_dir")]
    pub snapshot_dir: String,
    /// Keep only the N highest-ranked peers per snapshot (by in_p95 + out_p95).
    /// Absent = keep all.
    pub top_peers: Option<u32>,
    /// Our own and sibling ASNs; never reported as remote peers.
    #[serde(default)]
    pub local_asn: Vec<AsnEntry>,
    /// ASNs excluded from reports by operator policy.
    #[serde(default)]
    pub filter_asn: Vec<AsnEntry>,
}

fn default_snapshot_dir() -> String {
    "snapshots".into()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportConfig {
    /// Merged peers with either direction's p95 below this are dropped.
    /// 0 keeps everything.
    #[serde(default)]
    pub p95_cutoff_bps: f64,
}

impl AppConfig {
    /// Load order: explicit path, then CONFIG_FILE env, then ./config.toml.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => std::env::var("CONFIG_FILE")
                .unwrap_or_else(|_| "config.toml".into())
                .into(),
        };
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.flows.database.is_empty(),
            "flows.database must be non-empty"
        );
        anyhow::ensure!(
            self.collector.asn > 0,
            "collector.asn must be a positive ASN, got {}",
            self.collector.asn
        );
        anyhow::ensure!(
            !self.collector.snapshot_dir.is_empty(),
            "collector.snapshot_dir must be non-empty"
        );
        if let Some(top) = self.collector.top_peers {
            anyhow::ensure!(top > 0, "collector.top_peers must be > 0, got {top}");
        }
        anyhow::ensure!(
            self.report.p95_cutoff_bps >= 0.0,
            "report.p95_cutoff_bps must be >= 0, got {}",
            self.report.p95_cutoff_bps
        );

        let mut seen = BTreeMap::new();
        for (section, entries) in [
            ("collector.local_asn", &self.collector.local_asn),
            ("collector.filter_asn", &self.collector.filter_asn),
        ] {
            for entry in entries {
                anyhow::ensure!(
                    entry.asn > 0,
                    "{section} entries must have a positive ASN, got {}",
                    entry.asn
                );
                if let Some(prev) = seen.insert(entry.asn, section) {
                    anyhow::bail!(
                        "AS{} listed twice ({prev} and {section})",
                        entry.asn
                    );
                }
            }
        }
        anyhow::ensure!(
            self.collector
                .local_asn
                .iter()
                .any(|e| e.asn == self.collector.asn),
            "collector.local_asn must contain the vantage ASN {}",
            self.collector.asn
        );
        Ok(())
    }
}

impl CollectorConfig {
    /// Registry entries as ASN -> org maps for the snapshot builder.
    pub fn registries(&self) -> (BTreeMap<u32, String>, BTreeMap<u32, String>) {
        let to_map = |entries: &[AsnEntry]| {
            entries
                .iter()
                .map(|e| (e.asn, e.name.clone()))
                .collect::<BTreeMap<u32, String>>()
        };
        (to_map(&self.local_asn), to_map(&self.filter_asn))
    }
}
