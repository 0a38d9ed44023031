use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "peermeter")]
#[command(version)]
#[command(about = "Per-ASN traffic snapshots and peering-savings reports", long_about = None)]
pub struct Cli {
    /// Config file (falls back to CONFIG_FILE env, then ./config.toml).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run one collection pass and write a snapshot file.
    Collect {
        /// Collect the last N hours (ignored when --from/--to are given).
        #[arg(long, default_value_t = 24)]
        hours: u32,
        /// Window start, RFC 3339 (requires --to).
        #[arg(long, value_name = "TIMESTAMP")]
        from: Option<DateTime<Utc>>,
        /// Window end, RFC 3339 (requires --from).
        #[arg(long, value_name = "TIMESTAMP")]
        to: Option<DateTime<Utc>>,
        /// Snapshot output path (default: <snapshot_dir>/<generated name>).
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,
    },
    /// Merge snapshot files into a consolidated peering report.
    Report {
        /// Snapshot files to merge.
        #[arg(required = true, value_name = "SNAPSHOT")]
        snapshots: Vec<PathBuf>,
        /// Drop merged peers below this p95 (overrides report.p95_cutoff_bps).
        #[arg(long, value_name = "BPS")]
        cutoff_bps: Option<f64>,
        /// Also write the report context as JSON for the document renderer.
        #[arg(long, value_name = "PATH")]
        json: Option<PathBuf>,
    },
}
