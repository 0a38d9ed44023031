// Dump a snapshot file's peers ranked by p95 sum.
//
// Usage: cargo run --example dump_snapshot -- SNAPSHOT [LIMIT]
//   SNAPSHOT  path to a snapshot JSON file
//   LIMIT     default: 10

use std::env;
use std::path::Path;

use anyhow::Context;
use peermeter::snapshot_repo;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    let path = args
        .get(1)
        .context("usage: dump_snapshot SNAPSHOT [LIMIT]")?;
    let limit: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(10);

    let snapshot = snapshot_repo::load(Path::new(path))?;
    println!(
        "AS{} ({}) {} .. {}",
        snapshot.meta.asn,
        snapshot.meta.org.as_deref().unwrap_or("?"),
        snapshot.meta.from,
        snapshot.meta.to
    );

    let mut peers: Vec<_> = snapshot.top_peers.iter().collect();
    peers.sort_by(|a, b| b.1.p95_sum().total_cmp(&a.1.p95_sum()));
    peers.truncate(limit);
    for (asn, stats) in peers {
        println!("AS{asn} {}", serde_json::to_string(stats)?);
    }
    Ok(())
}
