use anyhow::Result;
use clap::Parser;
use peermeter::*;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let args = cli::Cli::parse();
    let app_config = config::AppConfig::load(args.config.as_deref())?;

    match args.command {
        cli::Command::Collect {
            hours,
            from,
            to,
            out,
        } => {
            let (from, to) = collector::resolve_window(hours, from, to)?;
            let repo = flow_repo::FlowRepo::connect(&app_config.flows.database).await?;
            collector::run_collect(&app_config, &repo, from, to, out).await?;
        }
        cli::Command::Report {
            snapshots,
            cutoff_bps,
            json,
        } => {
            let cutoff = cutoff_bps.unwrap_or(app_config.report.p95_cutoff_bps);
            report::run_report(&snapshots, cutoff, json.as_deref())?;
        }
    }

    Ok(())
}
