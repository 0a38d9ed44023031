// SQLite flow-rate store. The accounting pipeline writes one row per
// ASN/direction/interval bucket; missing buckets mean "not sampled", which is
// distinct from an explicit zero-rate row.

use std::path::Path;
use std::str::FromStr;

use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::instrument;

use crate::models::{Direction, SampleSeries};

pub struct FlowRepo {
    pool: SqlitePool,
}

impl FlowRepo {
    pub async fn connect(path: &str) -> anyhow::Result<Self> {
        if let Some(parent) = Path::new(path).parent() {
            std::fs::create_dir_all(parent)?;
        }
        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .busy_timeout(std::time::Duration::from_secs(5))
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);
        let pool = SqlitePoolOptions::new().connect_with(opts).await?;
        Ok(Self { pool })
    }

    /// Creates the flow tables if not present (fresh or test databases; in
    /// production the accounting pipeline owns this schema).
    pub async fn init(&self) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS traffic_rate (
                asn INTEGER NOT NULL,
                direction TEXT NOT NULL,
                bucket INTEGER NOT NULL,
                bits_per_sec REAL NOT NULL,
                PRIMARY KEY (asn, direction, bucket)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_traffic_rate_bucket ON traffic_rate(bucket)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE TABLE IF NOT EXISTS asn_org (asn INTEGER PRIMARY KEY, name TEXT NOT NULL)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Distinct ASNs with any sample in [from_ts, to_ts), ascending.
    #[instrument(skip(self), fields(repo = "flow", operation = "active_asns"))]
    pub async fn active_asns(&self, from_ts: i64, to_ts: i64) -> anyhow::Result<Vec<u32>> {
        let rows = sqlx::query_scalar::<_, i64>(
            "SELECT DISTINCT asn FROM traffic_rate WHERE bucket >= $1 AND bucket < $2 ORDER BY asn",
        )
        .bind(from_ts)
        .bind(to_ts)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(|asn| asn as u32).collect())
    }

    /// Bitrate samples for one ASN and direction in [from_ts, to_ts),
    /// bucket-ordered. Gaps in the source data are simply absent here.
    #[instrument(skip(self), fields(repo = "flow", operation = "series"))]
    pub async fn series(
        &self,
        asn: u32,
        direction: Direction,
        from_ts: i64,
        to_ts: i64,
    ) -> anyhow::Result<SampleSeries> {
        let rows = sqlx::query(
            "SELECT bits_per_sec FROM traffic_rate
             WHERE asn = $1 AND direction = $2 AND bucket >= $3 AND bucket < $4
             ORDER BY bucket ASC",
        )
        .bind(asn as i64)
        .bind(direction.as_str())
        .bind(from_ts)
        .bind(to_ts)
        .fetch_all(&self.pool)
        .await?;

        let mut samples = Vec::with_capacity(rows.len());
        for row in rows {
            samples.push(row.try_get::<f64, _>("bits_per_sec")?);
        }
        Ok(SampleSeries { direction, samples })
    }

    /// Display name for an ASN, if the accounting pipeline resolved one.
    pub async fn org_name(&self, asn: u32) -> anyhow::Result<Option<String>> {
        let row = sqlx::query_scalar::<_, String>("SELECT name FROM asn_org WHERE asn = $1")
            .bind(asn as i64)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}
