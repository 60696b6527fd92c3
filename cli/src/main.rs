//! Cqwatch CLI
//!
//! Runs one audit pass over the configured aggregation policies and prints
//! a status-colored freshness report.
//!
//! # Usage
//!
//! ```bash
//! cqwatch --help
//! cqwatch --hosts-file servers
//! cqwatch --measurement load-load-midterm --host server4 --no-color
//! ```

#![deny(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;
use shared::config::{load_hosts, AuditRegistry, RegistryBuilder};
use shared::freshness::run_audit;
use shared::report::ConsoleReporter;
use shared::store::{ClickHouseSampleStore, SampleStore, StoreConfig};

/// Cqwatch - continuous aggregation freshness audit
#[derive(Parser)]
#[command(name = "cqwatch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Time-series store URL
    #[arg(long, env = "CQWATCH_DB_URL")]
    db_url: Option<String>,

    /// Database name
    #[arg(long, env = "CQWATCH_DB_NAME")]
    database: Option<String>,

    /// Database user
    #[arg(long, env = "CQWATCH_DB_USER")]
    user: Option<String>,

    /// Database password
    #[arg(long, env = "CQWATCH_DB_PASSWORD")]
    password: Option<String>,

    /// Line-delimited host list file
    #[arg(long, default_value = "servers")]
    hosts_file: String,

    /// Extra host to audit, in addition to the host list file
    #[arg(long = "host")]
    extra_hosts: Vec<String>,

    /// Measurement (metric series) to audit
    #[arg(long = "measurement", default_value = "load-load-midterm")]
    measurements: Vec<String>,

    /// Disable ANSI colors in the report
    #[arg(long)]
    no_color: bool,
}

impl Cli {
    fn store_config(&self) -> StoreConfig {
        let mut config = StoreConfig::from_env();
        if let Some(url) = &self.db_url {
            config.url.clone_from(url);
        }
        if let Some(database) = &self.database {
            config.database.clone_from(database);
        }
        if let Some(user) = &self.user {
            config.user.clone_from(user);
        }
        if let Some(password) = &self.password {
            config.password.clone_from(password);
        }
        config
    }
}

/// Builds the audit registry: the declared policy set, the hosts from the
/// host list file plus any extra hosts, and the measurements to audit.
fn build_registry(cli: &Cli) -> Result<AuditRegistry> {
    let hosts = load_hosts(&cli.hosts_file).context("Could not read host list")?;

    let mut builder = RegistryBuilder::new()
        .policy("samples_1h", 60, 1)?
        .policy("samples_1d", 288, 5)?
        .policy("samples_1w", 336, 30)?
        .policy("samples_4w", 336, 120)?
        .policy("samples_26w", 364, 720)?
        .policy("samples_52w", 364, 1440)?
        .hosts(hosts)?
        .hosts(cli.extra_hosts.iter().cloned())?;

    for measurement in &cli.measurements {
        builder = builder.measurement(measurement)?;
    }

    Ok(builder.build())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let registry = build_registry(&cli)?;
    tracing::info!(
        policies = registry.policies().len(),
        hosts = registry.hosts().len(),
        measurements = registry.measurements().len(),
        triples = registry.triple_count(),
        "Starting audit pass"
    );

    let store = ClickHouseSampleStore::new(&cli.store_config());
    store
        .ping()
        .await
        .context("Could not connect to the time-series store")?;

    let verdicts = run_audit(&registry, &store, chrono::Utc::now()).await;

    let reporter = ConsoleReporter::new(!cli.no_color);
    print!("{}", reporter.generate(&verdicts));

    Ok(())
}
