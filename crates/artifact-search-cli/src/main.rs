//! Artifact Search command-line tool
//!
//! Indexes a repository laid out in the default Maven 2 format and looks up
//! stored artifacts by checksum.

mod config;
mod scan;
mod telemetry;

use anyhow::{Context, Result};
use artifact_search_service::{IndexRecordFactory, SearchService, ServiceRegistry};
use artifact_search_store::{
    create_pool, mask_password, InMemoryMetadataResolver, InMemoryRepositorySearch, PgPool,
    PoolConfig, PostgresArtifactStore,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::config::AppConfig;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration directory
    #[arg(short, long, env = "CONFIG_DIR", default_value = "config")]
    config_dir: String,

    /// Environment (development, production, etc.)
    #[arg(short, long, env = "ENVIRONMENT", default_value = "development")]
    environment: String,

    /// Database URL
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Log level
    #[arg(long, env = "RUST_LOG")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build index records for every artifact under a repository root
    Index {
        /// Repository identifier recorded with each artifact
        #[arg(long)]
        repository_id: Option<String>,

        /// Repository root directory
        #[arg(long)]
        path: Option<PathBuf>,

        /// Also write each artifact to the artifact store
        #[arg(long)]
        persist: bool,
    },

    /// Find stored artifacts by checksum
    Lookup {
        /// Checksum of the archive bytes
        #[arg(long)]
        checksum: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let mut config = AppConfig::load(&args.config_dir, &args.environment)
        .with_context(|| format!("Failed to load configuration from {}", args.config_dir))?;

    if let Some(database_url) = args.database_url {
        match config.database.as_mut() {
            Some(database) => database.database_url = database_url,
            None => config.database = Some(PoolConfig::new(database_url)),
        }
    }
    if let Some(log_level) = args.log_level {
        config.logging.level = log_level;
    }

    telemetry::init(&config.logging);
    info!("Environment: {}", args.environment);

    match args.command {
        Command::Index {
            repository_id,
            path,
            persist,
        } => {
            if let Some(repository_id) = repository_id {
                config.repository.id = repository_id;
            }
            if let Some(path) = path {
                config.repository.root = Some(path);
            }
            run_index(&config, persist).await
        }
        Command::Lookup { checksum } => run_lookup(&config, &checksum).await,
    }
}

async fn run_index(config: &AppConfig, persist: bool) -> Result<()> {
    let root = config
        .repository
        .root
        .as_deref()
        .context("No repository root configured; pass --path or set repository.root")?;

    info!(
        repository_id = %config.repository.id,
        root = %root.display(),
        algorithm = %config.indexer.checksum_algorithm,
        "Indexing repository"
    );

    let factory = IndexRecordFactory::new(config.indexer.clone());
    let indexed = scan::scan_repository(root, &config.repository.id, &factory)?;

    for artifact in &indexed {
        println!("{}", serde_json::to_string(artifact)?);
    }

    if persist {
        let pool = connect(config).await?;
        let store = PostgresArtifactStore::new(pool);
        for artifact in &indexed {
            store
                .record_artifact(&artifact.to_stored())
                .await
                .with_context(|| format!("Failed to store {}", artifact.coordinate))?;
        }
        info!(count = indexed.len(), "Artifacts persisted");
    }

    Ok(())
}

async fn run_lookup(config: &AppConfig, checksum: &str) -> Result<()> {
    let pool = connect(config).await?;

    // Checksum lookups only consult the artifact store
    let services = ServiceRegistry::new(
        Arc::new(InMemoryRepositorySearch::new()),
        Arc::new(InMemoryMetadataResolver::new()),
        Arc::new(PostgresArtifactStore::new(pool)),
        config.indexer.clone(),
    );

    let artifacts = services
        .search()
        .find_by_checksum(checksum)
        .await
        .context("Checksum query failed")?;
    info!(matches = artifacts.len(), "Checksum lookup complete");

    for artifact in &artifacts {
        println!("{}", serde_json::to_string(artifact)?);
    }

    Ok(())
}

async fn connect(config: &AppConfig) -> Result<PgPool> {
    let pool_config = config.require_database()?;
    info!("Database: {}", mask_password(&pool_config.database_url));

    create_pool(pool_config)
        .await
        .context("Failed to create database connection pool")
}
